#![deny(clippy::all)]

/**
 * Angular Linker - Rust Implementation
 *
 * Links `$ngDeclareComponent` partial declarations into full component definitions.
 */
pub use ng_compiler as compiler;

pub mod config;
pub mod linker;
pub mod ngtsc;

pub use config::LinkerOptions;
pub use linker::error::FatalLinkerError;
pub use linker::file_linker::{FileLinker, LinkerEnvironment};
pub use linker::oxc::{link_source, LinkedSource};

/// Linker version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
