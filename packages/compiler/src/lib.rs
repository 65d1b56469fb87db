#![deny(clippy::all)]

/**
 * Angular Compiler - Rust Implementation
 *
 * Output AST, constant pool and component metadata shared by the linker and any
 * template compiler plugged into it.
 */
mod assertions;
pub mod compiler;
pub mod constant_pool;
pub mod core;
pub mod parse_util;

pub mod ml_parser;
pub mod output;
pub mod render3;

pub use assertions::{assert_interpolation_symbols, InterpolationError};
pub use compiler::ComponentCompiler;
pub use constant_pool::ConstantPool;
