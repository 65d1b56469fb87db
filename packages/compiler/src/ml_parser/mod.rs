//! ML (Markup Language) Parser Module
//!
//! Only the configuration shared with callers of the template parser lives here.

pub mod defaults;

pub use defaults::*;
