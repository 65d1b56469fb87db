//! Angular Linker
//!
//! Turns partial component declarations emitted by library builds into full definitions,
//! independently of the AST the host tool uses.

pub mod ast;
pub mod ast_value;
pub mod error;
pub mod file_linker;
pub mod oxc;
pub mod partial_linkers;
pub mod translator;
