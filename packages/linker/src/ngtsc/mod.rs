//! Pieces shared with the ahead-of-time toolchain: diagnostics logging and the output AST
//! translator.

pub mod logging;
pub mod translator;
