//! Output Module
//!
//! The intermediate AST emitted by compilation, before translation into a host AST.

pub mod output_ast;
