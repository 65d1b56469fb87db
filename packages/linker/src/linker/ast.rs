//! Linker AST Abstraction
//!
//! Defines the interface for interacting with different AST implementations.

use crate::linker::error::FatalLinkerError;
use indexmap::IndexMap;
use std::fmt::Debug;

/// Location range in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// 0-based byte offset of the range start.
    pub start_pos: usize,
    /// 0-based line index of the range start.
    pub start_line: usize,
    /// 0-based column position of the range start.
    pub start_col: usize,
    /// 0-based byte offset just past the range end.
    pub end_pos: usize,
}

/// Helper trait for AST nodes that can be used by the linker.
pub trait AstNode: Debug + Clone {}

/// An abstraction for getting information from an AST while being agnostic to the underlying AST implementation.
///
/// Every `parse_*` method fails if the node is not of the expected kind, so callers classify
/// with the matching `is_*` method first.
pub trait AstHost<TExpression: AstNode> {
    /// Get the name of the symbol represented by the given expression node, or `None` if it is not a symbol.
    ///
    /// For qualified references (`i0.ViewEncapsulation.None`) this is the right-most name.
    fn get_symbol_name(&self, node: &TExpression) -> Option<String>;

    fn is_string_literal(&self, node: &TExpression) -> bool;
    fn parse_string_literal(&self, node: &TExpression) -> Result<String, FatalLinkerError>;

    fn is_numeric_literal(&self, node: &TExpression) -> bool;
    fn parse_numeric_literal(&self, node: &TExpression) -> Result<f64, FatalLinkerError>;

    fn is_boolean_literal(&self, node: &TExpression) -> bool;
    fn parse_boolean_literal(&self, node: &TExpression) -> Result<bool, FatalLinkerError>;

    fn is_array_literal(&self, node: &TExpression) -> bool;

    /// Parse the elements of an array literal, skipping holes.
    fn parse_array_literal(&self, node: &TExpression) -> Result<Vec<TExpression>, FatalLinkerError>;

    fn is_object_literal(&self, node: &TExpression) -> bool;

    /// Parse the given expression into a map of object property names to property expressions.
    fn parse_object_literal(
        &self,
        node: &TExpression,
    ) -> Result<IndexMap<String, TExpression>, FatalLinkerError>;

    fn is_function(&self, node: &TExpression) -> bool;

    /// Compute the "value" of a function expression by parsing its body for a single `return` statement.
    ///
    /// Hosts with arrow functions treat an expression body as that single return.
    fn unwrap_function(&self, node: &TExpression) -> Result<TExpression, FatalLinkerError>;

    /// Compute the location range of the expression in the source file.
    fn get_range(&self, node: &TExpression) -> Result<Range, FatalLinkerError>;

    /// Build an error pointing at `node`, falling back to no location.
    fn fail(&self, node: &TExpression, message: &str) -> FatalLinkerError {
        FatalLinkerError::at(message, self.get_range(node).ok())
    }
}
