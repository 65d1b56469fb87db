//! Render3 Utilities

use crate::output::output_ast as o;

/// A reference to a type, usable both as a value and in type position.
#[derive(Debug, Clone)]
pub struct R3Reference<N> {
    pub value: o::Expression<N>,
    pub type_expr: o::Expression<N>,
}

impl<N> R3Reference<N> {
    pub fn new(value: o::Expression<N>, type_expr: o::Expression<N>) -> Self {
        R3Reference { value, type_expr }
    }
}

/// Use one expression for both the value and the type side of a reference.
pub fn wrap_reference<N: Clone>(wrapped: o::Expression<N>) -> R3Reference<N> {
    R3Reference {
        value: wrapped.clone(),
        type_expr: wrapped,
    }
}
