//! Typed views over host AST nodes.
//!
//! `AstObject` and `AstValue` validate shapes as they are read and fail with a
//! `FatalLinkerError` pointing at the offending node.

use crate::linker::ast::{AstHost, AstNode, Range};
use crate::linker::error::FatalLinkerError;
use indexmap::IndexMap;
use ng_compiler::output::output_ast as o;

/// The result of classifying a single node.
pub enum DecodedValue<'a, TExpression: AstNode> {
    String(String),
    Number(f64),
    Boolean(bool),
    Array(Vec<AstValue<'a, TExpression>>),
    Object(AstObject<'a, TExpression>),
    /// A single-expression function, unwrapped to its returned value.
    Function(AstValue<'a, TExpression>),
    Opaque(o::Expression<TExpression>),
}

#[derive(Clone)]
pub struct AstValue<'a, TExpression: AstNode> {
    pub node: TExpression,
    pub host: &'a dyn AstHost<TExpression>,
}

impl<'a, TExpression: AstNode> AstValue<'a, TExpression> {
    pub fn new(node: TExpression, host: &'a dyn AstHost<TExpression>) -> Self {
        Self { node, host }
    }

    pub fn is_string(&self) -> bool {
        self.host.is_string_literal(&self.node)
    }

    pub fn get_string(&self) -> Result<String, FatalLinkerError> {
        self.host.parse_string_literal(&self.node)
    }

    pub fn is_number(&self) -> bool {
        self.host.is_numeric_literal(&self.node)
    }

    pub fn get_number(&self) -> Result<f64, FatalLinkerError> {
        self.host.parse_numeric_literal(&self.node)
    }

    pub fn is_boolean(&self) -> bool {
        self.host.is_boolean_literal(&self.node)
    }

    pub fn get_boolean(&self) -> Result<bool, FatalLinkerError> {
        self.host.parse_boolean_literal(&self.node)
    }

    pub fn is_array(&self) -> bool {
        self.host.is_array_literal(&self.node)
    }

    pub fn get_array(&self) -> Result<Vec<AstValue<'a, TExpression>>, FatalLinkerError> {
        let items = self.host.parse_array_literal(&self.node)?;
        Ok(items
            .into_iter()
            .map(|n| AstValue::new(n, self.host))
            .collect())
    }

    pub fn is_object(&self) -> bool {
        self.host.is_object_literal(&self.node)
    }

    pub fn get_object(&self) -> Result<AstObject<'a, TExpression>, FatalLinkerError> {
        AstObject::parse(self.node.clone(), self.host)
    }

    pub fn is_function(&self) -> bool {
        self.host.is_function(&self.node)
    }

    /// The expression returned by a single-statement function.
    pub fn get_function_return_value(&self) -> Result<AstValue<'a, TExpression>, FatalLinkerError> {
        let value = self.host.unwrap_function(&self.node)?;
        Ok(AstValue::new(value, self.host))
    }

    /// Wrap the node for passing through compilation untouched.
    pub fn get_opaque(&self) -> o::Expression<TExpression> {
        o::wrapped_node(self.node.clone())
    }

    pub fn get_range(&self) -> Result<Range, FatalLinkerError> {
        self.host.get_range(&self.node)
    }

    pub fn get_symbol_name(&self) -> Option<String> {
        self.host.get_symbol_name(&self.node)
    }

    /// Classify the node once. Anything that is not a recognised literal is opaque.
    pub fn decode(&self) -> Result<DecodedValue<'a, TExpression>, FatalLinkerError> {
        Ok(if self.is_string() {
            DecodedValue::String(self.get_string()?)
        } else if self.is_number() {
            DecodedValue::Number(self.get_number()?)
        } else if self.is_boolean() {
            DecodedValue::Boolean(self.get_boolean()?)
        } else if self.is_array() {
            DecodedValue::Array(self.get_array()?)
        } else if self.is_object() {
            DecodedValue::Object(self.get_object()?)
        } else if self.is_function() {
            DecodedValue::Function(self.get_function_return_value()?)
        } else {
            DecodedValue::Opaque(self.get_opaque())
        })
    }

    pub(crate) fn fail(&self, message: &str) -> FatalLinkerError {
        self.host.fail(&self.node, message)
    }
}

/// The properties of one object literal.
pub struct AstObject<'a, TExpression: AstNode> {
    node: TExpression,
    map: IndexMap<String, TExpression>,
    pub host: &'a dyn AstHost<TExpression>,
}

impl<'a, TExpression: AstNode> AstObject<'a, TExpression> {
    pub fn parse(
        node: TExpression,
        host: &'a dyn AstHost<TExpression>,
    ) -> Result<Self, FatalLinkerError> {
        let map = host.parse_object_literal(&node)?;
        Ok(Self { node, map, host })
    }

    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get_number(&self, key: &str) -> Result<f64, FatalLinkerError> {
        self.host.parse_numeric_literal(self.get_required_property(key)?)
    }

    pub fn get_string(&self, key: &str) -> Result<String, FatalLinkerError> {
        self.host.parse_string_literal(self.get_required_property(key)?)
    }

    pub fn get_boolean(&self, key: &str) -> Result<bool, FatalLinkerError> {
        self.host.parse_boolean_literal(self.get_required_property(key)?)
    }

    pub fn get_object(&self, key: &str) -> Result<AstObject<'a, TExpression>, FatalLinkerError> {
        AstObject::parse(self.get_required_property(key)?.clone(), self.host)
    }

    pub fn get_array(&self, key: &str) -> Result<Vec<AstValue<'a, TExpression>>, FatalLinkerError> {
        self.get_value(key)?.get_array()
    }

    pub fn get_opaque(&self, key: &str) -> Result<o::Expression<TExpression>, FatalLinkerError> {
        Ok(o::wrapped_node(self.get_required_property(key)?.clone()))
    }

    pub fn get_node(&self, key: &str) -> Result<TExpression, FatalLinkerError> {
        Ok(self.get_required_property(key)?.clone())
    }

    pub fn get_value(&self, key: &str) -> Result<AstValue<'a, TExpression>, FatalLinkerError> {
        Ok(AstValue::new(self.get_node(key)?, self.host))
    }

    /// Map every property through `mapper`, keeping declaration order.
    pub fn to_literal<T>(
        &self,
        mut mapper: impl FnMut(AstValue<'a, TExpression>) -> Result<T, FatalLinkerError>,
    ) -> Result<IndexMap<String, T>, FatalLinkerError> {
        let mut result = IndexMap::with_capacity(self.map.len());
        for (key, node) in &self.map {
            result.insert(key.clone(), mapper(AstValue::new(node.clone(), self.host))?);
        }
        Ok(result)
    }

    fn get_required_property(&self, key: &str) -> Result<&TExpression, FatalLinkerError> {
        self.map.get(key).ok_or_else(|| {
            self.host
                .fail(&self.node, &format!("Expected property '{}' to be present", key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::oxc::{OxcAstHost, OxcNode};
    use oxc_allocator::Allocator;
    use oxc_ast::ast::{Expression, Statement};
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn parse<'a>(allocator: &'a Allocator, code: &'a str) -> OxcNode<'a> {
        let ret = Parser::new(allocator, code, SourceType::mjs()).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        match ret.program.body.first() {
            Some(Statement::VariableDeclaration(decl)) => {
                let init = decl.declarations[0].init.as_ref().expect("initializer");
                OxcNode::copied(allocator, init)
            }
            other => panic!("expected a declaration, got {:?}", other),
        }
    }

    fn decode<'a>(
        allocator: &'a Allocator,
        host: &'a OxcAstHost<'a>,
        initializer: &str,
    ) -> DecodedValue<'a, OxcNode<'a>> {
        let code = allocator.alloc_str(&format!("const x = {};", initializer));
        AstValue::new(parse(allocator, code), host).decode().unwrap()
    }

    #[test]
    fn should_decode_each_kind_of_value() {
        let allocator = Allocator::default();
        let host = OxcAstHost::new("");

        assert!(matches!(decode(&allocator, &host, "'a'"), DecodedValue::String(s) if s == "a"));
        assert!(matches!(decode(&allocator, &host, "-2"), DecodedValue::Number(n) if n == -2.0));
        assert!(matches!(decode(&allocator, &host, "true"), DecodedValue::Boolean(true)));

        let DecodedValue::Array(items) = decode(&allocator, &host, "[1, 'b']") else {
            panic!("expected an array");
        };
        assert!(items[0].is_number());
        assert!(items[1].is_string());

        let DecodedValue::Object(object) = decode(&allocator, &host, "{ a: 1, b: 'c' }") else {
            panic!("expected an object");
        };
        assert!(object.has("a"));
        assert_eq!(object.get_string("b").unwrap(), "c");

        let DecodedValue::Function(inner) = decode(&allocator, &host, "function () { return Dir; }")
        else {
            panic!("expected a function");
        };
        assert_eq!(inner.get_symbol_name().as_deref(), Some("Dir"));
    }

    #[test]
    fn should_decode_unrecognised_nodes_as_opaque() {
        let allocator = Allocator::default();
        let host = OxcAstHost::new("");
        let DecodedValue::Opaque(o::Expression::WrappedNode(wrapped)) =
            decode(&allocator, &host, "forwardRef(Dir)")
        else {
            panic!("expected an opaque node");
        };
        assert!(matches!(wrapped.node.expression(), Expression::CallExpression(_)));
    }

    #[test]
    fn should_fail_to_decode_malformed_literals() {
        let allocator = Allocator::default();
        let host = OxcAstHost::new("");
        let code = "const x = [...rest];";
        let value = AstValue::new(parse(&allocator, code), &host);
        let err = value.decode().err().expect("spread should be rejected");
        assert!(err.message.contains("spread"));
    }
}
