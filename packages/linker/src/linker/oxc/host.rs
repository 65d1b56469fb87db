//! Read access to oxc expressions.

use indexmap::IndexMap;
use oxc_allocator::{Allocator, CloneIn};
use oxc_ast::ast::{
    ArrayExpressionElement, Expression, ObjectPropertyKind, PropertyKey, PropertyKind, Statement,
};
use oxc_span::{GetSpan, Span};
use oxc_syntax::operator::UnaryOperator;
use std::fmt;

use crate::linker::ast::{AstHost, AstNode, Range};
use crate::linker::error::FatalLinkerError;

/// An owned oxc expression.
///
/// The linker hands expressions around by value, so every node carries the allocator it
/// lives in and cloning deep-copies the subtree into that allocator.
pub struct OxcNode<'a> {
    allocator: &'a Allocator,
    expression: Expression<'a>,
}

impl<'a> OxcNode<'a> {
    pub fn new(allocator: &'a Allocator, expression: Expression<'a>) -> Self {
        Self {
            allocator,
            expression,
        }
    }

    /// Copy a borrowed expression out of a parsed program.
    pub fn copied(allocator: &'a Allocator, expression: &Expression<'a>) -> Self {
        Self::new(allocator, expression.clone_in(allocator))
    }

    pub fn expression(&self) -> &Expression<'a> {
        &self.expression
    }

    pub fn allocator(&self) -> &'a Allocator {
        self.allocator
    }

    pub fn into_expression(self) -> Expression<'a> {
        self.expression
    }

    pub(crate) fn expression_mut(&mut self) -> &mut Expression<'a> {
        &mut self.expression
    }
}

impl Clone for OxcNode<'_> {
    fn clone(&self) -> Self {
        Self::copied(self.allocator, &self.expression)
    }
}

impl fmt::Debug for OxcNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OxcNode").field(&self.expression).finish()
    }
}

impl AstNode for OxcNode<'_> {}

/// [`AstHost`] over expressions parsed from `source`.
pub struct OxcAstHost<'s> {
    source: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> OxcAstHost<'s> {
    pub fn new(source: &'s str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    /// 0-based line and column of a byte offset. Columns count characters.
    fn location(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map_or(offset - line_start, |text| text.chars().count());
        (line, column)
    }

    fn range_of(&self, span: Span) -> Result<Range, FatalLinkerError> {
        if span.start == span.end || span.end as usize > self.source.len() {
            return Err(FatalLinkerError::new(
                "Unable to read range for node - it is missing location information.",
            ));
        }
        let start_pos = span.start as usize;
        let (start_line, start_col) = self.location(start_pos);
        Ok(Range {
            start_pos,
            start_line,
            start_col,
            end_pos: span.end as usize,
        })
    }

    fn fail_at(&self, span: Span, message: &str) -> FatalLinkerError {
        FatalLinkerError::at(message, self.range_of(span).ok())
    }
}

/// `-1`, the only non-literal numeric shape emitters produce.
fn negated_number(expression: &Expression<'_>) -> Option<f64> {
    match expression {
        Expression::UnaryExpression(unary) if unary.operator == UnaryOperator::UnaryNegation => {
            match &unary.argument {
                Expression::NumericLiteral(literal) => Some(-literal.value),
                _ => None,
            }
        }
        _ => None,
    }
}

/// `!0` and `!1`, as written by minifiers.
fn minified_boolean(expression: &Expression<'_>) -> Option<bool> {
    match expression {
        Expression::UnaryExpression(unary) if unary.operator == UnaryOperator::LogicalNot => {
            match &unary.argument {
                Expression::NumericLiteral(literal) if literal.value == 0.0 => Some(true),
                Expression::NumericLiteral(literal) if literal.value == 1.0 => Some(false),
                _ => None,
            }
        }
        _ => None,
    }
}

/// The identifier an expression names, or the property of a static member access.
pub(crate) fn symbol_name<'e>(expression: &'e Expression<'_>) -> Option<&'e str> {
    match expression {
        Expression::Identifier(ident) => Some(ident.name.as_str()),
        Expression::StaticMemberExpression(member) => Some(member.property.name.as_str()),
        _ => None,
    }
}

impl<'a> AstHost<OxcNode<'a>> for OxcAstHost<'_> {
    fn get_symbol_name(&self, node: &OxcNode<'a>) -> Option<String> {
        symbol_name(node.expression()).map(str::to_string)
    }

    fn is_string_literal(&self, node: &OxcNode<'a>) -> bool {
        match node.expression() {
            Expression::StringLiteral(_) => true,
            Expression::TemplateLiteral(template) => template.expressions.is_empty(),
            _ => false,
        }
    }

    fn parse_string_literal(&self, node: &OxcNode<'a>) -> Result<String, FatalLinkerError> {
        match node.expression() {
            Expression::StringLiteral(literal) => Ok(literal.value.to_string()),
            Expression::TemplateLiteral(template) if template.expressions.is_empty() => {
                Ok(template
                    .quasis
                    .iter()
                    .map(|quasi| quasi.value.cooked.unwrap_or(quasi.value.raw).to_string())
                    .collect())
            }
            _ => Err(self.fail(node, "Unsupported syntax, expected a string literal.")),
        }
    }

    fn is_numeric_literal(&self, node: &OxcNode<'a>) -> bool {
        matches!(node.expression(), Expression::NumericLiteral(_))
            || negated_number(node.expression()).is_some()
    }

    fn parse_numeric_literal(&self, node: &OxcNode<'a>) -> Result<f64, FatalLinkerError> {
        match node.expression() {
            Expression::NumericLiteral(literal) => Ok(literal.value),
            other => negated_number(other)
                .ok_or_else(|| self.fail(node, "Unsupported syntax, expected a numeric literal.")),
        }
    }

    fn is_boolean_literal(&self, node: &OxcNode<'a>) -> bool {
        matches!(node.expression(), Expression::BooleanLiteral(_))
            || minified_boolean(node.expression()).is_some()
    }

    fn parse_boolean_literal(&self, node: &OxcNode<'a>) -> Result<bool, FatalLinkerError> {
        match node.expression() {
            Expression::BooleanLiteral(literal) => Ok(literal.value),
            other => minified_boolean(other)
                .ok_or_else(|| self.fail(node, "Unsupported syntax, expected a boolean literal.")),
        }
    }

    fn is_array_literal(&self, node: &OxcNode<'a>) -> bool {
        matches!(node.expression(), Expression::ArrayExpression(_))
    }

    fn parse_array_literal(&self, node: &OxcNode<'a>) -> Result<Vec<OxcNode<'a>>, FatalLinkerError> {
        let Expression::ArrayExpression(array) = node.expression() else {
            return Err(self.fail(node, "Unsupported syntax, expected an array literal."));
        };
        let mut elements = Vec::with_capacity(array.elements.len());
        for element in &array.elements {
            match element {
                ArrayExpressionElement::SpreadElement(spread) => {
                    return Err(self.fail_at(
                        spread.span,
                        "Unsupported syntax, expected element in array not to use spread syntax.",
                    ));
                }
                ArrayExpressionElement::Elision(_) => {}
                other => {
                    if let Some(expression) = other.as_expression() {
                        elements.push(OxcNode::copied(node.allocator(), expression));
                    }
                }
            }
        }
        Ok(elements)
    }

    fn is_object_literal(&self, node: &OxcNode<'a>) -> bool {
        matches!(node.expression(), Expression::ObjectExpression(_))
    }

    fn parse_object_literal(
        &self,
        node: &OxcNode<'a>,
    ) -> Result<IndexMap<String, OxcNode<'a>>, FatalLinkerError> {
        let Expression::ObjectExpression(object) = node.expression() else {
            return Err(self.fail(node, "Unsupported syntax, expected an object literal."));
        };
        let mut properties = IndexMap::new();
        for property in &object.properties {
            let ObjectPropertyKind::ObjectProperty(property) = property else {
                return Err(self.fail_at(
                    property.span(),
                    "Unsupported syntax, expected a property assignment.",
                ));
            };
            if property.kind != PropertyKind::Init || property.method {
                return Err(self.fail_at(
                    property.span,
                    "Unsupported syntax, expected a property assignment.",
                ));
            }
            let name = match &property.key {
                PropertyKey::StaticIdentifier(ident) if !property.computed => ident.name.to_string(),
                PropertyKey::StringLiteral(literal) if !property.computed => {
                    literal.value.to_string()
                }
                key => {
                    return Err(
                        self.fail_at(key.span(), "Unsupported syntax, expected a property name.")
                    );
                }
            };
            properties.insert(name, OxcNode::copied(node.allocator(), &property.value));
        }
        Ok(properties)
    }

    fn is_function(&self, node: &OxcNode<'a>) -> bool {
        matches!(
            node.expression(),
            Expression::FunctionExpression(_) | Expression::ArrowFunctionExpression(_)
        )
    }

    /// Arrow functions with an expression body are an implicit single return.
    fn unwrap_function(&self, node: &OxcNode<'a>) -> Result<OxcNode<'a>, FatalLinkerError> {
        let (span, statements) = match node.expression() {
            Expression::ArrowFunctionExpression(arrow) => {
                if arrow.expression {
                    if let Some(Statement::ExpressionStatement(body)) = arrow.body.statements.first()
                    {
                        return Ok(OxcNode::copied(node.allocator(), &body.expression));
                    }
                }
                (arrow.body.span, &arrow.body.statements)
            }
            Expression::FunctionExpression(function) => match &function.body {
                Some(body) => (body.span, &body.statements),
                None => {
                    return Err(
                        self.fail(node, "Unsupported syntax, expected exactly one statement")
                    );
                }
            },
            _ => return Err(self.fail(node, "Unsupported syntax, expected a function.")),
        };

        let [statement] = &statements[..] else {
            return Err(self.fail_at(span, "Unsupported syntax, expected exactly one statement"));
        };
        let Statement::ReturnStatement(ret) = statement else {
            return Err(self.fail_at(
                statement.span(),
                "Unsupported syntax, expected a return statement.",
            ));
        };
        match &ret.argument {
            Some(argument) => Ok(OxcNode::copied(node.allocator(), argument)),
            None => Err(self.fail_at(
                ret.span,
                "Unsupported syntax, expected to have a return value",
            )),
        }
    }

    fn get_range(&self, node: &OxcNode<'a>) -> Result<Range, FatalLinkerError> {
        self.range_of(node.expression().span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    /// Parse `code` as a module and return the expression of its last statement.
    fn parse_expression<'a>(allocator: &'a Allocator, code: &'a str) -> OxcNode<'a> {
        let ret = Parser::new(allocator, code, SourceType::mjs()).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        match ret.program.body.last() {
            Some(Statement::ExpressionStatement(stmt)) => {
                OxcNode::copied(allocator, &stmt.expression)
            }
            other => panic!("expected an expression statement, got {:?}", other),
        }
    }

    #[test]
    fn should_read_symbol_names() {
        let allocator = Allocator::default();
        let host = OxcAstHost::new("");
        let ident = parse_expression(&allocator, "Foo;");
        let member = parse_expression(&allocator, "i0.ViewEncapsulation.None;");
        let call = parse_expression(&allocator, "foo();");
        assert_eq!(host.get_symbol_name(&ident).as_deref(), Some("Foo"));
        assert_eq!(host.get_symbol_name(&member).as_deref(), Some("None"));
        assert_eq!(host.get_symbol_name(&call), None);
    }

    #[test]
    fn should_parse_literals() {
        let allocator = Allocator::default();
        let host = OxcAstHost::new("");
        let string = parse_expression(&allocator, "'a\\'b';");
        let template = parse_expression(&allocator, "`x`;");
        let number = parse_expression(&allocator, "-1.5;");
        let boolean = parse_expression(&allocator, "!0;");
        assert_eq!(host.parse_string_literal(&string).unwrap(), "a'b");
        assert_eq!(host.parse_string_literal(&template).unwrap(), "x");
        assert_eq!(host.parse_numeric_literal(&number).unwrap(), -1.5);
        assert!(host.parse_boolean_literal(&boolean).unwrap());
        assert!(!host.is_string_literal(&number));
    }

    #[test]
    fn should_skip_array_holes_and_reject_spread() {
        let allocator = Allocator::default();
        let host = OxcAstHost::new("");
        let holes = parse_expression(&allocator, "[1, , 2];");
        assert_eq!(host.parse_array_literal(&holes).unwrap().len(), 2);

        let code = "[...a];";
        let spread = parse_expression(&allocator, code);
        let host = OxcAstHost::new(code);
        let err = host.parse_array_literal(&spread).unwrap_err();
        assert!(err.message.contains("spread"));
        assert_eq!(err.range.map(|r| r.start_pos), Some(1));
    }

    #[test]
    fn should_parse_objects_in_source_order() {
        let allocator = Allocator::default();
        let host = OxcAstHost::new("");
        let object = parse_expression(&allocator, "({b: 1, 'a-b': 2, c});");
        let Expression::ParenthesizedExpression(paren) = object.expression() else {
            panic!("expected parentheses");
        };
        let object = OxcNode::copied(&allocator, &paren.expression);
        let keys: Vec<_> = host.parse_object_literal(&object).unwrap().into_keys().collect();
        assert_eq!(keys, ["b", "a-b", "c"]);
    }

    #[test]
    fn should_reject_computed_keys() {
        let allocator = Allocator::default();
        let host = OxcAstHost::new("");
        let object = parse_expression(&allocator, "x = {[k]: 1};");
        let Expression::AssignmentExpression(assign) = object.expression() else {
            panic!("expected an assignment");
        };
        let object = OxcNode::copied(&allocator, &assign.right);
        let err = host.parse_object_literal(&object).unwrap_err();
        assert_eq!(err.message, "Unsupported syntax, expected a property name.");
    }

    #[test]
    fn should_unwrap_functions() {
        let allocator = Allocator::default();
        let host = OxcAstHost::new("");
        let arrow = parse_expression(&allocator, "() => [A];");
        let function = parse_expression(&allocator, "(function () { return B; });");
        let Expression::ParenthesizedExpression(paren) = function.expression() else {
            panic!("expected parentheses");
        };
        let function = OxcNode::copied(&allocator, &paren.expression);
        assert!(host.is_array_literal(&host.unwrap_function(&arrow).unwrap()));
        let inner = host.unwrap_function(&function).unwrap();
        assert_eq!(host.get_symbol_name(&inner).as_deref(), Some("B"));

        let empty = parse_expression(&allocator, "() => { return; };");
        let err = host.unwrap_function(&empty).unwrap_err();
        assert_eq!(err.message, "Unsupported syntax, expected to have a return value");
        let not_return = parse_expression(&allocator, "() => { b; };");
        let err = host.unwrap_function(&not_return).unwrap_err();
        assert_eq!(err.message, "Unsupported syntax, expected a return statement.");
    }

    #[test]
    fn should_reject_function_bodies_with_several_statements() {
        let code = "() => { a(); return b; };";
        let allocator = Allocator::default();
        let two = parse_expression(&allocator, code);
        let host = OxcAstHost::new(code);
        let err = host.unwrap_function(&two).unwrap_err();
        assert_eq!(err.message, "Unsupported syntax, expected exactly one statement");
        assert_eq!(err.range.map(|r| r.start_pos), code.find('{'));

        let empty_body = parse_expression(&allocator, "() => {};");
        let err = host.unwrap_function(&empty_body).unwrap_err();
        assert_eq!(err.message, "Unsupported syntax, expected exactly one statement");
    }

    #[test]
    fn should_compute_lines_and_columns() {
        let code = "const a = 1;\nconst b = 'héllo' + x;";
        let allocator = Allocator::default();
        let node = parse_expression(&allocator, "0;");
        let host = OxcAstHost::new(code);
        let offset = code.find('x').unwrap();
        assert_eq!(host.location(offset), (1, 20));
        assert_eq!(host.location(0), (0, 0));
        assert_eq!(host.location(13), (1, 0));
        // Synthesized nodes have no span.
        let synthetic = OxcNode::new(
            &allocator,
            oxc_ast::AstBuilder::new(&allocator).expression_identifier(Span::default(), "x"),
        );
        assert!(host.get_range(&synthetic).is_err());
        assert!(host.get_range(&node).is_ok());
    }
}
