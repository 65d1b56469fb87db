//! Builds oxc nodes for translated definitions.

use oxc_allocator::{Allocator, Box as ArenaBox, Vec as ArenaVec};
use oxc_ast::ast::{
    Argument, ArrayExpressionElement, AssignmentTarget, Expression, FormalParameterKind,
    FunctionType, ObjectPropertyKind, PropertyKey, PropertyKind, Statement,
    TSTypeParameterInstantiation, TemplateElementValue, VariableDeclarationKind,
};
use oxc_ast::AstBuilder;
use oxc_span::{Atom, GetSpanMut, Span};
use oxc_syntax::number::NumberBase;
use oxc_syntax::operator::{
    AssignmentOperator, BinaryOperator as OxcBinaryOperator, LogicalOperator,
    UnaryOperator as OxcUnaryOperator,
};
use std::cell::{Cell, RefCell};

use super::host::OxcNode;
use crate::ngtsc::translator::src::api::ast_factory::{
    AstFactory, BinaryOperator, LeadingComment, LiteralValue, ObjectLiteralProperty,
    SourceMapRange, TemplateLiteral, UnaryOperator,
};
use crate::ngtsc::translator::TranslatorError;

/// [`AstFactory`] producing oxc statements and [`OxcNode`] expressions.
///
/// oxc's codegen only prints comments found in the parsed source, so leading comments are
/// consumed by the next statement and dropped. The factory counts how many it dropped.
pub struct OxcAstFactory<'a> {
    builder: AstBuilder<'a>,
    source_url: String,
    pending_comments: RefCell<Vec<LeadingComment>>,
    dropped_comments: Cell<usize>,
    foreign_ranges: RefCell<Vec<SourceMapRange>>,
}

impl<'a> OxcAstFactory<'a> {
    pub fn new(allocator: &'a Allocator, source_url: impl Into<String>) -> Self {
        Self {
            builder: AstBuilder::new(allocator),
            source_url: source_url.into(),
            pending_comments: RefCell::new(Vec::new()),
            dropped_comments: Cell::new(0),
            foreign_ranges: RefCell::new(Vec::new()),
        }
    }

    /// Comments consumed by a statement since the last call.
    pub fn take_dropped_comment_count(&self) -> usize {
        self.dropped_comments.replace(0)
    }

    /// Ranges that point into a file other than the one being linked.
    pub fn take_foreign_source_ranges(&self) -> Vec<SourceMapRange> {
        self.foreign_ranges.take()
    }

    fn node(&self, expression: Expression<'a>) -> OxcNode<'a> {
        OxcNode::new(self.builder.allocator, expression)
    }

    fn atom(&self, text: &str) -> Atom<'a> {
        Atom::from(self.builder.allocator.alloc_str(text))
    }

    /// Every created statement goes through here so queued comments are used up by it.
    fn statement(&self, statement: Statement<'a>) -> Statement<'a> {
        let pending = self.pending_comments.take();
        self.dropped_comments
            .set(self.dropped_comments.get() + pending.len());
        statement
    }

    fn arguments(&self, args: Vec<OxcNode<'a>>) -> ArenaVec<'a, Argument<'a>> {
        self.builder.vec_from_iter(
            args.into_iter()
                .map(|arg| Argument::from(arg.into_expression())),
        )
    }

    fn numeric(&self, value: f64) -> Expression<'a> {
        self.builder.expression_numeric_literal(
            Span::default(),
            value,
            Some(self.atom(&value.to_string())),
            NumberBase::Decimal,
        )
    }

    /// Split a block into its statements. Any other statement becomes a one-statement body.
    fn block_statements(&self, body: Statement<'a>) -> ArenaVec<'a, Statement<'a>> {
        match body {
            Statement::BlockStatement(block) => block.unbox().body,
            other => self.builder.vec1(other),
        }
    }

    fn function(
        &self,
        kind: FunctionType,
        name: Option<&str>,
        parameters: Vec<String>,
        body: Statement<'a>,
    ) -> ArenaBox<'a, oxc_ast::ast::Function<'a>> {
        let id = name.map(|name| self.builder.binding_identifier(Span::default(), self.atom(name)));
        let items = self.builder.vec_from_iter(parameters.iter().map(|param| {
            self.builder.formal_parameter(
                Span::default(),
                self.builder.vec(),
                self.builder.binding_pattern(
                    self.builder
                        .binding_pattern_kind_binding_identifier(Span::default(), self.atom(param)),
                    None::<ArenaBox<'a, oxc_ast::ast::TSTypeAnnotation<'a>>>,
                    false,
                ),
                None,
                false,
                false,
            )
        }));
        let params = self.builder.alloc_formal_parameters(
            Span::default(),
            FormalParameterKind::FormalParameter,
            items,
            None::<ArenaBox<'a, oxc_ast::ast::BindingRestElement<'a>>>,
        );
        let body = self.builder.alloc_function_body(
            Span::default(),
            self.builder.vec(),
            self.block_statements(body),
        );
        self.builder.alloc_function(
            Span::default(),
            kind,
            id,
            false,
            false,
            false,
            None::<ArenaBox<'a, oxc_ast::ast::TSTypeParameterDeclaration<'a>>>,
            None::<ArenaBox<'a, oxc_ast::ast::TSThisParameter<'a>>>,
            params,
            None::<ArenaBox<'a, oxc_ast::ast::TSTypeAnnotation<'a>>>,
            Some(body),
        )
    }

    /// `Some(span)` when the range lies in the linked file, otherwise the range is recorded.
    fn local_span(&self, range: Option<SourceMapRange>) -> Option<Span> {
        let range = range?;
        if range.url != self.source_url {
            self.foreign_ranges.borrow_mut().push(range);
            return None;
        }
        let start = u32::try_from(range.start.offset).ok()?;
        let end = u32::try_from(range.end.offset).ok()?;
        Some(Span::new(start, end))
    }
}

/// Oxc splits `&&` and `||` off into logical expressions, returned as `Err`.
fn map_binary_operator(operator: BinaryOperator) -> Result<OxcBinaryOperator, LogicalOperator> {
    match operator {
        BinaryOperator::And => Err(LogicalOperator::And),
        BinaryOperator::Or => Err(LogicalOperator::Or),
        BinaryOperator::Greater => Ok(OxcBinaryOperator::GreaterThan),
        BinaryOperator::GreaterEquals => Ok(OxcBinaryOperator::GreaterEqualThan),
        BinaryOperator::BitAnd => Ok(OxcBinaryOperator::BitwiseAnd),
        BinaryOperator::Divide => Ok(OxcBinaryOperator::Division),
        BinaryOperator::Equals => Ok(OxcBinaryOperator::Equality),
        BinaryOperator::IdentityEquals => Ok(OxcBinaryOperator::StrictEquality),
        BinaryOperator::Less => Ok(OxcBinaryOperator::LessThan),
        BinaryOperator::LessEquals => Ok(OxcBinaryOperator::LessEqualThan),
        BinaryOperator::Minus => Ok(OxcBinaryOperator::Subtraction),
        BinaryOperator::Modulo => Ok(OxcBinaryOperator::Remainder),
        BinaryOperator::Multiply => Ok(OxcBinaryOperator::Multiplication),
        BinaryOperator::NotEquals => Ok(OxcBinaryOperator::Inequality),
        BinaryOperator::IdentityNotEquals => Ok(OxcBinaryOperator::StrictInequality),
        BinaryOperator::Plus => Ok(OxcBinaryOperator::Addition),
    }
}

impl<'a> AstFactory for OxcAstFactory<'a> {
    type Statement = Statement<'a>;
    type Expression = OxcNode<'a>;

    fn add_leading_comment(&self, comment: LeadingComment) {
        self.pending_comments.borrow_mut().push(comment);
    }

    fn create_array_literal(&self, elements: Vec<OxcNode<'a>>) -> OxcNode<'a> {
        let elements = self.builder.vec_from_iter(
            elements
                .into_iter()
                .map(|e| ArrayExpressionElement::from(e.into_expression())),
        );
        self.node(self.builder.expression_array(Span::default(), elements))
    }

    fn create_assignment(
        &self,
        target: OxcNode<'a>,
        value: OxcNode<'a>,
    ) -> Result<OxcNode<'a>, TranslatorError> {
        let target = match target.into_expression() {
            Expression::Identifier(id) => AssignmentTarget::AssignmentTargetIdentifier(id),
            Expression::StaticMemberExpression(e) => AssignmentTarget::StaticMemberExpression(e),
            Expression::ComputedMemberExpression(e) => {
                AssignmentTarget::ComputedMemberExpression(e)
            }
            _ => return Err(TranslatorError::InvalidAssignmentTarget),
        };
        Ok(self.node(self.builder.expression_assignment(
            Span::default(),
            AssignmentOperator::Assign,
            target,
            value.into_expression(),
        )))
    }

    fn create_binary_expression(
        &self,
        left_operand: OxcNode<'a>,
        operator: BinaryOperator,
        right_operand: OxcNode<'a>,
    ) -> OxcNode<'a> {
        let left = left_operand.into_expression();
        let right = right_operand.into_expression();
        let expression = match map_binary_operator(operator) {
            Ok(op) => self.builder.expression_binary(Span::default(), left, op, right),
            Err(op) => self.builder.expression_logical(Span::default(), left, op, right),
        };
        self.node(expression)
    }

    fn create_block(&self, body: Vec<Statement<'a>>) -> Statement<'a> {
        self.statement(
            self.builder
                .statement_block(Span::default(), self.builder.vec_from_iter(body)),
        )
    }

    fn create_call_expression(
        &self,
        callee: OxcNode<'a>,
        args: Vec<OxcNode<'a>>,
        pure: bool,
    ) -> OxcNode<'a> {
        let mut call = self.builder.alloc_call_expression(
            Span::default(),
            callee.into_expression(),
            None::<ArenaBox<'a, TSTypeParameterInstantiation<'a>>>,
            self.arguments(args),
            false,
        );
        call.pure = pure;
        self.node(Expression::CallExpression(call))
    }

    fn create_conditional(
        &self,
        condition: OxcNode<'a>,
        then_expression: OxcNode<'a>,
        else_expression: OxcNode<'a>,
    ) -> OxcNode<'a> {
        self.node(self.builder.expression_conditional(
            Span::default(),
            condition.into_expression(),
            then_expression.into_expression(),
            else_expression.into_expression(),
        ))
    }

    fn create_element_access(&self, expression: OxcNode<'a>, element: OxcNode<'a>) -> OxcNode<'a> {
        self.node(
            self.builder
                .member_expression_computed(
                    Span::default(),
                    expression.into_expression(),
                    element.into_expression(),
                    false,
                )
                .into(),
        )
    }

    fn create_expression_statement(&self, expression: OxcNode<'a>) -> Statement<'a> {
        self.statement(
            self.builder
                .statement_expression(Span::default(), expression.into_expression()),
        )
    }

    fn create_function_declaration(
        &self,
        function_name: &str,
        parameters: Vec<String>,
        body: Statement<'a>,
    ) -> Statement<'a> {
        let function = self.function(
            FunctionType::FunctionDeclaration,
            Some(function_name),
            parameters,
            body,
        );
        self.statement(Statement::FunctionDeclaration(function))
    }

    fn create_function_expression(
        &self,
        function_name: Option<&str>,
        parameters: Vec<String>,
        body: Statement<'a>,
    ) -> OxcNode<'a> {
        let function =
            self.function(FunctionType::FunctionExpression, function_name, parameters, body);
        self.node(Expression::FunctionExpression(function))
    }

    fn create_identifier(&self, name: &str) -> OxcNode<'a> {
        self.node(
            self.builder
                .expression_identifier(Span::default(), self.atom(name)),
        )
    }

    fn create_if_statement(
        &self,
        condition: OxcNode<'a>,
        then_statement: Statement<'a>,
        else_statement: Option<Statement<'a>>,
    ) -> Statement<'a> {
        self.statement(self.builder.statement_if(
            Span::default(),
            condition.into_expression(),
            then_statement,
            else_statement,
        ))
    }

    fn create_literal(&self, value: LiteralValue) -> OxcNode<'a> {
        let expression = match value {
            LiteralValue::String(s) => {
                self.builder
                    .expression_string_literal(Span::default(), self.atom(s), None)
            }
            // Negative numbers are a prefix negation of the magnitude.
            LiteralValue::Number(n) if n < 0.0 => self.builder.expression_unary(
                Span::default(),
                OxcUnaryOperator::UnaryNegation,
                self.numeric(n.abs()),
            ),
            LiteralValue::Number(n) => self.numeric(n),
            LiteralValue::Boolean(b) => self.builder.expression_boolean_literal(Span::default(), b),
            LiteralValue::Null => self.builder.expression_null_literal(Span::default()),
            LiteralValue::Undefined => self.builder.expression_unary(
                Span::default(),
                OxcUnaryOperator::Void,
                self.numeric(0.0),
            ),
        };
        self.node(expression)
    }

    fn create_new_expression(&self, expression: OxcNode<'a>, args: Vec<OxcNode<'a>>) -> OxcNode<'a> {
        self.node(self.builder.expression_new(
            Span::default(),
            expression.into_expression(),
            None::<ArenaBox<'a, TSTypeParameterInstantiation<'a>>>,
            self.arguments(args),
        ))
    }

    fn create_object_literal(
        &self,
        properties: Vec<ObjectLiteralProperty<OxcNode<'a>>>,
    ) -> OxcNode<'a> {
        let properties = self
            .builder
            .vec_from_iter(properties.into_iter().map(|p| -> ObjectPropertyKind<'a> {
                let name = self.atom(&p.property_name);
                let key = if p.quoted {
                    PropertyKey::StringLiteral(self.builder.alloc_string_literal(
                        Span::default(),
                        name,
                        None,
                    ))
                } else {
                    self.builder
                        .property_key_static_identifier(Span::default(), name)
                };
                self.builder.object_property_kind_object_property(
                    Span::default(),
                    PropertyKind::Init,
                    key,
                    p.value.into_expression(),
                    false,
                    false,
                    false,
                )
            }));
        self.node(self.builder.expression_object(Span::default(), properties))
    }

    fn create_parenthesized_expression(&self, expression: OxcNode<'a>) -> OxcNode<'a> {
        self.node(
            self.builder
                .expression_parenthesized(Span::default(), expression.into_expression()),
        )
    }

    fn create_property_access(&self, expression: OxcNode<'a>, property_name: &str) -> OxcNode<'a> {
        self.node(
            self.builder
                .member_expression_static(
                    Span::default(),
                    expression.into_expression(),
                    self.builder
                        .identifier_name(Span::default(), self.atom(property_name)),
                    false,
                )
                .into(),
        )
    }

    fn create_return_statement(&self, expression: Option<OxcNode<'a>>) -> Statement<'a> {
        self.statement(
            self.builder
                .statement_return(Span::default(), expression.map(OxcNode::into_expression)),
        )
    }

    fn create_tagged_template(
        &self,
        tag: OxcNode<'a>,
        template: TemplateLiteral<OxcNode<'a>>,
    ) -> OxcNode<'a> {
        let last = template.elements.len().saturating_sub(1);
        let quasis = self.builder.vec_from_iter(
            template
                .elements
                .into_iter()
                .enumerate()
                .map(|(i, element)| {
                    let span = self.local_span(element.range).unwrap_or_default();
                    let value = TemplateElementValue {
                        raw: self.atom(&element.raw),
                        cooked: Some(self.atom(&element.cooked)),
                    };
                    self.builder.template_element(span, value, i == last)
                }),
        );
        let expressions = self.builder.vec_from_iter(
            template
                .expressions
                .into_iter()
                .map(OxcNode::into_expression),
        );
        self.node(self.builder.expression_tagged_template(
            Span::default(),
            tag.into_expression(),
            None::<ArenaBox<'a, TSTypeParameterInstantiation<'a>>>,
            self.builder
                .template_literal(Span::default(), quasis, expressions),
        ))
    }

    fn create_throw_statement(&self, expression: OxcNode<'a>) -> Statement<'a> {
        self.statement(
            self.builder
                .statement_throw(Span::default(), expression.into_expression()),
        )
    }

    fn create_type_of_expression(&self, expression: OxcNode<'a>) -> OxcNode<'a> {
        self.node(self.builder.expression_unary(
            Span::default(),
            OxcUnaryOperator::Typeof,
            expression.into_expression(),
        ))
    }

    fn create_unary_expression(&self, operator: UnaryOperator, operand: OxcNode<'a>) -> OxcNode<'a> {
        let operator = match operator {
            UnaryOperator::Plus => OxcUnaryOperator::UnaryPlus,
            UnaryOperator::Minus => OxcUnaryOperator::UnaryNegation,
            UnaryOperator::Not => OxcUnaryOperator::LogicalNot,
        };
        self.node(
            self.builder
                .expression_unary(Span::default(), operator, operand.into_expression()),
        )
    }

    fn create_variable_declaration(
        &self,
        variable_name: &str,
        initializer: Option<OxcNode<'a>>,
        is_final: bool,
    ) -> Statement<'a> {
        // `const` requires an initializer.
        let kind = if is_final && initializer.is_some() {
            VariableDeclarationKind::Const
        } else {
            VariableDeclarationKind::Var
        };
        let id = self.builder.binding_pattern(
            self.builder
                .binding_pattern_kind_binding_identifier(Span::default(), self.atom(variable_name)),
            None::<ArenaBox<'a, oxc_ast::ast::TSTypeAnnotation<'a>>>,
            false,
        );
        let declarator = self.builder.variable_declarator(
            Span::default(),
            kind,
            id,
            initializer.map(OxcNode::into_expression),
            false,
        );
        self.statement(Statement::VariableDeclaration(
            self.builder.alloc_variable_declaration(
                Span::default(),
                kind,
                self.builder.vec1(declarator),
                false,
            ),
        ))
    }

    fn set_source_map_range_for_stmt(
        &self,
        mut node: Statement<'a>,
        source_map_range: Option<SourceMapRange>,
    ) -> Statement<'a> {
        if let Some(span) = self.local_span(source_map_range) {
            *node.span_mut() = span;
        }
        node
    }

    fn set_source_map_range_for_expr(
        &self,
        mut node: OxcNode<'a>,
        source_map_range: Option<SourceMapRange>,
    ) -> OxcNode<'a> {
        if let Some(span) = self.local_span(source_map_range) {
            *node.expression_mut().span_mut() = span;
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ngtsc::translator::src::api::ast_factory::{SourceMapLocation, TemplateElement};
    use oxc_codegen::Codegen;
    use oxc_span::SourceType;

    fn print_statements<'a>(allocator: &'a Allocator, statements: Vec<Statement<'a>>) -> String {
        let builder = AstBuilder::new(allocator);
        let program = builder.program(
            Span::default(),
            SourceType::mjs(),
            "",
            builder.vec(),
            None,
            builder.vec(),
            builder.vec_from_iter(statements),
        );
        Codegen::new().build(&program).code
    }

    fn print_expression<'a>(
        allocator: &'a Allocator,
        factory: &OxcAstFactory<'a>,
        expression: OxcNode<'a>,
    ) -> String {
        let statement = factory.create_expression_statement(expression);
        print_statements(allocator, vec![statement])
    }

    fn location(offset: usize) -> SourceMapLocation {
        SourceMapLocation {
            offset,
            line: 0,
            column: offset,
        }
    }

    #[test]
    fn should_print_negative_numbers_and_undefined() {
        let allocator = Allocator::default();
        let factory = OxcAstFactory::new(&allocator, "a.mjs");
        let array = factory.create_array_literal(vec![
            factory.create_literal(LiteralValue::Number(-1.0)),
            factory.create_literal(LiteralValue::Number(2.5)),
            factory.create_literal(LiteralValue::Undefined),
        ]);
        let code = print_expression(&allocator, &factory, array);
        assert_eq!(code.trim(), "[-1, 2.5, void 0];");
    }

    #[test]
    fn should_reject_invalid_assignment_targets() {
        let allocator = Allocator::default();
        let factory = OxcAstFactory::new(&allocator, "a.mjs");
        let target = factory.create_literal(LiteralValue::Null);
        let value = factory.create_identifier("x");
        assert_eq!(
            factory.create_assignment(target, value).unwrap_err(),
            TranslatorError::InvalidAssignmentTarget
        );

        let target = factory.create_property_access(factory.create_identifier("a"), "b");
        let assign = factory
            .create_assignment(target, factory.create_identifier("x"))
            .unwrap();
        let code = print_expression(&allocator, &factory, assign);
        assert_eq!(code.trim(), "a.b = x;");
    }

    #[test]
    fn should_build_an_iife() {
        let allocator = Allocator::default();
        let factory = OxcAstFactory::new(&allocator, "a.mjs");
        let decl = factory.create_variable_declaration(
            "_c0",
            Some(factory.create_array_literal(vec![factory.create_literal(LiteralValue::String("a"))])),
            true,
        );
        let ret = factory.create_return_statement(Some(factory.create_identifier("_c0")));
        let function = factory.create_function_expression(None, Vec::new(), factory.create_block(vec![decl, ret]));
        let call = factory.create_call_expression(function, Vec::new(), false);
        let code = print_expression(&allocator, &factory, call);
        assert!(code.contains("const _c0 = [\"a\"];"), "{}", code);
        assert!(code.contains("return _c0;"), "{}", code);
        assert!(code.contains("function()"), "{}", code);
    }

    #[test]
    fn should_declare_functions_with_parameters() {
        let allocator = Allocator::default();
        let factory = OxcAstFactory::new(&allocator, "a.mjs");
        let body = factory.create_block(vec![factory.create_return_statement(Some(
            factory.create_binary_expression(
                factory.create_identifier("a"),
                BinaryOperator::And,
                factory.create_identifier("b"),
            ),
        ))]);
        let decl = factory.create_function_declaration("f", vec!["a".into(), "b".into()], body);
        let code = print_statements(&allocator, vec![decl]);
        assert!(code.contains("function f(a, b)"), "{}", code);
        assert!(code.contains("return a && b;"), "{}", code);
    }

    #[test]
    fn should_use_var_without_final() {
        let allocator = Allocator::default();
        let factory = OxcAstFactory::new(&allocator, "a.mjs");
        let decl = factory.create_variable_declaration("x", None, true);
        let code = print_statements(&allocator, vec![decl]);
        assert_eq!(code.trim(), "var x;");
    }

    #[test]
    fn should_use_up_comments_on_the_next_statement() {
        let allocator = Allocator::default();
        let factory = OxcAstFactory::new(&allocator, "a.mjs");
        let _first = factory.create_expression_statement(factory.create_identifier("a"));
        assert_eq!(factory.take_dropped_comment_count(), 0);

        for text in ["@ts-ignore", "@desc greeting"] {
            factory.add_leading_comment(LeadingComment {
                text: text.to_string(),
                multiline: false,
                trailing_newline: true,
            });
        }
        let second = factory.create_expression_statement(factory.create_identifier("b"));
        assert_eq!(factory.take_dropped_comment_count(), 2);
        let _third = factory.create_expression_statement(factory.create_identifier("c"));
        assert_eq!(factory.take_dropped_comment_count(), 0);

        let code = print_statements(&allocator, vec![second]);
        assert_eq!(code.trim(), "b;");
    }

    #[test]
    fn should_build_tagged_templates() {
        let allocator = Allocator::default();
        let factory = OxcAstFactory::new(&allocator, "a.mjs");
        let tagged = factory.create_tagged_template(
            factory.create_identifier("$localize"),
            TemplateLiteral {
                elements: vec![
                    TemplateElement {
                        raw: "Hello ".to_string(),
                        cooked: "Hello ".to_string(),
                        range: None,
                    },
                    TemplateElement {
                        raw: "!".to_string(),
                        cooked: "!".to_string(),
                        range: None,
                    },
                ],
                expressions: vec![factory.create_identifier("name")],
            },
        );
        let code = print_expression(&allocator, &factory, tagged);
        assert_eq!(code.trim(), "$localize`Hello ${name}!`;");
    }

    #[test]
    fn should_record_foreign_source_ranges() {
        let allocator = Allocator::default();
        let factory = OxcAstFactory::new(&allocator, "a.mjs");
        let local = SourceMapRange {
            url: "a.mjs".to_string(),
            content: String::new(),
            start: location(3),
            end: location(7),
        };
        let foreign = SourceMapRange {
            url: "a.html".to_string(),
            ..local.clone()
        };
        let expr = factory.set_source_map_range_for_expr(factory.create_identifier("x"), Some(local));
        let Expression::Identifier(ident) = expr.expression() else {
            panic!("expected an identifier");
        };
        assert_eq!(ident.span, Span::new(3, 7));

        let expr = factory.set_source_map_range_for_expr(factory.create_identifier("y"), Some(foreign.clone()));
        let Expression::Identifier(ident) = expr.expression() else {
            panic!("expected an identifier");
        };
        assert_eq!(ident.span, Span::default());
        assert_eq!(factory.take_foreign_source_ranges(), vec![foreign]);
    }
}
