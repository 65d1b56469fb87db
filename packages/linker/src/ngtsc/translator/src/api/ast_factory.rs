//! The write side of a host AST: everything the translator needs to build nodes.

use crate::ngtsc::translator::src::translator::TranslatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Plus,
    Minus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    And,
    Greater,
    GreaterEquals,
    BitAnd,
    Divide,
    Equals,
    IdentityEquals,
    Less,
    LessEquals,
    Minus,
    Modulo,
    Multiply,
    NotEquals,
    IdentityNotEquals,
    Or,
    Plus,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::And => "&&",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::Divide => "/",
            BinaryOperator::Equals => "==",
            BinaryOperator::IdentityEquals => "===",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Minus => "-",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Multiply => "*",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::IdentityNotEquals => "!==",
            BinaryOperator::Or => "||",
            BinaryOperator::Plus => "+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMapLocation {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Where a generated node came from. `url` may name a different file than the one being
/// emitted, e.g. an external template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapRange {
    pub url: String,
    pub content: String,
    pub start: SourceMapLocation,
    pub end: SourceMapLocation,
}

pub struct ObjectLiteralProperty<TExpression> {
    pub property_name: String,
    pub value: TExpression,
    pub quoted: bool,
}

pub struct TemplateLiteral<TExpression> {
    pub elements: Vec<TemplateElement>,
    pub expressions: Vec<TExpression>,
}

pub struct TemplateElement {
    pub raw: String,
    pub cooked: String,
    pub range: Option<SourceMapRange>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingComment {
    pub text: String,
    pub multiline: bool,
    pub trailing_newline: bool,
}

impl LeadingComment {
    /// The comment as it would appear in source.
    pub fn to_source(&self) -> String {
        if self.multiline {
            format!("/* {} */", self.text)
        } else {
            self.text
                .lines()
                .map(|line| format!("// {}", line))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

pub enum LiteralValue<'a> {
    String(&'a str),
    Number(f64),
    Boolean(bool),
    Null,
    Undefined,
}

pub trait AstFactory {
    type Statement;
    type Expression;

    /// Queue a comment for the next statement created by this factory.
    fn add_leading_comment(&self, comment: LeadingComment);

    fn create_array_literal(&self, elements: Vec<Self::Expression>) -> Self::Expression;

    /// `target = value`. Fails unless the target is an identifier or a property/element access.
    fn create_assignment(
        &self,
        target: Self::Expression,
        value: Self::Expression,
    ) -> Result<Self::Expression, TranslatorError>;

    fn create_binary_expression(
        &self,
        left_operand: Self::Expression,
        operator: BinaryOperator,
        right_operand: Self::Expression,
    ) -> Self::Expression;

    fn create_block(&self, body: Vec<Self::Statement>) -> Self::Statement;

    fn create_call_expression(
        &self,
        callee: Self::Expression,
        args: Vec<Self::Expression>,
        pure: bool,
    ) -> Self::Expression;

    fn create_conditional(
        &self,
        condition: Self::Expression,
        then_expression: Self::Expression,
        else_expression: Self::Expression,
    ) -> Self::Expression;

    fn create_element_access(
        &self,
        expression: Self::Expression,
        element: Self::Expression,
    ) -> Self::Expression;

    fn create_expression_statement(&self, expression: Self::Expression) -> Self::Statement;

    /// `body` must be a block created by [`AstFactory::create_block`].
    fn create_function_declaration(
        &self,
        function_name: &str,
        parameters: Vec<String>,
        body: Self::Statement,
    ) -> Self::Statement;

    /// `body` must be a block created by [`AstFactory::create_block`].
    fn create_function_expression(
        &self,
        function_name: Option<&str>,
        parameters: Vec<String>,
        body: Self::Statement,
    ) -> Self::Expression;

    fn create_identifier(&self, name: &str) -> Self::Expression;

    fn create_if_statement(
        &self,
        condition: Self::Expression,
        then_statement: Self::Statement,
        else_statement: Option<Self::Statement>,
    ) -> Self::Statement;

    fn create_literal(&self, value: LiteralValue) -> Self::Expression;

    fn create_new_expression(
        &self,
        expression: Self::Expression,
        args: Vec<Self::Expression>,
    ) -> Self::Expression;

    fn create_object_literal(
        &self,
        properties: Vec<ObjectLiteralProperty<Self::Expression>>,
    ) -> Self::Expression;

    fn create_parenthesized_expression(&self, expression: Self::Expression) -> Self::Expression;

    fn create_property_access(
        &self,
        expression: Self::Expression,
        property_name: &str,
    ) -> Self::Expression;

    fn create_return_statement(&self, expression: Option<Self::Expression>) -> Self::Statement;

    fn create_tagged_template(
        &self,
        tag: Self::Expression,
        template: TemplateLiteral<Self::Expression>,
    ) -> Self::Expression;

    fn create_throw_statement(&self, expression: Self::Expression) -> Self::Statement;

    fn create_type_of_expression(&self, expression: Self::Expression) -> Self::Expression;

    fn create_unary_expression(
        &self,
        operator: UnaryOperator,
        operand: Self::Expression,
    ) -> Self::Expression;

    /// Final bindings use the strongest immutable form the factory supports.
    fn create_variable_declaration(
        &self,
        variable_name: &str,
        initializer: Option<Self::Expression>,
        is_final: bool,
    ) -> Self::Statement;

    fn set_source_map_range_for_stmt(
        &self,
        node: Self::Statement,
        source_map_range: Option<SourceMapRange>,
    ) -> Self::Statement;

    fn set_source_map_range_for_expr(
        &self,
        node: Self::Expression,
        source_map_range: Option<SourceMapRange>,
    ) -> Self::Expression;
}
