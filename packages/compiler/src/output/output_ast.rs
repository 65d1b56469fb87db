//! Output AST Module
//!
//! Target-independent expression and statement trees handed back by the template compiler.
//! Every tree is generic over `N`, the host's own expression node, so that values the compiler
//! never looks into (type references, provider lists, animations...) can ride along as
//! `WrappedNode` and be re-emitted untouched.

use crate::parse_util::ParseSourceSpan;

//// Operators

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Equals,
    NotEquals,
    Assign,
    Identical,
    NotIdentical,
    Minus,
    Plus,
    Divide,
    Multiply,
    Modulo,
    And,
    Or,
    BitwiseAnd,
    Lower,
    LowerEquals,
    Bigger,
    BiggerEquals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StmtModifier {
    #[default]
    None,
    Final,
}

//// Literals and references

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Bool(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Number(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        LiteralValue::String(value)
    }
}

/// A symbol exported by some module, e.g. `ɵɵdefineComponent` from `@angular/core`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    pub module_name: Option<String>,
    pub name: Option<String>,
}

impl ExternalReference {
    pub fn new(module_name: impl Into<String>, name: impl Into<String>) -> Self {
        ExternalReference {
            module_name: Some(module_name.into()),
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnParam {
    pub name: String,
}

impl FnParam {
    pub fn new(name: impl Into<String>) -> Self {
        FnParam { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingComment {
    pub text: String,
    pub multiline: bool,
    pub trailing_newline: bool,
}

pub fn leading_comment(text: impl Into<String>, multiline: bool) -> LeadingComment {
    LeadingComment {
        text: text.into(),
        multiline,
        trailing_newline: true,
    }
}

//// Expressions

#[derive(Debug, Clone)]
pub enum Expression<N> {
    ReadVar(ReadVarExpr),
    ReadProp(ReadPropExpr<N>),
    ReadKey(ReadKeyExpr<N>),
    InvokeFn(InvokeFunctionExpr<N>),
    Instantiate(InstantiateExpr<N>),
    Literal(LiteralExpr),
    LiteralArray(LiteralArrayExpr<N>),
    LiteralMap(LiteralMapExpr<N>),
    External(ExternalExpr),
    Conditional(ConditionalExpr<N>),
    NotExpr(NotExpr<N>),
    Unary(UnaryOperatorExpr<N>),
    BinaryOp(BinaryOperatorExpr<N>),
    Fn(FunctionExpr<N>),
    TaggedTemplate(TaggedTemplateLiteralExpr<N>),
    TypeOf(TypeofExpr<N>),
    Parens(ParenthesizedExpr<N>),
    Localized(LocalizedString<N>),
    WrappedNode(WrappedNodeExpr<N>),
}

#[derive(Debug, Clone)]
pub struct ReadVarExpr {
    pub name: String,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct ReadPropExpr<N> {
    pub receiver: Box<Expression<N>>,
    pub name: String,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct ReadKeyExpr<N> {
    pub receiver: Box<Expression<N>>,
    pub index: Box<Expression<N>>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct InvokeFunctionExpr<N> {
    pub fn_: Box<Expression<N>>,
    pub args: Vec<Expression<N>>,
    pub pure: bool,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct InstantiateExpr<N> {
    pub class_expr: Box<Expression<N>>,
    pub args: Vec<Expression<N>>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct LiteralArrayExpr<N> {
    pub entries: Vec<Expression<N>>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct LiteralMapEntry<N> {
    pub key: String,
    pub value: Box<Expression<N>>,
    pub quoted: bool,
}

impl<N> LiteralMapEntry<N> {
    pub fn new(key: impl Into<String>, value: Expression<N>, quoted: bool) -> Self {
        LiteralMapEntry {
            key: key.into(),
            value: Box::new(value),
            quoted,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiteralMapExpr<N> {
    pub entries: Vec<LiteralMapEntry<N>>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct ExternalExpr {
    pub value: ExternalReference,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct ConditionalExpr<N> {
    pub condition: Box<Expression<N>>,
    pub true_case: Box<Expression<N>>,
    pub false_case: Option<Box<Expression<N>>>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct NotExpr<N> {
    pub condition: Box<Expression<N>>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct UnaryOperatorExpr<N> {
    pub operator: UnaryOperator,
    pub expr: Box<Expression<N>>,
    pub parens: bool,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct BinaryOperatorExpr<N> {
    pub operator: BinaryOperator,
    pub lhs: Box<Expression<N>>,
    pub rhs: Box<Expression<N>>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct FunctionExpr<N> {
    pub params: Vec<FnParam>,
    pub statements: Vec<Statement<N>>,
    pub name: Option<String>,
    pub source_span: Option<ParseSourceSpan>,
}

/// One cooked piece of a template literal. `raw` is derived by the translator.
#[derive(Debug, Clone)]
pub struct TemplateLiteralElement {
    pub text: String,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct TaggedTemplateLiteralExpr<N> {
    pub tag: Box<Expression<N>>,
    pub elements: Vec<TemplateLiteralElement>,
    pub expressions: Vec<Expression<N>>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct TypeofExpr<N> {
    pub expr: Box<Expression<N>>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct ParenthesizedExpr<N> {
    pub expr: Box<Expression<N>>,
    pub source_span: Option<ParseSourceSpan>,
}

/// A `$localize` message. `message_parts` has one more entry than `placeholder_names`.
#[derive(Debug, Clone)]
pub struct LocalizedString<N> {
    pub meta_block: String,
    pub message_parts: Vec<String>,
    pub placeholder_names: Vec<String>,
    pub expressions: Vec<Expression<N>>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct WrappedNodeExpr<N> {
    pub node: N,
    pub source_span: Option<ParseSourceSpan>,
}

impl<N> Expression<N> {
    pub fn source_span(&self) -> Option<&ParseSourceSpan> {
        match self {
            Expression::ReadVar(e) => e.source_span.as_ref(),
            Expression::ReadProp(e) => e.source_span.as_ref(),
            Expression::ReadKey(e) => e.source_span.as_ref(),
            Expression::InvokeFn(e) => e.source_span.as_ref(),
            Expression::Instantiate(e) => e.source_span.as_ref(),
            Expression::Literal(e) => e.source_span.as_ref(),
            Expression::LiteralArray(e) => e.source_span.as_ref(),
            Expression::LiteralMap(e) => e.source_span.as_ref(),
            Expression::External(e) => e.source_span.as_ref(),
            Expression::Conditional(e) => e.source_span.as_ref(),
            Expression::NotExpr(e) => e.source_span.as_ref(),
            Expression::Unary(e) => e.source_span.as_ref(),
            Expression::BinaryOp(e) => e.source_span.as_ref(),
            Expression::Fn(e) => e.source_span.as_ref(),
            Expression::TaggedTemplate(e) => e.source_span.as_ref(),
            Expression::TypeOf(e) => e.source_span.as_ref(),
            Expression::Parens(e) => e.source_span.as_ref(),
            Expression::Localized(e) => e.source_span.as_ref(),
            Expression::WrappedNode(e) => e.source_span.as_ref(),
        }
    }

    pub fn prop(self, name: impl Into<String>) -> Expression<N> {
        Expression::ReadProp(ReadPropExpr {
            receiver: Box::new(self),
            name: name.into(),
            source_span: None,
        })
    }

    pub fn key(self, index: Expression<N>) -> Expression<N> {
        Expression::ReadKey(ReadKeyExpr {
            receiver: Box::new(self),
            index: Box::new(index),
            source_span: None,
        })
    }

    pub fn call_fn(self, args: Vec<Expression<N>>, pure: bool) -> Expression<N> {
        Expression::InvokeFn(InvokeFunctionExpr {
            fn_: Box::new(self),
            args,
            pure,
            source_span: None,
        })
    }

    pub fn instantiate(self, args: Vec<Expression<N>>) -> Expression<N> {
        Expression::Instantiate(InstantiateExpr {
            class_expr: Box::new(self),
            args,
            source_span: None,
        })
    }

    pub fn conditional(
        self,
        true_case: Expression<N>,
        false_case: Option<Expression<N>>,
    ) -> Expression<N> {
        Expression::Conditional(ConditionalExpr {
            condition: Box::new(self),
            true_case: Box::new(true_case),
            false_case: false_case.map(Box::new),
            source_span: None,
        })
    }

    pub fn binary(self, operator: BinaryOperator, rhs: Expression<N>) -> Expression<N> {
        Expression::BinaryOp(BinaryOperatorExpr {
            operator,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
            source_span: None,
        })
    }

    pub fn and(self, rhs: Expression<N>) -> Expression<N> {
        self.binary(BinaryOperator::And, rhs)
    }

    pub fn or(self, rhs: Expression<N>) -> Expression<N> {
        self.binary(BinaryOperator::Or, rhs)
    }

    pub fn identical(self, rhs: Expression<N>) -> Expression<N> {
        self.binary(BinaryOperator::Identical, rhs)
    }

    /// `self = value`
    pub fn set(self, value: Expression<N>) -> Expression<N> {
        self.binary(BinaryOperator::Assign, value)
    }

    pub fn with_source_span(mut self, span: ParseSourceSpan) -> Expression<N> {
        let slot = match &mut self {
            Expression::ReadVar(e) => &mut e.source_span,
            Expression::ReadProp(e) => &mut e.source_span,
            Expression::ReadKey(e) => &mut e.source_span,
            Expression::InvokeFn(e) => &mut e.source_span,
            Expression::Instantiate(e) => &mut e.source_span,
            Expression::Literal(e) => &mut e.source_span,
            Expression::LiteralArray(e) => &mut e.source_span,
            Expression::LiteralMap(e) => &mut e.source_span,
            Expression::External(e) => &mut e.source_span,
            Expression::Conditional(e) => &mut e.source_span,
            Expression::NotExpr(e) => &mut e.source_span,
            Expression::Unary(e) => &mut e.source_span,
            Expression::BinaryOp(e) => &mut e.source_span,
            Expression::Fn(e) => &mut e.source_span,
            Expression::TaggedTemplate(e) => &mut e.source_span,
            Expression::TypeOf(e) => &mut e.source_span,
            Expression::Parens(e) => &mut e.source_span,
            Expression::Localized(e) => &mut e.source_span,
            Expression::WrappedNode(e) => &mut e.source_span,
        };
        *slot = Some(span);
        self
    }

    pub fn to_stmt(self) -> Statement<N> {
        Statement::Expression(ExpressionStatement {
            expr: Box::new(self),
            leading_comments: Vec::new(),
            source_span: None,
        })
    }

    pub fn to_return_stmt(self) -> Statement<N> {
        Statement::Return(ReturnStatement {
            value: Box::new(self),
            leading_comments: Vec::new(),
            source_span: None,
        })
    }

    pub fn to_declare_var(self, name: impl Into<String>, modifiers: StmtModifier) -> Statement<N> {
        Statement::DeclareVar(DeclareVarStmt {
            name: name.into(),
            value: Some(Box::new(self)),
            modifiers,
            leading_comments: Vec::new(),
            source_span: None,
        })
    }
}

//// Statements

#[derive(Debug, Clone)]
pub enum Statement<N> {
    DeclareVar(DeclareVarStmt<N>),
    DeclareFn(DeclareFunctionStmt<N>),
    Expression(ExpressionStatement<N>),
    Return(ReturnStatement<N>),
    IfStmt(IfStmt<N>),
    Throw(ThrowStmt<N>),
}

#[derive(Debug, Clone)]
pub struct DeclareVarStmt<N> {
    pub name: String,
    pub value: Option<Box<Expression<N>>>,
    pub modifiers: StmtModifier,
    pub leading_comments: Vec<LeadingComment>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct DeclareFunctionStmt<N> {
    pub name: String,
    pub params: Vec<FnParam>,
    pub statements: Vec<Statement<N>>,
    pub leading_comments: Vec<LeadingComment>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement<N> {
    pub expr: Box<Expression<N>>,
    pub leading_comments: Vec<LeadingComment>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct ReturnStatement<N> {
    pub value: Box<Expression<N>>,
    pub leading_comments: Vec<LeadingComment>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct IfStmt<N> {
    pub condition: Box<Expression<N>>,
    pub true_case: Vec<Statement<N>>,
    pub false_case: Vec<Statement<N>>,
    pub leading_comments: Vec<LeadingComment>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone)]
pub struct ThrowStmt<N> {
    pub error: Box<Expression<N>>,
    pub leading_comments: Vec<LeadingComment>,
    pub source_span: Option<ParseSourceSpan>,
}

impl<N> Statement<N> {
    pub fn leading_comments(&self) -> &[LeadingComment] {
        match self {
            Statement::DeclareVar(s) => &s.leading_comments,
            Statement::DeclareFn(s) => &s.leading_comments,
            Statement::Expression(s) => &s.leading_comments,
            Statement::Return(s) => &s.leading_comments,
            Statement::IfStmt(s) => &s.leading_comments,
            Statement::Throw(s) => &s.leading_comments,
        }
    }

    pub fn with_leading_comment(mut self, comment: LeadingComment) -> Statement<N> {
        match &mut self {
            Statement::DeclareVar(s) => s.leading_comments.push(comment),
            Statement::DeclareFn(s) => s.leading_comments.push(comment),
            Statement::Expression(s) => s.leading_comments.push(comment),
            Statement::Return(s) => s.leading_comments.push(comment),
            Statement::IfStmt(s) => s.leading_comments.push(comment),
            Statement::Throw(s) => s.leading_comments.push(comment),
        }
        self
    }
}

//// Builders

pub fn variable<N>(name: impl Into<String>) -> Expression<N> {
    Expression::ReadVar(ReadVarExpr {
        name: name.into(),
        source_span: None,
    })
}

pub fn literal<N>(value: impl Into<LiteralValue>) -> Expression<N> {
    Expression::Literal(LiteralExpr {
        value: value.into(),
        source_span: None,
    })
}

pub fn null_expr<N>() -> Expression<N> {
    literal(LiteralValue::Null)
}

pub fn literal_arr<N>(entries: Vec<Expression<N>>) -> Expression<N> {
    Expression::LiteralArray(LiteralArrayExpr {
        entries,
        source_span: None,
    })
}

pub fn literal_map<N>(entries: Vec<LiteralMapEntry<N>>) -> Expression<N> {
    Expression::LiteralMap(LiteralMapExpr {
        entries,
        source_span: None,
    })
}

pub fn import_ref<N>(reference: ExternalReference) -> Expression<N> {
    Expression::External(ExternalExpr {
        value: reference,
        source_span: None,
    })
}

pub fn not<N>(condition: Expression<N>) -> Expression<N> {
    Expression::NotExpr(NotExpr {
        condition: Box::new(condition),
        source_span: None,
    })
}

pub fn unary<N>(operator: UnaryOperator, expr: Expression<N>) -> Expression<N> {
    Expression::Unary(UnaryOperatorExpr {
        operator,
        expr: Box::new(expr),
        parens: false,
        source_span: None,
    })
}

pub fn typeof_expr<N>(expr: Expression<N>) -> Expression<N> {
    Expression::TypeOf(TypeofExpr {
        expr: Box::new(expr),
        source_span: None,
    })
}

pub fn parens<N>(expr: Expression<N>) -> Expression<N> {
    Expression::Parens(ParenthesizedExpr {
        expr: Box::new(expr),
        source_span: None,
    })
}

pub fn fn_expr<N>(
    params: Vec<FnParam>,
    statements: Vec<Statement<N>>,
    name: Option<String>,
) -> Expression<N> {
    Expression::Fn(FunctionExpr {
        params,
        statements,
        name,
        source_span: None,
    })
}

pub fn tagged_template<N>(
    tag: Expression<N>,
    elements: Vec<String>,
    expressions: Vec<Expression<N>>,
) -> Expression<N> {
    Expression::TaggedTemplate(TaggedTemplateLiteralExpr {
        tag: Box::new(tag),
        elements: elements
            .into_iter()
            .map(|text| TemplateLiteralElement {
                text,
                source_span: None,
            })
            .collect(),
        expressions,
        source_span: None,
    })
}

pub fn localized_string<N>(
    meta_block: impl Into<String>,
    message_parts: Vec<String>,
    placeholder_names: Vec<String>,
    expressions: Vec<Expression<N>>,
) -> Expression<N> {
    Expression::Localized(LocalizedString {
        meta_block: meta_block.into(),
        message_parts,
        placeholder_names,
        expressions,
        source_span: None,
    })
}

pub fn wrapped_node<N>(node: N) -> Expression<N> {
    Expression::WrappedNode(WrappedNodeExpr {
        node,
        source_span: None,
    })
}

pub fn if_stmt<N>(
    condition: Expression<N>,
    true_case: Vec<Statement<N>>,
    false_case: Vec<Statement<N>>,
) -> Statement<N> {
    Statement::IfStmt(IfStmt {
        condition: Box::new(condition),
        true_case,
        false_case,
        leading_comments: Vec::new(),
        source_span: None,
    })
}

pub fn throw_stmt<N>(error: Expression<N>) -> Statement<N> {
    Statement::Throw(ThrowStmt {
        error: Box::new(error),
        leading_comments: Vec::new(),
        source_span: None,
    })
}

pub fn declare_fn<N>(
    name: impl Into<String>,
    params: Vec<FnParam>,
    statements: Vec<Statement<N>>,
) -> Statement<N> {
    Statement::DeclareFn(DeclareFunctionStmt {
        name: name.into(),
        params,
        statements,
        leading_comments: Vec::new(),
        source_span: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_chain_builders_into_nested_trees() {
        let expr: Expression<()> = variable("ctx")
            .prop("items")
            .key(literal(0.0))
            .call_fn(vec![literal("a")], false);

        match expr {
            Expression::InvokeFn(call) => {
                assert_eq!(call.args.len(), 1);
                assert!(!call.pure);
                match *call.fn_ {
                    Expression::ReadKey(read) => match *read.receiver {
                        Expression::ReadProp(prop) => assert_eq!(prop.name, "items"),
                        other => panic!("unexpected receiver {:?}", other),
                    },
                    other => panic!("unexpected callee {:?}", other),
                }
            }
            other => panic!("unexpected expression {:?}", other),
        }
    }

    #[test]
    fn should_attach_leading_comments_to_statements() {
        let stmt: Statement<()> = variable("a")
            .to_stmt()
            .with_leading_comment(leading_comment("@pureOrBreakMyCode", true));
        assert_eq!(stmt.leading_comments().len(), 1);
        assert!(stmt.leading_comments()[0].multiline);
    }
}
