use ng_compiler::output::output_ast as o;
use ng_compiler::parse_util::ParseSourceSpan;
use thiserror::Error;

use crate::ngtsc::translator::src::api::ast_factory::{
    AstFactory, BinaryOperator, LeadingComment, LiteralValue, ObjectLiteralProperty,
    SourceMapLocation, SourceMapRange, TemplateElement, TemplateLiteral, UnaryOperator,
};
use crate::ngtsc::translator::src::api::import_generator::{ImportGenerator, ImportRequest};
use crate::ngtsc::translator::src::context::Context;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslatorError {
    #[error("Unable to import from anything other than '{supported}'")]
    UnsupportedImport { supported: String, requested: String },
    #[error("Invalid external reference: it has neither a module nor a name")]
    InvalidExternalReference,
    #[error("Unsupported assignment target, expected a variable, property or element")]
    InvalidAssignmentTarget,
    #[error("Localized string has {parts} message parts for {placeholders} placeholders")]
    MalformedLocalizedString { parts: usize, placeholders: usize },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TranslatorOptions {
    /// Emit every variable as `var`, even final ones.
    pub downlevel_variable_declarations: bool,
}

/// Turns output AST trees into host AST nodes through an [`AstFactory`].
///
/// Trees are consumed, so wrapped host nodes are moved into the result without copying.
pub struct ExpressionTranslatorVisitor<'a, A: AstFactory, TFile> {
    factory: &'a A,
    imports: &'a mut dyn ImportGenerator<TFile, A::Expression>,
    context_file: TFile,
    downlevel_variable_declarations: bool,
}

type TranslateResult<T> = Result<T, TranslatorError>;

impl<'a, A: AstFactory, TFile: Clone> ExpressionTranslatorVisitor<'a, A, TFile> {
    pub fn new(
        factory: &'a A,
        imports: &'a mut dyn ImportGenerator<TFile, A::Expression>,
        context_file: TFile,
        options: TranslatorOptions,
    ) -> Self {
        Self {
            factory,
            imports,
            context_file,
            downlevel_variable_declarations: options.downlevel_variable_declarations,
        }
    }

    pub fn visit_statement(
        &mut self,
        stmt: o::Statement<A::Expression>,
        context: Context,
    ) -> TranslateResult<A::Statement> {
        match stmt {
            o::Statement::DeclareVar(s) => self.visit_declare_var_stmt(s, context),
            o::Statement::DeclareFn(s) => self.visit_declare_fn_stmt(s, context),
            o::Statement::Expression(s) => self.visit_expression_stmt(s, context),
            o::Statement::Return(s) => self.visit_return_stmt(s, context),
            o::Statement::IfStmt(s) => self.visit_if_stmt(s, context),
            o::Statement::Throw(s) => self.visit_throw_stmt(s, context),
        }
    }

    pub fn visit_expression(
        &mut self,
        expr: o::Expression<A::Expression>,
        context: Context,
    ) -> TranslateResult<A::Expression> {
        let span = expr.source_span().cloned();
        let result = match expr {
            o::Expression::ReadVar(e) => self.factory.create_identifier(&e.name),
            o::Expression::ReadProp(e) => {
                let receiver = self.visit_expression(*e.receiver, context.with_expression_mode())?;
                self.factory.create_property_access(receiver, &e.name)
            }
            o::Expression::ReadKey(e) => {
                let receiver = self.visit_expression(*e.receiver, context.with_expression_mode())?;
                let index = self.visit_expression(*e.index, context.with_expression_mode())?;
                self.factory.create_element_access(receiver, index)
            }
            o::Expression::InvokeFn(e) => {
                let callee = self.visit_expression(*e.fn_, context.with_expression_mode())?;
                let args = self.visit_expressions(e.args, context)?;
                self.factory.create_call_expression(callee, args, e.pure)
            }
            o::Expression::Instantiate(e) => {
                let class_expr =
                    self.visit_expression(*e.class_expr, context.with_expression_mode())?;
                let args = self.visit_expressions(e.args, context)?;
                self.factory.create_new_expression(class_expr, args)
            }
            o::Expression::Literal(e) => self.factory.create_literal(match &e.value {
                o::LiteralValue::Null => LiteralValue::Null,
                o::LiteralValue::Undefined => LiteralValue::Undefined,
                o::LiteralValue::Bool(b) => LiteralValue::Boolean(*b),
                o::LiteralValue::Number(n) => LiteralValue::Number(*n),
                o::LiteralValue::String(s) => LiteralValue::String(s),
            }),
            o::Expression::LiteralArray(e) => {
                let elements = self.visit_expressions(e.entries, context)?;
                self.factory.create_array_literal(elements)
            }
            o::Expression::LiteralMap(e) => {
                let mut properties = Vec::with_capacity(e.entries.len());
                for entry in e.entries {
                    properties.push(ObjectLiteralProperty {
                        property_name: entry.key,
                        value: self.visit_expression(*entry.value, context.with_expression_mode())?,
                        quoted: entry.quoted,
                    });
                }
                self.factory.create_object_literal(properties)
            }
            o::Expression::External(e) => self.visit_external_expr(e)?,
            o::Expression::Conditional(e) => {
                let condition = self.visit_expression(*e.condition, context.with_expression_mode())?;
                let true_case = self.visit_expression(*e.true_case, context.with_expression_mode())?;
                let false_case = match e.false_case {
                    Some(f) => self.visit_expression(*f, context.with_expression_mode())?,
                    None => self.factory.create_literal(LiteralValue::Null),
                };
                self.factory
                    .create_conditional(condition, true_case, false_case)
            }
            o::Expression::NotExpr(e) => {
                let operand = self.visit_expression(*e.condition, context.with_expression_mode())?;
                self.factory
                    .create_unary_expression(UnaryOperator::Not, operand)
            }
            o::Expression::Unary(e) => {
                let operator = match e.operator {
                    o::UnaryOperator::Minus => UnaryOperator::Minus,
                    o::UnaryOperator::Plus => UnaryOperator::Plus,
                };
                let operand = self.visit_expression(*e.expr, context.with_expression_mode())?;
                let unary = self.factory.create_unary_expression(operator, operand);
                if e.parens {
                    self.factory.create_parenthesized_expression(unary)
                } else {
                    unary
                }
            }
            o::Expression::BinaryOp(e) => self.visit_binary_operator_expr(e, context)?,
            o::Expression::Fn(e) => {
                let body = self.visit_block(e.statements, context)?;
                let params = e.params.into_iter().map(|p| p.name).collect();
                self.factory
                    .create_function_expression(e.name.as_deref(), params, body)
            }
            o::Expression::TaggedTemplate(e) => {
                let tag = self.visit_expression(*e.tag, context.with_expression_mode())?;
                let elements = e
                    .elements
                    .into_iter()
                    .map(|element| {
                        template_element(element.text, source_map_range(element.source_span.as_ref()))
                    })
                    .collect();
                let expressions = self.visit_expressions(e.expressions, context)?;
                self.factory.create_tagged_template(
                    tag,
                    TemplateLiteral {
                        elements,
                        expressions,
                    },
                )
            }
            o::Expression::TypeOf(e) => {
                let operand = self.visit_expression(*e.expr, context.with_expression_mode())?;
                self.factory.create_type_of_expression(operand)
            }
            o::Expression::Parens(e) => {
                let inner = self.visit_expression(*e.expr, context.with_expression_mode())?;
                self.factory.create_parenthesized_expression(inner)
            }
            o::Expression::Localized(e) => self.visit_localized_string(e, context)?,
            o::Expression::WrappedNode(e) => e.node,
        };
        Ok(self.set_source_map_range_expr(result, span.as_ref()))
    }

    fn visit_declare_var_stmt(
        &mut self,
        stmt: o::DeclareVarStmt<A::Expression>,
        context: Context,
    ) -> TranslateResult<A::Statement> {
        let initializer = match stmt.value {
            Some(value) => Some(self.visit_expression(*value, context.with_expression_mode())?),
            None => None,
        };
        let is_final =
            !self.downlevel_variable_declarations && stmt.modifiers == o::StmtModifier::Final;
        self.attach_comments(stmt.leading_comments);
        let declaration = self
            .factory
            .create_variable_declaration(&stmt.name, initializer, is_final);
        Ok(self.set_source_map_range_stmt(declaration, stmt.source_span.as_ref()))
    }

    fn visit_declare_fn_stmt(
        &mut self,
        stmt: o::DeclareFunctionStmt<A::Expression>,
        context: Context,
    ) -> TranslateResult<A::Statement> {
        let body = self.visit_block(stmt.statements, context)?;
        let params = stmt.params.into_iter().map(|p| p.name).collect();
        self.attach_comments(stmt.leading_comments);
        let declaration = self
            .factory
            .create_function_declaration(&stmt.name, params, body);
        Ok(self.set_source_map_range_stmt(declaration, stmt.source_span.as_ref()))
    }

    fn visit_expression_stmt(
        &mut self,
        stmt: o::ExpressionStatement<A::Expression>,
        context: Context,
    ) -> TranslateResult<A::Statement> {
        let expression = self.visit_expression(*stmt.expr, context.with_statement_mode())?;
        self.attach_comments(stmt.leading_comments);
        let statement = self.factory.create_expression_statement(expression);
        Ok(self.set_source_map_range_stmt(statement, stmt.source_span.as_ref()))
    }

    fn visit_return_stmt(
        &mut self,
        stmt: o::ReturnStatement<A::Expression>,
        context: Context,
    ) -> TranslateResult<A::Statement> {
        let value = self.visit_expression(*stmt.value, context.with_expression_mode())?;
        self.attach_comments(stmt.leading_comments);
        let statement = self.factory.create_return_statement(Some(value));
        Ok(self.set_source_map_range_stmt(statement, stmt.source_span.as_ref()))
    }

    fn visit_if_stmt(
        &mut self,
        stmt: o::IfStmt<A::Expression>,
        context: Context,
    ) -> TranslateResult<A::Statement> {
        let condition = self.visit_expression(*stmt.condition, context.with_expression_mode())?;
        let true_case = self.visit_block(stmt.true_case, context)?;
        let false_case = if stmt.false_case.is_empty() {
            None
        } else {
            Some(self.visit_block(stmt.false_case, context)?)
        };
        self.attach_comments(stmt.leading_comments);
        let statement = self
            .factory
            .create_if_statement(condition, true_case, false_case);
        Ok(self.set_source_map_range_stmt(statement, stmt.source_span.as_ref()))
    }

    fn visit_throw_stmt(
        &mut self,
        stmt: o::ThrowStmt<A::Expression>,
        context: Context,
    ) -> TranslateResult<A::Statement> {
        let error = self.visit_expression(*stmt.error, context.with_expression_mode())?;
        self.attach_comments(stmt.leading_comments);
        let statement = self.factory.create_throw_statement(error);
        Ok(self.set_source_map_range_stmt(statement, stmt.source_span.as_ref()))
    }

    fn visit_external_expr(&mut self, ast: o::ExternalExpr) -> TranslateResult<A::Expression> {
        match (ast.value.module_name, ast.value.name) {
            (Some(module_name), name) => self.imports.add_import(ImportRequest {
                export_module_specifier: module_name,
                export_symbol_name: name,
                requested_file: self.context_file.clone(),
            }),
            (None, Some(name)) => Ok(self.factory.create_identifier(&name)),
            (None, None) => Err(TranslatorError::InvalidExternalReference),
        }
    }

    fn visit_binary_operator_expr(
        &mut self,
        ast: o::BinaryOperatorExpr<A::Expression>,
        context: Context,
    ) -> TranslateResult<A::Expression> {
        let Some(operator) = map_binary_operator(ast.operator) else {
            if !matches!(
                *ast.lhs,
                o::Expression::ReadVar(_) | o::Expression::ReadProp(_) | o::Expression::ReadKey(_)
            ) {
                return Err(TranslatorError::InvalidAssignmentTarget);
            }
            let target = self.visit_expression(*ast.lhs, context.with_expression_mode())?;
            let value = self.visit_expression(*ast.rhs, context.with_expression_mode())?;
            let assignment = self.factory.create_assignment(target, value)?;
            return Ok(if context.is_statement {
                assignment
            } else {
                self.factory.create_parenthesized_expression(assignment)
            });
        };
        let lhs = self.visit_expression(*ast.lhs, context.with_expression_mode())?;
        let rhs = self.visit_expression(*ast.rhs, context.with_expression_mode())?;
        Ok(self.factory.create_binary_expression(lhs, operator, rhs))
    }

    fn visit_localized_string(
        &mut self,
        ast: o::LocalizedString<A::Expression>,
        context: Context,
    ) -> TranslateResult<A::Expression> {
        let parts = ast.message_parts.len();
        let placeholders = ast.placeholder_names.len();
        if parts != placeholders + 1 || ast.expressions.len() != placeholders {
            return Err(TranslatorError::MalformedLocalizedString {
                parts,
                placeholders,
            });
        }

        let mut elements = Vec::with_capacity(parts);
        let mut message_parts = ast.message_parts.into_iter();
        let head = message_parts.next().unwrap_or_default();
        let head = if ast.meta_block.is_empty() {
            escape_starting_colon(&head)
        } else {
            format!(":{}:{}", ast.meta_block.replace(':', "\\:"), head)
        };
        elements.push(template_element(head, None));
        for (name, part) in ast.placeholder_names.into_iter().zip(message_parts) {
            let cooked = if name.is_empty() {
                escape_starting_colon(&part)
            } else {
                format!(":{}:{}", name, part)
            };
            elements.push(template_element(cooked, None));
        }

        let expressions = self.visit_expressions(ast.expressions, context)?;
        let tag = self.factory.create_identifier("$localize");
        Ok(self.factory.create_tagged_template(
            tag,
            TemplateLiteral {
                elements,
                expressions,
            },
        ))
    }

    fn visit_expressions(
        &mut self,
        expressions: Vec<o::Expression<A::Expression>>,
        context: Context,
    ) -> TranslateResult<Vec<A::Expression>> {
        expressions
            .into_iter()
            .map(|e| self.visit_expression(e, context.with_expression_mode()))
            .collect()
    }

    fn visit_block(
        &mut self,
        statements: Vec<o::Statement<A::Expression>>,
        context: Context,
    ) -> TranslateResult<A::Statement> {
        let body = statements
            .into_iter()
            .map(|s| self.visit_statement(s, context.with_statement_mode()))
            .collect::<TranslateResult<Vec<_>>>()?;
        Ok(self.factory.create_block(body))
    }

    fn attach_comments(&self, comments: Vec<o::LeadingComment>) {
        for comment in comments {
            self.factory.add_leading_comment(LeadingComment {
                text: comment.text,
                multiline: comment.multiline,
                trailing_newline: comment.trailing_newline,
            });
        }
    }

    fn set_source_map_range_expr(
        &self,
        expr: A::Expression,
        span: Option<&ParseSourceSpan>,
    ) -> A::Expression {
        match source_map_range(span) {
            Some(range) => self.factory.set_source_map_range_for_expr(expr, Some(range)),
            None => expr,
        }
    }

    fn set_source_map_range_stmt(
        &self,
        stmt: A::Statement,
        span: Option<&ParseSourceSpan>,
    ) -> A::Statement {
        match source_map_range(span) {
            Some(range) => self.factory.set_source_map_range_for_stmt(stmt, Some(range)),
            None => stmt,
        }
    }
}

/// Spans into synthetic files (such as type source spans) carry no mapping.
fn source_map_range(span: Option<&ParseSourceSpan>) -> Option<SourceMapRange> {
    let span = span?;
    if !span.start.is_resolved() || !span.end.is_resolved() {
        return None;
    }
    Some(SourceMapRange {
        url: span.start.file.url.clone(),
        content: span.start.file.content.clone(),
        start: SourceMapLocation {
            offset: span.start.offset,
            line: span.start.line,
            column: span.start.col,
        },
        end: SourceMapLocation {
            offset: span.end.offset,
            line: span.end.line,
            column: span.end.col,
        },
    })
}

fn template_element(cooked: String, range: Option<SourceMapRange>) -> TemplateElement {
    TemplateElement {
        raw: escape_for_template_literal(&cooked),
        cooked,
        range,
    }
}

fn escape_for_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "$\\{")
}

fn escape_starting_colon(text: &str) -> String {
    match text.strip_prefix(':') {
        Some(rest) => format!("\\:{}", rest),
        None => text.to_string(),
    }
}

fn map_binary_operator(op: o::BinaryOperator) -> Option<BinaryOperator> {
    Some(match op {
        o::BinaryOperator::And => BinaryOperator::And,
        o::BinaryOperator::Bigger => BinaryOperator::Greater,
        o::BinaryOperator::BiggerEquals => BinaryOperator::GreaterEquals,
        o::BinaryOperator::BitwiseAnd => BinaryOperator::BitAnd,
        o::BinaryOperator::Divide => BinaryOperator::Divide,
        o::BinaryOperator::Equals => BinaryOperator::Equals,
        o::BinaryOperator::Identical => BinaryOperator::IdentityEquals,
        o::BinaryOperator::Lower => BinaryOperator::Less,
        o::BinaryOperator::LowerEquals => BinaryOperator::LessEquals,
        o::BinaryOperator::Minus => BinaryOperator::Minus,
        o::BinaryOperator::Modulo => BinaryOperator::Modulo,
        o::BinaryOperator::Multiply => BinaryOperator::Multiply,
        o::BinaryOperator::NotEquals => BinaryOperator::NotEquals,
        o::BinaryOperator::NotIdentical => BinaryOperator::IdentityNotEquals,
        o::BinaryOperator::Or => BinaryOperator::Or,
        o::BinaryOperator::Plus => BinaryOperator::Plus,
        o::BinaryOperator::Assign => return None,
    })
}
