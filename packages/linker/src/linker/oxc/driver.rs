//! Links a whole JavaScript module with oxc.

use anyhow::{anyhow, bail};
use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, Statement};
use oxc_ast_visit::walk_mut::walk_expression;
use oxc_ast_visit::VisitMut;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_span::SourceType;

use super::factory::OxcAstFactory;
use super::host::{symbol_name, OxcAstHost, OxcNode};
use crate::config::LinkerOptions;
use crate::linker::ast::AstHost;
use crate::linker::error::FatalLinkerError;
use crate::linker::file_linker::{FileLinker, LinkerEnvironment};
use crate::linker::partial_linkers::partial_component_linker::DECLARE_COMPONENT;
use crate::ngtsc::logging::Logger;
use ng_compiler::compiler::ComponentCompiler;

/// Output of [`link_source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedSource {
    pub code: String,
    pub linked_declarations: usize,
}

/// Parse `code`, link every `$ngDeclareComponent` call in it and print the result.
///
/// Shared constants, when enabled, are inserted after the last import declaration.
pub fn link_source<C: ComponentCompiler>(
    source_url: &str,
    code: &str,
    compiler: &C,
    options: LinkerOptions,
    logger: &dyn Logger,
) -> anyhow::Result<LinkedSource> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(source_url).unwrap_or_else(|_| SourceType::mjs());
    let parsed = Parser::new(&allocator, code, source_type).parse();
    if !parsed.errors.is_empty() {
        let errors: Vec<String> = parsed.errors.iter().map(|e| e.to_string()).collect();
        bail!("Failed to parse {}: {}", source_url, errors.join("\n"));
    }
    let mut program = parsed.program;

    let host = OxcAstHost::new(code);
    let factory = OxcAstFactory::new(&allocator, source_url);
    let environment = LinkerEnvironment::new(&host, &factory, compiler, logger);
    let mut linker = FileLinker::new(source_url, code, environment, options)
        .map_err(|e| located(source_url, e))?;

    let mut visitor = DeclarationVisitor {
        linker: &mut linker,
        host: &host,
        allocator: &allocator,
        linked: 0,
        error: None,
    };
    visitor.visit_program(&mut program);
    let linked_declarations = visitor.linked;
    if let Some(error) = visitor.error {
        return Err(located(source_url, error));
    }

    if let Some(statements) = linker
        .get_global_statements()
        .map_err(|e| located(source_url, e))?
    {
        let insert_at = program
            .body
            .iter()
            .rposition(|stmt| matches!(stmt, Statement::ImportDeclaration(_)))
            .map_or(0, |index| index + 1);
        let old_body = std::mem::replace(&mut program.body, oxc_allocator::Vec::new_in(&allocator));
        let mut globals = Some(statements);
        for (index, stmt) in old_body.into_iter().enumerate() {
            if index == insert_at {
                for global in globals.take().into_iter().flatten() {
                    program.body.push(global);
                }
            }
            program.body.push(stmt);
        }
        for global in globals.into_iter().flatten() {
            program.body.push(global);
        }
    }

    let dropped = factory.take_dropped_comment_count();
    if dropped > 0 {
        logger.debug(&format!(
            "Dropped {} generated comments from {}",
            dropped, source_url
        ));
    }

    Ok(LinkedSource {
        code: Codegen::new().build(&program).code,
        linked_declarations,
    })
}

/// Prefix an error with `url:line:col` when it carries a location.
fn located(source_url: &str, error: FatalLinkerError) -> anyhow::Error {
    match error.range {
        Some(range) => anyhow!(
            "{}:{}:{}: {}",
            source_url,
            range.start_line + 1,
            range.start_col + 1,
            error.message
        ),
        None => anyhow!("{}: {}", source_url, error.message),
    }
}

/// Replaces declaration calls in place, stopping at the first failure.
struct DeclarationVisitor<'v, 'f, 'a, C: ComponentCompiler> {
    linker: &'v mut FileLinker<'f, OxcAstFactory<'a>, C>,
    host: &'v OxcAstHost<'v>,
    allocator: &'a Allocator,
    linked: usize,
    error: Option<FatalLinkerError>,
}

impl<'a, C: ComponentCompiler> DeclarationVisitor<'_, '_, 'a, C> {
    /// Only calls naming the declaration function are copied out of the program.
    fn link(&mut self, expression: &Expression<'a>) -> Result<Option<OxcNode<'a>>, FatalLinkerError> {
        let Expression::CallExpression(call) = expression else {
            return Ok(None);
        };
        if symbol_name(&call.callee) != Some(DECLARE_COMPONENT) {
            return Ok(None);
        }
        let callee = OxcNode::copied(self.allocator, &call.callee);
        let mut args = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            let Some(arg) = argument.as_expression() else {
                return Err(self.host.fail(
                    &callee,
                    "Expected $ngDeclareComponent to be called with exactly one argument",
                ));
            };
            args.push(OxcNode::copied(self.allocator, arg));
        }
        self.linker.link_call(&callee, &args)
    }
}

impl<'a, C: ComponentCompiler> VisitMut<'a> for DeclarationVisitor<'_, '_, 'a, C> {
    fn visit_expression(&mut self, expression: &mut Expression<'a>) {
        if self.error.is_some() {
            return;
        }
        match self.link(expression) {
            Ok(Some(replacement)) => {
                *expression = replacement.into_expression();
                self.linked += 1;
            }
            Ok(None) => walk_expression(self, expression),
            Err(error) => self.error = Some(error),
        }
    }
}
