//! Linker Translator
//!
//! Emits output AST through the host's factory. Every `@angular/core` symbol is read off the
//! `ngImport` expression the declaration was given.

use crate::linker::error::FatalLinkerError;
use crate::ngtsc::translator::{
    AstFactory, Context, ExpressionTranslatorVisitor, ImportGenerator, ImportRequest,
    TranslatorError, TranslatorOptions,
};
use ng_compiler::output::output_ast as o;

pub const CORE_MODULE: &str = "@angular/core";

/// Resolves imports to property reads on the captured `ngImport` expression.
pub struct LinkerImportGenerator<'a, A: AstFactory> {
    factory: &'a A,
    ng_import: A::Expression,
}

impl<'a, A: AstFactory> LinkerImportGenerator<'a, A>
where
    A::Expression: Clone,
{
    pub fn new(factory: &'a A, ng_import: A::Expression) -> Self {
        Self { factory, ng_import }
    }
}

impl<'a, A: AstFactory> ImportGenerator<(), A::Expression> for LinkerImportGenerator<'a, A>
where
    A::Expression: Clone,
{
    fn add_import(
        &mut self,
        request: ImportRequest<()>,
    ) -> Result<A::Expression, TranslatorError> {
        if request.export_module_specifier != CORE_MODULE {
            return Err(TranslatorError::UnsupportedImport {
                supported: CORE_MODULE.to_string(),
                requested: request.export_module_specifier,
            });
        }
        Ok(match request.export_symbol_name {
            Some(symbol) => self
                .factory
                .create_property_access(self.ng_import.clone(), &symbol),
            None => self.ng_import.clone(),
        })
    }
}

/// Translates output AST for one file.
pub struct Translator<'a, A: AstFactory> {
    factory: &'a A,
    options: TranslatorOptions,
}

impl<'a, A: AstFactory> Translator<'a, A>
where
    A::Expression: Clone,
{
    pub fn new(factory: &'a A) -> Self {
        Self {
            factory,
            options: TranslatorOptions::default(),
        }
    }

    pub fn translate_expression(
        &self,
        expression: o::Expression<A::Expression>,
        imports: &mut LinkerImportGenerator<'a, A>,
    ) -> Result<A::Expression, FatalLinkerError> {
        let mut visitor =
            ExpressionTranslatorVisitor::new(self.factory, imports, (), self.options);
        Ok(visitor.visit_expression(expression, Context::expression())?)
    }

    pub fn translate_statement(
        &self,
        statement: o::Statement<A::Expression>,
        imports: &mut LinkerImportGenerator<'a, A>,
    ) -> Result<A::Statement, FatalLinkerError> {
        let mut visitor =
            ExpressionTranslatorVisitor::new(self.factory, imports, (), self.options);
        Ok(visitor.visit_statement(statement, Context::statement())?)
    }
}
