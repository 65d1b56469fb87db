//! FileLinker Implementation
//!
//! Orchestrates the linking process for a single file.

use crate::config::LinkerOptions;
use crate::linker::ast::{AstHost, AstNode};
use crate::linker::ast_value::AstObject;
use crate::linker::error::FatalLinkerError;
use crate::linker::partial_linkers::partial_component_linker::{
    PartialComponentLinker, DECLARE_COMPONENT,
};
use crate::linker::translator::{LinkerImportGenerator, Translator};
use crate::ngtsc::logging::Logger;
use crate::ngtsc::translator::AstFactory;
use ng_compiler::compiler::ComponentCompiler;
use ng_compiler::constant_pool::ConstantPool;

/// Everything the linker needs from its host: how to read nodes, how to build them, which
/// compiler to hand metadata to and where to log.
pub struct LinkerEnvironment<'a, A: AstFactory, C: ComponentCompiler>
where
    A::Expression: AstNode,
{
    pub host: &'a dyn AstHost<A::Expression>,
    pub factory: &'a A,
    pub compiler: &'a C,
    pub logger: &'a dyn Logger,
}

impl<'a, A: AstFactory, C: ComponentCompiler> LinkerEnvironment<'a, A, C>
where
    A::Expression: AstNode,
{
    pub fn new(
        host: &'a dyn AstHost<A::Expression>,
        factory: &'a A,
        compiler: &'a C,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            host,
            factory,
            compiler,
            logger,
        }
    }
}

/// Links every `$ngDeclareComponent` call of one file.
///
/// Create one per file, feed it each call expression in source order through
/// [`FileLinker::link_call`], then collect the shared constants once with
/// [`FileLinker::get_global_statements`].
pub struct FileLinker<'a, A: AstFactory, C: ComponentCompiler>
where
    A::Expression: AstNode,
{
    source_url: &'a str,
    environment: LinkerEnvironment<'a, A, C>,
    component_linker: PartialComponentLinker<'a, C>,
    translator: Translator<'a, A>,
    global_constant_pool: Option<ConstantPool<A::Expression>>,
    ng_import: Option<A::Expression>,
}

impl<'a, A: AstFactory, C: ComponentCompiler> FileLinker<'a, A, C>
where
    A::Expression: AstNode,
{
    pub fn new(
        source_url: &'a str,
        code: &'a str,
        environment: LinkerEnvironment<'a, A, C>,
        options: LinkerOptions,
    ) -> Result<Self, FatalLinkerError> {
        if source_url.is_empty() {
            return Err(FatalLinkerError::new("sourceUrl is required"));
        }
        Ok(Self {
            source_url,
            component_linker: PartialComponentLinker::new(
                environment.compiler,
                source_url,
                code,
                options,
            ),
            translator: Translator::new(environment.factory),
            environment,
            global_constant_pool: options
                .enable_global_statements
                .then(ConstantPool::new),
            ng_import: None,
        })
    }

    /// Whether `callee` names a declaration this linker handles.
    pub fn is_partial_declaration(&self, callee: &A::Expression) -> bool {
        self.environment.host.get_symbol_name(callee).as_deref() == Some(DECLARE_COMPONENT)
    }

    /// Link one call. Calls to anything other than `$ngDeclareComponent` yield `Ok(None)`.
    pub fn link_call(
        &mut self,
        callee: &A::Expression,
        args: &[A::Expression],
    ) -> Result<Option<A::Expression>, FatalLinkerError> {
        let host = self.environment.host;
        let logger = self.environment.logger;

        if !self.is_partial_declaration(callee) {
            if let Some(name) = host.get_symbol_name(callee) {
                logger.debug(&format!("Skipping call to {} in {}", name, self.source_url));
            }
            return Ok(None);
        }
        let [meta_arg] = args else {
            return Err(host.fail(
                callee,
                "Expected $ngDeclareComponent to be called with exactly one argument",
            ));
        };

        let meta_obj = AstObject::parse(meta_arg.clone(), host)?;
        let meta = self
            .component_linker
            .to_r3_component_metadata(&meta_obj, logger)?;
        let name = meta.directive.name.clone();

        let ng_import = match &self.ng_import {
            Some(ng_import) => ng_import.clone(),
            None => {
                let ng_import = meta_obj.get_node("ngImport")?;
                self.ng_import = Some(ng_import.clone());
                ng_import
            }
        };
        let mut imports = LinkerImportGenerator::new(self.environment.factory, ng_import);

        let compiler = self.environment.compiler;
        if let Some(pool) = self.global_constant_pool.as_mut() {
            let definition = compiler.compile_component(meta, pool);
            logger.debug(&format!(
                "Linked {} in {} ({} shared constants so far)",
                name,
                self.source_url,
                pool.len()
            ));
            return self
                .translator
                .translate_expression(definition, &mut imports)
                .map(Some);
        }

        let mut pool = ConstantPool::new();
        let definition = compiler.compile_component(meta, &mut pool);
        let result = self.translator.translate_expression(definition, &mut imports)?;
        logger.debug(&format!(
            "Linked {} in {} ({} local constants)",
            name,
            self.source_url,
            pool.len()
        ));
        if pool.is_empty() {
            return Ok(Some(result));
        }

        let factory = self.environment.factory;
        let mut body = pool
            .statements
            .into_iter()
            .map(|stmt| self.translator.translate_statement(stmt, &mut imports))
            .collect::<Result<Vec<_>, _>>()?;
        body.push(factory.create_return_statement(Some(result)));
        let iife = factory.create_function_expression(None, Vec::new(), factory.create_block(body));
        Ok(Some(factory.create_call_expression(iife, Vec::new(), false)))
    }

    /// Drain the file-wide constant pool into translated statements.
    ///
    /// Returns `None` when global statements are disabled or nothing was hoisted.
    pub fn get_global_statements(&mut self) -> Result<Option<Vec<A::Statement>>, FatalLinkerError> {
        let Some(pool) = self.global_constant_pool.as_mut() else {
            return Ok(None);
        };
        if pool.is_empty() {
            return Ok(None);
        }
        let Some(ng_import) = self.ng_import.clone() else {
            return Err(FatalLinkerError::new(
                "Invalid state: @angular/core import must be available",
            ));
        };

        let statements = std::mem::take(&mut pool.statements);
        self.environment.logger.info(&format!(
            "Emitting {} shared constants for {}",
            statements.len(),
            self.source_url
        ));
        let mut imports = LinkerImportGenerator::new(self.environment.factory, ng_import);
        statements
            .into_iter()
            .map(|stmt| self.translator.translate_statement(stmt, &mut imports))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}
