//! Shared fixtures for the linker integration tests.

#![allow(dead_code)]

use ng_compiler::compiler::{
    ChangeDetectionStrategy, ComponentCompiler, LexerRange, ParseError, ParseLocation,
    ParseSourceFile, ParseSourceSpan, ViewEncapsulation,
};
use ng_compiler::constant_pool::ConstantPool;
use ng_compiler::output::output_ast as o;
use ng_compiler::render3::view::api::{R3ComponentMetadata, R3InputMetadata};
use ng_compiler::render3::view::template::{ParseTemplateOptions, ParsedTemplate};
use std::cell::RefCell;
use std::sync::Arc;

/// What the compiler was asked to parse.
#[derive(Debug, Clone)]
pub struct ParseCall {
    pub template_url: String,
    pub text: String,
    pub options: ParseTemplateOptions,
}

/// The parts of a component's metadata the tests look at.
#[derive(Debug, Clone)]
pub struct CompiledComponent {
    pub name: String,
    pub selector: String,
    pub template: String,
    pub nodes: Vec<String>,
    pub wrap_directives_and_pipes_in_closure: bool,
    pub directive_selectors: Vec<String>,
    pub pipe_names: Vec<String>,
    pub encapsulation: ViewEncapsulation,
    pub change_detection: ChangeDetectionStrategy,
    pub inputs: Vec<(String, R3InputMetadata)>,
    pub outputs: Vec<(String, String)>,
    pub styles: Vec<String>,
    pub export_as: Option<Vec<String>>,
    pub uses_on_changes: bool,
    pub query_count: usize,
    pub view_query_count: usize,
}

/// A template compiler that records its inputs and emits a `ɵɵdefineComponent` call whose
/// `consts` hoist `constants` distinct literals into the pool.
#[derive(Default)]
pub struct ScriptedCompiler {
    pub constants: usize,
    pub template_error: Option<String>,
    pub parse_calls: RefCell<Vec<ParseCall>>,
    pub compiled: RefCell<Vec<CompiledComponent>>,
}

impl ScriptedCompiler {
    pub fn with_constants(constants: usize) -> Self {
        Self {
            constants,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            template_error: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn parse_count(&self) -> usize {
        self.parse_calls.borrow().len()
    }

    pub fn last_compiled(&self) -> CompiledComponent {
        self.compiled
            .borrow()
            .last()
            .cloned()
            .expect("nothing was compiled")
    }
}

impl ComponentCompiler for ScriptedCompiler {
    type TemplateNode = String;

    fn parse_template(
        &self,
        source: &str,
        template_url: &str,
        options: ParseTemplateOptions,
    ) -> ParsedTemplate<String> {
        let range = options.range.unwrap_or(LexerRange {
            start_pos: 0,
            start_line: 0,
            start_col: 0,
            end_pos: source.len(),
        });
        let text = source[range.start_pos..range.end_pos].to_string();
        self.parse_calls.borrow_mut().push(ParseCall {
            template_url: template_url.to_string(),
            text: text.clone(),
            options,
        });

        let errors = self.template_error.as_ref().map(|message| {
            let file = Arc::new(ParseSourceFile::new(source, template_url));
            let start = ParseLocation::new(
                file.clone(),
                range.start_pos,
                range.start_line,
                range.start_col,
            );
            let end = ParseLocation::new(file, range.end_pos, range.start_line, range.start_col);
            vec![ParseError::new(ParseSourceSpan::new(start, end), message.as_str())]
        });
        ParsedTemplate {
            errors,
            nodes: vec![text],
            ng_content_selectors: Vec::new(),
        }
    }

    fn compile_component<N: Clone>(
        &self,
        meta: R3ComponentMetadata<N, String>,
        constant_pool: &mut ConstantPool<N>,
    ) -> o::Expression<N> {
        let name = meta.directive.name.clone();
        self.compiled.borrow_mut().push(CompiledComponent {
            name: name.clone(),
            selector: meta.directive.selector.clone(),
            template: meta.template.template.clone(),
            nodes: meta.template.nodes.clone(),
            wrap_directives_and_pipes_in_closure: meta.wrap_directives_and_pipes_in_closure,
            directive_selectors: meta.directives.iter().map(|d| d.selector.clone()).collect(),
            pipe_names: meta.pipes.keys().cloned().collect(),
            encapsulation: meta.encapsulation,
            change_detection: meta.change_detection,
            inputs: meta.directive.inputs.clone().into_iter().collect(),
            outputs: meta.directive.outputs.clone().into_iter().collect(),
            styles: meta.styles.clone(),
            export_as: meta.directive.export_as.clone(),
            uses_on_changes: meta.directive.lifecycle.uses_on_changes,
            query_count: meta.directive.queries.len(),
            view_query_count: meta.directive.view_queries.len(),
        });

        let consts = (0..self.constants)
            .map(|i| {
                constant_pool.get_const_literal(
                    o::literal_arr(vec![o::literal(format!("{}-{}", name, i))]),
                    false,
                )
            })
            .collect();
        o::import_ref(o::ExternalReference::new("@angular/core", "ɵɵdefineComponent")).call_fn(
            vec![o::literal_map(vec![
                o::LiteralMapEntry::new("type", meta.directive.type_.value, false),
                o::LiteralMapEntry::new("selectors", o::literal(meta.directive.selector), false),
                o::LiteralMapEntry::new("consts", o::literal_arr(consts), false),
            ])],
            false,
        )
    }
}

/// A complete declaration literal for `name`. `extra` is spliced in before `ngImport`.
pub fn component_literal(name: &str, selector: &str, template: &str, extra: &str) -> String {
    format!(
        "{{ version: 1, type: {name}, selector: \"{selector}\", template: {template}, \
         inputs: {{}}, outputs: {{}}, \
         host: {{ attributes: {{}}, listeners: {{}}, properties: {{}} }}, \
         usesOnChanges: false, usesInheritance: false, fullInheritance: false, \
         {extra}ngImport: i0 }}"
    )
}

/// A module declaring one component per entry of `names`.
pub fn module_source(names: &[&str]) -> String {
    let mut code = String::from("import * as i0 from \"@angular/core\";\n");
    for name in names {
        let selector = format!("app-{}", name.to_lowercase());
        code.push_str(&format!(
            "export class {name} {{}}\n{name}.ɵcmp = i0.$ngDeclareComponent({});\n",
            component_literal(name, &selector, "\"<div></div>\"", "")
        ));
    }
    code
}
