//! Partial Component Linker
//!
//! Reads the metadata literal of a `$ngDeclareComponent` call back into an
//! `R3ComponentMetadata` record.

use crate::config::LinkerOptions;
use crate::linker::ast::{AstNode, Range};
use crate::linker::ast_value::{AstObject, AstValue, DecodedValue};
use crate::linker::error::FatalLinkerError;
use crate::ngtsc::logging::Logger;
use indexmap::IndexMap;
use ng_compiler::compiler::{ComponentCompiler, InterpolationConfig, LexerRange};
use ng_compiler::core::{ChangeDetectionStrategy, ViewEncapsulation};
use ng_compiler::output::output_ast as o;
use ng_compiler::parse_util::r3_jit_type_source_span;
use ng_compiler::render3::view::api::{
    R3ComponentMetadata, R3ComponentTemplate, R3DirectiveMetadata, R3HostMetadata,
    R3InputMetadata, R3LifecycleMetadata, R3QueryMetadata, R3QueryPredicate,
    R3UsedDirectiveMetadata,
};
use ng_compiler::render3::view::template::ParseTemplateOptions;
use ng_compiler::render3::wrap_reference;
use std::collections::HashSet;

pub const DECLARE_COMPONENT: &str = "$ngDeclareComponent";

type LinkResult<T> = Result<T, FatalLinkerError>;

pub struct PartialComponentLinker<'a, C: ComponentCompiler> {
    compiler: &'a C,
    source_url: &'a str,
    code: &'a str,
    options: LinkerOptions,
}

impl<'a, C: ComponentCompiler> PartialComponentLinker<'a, C> {
    pub fn new(compiler: &'a C, source_url: &'a str, code: &'a str, options: LinkerOptions) -> Self {
        Self {
            compiler,
            source_url,
            code,
            options,
        }
    }

    /// Validate the declaration and rebuild its metadata. The template is parsed along the way.
    pub fn to_r3_component_metadata<'h, T: AstNode>(
        &self,
        meta_obj: &AstObject<'h, T>,
        logger: &dyn Logger,
    ) -> LinkResult<R3ComponentMetadata<T, C::TemplateNode>> {
        let version = meta_obj.get_number("version")?;
        if version != 1.0 {
            return Err(meta_obj
                .get_value("version")?
                .fail("Expected metadata version to be 1"));
        }

        let type_name = meta_obj
            .get_value("type")?
            .get_symbol_name()
            .unwrap_or_else(|| "anonymous".to_string());

        let interpolation = self.parse_interpolation(meta_obj)?;
        let preserve_whitespaces = if meta_obj.has("preserveWhitespaces") {
            meta_obj.get_boolean("preserveWhitespaces")?
        } else {
            false
        };

        let template_value = meta_obj.get_value("template")?;
        let range = get_template_range(&template_value, self.code)?;
        let parsed = self.compiler.parse_template(
            self.code,
            self.source_url,
            ParseTemplateOptions {
                preserve_whitespaces,
                interpolation_config: interpolation.clone(),
                range: Some(LexerRange {
                    start_pos: range.start_pos,
                    start_line: range.start_line,
                    start_col: range.start_col,
                    end_pos: range.end_pos,
                }),
                escaped_string: true,
                enable_i18n_legacy_message_id_format: self
                    .options
                    .enable_i18n_legacy_message_id_format,
                i18n_normalize_line_endings_in_icus: self
                    .options
                    .i18n_normalize_line_endings_in_icus,
            },
        );
        if let Some(errors) = parsed.errors.filter(|errors| !errors.is_empty()) {
            let errors = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(template_value.fail(&format!(
                "Errors found in the template of {}: {}",
                type_name, errors
            )));
        }

        let mut wrap_directives_and_pipes_in_closure = false;

        let mut directives = Vec::new();
        if meta_obj.has("directives") {
            for directive in meta_obj.get_array("directives")? {
                let directive = directive.get_object()?;
                let selector = directive.get_string("selector")?;
                let expression = type_reference(
                    &directive.get_value("type")?,
                    &mut wrap_directives_and_pipes_in_closure,
                )?;
                directives.push(R3UsedDirectiveMetadata {
                    selector,
                    expression,
                });
            }
        }

        let pipes = if meta_obj.has("pipes") {
            meta_obj.get_object("pipes")?.to_literal(|value| {
                type_reference(&value, &mut wrap_directives_and_pipes_in_closure)
            })?
        } else {
            IndexMap::new()
        };

        if wrap_directives_and_pipes_in_closure {
            logger.warn(&format!(
                "{} in {} references directives or pipes through a closure",
                type_name, self.source_url
            ));
        }

        let host = meta_obj.get_object("host")?;
        let host = R3HostMetadata {
            attributes: host
                .get_object("attributes")?
                .to_literal(|value| Ok(value.get_opaque()))?,
            listeners: host
                .get_object("listeners")?
                .to_literal(|value| value.get_string())?,
            properties: host
                .get_object("properties")?
                .to_literal(|value| value.get_string())?,
        };

        let styles = if meta_obj.has("styles") {
            meta_obj
                .get_array("styles")?
                .iter()
                .map(|entry| entry.get_string())
                .collect::<LinkResult<Vec<_>>>()?
        } else {
            Vec::new()
        };

        let export_as = if meta_obj.has("exportAs") {
            Some(
                meta_obj
                    .get_array("exportAs")?
                    .iter()
                    .map(|entry| entry.get_string())
                    .collect::<LinkResult<Vec<_>>>()?,
            )
        } else {
            None
        };

        let encapsulation = if meta_obj.has("encapsulation") {
            parse_encapsulation(&meta_obj.get_value("encapsulation")?)?
        } else {
            ViewEncapsulation::Emulated
        };

        let change_detection = if meta_obj.has("changeDetection") {
            parse_change_detection_strategy(&meta_obj.get_value("changeDetection")?)?
        } else {
            ChangeDetectionStrategy::Default
        };

        let directive = R3DirectiveMetadata {
            name: type_name.clone(),
            type_: wrap_reference(meta_obj.get_opaque("type")?),
            internal_type: meta_obj.get_opaque("type")?,
            type_argument_count: 0,
            type_source_span: r3_jit_type_source_span("Component", &type_name, self.source_url),
            selector: meta_obj.get_string("selector")?,
            queries: to_query_list(meta_obj, "queries")?,
            view_queries: to_query_list(meta_obj, "viewQueries")?,
            host,
            lifecycle: R3LifecycleMetadata {
                uses_on_changes: meta_obj.get_boolean("usesOnChanges")?,
            },
            inputs: to_inputs(&meta_obj.get_object("inputs")?)?,
            outputs: to_outputs(&meta_obj.get_object("outputs")?)?,
            uses_inheritance: meta_obj.get_boolean("usesInheritance")?,
            full_inheritance: meta_obj.get_boolean("fullInheritance")?,
            export_as,
            providers: optional_opaque(meta_obj, "providers")?,
        };

        Ok(R3ComponentMetadata {
            directive,
            template: R3ComponentTemplate {
                template: template_value.get_string()?,
                nodes: parsed.nodes,
                ng_content_selectors: parsed.ng_content_selectors,
                preserve_whitespaces,
            },
            directives,
            pipes,
            wrap_directives_and_pipes_in_closure,
            styles,
            encapsulation,
            animations: optional_opaque(meta_obj, "animations")?,
            view_providers: optional_opaque(meta_obj, "viewProviders")?,
            relative_context_file_path: self.source_url.to_string(),
            i18n_use_external_ids: true,
            change_detection,
            interpolation,
        })
    }

    fn parse_interpolation<T: AstNode>(
        &self,
        meta_obj: &AstObject<'_, T>,
    ) -> LinkResult<InterpolationConfig> {
        if !meta_obj.has("interpolation") {
            return Ok(InterpolationConfig::default());
        }
        let value = meta_obj.get_value("interpolation")?;
        let markers = value
            .get_array()?
            .iter()
            .map(|entry| entry.get_string())
            .collect::<LinkResult<Vec<_>>>()?;
        InterpolationConfig::from_array(Some(&markers)).map_err(|e| value.fail(&e.to_string()))
    }
}

/// Narrow the template's range to the text between its quotes.
pub fn get_template_range<T: AstNode>(
    template_value: &AstValue<'_, T>,
    code: &str,
) -> LinkResult<Range> {
    let Range {
        start_pos,
        start_line,
        start_col,
        end_pos,
    } = template_value.get_range()?;

    let bytes = code.as_bytes();
    let open = bytes.get(start_pos).copied();
    let close = end_pos.checked_sub(1).and_then(|i| bytes.get(i)).copied();
    let is_quote = matches!(open, Some(b'"' | b'\'' | b'`'));
    if !is_quote || end_pos < start_pos + 2 || open != close {
        return Err(template_value.fail(&format!(
            "Expected the template string to be wrapped in quotes but got: {}",
            code.get(start_pos..end_pos).unwrap_or_default()
        )));
    }

    Ok(Range {
        start_pos: start_pos + 1,
        start_line,
        start_col: start_col + 1,
        end_pos: end_pos - 1,
    })
}

fn optional_opaque<T: AstNode>(
    meta_obj: &AstObject<'_, T>,
    key: &str,
) -> LinkResult<Option<o::Expression<T>>> {
    if meta_obj.has(key) {
        Ok(Some(meta_obj.get_opaque(key)?))
    } else {
        Ok(None)
    }
}

/// A directive or pipe type. Types behind a closure are unwrapped and flag the component.
fn type_reference<T: AstNode>(
    value: &AstValue<'_, T>,
    in_closure: &mut bool,
) -> LinkResult<o::Expression<T>> {
    Ok(match value.decode()? {
        DecodedValue::Function(inner) => {
            *in_closure = true;
            inner.get_opaque()
        }
        _ => value.get_opaque(),
    })
}

fn to_inputs<T: AstNode>(
    inputs: &AstObject<'_, T>,
) -> LinkResult<IndexMap<String, R3InputMetadata>> {
    let mut public_names = HashSet::new();
    let mut result = IndexMap::new();
    for (key, value) in inputs.to_literal(Ok)? {
        let (binding_property_name, class_property_name) = match value.decode()? {
            DecodedValue::String(public) => (public, key.clone()),
            DecodedValue::Array(pair) => {
                let [public, private] = pair.as_slice() else {
                    return Err(value.fail(&format!(
                        "Expected input '{}' to be a [publicName, classPropertyName] pair",
                        key
                    )));
                };
                (public.get_string()?, private.get_string()?)
            }
            _ => {
                return Err(value.fail(&format!(
                    "Expected input '{}' to be a string or a [publicName, classPropertyName] pair",
                    key
                )));
            }
        };
        if !public_names.insert(binding_property_name.clone()) {
            return Err(value.fail(&format!(
                "Duplicate input name '{}'",
                binding_property_name
            )));
        }
        result.insert(
            key,
            R3InputMetadata {
                class_property_name,
                binding_property_name,
            },
        );
    }
    Ok(result)
}

fn to_outputs<T: AstNode>(outputs: &AstObject<'_, T>) -> LinkResult<IndexMap<String, String>> {
    let mut public_names = HashSet::new();
    let mut result = IndexMap::new();
    for (key, value) in outputs.to_literal(Ok)? {
        let public_name = value.get_string()?;
        if !public_names.insert(public_name.clone()) {
            return Err(value.fail(&format!("Duplicate output name '{}'", public_name)));
        }
        result.insert(key, public_name);
    }
    Ok(result)
}

fn to_query_list<T: AstNode>(
    meta_obj: &AstObject<'_, T>,
    key: &str,
) -> LinkResult<Vec<R3QueryMetadata<T>>> {
    if !meta_obj.has(key) {
        return Ok(Vec::new());
    }
    meta_obj
        .get_array(key)?
        .iter()
        .map(|entry| to_query_metadata(&entry.get_object()?))
        .collect()
}

fn to_query_metadata<T: AstNode>(obj: &AstObject<'_, T>) -> LinkResult<R3QueryMetadata<T>> {
    let predicate_value = obj.get_value("predicate")?;
    let predicate = match predicate_value.decode()? {
        DecodedValue::Array(entries) => R3QueryPredicate::Selectors(
            entries
                .iter()
                .map(|entry| entry.get_string())
                .collect::<LinkResult<Vec<_>>>()?,
        ),
        _ => R3QueryPredicate::Expression(predicate_value.get_opaque()),
    };
    Ok(R3QueryMetadata {
        property_name: obj.get_string("propertyName")?,
        first: obj.get_boolean("first")?,
        predicate,
        descendants: obj.get_boolean("descendants")?,
        read: optional_opaque(obj, "read")?,
        static_: obj.get_boolean("static")?,
    })
}

fn parse_encapsulation<T: AstNode>(value: &AstValue<'_, T>) -> LinkResult<ViewEncapsulation> {
    let symbol_name = value
        .get_symbol_name()
        .ok_or_else(|| value.fail("Expected encapsulation to have a symbol name"))?;
    ViewEncapsulation::from_symbol_name(&symbol_name)
        .ok_or_else(|| value.fail("Unsupported encapsulation"))
}

fn parse_change_detection_strategy<T: AstNode>(
    value: &AstValue<'_, T>,
) -> LinkResult<ChangeDetectionStrategy> {
    let symbol_name = value
        .get_symbol_name()
        .ok_or_else(|| value.fail("Expected change detection strategy to have a symbol name"))?;
    ChangeDetectionStrategy::from_symbol_name(&symbol_name)
        .ok_or_else(|| value.fail("Unsupported change detection strategy"))
}
