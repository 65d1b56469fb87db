//! Render3 View API
//!
//! Metadata records describing a component for the Ivy compiler. `N` is the host expression
//! type carried inside opaque `o::Expression::WrappedNode` values and `T` is the node type of
//! the parsed template.

use indexmap::IndexMap;

use crate::core::{ChangeDetectionStrategy, ViewEncapsulation};
use crate::ml_parser::InterpolationConfig;
use crate::output::output_ast as o;
use crate::parse_util::ParseSourceSpan;
use crate::render3::util::R3Reference;

/// Information needed to compile a directive for the render3 runtime.
#[derive(Debug, Clone)]
pub struct R3DirectiveMetadata<N> {
    /// Name of the directive type.
    pub name: String,
    /// An expression representing a reference to the directive itself.
    pub type_: R3Reference<N>,
    /// An expression representing a reference to the directive being compiled, intended for use
    /// within a class definition itself.
    pub internal_type: o::Expression<N>,
    /// Number of generic type parameters of the type itself.
    pub type_argument_count: usize,
    /// A source span for the directive type.
    pub type_source_span: ParseSourceSpan,
    /// Unparsed selector of the directive.
    pub selector: String,
    /// Information about the content queries made by the directive.
    pub queries: Vec<R3QueryMetadata<N>>,
    /// Information about the view queries made by the directive.
    pub view_queries: Vec<R3QueryMetadata<N>>,
    /// Mappings indicating how the directive interacts with its host element.
    pub host: R3HostMetadata<N>,
    /// Information about usage of specific lifecycle events which require special treatment.
    pub lifecycle: R3LifecycleMetadata,
    /// Inputs keyed by class property name.
    pub inputs: IndexMap<String, R3InputMetadata>,
    /// Outputs, class property name to public binding name.
    pub outputs: IndexMap<String, String>,
    /// Whether or not the component or directive inherits from another class.
    pub uses_inheritance: bool,
    /// Whether or not the component or directive inherits its entire decorator from its base
    /// class.
    pub full_inheritance: bool,
    /// Reference name under which to export the directive's type in a template, if any.
    pub export_as: Option<Vec<String>>,
    /// The list of providers defined in the directive.
    pub providers: Option<o::Expression<N>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct R3LifecycleMetadata {
    /// Whether the directive uses NgOnChanges.
    pub uses_on_changes: bool,
}

/// Metadata for an individual input on a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct R3InputMetadata {
    pub class_property_name: String,
    pub binding_property_name: String,
}

/// Information needed to compile a component for the render3 runtime.
#[derive(Debug, Clone)]
pub struct R3ComponentMetadata<N, T> {
    pub directive: R3DirectiveMetadata<N>,
    /// Information about the component's template.
    pub template: R3ComponentTemplate<T>,
    /// Directives used in the template, in declaration order.
    pub directives: Vec<R3UsedDirectiveMetadata<N>>,
    /// Pipes used in the template, keyed by pipe name.
    pub pipes: IndexMap<String, o::Expression<N>>,
    /// Whether to wrap the `directives` and `pipes` arrays in a closure, which is needed when
    /// one of them was itself declared as a closure (forward references).
    pub wrap_directives_and_pipes_in_closure: bool,
    /// A collection of styling data.
    pub styles: Vec<String>,
    /// An encapsulation policy for the component's styling.
    pub encapsulation: ViewEncapsulation,
    /// A collection of animation triggers.
    pub animations: Option<o::Expression<N>>,
    /// The list of view providers defined in the component.
    pub view_providers: Option<o::Expression<N>>,
    /// Path to the source file, used as the context of i18n message ids.
    pub relative_context_file_path: String,
    /// Whether translation variable names should carry a file-unique suffix.
    pub i18n_use_external_ids: bool,
    /// Strategy used for detecting changes in the component.
    pub change_detection: ChangeDetectionStrategy,
    /// Overrides the default interpolation start and end delimiters.
    pub interpolation: InterpolationConfig,
}

#[derive(Debug, Clone)]
pub struct R3ComponentTemplate<T> {
    /// The template source, as written in the declaration.
    pub template: String,
    /// Parsed nodes of the template.
    pub nodes: Vec<T>,
    /// Any ng-content selectors extracted from the template.
    pub ng_content_selectors: Vec<String>,
    /// Whether the template preserves whitespaces.
    pub preserve_whitespaces: bool,
}

/// Information about a directive that is used in a component template.
#[derive(Debug, Clone)]
pub struct R3UsedDirectiveMetadata<N> {
    /// The selector of the directive.
    pub selector: String,
    /// The type of the directive as an expression.
    pub expression: o::Expression<N>,
}

/// Information needed to compile a query (view or content).
#[derive(Debug, Clone)]
pub struct R3QueryMetadata<N> {
    /// Name of the property on the class to update with query results.
    pub property_name: String,
    /// Whether to read only the first matching result.
    pub first: bool,
    /// The predicate for the query.
    pub predicate: R3QueryPredicate<N>,
    /// Whether to include only direct children or all descendants.
    pub descendants: bool,
    /// An expression representing a type to read from each matched node.
    pub read: Option<o::Expression<N>>,
    /// Whether or not this query should collect only static results.
    pub static_: bool,
}

/// Query predicate - either an expression or string selectors
#[derive(Debug, Clone)]
pub enum R3QueryPredicate<N> {
    Expression(o::Expression<N>),
    Selectors(Vec<String>),
}

/// Mappings indicating how the class interacts with its host element.
#[derive(Debug, Clone)]
pub struct R3HostMetadata<N> {
    /// A mapping of attribute binding keys to expressions.
    pub attributes: IndexMap<String, o::Expression<N>>,
    /// A mapping of event binding keys to unparsed expressions.
    pub listeners: IndexMap<String, String>,
    /// A mapping of property binding keys to unparsed expressions.
    pub properties: IndexMap<String, String>,
}

impl<N> Default for R3HostMetadata<N> {
    fn default() -> Self {
        R3HostMetadata {
            attributes: IndexMap::new(),
            listeners: IndexMap::new(),
            properties: IndexMap::new(),
        }
    }
}
