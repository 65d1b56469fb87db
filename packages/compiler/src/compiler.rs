//! Compiler Main Module
//!
//! The contract between the linker and a template compiler, plus re-exports of the types
//! either side needs to fulfil it.

use crate::constant_pool::ConstantPool;
use crate::output::output_ast as o;
use crate::render3::view::api::R3ComponentMetadata;
use crate::render3::view::template::{ParseTemplateOptions, ParsedTemplate};

pub use crate::core::{ChangeDetectionStrategy, ViewEncapsulation};
pub use crate::ml_parser::InterpolationConfig;
pub use crate::parse_util::{
    ParseError, ParseErrorLevel, ParseLocation, ParseSourceFile, ParseSourceSpan,
};
pub use crate::render3::view::template::LexerRange;

/// Turns component metadata into an Ivy definition expression.
///
/// Implementations own template parsing and instruction generation. Anything they want to
/// hoist out of the definition goes into the supplied [`ConstantPool`].
pub trait ComponentCompiler {
    /// Node type of a parsed template.
    type TemplateNode;

    /// Parse the template found in `source` (restricted to `options.range` when given).
    fn parse_template(
        &self,
        source: &str,
        template_url: &str,
        options: ParseTemplateOptions,
    ) -> ParsedTemplate<Self::TemplateNode>;

    /// Compile a component definition. `N` is the caller's opaque node type.
    fn compile_component<N: Clone>(
        &self,
        meta: R3ComponentMetadata<N, Self::TemplateNode>,
        constant_pool: &mut ConstantPool<N>,
    ) -> o::Expression<N>;
}
