pub mod src;

pub use src::api::ast_factory::AstFactory;
pub use src::api::import_generator::{ImportGenerator, ImportRequest};
pub use src::context::Context;
pub use src::translator::{ExpressionTranslatorVisitor, TranslatorError, TranslatorOptions};
