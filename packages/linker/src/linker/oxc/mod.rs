//! oxc implementation of the linker's AST capabilities, plus a driver that links a whole
//! module source text.

mod driver;
mod factory;
mod host;

pub use driver::{link_source, LinkedSource};
pub use factory::OxcAstFactory;
pub use host::{OxcAstHost, OxcNode};
