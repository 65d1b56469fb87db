//! Render3 Module
//!
//! Metadata consumed by the Ivy component compiler.

pub mod util;
pub mod view;

pub use util::*;
