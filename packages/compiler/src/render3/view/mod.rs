//! Render3 View Module
//!
//! Component metadata and template parsing contracts.

pub mod api;
pub mod template;

pub use api::*;
pub use template::*;
