//! Default Configuration
//!
//! Interpolation delimiters used when a declaration does not specify its own.

use crate::assertions::{assert_interpolation_symbols, InterpolationError};
use serde::{Deserialize, Serialize};

/// Interpolation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpolationConfig {
    pub start: String,
    pub end: String,
}

impl InterpolationConfig {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        InterpolationConfig {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn from_array(markers: Option<&[String]>) -> Result<Self, InterpolationError> {
        match markers {
            None => Ok(default_interpolation_config()),
            Some(m) => {
                assert_interpolation_symbols("interpolation", m)?;
                Ok(InterpolationConfig::new(m[0].clone(), m[1].clone()))
            }
        }
    }
}

impl Default for InterpolationConfig {
    fn default() -> Self {
        default_interpolation_config()
    }
}

/// Default interpolation config {{ }}
pub fn default_interpolation_config() -> InterpolationConfig {
    InterpolationConfig::new("{{", "}}")
}
