//! Linker Errors

use crate::linker::ast::Range;
use crate::ngtsc::translator::TranslatorError;
use thiserror::Error;

/// An unrecoverable problem with a partial declaration.
///
/// Carries the source range of the offending node whenever the host could compute one, so the
/// caller can point the user at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FatalLinkerError {
    pub message: String,
    pub range: Option<Range>,
}

impl FatalLinkerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            range: None,
        }
    }

    pub fn at(message: impl Into<String>, range: Option<Range>) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl From<TranslatorError> for FatalLinkerError {
    fn from(error: TranslatorError) -> Self {
        FatalLinkerError::new(error.to_string())
    }
}
