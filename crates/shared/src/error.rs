use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FieldName;

/// A single field failing its validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: FieldName,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);
