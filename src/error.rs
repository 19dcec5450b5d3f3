//! Error type shared by the factory, property-edit and configuration paths.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::shape::ShapeKind;

/// Errors produced by editor-core operations.
///
/// None of these leave the canvas partially mutated: every fallible path
/// validates its inputs before touching a shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// The type tag does not name one of the five shape variants.
    #[error("unknown shape type: {0}")]
    UnknownShapeType(String),

    /// A variant was requested without a field it cannot default.
    #[error("{kind} shape requires a '{field}' argument")]
    MissingRequiredField { kind: ShapeKind, field: &'static str },

    /// An integer-valued property received a value that is not an integer.
    #[error("property '{name}' expects an integer, got {value}")]
    InvalidNumericProperty { name: String, value: String },

    /// A boolean-valued property received a value that is not a boolean.
    #[error("property '{name}' expects a boolean, got {value}")]
    InvalidBooleanProperty { name: String, value: String },

    /// An environment setting could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),
}

/// Grepable error code for log lines and host-facing reports.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

impl ErrorCode for EditorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownShapeType(_) => "E_UNKNOWN_SHAPE_TYPE",
            Self::MissingRequiredField { .. } => "E_MISSING_REQUIRED_FIELD",
            Self::InvalidNumericProperty { .. } => "E_INVALID_NUMERIC_PROPERTY",
            Self::InvalidBooleanProperty { .. } => "E_INVALID_BOOLEAN_PROPERTY",
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
        }
    }
}

impl EditorError {
    /// Whether the error aborts a shape creation attempt.
    #[must_use]
    pub fn is_creation_failure(&self) -> bool {
        matches!(self, Self::UnknownShapeType(_) | Self::MissingRequiredField { .. })
    }
}
