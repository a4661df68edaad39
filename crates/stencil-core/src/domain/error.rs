use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the output root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Unknown option '{key}'")]
    UnknownOption { key: String },

    #[error("Invalid value '{value}' for option '{key}': {reason}")]
    InvalidOptionValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Malformed option assignment '{raw}', expected key=value")]
    MalformedAssignment { raw: String },

    #[error("Required option missing: {field}")]
    MissingRequiredOption { field: &'static str },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Unknown project type '{0}'")]
    UnknownProjectType(String),

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Template '{name}' targets '{path}' which no output location owns")]
    UnassignedTemplate { name: String, path: String },

    #[error("Failed to serialise managed file '{path}': {reason}")]
    Serialization { path: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownOption { key } => vec![
                format!("'{key}' is not a recognised project option"),
                format!("Known options: {}", crate::domain::options::OPTION_KEYS.join(", ")),
            ],
            Self::InvalidOptionValue { key, .. } => vec![
                format!("Check the value passed for '{key}'"),
                "Boolean options accept true/false, yes/no, 1/0".into(),
            ],
            Self::MalformedAssignment { .. } => vec![
                "Pass options as --set key=value".into(),
                "Example: stencil generate --set name=my-construct".into(),
            ],
            Self::MissingRequiredOption { field } => vec![
                format!("Set it with --set {field}=<value> or in the [project] table of your config"),
            ],
            Self::UnknownProjectType(_) => vec![
                "Try: stencil list to see available project types".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownProjectType(_) => ErrorCategory::NotFound,
            Self::UnassignedTemplate { .. } | Self::Serialization { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}
