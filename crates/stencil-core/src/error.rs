//! Unified error handling for Stencil Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stencil Core operations.
#[derive(Debug, Error, Clone)]
pub enum StencilError {
    /// Errors from the domain layer (invalid options, bad paths).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O and asset failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl StencilError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StencilResult<T> = Result<T, StencilError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn asset_missing_is_not_found() {
        let err: StencilError = ApplicationError::AssetMissing {
            path: PathBuf::from("assets/cdk-construct/src_index.ts"),
            reason: "No such file".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("--assets-dir")));
    }

    #[test]
    fn unknown_option_is_validation() {
        let err: StencilError = DomainError::UnknownOption { key: "colour".into() }.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn category_and_suggestions_come_from_wrapped_layer() {
        let errors: [StencilError; 2] = [
            DomainError::UnknownProjectType("django".into()).into(),
            ApplicationError::LockPoisoned.into(),
        ];
        for err in errors {
            let (category, suggestions) = match &err {
                StencilError::Domain(e) => (e.category(), e.suggestions()),
                StencilError::Application(e) => (e.category(), e.suggestions()),
            };
            assert_eq!(err.category(), category);
            assert_eq!(err.suggestions(), suggestions);
        }
    }
}
