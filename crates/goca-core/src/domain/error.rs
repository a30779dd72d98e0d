// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::diagnostics::ValidationReport;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports are handed to several presenters)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// The merged configuration violates at least one constraint.
    ///
    /// Carries the whole report, not just the first violation.
    #[error("Configuration is invalid: {report}")]
    ValidationFailed { report: ValidationReport },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid field specification '{spec}': {reason}")]
    InvalidFieldSpec { spec: String, reason: String },

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    // ========================================================================
    // Conflict Errors
    // ========================================================================
    /// A construct with the same logical name already exists.
    #[error("Entity '{name}' already exists as '{existing}'")]
    DuplicateEntity { name: String, existing: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ValidationFailed { report } => {
                let mut out: Vec<String> = report.errors().map(|d| d.to_string()).collect();
                out.extend(report.warnings().map(|d| d.to_string()));
                out.push("Fix the fields above in .goca.yaml or override them with flags".into());
                out
            }
            Self::InvalidValue { field, .. } => vec![
                format!("Check the value of '{field}'"),
                "Run 'goca config show' to see the resolved configuration".into(),
            ],
            Self::InvalidFieldSpec { .. } => vec![
                "Fields are written as name:type pairs separated by commas".into(),
                "Example: --fields \"name:string,email:string,age:int\"".into(),
            ],
            Self::DuplicateEntity { name, existing } => vec![
                format!("'{name}' collides with the existing entity file '{existing}'"),
                "Entity names are compared case-insensitively".into(),
                "Choose a different name or remove the existing entity first".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationFailed { .. }
            | Self::InvalidValue { .. }
            | Self::InvalidFieldSpec { .. }
            | Self::InvalidName { .. } => ErrorCategory::Validation,
            Self::DuplicateEntity { .. } => ErrorCategory::Conflict,
        }
    }

    /// The validation report, if this is a validation failure.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::ValidationFailed { report } => Some(report),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
}
