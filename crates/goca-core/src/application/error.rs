//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not
//! configuration rules. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The configuration document exists but could not be parsed.
    #[error("Failed to parse {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Target file exists and overwriting was not allowed.
    #[error("File already exists: {path}")]
    FileConflict { path: PathBuf },

    /// Backup copy could not be made; the original was left untouched.
    #[error("Failed to back up {path}: {reason}")]
    BackupFailed { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("Template '{template}' failed to render: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigParse { path, .. } => vec![
                format!("Fix the YAML syntax in {}", path.display()),
                "Run 'goca config validate' after editing".into(),
            ],
            Self::ConfigNotFound { path } => vec![
                format!("No file at {}", path.display()),
                "Omit --config to use .goca.yaml discovery".into(),
            ],
            Self::FileConflict { path } => vec![
                format!("{} would be overwritten", path.display()),
                "Use --force to overwrite".into(),
                "Add --backup to keep a copy of the existing file".into(),
                "Use --dry-run to preview every write first".into(),
            ],
            Self::BackupFailed { path, .. } => vec![
                format!("{} was not modified", path.display()),
                "Check write permissions on the backup directory".into(),
            ],
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the placeholders used in '{template}'"),
                "Every referenced key and helper must exist".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigParse { .. } | Self::RenderingFailed { .. } => {
                ErrorCategory::Configuration
            }
            Self::ConfigNotFound { .. } => ErrorCategory::NotFound,
            Self::FileConflict { .. } => ErrorCategory::Conflict,
            Self::BackupFailed { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}
