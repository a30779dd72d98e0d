//! Error handling for the goca CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Every validation diagnostic, not just the first
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use goca_core::domain::{Diagnostic, Severity};
use goca_core::error::{ErrorCategory as CoreCategory, GocaError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from the core pipeline.
    #[error("{0}")]
    Core(#[from] GocaError),

    /// `goca config get` with a key the configuration does not have.
    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },

    /// No project document in the project directory.
    #[error("No configuration file found in {}", dir.display())]
    NoConfigFile { dir: PathBuf },

    /// Tool preferences could not be loaded.
    #[error("Preferences error: {message}")]
    Preferences { message: String },

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not encode output: {message}")]
    Output { message: String },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output {
            message: err.to_string(),
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            // Validation diagnostics are printed separately.
            Self::Core(core) if core.report().is_some() => vec![
                "Fix the fields above in .goca.yaml or override them with flags".into(),
                "Run 'goca config validate' to re-check".into(),
            ],
            Self::Core(core) => core.suggestions(),

            Self::UnknownKey { key } => vec![
                format!("'{key}' is not a configuration key"),
                "Use dotted paths, e.g. database.port or features.auth.enabled".into(),
                "Run 'goca config show' to list every key".into(),
            ],

            Self::NoConfigFile { dir } => vec![
                format!(
                    "Create one with: goca --dir {} init <name> --module <module>",
                    dir.display()
                ),
                "Or point at a file with --config FILE".into(),
            ],

            Self::Preferences { .. } => vec![
                "Check your preferences file: goca config path".into(),
                "GOCA_* environment variables override the file".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],

            Self::Output { .. } => vec!["This appears to be a bug in goca".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Conflict => ErrorCategory::Conflict,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::UnknownKey { .. } | Self::NoConfigFile { .. } => ErrorCategory::NotFound,
            Self::Preferences { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } | Self::Output { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Internal      |  1   |
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Conflict      |  5   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Conflict => 5,
        }
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Core(core) => core.report().map(|r| r.diagnostics()).unwrap_or_default(),
            _ => &[],
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "\u{2717}".red().bold(), // ✗
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.headline().red()));

        let diagnostics = self.diagnostics();
        if !diagnostics.is_empty() {
            output.push('\n');
            for d in diagnostics {
                let label = format!("{:<7}", d.severity.as_str());
                let severity = match d.severity {
                    Severity::Error => label.red().bold().to_string(),
                    Severity::Warning => label.yellow().bold().to_string(),
                };
                output.push_str(&format!(
                    "  {severity} {}: {} {}\n",
                    d.field.bold(),
                    d.message,
                    format!("(value: {})", d.value).dimmed()
                ));
            }
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "\u{2192}".dimmed(), // →
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self.headline()));

        let diagnostics = self.diagnostics();
        if !diagnostics.is_empty() {
            out.push('\n');
            for d in diagnostics {
                out.push_str(&format!(
                    "  {:<7} {}: {} (value: {})\n",
                    d.severity.as_str(),
                    d.field,
                    d.message,
                    d.value
                ));
            }
        }

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// The report is listed line by line, so it is not repeated in the title.
    fn headline(&self) -> String {
        match self {
            Self::Core(core) => match core.report() {
                Some(report) => format!(
                    "Configuration is invalid ({} error(s), {} warning(s))",
                    report.error_count(),
                    report.warning_count()
                ),
                None => core.to_string(),
            },
            other => other.to_string(),
        }
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self.headline()),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Conflict => tracing::warn!("Conflict: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Refused to overwrite an existing file.
    Conflict,
    /// Internal/system error.
    Internal,
}
