//! Application layer for goca.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ConfigService, SafetyCoordinator, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! configuration rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ConfigService, ConfigSource, DryRunSummary, GenerationContext, NameConflictDetector,
    PlannedWrite, ResolvedConfig, SafetyCoordinator, SafetyOptions,
};

// Re-export port traits (for adapter implementation)
pub use ports::{ConfigLoader, Filesystem, LoadedDocument, TemplateRenderer};

pub use error::ApplicationError;
