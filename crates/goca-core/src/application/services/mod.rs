//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain pipeline and the ports to accomplish
//! high-level use cases like "resolve the configuration" or "write this
//! generated file safely".

pub mod config_service;
pub mod generation;
pub mod name_conflict;
pub mod safety;

#[cfg(test)]
pub(crate) mod testing;

pub use config_service::{ConfigService, ConfigSource, ResolvedConfig};
pub use generation::GenerationContext;
pub use name_conflict::NameConflictDetector;
pub use safety::{DryRunSummary, PlannedWrite, SafetyCoordinator, SafetyOptions};
