//! goca Core - Hexagonal Architecture Implementation
//!
//! Configuration resolution and safe-generation engine for the goca
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             goca-cli (CLI)              │
//! │       (Implements Driving Ports)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ConfigService, GenerationContext,      │
//! │  SafetyCoordinator, NameConflict...)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Filesystem, Loader, Renderer)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     goca-adapters (Infrastructure)      │
//! │ (LocalFilesystem, YamlConfigLoader, ..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (GocaConfig, DefaultResolver, Flags,    │
//! │  ConfigValidator, naming helpers)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use goca_core::prelude::*;
//!
//! // 1. Resolve (loader is any ConfigLoader adapter)
//! let service = ConfigService::new(loader);
//! let resolved = service.resolve(dir, None, &FlagOverrides::default())?;
//!
//! // 2. Generate through the invocation context
//! let mut ctx = GenerationContext::new(resolved, filesystem, renderer, SafetyOptions::new(dir));
//! ctx.ensure_unique_entity("User")?;
//! let data = ctx.template_data().entity("User");
//! let content = ctx.render_named("entity.go.tmpl", BUILTIN, &data)?;
//! ctx.write(&ctx.entity_path("User"), &content)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ConfigService, ConfigSource, DryRunSummary, GenerationContext, ResolvedConfig,
        SafetyCoordinator, SafetyOptions,
        ports::{ConfigLoader, Filesystem, LoadedDocument, TemplateRenderer},
    };
    pub use crate::domain::{
        ConfigDocument, Diagnostic, FieldSpec, Flag, FlagOverrides, GocaConfig, Severity,
        TemplateData, ValidationReport,
    };
    pub use crate::error::{GocaError, GocaResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
