//! Configuration model and its pure resolution pipeline.
//!
//! ```text
//! ConfigDocument ──DefaultResolver──▶ Resolution ──FlagMerger──▶ Resolution
//!                                                                   │
//!                                      ValidationReport ◀──ConfigValidator
//! ```
//!
//! Everything here is synchronous and free of I/O; discovery and parsing of
//! the document happen behind the `ConfigLoader` port.

pub mod defaults;
pub mod document;
pub mod flags;
pub mod model;
pub mod validator;

pub use defaults::{DERIVATION_RULES, DefaultResolver, DerivationRule, Resolution};
pub use document::{CONFIG_FILE_NAMES, ConfigDocument, DEFAULT_CONFIG_FILE};
pub use flags::{Flag, FlagMerger, FlagOverrides};
pub use model::*;
pub use validator::ConfigValidator;
