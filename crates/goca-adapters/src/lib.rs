//! Infrastructure adapters for goca.
//!
//! Implements the ports defined in `goca_core::application::ports`: the
//! local and in-memory filesystems, the YAML configuration loader and the
//! Jinja template renderer. All third-party I/O dependencies live here.

pub mod builtin_templates;
pub mod config_loader;
pub mod filesystem;
pub mod renderer;

pub use config_loader::YamlConfigLoader;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::JinjaRenderer;
