//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `goca-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{ConfigDocument, TemplateData};
use crate::error::GocaResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `goca_adapters::filesystem::LocalFilesystem` (production)
/// - `goca_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `write_file` replaces the whole file; implementations on real disks
///   write to a sibling temp file and rename
/// - `copy_file` must have landed when it returns
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GocaResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> GocaResult<()>;

    fn read_to_string(&self, path: &Path) -> GocaResult<String>;

    /// Copy a file, replacing any existing destination.
    fn copy_file(&self, from: &Path, to: &Path) -> GocaResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Regular files directly inside `dir`, sorted. Not recursive.
    fn list_files(&self, dir: &Path) -> GocaResult<Vec<PathBuf>>;
}

/// A parsed configuration document and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub document: ConfigDocument,
}

/// Port for discovering and parsing the project configuration document.
///
/// Implemented by:
/// - `goca_adapters::config_loader::YamlConfigLoader`
pub trait ConfigLoader: Send + Sync {
    /// First existing candidate file in `dir`, in discovery order.
    fn discover(&self, dir: &Path) -> Option<PathBuf>;

    /// Discover and parse. A missing document is `Ok(None)`, not an error.
    fn load(&self, dir: &Path) -> GocaResult<Option<LoadedDocument>>;

    /// Parse an explicitly named file. A missing file is an error.
    fn load_file(&self, path: &Path) -> GocaResult<LoadedDocument>;

    /// Render a document as text. Unset fields are left out.
    fn serialize(&self, document: &ConfigDocument) -> GocaResult<String>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `goca_adapters::renderer::JinjaRenderer`
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` against `data`.
    ///
    /// Must fail on any undefined key or helper instead of rendering it empty.
    fn render(&self, template: &str, data: &TemplateData) -> GocaResult<String> {
        self.render_named("<inline>", template, data)
    }

    /// Same as [`render`](Self::render), with `name` reported in errors.
    fn render_named(&self, name: &str, template: &str, data: &TemplateData) -> GocaResult<String>;
}
