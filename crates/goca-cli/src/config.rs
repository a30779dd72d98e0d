//! Tool preferences.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns it; the core crate never sees it.  It is unrelated to the
//! per-project `.goca.yaml`, which is resolved by the core.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `GOCA_*` environment variables, e.g. `GOCA_SAFETY__ALWAYS_BACKUP=true`
//!    (`.env` is loaded into the environment first)
//! 3. `config.toml` in the user config directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use goca_core::application::services::safety::DEFAULT_BACKUP_DIR;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub safety: SafetyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Relative to the project root unless absolute.
    pub backup_dir: PathBuf,
    /// Back up before every overwrite, as if `--backup` were always passed.
    pub always_backup: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            safety: SafetyConfig {
                backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
                always_backup: false,
            },
        }
    }
}

impl AppConfig {
    /// Load preferences from the default user config file and environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Layer defaults, the (optional) TOML file at `path`, then `GOCA_*`.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default()).context("encoding default preferences")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("GOCA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("reading preferences from {}", path.display()))?
            .try_deserialize()
            .context("invalid preferences")
    }

    /// Path to the user preferences file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.goca.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "goca", "goca")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".goca.toml"))
    }
}
