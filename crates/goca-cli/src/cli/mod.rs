//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};
use goca_core::domain::{Flag, FlagOverrides};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "goca",
    bin_name = "goca",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Clean architecture code generator for Go",
    long_about = "goca resolves a layered project configuration (.goca.yaml, \
                  defaults, flags) and generates clean architecture code \
                  without ever silently overwriting your files.",
    after_help = "EXAMPLES:\n\
        \x20 goca init shop --module github.com/acme/shop --database mysql\n\
        \x20 goca entity Product --fields name:string,price:float64 --dry-run\n\
        \x20 goca config validate\n\
        \x20 goca completions bash > /usr/share/bash-completion/completions/goca",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a `.goca.yaml` for a new project.
    #[command(
        about = "Initialise a project configuration",
        after_help = "EXAMPLES:\n\
            \x20 goca init shop --module github.com/acme/shop\n\
            \x20 goca init shop --module github.com/acme/shop --database mongodb --auth\n\
            \x20 goca init shop --module github.com/acme/shop --force --backup"
    )]
    Init(InitArgs),

    /// Generate a domain entity.
    #[command(
        visible_alias = "e",
        about = "Generate a domain entity",
        after_help = "EXAMPLES:\n\
            \x20 goca entity User --fields name:string,email:string\n\
            \x20 goca entity Order --soft-delete --timestamps=false --dry-run\n\
            \x20 goca entity Product --database postgres --force --backup"
    )]
    Entity(EntityArgs),

    /// Inspect the resolved configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 goca config show --format json\n\
            \x20 goca config get database.port\n\
            \x20 goca config validate\n\
            \x20 goca config path"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 goca completions bash > ~/.local/share/bash-completion/completions/goca\n\
            \x20 goca completions zsh  > ~/.zfunc/_goca\n\
            \x20 goca completions fish > ~/.config/fish/completions/goca.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared argument groups ────────────────────────────────────────────────────

/// How generated files reach the disk.
#[derive(Debug, Clone, Default, Args)]
pub struct WriteArgs {
    /// Preview what would be written without touching the filesystem.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Overwrite existing files.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Copy files into the backup directory before overwriting them.
    #[arg(long = "backup", help = "Back up files before overwriting")]
    pub backup: bool,
}

/// Per-invocation overrides of `.goca.yaml` settings.
///
/// Boolean overrides accept an optional value so that a setting can be
/// turned off explicitly: `--timestamps=false`.
#[derive(Debug, Clone, Default, Args)]
pub struct OverrideArgs {
    #[arg(long = "project-name", value_name = "NAME", help = "Project name")]
    pub project_name: Option<String>,

    #[arg(long, value_name = "MODULE", help = "Go module path")]
    pub module: Option<String>,

    #[arg(long, value_name = "TYPE", help = "Database type (postgres, mysql, mongodb, ...)")]
    pub database: Option<String>,

    #[arg(long = "database-port", value_name = "PORT", help = "Database port")]
    pub database_port: Option<i64>,

    #[arg(long, value_name = "STRATEGY", help = "Dependency injection (manual, wire)")]
    pub di: Option<String>,

    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true",
          value_name = "BOOL", help = "Generate input validation")]
    pub validation: Option<bool>,

    #[arg(long = "business-rules", num_args = 0..=1, require_equals = true,
          default_missing_value = "true", value_name = "BOOL", help = "Generate business rules")]
    pub business_rules: Option<bool>,

    #[arg(long = "soft-delete", num_args = 0..=1, require_equals = true,
          default_missing_value = "true", value_name = "BOOL", help = "Soft delete support")]
    pub soft_delete: Option<bool>,

    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true",
          value_name = "BOOL", help = "CreatedAt / UpdatedAt timestamps")]
    pub timestamps: Option<bool>,

    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true",
          value_name = "BOOL", help = "UUID primary keys")]
    pub uuid: Option<bool>,

    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true",
          value_name = "BOOL", help = "Enable authentication")]
    pub auth: Option<bool>,

    #[arg(long = "auth-type", value_name = "TYPE", help = "Authentication type (jwt, oauth2, session, basic)")]
    pub auth_type: Option<String>,

    #[arg(long = "cache-type", value_name = "TYPE", help = "Cache backend (redis, memcached, memory)")]
    pub cache_type: Option<String>,

    #[arg(long = "rate-limit", num_args = 0..=1, require_equals = true,
          default_missing_value = "true", value_name = "BOOL", help = "API rate limiting")]
    pub rate_limit: Option<bool>,

    #[arg(long = "test-framework", value_name = "NAME", help = "Test framework (testify, ginkgo, builtin)")]
    pub test_framework: Option<String>,

    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true",
          value_name = "BOOL", help = "Swagger documentation")]
    pub swagger: Option<bool>,

    #[arg(long = "templates-dir", value_name = "DIR", help = "Template override directory")]
    pub templates_dir: Option<String>,
}

impl OverrideArgs {
    /// Only flags actually passed become `Flag::Value`.
    pub fn to_flags(&self) -> FlagOverrides {
        FlagOverrides {
            project_name: Flag::from(self.project_name.clone()),
            module: Flag::from(self.module.clone()),
            database: Flag::from(self.database.clone()),
            database_port: Flag::from(self.database_port),
            di: Flag::from(self.di.clone()),
            validation: Flag::from(self.validation),
            business_rules: Flag::from(self.business_rules),
            soft_delete: Flag::from(self.soft_delete),
            timestamps: Flag::from(self.timestamps),
            uuid: Flag::from(self.uuid),
            auth: Flag::from(self.auth),
            auth_type: Flag::from(self.auth_type.clone()),
            cache_type: Flag::from(self.cache_type.clone()),
            rate_limit: Flag::from(self.rate_limit),
            test_framework: Flag::from(self.test_framework.clone()),
            swagger: Flag::from(self.swagger),
            templates_dir: Flag::from(self.templates_dir.clone()),
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `goca init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name; takes precedence over `--project-name`.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    #[command(flatten)]
    pub write: WriteArgs,
}

impl InitArgs {
    pub fn to_flags(&self) -> FlagOverrides {
        FlagOverrides {
            project_name: Flag::Value(self.name.clone()),
            ..self.overrides.to_flags()
        }
    }
}

// ── entity ────────────────────────────────────────────────────────────────────

/// Arguments for `goca entity`.
#[derive(Debug, Args)]
pub struct EntityArgs {
    /// Entity name, e.g. `Product` or `order_item`.
    #[arg(value_name = "NAME", help = "Entity name")]
    pub name: String,

    /// Comma-separated `name:type` pairs.
    #[arg(
        long,
        value_name = "FIELDS",
        default_value = "",
        help = "Fields, e.g. name:string,price:float64"
    )]
    pub fields: String,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    #[command(flatten)]
    pub write: WriteArgs,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `goca config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the fully resolved configuration.
    Show {
        #[arg(long, value_enum, default_value = "yaml", help = "Document format")]
        format: DocumentFormat,
    },
    /// Print one resolved value.
    Get {
        /// Dotted key path, e.g. `database.port`.
        key: String,
    },
    /// Report every diagnostic; fails if any is an error.
    Validate,
    /// Print the path of the configuration file in use.
    Path,
}

/// Serialization for `goca config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `goca completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
