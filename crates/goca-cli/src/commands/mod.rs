//! Command handlers.
//!
//! Each handler translates parsed arguments into calls on the core services
//! and renders the outcome. Shared wiring lives here.

pub mod completions;
pub mod config;
pub mod entity;
pub mod init;

use goca_adapters::YamlConfigLoader;
use goca_core::{
    application::{ConfigService, DryRunSummary, ResolvedConfig, SafetyOptions},
    domain::FlagOverrides,
};
use serde_json::{Value, json};

use crate::{
    cli::{GlobalArgs, WriteArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub(crate) fn config_service() -> ConfigService {
    ConfigService::new(Box::new(YamlConfigLoader::new()))
}

/// Full pipeline for `--dir` / `--config`; fails on any validation error.
pub(crate) fn resolve(global: &GlobalArgs, flags: &FlagOverrides) -> CliResult<ResolvedConfig> {
    Ok(config_service().resolve(&global.dir, global.config.as_deref(), flags)?)
}

/// Write options: flags, plus the `safety.*` preferences.
pub(crate) fn safety_options(
    global: &GlobalArgs,
    prefs: &AppConfig,
    write: &WriteArgs,
) -> SafetyOptions {
    SafetyOptions::new(&global.dir)
        .dry_run(write.dry_run)
        .force(write.force)
        .backup(write.backup || prefs.safety.always_backup)
        .backup_dir(&prefs.safety.backup_dir)
}

/// Derived-default and advisory warnings of a successful resolution.
pub(crate) fn report_warnings(resolved: &ResolvedConfig, output: &OutputManager) -> CliResult<()> {
    for diagnostic in resolved.report().warnings() {
        output.diagnostic(diagnostic)?;
    }
    Ok(())
}

/// Machine-readable form of a write ledger.
pub(crate) fn summary_json(summary: &DryRunSummary) -> Value {
    let files: Vec<Value> = summary
        .files
        .iter()
        .map(|f| {
            json!({
                "path": f.path.display().to_string(),
                "bytes": f.bytes,
                "overwrite": f.would_overwrite,
            })
        })
        .collect();
    let conflicts: Vec<String> = summary
        .conflicts
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    json!({
        "dry_run": summary.dry_run,
        "files": files,
        "conflicts": conflicts,
        "total_bytes": summary.total_bytes,
    })
}

/// Print the ledger as JSON, as a dry-run preview, or as created paths.
pub(crate) fn report_writes(summary: &DryRunSummary, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.data(&serde_json::to_string_pretty(&summary_json(summary))?)?;
    } else if summary.dry_run {
        output.summary(summary)?;
    } else {
        for file in &summary.files {
            let verb = if file.would_overwrite { "Overwrote" } else { "Created" };
            output.success(&format!("{verb} {}", file.path.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn always_backup_preference_enables_backup() {
        let global = GlobalArgs {
            dir: PathBuf::from("/p"),
            ..GlobalArgs::default()
        };
        let mut prefs = AppConfig::default();
        prefs.safety.always_backup = true;
        prefs.safety.backup_dir = PathBuf::from("bak");

        let options = safety_options(&global, &prefs, &WriteArgs::default());
        assert!(options.backup);
        assert!(!options.force);
        assert_eq!(options.root, PathBuf::from("/p"));
        assert_eq!(options.backup_dir, PathBuf::from("bak"));
    }

    #[test]
    fn ledger_as_json() {
        let summary = DryRunSummary {
            dry_run: true,
            files: vec![goca_core::application::PlannedWrite {
                path: PathBuf::from("internal/domain/user.go"),
                bytes: 42,
                would_overwrite: false,
            }],
            conflicts: Vec::new(),
            total_bytes: 42,
        };
        let value = summary_json(&summary);
        assert_eq!(value["dry_run"], true);
        assert_eq!(value["files"][0]["path"], "internal/domain/user.go");
        assert_eq!(value["files"][0]["bytes"], 42);
        assert_eq!(value["total_bytes"], 42);
    }

    #[test]
    fn write_flags_pass_through() {
        let write = WriteArgs {
            dry_run: true,
            force: true,
            backup: false,
        };
        let options = safety_options(&GlobalArgs::default(), &AppConfig::default(), &write);
        assert!(options.dry_run);
        assert!(options.force);
        assert!(!options.backup);
    }
}
