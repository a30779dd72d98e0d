//! `goca config`: inspect the resolved project configuration.

use goca_adapters::YamlConfigLoader;
use goca_core::{
    application::{ConfigLoader, ResolvedConfig},
    domain::{ConfigDocument, DomainError, FlagOverrides},
    error::GocaError,
};
use serde_json::{Value, json};

use super::config_service;
use crate::{
    cli::{ConfigCommands, DocumentFormat, GlobalArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Show { format } => {
            let resolved = inspect(&global)?;
            report_diagnostics(&resolved, &output)?;
            output.data(&render_document(&resolved, format)?)?;
        }

        ConfigCommands::Get { key } => {
            let resolved = inspect(&global)?;
            report_diagnostics(&resolved, &output)?;
            let value = resolved
                .get(&key)
                .ok_or_else(|| CliError::UnknownKey { key: key.clone() })?;
            output.data(&render_value(&value))?;
        }

        ConfigCommands::Validate => validate(&global, &output)?,

        ConfigCommands::Path => {
            let path = match &global.config {
                Some(explicit) if explicit.is_absolute() => Some(explicit.clone()),
                Some(explicit) => Some(global.dir.join(explicit)),
                None => config_service().config_path(&global.dir),
            };
            match path {
                Some(path) if path.is_file() => output.data(&path.display().to_string())?,
                _ => {
                    return Err(CliError::NoConfigFile {
                        dir: global.dir.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Pipeline without failing on validation errors; parse errors still abort.
fn inspect(global: &GlobalArgs) -> CliResult<ResolvedConfig> {
    Ok(config_service().inspect(
        &global.dir,
        global.config.as_deref(),
        &FlagOverrides::default(),
    )?)
}

/// Diagnostics go to stderr so stdout stays a clean value.
fn report_diagnostics(resolved: &ResolvedConfig, output: &OutputManager) -> CliResult<()> {
    for diagnostic in resolved.report().diagnostics() {
        output.diagnostic(diagnostic)?;
    }
    Ok(())
}

fn validate(global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let resolved = inspect(global)?;
    let report = resolved.report();

    if output.is_json() {
        let value = json!({
            "source": resolved.source().to_string(),
            "valid": report.is_valid(),
            "diagnostics": report.diagnostics(),
        });
        output.data(&serde_json::to_string_pretty(&value)?)?;
    } else if report.is_valid() {
        for diagnostic in report.diagnostics() {
            output.diagnostic(diagnostic)?;
        }
        output.success(&format!(
            "Configuration is valid ({}, {} warning(s))",
            resolved.source(),
            report.warning_count()
        ))?;
    }

    if report.is_valid() {
        Ok(())
    } else {
        Err(GocaError::from(DomainError::ValidationFailed {
            report: report.clone(),
        })
        .into())
    }
}

fn render_document(resolved: &ResolvedConfig, format: DocumentFormat) -> CliResult<String> {
    match format {
        DocumentFormat::Yaml => {
            let document = ConfigDocument::from_config(resolved.config(), [])?;
            Ok(YamlConfigLoader::new().serialize(&document)?)
        }
        DocumentFormat::Json => Ok(serde_json::to_string_pretty(resolved.config())?),
    }
}

/// Scalars print bare; sections print as JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
