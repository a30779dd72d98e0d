//! `goca init`: resolve flags over defaults and save `.goca.yaml`.

use std::sync::Arc;

use goca_adapters::LocalFilesystem;
use goca_core::application::SafetyCoordinator;
use tracing::{info, instrument};

use super::{config_service, report_warnings, report_writes, safety_options};
use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    prefs: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = config_service();
    let resolved = service.resolve(&global.dir, global.config.as_deref(), &args.to_flags())?;
    report_warnings(&resolved, &output)?;

    let mut safety = SafetyCoordinator::new(
        Arc::new(LocalFilesystem::new()),
        safety_options(&global, &prefs, &args.write),
    );
    let path = service.save(&resolved, &mut safety)?;
    info!(path = %path.display(), dry_run = safety.is_dry_run(), "configuration saved");

    report_writes(&safety.summary(), &output)?;
    if !safety.is_dry_run() && !output.is_json() {
        output.info(&format!(
            "Next: goca entity <Name> --fields name:string  (module {})",
            resolved.config().project.module
        ))?;
    }
    Ok(())
}
