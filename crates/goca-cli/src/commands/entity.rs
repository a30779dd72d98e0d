//! `goca entity`: generate one domain entity through the full pipeline.
//!
//! resolve → name check → render (override or built-in) → safe write

use std::path::Path;
use std::sync::Arc;

use goca_adapters::{
    JinjaRenderer, LocalFilesystem,
    builtin_templates::{ENTITY_TEMPLATE, ENTITY_TEMPLATE_NAME},
};
use goca_core::{
    application::GenerationContext,
    domain::{FieldSpec, naming},
    error::GocaError,
};
use tracing::{debug, instrument};

use super::{report_warnings, report_writes, resolve, safety_options};
use crate::{
    cli::{EntityArgs, GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(entity = %args.name))]
pub fn execute(
    args: EntityArgs,
    global: GlobalArgs,
    prefs: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let fields = FieldSpec::parse_list(&args.fields).map_err(GocaError::from)?;

    let resolved = resolve(&global, &args.overrides.to_flags())?;
    report_warnings(&resolved, &output)?;

    let mut ctx = GenerationContext::new(
        resolved,
        Arc::new(LocalFilesystem::new()),
        Box::new(JinjaRenderer::new()),
        safety_options(&global, &prefs, &args.write),
    );
    ctx.ensure_unique_entity(&args.name)?;

    let package = package_name(&ctx.config().architecture.layers.domain.directory);
    let data = ctx
        .template_data()
        .package(package)
        .entity(&args.name)
        .fields(fields);
    let content = ctx.render_named(ENTITY_TEMPLATE_NAME, ENTITY_TEMPLATE, &data)?;

    let path = ctx.entity_path(&args.name);
    debug!(path = %path.display(), bytes = content.len(), "entity rendered");
    ctx.write(&path, &content)?;

    report_writes(&ctx.summary(), &output)
}

/// Go package of the domain layer: the last directory component.
fn package_name(directory: &str) -> String {
    Path::new(directory)
        .file_name()
        .map(|name| naming::to_lower_case(&name.to_string_lossy()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "domain".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_from_directory() {
        assert_eq!(package_name("internal/domain"), "domain");
        assert_eq!(package_name("pkg/core_model"), "coremodel");
        assert_eq!(package_name("entities"), "entities");
        assert_eq!(package_name(""), "domain");
    }
}
