//! Invocation-scoped generation context.
//!
//! Bundles everything an artifact generator needs after resolution: the
//! resolved configuration, the renderer, the name-conflict detector and the
//! safety coordinator. Constructed once per command, never shared.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{
        ports::{Filesystem, TemplateRenderer},
        services::{
            config_service::ResolvedConfig,
            name_conflict::NameConflictDetector,
            safety::{DryRunSummary, PlannedWrite, SafetyCoordinator, SafetyOptions},
        },
    },
    domain::{GocaConfig, TemplateData, validate_entity_name},
    error::GocaResult,
};

pub struct GenerationContext {
    resolved: ResolvedConfig,
    filesystem: Arc<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    detector: NameConflictDetector,
    safety: SafetyCoordinator,
}

impl GenerationContext {
    pub fn new(
        resolved: ResolvedConfig,
        filesystem: Arc<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        options: SafetyOptions,
    ) -> Self {
        let domain_dir = options
            .root
            .join(&resolved.config().architecture.layers.domain.directory);
        let detector = NameConflictDetector::new(filesystem.clone(), domain_dir);
        let safety = SafetyCoordinator::new(filesystem.clone(), options);

        Self {
            resolved,
            filesystem,
            renderer,
            detector,
            safety,
        }
    }

    pub fn config(&self) -> &GocaConfig {
        self.resolved.config()
    }

    pub fn resolved(&self) -> &ResolvedConfig {
        &self.resolved
    }

    pub fn root(&self) -> &Path {
        &self.safety.options().root
    }

    /// Template data seeded from the resolved configuration.
    pub fn template_data(&self) -> TemplateData {
        TemplateData::from_config(self.config())
    }

    pub fn render(&self, template: &str, data: &TemplateData) -> GocaResult<String> {
        self.renderer.render(template, data)
    }

    /// Render the user override `<templates.directory>/<name>` if present,
    /// otherwise `fallback`.
    #[instrument(skip(self, fallback, data))]
    pub fn render_named(
        &self,
        name: &str,
        fallback: &str,
        data: &TemplateData,
    ) -> GocaResult<String> {
        let override_path = self
            .root()
            .join(&self.config().templates.directory)
            .join(name);

        if self.filesystem.is_file(&override_path) {
            debug!(path = %override_path.display(), "using template override");
            let source = self.filesystem.read_to_string(&override_path)?;
            return self.renderer.render_named(name, &source, data);
        }
        self.renderer.render_named(name, fallback, data)
    }

    /// Name check, fresh scan of the domain directory, then a conflict check.
    pub fn ensure_unique_entity(&mut self, name: &str) -> GocaResult<()> {
        validate_entity_name(name)?;
        self.detector.scan_existing_entities()?;
        self.detector.check_name_conflict(name)
    }

    /// `<domain dir>/<file stem>.go`, relative to the project root.
    pub fn entity_path(&self, name: &str) -> PathBuf {
        let config = self.config();
        let stem = config.architecture.naming.file_stem(name);
        PathBuf::from(&config.architecture.layers.domain.directory).join(format!("{stem}.go"))
    }

    pub fn write(&mut self, path: &Path, content: &str) -> GocaResult<()> {
        self.safety.write_file(path, content)
    }

    pub fn created_files(&self) -> &[PlannedWrite] {
        self.safety.created_files()
    }

    pub fn summary(&self) -> DryRunSummary {
        self.safety.summary()
    }
}
