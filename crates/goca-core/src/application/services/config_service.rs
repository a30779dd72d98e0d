//! Configuration Service - runs the resolution pipeline for one invocation.
//!
//! 1. Load (discover + parse) the project document
//! 2. Fill static, then derived defaults
//! 3. Overlay command-line flags
//! 4. Validate

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    application::{
        ports::{ConfigLoader, LoadedDocument},
        services::safety::SafetyCoordinator,
    },
    domain::{
        ConfigDocument, ConfigValidator, DefaultResolver, DomainError, Flag, FlagMerger,
        FlagOverrides, GocaConfig, ValidationReport, config::DEFAULT_CONFIG_FILE,
    },
    error::{Context, GocaResult},
};

/// Where the document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No document found; defaults and flags only.
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Read-only view of a fully merged configuration.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    config: GocaConfig,
    report: ValidationReport,
    source: ConfigSource,
    /// Fields filled by a derivation rule rather than the file or a flag.
    derived: Vec<&'static str>,
}

impl ResolvedConfig {
    pub fn config(&self) -> &GocaConfig {
        &self.config
    }

    /// Every diagnostic: derived-default warnings first, then validation.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    pub fn derived_fields(&self) -> &[&'static str] {
        &self.derived
    }

    /// The model as a document, derived fields left out.
    pub fn to_document(&self) -> GocaResult<ConfigDocument> {
        ConfigDocument::from_config(&self.config, self.derived.iter().copied())
            .context("building configuration document")
    }

    /// Any setting by dotted path, document spelling.
    pub fn get(&self, path: &str) -> Option<Value> {
        self.config.get(path)
    }

    /// Flag if supplied, otherwise the resolved (file or default) value.
    ///
    /// ```rust,ignore
    /// let db = resolved.effective(&flags.database, |c| &c.database.kind);
    /// ```
    pub fn effective<T, F>(&self, flag: &Flag<T>, get: F) -> T
    where
        T: Clone,
        F: FnOnce(&GocaConfig) -> &T,
    {
        flag.resolve(get(&self.config))
    }

    pub fn into_config(self) -> GocaConfig {
        self.config
    }
}

pub struct ConfigService {
    loader: Box<dyn ConfigLoader>,
}

impl ConfigService {
    pub fn new(loader: Box<dyn ConfigLoader>) -> Self {
        Self { loader }
    }

    /// Run the whole pipeline; any error diagnostic fails with the full report.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn resolve(
        &self,
        dir: &Path,
        explicit_file: Option<&Path>,
        flags: &FlagOverrides,
    ) -> GocaResult<ResolvedConfig> {
        let resolved = self.inspect(dir, explicit_file, flags)?;
        if !resolved.report.is_valid() {
            debug!(errors = resolved.report.error_count(), "validation failed");
            return Err(DomainError::ValidationFailed {
                report: resolved.report,
            }
            .into());
        }
        Ok(resolved)
    }

    /// Same pipeline, but validation errors are returned in the report.
    ///
    /// Parse failures still abort.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn inspect(
        &self,
        dir: &Path,
        explicit_file: Option<&Path>,
        flags: &FlagOverrides,
    ) -> GocaResult<ResolvedConfig> {
        let loaded = match explicit_file {
            Some(path) => Some(self.loader.load_file(&Self::within(dir, path))?),
            None => self.loader.load(dir)?,
        };

        let (document, source) = match loaded {
            Some(LoadedDocument { path, document }) => (document, ConfigSource::File(path)),
            None => (ConfigDocument::default(), ConfigSource::Defaults),
        };
        debug!(%source, "configuration source");

        let mut resolution = DefaultResolver::resolve(&document);
        let overridden = FlagMerger::merge(&mut resolution, flags);
        debug!(?overridden, derived = resolution.derived().len(), "defaults and flags applied");

        let mut report = ValidationReport::new();
        report.extend(resolution.warnings());
        let derived = resolution.derived().keys().copied().collect();
        let config = resolution.into_config();
        report.extend(ConfigValidator::validate(&config).diagnostics().iter().cloned());

        Ok(ResolvedConfig {
            config,
            report,
            source,
            derived,
        })
    }

    /// The document path this directory would use.
    pub fn config_path(&self, dir: &Path) -> Option<PathBuf> {
        self.loader.discover(dir)
    }

    /// Persist the resolved configuration as `.goca.yaml` at the
    /// coordinator's root.
    ///
    /// Derived fields are not written. Goes through the Safety Coordinator
    /// like any generated file.
    #[instrument(skip_all)]
    pub fn save(
        &self,
        resolved: &ResolvedConfig,
        safety: &mut SafetyCoordinator,
    ) -> GocaResult<PathBuf> {
        let content = self.loader.serialize(&resolved.to_document()?)?;
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        safety.write_file(&path, &content)?;
        Ok(safety.options().root.join(path))
    }

    fn within(dir: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        application::{
            ApplicationError,
            services::{safety::SafetyOptions, testing::FakeFilesystem},
        },
        error::GocaError,
    };

    /// Loader that serves one fixed document, or nothing.
    struct StubLoader(Option<serde_json::Value>);

    impl ConfigLoader for StubLoader {
        fn discover(&self, dir: &Path) -> Option<PathBuf> {
            self.0.as_ref().map(|_| dir.join(".goca.yaml"))
        }

        fn load(&self, dir: &Path) -> GocaResult<Option<LoadedDocument>> {
            Ok(self.0.clone().map(|value| LoadedDocument {
                path: dir.join(".goca.yaml"),
                document: serde_json::from_value(value).unwrap(),
            }))
        }

        fn load_file(&self, path: &Path) -> GocaResult<LoadedDocument> {
            match &self.0 {
                Some(value) => Ok(LoadedDocument {
                    path: path.to_path_buf(),
                    document: serde_json::from_value(value.clone()).unwrap(),
                }),
                None => Err(ApplicationError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
                .into()),
            }
        }

        fn serialize(&self, document: &ConfigDocument) -> GocaResult<String> {
            Ok(serde_json::to_string(document).unwrap())
        }
    }

    fn service(doc: Option<serde_json::Value>) -> ConfigService {
        ConfigService::new(Box::new(StubLoader(doc)))
    }

    fn valid_doc() -> serde_json::Value {
        serde_json::json!({ "project": { "name": "shop", "module": "github.com/acme/shop" } })
    }

    #[test]
    fn missing_document_uses_defaults() {
        let flags = FlagOverrides {
            project_name: Flag::Value("shop".into()),
            module: Flag::Value("github.com/acme/shop".into()),
            ..Default::default()
        };
        let resolved = service(None).resolve(Path::new("/p"), None, &flags).unwrap();
        assert_eq!(resolved.source(), &ConfigSource::Defaults);
        assert_eq!(resolved.get("database.type"), Some(serde_json::json!("postgres")));
    }

    #[test]
    fn validation_failure_carries_every_diagnostic() {
        let doc = serde_json::json!({
            "database": { "port": 70000 },
            "testing": { "coverage": { "threshold": 150 } }
        });
        let err = service(Some(doc))
            .resolve(Path::new("/p"), None, &FlagOverrides::default())
            .unwrap_err();

        let report = err.report().expect("validation report");
        let fields: Vec<_> = report.errors().map(|d| d.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "project.name",
                "project.module",
                "database.port",
                "testing.coverage.threshold"
            ]
        );
    }

    #[test]
    fn inspect_reports_without_failing() {
        let resolved = service(None)
            .inspect(Path::new("/p"), None, &FlagOverrides::default())
            .unwrap();
        assert!(!resolved.report().is_valid());
    }

    #[test]
    fn warnings_precede_validation_diagnostics() {
        let mut doc = valid_doc();
        doc["project"]["version"] = serde_json::json!("");
        let resolved = service(Some(doc))
            .resolve(Path::new("/p"), None, &FlagOverrides::default())
            .unwrap();
        let fields: Vec<_> = resolved
            .report()
            .diagnostics()
            .iter()
            .map(|d| d.field.as_str())
            .collect();
        assert_eq!(fields, ["database.port", "project.version"]);
    }

    #[test]
    fn mysql_file_postgres_flag() {
        let mut doc = valid_doc();
        doc["database"] = serde_json::json!({ "type": "mysql" });
        let flags = FlagOverrides {
            database: Flag::Value("postgres".into()),
            ..Default::default()
        };
        let resolved = service(Some(doc)).resolve(Path::new("/p"), None, &flags).unwrap();
        assert_eq!(resolved.config().database.kind, "postgres");
        assert_eq!(resolved.effective(&flags.database, |c| &c.database.kind), "postgres");
        assert_eq!(
            resolved.effective(&Flag::Unset, |c| &c.database.port),
            5432
        );
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let err = service(None)
            .resolve(
                Path::new("/p"),
                Some(Path::new("custom.yaml")),
                &FlagOverrides::default(),
            )
            .unwrap_err();
        match err {
            GocaError::Application(ApplicationError::ConfigNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/p/custom.yaml"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn save_goes_through_safety() {
        let fs = Arc::new(FakeFilesystem::with_files([("/p/.goca.yaml", "old")]));
        let svc = service(Some(valid_doc()));
        let resolved = svc
            .resolve(Path::new("/p"), None, &FlagOverrides::default())
            .unwrap();

        let mut safety = SafetyCoordinator::new(fs.clone(), SafetyOptions::new("/p"));
        assert!(svc.save(&resolved, &mut safety).is_err());
        assert_eq!(fs.read("/p/.goca.yaml").as_deref(), Some("old"));

        let mut safety = SafetyCoordinator::new(fs.clone(), SafetyOptions::new("/p").force(true));
        let path = svc.save(&resolved, &mut safety).unwrap();
        assert_eq!(path, PathBuf::from("/p/.goca.yaml"));
        assert!(fs.read("/p/.goca.yaml").unwrap().contains("github.com/acme/shop"));
    }

    #[test]
    fn saved_document_leaves_derived_fields_out() {
        let flags = FlagOverrides {
            database: Flag::Value("mysql".into()),
            ..Default::default()
        };
        let svc = service(Some(valid_doc()));
        let resolved = svc.resolve(Path::new("/p"), None, &flags).unwrap();
        assert_eq!(resolved.derived_fields(), ["database.port"]);

        let document = resolved.to_document().unwrap();
        assert!(!document.sets_database_port());
        assert_eq!(
            document.database.and_then(|d| d.kind).as_deref(),
            Some("mysql")
        );
    }

    #[test]
    fn flagged_port_is_saved() {
        let flags = FlagOverrides {
            database_port: Flag::Value(3307),
            ..Default::default()
        };
        let resolved = service(Some(valid_doc()))
            .resolve(Path::new("/p"), None, &flags)
            .unwrap();
        assert!(resolved.derived_fields().is_empty());
        assert!(resolved.to_document().unwrap().sets_database_port());
    }
}
