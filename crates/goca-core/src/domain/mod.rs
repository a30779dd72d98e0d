// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for goca.
//!
//! Pure configuration logic: the model, the resolution pipeline, diagnostics,
//! naming helpers and template data. All I/O (reading the document, writing
//! generated files, rendering) sits behind ports in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Instrumentation belongs to application services
//! - **Value semantics**: All domain objects are Clone + PartialEq
//! - **Accumulated diagnostics**: Validation never stops at the first violation

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod naming;
pub mod template_data;
pub mod value_objects;

pub use config::{
    ConfigDocument, ConfigValidator, DefaultResolver, Flag, FlagMerger, FlagOverrides, GocaConfig,
    Resolution,
};
pub use diagnostics::{Diagnostic, Severity, ValidationReport};
pub use error::{DomainError, ErrorCategory};
pub use template_data::{FieldSpec, NON_ENTITY_STEMS, TemplateData, validate_entity_name};
pub use value_objects::{
    AuthKind, CacheKind, CaseStyle, DatabaseKind, DiStrategy, LogFormat, LogLevel, MockTool,
    TestFramework, ValidationLibrary,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn document(value: serde_json::Value) -> ConfigDocument {
        serde_json::from_value(value).unwrap()
    }

    /// Loader output → defaults → flags → validation, without any I/O.
    fn pipeline(doc: serde_json::Value, flags: &FlagOverrides) -> (GocaConfig, ValidationReport) {
        let mut resolution = DefaultResolver::resolve(&document(doc));
        FlagMerger::merge(&mut resolution, flags);

        let mut report = ValidationReport::new();
        report.extend(resolution.warnings());
        let config = resolution.into_config();
        report.extend(ConfigValidator::validate(&config).diagnostics().iter().cloned());
        (config, report)
    }

    // ========================================================================
    // Precedence
    // ========================================================================

    #[test]
    fn precedence_flag_over_file_over_default() {
        let flags = FlagOverrides {
            project_name: Flag::Value("from-flag".into()),
            test_framework: Flag::Value("ginkgo".into()),
            ..Default::default()
        };
        let (cfg, _) = pipeline(
            serde_json::json!({
                "project": { "name": "from-file", "module": "github.com/acme/app" },
                "testing": { "framework": "builtin" }
            }),
            &flags,
        );
        assert_eq!(cfg.project.name, "from-flag");
        assert_eq!(cfg.testing.framework, "ginkgo");
        assert_eq!(cfg.project.module, "github.com/acme/app");
        assert_eq!(cfg.project.license, "MIT");
    }

    #[test]
    fn flags_alone_satisfy_required_fields() {
        let flags = FlagOverrides {
            project_name: Flag::Value("shop".into()),
            module: Flag::Value("github.com/acme/shop".into()),
            ..Default::default()
        };
        let (_, report) = pipeline(serde_json::json!({}), &flags);
        assert!(report.is_valid(), "{report}");
    }

    // ========================================================================
    // Scenarios
    // ========================================================================

    #[test]
    fn mongodb_only_document() {
        let (cfg, report) = pipeline(
            serde_json::json!({
                "project": { "name": "shop", "module": "github.com/acme/shop" },
                "database": { "type": "mongodb" }
            }),
            &FlagOverrides::default(),
        );
        assert_eq!(cfg.database.port, 27017);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.for_field("database.port").count(), 1);
    }

    #[test]
    fn threshold_150_single_error() {
        let (_, report) = pipeline(
            serde_json::json!({
                "project": { "name": "shop", "module": "github.com/acme/shop" },
                "testing": { "coverage": { "threshold": 150 } }
            }),
            &FlagOverrides::default(),
        );
        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 1);
        assert_eq!(
            report.errors().next().map(|d| d.field.as_str()),
            Some("testing.coverage.threshold")
        );
    }

    #[test]
    fn empty_document_fails_only_on_required_fields() {
        let (_, report) = pipeline(serde_json::json!({}), &FlagOverrides::default());
        let fields: Vec<_> = report.errors().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, ["project.name", "project.module"]);
    }
}
