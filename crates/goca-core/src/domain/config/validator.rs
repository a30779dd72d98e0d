use serde_json::Value;

use crate::domain::{
    config::model::GocaConfig,
    diagnostics::{Diagnostic, ValidationReport},
    value_objects::{
        AuthKind, CacheKind, CaseStyle, DatabaseKind, DiStrategy, LogFormat, LogLevel, MockTool,
        TestFramework, ValidationLibrary,
    },
};

pub const PORT_RANGE: std::ops::RangeInclusive<i64> = 0..=65535;
pub const THRESHOLD_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;
pub const LINE_LENGTH_RANGE: std::ops::RangeInclusive<i64> = 1..=500;

/// Walks every constrained field of a merged [`GocaConfig`].
///
/// Never short-circuits: one call reports every violation, in model order.
/// The result fails iff it holds at least one error.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &GocaConfig) -> ValidationReport {
        let mut report = ValidationReport::new();
        Self::check_project(config, &mut report);
        Self::check_architecture(config, &mut report);
        Self::check_database(config, &mut report);
        Self::check_generation(config, &mut report);
        Self::check_testing(config, &mut report);
        Self::check_features(config, &mut report);
        Self::check_deploy(config, &mut report);
        report
    }

    fn check_project(config: &GocaConfig, report: &mut ValidationReport) {
        let project = &config.project;

        if project.name.trim().is_empty() {
            report.push(Diagnostic::error(
                "project.name",
                "is required",
                project.name.as_str(),
            ));
        }

        if project.module.trim().is_empty() {
            report.push(Diagnostic::error(
                "project.module",
                "is required",
                project.module.as_str(),
            ));
        } else if project.module.chars().any(char::is_whitespace) {
            report.push(Diagnostic::error(
                "project.module",
                "must not contain whitespace",
                project.module.as_str(),
            ));
        }

        if project.version.is_empty() {
            report.push(Diagnostic::warning(
                "project.version",
                "is empty; generated code will carry no version",
                "",
            ));
        }
    }

    fn check_architecture(config: &GocaConfig, report: &mut ValidationReport) {
        let arch = &config.architecture;
        check_enum(report, "architecture.di.type", &arch.di.kind, DiStrategy::VALUES);

        let naming = [
            ("architecture.naming.entities", &arch.naming.entities),
            ("architecture.naming.fields", &arch.naming.fields),
            ("architecture.naming.files", &arch.naming.files),
            ("architecture.naming.packages", &arch.naming.packages),
            ("architecture.naming.constants", &arch.naming.constants),
        ];
        for (field, raw) in naming {
            check_enum(report, field, raw, CaseStyle::VALUES);
        }
    }

    fn check_database(config: &GocaConfig, report: &mut ValidationReport) {
        let db = &config.database;
        check_enum(report, "database.type", &db.kind, DatabaseKind::VALUES);

        if !PORT_RANGE.contains(&db.port) {
            report.push(Diagnostic::error(
                "database.port",
                "must be between 0 and 65535",
                db.port,
            ));
        }

        if db.connection.max_idle > db.connection.max_open {
            report.push(Diagnostic::warning(
                "database.connection.max_idle",
                format!(
                    "exceeds max_open ({}); the pool will never keep that many idle",
                    db.connection.max_open
                ),
                db.connection.max_idle,
            ));
        }
    }

    fn check_generation(config: &GocaConfig, report: &mut ValidationReport) {
        let generation = &config.generation;
        check_enum(
            report,
            "generation.validation.library",
            &generation.validation.library,
            ValidationLibrary::VALUES,
        );

        let line_length = generation.style.line_length;
        if !LINE_LENGTH_RANGE.contains(&line_length) {
            report.push(Diagnostic::error(
                "generation.style.line_length",
                "must be between 1 and 500",
                line_length,
            ));
        }
    }

    fn check_testing(config: &GocaConfig, report: &mut ValidationReport) {
        let testing = &config.testing;
        check_enum(report, "testing.framework", &testing.framework, TestFramework::VALUES);

        // NaN fails `contains` as well.
        let threshold = testing.coverage.threshold;
        if !THRESHOLD_RANGE.contains(&threshold) {
            report.push(Diagnostic::error(
                "testing.coverage.threshold",
                "must be between 0 and 100",
                serde_json::Number::from_f64(threshold).map_or(Value::Null, Value::Number),
            ));
        }

        check_enum(report, "testing.mocks.tool", &testing.mocks.tool, MockTool::VALUES);

        if testing.mocks.enabled && !testing.enabled {
            report.push(Diagnostic::warning(
                "testing.mocks.enabled",
                "mocks are enabled but testing is disabled",
                true,
            ));
        }
    }

    fn check_features(config: &GocaConfig, report: &mut ValidationReport) {
        let features = &config.features;
        check_enum(report, "features.auth.type", &features.auth.kind, AuthKind::VALUES);
        check_enum(report, "features.cache.type", &features.cache.kind, CacheKind::VALUES);
        check_enum(report, "features.logging.level", &features.logging.level, LogLevel::VALUES);
        check_enum(report, "features.logging.format", &features.logging.format, LogFormat::VALUES);
    }

    /// Deploy settings are opaque; only presence is checked.
    fn check_deploy(config: &GocaConfig, report: &mut ValidationReport) {
        for (key, value) in &config.deploy {
            if value.is_null() {
                report.push(Diagnostic::warning(
                    format!("deploy.{key}"),
                    "is present but has no value",
                    Value::Null,
                ));
            }
        }
    }
}

/// Empty means "not provided" and is legal; anything else must match exactly.
fn check_enum(report: &mut ValidationReport, field: &str, raw: &str, values: &[&str]) {
    if !raw.is_empty() && !values.contains(&raw) {
        report.push(Diagnostic::error(
            field,
            format!("must be one of: {}", values.join(", ")),
            raw,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        config::{ConfigDocument, DefaultResolver},
        diagnostics::Severity,
    };

    fn valid_config() -> GocaConfig {
        let doc: ConfigDocument = serde_json::from_value(serde_json::json!({
            "project": { "name": "shop", "module": "github.com/acme/shop" }
        }))
        .unwrap();
        DefaultResolver::resolve(&doc).into_config()
    }

    fn errors_for(report: &ValidationReport, field: &str) -> usize {
        report.for_field(field).filter(|d| d.is_error()).count()
    }

    #[test]
    fn resolved_defaults_are_valid() {
        let report = ConfigValidator::validate(&valid_config());
        assert!(report.is_valid(), "{report:?}");
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn name_and_module_are_required() {
        let mut cfg = valid_config();
        cfg.project.name.clear();
        let report = ConfigValidator::validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(errors_for(&report, "project.name"), 1);

        let mut cfg = valid_config();
        cfg.project.module.clear();
        let report = ConfigValidator::validate(&cfg);
        assert_eq!(errors_for(&report, "project.module"), 1);
    }

    #[test]
    fn module_with_whitespace_is_rejected() {
        let mut cfg = valid_config();
        cfg.project.module = "github.com/acme/my shop".into();
        let report = ConfigValidator::validate(&cfg);
        assert_eq!(errors_for(&report, "project.module"), 1);
    }

    #[test]
    fn enum_closure_for_database_type() {
        for value in DatabaseKind::VALUES.iter().copied().chain([""]) {
            let mut cfg = valid_config();
            cfg.database.kind = value.into();
            assert!(ConfigValidator::validate(&cfg).is_valid(), "{value} should pass");
        }
        for value in ["Postgres", "oracle", "MYSQL"] {
            let mut cfg = valid_config();
            cfg.database.kind = value.into();
            let report = ConfigValidator::validate(&cfg);
            assert_eq!(errors_for(&report, "database.type"), 1, "{value} should fail");
        }
    }

    #[test]
    fn enum_closure_for_naming_and_testing() {
        for value in CaseStyle::VALUES {
            let mut cfg = valid_config();
            cfg.architecture.naming.files = (*value).into();
            assert!(ConfigValidator::validate(&cfg).is_valid());
        }
        for value in TestFramework::VALUES {
            let mut cfg = valid_config();
            cfg.testing.framework = (*value).into();
            assert!(ConfigValidator::validate(&cfg).is_valid());
        }

        let mut cfg = valid_config();
        cfg.architecture.naming.files = "Snake_Case".into();
        cfg.testing.framework = "jest".into();
        cfg.features.auth.kind = "saml".into();
        cfg.features.cache.kind = "Redis".into();
        let report = ConfigValidator::validate(&cfg);
        assert_eq!(report.error_count(), 4);
    }

    #[test]
    fn port_bounds() {
        for (port, ok) in [(-1, false), (0, true), (5432, true), (65535, true), (65536, false)] {
            let mut cfg = valid_config();
            cfg.database.port = port;
            assert_eq!(ConfigValidator::validate(&cfg).is_valid(), ok, "port {port}");
        }
    }

    #[test]
    fn threshold_bounds() {
        for (threshold, ok) in [
            (-0.1, false),
            (0.0, true),
            (80.0, true),
            (100.0, true),
            (100.5, false),
            (f64::NAN, false),
        ] {
            let mut cfg = valid_config();
            cfg.testing.coverage.threshold = threshold;
            assert_eq!(ConfigValidator::validate(&cfg).is_valid(), ok, "threshold {threshold}");
        }
    }

    #[test]
    fn threshold_150_is_exactly_one_error() {
        let mut cfg = valid_config();
        cfg.testing.coverage.threshold = 150.0;
        let report = ConfigValidator::validate(&cfg);
        assert_eq!(report.error_count(), 1);
        let err = report.errors().next().unwrap();
        assert_eq!(err.field, "testing.coverage.threshold");
        assert_eq!(err.value, serde_json::json!(150.0));
    }

    #[test]
    fn line_length_bounds() {
        let mut cfg = valid_config();
        cfg.generation.style.line_length = 0;
        assert_eq!(
            errors_for(&ConfigValidator::validate(&cfg), "generation.style.line_length"),
            1
        );
    }

    #[test]
    fn collects_every_violation() {
        let mut cfg = valid_config();
        cfg.project.name.clear();
        cfg.project.module.clear();
        cfg.database.port = 70000;
        cfg.testing.coverage.threshold = 150.0;
        cfg.architecture.di.kind = "spring".into();
        let report = ConfigValidator::validate(&cfg);
        assert_eq!(report.error_count(), 5);
        let fields: Vec<_> = report.errors().map(|d| d.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "project.name",
                "project.module",
                "architecture.di.type",
                "database.port",
                "testing.coverage.threshold"
            ]
        );
    }

    #[test]
    fn warnings_do_not_fail_validation() {
        let mut cfg = valid_config();
        cfg.project.version.clear();
        cfg.database.connection.max_idle = 50;
        cfg.testing.enabled = false;
        cfg.deploy.insert("docker".into(), Value::Null);
        let report = ConfigValidator::validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warning_count(), 4);
        assert!(report.diagnostics().iter().all(|d| d.severity == Severity::Warning));
    }
}
