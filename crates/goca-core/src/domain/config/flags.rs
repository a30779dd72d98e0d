//! Command-line overrides and the merge that makes them win.
//!
//! Presence is carried by [`Flag`], never inferred from the value: a flag
//! passed as `""`, `false` or `0` still overwrites the configured value.

use super::defaults::Resolution;

/// A single command-line override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Flag<T> {
    /// Not passed on this invocation.
    #[default]
    Unset,
    Value(T),
}

impl<T> Flag<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Unset => None,
        }
    }

    /// Effective value: the flag if passed, otherwise `configured`.
    pub fn resolve(&self, configured: &T) -> T
    where
        T: Clone,
    {
        self.as_option().unwrap_or(configured).clone()
    }
}

impl<T> From<Option<T>> for Flag<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Value)
    }
}

/// Every override the front-end can supply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagOverrides {
    pub project_name: Flag<String>,
    pub module: Flag<String>,
    pub database: Flag<String>,
    pub database_port: Flag<i64>,
    pub di: Flag<String>,
    pub validation: Flag<bool>,
    pub business_rules: Flag<bool>,
    pub soft_delete: Flag<bool>,
    pub timestamps: Flag<bool>,
    pub uuid: Flag<bool>,
    pub auth: Flag<bool>,
    pub auth_type: Flag<String>,
    pub cache_type: Flag<String>,
    pub rate_limit: Flag<bool>,
    pub test_framework: Flag<String>,
    pub swagger: Flag<bool>,
    pub templates_dir: Flag<String>,
}

impl FlagOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Overlays [`FlagOverrides`] onto a [`Resolution`].
pub struct FlagMerger;

fn overlay<T: Clone>(
    flag: &Flag<T>,
    slot: &mut T,
    field: &'static str,
    changed: &mut Vec<&'static str>,
) {
    if let Flag::Value(v) = flag {
        *slot = v.clone();
        changed.push(field);
    }
}

impl FlagMerger {
    /// Apply every supplied flag, then re-derive whatever depended on them.
    ///
    /// Returns the dotted paths that were overridden, in application order.
    pub fn merge(resolution: &mut Resolution, flags: &FlagOverrides) -> Vec<&'static str> {
        let mut changed = Vec::new();
        let cfg = &mut resolution.config;

        overlay(&flags.project_name, &mut cfg.project.name, "project.name", &mut changed);
        overlay(&flags.module, &mut cfg.project.module, "project.module", &mut changed);
        overlay(&flags.database, &mut cfg.database.kind, "database.type", &mut changed);
        overlay(&flags.database_port, &mut cfg.database.port, "database.port", &mut changed);
        overlay(&flags.di, &mut cfg.architecture.di.kind, "architecture.di.type", &mut changed);
        overlay(
            &flags.validation,
            &mut cfg.generation.validation.enabled,
            "generation.validation.enabled",
            &mut changed,
        );
        overlay(
            &flags.business_rules,
            &mut cfg.generation.business_rules.enabled,
            "generation.business_rules.enabled",
            &mut changed,
        );
        overlay(
            &flags.soft_delete,
            &mut cfg.database.features.soft_delete,
            "database.features.soft_delete",
            &mut changed,
        );
        overlay(
            &flags.timestamps,
            &mut cfg.database.features.timestamps,
            "database.features.timestamps",
            &mut changed,
        );
        overlay(&flags.uuid, &mut cfg.database.features.uuid, "database.features.uuid", &mut changed);
        overlay(&flags.auth, &mut cfg.features.auth.enabled, "features.auth.enabled", &mut changed);
        overlay(&flags.auth_type, &mut cfg.features.auth.kind, "features.auth.type", &mut changed);
        overlay(&flags.cache_type, &mut cfg.features.cache.kind, "features.cache.type", &mut changed);
        overlay(
            &flags.rate_limit,
            &mut cfg.features.api.rate_limit,
            "features.api.rate_limit",
            &mut changed,
        );
        overlay(&flags.test_framework, &mut cfg.testing.framework, "testing.framework", &mut changed);
        overlay(
            &flags.swagger,
            &mut cfg.generation.documentation.swagger.enabled,
            "generation.documentation.swagger.enabled",
            &mut changed,
        );
        overlay(&flags.templates_dir, &mut cfg.templates.directory, "templates.directory", &mut changed);

        for field in &changed {
            resolution.mark_explicit(field);
        }
        resolution.rederive(&changed);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{ConfigDocument, DefaultResolver};

    fn resolve(doc: serde_json::Value, flags: &FlagOverrides) -> Resolution {
        let doc: ConfigDocument = serde_json::from_value(doc).unwrap();
        let mut resolution = DefaultResolver::resolve(&doc);
        FlagMerger::merge(&mut resolution, flags);
        resolution
    }

    #[test]
    fn flag_beats_file() {
        let flags = FlagOverrides {
            database: Flag::Value("postgres".into()),
            ..Default::default()
        };
        let resolution = resolve(serde_json::json!({ "database": { "type": "mysql" } }), &flags);
        assert_eq!(resolution.config().database.kind, "postgres");
    }

    #[test]
    fn changed_dependency_rederives_port() {
        let flags = FlagOverrides {
            database: Flag::Value("postgres".into()),
            ..Default::default()
        };
        let resolution = resolve(serde_json::json!({ "database": { "type": "mysql" } }), &flags);
        assert_eq!(resolution.config().database.port, 5432);
        let warnings = resolution.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].value, serde_json::json!(5432));
    }

    #[test]
    fn explicit_file_port_survives_database_flag() {
        let flags = FlagOverrides {
            database: Flag::Value("postgres".into()),
            ..Default::default()
        };
        let resolution = resolve(
            serde_json::json!({ "database": { "type": "mysql", "port": 3307 } }),
            &flags,
        );
        assert_eq!(resolution.config().database.port, 3307);
        assert!(resolution.warnings().is_empty());
    }

    #[test]
    fn port_flag_clears_derived_warning() {
        let flags = FlagOverrides {
            database_port: Flag::Value(6543),
            ..Default::default()
        };
        let resolution = resolve(serde_json::json!({ "database": { "type": "mongodb" } }), &flags);
        assert_eq!(resolution.config().database.port, 6543);
        assert!(resolution.warnings().is_empty());
    }

    #[test]
    fn zero_values_still_override() {
        let flags = FlagOverrides {
            project_name: Flag::Value(String::new()),
            rate_limit: Flag::Value(false),
            database_port: Flag::Value(0),
            ..Default::default()
        };
        let resolution = resolve(
            serde_json::json!({
                "project": { "name": "shop" },
                "database": { "port": 5432 },
                "features": { "auth": { "enabled": true } }
            }),
            &flags,
        );
        let cfg = resolution.config();
        assert_eq!(cfg.project.name, "");
        assert_eq!(cfg.database.port, 0);
        assert!(!cfg.features.api.rate_limit);
    }

    #[test]
    fn auth_flag_derives_rate_limit() {
        let flags = FlagOverrides {
            auth: Flag::Value(true),
            ..Default::default()
        };
        let resolution = resolve(serde_json::json!({}), &flags);
        assert!(resolution.config().features.api.rate_limit);
        assert!(resolution.derived().contains_key("features.api.rate_limit"));
    }

    #[test]
    fn disabling_auth_restores_file_baseline() {
        let flags = FlagOverrides {
            auth: Flag::Value(false),
            ..Default::default()
        };
        let resolution = resolve(
            serde_json::json!({ "features": { "auth": { "enabled": true } } }),
            &flags,
        );
        assert!(!resolution.config().features.api.rate_limit);
        assert!(!resolution.derived().contains_key("features.api.rate_limit"));
    }

    #[test]
    fn unset_flags_change_nothing() {
        let doc = serde_json::json!({ "database": { "type": "mysql" } });
        let with_flags = resolve(doc.clone(), &FlagOverrides::default());
        let parsed: ConfigDocument = serde_json::from_value(doc).unwrap();
        assert_eq!(with_flags, DefaultResolver::resolve(&parsed));
        assert!(FlagOverrides::default().is_empty());
    }

    #[test]
    fn merge_reports_changed_paths() {
        let flags = FlagOverrides {
            module: Flag::Value("github.com/acme/shop".into()),
            swagger: Flag::Value(true),
            ..Default::default()
        };
        let doc: ConfigDocument = ConfigDocument::default();
        let mut resolution = DefaultResolver::resolve(&doc);
        let changed = FlagMerger::merge(&mut resolution, &flags);
        assert_eq!(
            changed,
            vec!["project.module", "generation.documentation.swagger.enabled"]
        );
    }

    #[test]
    fn flag_resolve_prefers_flag() {
        let configured = "mysql".to_string();
        assert_eq!(Flag::Value("postgres".to_string()).resolve(&configured), "postgres");
        assert_eq!(Flag::<String>::Unset.resolve(&configured), "mysql");
        assert_eq!(Flag::from(Some(3)), Flag::Value(3));
        assert_eq!(Flag::<i32>::from(None), Flag::Unset);
    }
}
