//! Default resolution: static defaults, then derived defaults.
//!
//! The two passes are separate because a derived rule must observe the
//! *final* value of the field it depends on, which may itself have just
//! received a static default.
//!
//! # Adding a Derived Default
//!
//! 1. Add one [`DerivationRule`] to [`DERIVATION_RULES`]
//! 2. That's it: the resolver, the flag merger's re-derivation and the
//!    warning bookkeeping all walk the table

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::domain::{
    config::{document::*, model::*},
    diagnostics::Diagnostic,
};

// ── Static defaults ──────────────────────────────────────────────────────────

pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_LICENSE: &str = "MIT";
pub const DEFAULT_DOMAIN_DIR: &str = "internal/domain";
pub const DEFAULT_USECASE_DIR: &str = "internal/usecase";
pub const DEFAULT_REPOSITORY_DIR: &str = "internal/repository";
pub const DEFAULT_HANDLER_DIR: &str = "internal/handler";
pub const DEFAULT_DATABASE: &str = "postgres";
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 80.0;
pub const DEFAULT_LINE_LENGTH: i64 = 120;
pub const DEFAULT_TEMPLATES_DIR: &str = ".goca/templates";

fn text(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}

/// Enum-constrained fields treat an explicit empty string as "not provided".
fn choice(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        None | Some("") => default.to_string(),
        Some(v) => v.to_string(),
    }
}

fn layer(section: Option<&LayerSection>, directory: &str) -> LayerConfig {
    let section = section.cloned().unwrap_or_default();
    LayerConfig {
        enabled: section.enabled.unwrap_or(true),
        directory: text(&section.directory, directory),
    }
}

fn toggle(section: Option<&ToggleSection>, default: bool) -> ToggleConfig {
    ToggleConfig {
        enabled: section.and_then(|s| s.enabled).unwrap_or(default),
    }
}

fn project_defaults(doc: &ConfigDocument) -> ProjectConfig {
    let p = doc.project.clone().unwrap_or_default();
    ProjectConfig {
        name: text(&p.name, ""),
        module: text(&p.module, ""),
        version: text(&p.version, DEFAULT_VERSION),
        description: text(&p.description, ""),
        author: text(&p.author, ""),
        license: text(&p.license, DEFAULT_LICENSE),
        tags: p.tags.unwrap_or_default(),
        metadata: p.metadata.unwrap_or_default(),
    }
}

fn architecture_defaults(doc: &ConfigDocument) -> ArchitectureConfig {
    let a = doc.architecture.clone().unwrap_or_default();
    let layers = a.layers.unwrap_or_default();
    let di = a.di.unwrap_or_default();
    let naming = a.naming.unwrap_or_default();

    ArchitectureConfig {
        layers: LayersConfig {
            domain: layer(layers.domain.as_ref(), DEFAULT_DOMAIN_DIR),
            usecase: layer(layers.usecase.as_ref(), DEFAULT_USECASE_DIR),
            repository: layer(layers.repository.as_ref(), DEFAULT_REPOSITORY_DIR),
            handler: layer(layers.handler.as_ref(), DEFAULT_HANDLER_DIR),
        },
        di: DiConfig {
            kind: choice(&di.kind, "manual"),
            auto_wire: di.auto_wire.unwrap_or(false),
        },
        naming: NamingConfig {
            entities: choice(&naming.entities, "PascalCase"),
            fields: choice(&naming.fields, "camelCase"),
            files: choice(&naming.files, "snake_case"),
            packages: choice(&naming.packages, "lowercase"),
            constants: choice(&naming.constants, "UPPER_CASE"),
        },
    }
}

fn database_defaults(doc: &ConfigDocument) -> DatabaseConfig {
    let d = doc.database.clone().unwrap_or_default();
    let conn = d.connection.unwrap_or_default();
    let migrations = d.migrations.unwrap_or_default();
    let features = d.features.unwrap_or_default();

    DatabaseConfig {
        kind: choice(&d.kind, DEFAULT_DATABASE),
        host: text(&d.host, "localhost"),
        // Filled by the derived pass when the file is silent.
        port: d.port.unwrap_or(0),
        name: text(&d.name, ""),
        connection: ConnectionConfig {
            max_open: conn.max_open.unwrap_or(25),
            max_idle: conn.max_idle.unwrap_or(5),
            max_lifetime: text(&conn.max_lifetime, "5m"),
        },
        migrations: MigrationConfig {
            enabled: migrations.enabled.unwrap_or(true),
            auto_generate: migrations.auto_generate.unwrap_or(true),
            directory: text(&migrations.directory, "migrations"),
        },
        features: DatabaseFeatures {
            soft_delete: features.soft_delete.unwrap_or(false),
            timestamps: features.timestamps.unwrap_or(true),
            uuid: features.uuid.unwrap_or(false),
            audit: features.audit.unwrap_or(false),
            versioning: features.versioning.unwrap_or(false),
        },
    }
}

fn generation_defaults(doc: &ConfigDocument) -> GenerationConfig {
    let g = doc.generation.clone().unwrap_or_default();
    let validation = g.validation.unwrap_or_default();
    let rules = g.business_rules.unwrap_or_default();
    let docs = g.documentation.unwrap_or_default();
    let swagger = docs.swagger.clone().unwrap_or_default();
    let comments = docs.comments.clone().unwrap_or_default();
    let style = g.style.unwrap_or_default();

    GenerationConfig {
        validation: ValidationConfig {
            enabled: validation.enabled.unwrap_or(true),
            library: choice(&validation.library, "builtin"),
        },
        business_rules: BusinessRulesConfig {
            enabled: rules.enabled.unwrap_or(false),
            events: rules.events.unwrap_or(false),
        },
        documentation: DocumentationConfig {
            swagger: SwaggerConfig {
                enabled: swagger.enabled.unwrap_or(false),
                title: text(&swagger.title, ""),
                version: text(&swagger.version, DEFAULT_VERSION),
            },
            postman: toggle(docs.postman.as_ref(), false),
            markdown: toggle(docs.markdown.as_ref(), false),
            comments: CommentsConfig {
                enabled: comments.enabled.unwrap_or(true),
                language: text(&comments.language, "english"),
            },
        },
        style: StyleConfig {
            line_length: style.line_length.unwrap_or(DEFAULT_LINE_LENGTH),
            indentation: text(&style.indentation, "tab"),
            group_imports: style.group_imports.unwrap_or(true),
            gofmt: style.gofmt.unwrap_or(true),
            goimports: style.goimports.unwrap_or(true),
        },
    }
}

fn testing_defaults(doc: &ConfigDocument) -> TestingConfig {
    let t = doc.testing.clone().unwrap_or_default();
    let coverage = t.coverage.unwrap_or_default();
    let mocks = t.mocks.unwrap_or_default();
    let fixtures = t.fixtures.unwrap_or_default();

    TestingConfig {
        enabled: t.enabled.unwrap_or(true),
        framework: choice(&t.framework, "testify"),
        coverage: CoverageConfig {
            enabled: coverage.enabled.unwrap_or(true),
            threshold: coverage.threshold.unwrap_or(DEFAULT_COVERAGE_THRESHOLD),
        },
        mocks: MocksConfig {
            enabled: mocks.enabled.unwrap_or(true),
            tool: choice(&mocks.tool, "mockery"),
            directory: text(&mocks.directory, "internal/mocks"),
        },
        fixtures: FixturesConfig {
            enabled: fixtures.enabled.unwrap_or(false),
            directory: text(&fixtures.directory, "testdata/fixtures"),
        },
        integration: t.integration.unwrap_or(false),
        benchmarks: t.benchmarks.unwrap_or(false),
    }
}

fn features_defaults(doc: &ConfigDocument) -> FeaturesConfig {
    let f = doc.features.clone().unwrap_or_default();
    let auth = f.auth.unwrap_or_default();
    let cache = f.cache.unwrap_or_default();
    let logging = f.logging.unwrap_or_default();
    let monitoring = f.monitoring.unwrap_or_default();
    let api = f.api.unwrap_or_default();

    FeaturesConfig {
        auth: AuthConfig {
            enabled: auth.enabled.unwrap_or(false),
            kind: choice(&auth.kind, "jwt"),
            rbac: auth.rbac.unwrap_or(false),
        },
        cache: CacheConfig {
            enabled: cache.enabled.unwrap_or(false),
            kind: choice(&cache.kind, "redis"),
            ttl: text(&cache.ttl, "1h"),
        },
        logging: LoggingConfig {
            enabled: logging.enabled.unwrap_or(true),
            level: choice(&logging.level, "info"),
            format: choice(&logging.format, "json"),
        },
        monitoring: MonitoringConfig {
            enabled: monitoring.enabled.unwrap_or(false),
            metrics: monitoring.metrics.unwrap_or(false),
            tracing: monitoring.tracing.unwrap_or(false),
            health_check: monitoring.health_check.unwrap_or(true),
        },
        api: ApiConfig {
            versioning: api.versioning.unwrap_or(true),
            pagination: api.pagination.unwrap_or(true),
            cors: api.cors.unwrap_or(true),
            // Filled by the derived pass when the file is silent.
            rate_limit: api.rate_limit.unwrap_or(false),
        },
    }
}

fn templates_defaults(doc: &ConfigDocument) -> TemplatesConfig {
    let t = doc.templates.clone().unwrap_or_default();
    TemplatesConfig {
        directory: text(&t.directory, DEFAULT_TEMPLATES_DIR),
        variables: t.variables.unwrap_or_default(),
    }
}

// ── Derived defaults ─────────────────────────────────────────────────────────

/// A default computed from other already-resolved fields.
///
/// A rule runs only when its target was not provided explicitly. When
/// `derive` yields `None` the static default stays and nothing is reported.
#[derive(Clone, Copy)]
pub struct DerivationRule {
    /// Dotted path of the field this rule fills.
    pub field: &'static str,
    /// Dotted paths whose values feed `derive`.
    pub depends_on: &'static [&'static str],
    explicit_in: fn(&ConfigDocument) -> bool,
    read: fn(&GocaConfig) -> Value,
    assign: fn(&mut GocaConfig, &Value),
    derive: fn(&GocaConfig) -> Option<Value>,
}

/// Complete set of derivation rules, applied in order.
pub static DERIVATION_RULES: &[DerivationRule] = &[
    DerivationRule {
        field: "database.port",
        depends_on: &["database.type"],
        explicit_in: ConfigDocument::sets_database_port,
        read: |c| Value::from(c.database.port),
        assign: |c, v| c.database.port = v.as_i64().unwrap_or_default(),
        derive: |c| {
            c.database
                .database_kind()
                .map(|kind| Value::from(kind.default_port()))
        },
    },
    DerivationRule {
        field: "features.api.rate_limit",
        depends_on: &["features.auth.enabled"],
        explicit_in: ConfigDocument::sets_rate_limit,
        read: |c| Value::from(c.features.api.rate_limit),
        assign: |c, v| c.features.api.rate_limit = v.as_bool().unwrap_or_default(),
        derive: |c| c.features.auth.enabled.then_some(Value::Bool(true)),
    },
    DerivationRule {
        field: "generation.documentation.swagger.title",
        depends_on: &["project.name", "generation.documentation.swagger.enabled"],
        explicit_in: ConfigDocument::sets_swagger_title,
        read: |c| Value::from(c.generation.documentation.swagger.title.clone()),
        assign: |c, v| {
            c.generation.documentation.swagger.title = v.as_str().unwrap_or_default().to_string()
        },
        derive: |c| {
            let swagger = &c.generation.documentation.swagger;
            (swagger.enabled && !c.project.name.is_empty())
                .then(|| Value::from(format!("{} API", c.project.name)))
        },
    },
];

impl DerivationRule {
    fn warning(&self, value: &Value) -> Diagnostic {
        Diagnostic::warning(
            self.field,
            format!(
                "not set; defaulted to {value} based on {}",
                self.depends_on.join(", ")
            ),
            value.clone(),
        )
    }
}

// ── Resolution ───────────────────────────────────────────────────────────────

/// Output of the Default Resolver, input of the Flag Merger.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub(crate) config: GocaConfig,
    /// Static-pass result, used to restore a derived field before re-deriving.
    pub(crate) baseline: GocaConfig,
    /// Derivable fields the user set (file or flag).
    pub(crate) explicit: BTreeSet<&'static str>,
    /// Derived values actually applied, by field.
    pub(crate) derived: BTreeMap<&'static str, Value>,
}

impl Resolution {
    pub fn config(&self) -> &GocaConfig {
        &self.config
    }

    pub fn into_config(self) -> GocaConfig {
        self.config
    }

    /// Derived values applied silently, by field.
    pub fn derived(&self) -> &BTreeMap<&'static str, Value> {
        &self.derived
    }

    /// One warning per applied derivation, in rule-table order.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        DERIVATION_RULES
            .iter()
            .filter_map(|rule| self.derived.get(rule.field).map(|v| rule.warning(v)))
            .collect()
    }

    pub(crate) fn mark_explicit(&mut self, field: &str) {
        if let Some(rule) = DERIVATION_RULES.iter().find(|r| r.field == field) {
            self.explicit.insert(rule.field);
            self.derived.remove(rule.field);
        }
    }

    fn apply_rule(&mut self, rule: &DerivationRule) {
        if self.explicit.contains(rule.field) {
            return;
        }
        (rule.assign)(&mut self.config, &(rule.read)(&self.baseline));
        self.derived.remove(rule.field);
        if let Some(value) = (rule.derive)(&self.config) {
            (rule.assign)(&mut self.config, &value);
            self.derived.insert(rule.field, value);
        }
    }

    /// Re-run every non-explicit rule that depends on a changed field.
    pub(crate) fn rederive(&mut self, changed: &[&str]) {
        for rule in DERIVATION_RULES {
            if rule.depends_on.iter().any(|dep| changed.contains(dep)) {
                self.apply_rule(rule);
            }
        }
    }
}

/// Fills every unset field of a [`ConfigDocument`].
pub struct DefaultResolver;

impl DefaultResolver {
    /// First pass only: static defaults, never any warning.
    pub fn static_defaults(doc: &ConfigDocument) -> GocaConfig {
        GocaConfig {
            project: project_defaults(doc),
            architecture: architecture_defaults(doc),
            database: database_defaults(doc),
            generation: generation_defaults(doc),
            testing: testing_defaults(doc),
            features: features_defaults(doc),
            deploy: doc.deploy.clone().unwrap_or_default(),
            templates: templates_defaults(doc),
        }
    }

    /// Static pass followed by the derived pass.
    pub fn resolve(doc: &ConfigDocument) -> Resolution {
        let config = Self::static_defaults(doc);
        let explicit = DERIVATION_RULES
            .iter()
            .filter(|rule| (rule.explicit_in)(doc))
            .map(|rule| rule.field)
            .collect();

        let mut resolution = Resolution {
            baseline: config.clone(),
            config,
            explicit,
            derived: BTreeMap::new(),
        };
        for rule in DERIVATION_RULES {
            resolution.apply_rule(rule);
        }
        resolution
    }
}
