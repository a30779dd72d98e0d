//! The resolved configuration model.
//!
//! Every field here has a concrete value: this is what the Default Resolver
//! produces and what every later stage reads. Enum-constrained settings are
//! kept as strings (see `value_objects`) and parsed through the typed
//! accessors on each section.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::{
    AuthKind, CacheKind, CaseStyle, DatabaseKind, DiStrategy, TestFramework, ValidationLibrary,
};

/// Canonical in-memory settings tree for one command invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GocaConfig {
    pub project: ProjectConfig,
    pub architecture: ArchitectureConfig,
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
    pub testing: TestingConfig,
    pub features: FeaturesConfig,
    /// Opaque deployment settings, carried through untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub deploy: BTreeMap<String, Value>,
    pub templates: TemplatesConfig,
}

// ── project ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    /// Go module path, conventionally `domain/segments`.
    pub module: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub license: String,
    pub tags: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

// ── architecture ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureConfig {
    pub layers: LayersConfig,
    pub di: DiConfig,
    pub naming: NamingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayersConfig {
    pub domain: LayerConfig,
    pub usecase: LayerConfig,
    pub repository: LayerConfig,
    pub handler: LayerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub enabled: bool,
    pub directory: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub auto_wire: bool,
}

impl DiConfig {
    pub fn strategy(&self) -> Option<DiStrategy> {
        self.kind.parse().ok()
    }
}

/// Case style per identifier class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConfig {
    pub entities: String,
    pub fields: String,
    pub files: String,
    pub packages: String,
    pub constants: String,
}

impl NamingConfig {
    /// Entity type name in the configured style (PascalCase if unrecognized).
    pub fn entity_name(&self, name: &str) -> String {
        style_or(&self.entities, CaseStyle::Pascal).apply(name)
    }

    pub fn field_name(&self, name: &str) -> String {
        style_or(&self.fields, CaseStyle::Camel).apply(name)
    }

    /// File stem in the configured style (snake_case if unrecognized).
    pub fn file_stem(&self, name: &str) -> String {
        style_or(&self.files, CaseStyle::Snake).apply(name)
    }

    pub fn package_name(&self, name: &str) -> String {
        style_or(&self.packages, CaseStyle::Lower).apply(name)
    }

    pub fn constant_name(&self, name: &str) -> String {
        style_or(&self.constants, CaseStyle::Upper).apply(name)
    }
}

fn style_or(raw: &str, fallback: CaseStyle) -> CaseStyle {
    raw.parse().unwrap_or(fallback)
}

// ── database ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub host: String,
    /// Kept wide so out-of-range values surface as diagnostics.
    pub port: i64,
    pub name: String,
    pub connection: ConnectionConfig,
    pub migrations: MigrationConfig,
    pub features: DatabaseFeatures,
}

impl DatabaseConfig {
    pub fn database_kind(&self) -> Option<DatabaseKind> {
        self.kind.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub max_open: u32,
    pub max_idle: u32,
    pub max_lifetime: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    pub enabled: bool,
    pub auto_generate: bool,
    pub directory: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseFeatures {
    pub soft_delete: bool,
    pub timestamps: bool,
    pub uuid: bool,
    pub audit: bool,
    pub versioning: bool,
}

// ── generation ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub validation: ValidationConfig,
    pub business_rules: BusinessRulesConfig,
    pub documentation: DocumentationConfig,
    pub style: StyleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub enabled: bool,
    pub library: String,
}

impl ValidationConfig {
    pub fn validation_library(&self) -> Option<ValidationLibrary> {
        self.library.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRulesConfig {
    pub enabled: bool,
    pub events: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentationConfig {
    pub swagger: SwaggerConfig,
    pub postman: ToggleConfig,
    pub markdown: ToggleConfig,
    pub comments: CommentsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwaggerConfig {
    pub enabled: bool,
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsConfig {
    pub enabled: bool,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub line_length: i64,
    pub indentation: String,
    pub group_imports: bool,
    pub gofmt: bool,
    pub goimports: bool,
}

// ── testing ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestingConfig {
    pub enabled: bool,
    pub framework: String,
    pub coverage: CoverageConfig,
    pub mocks: MocksConfig,
    pub fixtures: FixturesConfig,
    pub integration: bool,
    pub benchmarks: bool,
}

impl TestingConfig {
    pub fn test_framework(&self) -> Option<TestFramework> {
        self.framework.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageConfig {
    pub enabled: bool,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MocksConfig {
    pub enabled: bool,
    pub tool: String,
    pub directory: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixturesConfig {
    pub enabled: bool,
    pub directory: String,
}

// ── features ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturesConfig {
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub monitoring: MonitoringConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub rbac: bool,
}

impl AuthConfig {
    pub fn auth_kind(&self) -> Option<AuthKind> {
        self.kind.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub ttl: String,
}

impl CacheConfig {
    pub fn cache_kind(&self) -> Option<CacheKind> {
        self.kind.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub metrics: bool,
    pub tracing: bool,
    pub health_check: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub versioning: bool,
    pub pagination: bool,
    pub cors: bool,
    pub rate_limit: bool,
}

// ── templates ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding user template overrides, relative to the project root.
    pub directory: String,
    /// Substitution variables available to every render call.
    pub variables: BTreeMap<String, String>,
}

impl GocaConfig {
    /// Look up any setting by dotted path (`database.port`, `project.tags`).
    ///
    /// Keys use the document spelling (`database.type`, not `database.kind`).
    pub fn get(&self, path: &str) -> Option<Value> {
        let root = serde_json::to_value(self).ok()?;
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(root, |node, segment| match node {
                Value::Object(mut map) => map.remove(segment),
                Value::Array(mut items) => {
                    let idx: usize = segment.parse().ok()?;
                    (idx < items.len()).then(|| items.swap_remove(idx))
                }
                _ => None,
            })
    }
}
