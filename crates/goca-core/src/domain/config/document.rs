//! The partially-populated configuration document, as parsed from disk.
//!
//! Same shape as [`GocaConfig`](super::GocaConfig) but every leaf is
//! optional: `None` means "the file did not say", which is what lets the
//! Default Resolver tell a user choice apart from a gap.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::GocaConfig;

/// Discovery order for the project configuration file.
pub const CONFIG_FILE_NAMES: [&str; 4] = [".goca.yaml", ".goca.yml", "goca.yaml", "goca.yml"];

/// File name written by `save`.
pub const DEFAULT_CONFIG_FILE: &str = CONFIG_FILE_NAMES[0];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    pub project: Option<ProjectSection>,
    pub architecture: Option<ArchitectureSection>,
    pub database: Option<DatabaseSection>,
    pub generation: Option<GenerationSection>,
    pub testing: Option<TestingSection>,
    pub features: Option<FeaturesSection>,
    pub deploy: Option<BTreeMap<String, Value>>,
    pub templates: Option<TemplatesSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub name: Option<String>,
    pub module: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectureSection {
    pub layers: Option<LayersSection>,
    pub di: Option<DiSection>,
    pub naming: Option<NamingSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayersSection {
    pub domain: Option<LayerSection>,
    pub usecase: Option<LayerSection>,
    pub repository: Option<LayerSection>,
    pub handler: Option<LayerSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSection {
    pub enabled: Option<bool>,
    pub directory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiSection {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub auto_wire: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingSection {
    pub entities: Option<String>,
    pub fields: Option<String>,
    pub files: Option<String>,
    pub packages: Option<String>,
    pub constants: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub host: Option<String>,
    pub port: Option<i64>,
    pub name: Option<String>,
    pub connection: Option<ConnectionSection>,
    pub migrations: Option<MigrationSection>,
    pub features: Option<DatabaseFeaturesSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSection {
    pub max_open: Option<u32>,
    pub max_idle: Option<u32>,
    pub max_lifetime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationSection {
    pub enabled: Option<bool>,
    pub auto_generate: Option<bool>,
    pub directory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseFeaturesSection {
    pub soft_delete: Option<bool>,
    pub timestamps: Option<bool>,
    pub uuid: Option<bool>,
    pub audit: Option<bool>,
    pub versioning: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSection {
    pub validation: Option<ValidationSection>,
    pub business_rules: Option<BusinessRulesSection>,
    pub documentation: Option<DocumentationSection>,
    pub style: Option<StyleSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSection {
    pub enabled: Option<bool>,
    pub library: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRulesSection {
    pub enabled: Option<bool>,
    pub events: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentationSection {
    pub swagger: Option<SwaggerSection>,
    pub postman: Option<ToggleSection>,
    pub markdown: Option<ToggleSection>,
    pub comments: Option<CommentsSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwaggerSection {
    pub enabled: Option<bool>,
    pub title: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleSection {
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsSection {
    pub enabled: Option<bool>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSection {
    pub line_length: Option<i64>,
    pub indentation: Option<String>,
    pub group_imports: Option<bool>,
    pub gofmt: Option<bool>,
    pub goimports: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestingSection {
    pub enabled: Option<bool>,
    pub framework: Option<String>,
    pub coverage: Option<CoverageSection>,
    pub mocks: Option<MocksSection>,
    pub fixtures: Option<FixturesSection>,
    pub integration: Option<bool>,
    pub benchmarks: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageSection {
    pub enabled: Option<bool>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MocksSection {
    pub enabled: Option<bool>,
    pub tool: Option<String>,
    pub directory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesSection {
    pub enabled: Option<bool>,
    pub directory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesSection {
    pub auth: Option<AuthSection>,
    pub cache: Option<CacheSection>,
    pub logging: Option<LoggingSection>,
    pub monitoring: Option<MonitoringSection>,
    pub api: Option<ApiSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    pub enabled: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub rbac: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    pub enabled: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub ttl: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub enabled: Option<bool>,
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringSection {
    pub enabled: Option<bool>,
    pub metrics: Option<bool>,
    pub tracing: Option<bool>,
    pub health_check: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub versioning: Option<bool>,
    pub pagination: Option<bool>,
    pub cors: Option<bool>,
    pub rate_limit: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesSection {
    pub directory: Option<String>,
    pub variables: Option<BTreeMap<String, String>>,
}

impl ConfigDocument {
    /// Document form of a resolved model, leaving out the `omit` paths.
    ///
    /// Omitted fields read back as "not provided", so derived values are
    /// derived again on the next load instead of becoming explicit.
    pub fn from_config<'a>(
        config: &GocaConfig,
        omit: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, serde_json::Error> {
        let mut tree = serde_json::to_value(config)?;
        for path in omit {
            remove_path(&mut tree, path);
        }
        serde_json::from_value(tree)
    }

    /// Whether the file itself set `database.port`.
    pub fn sets_database_port(&self) -> bool {
        self.database.as_ref().is_some_and(|d| d.port.is_some())
    }

    pub fn sets_rate_limit(&self) -> bool {
        self.features
            .as_ref()
            .and_then(|f| f.api.as_ref())
            .is_some_and(|a| a.rate_limit.is_some())
    }

    pub fn sets_swagger_title(&self) -> bool {
        self.generation
            .as_ref()
            .and_then(|g| g.documentation.as_ref())
            .and_then(|d| d.swagger.as_ref())
            .and_then(|s| s.title.as_deref())
            .is_some_and(|t| !t.is_empty())
    }
}

fn remove_path(tree: &mut Value, path: &str) {
    let (parent, leaf) = match path.rsplit_once('.') {
        Some((parent, leaf)) => (
            parent
                .split('.')
                .try_fold(tree, |node, key| node.get_mut(key)),
            leaf,
        ),
        None => (Some(tree), path),
    };
    if let Some(Value::Object(map)) = parent {
        map.remove(leaf);
    }
}
