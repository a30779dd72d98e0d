//! Typed input for template rendering.
//!
//! Known keys are set through the builder; genuinely open-ended values go
//! through [`TemplateData::value`] or the `templates.variables` map.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{config::GocaConfig, error::DomainError, naming};

/// One `name:type` pair from a `--fields` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// Parse `"name:string,age:int"`. Blank input yields no fields.
    ///
    /// Names are compared after normalization, so `user_id` and `UserID`
    /// in one list are a duplicate.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, DomainError> {
        let mut seen = BTreeSet::new();
        let mut fields = Vec::new();

        for raw in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let field: Self = raw.parse()?;
            if !seen.insert(naming::normalize(&field.name)) {
                return Err(DomainError::InvalidFieldSpec {
                    spec: raw.to_string(),
                    reason: format!("field '{}' is listed more than once", field.name),
                });
            }
            fields.push(field);
        }
        Ok(fields)
    }
}

impl FromStr for FieldSpec {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidFieldSpec {
            spec: s.to_string(),
            reason: reason.to_string(),
        };

        let (name, ty) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected name:type"))?;
        let (name, ty) = (name.trim(), ty.trim());

        if name.is_empty() {
            return Err(invalid("field name is empty"));
        }
        if ty.is_empty() {
            return Err(invalid("field type is empty"));
        }
        if !is_identifier(name) {
            return Err(invalid("field name must be an identifier"));
        }

        Ok(Self::new(name, ty))
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// File stems in the domain directory that never denote an entity.
pub const NON_ENTITY_STEMS: &[&str] = &["errors", "validations", "common"];

/// Entity names become Go type and file names: a letter, then letters,
/// digits or underscores, and never a shared support file or a test file.
pub fn validate_entity_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if !name.starts_with(|c: char| c.is_alphabetic()) {
        return Err(invalid("name must start with a letter"));
    }
    if !is_identifier(name) {
        return Err(invalid("only letters, digits and underscores are allowed"));
    }
    let normalized = naming::normalize(name);
    if NON_ENTITY_STEMS.iter().any(|stem| naming::normalize(stem) == normalized) {
        return Err(invalid("name is reserved for a shared domain file"));
    }
    if naming::to_snake_case(name).ends_with("_test") {
        return Err(invalid("name would produce a Go test file"));
    }
    Ok(())
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.ty)
    }
}

/// Data map handed to the template renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateData {
    entity: Option<String>,
    module: Option<String>,
    project: Option<String>,
    package: Option<String>,
    fields: Vec<FieldSpec>,
    features: BTreeMap<String, bool>,
    vars: BTreeMap<String, String>,
    extra: BTreeMap<String, Value>,
}

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed module, project, feature toggles and `templates.variables`.
    pub fn from_config(config: &GocaConfig) -> Self {
        let db = &config.database.features;
        let generation = &config.generation;
        let features = &config.features;

        Self::new()
            .module(&config.project.module)
            .project(&config.project.name)
            .feature("soft_delete", db.soft_delete)
            .feature("timestamps", db.timestamps)
            .feature("uuid", db.uuid)
            .feature("validation", generation.validation.enabled)
            .feature("business_rules", generation.business_rules.enabled)
            .feature("swagger", generation.documentation.swagger.enabled)
            .feature("comments", generation.documentation.comments.enabled)
            .feature("auth", features.auth.enabled)
            .feature("cache", features.cache.enabled)
            .feature("rate_limit", features.api.rate_limit)
            .vars(config.templates.variables.clone())
    }

    pub fn entity(mut self, name: impl Into<String>) -> Self {
        self.entity = Some(name.into());
        self
    }

    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn project(mut self, name: impl Into<String>) -> Self {
        self.project = Some(name.into());
        self
    }

    pub fn package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn feature(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.features.insert(name.into(), enabled);
        self
    }

    pub fn var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn vars(mut self, vars: BTreeMap<String, String>) -> Self {
        self.vars.extend(vars);
        self
    }

    /// Escape hatch: an arbitrary top-level key.
    ///
    /// Typed keys win over a colliding escape-hatch key.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn entity_name(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn field_specs(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The flat map templates see. Unset typed keys are absent, not empty.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map: Map<String, Value> = self.extra.clone().into_iter().collect();

        let scalars = [
            ("entity", &self.entity),
            ("module", &self.module),
            ("project", &self.project),
            ("package", &self.package),
        ];
        for (key, value) in scalars {
            if let Some(v) = value {
                map.insert(key.into(), Value::String(v.clone()));
            }
        }

        map.insert(
            "fields".into(),
            serde_json::to_value(&self.fields).unwrap_or(Value::Array(Vec::new())),
        );
        map.insert(
            "features".into(),
            self.features
                .iter()
                .map(|(k, v)| (k.clone(), Value::Bool(*v)))
                .collect::<Map<_, _>>()
                .into(),
        );
        map.insert(
            "vars".into(),
            self.vars
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<Map<_, _>>()
                .into(),
        );
        map
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_lists() {
        let fields = FieldSpec::parse_list("name:string, age:int ,email:string").unwrap();
        assert_eq!(
            fields,
            vec![
                FieldSpec::new("name", "string"),
                FieldSpec::new("age", "int"),
                FieldSpec::new("email", "string"),
            ]
        );
        assert!(FieldSpec::parse_list("").unwrap().is_empty());
        assert!(FieldSpec::parse_list("  ,  ").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_fields() {
        assert!(FieldSpec::parse_list("name").is_err());
        assert!(FieldSpec::parse_list(":string").is_err());
        assert!(FieldSpec::parse_list("name:").is_err());
        assert!(FieldSpec::parse_list("1st:int").is_err());
        assert!(FieldSpec::parse_list("first-name:string").is_err());
    }

    #[test]
    fn rejects_duplicate_fields_case_insensitively() {
        let err = FieldSpec::parse_list("user_id:int,UserID:int").unwrap_err();
        assert!(matches!(err, DomainError::InvalidFieldSpec { .. }));
    }

    #[test]
    fn entity_names() {
        for ok in ["User", "OrderItem", "order_item", "V2Token"] {
            assert!(validate_entity_name(ok).is_ok(), "{ok}");
        }
        for bad in [
            "",
            "  ",
            "2fa",
            "_User",
            "order-item",
            "User Profile",
            "Errors",
            "common",
            "VALIDATIONS",
            "UserTest",
        ] {
            assert!(
                matches!(validate_entity_name(bad), Err(DomainError::InvalidName { .. })),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn map_contains_only_set_keys() {
        let map = TemplateData::new().entity("User").to_map();
        assert_eq!(map["entity"], "User");
        assert!(!map.contains_key("module"));
        assert!(map["fields"].as_array().unwrap().is_empty());
    }

    #[test]
    fn fields_serialize_with_type_key() {
        let data = TemplateData::new().field(FieldSpec::new("age", "int"));
        assert_eq!(
            data.to_value()["fields"],
            serde_json::json!([{ "name": "age", "type": "int" }])
        );
    }

    #[test]
    fn escape_hatch_cannot_shadow_typed_keys() {
        let map = TemplateData::new()
            .entity("User")
            .value("entity", "Other")
            .value("table", "users")
            .to_map();
        assert_eq!(map["entity"], "User");
        assert_eq!(map["table"], "users");
    }

    #[test]
    fn vars_and_features_are_nested() {
        let map = TemplateData::new()
            .var("author", "acme")
            .feature("soft_delete", true)
            .to_map();
        assert_eq!(map["vars"]["author"], "acme");
        assert_eq!(map["features"]["soft_delete"], true);
    }
}
