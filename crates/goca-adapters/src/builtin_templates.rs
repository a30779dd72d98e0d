//! Templates compiled into the binary.
//!
//! Each one can be replaced per project by dropping a file with the same
//! name into `templates.directory` (see `GenerationContext::render_named`).

/// File name an override must use to replace [`ENTITY_TEMPLATE`].
pub const ENTITY_TEMPLATE_NAME: &str = "entity.go.tmpl";

/// Go domain entity: struct, table name and optional validation.
///
/// Expects `package`, `entity`, `fields` and the `features` toggles seeded
/// by `TemplateData::from_config`.
pub const ENTITY_TEMPLATE: &str = r#"package {{ package }}
{% if features.timestamps or features.soft_delete %}
import "time"
{% endif %}{% if features.validation %}
import "errors"
{% endif %}
{% if features.comments %}// {{ entity | pascal_case }} is a domain entity of {{ project }}.
{% endif %}type {{ entity | pascal_case }} struct {
{% if features.uuid %}	ID string `json:"id" gorm:"type:uuid;primaryKey"`
{% else %}	ID uint `json:"id" gorm:"primaryKey"`
{% endif %}{% for f in fields %}	{{ f.name | pascal_case }} {{ f.type }} `json:"{{ f.name | snake_case }}"`
{% endfor %}{% if features.timestamps %}	CreatedAt time.Time `json:"created_at"`
	UpdatedAt time.Time `json:"updated_at"`
{% endif %}{% if features.soft_delete %}	DeletedAt *time.Time `json:"deleted_at,omitempty" gorm:"index"`
{% endif %}}

func ({{ entity | camel_case }} *{{ entity | pascal_case }}) TableName() string {
	return "{{ entity | snake_case | plural }}"
}
{% if features.validation %}
func ({{ entity | camel_case }} *{{ entity | pascal_case }}) Validate() error {
{% for f in fields %}{% if f.type == "string" %}	if {{ entity | camel_case }}.{{ f.name | pascal_case }} == "" {
		return errors.New("{{ f.name | snake_case }} is required")
	}
{% endif %}{% endfor %}	return nil
}
{% endif %}{% if features.soft_delete %}
func ({{ entity | camel_case }} *{{ entity | pascal_case }}) IsDeleted() bool {
	return {{ entity | camel_case }}.DeletedAt != nil
}
{% endif %}"#;

/// Built-in source for a template name, if one ships with goca.
pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        ENTITY_TEMPLATE_NAME => Some(ENTITY_TEMPLATE),
        _ => None,
    }
}
