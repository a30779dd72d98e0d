//! Jinja-syntax renderer backed by `minijinja`.

use chrono::Datelike;
use goca_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{TemplateData, naming},
    error::GocaResult,
};
use minijinja::{Environment, UndefinedBehavior, Value};
use tracing::{instrument, trace};

/// Identifier helpers, exposed both as filters (`{{ name | snake_case }}`)
/// and as functions (`{{ snake_case(name) }}`).
pub const HELPERS: &[(&str, fn(&str) -> String)] = &[
    ("camel_case", naming::to_camel_case),
    ("snake_case", naming::to_snake_case),
    ("pascal_case", naming::to_pascal_case),
    ("kebab_case", naming::to_kebab_case),
    ("upper_case", naming::to_upper_case),
    ("lower_case", naming::to_lower_case),
    ("plural", naming::pluralize),
];

/// Strict renderer: an undefined key or helper is an error, never "".
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);

        for &(name, helper) in HELPERS {
            env.add_filter(name, move |value: String| helper(&value));
            env.add_function(name, move |value: String| helper(&value));
        }
        env.add_global("year", Value::from(chrono::Local::now().year()));

        Self { env }
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for JinjaRenderer {
    #[instrument(skip(self, template, data))]
    fn render_named(&self, name: &str, template: &str, data: &TemplateData) -> GocaResult<String> {
        let ctx = Value::from_serialize(data.to_value());
        let rendered = self
            .env
            .render_named_str(name, template, ctx)
            .map_err(|e| ApplicationError::RenderingFailed {
                template: name.to_string(),
                reason: format!("{e:#}"),
            })?;
        trace!(bytes = rendered.len(), "rendered");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use goca_core::{
        domain::FieldSpec,
        error::GocaError,
    };

    use super::*;

    fn render(template: &str, data: &TemplateData) -> GocaResult<String> {
        JinjaRenderer::new().render(template, data)
    }

    #[test]
    fn substitutes_keys() {
        let data = TemplateData::new().entity("User").module("github.com/acme/shop");
        assert_eq!(
            render("{{ module }}/{{ entity }}", &data).unwrap(),
            "github.com/acme/shop/User"
        );
    }

    #[test]
    fn helpers_work_as_filters_and_functions() {
        let data = TemplateData::new().entity("OrderItem");
        let out = render(
            "{{ entity | snake_case }} {{ kebab_case(entity) }} {{ entity | camel_case }} \
             {{ entity | upper_case }} {{ pascal_case('order item') }} {{ entity | lower_case }} \
             {{ entity | snake_case | plural }}",
            &data,
        )
        .unwrap();
        assert_eq!(
            out,
            "order_item order-item orderItem ORDER_ITEM OrderItem orderitem order_items"
        );
    }

    #[test]
    fn missing_key_fails() {
        let err = render("{{ entity }} {{ missing }}", &TemplateData::new().entity("User"))
            .unwrap_err();
        match err {
            GocaError::Application(ApplicationError::RenderingFailed { template, reason }) => {
                assert_eq!(template, "<inline>");
                assert!(reason.contains("undefined"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_helper_fails() {
        let data = TemplateData::new().entity("User");
        assert!(render("{{ entity | shout_case }}", &data).is_err());
        assert!(render("{{ shout_case(entity) }}", &data).is_err());
    }

    #[test]
    fn iterates_fields_and_vars() {
        let data = TemplateData::new()
            .fields(FieldSpec::parse_list("name:string,age:int").unwrap())
            .var("author", "acme");
        let out = render(
            "{% for f in fields %}{{ f.name | pascal_case }} {{ f.type }};{% endfor %} by {{ vars.author }}",
            &data,
        )
        .unwrap();
        assert_eq!(out, "Name string;Age int; by acme");
    }

    #[test]
    fn error_names_the_template() {
        let err = JinjaRenderer::new()
            .render_named("entity.go.tmpl", "{{ nope }}", &TemplateData::new())
            .unwrap_err();
        assert!(err.to_string().contains("entity.go.tmpl"));
    }

    #[test]
    fn keeps_trailing_newline() {
        let data = TemplateData::new().entity("User");
        assert_eq!(render("{{ entity }}\n", &data).unwrap(), "User\n");
    }
}
