// rulecraft-core/src/infrastructure/compiler/jinja.rs

// Turns a recognised rule shape (range, not-null, comparison...) into the
// user-facing SQL statement. Every shape is a named minijinja template over
// `table`, `column` and the shape's own parameters.

use crate::infrastructure::error::InfrastructureError;
use minijinja::{Environment, Value};
use serde::Serialize;

pub const BETWEEN: &str = "between";
pub const NOT_NULL: &str = "not_null";
pub const COMPARE: &str = "compare";
pub const UNIQUE: &str = "unique";
pub const IN_LIST: &str = "in_list";
pub const PATTERN: &str = "pattern";

const HEAD: (&str, &str) = ("head", "SELECT * FROM {{ table }} WHERE ");

const TEMPLATES: [(&str, &str); 6] = [
    (
        BETWEEN,
        "{% include 'head' %}{{ column }} BETWEEN {{ low }} AND {{ high }}",
    ),
    (NOT_NULL, "{% include 'head' %}{{ column }} IS NOT NULL"),
    (COMPARE, "{% include 'head' %}{{ column }} {{ op }} {{ value }}"),
    (
        UNIQUE,
        "{% include 'head' %}{{ column }} IN (SELECT {{ column }} FROM {{ table }} GROUP BY {{ column }} HAVING COUNT(*) = 1)",
    ),
    (
        IN_LIST,
        "{% include 'head' %}{{ column }} IN ({% for v in values %}{{ v | literal }}{% if not loop.last %}, {% endif %}{% endfor %})",
    ),
    (PATTERN, "{% include 'head' %}{{ column }} LIKE {{ pattern | literal }}"),
];

pub struct JinjaRenderer<'a> {
    env: Environment<'a>,
}

impl JinjaRenderer<'static> {
    pub fn new() -> Result<Self, InfrastructureError> {
        Self::with_templates(&TEMPLATES)
    }
}

impl<'a> JinjaRenderer<'a> {
    /// Registers the shared `head` plus `templates`. A template that does not
    /// compile fails here, not at render time.
    fn with_templates(templates: &[(&'a str, &'a str)]) -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();

        // 🟢 Filtre `literal` : chaîne -> 'quoted' (quotes doublées), nombre -> tel quel
        env.add_filter("literal", sql_literal);

        let (head_name, head_source) = HEAD;
        env.add_template(head_name, head_source)?;
        for &(name, source) in templates {
            env.add_template(name, source)?;
        }

        Ok(Self { env })
    }

    /// Renders the named SQL template with `ctx` (must carry `table` and `column`).
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, InfrastructureError> {
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(ctx)?)
    }
}

fn sql_literal(value: Value) -> String {
    match value.as_str() {
        Some(s) => format!("'{}'", s.replace('\'', "''")),
        None => value.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use minijinja::context;

    #[test]
    fn test_render_between() -> Result<()> {
        let renderer = JinjaRenderer::new()?;
        let sql = renderer.render(
            BETWEEN,
            context! { table => "meter_data", column => "consumption", low => "0", high => "1000" },
        )?;
        assert_eq!(
            sql,
            "SELECT * FROM meter_data WHERE consumption BETWEEN 0 AND 1000"
        );
        Ok(())
    }

    #[test]
    fn test_literal_filter_quotes_strings() -> Result<()> {
        let renderer = JinjaRenderer::new()?;
        let sql = renderer.render(
            IN_LIST,
            context! {
                table => "meter_data",
                column => "customer_type",
                values => vec!["Residential", "O'Brien", "Government"],
            },
        )?;
        assert_eq!(
            sql,
            "SELECT * FROM meter_data WHERE customer_type IN ('Residential', 'O''Brien', 'Government')"
        );

        let numbers = renderer.render(
            IN_LIST,
            context! { table => "meter_data", column => "id", values => vec![1, 2] },
        )?;
        assert_eq!(numbers, "SELECT * FROM meter_data WHERE id IN (1, 2)");
        Ok(())
    }

    #[test]
    fn test_every_shape_renders() -> Result<()> {
        let renderer = JinjaRenderer::new()?;
        let ctx = context! {
            table => "meter_data",
            column => "pincode",
            low => "1",
            high => "2",
            op => ">",
            value => "0",
            values => vec!["110001"],
            pattern => "11%",
        };
        let rendered: Vec<String> = TEMPLATES
            .iter()
            .map(|(name, _)| renderer.render(name, &ctx))
            .collect::<Result<_, _>>()?;

        insta::assert_snapshot!(rendered.join("\n"), @r###"
        SELECT * FROM meter_data WHERE pincode BETWEEN 1 AND 2
        SELECT * FROM meter_data WHERE pincode IS NOT NULL
        SELECT * FROM meter_data WHERE pincode > 0
        SELECT * FROM meter_data WHERE pincode IN (SELECT pincode FROM meter_data GROUP BY pincode HAVING COUNT(*) = 1)
        SELECT * FROM meter_data WHERE pincode IN ('110001')
        SELECT * FROM meter_data WHERE pincode LIKE '11%'
        "###);
        Ok(())
    }

    #[test]
    fn test_broken_template_fails_at_construction() {
        let broken = JinjaRenderer::with_templates(&[("oops", "{% include 'head' %}{{ column")]);
        assert!(matches!(broken, Err(InfrastructureError::TemplateError(_))));
    }

    #[test]
    fn test_unknown_template_is_an_error() -> Result<()> {
        let renderer = JinjaRenderer::new()?;
        assert!(matches!(
            renderer.render("nope", ()),
            Err(InfrastructureError::TemplateError(_))
        ));
        Ok(())
    }
}
