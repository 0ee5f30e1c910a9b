// rulecraft/src/commands/render.rs
//
// Terminal output: notices and comfy-table views shared by every command.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::Value;

use rulecraft_core::domain::{
    ColumnProfile, RuleCategory, RuleRecord, RuleSuggestion, TableData, TableSummary,
    ValidationOutcome,
};
use rulecraft_core::RuleCraftError;
use rulecraft_core::ports::{Notice, NoticeLevel, Notifier};

/// Prints notices the way the dashboard showed its toasts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => println!("ℹ️  {}: {}", notice.title, notice.message),
            NoticeLevel::Success => println!("✅ {}: {}", notice.title, notice.message),
            NoticeLevel::Warning => eprintln!("⚠️  {}: {}", notice.title, notice.message),
            NoticeLevel::Error => eprintln!("❌ {}: {}", notice.title, notice.message),
        }
    }
}

/// Workflow and management errors have already been shown as notices.
pub fn already_notified(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<RuleCraftError>(),
        Some(e) if !matches!(e, RuleCraftError::InternalError(_) | RuleCraftError::Infrastructure(_))
    )
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn category_cell(category: RuleCategory) -> Cell {
    let color = match category {
        RuleCategory::Info => Color::Blue,
        RuleCategory::Warning => Color::Yellow,
        RuleCategory::Error => Color::Red,
    };
    Cell::new(category).fg(color)
}

fn optional_count(value: Option<u64>) -> Cell {
    match value {
        Some(v) => Cell::new(v),
        None => Cell::new("-").add_attribute(Attribute::Dim),
    }
}

pub fn tables_table(tables: &[TableSummary]) -> Table {
    let mut table = new_table(&["Table", "Description"]);
    for t in tables {
        table.add_row(vec![Cell::new(&t.name), Cell::new(&t.description)]);
    }
    table
}

pub fn profile_table(columns: &[ColumnProfile]) -> Table {
    let mut table = new_table(&["Column", "Type", "Total", "Unique", "Nulls", "Null %", "Unique %"]);
    for c in columns {
        table.add_row(vec![
            Cell::new(&c.name).fg(Color::Cyan),
            Cell::new(&c.data_type),
            optional_count(c.total_values),
            optional_count(c.unique_values),
            optional_count(c.null_count),
            Cell::new(format!("{:.1}", c.null_percentage())),
            Cell::new(format!("{:.1}", c.unique_percentage())),
        ]);
    }
    for idx in 2..7 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    table
}

/// Sample rows, with a verdict column when an outcome is available.
pub fn sample_table(data: &TableData, limit: usize, outcome: Option<&ValidationOutcome>) -> Table {
    let mut headers: Vec<&str> = vec!["#"];
    if outcome.is_some() {
        headers.push("Pass");
    }
    headers.extend(data.columns.iter().map(|c| c.name.as_str()));
    let mut table = new_table(&headers);

    for (idx, row) in data.rows.iter().take(limit).enumerate() {
        let mut cells = vec![Cell::new(idx + 1).add_attribute(Attribute::Dim)];
        if let Some(outcome) = outcome {
            cells.push(match outcome.row_passes(idx) {
                Some(true) => Cell::new("✓").fg(Color::Green),
                Some(false) => Cell::new("✗").fg(Color::Red),
                None => Cell::new("-"),
            });
        }
        cells.extend(row.iter().map(value_cell));
        table.add_row(cells);
    }
    table
}

fn value_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::new("NULL").add_attribute(Attribute::Dim),
        Value::String(s) => Cell::new(s),
        other => Cell::new(other),
    }
}

pub fn suggestions_table(suggestions: &[RuleSuggestion]) -> Table {
    let mut table = new_table(&["#", "Rule", "Category", "Description"]);
    for (idx, s) in suggestions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&s.rule),
            category_cell(s.category),
            Cell::new(&s.description),
        ]);
    }
    table
}

pub fn rules_table(rules: &[RuleRecord]) -> Table {
    let mut table = new_table(&["ID", "Rule", "Table", "Column", "Category", "SQL", "Created"]);
    for r in rules {
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(&r.name),
            Cell::new(&r.table_name),
            Cell::new(&r.column_name),
            category_cell(r.category),
            Cell::new(&r.sql_user),
            match r.created_at {
                Some(at) => Cell::new(at.format("%Y-%m-%d")),
                None => Cell::new("-"),
            },
        ]);
    }
    align_column(&mut table, 0, CellAlignment::Right);
    table
}

pub fn outcome_line(outcome: &ValidationOutcome) -> String {
    format!(
        "📊 {}/{} rows pass ({}%), {} fail",
        outcome.pass_count,
        outcome.total_rows,
        outcome.display_percentage(),
        outcome.fail_count()
    )
}
