// rulecraft/src/commands/rules.rs
//
// USE CASE: rule management listing, with optional YAML import/export.

use std::path::Path;

use rulecraft_core::application::Workbench;
use rulecraft_core::domain::RuleFilter;
use rulecraft_core::infrastructure::fs::{export_rules, import_rules};

use super::render;

/// Raw `--table/--column/--category` values ("all" disables one).
pub struct Filters<'a> {
    pub table: Option<&'a str>,
    pub column: Option<&'a str>,
    pub category: Option<&'a str>,
}

pub async fn execute(
    bench: &Workbench,
    filters: Filters<'_>,
    import: Option<&Path>,
    export: Option<&Path>,
) -> anyhow::Result<()> {
    let filter = RuleFilter::parse(filters.table, filters.column, filters.category)?;

    if let Some(path) = import {
        let imported = bench.management.import(import_rules(path)?).await?;
        println!("📥 Imported {} rule(s) from {}", imported.len(), path.display());
    }

    let rules = bench.management.list_rules(&filter).await?;
    if rules.is_empty() {
        println!("📭 No rule matches the current filters");
    } else {
        println!("📚 {} rule(s)", rules.len());
        println!("{}", render::rules_table(&rules));
    }

    if let Some(path) = export {
        export_rules(path, &rules)?;
        println!("💾 Exported {} rule(s) to {}", rules.len(), path.display());
    }
    Ok(())
}
