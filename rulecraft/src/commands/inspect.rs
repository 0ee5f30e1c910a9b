// rulecraft/src/commands/inspect.rs
//
// USE CASE: inspect a table (column statistics + sample rows).

use rulecraft_core::application::Workbench;
use rulecraft_core::ports::TableDataProvider;

use super::render;

pub async fn execute(bench: &Workbench, table: &str, limit: usize) -> anyhow::Result<()> {
    let data = bench.tables.fetch_table(table).await?;

    println!("\n🔍 Inspecting Table: '{}'", data.name);
    println!("   {} columns, {} sampled rows", data.columns.len(), data.row_count());
    println!("{}", render::profile_table(&data.columns));
    println!("   --- Rows (Limit {}) ---", limit);
    println!("{}", render::sample_table(&data, limit, None));
    Ok(())
}
