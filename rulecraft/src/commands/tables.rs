// rulecraft/src/commands/tables.rs
//
// USE CASE: list the tables rules can be written for.

use rulecraft_core::application::Workbench;
use rulecraft_core::ports::TableDataProvider;

use super::render;

pub async fn execute(bench: &Workbench) -> anyhow::Result<()> {
    let tables = bench.tables.list_tables().await?;
    println!("📋 {} table(s) available", tables.len());
    println!("{}", render::tables_table(&tables));
    Ok(())
}
