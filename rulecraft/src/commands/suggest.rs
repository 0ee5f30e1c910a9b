// rulecraft/src/commands/suggest.rs
//
// USE CASE: rule suggestions for one column.

use rulecraft_core::application::Workbench;

use super::render;

pub async fn execute(bench: &Workbench, table: &str, column: &str) -> anyhow::Result<()> {
    let wf = &bench.workflow;
    wf.select_table(table).await?;
    wf.select_column(column)?;

    match wf.request_suggestions().await? {
        Some(suggestions) if !suggestions.is_empty() => {
            println!("{}", render::suggestions_table(&suggestions));
        }
        _ => println!("🤷 No new suggestion for '{}.{}'", table, column),
    }
    Ok(())
}
