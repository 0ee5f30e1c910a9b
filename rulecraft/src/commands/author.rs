// rulecraft/src/commands/author.rs
//
// USE CASE: one-shot authoring. Runs the whole workflow for a single rule:
// select -> describe -> convert -> validate -> submit.

use anyhow::Context;
use rulecraft_core::application::Workbench;
use rulecraft_core::domain::RuleCategory;

use super::render;

pub async fn execute(
    bench: &Workbench,
    table: &str,
    column: &str,
    rule: &str,
    category: RuleCategory,
) -> anyhow::Result<()> {
    let wf = &bench.workflow;

    println!("✍️  Authoring rule for '{}.{}'", table, column);
    wf.select_table(table).await?;
    wf.select_column(column)?;
    wf.edit_rule_text(rule)?;
    wf.set_category(category)?;

    let sql = wf
        .convert_to_sql()
        .await?
        .context("The draft changed during conversion")?;
    println!("🧮 SQL: {}", sql);

    let outcome = wf
        .validate()
        .await?
        .context("The draft changed during validation")?;
    println!("{}", render::outcome_line(&outcome));

    let record = wf.submit().await?;
    println!("{}", render::rules_table(std::slice::from_ref(&record)));
    Ok(())
}
