// rulecraft/src/commands/shell.rs
//
// USE CASE: interactive session. One command per line on stdin, driving the
// authoring workflow, the rule management view and the assistant.

use anyhow::{Context, bail};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use rulecraft_core::application::{AssistantSession, Workbench};
use rulecraft_core::domain::{RuleCategory, RuleFilter, RuleId, RuleSuggestion};
use rulecraft_core::ports::TableDataProvider;

use super::render;

const HELP: &str = "\
Commands:
  tables                     list tables
  table <name>               select a table
  column <name>              select a column
  columns                    column statistics of the selected table
  rule <text>                write the rule in plain language
  category <info|warning|error>
  suggest                    suggestions for the selected column
  apply <n>                  apply suggestion n
  convert                    convert the rule to SQL
  validate                   run the SQL against the sample
  rows [n]                   sample rows with their verdicts
  submit                     store the validated rule
  reset                      clear the draft
  state                      show the session
  rules [table=..] [column=..] [category=..]
  options                    tables and columns present in the registry
  edit <id> | delete <id>    manage a stored rule
  new                        start a rule on the filtered table/column
  ask <message>              talk to the assistant
  help | quit";

enum Flow {
    Continue,
    Quit,
}

struct Shell<'a> {
    bench: &'a Workbench,
    chat: AssistantSession,
    suggestions: Vec<RuleSuggestion>,
    filter: RuleFilter,
}

pub async fn execute(bench: &Workbench) -> anyhow::Result<()> {
    let mut shell = Shell {
        bench,
        chat: bench.assistant()?,
        suggestions: Vec::new(),
        filter: RuleFilter::default(),
    };
    println!("🐚 RuleCraft shell ({}). Type 'help' for commands.", bench.config.name);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        match shell.handle(line.trim()).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) if render::already_notified(&e) => debug!("{:#}", e),
            Err(e) => eprintln!("❌ {:#}", e),
        }
        prompt();
    }
    println!("👋 Bye");
    Ok(())
}

fn prompt() {
    print!("rulecraft> ");
    let _ = std::io::stdout().flush();
}

impl Shell<'_> {
    async fn handle(&mut self, line: &str) -> anyhow::Result<Flow> {
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };
        let wf = &self.bench.workflow;

        match cmd {
            "" => {}
            "help" => println!("{}", HELP),
            "quit" | "exit" => return Ok(Flow::Quit),

            // --- AUTHORING ---
            "tables" => {
                let tables = self.bench.tables.list_tables().await?;
                println!("{}", render::tables_table(&tables));
            }
            "table" => {
                wf.select_table(required(arg, "table name")?).await?;
                self.suggestions.clear();
                println!("📋 Table '{}' selected", arg);
            }
            "column" => {
                wf.select_column(required(arg, "column name")?)?;
                self.suggestions.clear();
            }
            "columns" => {
                let table = wf.snapshot()?.table.context("No table selected")?;
                let data = self.bench.tables.fetch_table(&table).await?;
                println!("{}", render::profile_table(&data.columns));
            }
            "rule" => wf.edit_rule_text(arg)?,
            "category" => wf.set_category(required(arg, "category")?.parse::<RuleCategory>()?)?,
            "suggest" => {
                if let Some(suggestions) = wf.request_suggestions().await? {
                    println!("{}", render::suggestions_table(&suggestions));
                    self.suggestions = suggestions;
                }
            }
            "apply" => {
                let n: usize = required(arg, "suggestion number")?
                    .parse()
                    .context("Suggestion number expected")?;
                let suggestion = n
                    .checked_sub(1)
                    .and_then(|i| self.suggestions.get(i))
                    .with_context(|| format!("No suggestion #{} (run 'suggest' first)", n))?;
                wf.apply_suggestion(suggestion)?;
            }
            "convert" => {
                if let Some(sql) = wf.convert_to_sql().await? {
                    println!("🧮 SQL: {}", sql);
                }
            }
            "validate" => {
                if let Some(outcome) = wf.validate().await? {
                    println!("{}", render::outcome_line(&outcome));
                }
            }
            "rows" => {
                let limit = if arg.is_empty() { 10 } else { arg.parse().context("Row count expected")? };
                let snap = wf.snapshot()?;
                let table = snap.table.context("No table selected")?;
                let data = self.bench.tables.fetch_table(&table).await?;
                println!("{}", render::sample_table(&data, limit, snap.outcome.as_ref()));
            }
            "submit" => {
                let record = wf.submit().await?;
                println!("{}", render::rules_table(std::slice::from_ref(&record)));
            }
            "reset" => wf.reset_draft()?,
            "state" => self.print_state()?,

            // --- MANAGEMENT ---
            "rules" => {
                self.filter = parse_filter(arg)?;
                let rules = self.bench.management.list_rules(&self.filter).await?;
                println!("📚 {} rule(s)", rules.len());
                println!("{}", render::rules_table(&rules));
            }
            "options" => {
                let options = self.bench.management.filter_options().await?;
                println!("   tables:  {}", options.tables.join(", "));
                println!("   columns: {}", options.columns.join(", "));
            }
            "delete" => self.bench.management.delete_rule(parse_id(arg)?).await?,
            "edit" => {
                let record = self.bench.management.edit_rule(parse_id(arg)?, wf).await?;
                println!("📝 Editing rule #{}: {}", record.id, record.name);
            }
            "new" => {
                self.bench.management.start_new_rule(&self.filter, wf).await?;
                self.print_state()?;
            }

            // --- ASSISTANT ---
            "ask" => {
                if let Some(reply) = self.chat.send(arg, wf).await? {
                    println!("🤖 {}", reply.content);
                    if !reply.suggestions.is_empty() {
                        println!("{}", render::suggestions_table(&reply.suggestions));
                        self.suggestions = reply.suggestions;
                    }
                }
            }

            other => bail!("Unknown command '{}' (try 'help')", other),
        }
        Ok(Flow::Continue)
    }

    fn print_state(&self) -> anyhow::Result<()> {
        let snap = self.bench.workflow.snapshot()?;
        println!("   state:    {:?}", snap.state);
        println!("   table:    {}", snap.table.as_deref().unwrap_or("-"));
        println!("   column:   {}", snap.column.as_deref().unwrap_or("-"));
        println!("   rule:     {}", if snap.draft.text.is_empty() { "-" } else { &snap.draft.text });
        println!("   category: {}", snap.draft.category);
        println!("   sql:      {}", snap.draft.sql.as_deref().unwrap_or("-"));
        if let Some(outcome) = &snap.outcome {
            println!("   {}", render::outcome_line(outcome));
        }
        if let Some(id) = snap.editing {
            println!("   editing:  rule #{}", id);
        }
        Ok(())
    }
}

fn required<'s>(arg: &'s str, what: &str) -> anyhow::Result<&'s str> {
    if arg.is_empty() {
        bail!("Missing {}", what);
    }
    Ok(arg)
}

fn parse_id(arg: &str) -> anyhow::Result<RuleId> {
    required(arg, "rule id")?
        .trim_start_matches('#')
        .parse()
        .with_context(|| format!("'{}' is not a rule id", arg))
}

/// `table=meter_data category=error` -> filter. Unknown keys are rejected.
fn parse_filter(arg: &str) -> anyhow::Result<RuleFilter> {
    let (mut table, mut column, mut category) = (None, None, None);
    for pair in arg.split_whitespace() {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected key=value, got '{}'", pair))?;
        match key {
            "table" => table = Some(value),
            "column" => column = Some(value),
            "category" => category = Some(value),
            _ => bail!("Unknown filter '{}' (table, column, category)", key),
        }
    }
    Ok(RuleFilter::parse(table, column, category)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() -> anyhow::Result<()> {
        let filter = parse_filter("table=meter_data category=error column=all")?;
        assert_eq!(filter.table.as_deref(), Some("meter_data"));
        assert_eq!(filter.column, None);
        assert_eq!(filter.category, Some(RuleCategory::Error));

        assert!(parse_filter("").unwrap().is_unrestricted());
        assert!(parse_filter("category=critical").is_err());
        assert!(parse_filter("owner=me").is_err());
        Ok(())
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("#3").unwrap(), 3);
        assert!(parse_id("three").is_err());
        assert!(parse_id("").is_err());
    }
}
