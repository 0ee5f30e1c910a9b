// rulecraft/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::render::{self, ConsoleNotifier};
use rulecraft_core::application::Workbench;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug rulecraft author ... pour voir les détails
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load the Config & wire the adapters (Infra)
    let bench = match Workbench::load(&cli.project_dir, Arc::new(ConsoleNotifier)) {
        Ok(bench) => bench,
        Err(e) => {
            eprintln!("❌ Configuration failed: {:?}", miette::Report::new(e));
            std::process::exit(2);
        }
    };

    // 3. Dispatch (Application Layer)
    let result = match cli.command {
        Commands::Tables => commands::tables::execute(&bench).await,
        Commands::Inspect { table, limit } => commands::inspect::execute(&bench, &table, limit).await,
        Commands::Suggest { table, column } => {
            commands::suggest::execute(&bench, &table, &column).await
        }
        Commands::Author {
            table,
            column,
            rule,
            category,
        } => commands::author::execute(&bench, &table, &column, &rule, category).await,
        Commands::Rules {
            table,
            column,
            category,
            import,
            export,
        } => {
            let filter = commands::rules::Filters {
                table: table.as_deref(),
                column: column.as_deref(),
                category: category.as_deref(),
            };
            commands::rules::execute(&bench, filter, import.as_deref(), export.as_deref()).await
        }
        Commands::Shell => commands::shell::execute(&bench).await,
    };

    if let Err(e) = result {
        if render::already_notified(&e) {
            debug!("{:#}", e);
        } else {
            eprintln!("💥 {:#}", e);
        }
        std::process::exit(1);
    }
    Ok(())
}
