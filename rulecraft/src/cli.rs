// rulecraft/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use rulecraft_core::domain::RuleCategory;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rulecraft")]
#[command(about = "Data quality rule authoring: column -> rule -> SQL -> validation -> registry", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project directory (where rulecraft.yaml lives)
    #[arg(long, global = true, default_value = ".", env = "RULECRAFT_PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📋 Lists the tables available for rule authoring
    Tables,

    /// 🔍 Shows column statistics and sample rows of a table
    Inspect {
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// 💡 Suggests rules for a column
    Suggest {
        #[arg(long, short)]
        table: String,

        #[arg(long, short)]
        column: String,
    },

    /// ✍️  Authors a rule in one go: convert, validate, submit
    Author {
        #[arg(long, short)]
        table: String,

        #[arg(long, short)]
        column: String,

        /// Rule in plain language (ex: "Consumption should be between 0 and 1000")
        #[arg(long, short)]
        rule: String,

        /// info | warning | error
        #[arg(long, default_value = "info")]
        category: RuleCategory,
    },

    /// 📚 Lists stored rules ("all" disables a filter)
    Rules {
        #[arg(long)]
        table: Option<String>,

        #[arg(long)]
        column: Option<String>,

        /// info | warning | error | all
        #[arg(long)]
        category: Option<String>,

        /// Adds the rules of a YAML export to the registry before listing
        #[arg(long)]
        import: Option<PathBuf>,

        /// Writes the listed rules to a YAML file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// 🐚 Interactive authoring session on stdin
    Shell,
}
