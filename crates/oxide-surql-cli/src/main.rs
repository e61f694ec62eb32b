//! oxide-surql CLI
//!
//! Compiles JSON query descriptions into `SurrealQL` statements.

mod config;
mod request;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;

use oxide_surql_core::Grammar;
use oxide_surql_core::operator::ALIASES;

use crate::request::{Output, Request};

/// Relational query descriptions to `SurrealQL`.
#[derive(Parser)]
#[command(name = "oxide-surql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON grammar configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefix prepended to every table name.
    #[arg(long, env = "SURQL_TABLE_PREFIX")]
    table_prefix: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON request and print the statement and its bindings.
    Compile {
        /// Request file (stdin if not specified).
        file: Option<PathBuf>,
    },

    /// List the operator aliases and what they compile to.
    Operators,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Compile { file } => {
            let config = config::load(cli.config.as_deref(), cli.table_prefix)?;
            let grammar = Grammar::with_config(config);

            let input = read_input(file.as_ref())?;
            let request: Request =
                serde_json::from_str(&input).context("Invalid compile request")?;
            debug!(?request, "Parsed request");

            match request.compile(&grammar) {
                Ok(statement) => {
                    let output = Output::from(&statement);
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                Err(err) => {
                    error!(%err, "Compilation failed");
                    process::exit(1);
                }
            }
        }

        Commands::Operators => {
            for (alias, operator) in ALIASES {
                println!("{alias:<14} {operator}");
            }
        }
    }

    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read request from stdin")?;
            Ok(input)
        }
    }
}
