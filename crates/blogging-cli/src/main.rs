//! Blogging CLI
//!
//! Command-line interface over the SQLite blog store

use std::path::PathBuf;

use blogging_core::errors::ExError;
use blogging_core::logging_facility;
use clap::{Parser, Subcommand};

mod commands;
mod config;

use crate::config::{BloggingConfig, DEFAULT_CONFIG_FILE};

#[derive(Debug, Parser)]
#[command(name = "blogging")]
#[command(about = "Blogging - blogs, posts and blog numbers in SQLite", long_about = None)]
struct Cli {
    /// TOML configuration file (ignored when absent)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// SQLite database file; overrides `db_path` from config and environment
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Blog operations
    Blog(commands::blog::BlogArgs),
    /// Post operations
    Post(commands::post::PostArgs),
    /// Sequence operations
    Sequence(commands::sequence::SequenceArgs),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ExError> {
    let config = BloggingConfig::load(&cli.config, cli.db.as_deref())?;
    logging_facility::init(config.profile()?);

    let mut store = commands::open_store(&config)?;

    match cli.command {
        Commands::Migrate => commands::migrate::execute(&store),
        Commands::Blog(args) => commands::blog::execute(args, &mut store, &config),
        Commands::Post(args) => commands::post::execute(args, &mut store),
        Commands::Sequence(args) => commands::sequence::execute(args, &mut store),
    }
}
