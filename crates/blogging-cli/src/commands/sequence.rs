//! Sequence commands

use blogging_core::errors::ExError;
use blogging_core::Command;
use blogging_store::SqliteStore;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct SequenceArgs {
    #[command(subcommand)]
    pub command: SequenceCommand,
}

#[derive(Debug, Subcommand)]
pub enum SequenceCommand {
    /// Draw the next BlogNumbers value
    Next,
}

pub fn execute(args: SequenceArgs, store: &mut SqliteStore) -> Result<(), ExError> {
    match args.command {
        SequenceCommand::Next => super::run(store, Command::NextBlogNumber),
    }
}
