//! Blog commands

use blogging_core::errors::ExError;
use blogging_core::{BlogId, BlogUpdate, Command, DeletePolicy};
use blogging_store::SqliteStore;
use clap::{Args, Subcommand};

use crate::config::BloggingConfig;

#[derive(Debug, Args)]
pub struct BlogArgs {
    #[command(subcommand)]
    pub command: BlogCommand,
}

#[derive(Debug, Subcommand)]
pub enum BlogCommand {
    /// Create a blog and print its id
    Create { url: String },

    /// Show a blog with its posts
    Get { blog_id: BlogId },

    /// List every blog
    List,

    /// Change a blog's url
    Update {
        blog_id: BlogId,
        #[arg(long)]
        url: String,
    },

    /// Delete a blog; its posts are handled by the delete policy
    Delete {
        blog_id: BlogId,
        /// cascade or restrict (defaults to `delete_policy` from config)
        #[arg(long)]
        policy: Option<DeletePolicy>,
    },
}

pub fn execute(
    args: BlogArgs,
    store: &mut SqliteStore,
    config: &BloggingConfig,
) -> Result<(), ExError> {
    let cmd = match args.command {
        BlogCommand::Create { url } => Command::BlogCreate { url },
        BlogCommand::Get { blog_id } => Command::BlogGet { blog_id },
        BlogCommand::List => Command::BlogList,
        BlogCommand::Update { blog_id, url } => Command::BlogUpdate {
            blog_id,
            update: BlogUpdate::url(url),
        },
        BlogCommand::Delete { blog_id, policy } => Command::BlogDelete {
            blog_id,
            policy: policy.unwrap_or(config.delete_policy),
        },
    };
    super::run(store, cmd)
}
