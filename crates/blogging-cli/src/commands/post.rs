//! Post commands

use blogging_core::errors::ExError;
use blogging_core::{BlogId, Command, PostId, PostUpdate};
use blogging_store::SqliteStore;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct PostArgs {
    #[command(subcommand)]
    pub command: PostCommand,
}

#[derive(Debug, Subcommand)]
pub enum PostCommand {
    /// Create a post in an existing blog and print its id
    Create {
        blog_id: BlogId,
        title: String,
        #[arg(default_value = "")]
        content: String,
    },

    /// Show a post with its blog
    Get { post_id: PostId },

    /// List the posts of a blog
    List { blog_id: BlogId },

    /// Change a post's fields; omitted fields are kept
    Update {
        post_id: PostId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Move the post to another blog
        #[arg(long)]
        blog_id: Option<BlogId>,
    },

    /// Delete a post
    Delete { post_id: PostId },
}

pub fn execute(args: PostArgs, store: &mut SqliteStore) -> Result<(), ExError> {
    let cmd = match args.command {
        PostCommand::Create {
            blog_id,
            title,
            content,
        } => Command::PostCreate {
            blog_id,
            title,
            content,
        },
        PostCommand::Get { post_id } => Command::PostGet { post_id },
        PostCommand::List { blog_id } => Command::PostList { blog_id },
        PostCommand::Update {
            post_id,
            title,
            content,
            blog_id,
        } => Command::PostUpdate {
            post_id,
            update: PostUpdate {
                title,
                content,
                blog_id,
            },
        },
        PostCommand::Delete { post_id } => Command::PostDelete { post_id },
    };
    super::run(store, cmd)
}
