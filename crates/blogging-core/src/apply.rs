//! Command dispatch
//!
//! [`apply`] is the single entry point front ends use to run a [`Command`]
//! against a [`BlogStore`]. Atomicity is the store's responsibility: each
//! store operation either fully succeeds or leaves the store unchanged.
//!
//! ## Example
//!
//! ```
//! use blogging_core::{apply, Command, CommandResult, MemoryStore};
//!
//! let mut store = MemoryStore::new();
//! let created = apply(&mut store, Command::BlogCreate {
//!     url: "http://example.com".to_string(),
//! })
//! .unwrap();
//!
//! assert_eq!(created, CommandResult::BlogCreated { blog_id: 1 });
//! ```

use crate::commands::{Command, CommandResult};
use crate::errors::Result;
use crate::ops::BlogStore;

/// Apply a command to a store
///
/// # Errors
///
/// Returns the store's error unchanged; see `BlogError` for the taxonomy.
pub fn apply<S: BlogStore + ?Sized>(store: &mut S, cmd: Command) -> Result<CommandResult> {
    match cmd {
        Command::BlogCreate { url } => store
            .create_blog(&url)
            .map(|blog_id| CommandResult::BlogCreated { blog_id }),

        Command::BlogCreateWithPosts { url, posts } => store
            .create_blog_with_posts(&url, &posts)
            .map(|(blog_id, post_ids)| CommandResult::BlogCreatedWithPosts { blog_id, post_ids }),

        Command::BlogGet { blog_id } => store.get_blog(blog_id).map(CommandResult::Blog),

        Command::BlogList => store.list_blogs().map(CommandResult::Blogs),

        Command::BlogUpdate { blog_id, update } => store
            .update_blog(blog_id, &update)
            .map(CommandResult::BlogUpdated),

        Command::BlogDelete { blog_id, policy } => store
            .delete_blog(blog_id, policy)
            .map(CommandResult::BlogDeleted),

        Command::PostCreate {
            blog_id,
            title,
            content,
        } => store
            .create_post(blog_id, &title, &content)
            .map(|post_id| CommandResult::PostCreated { post_id }),

        Command::PostGet { post_id } => store.get_post(post_id).map(CommandResult::Post),

        Command::PostList { blog_id } => store.list_posts(blog_id).map(CommandResult::Posts),

        Command::PostUpdate { post_id, update } => store
            .update_post(post_id, &update)
            .map(CommandResult::PostUpdated),

        Command::PostDelete { post_id } => store
            .delete_post(post_id)
            .map(|()| CommandResult::PostDeleted { post_id }),

        Command::NextBlogNumber => store
            .next_blog_number()
            .map(|value| CommandResult::BlogNumber { value }),
    }
}
