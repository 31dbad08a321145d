//! Command types representing every Blog Store operation
//!
//! Front ends build a [`Command`] and hand it to [`crate::apply::apply`],
//! which dispatches it against any [`crate::ops::BlogStore`].

use serde::Serialize;

use crate::model::{
    Blog, BlogId, BlogUpdate, BlogWithPosts, NewPost, Post, PostId, PostUpdate, PostWithBlog,
};
use crate::policy::{DeleteOutcome, DeletePolicy};

/// One Blog Store operation with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a new Blog
    BlogCreate { url: String },

    /// Create a Blog together with its Posts in one unit
    BlogCreateWithPosts { url: String, posts: Vec<NewPost> },

    /// Read a Blog with its Posts
    BlogGet { blog_id: BlogId },

    /// List every Blog
    BlogList,

    /// Update a Blog's fields
    BlogUpdate { blog_id: BlogId, update: BlogUpdate },

    /// Delete a Blog, resolving its Posts by policy
    BlogDelete {
        blog_id: BlogId,
        policy: DeletePolicy,
    },

    /// Create a new Post in an existing Blog
    PostCreate {
        blog_id: BlogId,
        title: String,
        content: String,
    },

    /// Read a Post with its Blog
    PostGet { post_id: PostId },

    /// List the Posts of one Blog
    PostList { blog_id: BlogId },

    /// Update a Post's fields
    PostUpdate { post_id: PostId, update: PostUpdate },

    /// Delete a Post
    PostDelete { post_id: PostId },

    /// Draw the next `BlogNumbers` value
    NextBlogNumber,
}

impl Command {
    /// Stable operation name, used as the `op` field in logs
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::BlogCreate { .. } => "create_blog",
            Command::BlogCreateWithPosts { .. } => "create_blog_with_posts",
            Command::BlogGet { .. } => "get_blog",
            Command::BlogList => "list_blogs",
            Command::BlogUpdate { .. } => "update_blog",
            Command::BlogDelete { .. } => "delete_blog",
            Command::PostCreate { .. } => "create_post",
            Command::PostGet { .. } => "get_post",
            Command::PostList { .. } => "list_posts",
            Command::PostUpdate { .. } => "update_post",
            Command::PostDelete { .. } => "delete_post",
            Command::NextBlogNumber => "next_blog_number",
        }
    }

    /// Whether the command writes to the store
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Command::BlogGet { .. }
                | Command::BlogList
                | Command::PostGet { .. }
                | Command::PostList { .. }
        )
    }
}

/// Output of an applied command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandResult {
    BlogCreated { blog_id: BlogId },
    BlogCreatedWithPosts { blog_id: BlogId, post_ids: Vec<PostId> },
    Blog(BlogWithPosts),
    Blogs(Vec<Blog>),
    BlogUpdated(Blog),
    BlogDeleted(DeleteOutcome),
    PostCreated { post_id: PostId },
    Post(PostWithBlog),
    Posts(Vec<Post>),
    PostUpdated(Post),
    PostDeleted { post_id: PostId },
    BlogNumber { value: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_are_not_mutations() {
        assert!(!Command::BlogGet { blog_id: 1 }.is_mutation());
        assert!(!Command::PostList { blog_id: 1 }.is_mutation());
        assert!(Command::NextBlogNumber.is_mutation());
        assert!(Command::PostDelete { post_id: 1 }.is_mutation());
    }

    #[test]
    fn test_result_serializes_flat() {
        let json = serde_json::to_value(CommandResult::BlogCreated { blog_id: 4 }).unwrap();
        assert_eq!(json, serde_json::json!({"blog_id": 4}));
    }
}
