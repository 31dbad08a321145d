use serde::{Deserialize, Serialize};

use super::blog::Blog;
use super::{BlogId, PostId};

/// Post - one article belonging to exactly one Blog
///
/// The owning Blog is referenced by `blog_id` only; resolving it is a lookup
/// performed by the store (see [`PostWithBlog`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Primary key, assigned by the store on insert
    pub post_id: PostId,

    pub title: String,

    pub content: String,

    /// Foreign key to the owning Blog
    pub blog_id: BlogId,
}

impl Post {
    pub fn new(post_id: PostId, blog_id: BlogId, title: String, content: String) -> Self {
        Self {
            post_id,
            title,
            content,
            blog_id,
        }
    }
}

/// A Post together with the Blog it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithBlog {
    pub post: Post,
    pub blog: Blog,
}

/// Input for a post created together with its blog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Field mutations for an existing Post
///
/// `None` leaves a field untouched. Setting `blog_id` moves the post to
/// another blog, which must exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub blog_id: Option<BlogId>,
}

impl PostUpdate {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn blog_id(mut self, blog_id: BlogId) -> Self {
        self.blog_id = Some(blog_id);
        self
    }

    /// Apply the non-empty fields of this update to a post
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if let Some(blog_id) = self.blog_id {
            post.blog_id = blog_id;
        }
    }
}
