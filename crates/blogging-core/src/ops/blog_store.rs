//! The Blog Store contract
//!
//! Implemented by [`MemoryStore`] here and by the SQLite store in
//! `blogging-store`, so callers and tests can run against either.

use std::time::Instant;

use super::store::MemoryStore;
use super::{blog_ops, post_ops};
use crate::errors::Result;
use crate::model::{
    Blog, BlogId, BlogUpdate, BlogWithPosts, NewPost, Post, PostId, PostUpdate, PostWithBlog,
};
use crate::policy::{DeleteOutcome, DeletePolicy};
use crate::{log_op_end, log_op_error, log_op_start};

/// Durable storage and retrieval of Blogs, Posts and the `BlogNumbers`
/// sequence
///
/// Errors are surfaced to the caller and never retried.
pub trait BlogStore {
    /// Insert a Blog; fails with `InvalidUrl` on a constraint violation
    fn create_blog(&mut self, url: &str) -> Result<BlogId>;

    /// Insert a Blog and its Posts atomically
    fn create_blog_with_posts(
        &mut self,
        url: &str,
        posts: &[NewPost],
    ) -> Result<(BlogId, Vec<PostId>)>;

    /// Insert a Post; fails with `BlogForeignKeyViolation` if the blog is missing
    fn create_post(&mut self, blog_id: BlogId, title: &str, content: &str) -> Result<PostId>;

    /// Read a Blog with its Posts; fails with `BlogNotFound`
    fn get_blog(&self, blog_id: BlogId) -> Result<BlogWithPosts>;

    /// Read a Post with its Blog; fails with `PostNotFound`
    fn get_post(&self, post_id: PostId) -> Result<PostWithBlog>;

    fn list_blogs(&self) -> Result<Vec<Blog>>;

    /// Posts of one Blog; fails with `BlogNotFound`
    fn list_posts(&self, blog_id: BlogId) -> Result<Vec<Post>>;

    /// Mutate a Blog; fails with `BlogNotFound` if it no longer exists
    fn update_blog(&mut self, blog_id: BlogId, update: &BlogUpdate) -> Result<Blog>;

    /// Mutate a Post; fails with `PostNotFound` if it no longer exists
    fn update_post(&mut self, post_id: PostId, update: &PostUpdate) -> Result<Post>;

    /// Delete a Blog, resolving its Posts according to `policy`
    fn delete_blog(&mut self, blog_id: BlogId, policy: DeletePolicy) -> Result<DeleteOutcome>;

    /// Delete a Post; fails with `PostNotFound`
    fn delete_post(&mut self, post_id: PostId) -> Result<()>;

    /// Draw the next value from `BlogNumbers`
    fn next_blog_number(&mut self) -> Result<i64>;
}

/// Run one store operation inside the `start` / `end` / `end_error` lifecycle
fn logged<T>(op: &'static str, run: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op);
    let start = Instant::now();

    match run() {
        Ok(value) => {
            log_op_end!(op, duration_ms = elapsed_ms(start));
            Ok(value)
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = elapsed_ms(start));
            Err(err)
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

impl BlogStore for MemoryStore {
    fn create_blog(&mut self, url: &str) -> Result<BlogId> {
        logged("create_blog", || blog_ops::create_blog(self, url))
    }

    fn create_blog_with_posts(
        &mut self,
        url: &str,
        posts: &[NewPost],
    ) -> Result<(BlogId, Vec<PostId>)> {
        logged("create_blog_with_posts", || {
            blog_ops::create_blog_with_posts(self, url, posts)
        })
    }

    fn create_post(&mut self, blog_id: BlogId, title: &str, content: &str) -> Result<PostId> {
        logged("create_post", || {
            post_ops::create_post(self, blog_id, title, content)
        })
    }

    fn get_blog(&self, blog_id: BlogId) -> Result<BlogWithPosts> {
        logged("get_blog", || blog_ops::get_blog(self, blog_id))
    }

    fn get_post(&self, post_id: PostId) -> Result<PostWithBlog> {
        logged("get_post", || post_ops::get_post(self, post_id))
    }

    fn list_blogs(&self) -> Result<Vec<Blog>> {
        logged("list_blogs", || Ok(blog_ops::list_blogs(self)))
    }

    fn list_posts(&self, blog_id: BlogId) -> Result<Vec<Post>> {
        logged("list_posts", || post_ops::list_posts(self, blog_id))
    }

    fn update_blog(&mut self, blog_id: BlogId, update: &BlogUpdate) -> Result<Blog> {
        logged("update_blog", || blog_ops::update_blog(self, blog_id, update))
    }

    fn update_post(&mut self, post_id: PostId, update: &PostUpdate) -> Result<Post> {
        logged("update_post", || post_ops::update_post(self, post_id, update))
    }

    fn delete_blog(&mut self, blog_id: BlogId, policy: DeletePolicy) -> Result<DeleteOutcome> {
        logged("delete_blog", || blog_ops::delete_blog(self, blog_id, policy))
    }

    fn delete_post(&mut self, post_id: PostId) -> Result<()> {
        logged("delete_post", || {
            post_ops::delete_post(self, post_id).map(|_| ())
        })
    }

    fn next_blog_number(&mut self) -> Result<i64> {
        logged("next_blog_number", || self.blog_numbers().next_value())
    }
}
