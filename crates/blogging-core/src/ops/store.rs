use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::{BlogError, Result};
use crate::model::{Blog, BlogId, Post, PostId};
use crate::sequence::Sequence;

/// In-memory arena store for Blogs and Posts
///
/// Rows live in id-keyed maps; the Blog -> Posts relation is answered by
/// scanning posts for a matching `blog_id`, never by stored back-pointers.
/// Ids are assigned from per-table counters and are never reused.
///
/// Not thread-safe (no locking) - designed for single-threaded use. The
/// `BlogNumbers` sequence is the exception: it is shared through an `Arc`
/// and safe to draw from on any thread.
#[derive(Debug)]
pub struct MemoryStore {
    /// Map of Blog ID to Blog
    pub(crate) blogs: BTreeMap<BlogId, Blog>,
    /// Map of Post ID to Post
    pub(crate) posts: BTreeMap<PostId, Post>,
    last_blog_id: BlogId,
    last_post_id: PostId,
    blog_numbers: Arc<Sequence>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty MemoryStore
    pub fn new() -> Self {
        Self {
            blogs: BTreeMap::new(),
            posts: BTreeMap::new(),
            last_blog_id: 0,
            last_post_id: 0,
            blog_numbers: Arc::new(Sequence::blog_numbers()),
        }
    }

    /// Get a Blog row by ID
    ///
    /// # Errors
    ///
    /// Returns `BlogNotFound` if the blog doesn't exist.
    pub fn blog_row(&self, id: BlogId) -> Result<&Blog> {
        self.blogs
            .get(&id)
            .ok_or(BlogError::BlogNotFound { blog_id: id })
    }

    /// Get a mutable reference to a Blog row by ID
    ///
    /// # Errors
    ///
    /// Returns `BlogNotFound` if the blog doesn't exist.
    pub fn blog_row_mut(&mut self, id: BlogId) -> Result<&mut Blog> {
        self.blogs
            .get_mut(&id)
            .ok_or(BlogError::BlogNotFound { blog_id: id })
    }

    /// Get a Post row by ID
    ///
    /// # Errors
    ///
    /// Returns `PostNotFound` if the post doesn't exist.
    pub fn post_row(&self, id: PostId) -> Result<&Post> {
        self.posts
            .get(&id)
            .ok_or(BlogError::PostNotFound { post_id: id })
    }

    /// Get a mutable reference to a Post row by ID
    ///
    /// # Errors
    ///
    /// Returns `PostNotFound` if the post doesn't exist.
    pub fn post_row_mut(&mut self, id: PostId) -> Result<&mut Post> {
        self.posts
            .get_mut(&id)
            .ok_or(BlogError::PostNotFound { post_id: id })
    }

    pub fn blog_exists(&self, id: BlogId) -> bool {
        self.blogs.contains_key(&id)
    }

    /// List all Blogs, ordered by id
    pub fn blog_rows(&self) -> Vec<&Blog> {
        self.blogs.values().collect()
    }

    /// Posts whose `blog_id` is the given blog, ordered by id
    pub fn posts_of(&self, blog_id: BlogId) -> Vec<&Post> {
        self.posts
            .values()
            .filter(|post| post.blog_id == blog_id)
            .collect()
    }

    pub fn blog_count(&self) -> usize {
        self.blogs.len()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Insert a Blog row, assigning the next id
    ///
    /// No validation; used by CRUD operations and test helpers.
    pub fn insert_blog_row(&mut self, url: String) -> BlogId {
        self.last_blog_id += 1;
        let blog_id = self.last_blog_id;
        self.blogs.insert(blog_id, Blog::new(blog_id, url));
        blog_id
    }

    /// Insert a Post row, assigning the next id
    ///
    /// No validation or foreign-key check; used by CRUD operations and test
    /// helpers.
    pub fn insert_post_row(&mut self, blog_id: BlogId, title: String, content: String) -> PostId {
        self.last_post_id += 1;
        let post_id = self.last_post_id;
        self.posts
            .insert(post_id, Post::new(post_id, blog_id, title, content));
        post_id
    }

    pub(crate) fn remove_blog_row(&mut self, id: BlogId) -> Option<Blog> {
        self.blogs.remove(&id)
    }

    pub(crate) fn remove_post_row(&mut self, id: PostId) -> Option<Post> {
        self.posts.remove(&id)
    }

    /// Handle to the `BlogNumbers` sequence, shareable across threads
    pub fn blog_numbers(&self) -> Arc<Sequence> {
        Arc::clone(&self.blog_numbers)
    }
}
