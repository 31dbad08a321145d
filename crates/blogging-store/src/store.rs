//! SQLite-backed Blog Store
//!
//! `SqliteStore` owns one connection. Every `BlogStore` operation runs as one
//! unit: writes that touch more than one row use a transaction, and each
//! operation logs its `start` / `end` / `end_error` lifecycle.
//!
//! A store is used from one thread at a time. Concurrent callers open their
//! own `SqliteStore` on the same file; SQLite's locking (with the busy
//! timeout) serializes their writes.

use std::path::Path;
use std::time::Instant;

use blogging_core::errors::BlogError;
use blogging_core::model::{
    Blog, BlogId, BlogUpdate, BlogWithPosts, NewPost, Post, PostId, PostUpdate, PostWithBlog,
};
use blogging_core::ops::BlogStore;
use blogging_core::policy::{DeleteOutcome, DeletePolicy};
use blogging_core::rules::{validate_title, validate_url};
use blogging_core::sequence::BLOG_NUMBERS;
use blogging_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::db::{self, ConnectionOptions};
use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;
use crate::repo::SqliteRepo;
use crate::sequence;

/// Durable `BlogStore` over a SQLite database
pub struct SqliteStore {
    conn: Connection,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and bring its schema
    /// up to date
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or a migration fails.
    pub fn open<P: AsRef<Path>>(path: P, options: &ConnectionOptions) -> Result<Self> {
        let conn = db::open(path)?;
        Self::from_connection(conn, options)
    }

    /// Open a private in-memory database (for testing)
    ///
    /// # Errors
    ///
    /// Fails if a migration fails.
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Self::from_connection(conn, &ConnectionOptions::default())
    }

    /// Configure an existing connection and apply pending migrations
    ///
    /// # Errors
    ///
    /// Fails if the connection cannot be configured or a migration fails.
    pub fn from_connection(mut conn: Connection, options: &ConnectionOptions) -> Result<Self> {
        db::configure(&conn, options)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// The underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Start a transaction that holds the write lock from its first statement
    ///
    /// A deferred transaction that reads before writing cannot wait out a
    /// concurrent writer in WAL mode; SQLite answers `SQLITE_BUSY` at once.
    fn begin_write(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)
    }

    fn create_blog_impl(&mut self, url: &str) -> Result<BlogId> {
        validate_url(url)?;
        SqliteRepo::insert_blog(&self.conn, url)
    }

    fn create_blog_with_posts_impl(
        &mut self,
        url: &str,
        posts: &[NewPost],
    ) -> Result<(BlogId, Vec<PostId>)> {
        validate_url(url)?;
        for post in posts {
            validate_title(&post.title)?;
        }

        let tx = self.begin_write()?;
        let blog_id = SqliteRepo::insert_blog(&tx, url)?;
        let post_ids = posts
            .iter()
            .map(|post| SqliteRepo::insert_post(&tx, blog_id, &post.title, &post.content))
            .collect::<Result<Vec<_>>>()?;
        tx.commit().map_err(from_rusqlite)?;

        Ok((blog_id, post_ids))
    }

    fn create_post_impl(&mut self, blog_id: BlogId, title: &str, content: &str) -> Result<PostId> {
        validate_title(title)?;
        SqliteRepo::insert_post(&self.conn, blog_id, title, content)
    }

    fn get_blog_impl(&self, blog_id: BlogId) -> Result<BlogWithPosts> {
        let blog = SqliteRepo::get_blog(&self.conn, blog_id)?
            .ok_or(BlogError::BlogNotFound { blog_id })?;
        let posts = SqliteRepo::list_posts_of(&self.conn, blog_id)?;
        Ok(BlogWithPosts::new(blog, posts))
    }

    fn get_post_impl(&self, post_id: PostId) -> Result<PostWithBlog> {
        let post = SqliteRepo::get_post(&self.conn, post_id)?
            .ok_or(BlogError::PostNotFound { post_id })?;
        let blog = SqliteRepo::get_blog(&self.conn, post.blog_id)?.ok_or_else(|| {
            BlogError::Internal {
                message: format!("post {} references missing blog {}", post_id, post.blog_id),
            }
        })?;
        Ok(PostWithBlog { post, blog })
    }

    fn list_posts_impl(&self, blog_id: BlogId) -> Result<Vec<Post>> {
        if SqliteRepo::get_blog(&self.conn, blog_id)?.is_none() {
            return Err(BlogError::BlogNotFound { blog_id });
        }
        SqliteRepo::list_posts_of(&self.conn, blog_id)
    }

    fn update_blog_impl(&mut self, blog_id: BlogId, update: &BlogUpdate) -> Result<Blog> {
        if let Some(url) = &update.url {
            validate_url(url)?;
        }

        let tx = self.begin_write()?;
        if let Some(url) = &update.url {
            if !SqliteRepo::update_blog_url(&tx, blog_id, url)? {
                return Err(BlogError::BlogNotFound { blog_id });
            }
        }
        let blog = SqliteRepo::get_blog(&tx, blog_id)?.ok_or(BlogError::BlogNotFound { blog_id })?;
        tx.commit().map_err(from_rusqlite)?;

        Ok(blog)
    }

    fn update_post_impl(&mut self, post_id: PostId, update: &PostUpdate) -> Result<Post> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }

        let tx = self.begin_write()?;
        let mut post = SqliteRepo::get_post(&tx, post_id)?.ok_or(BlogError::PostNotFound { post_id })?;
        update.apply_to(&mut post);
        if !SqliteRepo::update_post(&tx, &post)? {
            return Err(BlogError::PostNotFound { post_id });
        }
        tx.commit().map_err(from_rusqlite)?;

        Ok(post)
    }

    fn delete_blog_impl(&mut self, blog_id: BlogId, policy: DeletePolicy) -> Result<DeleteOutcome> {
        let tx = self.begin_write()?;

        if SqliteRepo::get_blog(&tx, blog_id)?.is_none() {
            return Err(BlogError::BlogNotFound { blog_id });
        }

        let posts_deleted = match policy {
            DeletePolicy::Cascade => SqliteRepo::delete_posts_of(&tx, blog_id)?,
            DeletePolicy::Restrict => {
                let post_count = SqliteRepo::count_posts_of(&tx, blog_id)?;
                if post_count > 0 {
                    return Err(BlogError::BlogHasPosts {
                        blog_id,
                        post_count,
                    });
                }
                0
            }
        };
        SqliteRepo::delete_blog(&tx, blog_id)?;
        tx.commit().map_err(from_rusqlite)?;

        Ok(DeleteOutcome {
            blog_id,
            policy,
            posts_deleted,
        })
    }

    fn delete_post_impl(&mut self, post_id: PostId) -> Result<()> {
        if SqliteRepo::delete_post(&self.conn, post_id)? {
            Ok(())
        } else {
            Err(BlogError::PostNotFound { post_id })
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

impl BlogStore for SqliteStore {
    fn create_blog(&mut self, url: &str) -> Result<BlogId> {
        log_op_start!("create_blog");
        let start = Instant::now();

        let blog_id = self.create_blog_impl(url).map_err(|e| {
            log_op_error!("create_blog", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!("create_blog", duration_ms = elapsed_ms(start), blog_id = blog_id);
        Ok(blog_id)
    }

    fn create_blog_with_posts(
        &mut self,
        url: &str,
        posts: &[NewPost],
    ) -> Result<(BlogId, Vec<PostId>)> {
        log_op_start!("create_blog_with_posts", post_count = posts.len());
        let start = Instant::now();

        let (blog_id, post_ids) = self.create_blog_with_posts_impl(url, posts).map_err(|e| {
            log_op_error!(
                "create_blog_with_posts",
                e.clone(),
                duration_ms = elapsed_ms(start)
            );
            e
        })?;

        log_op_end!(
            "create_blog_with_posts",
            duration_ms = elapsed_ms(start),
            blog_id = blog_id,
            post_count = post_ids.len()
        );
        Ok((blog_id, post_ids))
    }

    fn create_post(&mut self, blog_id: BlogId, title: &str, content: &str) -> Result<PostId> {
        log_op_start!("create_post", blog_id = blog_id);
        let start = Instant::now();

        let post_id = self
            .create_post_impl(blog_id, title, content)
            .map_err(|e| {
                log_op_error!(
                    "create_post",
                    e.clone(),
                    duration_ms = elapsed_ms(start),
                    blog_id = blog_id
                );
                e
            })?;

        log_op_end!(
            "create_post",
            duration_ms = elapsed_ms(start),
            blog_id = blog_id,
            post_id = post_id
        );
        Ok(post_id)
    }

    fn get_blog(&self, blog_id: BlogId) -> Result<BlogWithPosts> {
        log_op_start!("get_blog", blog_id = blog_id);
        let start = Instant::now();

        let blog = self.get_blog_impl(blog_id).map_err(|e| {
            log_op_error!(
                "get_blog",
                e.clone(),
                duration_ms = elapsed_ms(start),
                blog_id = blog_id
            );
            e
        })?;

        log_op_end!(
            "get_blog",
            duration_ms = elapsed_ms(start),
            blog_id = blog_id,
            post_count = blog.posts.len()
        );
        Ok(blog)
    }

    fn get_post(&self, post_id: PostId) -> Result<PostWithBlog> {
        log_op_start!("get_post", post_id = post_id);
        let start = Instant::now();

        let post = self.get_post_impl(post_id).map_err(|e| {
            log_op_error!(
                "get_post",
                e.clone(),
                duration_ms = elapsed_ms(start),
                post_id = post_id
            );
            e
        })?;

        log_op_end!("get_post", duration_ms = elapsed_ms(start), post_id = post_id);
        Ok(post)
    }

    fn list_blogs(&self) -> Result<Vec<Blog>> {
        log_op_start!("list_blogs");
        let start = Instant::now();

        let blogs = SqliteRepo::list_blogs(&self.conn).map_err(|e| {
            log_op_error!("list_blogs", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!(
            "list_blogs",
            duration_ms = elapsed_ms(start),
            blog_count = blogs.len()
        );
        Ok(blogs)
    }

    fn list_posts(&self, blog_id: BlogId) -> Result<Vec<Post>> {
        log_op_start!("list_posts", blog_id = blog_id);
        let start = Instant::now();

        let posts = self.list_posts_impl(blog_id).map_err(|e| {
            log_op_error!(
                "list_posts",
                e.clone(),
                duration_ms = elapsed_ms(start),
                blog_id = blog_id
            );
            e
        })?;

        log_op_end!(
            "list_posts",
            duration_ms = elapsed_ms(start),
            blog_id = blog_id,
            post_count = posts.len()
        );
        Ok(posts)
    }

    fn update_blog(&mut self, blog_id: BlogId, update: &BlogUpdate) -> Result<Blog> {
        log_op_start!("update_blog", blog_id = blog_id);
        let start = Instant::now();

        let blog = self.update_blog_impl(blog_id, update).map_err(|e| {
            log_op_error!(
                "update_blog",
                e.clone(),
                duration_ms = elapsed_ms(start),
                blog_id = blog_id
            );
            e
        })?;

        log_op_end!("update_blog", duration_ms = elapsed_ms(start), blog_id = blog_id);
        Ok(blog)
    }

    fn update_post(&mut self, post_id: PostId, update: &PostUpdate) -> Result<Post> {
        log_op_start!("update_post", post_id = post_id);
        let start = Instant::now();

        let post = self.update_post_impl(post_id, update).map_err(|e| {
            log_op_error!(
                "update_post",
                e.clone(),
                duration_ms = elapsed_ms(start),
                post_id = post_id
            );
            e
        })?;

        log_op_end!(
            "update_post",
            duration_ms = elapsed_ms(start),
            post_id = post_id,
            blog_id = post.blog_id
        );
        Ok(post)
    }

    fn delete_blog(&mut self, blog_id: BlogId, policy: DeletePolicy) -> Result<DeleteOutcome> {
        log_op_start!("delete_blog", blog_id = blog_id, policy = %policy);
        let start = Instant::now();

        let outcome = self.delete_blog_impl(blog_id, policy).map_err(|e| {
            log_op_error!(
                "delete_blog",
                e.clone(),
                duration_ms = elapsed_ms(start),
                blog_id = blog_id
            );
            e
        })?;

        log_op_end!(
            "delete_blog",
            duration_ms = elapsed_ms(start),
            blog_id = blog_id,
            posts_deleted = outcome.posts_deleted
        );
        Ok(outcome)
    }

    fn delete_post(&mut self, post_id: PostId) -> Result<()> {
        log_op_start!("delete_post", post_id = post_id);
        let start = Instant::now();

        self.delete_post_impl(post_id).map_err(|e| {
            log_op_error!(
                "delete_post",
                e.clone(),
                duration_ms = elapsed_ms(start),
                post_id = post_id
            );
            e
        })?;

        log_op_end!("delete_post", duration_ms = elapsed_ms(start), post_id = post_id);
        Ok(())
    }

    fn next_blog_number(&mut self) -> Result<i64> {
        log_op_start!("next_blog_number");
        let start = Instant::now();

        let value = sequence::next_value(&mut self.conn, BLOG_NUMBERS).map_err(|e| {
            log_op_error!(
                "next_blog_number",
                e.clone(),
                duration_ms = elapsed_ms(start)
            );
            e
        })?;

        log_op_end!(
            "next_blog_number",
            duration_ms = elapsed_ms(start),
            value = value
        );
        Ok(value)
    }
}
