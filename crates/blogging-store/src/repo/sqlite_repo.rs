//! SQLite repository implementation
//!
//! Reads and writes `blogs` and `posts` rows. No validation happens here
//! beyond what the schema enforces; callers validate first.

use crate::errors::{blog_reference_error, from_rusqlite, Result};
use blogging_core::model::{Blog, BlogId, Post, PostId};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// SQLite repository for Blogs and Posts
pub struct SqliteRepo;

fn blog_from_row(row: &Row<'_>) -> rusqlite::Result<Blog> {
    Ok(Blog::new(row.get(0)?, row.get(1)?))
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post::new(row.get(0)?, row.get(3)?, row.get(1)?, row.get(2)?))
}

impl SqliteRepo {
    /// Insert a Blog row and return its new id
    pub fn insert_blog(conn: &Connection, url: &str) -> Result<BlogId> {
        conn.execute("INSERT INTO blogs (url) VALUES (?1)", [url])
            .map_err(from_rusqlite)?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a Post row and return its new id
    ///
    /// A missing blog surfaces as `BlogForeignKeyViolation`.
    pub fn insert_post(
        conn: &Connection,
        blog_id: BlogId,
        title: &str,
        content: &str,
    ) -> Result<PostId> {
        conn.execute(
            "INSERT INTO posts (title, content, blog_id) VALUES (?1, ?2, ?3)",
            params![title, content, blog_id],
        )
        .map_err(|e| blog_reference_error(e, blog_id))?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_blog(conn: &Connection, blog_id: BlogId) -> Result<Option<Blog>> {
        conn.query_row(
            "SELECT blog_id, url FROM blogs WHERE blog_id = ?1",
            [blog_id],
            blog_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn get_post(conn: &Connection, post_id: PostId) -> Result<Option<Post>> {
        conn.query_row(
            "SELECT post_id, title, content, blog_id FROM posts WHERE post_id = ?1",
            [post_id],
            post_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// All Blog rows, ordered by id
    pub fn list_blogs(conn: &Connection) -> Result<Vec<Blog>> {
        let mut stmt = conn
            .prepare("SELECT blog_id, url FROM blogs ORDER BY blog_id")
            .map_err(from_rusqlite)?;
        let blogs = stmt
            .query_map([], blog_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(blogs)
    }

    /// Posts whose `blog_id` is the given blog, ordered by id
    pub fn list_posts_of(conn: &Connection, blog_id: BlogId) -> Result<Vec<Post>> {
        let mut stmt = conn
            .prepare(
                "SELECT post_id, title, content, blog_id FROM posts
                 WHERE blog_id = ?1 ORDER BY post_id",
            )
            .map_err(from_rusqlite)?;
        let posts = stmt
            .query_map([blog_id], post_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        Ok(posts)
    }

    pub fn count_posts_of(conn: &Connection, blog_id: BlogId) -> Result<usize> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM posts WHERE blog_id = ?1",
                [blog_id],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Overwrite a Blog's url; returns false if the row is gone
    pub fn update_blog_url(conn: &Connection, blog_id: BlogId, url: &str) -> Result<bool> {
        let changed = conn
            .execute(
                "UPDATE blogs SET url = ?1 WHERE blog_id = ?2",
                params![url, blog_id],
            )
            .map_err(from_rusqlite)?;
        Ok(changed > 0)
    }

    /// Overwrite every column of a Post row; returns false if the row is gone
    pub fn update_post(conn: &Connection, post: &Post) -> Result<bool> {
        let changed = conn
            .execute(
                "UPDATE posts SET title = ?1, content = ?2, blog_id = ?3 WHERE post_id = ?4",
                params![post.title, post.content, post.blog_id, post.post_id],
            )
            .map_err(|e| blog_reference_error(e, post.blog_id))?;
        Ok(changed > 0)
    }

    /// Delete every Post of a Blog; returns how many were removed
    pub fn delete_posts_of(conn: &Connection, blog_id: BlogId) -> Result<usize> {
        conn.execute("DELETE FROM posts WHERE blog_id = ?1", [blog_id])
            .map_err(from_rusqlite)
    }

    /// Delete a Blog row; returns false if it did not exist
    ///
    /// Fails with a foreign key violation while posts still reference it.
    pub fn delete_blog(conn: &Connection, blog_id: BlogId) -> Result<bool> {
        let changed = conn
            .execute("DELETE FROM blogs WHERE blog_id = ?1", [blog_id])
            .map_err(from_rusqlite)?;
        Ok(changed > 0)
    }

    /// Delete a Post row; returns false if it did not exist
    pub fn delete_post(conn: &Connection, post_id: PostId) -> Result<bool> {
        let changed = conn
            .execute("DELETE FROM posts WHERE post_id = ?1", [post_id])
            .map_err(from_rusqlite)?;
        Ok(changed > 0)
    }
}
