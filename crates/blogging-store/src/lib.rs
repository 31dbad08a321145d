//! Blogging Store - SQLite persistence for blogs, posts and sequences
//!
//! Provides:
//! - Connection setup (foreign keys, WAL journal, busy timeout)
//! - Embedded, checksummed schema migrations
//! - Row-level SQL for the `blogs`, `posts` and `sequences` tables
//! - `SqliteStore`, the durable `BlogStore` implementation

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod sequence;
pub mod store;

// Re-export key types
pub use db::ConnectionOptions;
pub use errors::Result;
pub use store::SqliteStore;
