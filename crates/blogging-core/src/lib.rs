//! Blogging Core - the persistence model for blogs and their posts
//!
//! This crate provides:
//! - Blog and Post row types, with the Blog -> Posts relation derived by
//!   foreign-key lookup
//! - The `BlogStore` contract and an in-memory, arena-style implementation
//! - The `BlogNumbers` sequence
//! - Schema constraint validation and store invariants
//! - The error facility (`BlogError`, `ExError`, `ExErrorKind`)
//! - The structured logging facility
//! - A command inventory dispatched through `apply()`

pub mod apply;
pub mod commands;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod policy;
pub mod rules;
pub mod sequence;

pub use blogging_core_types as core_types;

// Re-export commonly used types
pub use apply::apply;
pub use commands::{Command, CommandResult};
pub use errors::{BlogError, ExError, ExErrorKind, Result};
pub use model::{
    Blog, BlogId, BlogUpdate, BlogWithPosts, NewPost, Post, PostId, PostUpdate, PostWithBlog,
};
pub use ops::{BlogStore, MemoryStore};
pub use policy::{DeleteOutcome, DeletePolicy};
pub use sequence::{Sequence, SequenceDefinition, BLOG_NUMBERS};
