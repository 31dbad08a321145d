use crate::errors::{BlogError, Result};
use crate::ops::MemoryStore;

use super::invariants;

/// Longest url accepted, in bytes
pub const MAX_URL_LEN: usize = 2048;

/// Longest post title accepted, in bytes
pub const MAX_TITLE_LEN: usize = 512;

/// Validate a blog url against the schema constraints
///
/// # Errors
///
/// Returns `InvalidUrl` if the url is empty, whitespace-only, or longer than
/// [`MAX_URL_LEN`] bytes.
pub fn validate_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(BlogError::InvalidUrl {
            reason: "Url cannot be empty or whitespace-only".to_string(),
        });
    }
    if url.len() > MAX_URL_LEN {
        return Err(BlogError::InvalidUrl {
            reason: format!("Url is {} bytes, limit is {}", url.len(), MAX_URL_LEN),
        });
    }
    Ok(())
}

/// Validate a post title against the schema constraints
///
/// # Errors
///
/// Returns `InvalidTitle` if the title is empty, whitespace-only, or longer
/// than [`MAX_TITLE_LEN`] bytes.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(BlogError::InvalidTitle {
            reason: "Title cannot be empty or whitespace-only".to_string(),
        });
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(BlogError::InvalidTitle {
            reason: format!("Title is {} bytes, limit is {}", title.len(), MAX_TITLE_LEN),
        });
    }
    Ok(())
}

/// Validate the whole in-memory store
///
/// Checks referential integrity (every post points at an existing blog) and
/// that every row is keyed by its own id.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_store(store: &MemoryStore) -> Result<()> {
    if let Some((post_id, blog_id)) = invariants::find_dangling_posts(store).first() {
        return Err(BlogError::Internal {
            message: format!("post {} references missing blog {}", post_id, blog_id),
        });
    }

    if let Some(key) = invariants::find_mis_keyed_rows(store).first() {
        return Err(BlogError::Internal {
            message: format!("row stored under key {} carries a different id", key),
        });
    }

    Ok(())
}
