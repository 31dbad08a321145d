//! Delete policy for a blog's dependent posts
//!
//! The relationship Blog -> Posts is required, so a blog cannot disappear
//! while posts still point at it. The policy decides which way that is
//! resolved when a blog is deleted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::BlogId;

/// What happens to a blog's posts when the blog is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Delete the posts together with the blog, atomically
    #[default]
    Cascade,
    /// Refuse to delete a blog that still has posts
    Restrict,
}

impl FromStr for DeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cascade" => Ok(DeletePolicy::Cascade),
            "restrict" => Ok(DeletePolicy::Restrict),
            other => Err(format!(
                "unknown delete policy '{}' (expected cascade or restrict)",
                other
            )),
        }
    }
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletePolicy::Cascade => write!(f, "cascade"),
            DeletePolicy::Restrict => write!(f, "restrict"),
        }
    }
}

/// Result of deleting a blog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub blog_id: BlogId,
    pub policy: DeletePolicy,
    /// Number of posts removed along with the blog (always 0 under Restrict)
    pub posts_deleted: usize,
}
