use thiserror::Error;

use crate::model::{BlogId, PostId};

/// Result type alias using BlogError
pub type Result<T> = std::result::Result<T, BlogError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by a blog store falls into one of these kinds.
/// Each kind maps to a stable error code usable for programmatic handling,
/// tests and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    NotFound,
    ForeignKeyViolation,
    ConstraintViolation,
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ForeignKeyViolation => "ERR_FOREIGN_KEY_VIOLATION",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// debugging. Built from a [`BlogError`] at reporting boundaries (logging,
/// CLI output).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for blog store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlogError {
    // ===== Lookup Errors =====
    /// Blog not found in store
    #[error("Blog not found: {blog_id}")]
    BlogNotFound { blog_id: BlogId },

    /// Post not found in store
    #[error("Post not found: {post_id}")]
    PostNotFound { post_id: PostId },

    /// Named sequence is not declared in the schema
    #[error("Sequence not found: {name}")]
    SequenceNotFound { name: String },

    // ===== Referential Integrity =====
    /// A post references a blog that does not exist
    #[error("Post references missing blog {blog_id}")]
    BlogForeignKeyViolation { blog_id: BlogId },

    /// Restricted delete of a blog that still owns posts
    #[error("Blog {blog_id} still has {post_count} post(s)")]
    BlogHasPosts { blog_id: BlogId, post_count: usize },

    /// Foreign key enforcement by the database rejected a write
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    // ===== Schema Constraints =====
    /// Blog url violates the schema constraints
    #[error("Invalid url: {reason}")]
    InvalidUrl { reason: String },

    /// Post title violates the schema constraints
    #[error("Invalid title: {reason}")]
    InvalidTitle { reason: String },

    /// Storage engine rejected a write on a constraint other than a foreign key
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// Sequence drawn past its maximum value
    #[error("Sequence {name} exhausted at {max_value}")]
    SequenceExhausted { name: String, max_value: i64 },

    // ===== Persistence Errors =====
    /// Storage engine failure
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Migration failed to apply
    #[error("Migration {migration_id} failed: {reason}")]
    Migration {
        migration_id: String,
        reason: String,
    },

    /// Applied migration no longer matches the embedded SQL
    #[error("Checksum mismatch for migration {migration_id}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        migration_id: String,
        expected: String,
        actual: String,
    },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// IO error
    #[error("IO error: {message}")]
    Io { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BlogError {
    /// Classify this error in the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            BlogError::BlogNotFound { .. }
            | BlogError::PostNotFound { .. }
            | BlogError::SequenceNotFound { .. } => ExErrorKind::NotFound,
            BlogError::BlogForeignKeyViolation { .. }
            | BlogError::BlogHasPosts { .. }
            | BlogError::ForeignKeyViolation { .. } => ExErrorKind::ForeignKeyViolation,
            BlogError::InvalidUrl { .. }
            | BlogError::InvalidTitle { .. }
            | BlogError::ConstraintViolation { .. }
            | BlogError::SequenceExhausted { .. } => ExErrorKind::ConstraintViolation,
            BlogError::Persistence { .. }
            | BlogError::Migration { .. }
            | BlogError::ChecksumMismatch { .. } => ExErrorKind::Persistence,
            BlogError::Serialization { .. } => ExErrorKind::Serialization,
            BlogError::Io { .. } => ExErrorKind::Io,
            BlogError::Internal { .. } => ExErrorKind::Internal,
        }
    }
}

/// Conversion from BlogError to ExError
impl From<BlogError> for ExError {
    fn from(err: BlogError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        let ex = ExError::new(kind).with_message(message);
        match err {
            BlogError::BlogNotFound { blog_id }
            | BlogError::BlogForeignKeyViolation { blog_id }
            | BlogError::BlogHasPosts { blog_id, .. } => ex.with_entity_id(blog_id.to_string()),
            BlogError::PostNotFound { post_id } => ex.with_entity_id(post_id.to_string()),
            BlogError::SequenceNotFound { name } | BlogError::SequenceExhausted { name, .. } => {
                ex.with_entity_id(name).with_op("next_value")
            }
            BlogError::Migration { migration_id, .. }
            | BlogError::ChecksumMismatch { migration_id, .. } => {
                ex.with_entity_id(migration_id).with_op("migration")
            }
            _ => ex,
        }
    }
}

impl From<serde_json::Error> for BlogError {
    fn from(err: serde_json::Error) -> Self {
        BlogError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for BlogError {
    fn from(err: std::io::Error) -> Self {
        BlogError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind_codes() {
        let err = BlogError::BlogNotFound { blog_id: 7 };
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.kind().code(), "ERR_NOT_FOUND");
    }

    #[test]
    fn test_blog_has_posts_is_foreign_key_violation() {
        let err = BlogError::BlogHasPosts {
            blog_id: 1,
            post_count: 3,
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::ForeignKeyViolation);
        assert_eq!(ex.entity_id(), Some("1"));
    }

    #[test]
    fn test_migration_drift_is_persistence() {
        let err = BlogError::ChecksumMismatch {
            migration_id: "001_initial_schema".to_string(),
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        };
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.kind().code(), "ERR_PERSISTENCE");
    }

    #[test]
    fn test_ex_error_display_includes_code_and_message() {
        let ex: ExError = BlogError::PostNotFound { post_id: 42 }.into();
        let rendered = ex.to_string();
        assert!(rendered.starts_with("[ERR_NOT_FOUND]"));
        assert!(rendered.contains("Post not found: 42"));
        assert!(rendered.contains("(entity_id: 42)"));
    }
}
