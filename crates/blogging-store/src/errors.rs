//! Error handling for blogging-store
//!
//! Maps rusqlite failures onto the `BlogError` taxonomy from blogging-core

use blogging_core::errors::BlogError;
use blogging_core::model::BlogId;
use rusqlite::ErrorCode;

/// Result type alias using BlogError
pub type Result<T> = std::result::Result<T, BlogError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> BlogError {
    BlogError::Migration {
        migration_id: migration_id.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> BlogError {
    BlogError::ChecksumMismatch {
        migration_id: migration_id.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

/// Whether SQLite rejected the statement for a foreign key
pub fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

/// Create a database error from rusqlite::Error
///
/// Foreign key failures become `ForeignKeyViolation`, any other constraint
/// failure becomes `ConstraintViolation`, everything else is `Persistence`.
pub fn from_rusqlite(err: rusqlite::Error) -> BlogError {
    if is_foreign_key_violation(&err) {
        return BlogError::ForeignKeyViolation {
            message: err.to_string(),
        };
    }
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            BlogError::ConstraintViolation {
                message: err.to_string(),
            }
        }
        _ => BlogError::Persistence {
            message: err.to_string(),
        },
    }
}

/// Map an error from a write that references `blog_id`
///
/// A foreign key failure names the missing blog; anything else goes through
/// [`from_rusqlite`].
pub fn blog_reference_error(err: rusqlite::Error, blog_id: BlogId) -> BlogError {
    if is_foreign_key_violation(&err) {
        BlogError::BlogForeignKeyViolation { blog_id }
    } else {
        from_rusqlite(err)
    }
}
