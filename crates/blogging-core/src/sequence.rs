//! Named integer sequences
//!
//! A sequence hands out distinct, strictly increasing integers independent of
//! any table's primary key. It never restarts and never cycles; drawing past
//! its maximum fails.

use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

use crate::errors::{BlogError, Result};

/// Name of the sequence declared by the blogging schema
pub const BLOG_NUMBERS: &str = "BlogNumbers";

/// Declaration of a sequence: where it starts, how it steps, where it ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceDefinition {
    pub name: String,
    pub start: i64,
    pub increment: i64,
    pub max_value: i64,
}

impl SequenceDefinition {
    /// `BlogNumbers`: a 32-bit integer sequence starting at 1, step 1
    pub fn blog_numbers() -> Self {
        Self {
            name: BLOG_NUMBERS.to_string(),
            start: 1,
            increment: 1,
            max_value: i64::from(i32::MAX),
        }
    }

    /// Check the declaration is usable
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` if the increment is not positive, the
    /// start lies past the maximum, or stepping past the maximum would
    /// overflow `i64`.
    pub fn validate(&self) -> Result<()> {
        if self.increment <= 0 {
            return Err(BlogError::ConstraintViolation {
                message: format!("sequence {} must have a positive increment", self.name),
            });
        }
        if self.start > self.max_value {
            return Err(BlogError::ConstraintViolation {
                message: format!("sequence {} starts past its maximum", self.name),
            });
        }
        if self.max_value.checked_add(self.increment).is_none() {
            return Err(BlogError::ConstraintViolation {
                message: format!("sequence {} maximum is too close to i64::MAX", self.name),
            });
        }
        Ok(())
    }
}

/// In-process sequence backed by an atomic counter
///
/// Safe to share between threads (wrap it in an `Arc`); every call to
/// [`Sequence::next_value`] observes a different value.
#[derive(Debug)]
pub struct Sequence {
    definition: SequenceDefinition,
    next: AtomicI64,
}

impl Sequence {
    /// # Errors
    ///
    /// Returns `ConstraintViolation` if the definition is invalid.
    pub fn new(definition: SequenceDefinition) -> Result<Self> {
        definition.validate()?;
        Ok(Self {
            next: AtomicI64::new(definition.start),
            definition,
        })
    }

    /// The `BlogNumbers` sequence
    pub fn blog_numbers() -> Self {
        let definition = SequenceDefinition::blog_numbers();
        Self {
            next: AtomicI64::new(definition.start),
            definition,
        }
    }

    pub fn definition(&self) -> &SequenceDefinition {
        &self.definition
    }

    /// Draw the next value
    ///
    /// # Errors
    ///
    /// Returns `SequenceExhausted` once the maximum has been handed out.
    pub fn next_value(&self) -> Result<i64> {
        let max_value = self.definition.max_value;
        let increment = self.definition.increment;
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                (current <= max_value).then_some(current + increment)
            })
            .map_err(|_| BlogError::SequenceExhausted {
                name: self.definition.name.clone(),
                max_value,
            })
    }
}
