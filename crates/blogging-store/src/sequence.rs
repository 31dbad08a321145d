//! Persistent named sequences
//!
//! Each sequence is one row of the `sequences` table. A draw advances the row
//! with a single `UPDATE ... RETURNING` inside an immediate transaction, so
//! the write lock is taken before the row is read and two connections can
//! never observe the same value.

use crate::errors::{from_rusqlite, Result};
use blogging_core::errors::BlogError;
use blogging_core::sequence::SequenceDefinition;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

/// Declare a new sequence
///
/// # Errors
///
/// * `ConstraintViolation` - The definition is unusable, or a sequence with
///   that name already exists
pub fn define(conn: &Connection, definition: &SequenceDefinition) -> Result<()> {
    definition.validate()?;
    conn.execute(
        "INSERT INTO sequences (name, next_value, increment, max_value) VALUES (?1, ?2, ?3, ?4)",
        params![
            definition.name,
            definition.start,
            definition.increment,
            definition.max_value
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

/// Stored state of a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceState {
    pub name: String,
    /// Value the next draw returns
    pub next_value: i64,
    pub increment: i64,
    pub max_value: i64,
}

impl SequenceState {
    pub fn is_exhausted(&self) -> bool {
        self.next_value > self.max_value
    }
}

/// Read a sequence's current state
pub fn state(conn: &Connection, name: &str) -> Result<Option<SequenceState>> {
    conn.query_row(
        "SELECT name, next_value, increment, max_value FROM sequences WHERE name = ?1",
        [name],
        |row| {
            Ok(SequenceState {
                name: row.get(0)?,
                next_value: row.get(1)?,
                increment: row.get(2)?,
                max_value: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(from_rusqlite)
}

/// Draw the next value of a sequence
///
/// # Errors
///
/// * `SequenceNotFound` - No sequence has that name
/// * `SequenceExhausted` - The next value would pass the sequence's maximum;
///   the row is left unchanged
/// * `Persistence` - The write lock could not be taken within the busy timeout
pub fn next_value(conn: &mut Connection, name: &str) -> Result<i64> {
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let drawn: Option<i64> = tx
        .query_row(
            "UPDATE sequences SET next_value = next_value + increment
             WHERE name = ?1 AND next_value <= max_value
             RETURNING next_value - increment",
            [name],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;

    let value = match drawn {
        Some(value) => value,
        None => {
            let max_value: Option<i64> = tx
                .query_row(
                    "SELECT max_value FROM sequences WHERE name = ?1",
                    [name],
                    |row| row.get(0),
                )
                .optional()
                .map_err(from_rusqlite)?;
            return Err(match max_value {
                Some(max_value) => BlogError::SequenceExhausted {
                    name: name.to_string(),
                    max_value,
                },
                None => BlogError::SequenceNotFound {
                    name: name.to_string(),
                },
            });
        }
    };

    tx.commit().map_err(from_rusqlite)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::apply_migrations;
    use blogging_core::sequence::BLOG_NUMBERS;

    fn setup() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_migrations(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_blog_numbers_seeded() {
        let conn = setup();
        let declared = SequenceDefinition::blog_numbers();

        let seeded = state(&conn, BLOG_NUMBERS).unwrap().unwrap();

        assert_eq!(seeded.next_value, declared.start);
        assert_eq!(seeded.increment, declared.increment);
        assert_eq!(seeded.max_value, declared.max_value);
    }

    #[test]
    fn test_state_tracks_draws() {
        let mut conn = setup();
        next_value(&mut conn, BLOG_NUMBERS).unwrap();
        next_value(&mut conn, BLOG_NUMBERS).unwrap();

        let current = state(&conn, BLOG_NUMBERS).unwrap().unwrap();

        assert_eq!(current.next_value, 3);
        assert_eq!(current.increment, 1);
        assert!(!current.is_exhausted());
        assert!(state(&conn, "Nope").unwrap().is_none());
    }

    #[test]
    fn test_next_value_counts_up() {
        let mut conn = setup();
        assert_eq!(next_value(&mut conn, BLOG_NUMBERS).unwrap(), 1);
        assert_eq!(next_value(&mut conn, BLOG_NUMBERS).unwrap(), 2);
    }

    #[test]
    fn test_unknown_sequence() {
        let mut conn = setup();
        assert!(matches!(
            next_value(&mut conn, "Nope"),
            Err(BlogError::SequenceNotFound { .. })
        ));
    }

    #[test]
    fn test_exhaustion_stops_at_max() {
        let mut conn = setup();
        define(
            &conn,
            &SequenceDefinition {
                name: "Tiny".to_string(),
                start: 10,
                increment: 5,
                max_value: 15,
            },
        )
        .unwrap();

        assert_eq!(next_value(&mut conn, "Tiny").unwrap(), 10);
        assert_eq!(next_value(&mut conn, "Tiny").unwrap(), 15);
        assert!(matches!(
            next_value(&mut conn, "Tiny"),
            Err(BlogError::SequenceExhausted { max_value: 15, .. })
        ));
        assert!(next_value(&mut conn, "Tiny").is_err());
        assert!(state(&conn, "Tiny").unwrap().unwrap().is_exhausted());
    }

    #[test]
    fn test_define_duplicate_rejected() {
        let conn = setup();
        let result = define(&conn, &SequenceDefinition::blog_numbers());
        assert!(matches!(result, Err(BlogError::ConstraintViolation { .. })));
    }
}
