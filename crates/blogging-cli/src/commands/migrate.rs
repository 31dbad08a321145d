//! Migrate command
//!
//! Opening the store already applies pending migrations; this prints what the
//! database has recorded.

use blogging_core::errors::ExError;
use blogging_store::migrations::applied_migrations;
use blogging_store::SqliteStore;

pub fn execute(store: &SqliteStore) -> Result<(), ExError> {
    let applied = applied_migrations(store.connection())
        .map_err(|e| ExError::from(e).with_op("migrate"))?;
    super::print_json(&applied)
}
