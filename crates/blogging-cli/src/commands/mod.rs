//! Subcommand implementations
//!
//! Each subcommand builds a core `Command`, runs it through `apply()` against
//! the SQLite store and prints the result as JSON on stdout.

pub mod blog;
pub mod migrate;
pub mod post;
pub mod sequence;

use blogging_core::errors::{ExError, ExErrorKind};
use blogging_core::{apply, Command};
use blogging_store::SqliteStore;
use serde::Serialize;

use crate::config::BloggingConfig;

/// Open the configured database, creating its directory if needed
pub fn open_store(config: &BloggingConfig) -> Result<SqliteStore, ExError> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExError::new(ExErrorKind::Io)
                    .with_op("open_store")
                    .with_entity_id(parent.display().to_string())
                    .with_message(e.to_string())
            })?;
        }
    }

    SqliteStore::open(&config.db_path, &config.connection_options())
        .map_err(|e| ExError::from(e).with_op("open_store"))
}

/// Apply one command and print its result
pub fn run(store: &mut SqliteStore, cmd: Command) -> Result<(), ExError> {
    let op = cmd.op_name();
    let result = apply(store, cmd).map_err(|e| ExError::from(e).with_op(op))?;
    print_json(&result)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), ExError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("print_json")
            .with_message(e.to_string())
    })?;
    println!("{}", json);
    Ok(())
}
