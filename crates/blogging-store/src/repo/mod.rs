//! Repository layer: row-level SQL for the blogging schema
//!
//! Functions take a `&Connection` so they run equally on a bare connection or
//! inside a `Transaction` (which derefs to one).

pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
