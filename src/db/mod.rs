//! Database module
//!
//! SQLite diary store: pooled connections and schema migrations.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
