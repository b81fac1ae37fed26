//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed [`store::SqliteStore`] using Diesel ORM.

pub mod database;
pub mod store;
