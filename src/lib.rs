//! sniperdb - persistence layer for a Solana trading bot.
//!
//! Stores per-user wallet and trading settings, a trade history log and the
//! referral graph in a single SQLite file.
//!
//! # Modules
//!
//! - [`domain`] - Users, partial updates, trades and referrals
//! - [`port`] - The [`UserStore`](port::outbound::store::UserStore) contract
//! - [`adapter`] - SQLite implementation built on Diesel
//! - [`infrastructure`] - TOML configuration and logging setup
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use sniperdb::adapter::outbound::sqlite::store::SqliteStore;
//! use sniperdb::domain::UserPatch;
//! use sniperdb::infrastructure::config::database::DatabaseConfig;
//! use sniperdb::port::outbound::store::UserStore;
//!
//! # async fn run() -> sniperdb::error::Result<()> {
//! let store = SqliteStore::open(&DatabaseConfig::with_path("users.db"))?;
//! store.initialize().await?;
//! store.update_user("12345", &UserPatch::new().slippage(15)).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
