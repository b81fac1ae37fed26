//! Trade history entries.

use chrono::{DateTime, Utc};

/// A logged trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub id: i32,
    /// Owner of the trade. Refers to `User::user_id` by convention only.
    pub user_id: String,
    /// Wallet that signed the trade.
    pub wallet_address: String,
    /// Serialized trade detail, opaque to the store.
    pub trades_log: String,
    /// Set by the store when the row is appended. Rows written by older
    /// deployments may lack it.
    pub trade_date: Option<DateTime<Utc>>,
}

/// A trade to append to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrade {
    pub user_id: String,
    pub wallet_address: String,
    pub trades_log: String,
}

impl NewTrade {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        wallet_address: impl Into<String>,
        trades_log: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            wallet_address: wallet_address.into(),
            trades_log: trades_log.into(),
        }
    }
}
