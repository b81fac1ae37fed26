//! Bot user records.
//!
//! A user carries two signing identities: the default wallet used for
//! regular trading and the sniper wallet used for the sniper mode.

use std::fmt;

/// Placeholder printed instead of private key material.
const REDACTED: &str = "<redacted>";

/// A stored bot user.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Surrogate row id assigned by the store.
    pub id: i32,
    /// External identifier (chat or account id). Unique and immutable.
    pub user_id: String,
    pub default_wallet_address: String,
    pub default_private_key: String,
    pub sniper_wallet_address: String,
    pub sniper_private_key: String,
    pub slippage: i32,
    /// Serialized trade settings, opaque to the store.
    pub trades: String,
    pub monitor_wallet: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("default_wallet_address", &self.default_wallet_address)
            .field("default_private_key", &REDACTED)
            .field("sniper_wallet_address", &self.sniper_wallet_address)
            .field("sniper_private_key", &REDACTED)
            .field("slippage", &self.slippage)
            .field("trades", &self.trades)
            .field("monitor_wallet", &self.monitor_wallet)
            .finish()
    }
}

/// All attributes required to create a user.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_id: String,
    pub default_wallet_address: String,
    pub default_private_key: String,
    pub sniper_wallet_address: String,
    pub sniper_private_key: String,
    pub slippage: i32,
    pub trades: String,
    pub monitor_wallet: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("user_id", &self.user_id)
            .field("default_wallet_address", &self.default_wallet_address)
            .field("default_private_key", &REDACTED)
            .field("sniper_wallet_address", &self.sniper_wallet_address)
            .field("sniper_private_key", &REDACTED)
            .field("slippage", &self.slippage)
            .field("trades", &self.trades)
            .field("monitor_wallet", &self.monitor_wallet)
            .finish()
    }
}

/// A partial update to a user.
///
/// Only the slots that are `Some` are written; everything else in the row is
/// left untouched. `user_id` is the lookup key and cannot be patched.
///
/// ```
/// use sniperdb::domain::UserPatch;
///
/// let patch = UserPatch::new().slippage(15).monitor_wallet("9xQe...");
/// assert_eq!(patch.len(), 2);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub default_wallet_address: Option<String>,
    pub default_private_key: Option<String>,
    pub sniper_wallet_address: Option<String>,
    pub sniper_private_key: Option<String>,
    pub slippage: Option<i32>,
    pub trades: Option<String>,
    pub monitor_wallet: Option<String>,
}

impl UserPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn default_wallet(
        mut self,
        address: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        self.default_wallet_address = Some(address.into());
        self.default_private_key = Some(private_key.into());
        self
    }

    #[must_use]
    pub fn sniper_wallet(
        mut self,
        address: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        self.sniper_wallet_address = Some(address.into());
        self.sniper_private_key = Some(private_key.into());
        self
    }

    #[must_use]
    pub fn slippage(mut self, slippage: i32) -> Self {
        self.slippage = Some(slippage);
        self
    }

    #[must_use]
    pub fn trades(mut self, trades: impl Into<String>) -> Self {
        self.trades = Some(trades.into());
        self
    }

    #[must_use]
    pub fn monitor_wallet(mut self, address: impl Into<String>) -> Self {
        self.monitor_wallet = Some(address.into());
        self
    }

    /// Number of columns this patch writes.
    #[must_use]
    pub fn len(&self) -> usize {
        [
            self.default_wallet_address.is_some(),
            self.default_private_key.is_some(),
            self.sniper_wallet_address.is_some(),
            self.sniper_private_key.is_some(),
            self.slippage.is_some(),
            self.trades.is_some(),
            self.monitor_wallet.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// True when no column is set, so applying the patch is a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("default_wallet_address", &self.default_wallet_address)
            .field(
                "default_private_key",
                &self.default_private_key.as_ref().map(|_| REDACTED),
            )
            .field("sniper_wallet_address", &self.sniper_wallet_address)
            .field(
                "sniper_private_key",
                &self.sniper_private_key.as_ref().map(|_| REDACTED),
            )
            .field("slippage", &self.slippage)
            .field("trades", &self.trades)
            .field("monitor_wallet", &self.monitor_wallet)
            .finish()
    }
}

/// Result of applying a [`UserPatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The patch was empty; nothing was sent to the store.
    NoOp,
    /// The user row was updated.
    Updated,
    /// No user with the given `user_id` exists. Nothing was written.
    NoMatch,
}

impl UpdateOutcome {
    #[must_use]
    pub fn from_rows_affected(rows: usize) -> Self {
        if rows == 0 {
            Self::NoMatch
        } else {
            Self::Updated
        }
    }
}
