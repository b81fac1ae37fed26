//! Database model types for Diesel ORM.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{referrals, trades, users};
use crate::domain::{NewTrade, NewUser, Referral, Trade, User, UserPatch};

/// Database row for a user (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: i32,
    pub user_id: String,
    pub default_wallet_address: String,
    pub default_private_key: String,
    pub sniper_wallet_address: String,
    pub sniper_private_key: String,
    pub slippage: i32,
    pub trades: String,
    pub monitor_wallet: String,
}

/// Database row for a user (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub user_id: &'a str,
    pub default_wallet_address: &'a str,
    pub default_private_key: &'a str,
    pub sniper_wallet_address: &'a str,
    pub sniper_private_key: &'a str,
    pub slippage: i32,
    pub trades: &'a str,
    pub monitor_wallet: &'a str,
}

/// Partial update of a user row.
///
/// The fields of this struct are the complete set of columns an update may
/// touch. Diesel skips `None` fields, so only supplied columns reach the
/// `SET` clause and every value is sent as a bound parameter.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = users)]
pub struct UserChangeset<'a> {
    pub default_wallet_address: Option<&'a str>,
    pub default_private_key: Option<&'a str>,
    pub sniper_wallet_address: Option<&'a str>,
    pub sniper_private_key: Option<&'a str>,
    pub slippage: Option<i32>,
    pub trades: Option<&'a str>,
    pub monitor_wallet: Option<&'a str>,
}

/// Database row for a trade (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = trades)]
pub struct NewTradeRow<'a> {
    pub user_id: &'a str,
    pub wallet_address: &'a str,
    pub trades_log: &'a str,
    pub trade_date: NaiveDateTime,
}

/// Database row for a trade (queryable).
///
/// `trade_date` is nullable in files written before the store set it on
/// every insert.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeRow {
    pub id: i32,
    pub user_id: String,
    pub wallet_address: String,
    pub trades_log: String,
    pub trade_date: Option<NaiveDateTime>,
}

/// Database row for a referral (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = referrals)]
pub struct NewReferralRow {
    pub referrer_id: i64,
    pub referred_id: i64,
    pub referral_date: NaiveDateTime,
}

/// Database row for a referral (queryable).
///
/// Older files declare every referral column nullable.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = referrals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReferralRow {
    pub id: i32,
    pub referrer_id: Option<i64>,
    pub referred_id: Option<i64>,
    pub referral_date: Option<NaiveDateTime>,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            user_id: &user.user_id,
            default_wallet_address: &user.default_wallet_address,
            default_private_key: &user.default_private_key,
            sniper_wallet_address: &user.sniper_wallet_address,
            sniper_private_key: &user.sniper_private_key,
            slippage: user.slippage,
            trades: &user.trades,
            monitor_wallet: &user.monitor_wallet,
        }
    }
}

impl<'a> From<&'a UserPatch> for UserChangeset<'a> {
    fn from(patch: &'a UserPatch) -> Self {
        Self {
            default_wallet_address: patch.default_wallet_address.as_deref(),
            default_private_key: patch.default_private_key.as_deref(),
            sniper_wallet_address: patch.sniper_wallet_address.as_deref(),
            sniper_private_key: patch.sniper_private_key.as_deref(),
            slippage: patch.slippage,
            trades: patch.trades.as_deref(),
            monitor_wallet: patch.monitor_wallet.as_deref(),
        }
    }
}

impl<'a> NewTradeRow<'a> {
    /// Build a row for `trade` stamped with `trade_date`.
    #[must_use]
    pub fn new(trade: &'a NewTrade, trade_date: NaiveDateTime) -> Self {
        Self {
            user_id: &trade.user_id,
            wallet_address: &trade.wallet_address,
            trades_log: &trade.trades_log,
            trade_date,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            default_wallet_address: row.default_wallet_address,
            default_private_key: row.default_private_key,
            sniper_wallet_address: row.sniper_wallet_address,
            sniper_private_key: row.sniper_private_key,
            slippage: row.slippage,
            trades: row.trades,
            monitor_wallet: row.monitor_wallet,
        }
    }
}

impl From<TradeRow> for Trade {
    fn from(row: TradeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            wallet_address: row.wallet_address,
            trades_log: row.trades_log,
            trade_date: row.trade_date.map(|d| d.and_utc()),
        }
    }
}

impl ReferralRow {
    /// Convert to a domain referral. Rows missing either party are dropped.
    #[must_use]
    pub fn into_referral(self) -> Option<Referral> {
        Some(Referral {
            id: self.id,
            referrer_id: self.referrer_id?,
            referred_id: self.referred_id?,
            referral_date: self.referral_date.map(|d| d.and_utc()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_user() -> NewUser {
        NewUser {
            user_id: "7001".to_string(),
            default_wallet_address: "DefAddr".to_string(),
            default_private_key: "def-key".to_string(),
            sniper_wallet_address: "SnipeAddr".to_string(),
            sniper_private_key: "snipe-key".to_string(),
            slippage: 10,
            trades: "{}".to_string(),
            monitor_wallet: "WatchAddr".to_string(),
        }
    }

    #[test]
    fn new_user_row_borrows_every_field() {
        let user = new_user();
        let row = NewUserRow::from(&user);

        assert_eq!(row.user_id, "7001");
        assert_eq!(row.default_private_key, "def-key");
        assert_eq!(row.sniper_wallet_address, "SnipeAddr");
        assert_eq!(row.slippage, 10);
        assert_eq!(row.monitor_wallet, "WatchAddr");
    }

    #[test]
    fn changeset_carries_only_patched_columns() {
        let patch = UserPatch::new().slippage(3).monitor_wallet("Other");
        let changes = UserChangeset::from(&patch);

        assert_eq!(changes.slippage, Some(3));
        assert_eq!(changes.monitor_wallet, Some("Other"));
        assert!(changes.default_wallet_address.is_none());
        assert!(changes.default_private_key.is_none());
        assert!(changes.sniper_wallet_address.is_none());
        assert!(changes.sniper_private_key.is_none());
        assert!(changes.trades.is_none());
    }

    #[test]
    fn trade_row_converts_to_utc() {
        let now = Utc::now().naive_utc();
        let trade: Trade = TradeRow {
            id: 4,
            user_id: "7001".to_string(),
            wallet_address: "DefAddr".to_string(),
            trades_log: "buy".to_string(),
            trade_date: Some(now),
        }
        .into();

        assert_eq!(trade.id, 4);
        assert_eq!(trade.trade_date.map(|d| d.naive_utc()), Some(now));
    }

    #[test]
    fn referral_row_converts() {
        let referral = ReferralRow {
            id: 1,
            referrer_id: Some(5_000_000_000),
            referred_id: Some(2),
            referral_date: Some(Utc::now().naive_utc()),
        }
        .into_referral()
        .unwrap();

        assert_eq!(referral.referrer_id, 5_000_000_000);
        assert_eq!(referral.referred_id, 2);
        assert!(referral.referral_date.is_some());
    }

    #[test]
    fn referral_row_without_referred_is_dropped() {
        let row = ReferralRow {
            id: 2,
            referrer_id: Some(1),
            referred_id: None,
            referral_date: None,
        };
        assert!(row.into_referral().is_none());
    }

    #[test]
    fn trade_row_without_date_converts() {
        let trade: Trade = TradeRow {
            id: 9,
            user_id: "7001".to_string(),
            wallet_address: "DefAddr".to_string(),
            trades_log: "legacy".to_string(),
            trade_date: None,
        }
        .into();

        assert!(trade.trade_date.is_none());
    }
}
