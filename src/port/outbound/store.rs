//! Store port for user, trade and referral persistence.
//!
//! Every method commits before its future resolves. A lookup miss is an
//! `Ok(None)`, never an error, so callers can tell "absent" from "broken".

use std::collections::HashMap;
use std::future::Future;

use crate::domain::{NewTrade, NewUser, Trade, UpdateOutcome, User, UserPatch};
use crate::error::Result;

/// Storage operations for bot users and their activity.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - No operation holds a lock across calls; concurrent writers are
///   serialized by the backing engine
/// - `initialize` must be safe to call on every start
pub trait UserStore: Send + Sync {
    /// Ensure the schema exists. Never drops or alters existing tables.
    fn initialize(&self) -> impl Future<Output = Result<()>> + Send;

    /// Create a user. Fails with `Error::DuplicateUser` if the id is taken.
    fn insert_user(&self, user: &NewUser) -> impl Future<Output = Result<()>> + Send;

    /// Get a user by external id.
    fn get_user(&self, user_id: &str) -> impl Future<Output = Result<Option<User>>> + Send;

    /// All users keyed by external id, in no particular order.
    fn get_all_users(&self) -> impl Future<Output = Result<HashMap<String, User>>> + Send;

    /// Write the supplied columns of `patch` and nothing else.
    fn update_user(
        &self,
        user_id: &str,
        patch: &UserPatch,
    ) -> impl Future<Output = Result<UpdateOutcome>> + Send;

    /// Append a trade. Returns the new row id.
    fn insert_trade(&self, trade: &NewTrade) -> impl Future<Output = Result<i32>> + Send;

    /// Trades of one user, oldest first.
    fn list_trades(&self, user_id: &str) -> impl Future<Output = Result<Vec<Trade>>> + Send;

    /// Append a referral stamped with the current time. Returns the new row id.
    fn insert_referral(
        &self,
        referrer_id: i64,
        referred_id: i64,
    ) -> impl Future<Output = Result<i32>> + Send;

    /// Distinct users referred by `referrer_id`, in the order they were recorded.
    fn referred_ids(&self, referrer_id: i64) -> impl Future<Output = Result<Vec<i64>>> + Send;

    /// Referred users rendered as `"2, 3"`, or `None` if there are none.
    fn get_my_referrals(
        &self,
        referrer_id: i64,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}
