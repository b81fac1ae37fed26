//! Domain types for users, trades and referrals.

mod referral;
mod trade;
mod user;

pub use referral::{dedup_referred, render_referred, Referral, REFERRAL_SEPARATOR};
pub use trade::{NewTrade, Trade};
pub use user::{NewUser, UpdateOutcome, User, UserPatch};
