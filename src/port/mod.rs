//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`outbound::store::UserStore`] - Persistence for users, trades and referrals

pub mod outbound;
