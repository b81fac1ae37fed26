//! Referral events and their aggregation.

use chrono::{DateTime, Utc};

/// Separator used when rendering a referral list for display.
pub const REFERRAL_SEPARATOR: &str = ", ";

/// A stored referral event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Referral {
    pub id: i32,
    pub referrer_id: i64,
    pub referred_id: i64,
    /// `None` only for rows written by older deployments.
    pub referral_date: Option<DateTime<Utc>>,
}

/// Drop repeated referred ids while keeping first-seen order.
///
/// Referral rows are an append-only log, so the same pair may be recorded
/// more than once. Readers see each referred user a single time.
#[must_use]
pub fn dedup_referred(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Render referred ids as a single comma separated line.
///
/// Returns `None` when there is nothing to show.
#[must_use]
pub fn render_referred(ids: &[i64]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(
        ids.iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(REFERRAL_SEPARATOR),
    )
}
