//! Cache freshness policy for store-backed catalog queries.

use chrono::{DateTime, Duration, Utc};

use crate::store::StoredMovie;

/// Rows older than this are considered stale and force an upstream refresh.
pub const STALENESS_WINDOW_HOURS: i64 = 24;

/// Decide whether a page read must be refreshed from upstream.
///
/// Refresh is required when the store cannot fill the requested page size,
/// or when any returned row is older than the staleness window. A limit of
/// zero can always be served locally, so it never triggers a refresh; that
/// keeps degenerate requests from hitting upstream on every call.
///
/// Pure decision over rows that were already read; performs no I/O.
pub fn needs_refresh(limit: u32, rows: &[StoredMovie], now: DateTime<Utc>) -> bool {
    if limit == 0 {
        return false;
    }
    if (rows.len() as u32) < limit {
        return true;
    }
    let cutoff = now - Duration::hours(STALENESS_WINDOW_HOURS);
    rows.iter().any(|movie| movie.last_synced_at < cutoff)
}
