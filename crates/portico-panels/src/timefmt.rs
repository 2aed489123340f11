//! Relative timestamps for notification rows.

use chrono::{DateTime, Utc};

/// English relative form of `instant` as seen from `now`.
///
/// Reads "just now" under a minute, then counts minutes, hours, and days;
/// past seven days the absolute date is shown. Instants in the future
/// also read "just now" (client and backend clocks are never quite in
/// sync).
pub fn relative(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(instant);

    let seconds = elapsed.num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return format!("{minutes} minute{} ago", plural(minutes));
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours} hour{} ago", plural(hours));
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{days} day{} ago", plural(days));
    }
    instant.format("%b %-d, %Y").to_string()
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}
