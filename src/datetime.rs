//! Display formatting for appointment timestamps.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// One timestamp rendered the four ways the portal shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedDateTime {
    /// `Oct 25, 2023, 8:30 AM`
    pub date_time: String,
    /// `Wed, 10/25/2023`
    pub date_day: String,
    /// `Oct 25, 2023`
    pub date_only: String,
    /// `8:30 AM`
    pub time_only: String,
}

/// Format `timestamp` as seen from `offset`.
pub fn format_date_time(timestamp: DateTime<Utc>, offset: FixedOffset) -> FormattedDateTime {
    let local = timestamp.with_timezone(&offset);
    FormattedDateTime {
        date_time: local.format("%b %-d, %Y, %-I:%M %p").to_string(),
        date_day: local.format("%a, %m/%d/%Y").to_string(),
        date_only: local.format("%b %-d, %Y").to_string(),
        time_only: local.format("%-I:%M %p").to_string(),
    }
}
