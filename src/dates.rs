//! Send-timestamp resolution and date-range filtering

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;

use crate::message::StoredMessage;

/// Timestamp embedded in a Gmail Takeout `From ` separator line,
/// e.g. `Mon Jan 01 10:00:00 +0000 2024`.
static ENVELOPE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(Mon|Tue|Wed|Thu|Fri|Sat|Sun)\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{1,2}\s+\d{2}:\d{2}:\d{2}\s+[+-]\d{4}\s+\d{4}",
    )
    .unwrap()
});

/// Resolve the canonical send timestamp of a message.
///
/// Date headers win, top level before nested parts, parsed with
/// `mailparse`'s permissive parser (a missing timezone is read as
/// UTC). The timestamp on the archive envelope line is the fallback.
/// Malformed dates never fail; they simply yield `None`.
#[must_use]
pub fn resolve_timestamp(message: &StoredMessage) -> Option<DateTime<Utc>> {
    for raw in &message.date_headers {
        if let Some(ts) = parse_header_date(raw) {
            return Some(ts);
        }
    }
    parse_envelope_date(&message.envelope)
}

fn parse_header_date(raw: &str) -> Option<DateTime<Utc>> {
    let seconds = mailparse::dateparse(raw).ok()?;
    Utc.timestamp_opt(seconds, 0).single()
}

fn parse_envelope_date(line: &str) -> Option<DateTime<Utc>> {
    let stamp = ENVELOPE_DATE.find(line)?;
    DateTime::parse_from_str(stamp.as_str(), "%a %b %d %H:%M:%S %z %Y")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// An inclusive send-date window. Either bound may be absent, which
/// leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Build a range from calendar dates. The start bound is the very
    /// beginning of its day, the end bound the very end of its day
    /// (23:59:59.999999 UTC), so both days are fully included.
    #[must_use]
    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let start = start
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Utc.from_utc_datetime(&dt));
        let end = end
            .and_then(|d| d.and_hms_micro_opt(23, 59, 59, 999_999))
            .map(|dt| Utc.from_utc_datetime(&dt));
        Self { start, end }
    }

    /// Whether any bound is set.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Inclusive containment on both ends.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        if let Some(start) = self.start
            && ts < start
        {
            return false;
        }
        if let Some(end) = self.end
            && ts > end
        {
            return false;
        }
        true
    }
}
