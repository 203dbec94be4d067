use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use std::borrow::Cow;

/// Table timestamp layout: `dd/MM/yyyy HH:mm:ss`.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
/// Card date layout, e.g. `15 Jan 2023`.
const SHORT_DATE_FORMAT: &str = "%d %b %Y";

/// Timezone used when displaying timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeDisplay {
    /// Render in UTC. Deterministic, so this is the default.
    #[default]
    Utc,
    /// Render in the machine's local timezone.
    Local,
}

/// Format an ISO-8601 timestamp for the table view.
///
/// Empty input yields an empty string; input that cannot be parsed is
/// returned verbatim rather than hidden.
pub fn format_timestamp(iso: &str, tz: TimeDisplay) -> Cow<'_, str> {
    format_with(iso, tz, TIMESTAMP_FORMAT)
}

/// Format an ISO-8601 timestamp as a short date for cards.
pub fn format_short_date(iso: &str, tz: TimeDisplay) -> Cow<'_, str> {
    format_with(iso, tz, SHORT_DATE_FORMAT)
}

fn format_with<'a>(iso: &'a str, tz: TimeDisplay, fmt: &str) -> Cow<'a, str> {
    let trimmed = iso.trim();
    if trimmed.is_empty() {
        return Cow::Borrowed("");
    }

    match parse_iso(trimmed) {
        Some(dt) => Cow::Owned(match tz {
            TimeDisplay::Utc => dt.format(fmt).to_string(),
            TimeDisplay::Local => dt.with_timezone(&Local).format(fmt).to_string(),
        }),
        None => {
            tracing::trace!(value = %iso, "Unparseable timestamp, showing raw value");
            Cow::Borrowed(iso)
        }
    }
}

/// Parse RFC 3339, then offset-less date-times, then bare dates.
/// Values without an offset are taken as UTC.
fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
