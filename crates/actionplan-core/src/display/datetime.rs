//! DateTime display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A `Timestamp` shown in the system timezone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// An optional date range, `start → finish`, with `?` for a missing end.
pub(crate) struct DateRange<'a>(pub &'a Option<jiff::civil::Date>, pub &'a Option<jiff::civil::Date>);

impl fmt::Display for DateRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0, self.1) {
            (Some(start), Some(finish)) => write!(f, "{start} → {finish}"),
            (Some(start), None) => write!(f, "{start} → ?"),
            (None, Some(finish)) => write!(f, "? → {finish}"),
            (None, None) => write!(f, "unscheduled"),
        }
    }
}
