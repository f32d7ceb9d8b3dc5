//! Calendar-day scoping for every per-day query.
//!
//! The day a request is about always comes from an explicit `?date=` query
//! parameter; when it is absent the current day in the configured UTC offset
//! is used.

use axum::http::StatusCode;
use serde::Deserialize;
use time::{
    format_description::FormatItem, macros::format_description, Date, Duration, OffsetDateTime,
    UtcOffset,
};

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

impl DayQuery {
    pub fn resolve(&self, offset: UtcOffset) -> Result<Date, (StatusCode, String)> {
        match self.date.as_deref() {
            None | Some("") => Ok(today(offset)),
            Some(raw) => parse_date(raw).ok_or((
                StatusCode::BAD_REQUEST,
                format!("invalid date '{raw}', expected YYYY-MM-DD"),
            )),
        }
    }
}

pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), ISO_DATE).ok()
}

pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}

/// `[start, end)` of `date` in local time.
pub fn day_range(date: Date, offset: UtcOffset) -> (OffsetDateTime, OffsetDateTime) {
    let start = date.midnight().assume_offset(offset);
    (start, start + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, offset};

    #[test]
    fn resolves_explicit_date() {
        let q = DayQuery {
            date: Some("2024-02-29".into()),
        };
        assert_eq!(q.resolve(UtcOffset::UTC).unwrap(), date!(2024 - 02 - 29));
    }

    #[test]
    fn rejects_malformed_date() {
        let q = DayQuery {
            date: Some("29/02/2024".into()),
        };
        let (status, _) = q.resolve(UtcOffset::UTC).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_date_is_today() {
        let q = DayQuery::default();
        assert_eq!(q.resolve(UtcOffset::UTC).unwrap(), today(UtcOffset::UTC));
    }

    #[test]
    fn range_follows_offset() {
        let (start, end) = day_range(date!(2024 - 06 - 15), offset!(+2));
        assert_eq!(start, datetime!(2024-06-14 22:00 UTC));
        assert_eq!(end, datetime!(2024-06-15 22:00 UTC));
    }
}
