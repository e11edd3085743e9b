use chrono::{DateTime, NaiveDate, NaiveTime};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date into UTC millis.
///
/// A bare date resolves to the first millisecond of the day, or to the last
/// one when `end_of_day` is set, so `from`/`to` ranges stay inclusive.
pub fn parse_date_millis(raw: &str, end_of_day: bool) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = if end_of_day {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)?
    };
    Some(date.and_time(time).and_utc().timestamp_millis())
}
