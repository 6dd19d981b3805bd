use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Render a backend timestamp as an en-US short date (`1/31/2024`).
///
/// The calendar date is taken as written in the timestamp, without timezone
/// conversion, so output does not depend on the viewer's clock settings.
pub fn format_display_date(raw: &str) -> String {
    match parse_calendar_date(raw) {
        Some(date) => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        None => "Invalid Date".to_string(),
    }
}

pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_common_backend_shapes() {
        assert_eq!(format_display_date("2024-01-01"), "1/1/2024");
        assert_eq!(format_display_date("2024-03-09T14:22:05.123456"), "3/9/2024");
        assert_eq!(format_display_date("2024-12-31T23:59:59Z"), "12/31/2024");
        assert_eq!(format_display_date("2024-07-04T08:00:00+02:00"), "7/4/2024");
        assert_eq!(format_display_date("2024-07-04 08:00:00"), "7/4/2024");
    }

    #[test]
    fn garbage_is_invalid_date() {
        assert_eq!(format_display_date(""), "Invalid Date");
        assert_eq!(format_display_date("yesterday"), "Invalid Date");
    }
}
