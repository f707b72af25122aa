use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

/// Offset-bearing layouts; the wall-clock reading is kept and the offset dropped.
const ZONED_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Spreadsheet serial day 0.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
/// Serial number of 9999-12-31.
const MAX_SERIAL: f64 = 2_958_465.0;

/// Parse a timestamp written in any of the layouts exports are known to use.
/// Date-only values resolve to midnight. Returns `None` rather than guessing.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }

    let bare = s
        .strip_suffix('Z')
        .or_else(|| s.strip_suffix(" UTC"))
        .unwrap_or(s)
        .trim_end();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(bare, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(bare, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Convert a spreadsheet serial day number to a date. The fractional part is
/// time-of-day and is dropped.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_SERIAL).contains(&serial) {
        return None;
    }
    let (y, m, d) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parses_known_layouts() {
        let expected = dt(2025, 9, 30, 8, 15, 0);
        for raw in [
            "2025-09-30T08:15:00Z",
            "2025-09-30T08:15:00",
            "2025-09-30 08:15:00",
            "2025-09-30 08:15:00.000",
            "2025-09-30 08:15",
            "2025-09-30 08:15:00 UTC",
            "2025/09/30 08:15:00",
            "09/30/2025 08:15",
            "2025-09-30T08:15:00+02:00",
            "2025-09-30 08:15:00-05:00",
        ] {
            assert_eq!(parse_timestamp(raw), Some(expected), "layout {raw}");
        }
    }

    #[test]
    fn offset_keeps_local_calendar_day() {
        assert_eq!(
            parse_timestamp("2025-01-01 00:30:00+02:00"),
            Some(dt(2025, 1, 1, 0, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-12-31T23:30:00-08:00"),
            Some(dt(2024, 12, 31, 23, 30, 0))
        );
    }

    #[test]
    fn date_only_is_midnight() {
        assert_eq!(parse_timestamp(" 2025-01-01 "), Some(dt(2025, 1, 1, 0, 0, 0)));
        assert_eq!(parse_timestamp("01/05/2025"), Some(dt(2025, 1, 5, 0, 0, 0)));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp("2025-13-45"), None);
    }

    #[test]
    fn serial_days() {
        assert_eq!(serial_to_date(45658.0), NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(serial_to_date(45658.75), NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(serial_to_date(0.0), None);
        assert_eq!(serial_to_date(f64::NAN), None);
        assert_eq!(serial_to_date(1e9), None);
    }
}
