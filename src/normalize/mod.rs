//! The single typed boundary between loosely-typed spreadsheet cells and the
//! derivation rules. Every "guess the type" decision lives here; nothing past
//! this module inspects `Cell` variants.
//!
//! None of these functions fail: malformed input degrades to the absent value
//! (`""` for strings, `None` otherwise).

pub mod date_parser;

use chrono::{NaiveDate, NaiveDateTime};

use crate::table::Cell;

const TRUTHY: &[&str] = &["TRUE", "T", "YES", "Y", "1"];
const FALSY: &[&str] = &["FALSE", "F", "NO", "N", "0"];

/// Separator between the start and end of a time-window value.
pub const WINDOW_SEPARATOR: &str = "...";

/// Canonical comparable string for a cell.
///
/// Whole-number floats lose their `.0` so that IDs stored as numbers match the
/// same IDs stored as text. Booleans are integer-valued and render as `1`/`0`.
pub fn to_str(cell: &Cell) -> String {
    if cell.is_missing() {
        return String::new();
    }
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.trim().to_string(),
        Cell::Int(i) => i.to_string(),
        Cell::Float(f) => match whole_number(*f) {
            Some(i) => i.to_string(),
            None => f.to_string(),
        },
        Cell::Bool(b) => u8::from(*b).to_string(),
        Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        Cell::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Tri-state boolean. An unrecognised token is `None`, not `false`.
pub fn to_bool(cell: &Cell) -> Option<bool> {
    if cell.is_missing() {
        return None;
    }
    if let Cell::Bool(b) = cell {
        return Some(*b);
    }
    let token = to_str(cell).to_uppercase();
    if TRUTHY.contains(&token.as_str()) {
        Some(true)
    } else if FALSY.contains(&token.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Numeric coercion truncated toward zero. Decimal text such as `"1.0"` is accepted.
pub fn to_int(cell: &Cell) -> Option<i64> {
    match cell {
        _ if cell.is_missing() => None,
        Cell::Int(i) => Some(*i),
        Cell::Float(f) => truncate(*f),
        Cell::Bool(b) => Some(i64::from(*b)),
        Cell::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

/// Calendar date with any time-of-day discarded. Numbers are read as
/// spreadsheet serial day numbers.
pub fn to_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        _ if cell.is_missing() => None,
        Cell::Date(d) => Some(*d),
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Int(i) => date_parser::serial_to_date(*i as f64),
        Cell::Float(f) => date_parser::serial_to_date(*f),
        Cell::Text(s) => date_parser::parse_timestamp(s).map(|dt| dt.date()),
        _ => None,
    }
}

/// Start of a `"<start>...<end>"` window. Only the left-hand side is parsed;
/// the end is never looked at.
pub fn to_window_start(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        _ if cell.is_missing() => None,
        Cell::DateTime(dt) => Some(*dt),
        Cell::Date(d) => d.and_hms_opt(0, 0, 0),
        _ => {
            let raw = to_str(cell);
            let start = raw.split(WINDOW_SEPARATOR).next().unwrap_or_default();
            date_parser::parse_timestamp(start)
        }
    }
}

/// First non-empty normalized value among `cells`, or `""`.
pub fn coalesce(cells: &[&Cell]) -> String {
    cells
        .iter()
        .map(|c| to_str(c))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn whole_number(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn truncate(f: f64) -> Option<i64> {
    if f.is_finite() && f.abs() < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn str_handles_numbers_stored_either_way() {
        assert_eq!(to_str(&Cell::Float(12345.0)), "12345");
        assert_eq!(to_str(&Cell::Int(12345)), "12345");
        assert_eq!(to_str(&text("  12345 ")), "12345");
        assert_eq!(to_str(&Cell::Float(0.25)), "0.25");
        assert_eq!(to_str(&Cell::Float(-3.0)), "-3");
    }

    #[test]
    fn str_of_missing_is_empty() {
        assert_eq!(to_str(&Cell::Empty), "");
        assert_eq!(to_str(&Cell::Float(f64::NAN)), "");
        assert_eq!(to_str(&text("   ")), "");
    }

    #[test]
    fn str_of_bool_and_dates() {
        assert_eq!(to_str(&Cell::Bool(true)), "1");
        assert_eq!(to_str(&Cell::Bool(false)), "0");
        let d = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(to_str(&Cell::Date(d)), "2025-03-04");
        let dt = d.and_hms_opt(5, 6, 7).unwrap();
        assert_eq!(to_str(&Cell::DateTime(dt)), "2025-03-04 05:06:07");
    }

    #[test]
    fn bool_tokens() {
        for t in ["TRUE", "true", "t", "Yes", "y", "1", " Y "] {
            assert_eq!(to_bool(&text(t)), Some(true), "{t}");
        }
        for t in ["FALSE", "f", "no", "N", "0"] {
            assert_eq!(to_bool(&text(t)), Some(false), "{t}");
        }
        assert_eq!(to_bool(&Cell::Float(1.0)), Some(true));
        assert_eq!(to_bool(&Cell::Int(0)), Some(false));
        assert_eq!(to_bool(&Cell::Bool(false)), Some(false));
    }

    #[test]
    fn unrecognised_bool_is_absent_not_false() {
        assert_eq!(to_bool(&text("maybe")), None);
        assert_eq!(to_bool(&Cell::Int(2)), None);
        assert_eq!(to_bool(&Cell::Empty), None);
        assert_eq!(to_bool(&Cell::Float(f64::NAN)), None);
    }

    #[test]
    fn int_coercion() {
        assert_eq!(to_int(&text("1")), Some(1));
        assert_eq!(to_int(&text("1.0")), Some(1));
        assert_eq!(to_int(&text("2.9")), Some(2));
        assert_eq!(to_int(&Cell::Float(-0.5)), Some(0));
        assert_eq!(to_int(&Cell::Bool(true)), Some(1));
        assert_eq!(to_int(&text("yes")), None);
        assert_eq!(to_int(&text("inf")), None);
        assert_eq!(to_int(&Cell::Empty), None);
    }

    #[test]
    fn date_from_text_serial_and_typed() {
        let jan1 = NaiveDate::from_ymd_opt(2025, 1, 1);
        assert_eq!(to_date(&text("2025-01-01 17:45:00")), jan1);
        assert_eq!(to_date(&Cell::Int(45658)), jan1);
        assert_eq!(to_date(&Cell::Float(45658.5)), jan1);
        assert_eq!(
            to_date(&Cell::DateTime(jan1.unwrap().and_hms_opt(23, 0, 0).unwrap())),
            jan1
        );
        assert_eq!(to_date(&text("soon")), None);
        assert_eq!(to_date(&Cell::Bool(true)), None);
    }

    #[test]
    fn window_start_takes_left_side_only() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 30)
            .unwrap()
            .and_hms_opt(8, 0, 0);
        assert_eq!(
            to_window_start(&text("2025-09-30T08:00:00Z...2025-09-30T10:00:00Z")),
            start
        );
        assert_eq!(
            to_window_start(&text("2025-09-30 08:00...garbage")),
            start
        );
        assert_eq!(to_window_start(&text("2025-09-30 08:00")), start);
        assert_eq!(to_window_start(&text("...2025-09-30T10:00:00Z")), None);
        assert_eq!(to_window_start(&text("")), None);
        assert_eq!(to_window_start(&Cell::Empty), None);
    }

    #[test]
    fn coalesce_prefers_first_non_empty() {
        assert_eq!(coalesce(&[&text(" "), &Cell::Float(7.0)]), "7");
        assert_eq!(coalesce(&[&text("A"), &text("B")]), "A");
        assert_eq!(coalesce(&[&Cell::Empty, &Cell::Empty]), "");
    }
}
