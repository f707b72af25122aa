use tracing::debug;

use crate::normalize::to_date;
use crate::table::{Cell, RawTable};

/// Restrict `table` to exactly `columns`, in that order.
/// - a listed column the table lacks is synthesized empty
/// - a column the table has but the list doesn't is dropped
/// - cells of `date_columns` that read as a date are narrowed to the date alone
pub fn project(table: &RawTable, columns: &[&str], date_columns: &[&str]) -> RawTable {
    let sources: Vec<Option<usize>> = columns.iter().map(|c| table.column_index(c)).collect();
    let synthesized = sources.iter().filter(|s| s.is_none()).count();
    if synthesized > 0 {
        debug!(synthesized, "output columns absent from input; filling blank");
    }

    let is_date: Vec<bool> = columns.iter().map(|c| date_columns.contains(c)).collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            sources
                .iter()
                .zip(&is_date)
                .map(|(src, &date)| match src {
                    None => Cell::Empty,
                    Some(i) if date => date_only(&row[*i]),
                    Some(i) => row[*i].clone(),
                })
                .collect()
        })
        .collect();

    RawTable {
        headers: columns.iter().map(|c| c.to_string()).collect(),
        rows,
    }
}

fn date_only(cell: &Cell) -> Cell {
    to_date(cell).map(Cell::Date).unwrap_or_else(|| cell.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn enriched() -> RawTable {
        RawTable::new(
            vec![
                "Extra".into(),
                "Shipment ID".into(),
                "Created Timestamp Date".into(),
            ],
            vec![
                vec!["x".into(), "100".into(), "2025-01-01 13:45:00".into()],
                vec!["y".into(), "BOL2".into(), "n/a".into()],
            ],
        )
    }

    const COLUMNS: &[&str] = &["Week", "Shipment ID", "Created Timestamp Date"];
    const DATES: &[&str] = &["Created Timestamp Date"];

    #[test]
    fn reorders_synthesizes_and_drops() {
        let out = project(&enriched(), COLUMNS, DATES);
        assert_eq!(out.headers, COLUMNS);
        assert_eq!(out.rows[0][0], Cell::Empty);
        assert_eq!(out.rows[0][1], Cell::Text("100".into()));
        assert!(out.rows.iter().all(|r| r.len() == COLUMNS.len()));
    }

    #[test]
    fn date_columns_lose_time_of_day() {
        let out = project(&enriched(), COLUMNS, DATES);
        assert_eq!(
            out.rows[0][2],
            Cell::Date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        // unparsable values keep their text
        assert_eq!(out.rows[1][2], Cell::Text("n/a".into()));
    }

    #[test]
    fn projection_is_idempotent() {
        let once = project(&enriched(), COLUMNS, DATES);
        let twice = project(&once, COLUMNS, DATES);
        assert_eq!(once, twice);
    }
}
