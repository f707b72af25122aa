use serde::Serialize;
use std::{collections::BTreeMap, fmt};

use crate::derive::TrackedStatus;
use crate::normalize::to_str;
use crate::schema::{columns, Variant};
use crate::table::RawTable;

const BLANK_LABEL: &str = "(blank)";

/// Quality counters over the final output rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub variant: String,
    pub total_rows: usize,
    /// Rows whose root-cause column is empty.
    pub blank_root_cause: usize,
    /// Rows classified `Tracked` or `YMS Milestone`.
    pub tracked_or_yms: usize,
    pub blank_week: usize,
    /// Row count per `Tracked Shipments` label.
    pub by_status: BTreeMap<String, usize>,
}

impl Summary {
    pub fn from_output(variant: &Variant, table: &RawTable) -> Self {
        let mut summary = Summary {
            variant: variant.name.to_string(),
            total_rows: table.len(),
            blank_root_cause: 0,
            tracked_or_yms: 0,
            blank_week: 0,
            by_status: BTreeMap::new(),
        };

        for row in table.iter_rows() {
            if to_str(row.get(variant.root_cause_column)).is_empty() {
                summary.blank_root_cause += 1;
            }
            if to_str(row.get(columns::WEEK)).is_empty() {
                summary.blank_week += 1;
            }
            let status = TrackedStatus::from_label(&to_str(row.get(columns::TRACKED_SHIPMENTS)));
            if status.is_success() {
                summary.tracked_or_yms += 1;
            }
            let label = match status {
                TrackedStatus::Blank => BLANK_LABEL,
                other => other.as_str(),
            };
            *summary.by_status.entry(label.to_string()).or_default() += 1;
        }
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Quick checks ({})", self.variant)?;
        writeln!(f, "  Rows:                  {}", self.total_rows)?;
        writeln!(f, "  Blank root cause:      {}", self.blank_root_cause)?;
        writeln!(f, "  Tracked/YMS:           {}", self.tracked_or_yms)?;
        writeln!(f, "  Blank week:            {}", self.blank_week)?;
        for (label, count) in &self.by_status {
            writeln!(f, "    {:<20} {}", label, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    #[test]
    fn counts_over_output_rows() {
        let table = RawTable::new(
            vec!["Tracking Error".into(), "Tracked Shipments".into(), "Week".into()],
            vec![
                vec!["Tracked".into(), "Tracked".into(), "Week 40".into()],
                vec!["Tracked".into(), "YMS Milestone".into(), Cell::Empty],
                vec![Cell::Empty, "Untracked".into(), "Week 41".into()],
                vec![Cell::Empty, Cell::Empty, Cell::Empty],
            ],
        );
        let s = Summary::from_output(&Variant::SHIPMENT_EXPORT, &table);
        assert_eq!(s.total_rows, 4);
        assert_eq!(s.blank_root_cause, 2);
        assert_eq!(s.tracked_or_yms, 2);
        assert_eq!(s.blank_week, 2);
        assert_eq!(s.by_status.get("(blank)"), Some(&1));
        assert_eq!(s.by_status.get("Untracked"), Some(&1));

        let text = s.to_string();
        assert!(text.contains("Blank root cause:      2"));
        assert!(text.contains("Tracked/YMS:           2"));
    }
}
