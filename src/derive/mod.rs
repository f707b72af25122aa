// src/derive/mod.rs

pub mod week;

use crate::normalize::{coalesce, to_str};
use crate::table::Cell;

pub use week::WeekConvention;

const YMS_TRACKING_TYPE: &str = "UNKNOWN";

/// Outcome label written to the `Tracked Shipments` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackedStatus {
    Tracked,
    Untracked,
    YmsMilestone,
    /// Tracked flag absent or unrecognised.
    Blank,
}

impl TrackedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackedStatus::Tracked => "Tracked",
            TrackedStatus::Untracked => "Untracked",
            TrackedStatus::YmsMilestone => "YMS Milestone",
            TrackedStatus::Blank => "",
        }
    }

    pub fn from_label(s: &str) -> Self {
        match s.trim() {
            "Tracked" => TrackedStatus::Tracked,
            "Untracked" => TrackedStatus::Untracked,
            "YMS Milestone" => TrackedStatus::YmsMilestone,
            _ => TrackedStatus::Blank,
        }
    }

    /// Statuses that count as a successful track and force the root cause to `"Tracked"`.
    pub fn is_success(&self) -> bool {
        matches!(self, TrackedStatus::Tracked | TrackedStatus::YmsMilestone)
    }

    /// Classify a shipment from its tracked flag and tracking type. Only
    /// `UNKNOWN` changes the outcome of a positive flag.
    ///
    /// | tracking type     | true          | false     | absent |
    /// |-------------------|---------------|-----------|--------|
    /// | ELD / APP / DIRECT| Tracked       | Untracked | blank  |
    /// | UNKNOWN           | YMS Milestone | Untracked | blank  |
    /// | anything else     | Tracked       | Untracked | blank  |
    pub fn classify(tracked: Option<bool>, tracking_type: &str) -> Self {
        let tt = tracking_type.trim().to_uppercase();
        match tracked {
            None => TrackedStatus::Blank,
            Some(false) => TrackedStatus::Untracked,
            Some(true) if tt == YMS_TRACKING_TYPE => TrackedStatus::YmsMilestone,
            Some(true) => TrackedStatus::Tracked,
        }
    }
}

impl std::fmt::Display for TrackedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order Number when present, otherwise Bill of Lading. Never a combination.
pub fn shipment_id(order_number: &Cell, bill_of_lading: &Cell) -> String {
    coalesce(&[order_number, bill_of_lading])
}

/// Read a pre-normalized 0/1 tracked flag. Any other integer is unclassifiable.
pub fn flag_from_int(v: Option<i64>) -> Option<bool> {
    match v {
        Some(1) => Some(true),
        Some(0) => Some(false),
        _ => None,
    }
}

/// `"<Tracking Type> - <Tracked Shipments>"`.
pub fn tracking_field(tracking_type: &Cell, status: TrackedStatus) -> String {
    format!("{} - {}", to_str(tracking_type), status.as_str())
}

pub fn is_tracked(status: TrackedStatus) -> i64 {
    i64::from(status == TrackedStatus::Tracked)
}
