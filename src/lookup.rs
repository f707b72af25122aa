// src/lookup.rs

use std::collections::HashMap;
use tracing::{debug, info};

use crate::derive::TrackedStatus;
use crate::error::{EnrichError, Result, TableRole};
use crate::normalize::{coalesce, to_str};
use crate::table::{Cell, RawTable};

pub const BILL_OF_LADING: &str = "Bill Of Lading";
pub const ORDER_NUMBER: &str = "Order Number";
pub const ROOT_CAUSE_ERROR: &str = "Root Cause Error";

/// Value the root-cause field is forced to for successfully tracked shipments.
pub const TRACKED_ROOT_CAUSE: &str = "Tracked";

/// Shipment key → root cause, built once from the RCA mapping table and
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RcaLookup {
    map: HashMap<String, String>,
}

impl RcaLookup {
    /// Key each mapping row by its Bill Of Lading, falling back to its Order
    /// Number. When a key repeats, the later row wins.
    #[tracing::instrument(level = "info", skip(table), fields(rows = table.len()))]
    pub fn build(table: &RawTable) -> Result<Self> {
        let missing = table.missing_columns(&[BILL_OF_LADING, ORDER_NUMBER, ROOT_CAUSE_ERROR]);
        if !missing.is_empty() {
            return Err(EnrichError::MissingColumns {
                table: TableRole::Mapping,
                missing,
            });
        }

        let mut map = HashMap::with_capacity(table.len());
        let mut duplicates = 0usize;
        for row in table.iter_rows() {
            let key = coalesce(&[row.get(BILL_OF_LADING), row.get(ORDER_NUMBER)]);
            let value = to_str(row.get(ROOT_CAUSE_ERROR));
            if map.insert(key, value).is_some() {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            debug!(duplicates, "mapping keys repeated; last row kept");
        }
        info!(keys = map.len(), "built RCA lookup");
        Ok(Self { map })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// A non-empty `current` cell is kept as-is, native type included;
    /// otherwise the mapped root cause for `shipment_id`, or empty when there
    /// is none.
    pub fn resolve(&self, current: &Cell, shipment_id: &str) -> Cell {
        if !to_str(current).is_empty() {
            return current.clone();
        }
        self.get(shipment_id).map(Cell::from).unwrap_or_default()
    }
}

impl FromIterator<(String, String)> for RcaLookup {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

/// Successful tracks carry no failure cause: the field is overwritten with
/// `"Tracked"`, including manually entered values.
pub fn override_root_cause(status: TrackedStatus, root_cause: Cell) -> Cell {
    if status.is_success() {
        Cell::from(TRACKED_ROOT_CAUSE)
    } else {
        root_cause
    }
}
