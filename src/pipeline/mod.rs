// src/pipeline/mod.rs

pub mod summary;

use chrono::NaiveDate;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{info, warn};

use crate::derive::{self, TrackedStatus};
use crate::error::{EnrichError, Result};
use crate::lookup::{override_root_cause, RcaLookup};
use crate::normalize::{to_bool, to_date, to_int, to_str, to_window_start};
use crate::schema::{
    columns::*, project, IsTrackedSource, LookupMode, TrackedFlag, Variant, WeekSource,
};
use crate::table::{Cell, RawTable, Row};

pub use summary::Summary;

/// Output of one run: the fixed-layout table plus its quality counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub output: RawTable,
    pub summary: Summary,
}

/// Fields computed for one input row.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub shipment_id: String,
    pub status: TrackedStatus,
    pub tracking_field: String,
    pub is_tracked: i64,
    pub week: String,
    pub week_date: Option<NaiveDate>,
    pub root_cause: Cell,
}

/// Enrich `base` according to `variant` and project it onto the variant's layout.
///
/// Steps, in order:
/// 1) required columns present, else every missing name is reported
/// 2) alternate header spellings renamed to canonical
/// 3) RCA lookup built in full (lookup variants only) before any row reads it
/// 4) per-row derivation, resolution and override (rows are independent)
/// 5) projection and summary
///
/// Any error aborts before output exists; bad cells never error.
#[tracing::instrument(level = "info", skip(base, mapping), fields(variant = %variant, rows = base.len()))]
pub fn run(variant: &Variant, base: RawTable, mapping: Option<&RawTable>) -> Result<Report> {
    let start = Instant::now();

    variant.validate(&base)?;
    let base = variant.apply_aliases(base)?;

    let lookup = match (variant.lookup, mapping) {
        (LookupMode::Required, Some(table)) => Some(RcaLookup::build(table)?),
        (LookupMode::Required, None) => {
            return Err(EnrichError::MissingMapping {
                variant: variant.name.to_string(),
            })
        }
        (LookupMode::Unused, Some(_)) => {
            warn!("variant does not use an RCA mapping; ignoring the one supplied");
            None
        }
        (LookupMode::Unused, None) => None,
    };

    let derived: Vec<Derived> = (0..base.len())
        .into_par_iter()
        .map(|i| derive_row(variant, base.row(i), lookup.as_ref()))
        .collect();

    let enriched = enrich(variant, base, derived);
    let output = project(&enriched, variant.output_columns, variant.date_columns);
    let summary = Summary::from_output(variant, &output);

    info!(
        rows = summary.total_rows,
        blank_root_cause = summary.blank_root_cause,
        tracked_or_yms = summary.tracked_or_yms,
        blank_week = summary.blank_week,
        elapsed = ?start.elapsed(),
        "enrichment complete"
    );
    Ok(Report { output, summary })
}

/// Every derived field for one row. Pure: depends only on the row, the
/// variant and the (already built) lookup.
pub fn derive_row(variant: &Variant, row: Row<'_>, lookup: Option<&RcaLookup>) -> Derived {
    let shipment_id = derive::shipment_id(row.get(ORDER_NUMBER), row.get(BILL_OF_LADING));

    let raw_tracked = row.get(TRACKED);
    let flag = match variant.tracked_flag {
        TrackedFlag::Boolean => to_bool(raw_tracked),
        TrackedFlag::Integer => derive::flag_from_int(to_int(raw_tracked)),
    };
    let tracking_type = row.get(TRACKING_TYPE);
    let status = TrackedStatus::classify(flag, &to_str(tracking_type));

    let is_tracked = match variant.is_tracked {
        IsTrackedSource::Classification => derive::is_tracked(status),
        IsTrackedSource::RawFlag => i64::from(to_bool(raw_tracked) == Some(true)),
    };

    let week_date = match variant.week_source {
        WeekSource::Date(col) => to_date(row.get(col)),
        WeekSource::WindowStart(col) => to_window_start(row.get(col)).map(|dt| dt.date()),
    };

    let current = row.get(variant.root_cause_column);
    let resolved = match lookup {
        Some(lookup) => lookup.resolve(current, &shipment_id),
        None => current.clone(),
    };

    Derived {
        tracking_field: derive::tracking_field(tracking_type, status),
        week: variant.week.label(week_date),
        root_cause: override_root_cause(status, resolved),
        shipment_id,
        status,
        is_tracked,
        week_date,
    }
}

/// Attach derived columns to the source table. Source columns are kept; a
/// derived column that shares a source column's name replaces its values.
fn enrich(variant: &Variant, base: RawTable, derived: Vec<Derived>) -> RawTable {
    let mut shipment_ids = Vec::with_capacity(derived.len());
    let mut statuses = Vec::with_capacity(derived.len());
    let mut fields = Vec::with_capacity(derived.len());
    let mut flags = Vec::with_capacity(derived.len());
    let mut weeks = Vec::with_capacity(derived.len());
    let mut week_dates = Vec::with_capacity(derived.len());
    let mut root_causes = Vec::with_capacity(derived.len());

    for d in derived {
        shipment_ids.push(Cell::from(d.shipment_id));
        statuses.push(Cell::from(d.status.as_str()));
        fields.push(Cell::from(d.tracking_field));
        flags.push(Cell::Int(d.is_tracked));
        weeks.push(Cell::from(d.week));
        week_dates.push(d.week_date.map(Cell::Date).unwrap_or_default());
        root_causes.push(d.root_cause);
    }

    let table = base
        .with_column(SHIPMENT_ID, shipment_ids)
        .with_column(TRACKED_SHIPMENTS, statuses)
        .with_column(TRACKING_FIELD, fields)
        .with_column(IS_TRACKED, flags)
        .with_column(WEEK, weeks)
        .with_column(variant.root_cause_column, root_causes);

    match variant.week_date_column {
        Some(col) => table.with_column(col, week_dates),
        None => table,
    }
}
