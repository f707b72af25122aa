// src/schema/mod.rs

pub mod columns;
pub mod project;

use tracing::debug;

use crate::derive::WeekConvention;
use crate::error::{EnrichError, Result, TableRole};
use crate::table::RawTable;

pub use project::project;

use columns::*;

/// A column whose header is spelled differently across exports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderAlias {
    pub canonical: &'static str,
    /// Accepted spellings other than the canonical one, in preference order.
    pub spellings: &'static [&'static str],
    pub required: bool,
}

impl HeaderAlias {
    pub fn accepted(&self) -> Vec<String> {
        std::iter::once(self.canonical)
            .chain(self.spellings.iter().copied())
            .map(String::from)
            .collect()
    }
}

/// Where the week label's date comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeekSource {
    /// A plain date or timestamp column.
    Date(&'static str),
    /// The start of a `"<start>...<end>"` window column.
    WindowStart(&'static str),
}

/// How the `Tracked` column is read before classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackedFlag {
    /// Boolean-like tokens (`Y`, `true`, `1`, ...).
    Boolean,
    /// A 0/1 integer; anything else is unclassifiable.
    Integer,
}

/// Which value `IsTracked` is computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IsTrackedSource {
    /// 1 when the classification is `Tracked`.
    Classification,
    /// 1 when the raw `Tracked` value is boolean-true, whatever the classification.
    RawFlag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupMode {
    Required,
    Unused,
}

/// Everything that differs between the supported source-file shapes. The
/// pipeline itself is shared; a variant only parameterizes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Variant {
    pub name: &'static str,
    pub required_columns: &'static [&'static str],
    pub aliases: &'static [HeaderAlias],
    pub output_columns: &'static [&'static str],
    /// Output columns written date-only.
    pub date_columns: &'static [&'static str],
    pub week: WeekConvention,
    pub week_source: WeekSource,
    pub tracked_flag: TrackedFlag,
    pub is_tracked: IsTrackedSource,
    pub root_cause_column: &'static str,
    pub lookup: LookupMode,
    /// Derived column holding the date of the week source, if the layout has one.
    pub week_date_column: Option<&'static str>,
}

const CARRIER_QUALITY_ALIASES: &[HeaderAlias] = &[HeaderAlias {
    canonical: SL_NO,
    spellings: &["Unnamed: 0"],
    required: false,
}];

const SHIPMENT_EXPORT_ALIASES: &[HeaderAlias] = &[HeaderAlias {
    canonical: PICKUP_WINDOW,
    spellings: &[
        "Pickup Appointment Window",
        "Pickup Appointment Window Utc",
        "Pickup Appt Window",
    ],
    required: true,
}];

impl Variant {
    /// "Data Quality by Carrier" base file, joined against an RCA mapping file.
    pub const CARRIER_QUALITY: Variant = Variant {
        name: "carrier-quality",
        required_columns: &[
            ORDER_NUMBER,
            BILL_OF_LADING,
            TRACKED,
            TRACKING_TYPE,
            CREATED_TIMESTAMP_DATE,
        ],
        aliases: CARRIER_QUALITY_ALIASES,
        output_columns: CARRIER_QUALITY_LAYOUT,
        date_columns: &[CREATED_TIMESTAMP_DATE, "Period Date"],
        week: WeekConvention::SundayStart,
        week_source: WeekSource::Date(CREATED_TIMESTAMP_DATE),
        tracked_flag: TrackedFlag::Boolean,
        is_tracked: IsTrackedSource::Classification,
        root_cause_column: RCA_REASON,
        lookup: LookupMode::Required,
        week_date_column: None,
    };

    /// Truckload shipment export keyed on the pickup appointment window.
    pub const SHIPMENT_EXPORT: Variant = Variant {
        name: "shipment-export",
        required_columns: &[ORDER_NUMBER, BILL_OF_LADING, TRACKED, TRACKING_TYPE],
        aliases: SHIPMENT_EXPORT_ALIASES,
        output_columns: SHIPMENT_EXPORT_LAYOUT,
        date_columns: &[PICKUP_DATE, CREATED_TIMESTAMP_DATE],
        week: WeekConvention::Iso,
        week_source: WeekSource::WindowStart(PICKUP_WINDOW),
        tracked_flag: TrackedFlag::Integer,
        is_tracked: IsTrackedSource::RawFlag,
        root_cause_column: TRACKING_ERROR,
        lookup: LookupMode::Unused,
        week_date_column: Some(PICKUP_DATE),
    };

    /// Fail with every missing required column named at once.
    pub fn validate(&self, table: &RawTable) -> Result<()> {
        let missing = table.missing_columns(self.required_columns);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(EnrichError::MissingColumns {
                table: TableRole::Base,
                missing,
            })
        }
    }

    /// Rename alternate header spellings to their canonical name. The canonical
    /// spelling wins when present; otherwise the first accepted spelling found.
    pub fn apply_aliases(&self, mut table: RawTable) -> Result<RawTable> {
        for alias in self.aliases {
            if table.has_column(alias.canonical) {
                continue;
            }
            match alias.spellings.iter().find(|s| table.has_column(s)) {
                Some(found) => {
                    debug!(from = %found, to = %alias.canonical, "renaming header");
                    table = table.rename_column(found, alias.canonical);
                }
                None if alias.required => {
                    return Err(EnrichError::MissingHeaderAlias {
                        table: TableRole::Base,
                        canonical: alias.canonical.to_string(),
                        accepted: alias.accepted(),
                    });
                }
                None => {}
            }
        }
        Ok(table)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> RawTable {
        RawTable::new(headers.iter().map(|h| h.to_string()).collect(), vec![])
    }

    #[test]
    fn validate_names_every_missing_column() {
        let t = table(&["Order Number", "Tracked"]);
        let err = Variant::CARRIER_QUALITY.validate(&t).unwrap_err();
        assert_eq!(
            err,
            EnrichError::MissingColumns {
                table: TableRole::Base,
                missing: vec![
                    "Bill of Lading".into(),
                    "Tracking Type".into(),
                    "Created Timestamp Date".into(),
                ],
            }
        );
    }

    #[test]
    fn shipment_export_does_not_require_created_date() {
        let t = table(&["Order Number", "Bill of Lading", "Tracked", "Tracking Type"]);
        assert!(Variant::SHIPMENT_EXPORT.validate(&t).is_ok());
    }

    #[test]
    fn unnamed_index_becomes_sl_no() -> Result<()> {
        let t = Variant::CARRIER_QUALITY.apply_aliases(table(&["Unnamed: 0", "Order Number"]))?;
        assert_eq!(t.headers, vec!["Sl. No", "Order Number"]);

        let both = Variant::CARRIER_QUALITY.apply_aliases(table(&["Unnamed: 0", "Sl. No"]))?;
        assert_eq!(both.headers, vec!["Unnamed: 0", "Sl. No"]);

        let neither = Variant::CARRIER_QUALITY.apply_aliases(table(&["Order Number"]))?;
        assert_eq!(neither.headers, vec!["Order Number"]);
        Ok(())
    }

    #[test]
    fn pickup_window_alias_first_spelling_wins() -> Result<()> {
        let t = Variant::SHIPMENT_EXPORT
            .apply_aliases(table(&["Pickup Appt Window", "Pickup Appointment Window"]))?;
        assert_eq!(t.headers, vec!["Pickup Appt Window", PICKUP_WINDOW]);
        Ok(())
    }

    #[test]
    fn missing_required_alias_lists_spellings() {
        let err = Variant::SHIPMENT_EXPORT
            .apply_aliases(table(&["Order Number"]))
            .unwrap_err();
        match err {
            EnrichError::MissingHeaderAlias {
                canonical, accepted, ..
            } => {
                assert_eq!(canonical, PICKUP_WINDOW);
                assert_eq!(accepted.len(), 4);
                assert_eq!(accepted[0], PICKUP_WINDOW);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn layouts_differ_by_shipment_type_family() {
        let a = Variant::CARRIER_QUALITY.output_columns;
        let b = Variant::SHIPMENT_EXPORT.output_columns;
        assert_eq!(a.len(), 50);
        assert!(a.contains(&"Shipment Type"));
        assert!(!b.contains(&"Shipment Type"));
        assert!(!b.iter().any(|c| c.starts_with("Attr")));
    }
}
