// src/schema/columns.rs
//
// Column names shared by both source-file shapes, and the fixed output layouts
// downstream reports are built on. Layout order is a contract.

pub const SL_NO: &str = "Sl. No";
pub const ORDER_NUMBER: &str = "Order Number";
pub const BILL_OF_LADING: &str = "Bill of Lading";
pub const TRACKED: &str = "Tracked";
pub const TRACKING_TYPE: &str = "Tracking Type";
pub const CREATED_TIMESTAMP_DATE: &str = "Created Timestamp Date";
pub const PICKUP_WINDOW: &str = "Pickup Appointment Window (UTC)";

pub const SHIPMENT_ID: &str = "Shipment ID";
pub const TRACKED_SHIPMENTS: &str = "Tracked Shipments";
pub const TRACKING_FIELD: &str = "Tracking field";
pub const IS_TRACKED: &str = "IsTracked";
pub const WEEK: &str = "Week";
pub const RCA_REASON: &str = "RCA Reason";
pub const TRACKING_ERROR: &str = "Tracking Error";
pub const PICKUP_DATE: &str = "Pickup Appointment Date";

pub const CARRIER_QUALITY_LAYOUT: &[&str] = &[
    "Sl. No",
    "Tenant Name",
    "Carrier Name",
    "Carrier Identifier Selection",
    "SCAC",
    "Bill of Lading",
    "Order Number",
    "Shipment ID",
    "RCA Reason",
    "Tracked Shipments",
    "Tracking Type",
    "Tracking field",
    "Tracking Method",
    "IsTracked",
    "Active Equipment ID",
    "Historical Equipment ID",
    "Pickup Name",
    "Pickup City State",
    "Pickup Country",
    "Pickup Region",
    "Dropoff Name",
    "Dropoff City State",
    "Dropoff Country",
    "Dropoff Country Region",
    "Final Status Reason",
    "Week",
    "Created Timestamp Date",
    "Pickup Arrival Utc Timestamp Raw",
    "Pickup Departure Utc Timestamp Raw",
    "Dropoff Arrival Utc Timestamp Raw",
    "Dropoff Departure Utc Timestamp Raw",
    "Nb Milestones Expected",
    "Nb Milestones Received",
    "Milestones Achieved Percentage",
    "Latency Updates Received",
    "Latency Updates Passed",
    "Shipment Latency Percentage",
    "Average Latency (min)",
    "Period Date",
    "Ping Interval (min)",
    "Shipment Type",
    "Attr1 Value",
    "Attr2 Name",
    "Attr2 Value",
    "Attr3 Name",
    "Attr3 Value",
    "Attr4 Name",
    "Attr4 Value",
    "Attr5 Name",
    "Attr5 Value",
];

pub const SHIPMENT_EXPORT_LAYOUT: &[&str] = &[
    "Shipment ID",
    "Order Number",
    "Bill of Lading",
    "Tenant Name",
    "Carrier Name",
    "SCAC",
    "Tracked Shipments",
    "Tracking Type",
    "Tracking field",
    "Tracking Error",
    "IsTracked",
    "Tracking Method",
    "Pickup Appointment Window (UTC)",
    "Pickup Appointment Date",
    "Week",
    "Pickup Name",
    "Pickup City State",
    "Dropoff Name",
    "Dropoff City State",
    "Final Status Reason",
    "Nb Milestones Expected",
    "Nb Milestones Received",
    "Milestones Achieved Percentage",
    "Created Timestamp Date",
];
