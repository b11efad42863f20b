//! View-model rows produced by the projectors in [`crate::project`].
//!
//! Rows are flat, display-ready structs: every field is already a string or
//! number suitable for a table cell, with missing backend data replaced by
//! placeholders.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BedRow {
    pub uuid: String,
    pub bed_number: String,
    pub bed_type: String,
    pub status: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BedTypeRow {
    pub uuid: String,
    pub name: String,
    pub display_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BedTagRow {
    pub uuid: String,
    pub name: String,
}

/// One ward's occupancy summary for the admission-location table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WardSummaryRow {
    pub uuid: String,
    pub ward: String,
    pub total_beds: usize,
    pub occupied_beds: usize,
    /// Whole-percent occupancy; 0 when the ward has no beds.
    pub occupancy_pct: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueRow {
    pub uuid: String,
    pub patient_name: String,
    pub patient_uuid: String,
    pub gender: String,
    pub queue: String,
    pub status: String,
    pub priority: String,
    pub priority_comment: String,
    /// Minutes since the entry was started, clamped at zero.
    pub wait_minutes: i64,
    /// Visit queue number with the identifier prefix stripped.
    pub visit_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientListRow {
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub member_count: usize,
    /// Attribute columns as `(attribute type, value)` pairs, in wire order.
    pub attributes: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRow {
    pub uuid: String,
    pub name: String,
    pub gender: String,
    pub identifier: String,
}

/// One metrics card: a service name and its current count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub service: String,
    pub count: u64,
}
