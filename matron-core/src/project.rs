//! Pure projections from wire models to display rows.
//!
//! Projectors never fail: missing nested fields degrade to `"--"`, the empty
//! string, or `0` depending on the column.

use chrono::{DateTime, Utc};

use crate::resource::{
    AdmissionLocation, Bed, BedTag, BedType, Cohort, FhirPatient, QueueEntry, QueueMetric,
};
use crate::rows::{
    BedRow, BedTagRow, BedTypeRow, MetricCard, PatientListRow, PatientRow, QueueRow,
    WardSummaryRow,
};

/// Placeholder for a missing display value.
pub const PLACEHOLDER: &str = "--";

/// Visit queue numbers are minted with a fixed-width location/date prefix;
/// the board shows only the trailing counter. Identifiers shorter than the
/// prefix are passed through untouched.
pub const VISIT_NUMBER_PREFIX_LEN: usize = 15;

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn or_empty(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Map an OpenMRS gender code to its display string.
pub fn gender_display(code: Option<&str>) -> String {
    match code {
        Some("M") | Some("m") => "Male".to_string(),
        Some("F") | Some("f") => "Female".to_string(),
        Some("O") | Some("o") => "Other".to_string(),
        Some("U") | Some("u") => "Unknown".to_string(),
        Some(other) if !other.is_empty() => other.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Strip the fixed identifier prefix from a visit queue number.
///
/// The prefix length counts characters, not bytes, so multi-byte identifiers
/// trim cleanly instead of slicing mid-character.
pub fn trim_visit_number(visit_number: &str) -> String {
    match visit_number.char_indices().nth(VISIT_NUMBER_PREFIX_LEN) {
        Some((idx, _)) => visit_number[idx..].to_string(),
        None => visit_number.to_string(),
    }
}

/// Minutes elapsed since `started_at`, clamped at zero.
///
/// Accepts both the OpenMRS `%Y-%m-%dT%H:%M:%S%.3f%z` timestamp format and
/// plain RFC 3339. Unparseable or missing timestamps project to 0.
pub fn wait_minutes(started_at: Option<&str>, now: DateTime<Utc>) -> i64 {
    let Some(raw) = started_at else { return 0 };

    let parsed = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw));

    match parsed {
        Ok(started) => (now - started.with_timezone(&Utc)).num_minutes().max(0),
        Err(e) => {
            tracing::debug!(timestamp = raw, error = %e, "Unparseable startedAt, projecting 0");
            0
        }
    }
}

pub fn project_beds(beds: &[Bed]) -> Vec<BedRow> {
    beds.iter()
        .map(|bed| BedRow {
            uuid: or_empty(bed.uuid.as_deref()),
            bed_number: or_placeholder(bed.bed_number.as_deref()),
            bed_type: or_placeholder(
                bed.bed_type
                    .as_ref()
                    .and_then(|t| t.display_name.as_deref().or(t.name.as_deref())),
            ),
            status: or_placeholder(bed.status.as_deref()),
            location: or_placeholder(
                bed.location.as_ref().and_then(|l| l.display.as_deref()),
            ),
        })
        .collect()
}

pub fn project_bed_types(types: &[BedType]) -> Vec<BedTypeRow> {
    types
        .iter()
        .map(|t| BedTypeRow {
            uuid: or_empty(t.uuid.as_deref()),
            name: or_placeholder(t.name.as_deref()),
            display_name: or_placeholder(t.display_name.as_deref()),
            description: or_placeholder(t.description.as_deref()),
        })
        .collect()
}

pub fn project_bed_tags(tags: &[BedTag]) -> Vec<BedTagRow> {
    tags.iter()
        .map(|t| BedTagRow {
            uuid: or_empty(t.uuid.as_deref()),
            name: or_placeholder(t.name.as_deref()),
        })
        .collect()
}

pub fn project_ward_summaries(locations: &[AdmissionLocation]) -> Vec<WardSummaryRow> {
    locations
        .iter()
        .map(|loc| {
            let total = loc.total_beds.unwrap_or(0);
            let occupied = loc.occupied_beds.unwrap_or(0);
            let occupancy_pct = if total == 0 {
                0
            } else {
                ((occupied * 100) / total).min(100) as u8
            };

            WardSummaryRow {
                uuid: or_empty(loc.ward.as_ref().and_then(|w| w.uuid.as_deref())),
                ward: or_placeholder(loc.ward.as_ref().and_then(|w| w.display.as_deref())),
                total_beds: total,
                occupied_beds: occupied,
                occupancy_pct,
            }
        })
        .collect()
}

pub fn project_queue_entries(entries: &[QueueEntry], now: DateTime<Utc>) -> Vec<QueueRow> {
    entries
        .iter()
        .map(|entry| {
            let person = entry.patient.as_ref().and_then(|p| p.person.as_ref());

            QueueRow {
                uuid: or_empty(entry.uuid.as_deref()),
                patient_name: or_placeholder(
                    person
                        .and_then(|p| p.display.as_deref())
                        .or(entry.patient.as_ref().and_then(|p| p.display.as_deref())),
                ),
                patient_uuid: or_empty(
                    entry.patient.as_ref().and_then(|p| p.uuid.as_deref()),
                ),
                gender: gender_display(person.and_then(|p| p.gender.as_deref())),
                queue: or_placeholder(
                    entry.queue.as_ref().and_then(|q| q.display.as_deref()),
                ),
                status: or_placeholder(
                    entry.status.as_ref().and_then(|s| s.display.as_deref()),
                ),
                priority: or_placeholder(
                    entry.priority.as_ref().and_then(|p| p.display.as_deref()),
                ),
                priority_comment: or_empty(entry.priority_comment.as_deref()),
                wait_minutes: wait_minutes(entry.started_at.as_deref(), now),
                visit_number: entry
                    .visit
                    .as_ref()
                    .and_then(|v| v.visit_number.as_deref())
                    .map(trim_visit_number)
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            }
        })
        .collect()
}

pub fn project_patient_lists(cohorts: &[Cohort]) -> Vec<PatientListRow> {
    cohorts
        .iter()
        .map(|c| PatientListRow {
            uuid: or_empty(c.uuid.as_deref()),
            name: or_placeholder(c.name.as_deref()),
            description: or_placeholder(c.description.as_deref()),
            member_count: c.size.unwrap_or(0),
            attributes: c
                .attributes
                .iter()
                .map(|a| {
                    let name = or_placeholder(
                        a.attribute_type.as_ref().and_then(|t| t.display.as_deref()),
                    );
                    let value = match &a.value {
                        Some(serde_json::Value::String(s)) => s.clone(),
                        Some(other) => other.to_string(),
                        None => String::new(),
                    };
                    (name, value)
                })
                .collect(),
        })
        .collect()
}

pub fn project_fhir_patients(patients: &[FhirPatient]) -> Vec<PatientRow> {
    patients
        .iter()
        .map(|p| {
            let name = p
                .name
                .first()
                .map(|n| {
                    let mut parts = n.given.clone();
                    if let Some(family) = &n.family {
                        parts.push(family.clone());
                    }
                    parts.join(" ")
                })
                .filter(|s| !s.is_empty());

            PatientRow {
                uuid: or_empty(p.id.as_deref()),
                name: or_placeholder(name.as_deref()),
                gender: or_placeholder(p.gender.as_deref()),
                identifier: or_placeholder(
                    p.identifier.first().and_then(|i| i.value.as_deref()),
                ),
            }
        })
        .collect()
}

pub fn project_metrics(metrics: &[QueueMetric]) -> Vec<MetricCard> {
    metrics
        .iter()
        .map(|m| MetricCard {
            service: or_placeholder(m.service.as_deref()),
            count: m.count,
        })
        .collect()
}
