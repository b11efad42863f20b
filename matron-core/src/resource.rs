//! Wire models for the OpenMRS REST and FHIR resources this layer consumes.
//!
//! Every nested field is optional: the backend routinely returns partially
//! populated representations depending on the `v=` representation requested,
//! and projection degrades missing data to placeholders instead of failing.

use serde::{Deserialize, Serialize};

/// Standard OpenMRS list envelope: `{"results": [...], "links": [...], "totalCount": n}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Results<T> {
    pub results: Vec<T>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,

    #[serde(rename = "totalCount", skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

impl<T> Results<T> {
    /// URI of the `next` page link, if the server indicated one.
    pub fn next_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == "next")
            .map(|l| l.uri.as_str())
    }
}

impl<T> Default for Results<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            links: Vec::new(),
            total_count: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub uri: String,
}

/// A `{uuid, display}` reference, the shape OpenMRS uses for most nested
/// concept and metadata references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

// ---------------------------------------------------------------------------
// Bed management
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_type: Option<BedType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<DisplayRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BedTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A bed-to-tag mapping record, created one per tag when a bed is saved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedTagMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_tag: Option<BedTag>,
}

/// A ward eligible for admission, with its bed layout and occupancy counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward: Option<DisplayRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_beds: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupied_beds: Option<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bed_layouts: Vec<BedLayout>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_type: Option<BedType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_number: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_number: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patients: Vec<Patient>,
}

// ---------------------------------------------------------------------------
// Patients and visits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<PatientIdentifier>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientIdentifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_datetime: Option<String>,
}

// ---------------------------------------------------------------------------
// Service queues
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Queue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<DisplayRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<DisplayRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<Queue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Patient>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit: Option<Visit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DisplayRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<DisplayRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_weight: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
}

/// Response of `GET /queue-entry-number`: the next visit queue number the
/// backend will assign at a service point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueNumber {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_number: Option<String>,
}

/// Per-service counts from `GET /queue-entry-metrics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMetric {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(default)]
    pub count: u64,
}

// ---------------------------------------------------------------------------
// Patient lists (cohort module)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cohort {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<CohortAttribute>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<DisplayRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Patient>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

// ---------------------------------------------------------------------------
// FHIR subset (patient search, locations)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FhirBundle<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,

    #[serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<FhirEntry<T>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FhirEntry<T> {
    pub resource: T,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FhirPatient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<FhirIdentifier>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HumanName {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FhirIdentifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FhirLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bed_full() {
        let bed: Bed = serde_json::from_value(json!({
            "uuid": "b-1",
            "bedNumber": "BED-100",
            "bedType": {"uuid": "t-1", "name": "standard", "displayName": "Standard"},
            "status": "AVAILABLE",
            "row": 1,
            "column": 2
        }))
        .unwrap();

        assert_eq!(bed.bed_number.as_deref(), Some("BED-100"));
        assert_eq!(
            bed.bed_type.unwrap().display_name.as_deref(),
            Some("Standard")
        );
    }

    #[test]
    fn test_parse_bed_sparse() {
        // Partial representations must still deserialize.
        let bed: Bed = serde_json::from_value(json!({"uuid": "b-2"})).unwrap();
        assert!(bed.bed_number.is_none());
        assert!(bed.bed_type.is_none());
    }

    #[test]
    fn test_results_next_link() {
        let page: Results<Bed> = serde_json::from_value(json!({
            "results": [{"uuid": "b-1"}],
            "links": [
                {"rel": "self", "uri": "http://x/bed?startIndex=0"},
                {"rel": "next", "uri": "http://x/bed?startIndex=50"}
            ],
            "totalCount": 120
        }))
        .unwrap();

        assert_eq!(page.next_link(), Some("http://x/bed?startIndex=50"));
        assert_eq!(page.total_count, Some(120));
    }

    #[test]
    fn test_results_without_links() {
        let page: Results<Bed> =
            serde_json::from_value(json!({"results": []})).unwrap();
        assert!(page.next_link().is_none());
        assert!(page.total_count.is_none());
    }

    #[test]
    fn test_parse_queue_entry() {
        let entry: QueueEntry = serde_json::from_value(json!({
            "uuid": "q-1",
            "queue": {"uuid": "svc-1", "display": "Triage"},
            "patient": {
                "uuid": "p-1",
                "person": {"display": "Jane Doe", "gender": "F", "age": 34}
            },
            "status": {"uuid": "s-1", "display": "Waiting"},
            "priority": {"uuid": "pr-1", "display": "Emergency"},
            "startedAt": "2026-08-26T08:00:00.000+00:00"
        }))
        .unwrap();

        assert_eq!(entry.status.unwrap().display.as_deref(), Some("Waiting"));
        assert_eq!(
            entry.patient.unwrap().person.unwrap().gender.as_deref(),
            Some("F")
        );
    }

    #[test]
    fn test_parse_fhir_bundle() {
        let bundle: FhirBundle<FhirPatient> = serde_json::from_value(json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "total": 1,
            "entry": [{
                "resource": {
                    "resourceType": "Patient",
                    "id": "p-9",
                    "name": [{"given": ["Jane"], "family": "Doe"}],
                    "gender": "female"
                }
            }]
        }))
        .unwrap();

        assert_eq!(bundle.total, Some(1));
        assert_eq!(bundle.entry[0].resource.id.as_deref(), Some("p-9"));
    }

    #[test]
    fn test_bed_payload_roundtrip_skips_none() {
        let bed = Bed {
            uuid: Some("b-1".into()),
            bed_number: Some("BED-1".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&bed).unwrap();
        assert!(value.get("bedType").is_none());
        assert!(value.get("status").is_none());
    }
}
