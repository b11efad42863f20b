//! Canonical cache keys (request signatures).
//!
//! Controllers and mutation commands must agree on these strings: a command
//! invalidates the same key its list controller fetches under.

pub const BEDS: &str = "bed?v=full";
pub const BED_TYPES: &str = "bedtype?v=full";
pub const BED_TAGS: &str = "bedTag?v=full";
pub const ADMISSION_LOCATIONS: &str = "admissionLocation?v=full";
pub const QUEUE_ENTRIES: &str = "queue-entry?v=full&isEnded=false&totalCount=true";
pub const QUEUE_METRICS: &str = "queue-entry-metrics";
pub const PATIENT_LISTS: &str = "cohortm/cohort?v=full";

pub fn cohort_members(cohort_uuid: &str) -> String {
    format!("cohortm/cohortmember?cohort={cohort_uuid}&v=full")
}
