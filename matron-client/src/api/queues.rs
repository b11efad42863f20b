//! Service-queue endpoints.

use matron_core::{CoreError, QueueEntry, QueueMetric, QueueNumber, Results};
use serde::Serialize;
use serde_json::json;

use super::REP_FULL;
use crate::error::Result;
use crate::rest::RestClient;

#[derive(Debug, Clone, Serialize)]
pub struct UuidRef {
    pub uuid: String,
}

impl UuidRef {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self { uuid: uuid.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntryPayload {
    pub queue: UuidRef,
    pub patient: UuidRef,
    pub priority: UuidRef,
    pub status: UuidRef,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_weight: Option<f64>,
}

/// `POST /visit-queue-entry` body: a visit reference plus the entry to create
/// under it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitQueueEntryPayload {
    pub visit: UuidRef,
    pub queue_entry: QueueEntryPayload,
}

impl VisitQueueEntryPayload {
    pub fn validate(&self) -> matron_core::Result<()> {
        if self.visit.uuid.trim().is_empty() {
            return Err(CoreError::validation("An active visit is required"));
        }
        let entry = &self.queue_entry;
        for (value, label) in [
            (&entry.queue.uuid, "Queue"),
            (&entry.patient.uuid, "Patient"),
            (&entry.priority.uuid, "Priority"),
            (&entry.status.uuid, "Status"),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::validation(format!("{label} is required")));
            }
        }
        Ok(())
    }
}

/// Status/priority change for an existing entry.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UuidRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<UuidRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_comment: Option<String>,
}

impl TransitionPayload {
    pub fn validate(&self) -> matron_core::Result<()> {
        if self.status.is_none() && self.priority.is_none() {
            return Err(CoreError::validation(
                "A transition needs a new status or priority",
            ));
        }
        Ok(())
    }
}

impl RestClient {
    /// One page of `GET /queue-entry`. `page_url` is `None` for the first
    /// page, or the absolute `links.next` URI for subsequent ones.
    pub async fn queue_entries_page(
        &self,
        page_url: Option<&str>,
    ) -> Result<Results<QueueEntry>> {
        let path = match page_url {
            Some(url) => url.to_string(),
            None => format!("queue-entry?{REP_FULL}&isEnded=false&totalCount=true"),
        };
        self.get_json(&path).await
    }

    /// Aggregate every page of active queue entries into one vector.
    ///
    /// The upstream board paginates server-side but the views consume the
    /// whole set, so this follows `links.next` until exhausted. The returned
    /// total is the backend's authoritative `totalCount` when present.
    pub async fn list_queue_entries(&self) -> Result<(Vec<QueueEntry>, usize)> {
        let mut entries = Vec::new();
        let mut total = None;
        let mut next: Option<String> = None;

        loop {
            let page = self.queue_entries_page(next.as_deref()).await?;
            if page.total_count.is_some() {
                total = page.total_count;
            }
            entries.extend(page.results);

            match page.links.iter().find(|l| l.rel == "next") {
                // A server echoing the same next link forever would loop us;
                // treat a repeat as the end.
                Some(link) if next.as_deref() != Some(link.uri.as_str()) => {
                    next = Some(link.uri.clone());
                }
                _ => break,
            }
        }

        let total = total.unwrap_or(entries.len());
        Ok((entries, total))
    }

    pub async fn create_visit_queue_entry(
        &self,
        payload: &VisitQueueEntryPayload,
    ) -> Result<QueueEntry> {
        payload.validate()?;
        self.post_json("visit-queue-entry", payload).await
    }

    /// Move an entry to a new status and/or priority.
    pub async fn transition_queue_entry(
        &self,
        uuid: &str,
        payload: &TransitionPayload,
    ) -> Result<QueueEntry> {
        payload.validate()?;
        self.post_json(&format!("queue-entry/{uuid}"), payload).await
    }

    /// End an entry (remove it from the active board).
    pub async fn end_queue_entry(&self, uuid: &str, ended_at: &str) -> Result<QueueEntry> {
        self.post_json(&format!("queue-entry/{uuid}"), &json!({"endedAt": ended_at}))
            .await
    }

    /// `GET /queue-entry-metrics`: per-service counts for the metrics cards.
    pub async fn queue_metrics(&self) -> Result<Vec<QueueMetric>> {
        let page: Results<QueueMetric> = self.get_json("queue-entry-metrics").await?;
        Ok(page.results)
    }

    /// `GET /queue-entry-number`: the next visit queue number at a location.
    pub async fn next_queue_number(&self, location_uuid: &str) -> Result<QueueNumber> {
        self.get_json(&format!(
            "queue-entry-number?location={}",
            urlencoding::encode(location_uuid)
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> VisitQueueEntryPayload {
        VisitQueueEntryPayload {
            visit: UuidRef::new("v-1"),
            queue_entry: QueueEntryPayload {
                queue: UuidRef::new("q-1"),
                patient: UuidRef::new("p-1"),
                priority: UuidRef::new("pr-1"),
                status: UuidRef::new("s-1"),
                started_at: None,
                sort_weight: None,
            },
        }
    }

    #[test]
    fn test_valid_visit_queue_entry() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn test_missing_visit_rejected() {
        let mut p = payload();
        p.visit.uuid = String::new();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_missing_patient_rejected() {
        let mut p = payload();
        p.queue_entry.patient.uuid = String::new();
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("Patient"));
    }

    #[test]
    fn test_empty_transition_rejected() {
        assert!(TransitionPayload::default().validate().is_err());
    }

    #[test]
    fn test_transition_wire_shape() {
        let p = TransitionPayload {
            status: Some(UuidRef::new("s-2")),
            priority: None,
            priority_comment: Some("fast-tracked".to_string()),
        };
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["status"]["uuid"], "s-2");
        assert_eq!(value["priorityComment"], "fast-tracked");
        assert!(value.get("priority").is_none());
    }
}
