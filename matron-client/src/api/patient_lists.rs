//! Patient-list (cohort module) and FHIR patient-search endpoints.

use matron_core::{Cohort, CohortMember, CoreError, FhirBundle, FhirPatient, Results};
use serde::Serialize;

use super::REP_FULL;
use crate::error::Result;
use crate::rest::RestClient;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortPayload {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CohortPayload {
    pub fn validate(&self) -> matron_core::Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("List name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortMemberPayload {
    pub cohort: String,
    pub patient: String,
    pub start_date: String,
}

impl CohortMemberPayload {
    pub fn validate(&self) -> matron_core::Result<()> {
        if self.cohort.trim().is_empty() {
            return Err(CoreError::validation("List is required"));
        }
        if self.patient.trim().is_empty() {
            return Err(CoreError::validation("Patient is required"));
        }
        Ok(())
    }
}

impl RestClient {
    /// `GET /cohortm/cohort?v=full`: all patient lists.
    pub async fn list_patient_lists(&self) -> Result<Vec<Cohort>> {
        let page: Results<Cohort> = self.get_json(&format!("cohortm/cohort?{REP_FULL}")).await?;
        Ok(page.results)
    }

    pub async fn create_patient_list(&self, payload: &CohortPayload) -> Result<Cohort> {
        payload.validate()?;
        self.post_json("cohortm/cohort", payload).await
    }

    /// Members of one list.
    pub async fn list_cohort_members(&self, cohort_uuid: &str) -> Result<Vec<CohortMember>> {
        let page: Results<CohortMember> = self
            .get_json(&format!(
                "cohortm/cohortmember?cohort={}&{REP_FULL}",
                urlencoding::encode(cohort_uuid)
            ))
            .await?;
        Ok(page.results)
    }

    pub async fn add_cohort_member(&self, payload: &CohortMemberPayload) -> Result<CohortMember> {
        payload.validate()?;
        self.post_json("cohortm/cohortmember", payload).await
    }

    /// FHIR `POST /Patient/_search` by name.
    pub async fn search_patients(&self, name: &str) -> Result<Vec<FhirPatient>> {
        let bundle: FhirBundle<FhirPatient> = self
            .fhir_post_form("Patient/_search", &[("name", name)])
            .await?;
        Ok(bundle.entry.into_iter().map(|e| e.resource).collect())
    }
}
