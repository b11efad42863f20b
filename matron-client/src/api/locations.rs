//! Admission-location and location endpoints (REST and FHIR).

use matron_core::{AdmissionLocation, DisplayRef, FhirBundle, FhirLocation, Results};

use super::REP_FULL;
use crate::error::Result;
use crate::rest::RestClient;

impl RestClient {
    /// `GET /admissionLocation?v=full`: wards eligible for admission with
    /// their bed layouts and occupancy counts.
    pub async fn list_admission_locations(&self) -> Result<Vec<AdmissionLocation>> {
        let page: Results<AdmissionLocation> =
            self.get_json(&format!("admissionLocation?{REP_FULL}")).await?;
        Ok(page.results)
    }

    /// `GET /location?tag=…`: locations carrying a given tag.
    pub async fn list_locations_by_tag(&self, tag: &str) -> Result<Vec<DisplayRef>> {
        let page: Results<DisplayRef> = self
            .get_json(&format!("location?tag={}", urlencoding::encode(tag)))
            .await?;
        Ok(page.results)
    }

    /// FHIR `GET /Location`.
    pub async fn fhir_list_locations(&self) -> Result<Vec<FhirLocation>> {
        let bundle: FhirBundle<FhirLocation> = self.fhir_get_json("Location").await?;
        Ok(bundle.entry.into_iter().map(|e| e.resource).collect())
    }
}
