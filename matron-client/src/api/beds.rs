//! Bed, bed-type, bed-tag and bed-tag-mapping endpoints.

use matron_core::{Bed, BedTag, BedTagMap, BedType, CoreError, Results};
use serde::Serialize;
use serde_json::json;

use super::REP_FULL;
use crate::error::Result;
use crate::rest::RestClient;

/// Upstream column limit on bed numbers.
pub const MAX_BED_NUMBER_LEN: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedPayload {
    pub bed_number: String,
    /// Bed type name (not uuid; the upstream resolves by name).
    pub bed_type: String,
    pub status: String,
    pub row: u32,
    pub column: u32,
    pub location_uuid: String,
}

impl BedPayload {
    pub fn validate(&self) -> matron_core::Result<()> {
        if self.bed_number.trim().is_empty() {
            return Err(CoreError::validation("Bed number is required"));
        }
        if self.bed_number.len() > MAX_BED_NUMBER_LEN {
            return Err(CoreError::validation(format!(
                "Bed number must be at most {MAX_BED_NUMBER_LEN} characters"
            )));
        }
        if self.bed_type.trim().is_empty() {
            return Err(CoreError::validation("Bed type is required"));
        }
        if self.location_uuid.trim().is_empty() {
            return Err(CoreError::validation("Location is required"));
        }
        if self.row == 0 || self.column == 0 {
            return Err(CoreError::validation("Row and column must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BedTypePayload {
    pub name: String,
    pub display_name: String,
    pub description: String,
}

impl BedTypePayload {
    pub fn validate(&self) -> matron_core::Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("Bed type name is required"));
        }
        if self.display_name.trim().is_empty() {
            return Err(CoreError::validation("Display name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BedTagPayload {
    pub name: String,
}

impl BedTagPayload {
    pub fn validate(&self) -> matron_core::Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("Bed tag name is required"));
        }
        Ok(())
    }
}

impl RestClient {
    /// `GET /bed`, optionally scoped to one location.
    pub async fn list_beds(&self, location_uuid: Option<&str>) -> Result<Vec<Bed>> {
        let path = match location_uuid {
            Some(uuid) => format!("bed?{REP_FULL}&locationUuid={}", urlencoding::encode(uuid)),
            None => format!("bed?{REP_FULL}"),
        };
        let page: Results<Bed> = self.get_json(&path).await?;
        Ok(page.results)
    }

    pub async fn create_bed(&self, payload: &BedPayload) -> Result<Bed> {
        payload.validate()?;
        self.post_json("bed", payload).await
    }

    /// Edit-via-POST, as the upstream bed resource does it.
    pub async fn update_bed(&self, uuid: &str, payload: &BedPayload) -> Result<Bed> {
        payload.validate()?;
        self.post_json(&format!("bed/{uuid}"), payload).await
    }

    /// Void a bed. A non-empty reason is mandatory.
    pub async fn delete_bed(&self, uuid: &str, reason: &str) -> Result<()> {
        if reason.trim().is_empty() {
            return Err(CoreError::validation("A reason is required to delete a bed").into());
        }
        self.delete(&format!("bed/{uuid}?reason={}", urlencoding::encode(reason)))
            .await
    }

    pub async fn list_bed_types(&self) -> Result<Vec<BedType>> {
        let page: Results<BedType> = self.get_json(&format!("bedtype?{REP_FULL}")).await?;
        Ok(page.results)
    }

    pub async fn create_bed_type(&self, payload: &BedTypePayload) -> Result<BedType> {
        payload.validate()?;
        self.post_json("bedtype", payload).await
    }

    pub async fn list_bed_tags(&self) -> Result<Vec<BedTag>> {
        let page: Results<BedTag> = self.get_json(&format!("bedTag?{REP_FULL}")).await?;
        Ok(page.results)
    }

    pub async fn create_bed_tag(&self, payload: &BedTagPayload) -> Result<BedTag> {
        payload.validate()?;
        self.post_json("bedTag", payload).await
    }

    /// `POST /bedTagMap`: attach one tag to one bed.
    pub async fn create_bed_tag_map(&self, bed_uuid: &str, tag_uuid: &str) -> Result<BedTagMap> {
        let body = json!({
            "bed": {"uuid": bed_uuid},
            "bedTag": {"uuid": tag_uuid},
        });
        self.post_json("bedTagMap", &body).await
    }

    pub async fn delete_bed_tag_map(&self, uuid: &str) -> Result<()> {
        self.delete(&format!("bedTagMap/{uuid}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> BedPayload {
        BedPayload {
            bed_number: "BED-100".to_string(),
            bed_type: "Standard".to_string(),
            status: "AVAILABLE".to_string(),
            row: 1,
            column: 1,
            location_uuid: "ward-1".to_string(),
        }
    }

    #[test]
    fn test_valid_bed_payload() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn test_bed_number_required() {
        let mut p = payload();
        p.bed_number = "  ".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_bed_number_length_capped() {
        let mut p = payload();
        p.bed_number = "BED-100-EXTRA".to_string();
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("at most 10"));
    }

    #[test]
    fn test_row_and_column_one_based() {
        let mut p = payload();
        p.row = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_bed_payload_wire_shape() {
        let value = serde_json::to_value(payload()).unwrap();
        assert_eq!(value["bedNumber"], "BED-100");
        assert_eq!(value["locationUuid"], "ward-1");
        assert_eq!(value["bedType"], "Standard");
    }
}
