use medilink_common::models::medical_record::MedicalRecord;

use crate::error::ApiError;
use crate::gateway::Gateway;

/// Client for medical records, which the patient service hosts.
pub struct MedicalRecordClient {
    gateway: Gateway,
    base_url: String,
}

impl MedicalRecordClient {
    /// `base_url` is the patient service address; medical records share its
    /// origin.
    pub fn new(gateway: Gateway, base_url: &str) -> Self {
        Self {
            gateway,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn for_patient(&self, patient_id: &str) -> Result<Vec<MedicalRecord>, ApiError> {
        let url = format!("{}/medical-records/patient/{}", self.base_url, patient_id);
        self.gateway.get_json(&url).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn count_for_patient(&self, patient_id: &str) -> Result<u64, ApiError> {
        let url = format!(
            "{}/medical-records/patient/{}/count",
            self.base_url, patient_id
        );
        self.gateway.get_json(&url).await
    }
}
