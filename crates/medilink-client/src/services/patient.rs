use async_trait::async_trait;

use medilink_common::models::patient::{Patient, PatientDraft, PatientUpdate};

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::services::PatientProfiles;

/// Client for the patient service.
pub struct PatientClient {
    gateway: Gateway,
    base_url: String,
}

impl PatientClient {
    pub fn new(gateway: Gateway, base_url: &str) -> Self {
        Self {
            gateway,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Lookup by email, the cross-service identity join. A 404 is a normal
    /// outcome (profile not created yet), not an error.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Patient>, ApiError> {
        let url = format!("{}/patients/search/email", self.base_url);
        match self
            .gateway
            .get_json_with_query(&url, &[("email", email)])
            .await
        {
            Ok(patient) => Ok(Some(patient)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    #[tracing::instrument(skip(self, draft), fields(email = %draft.email))]
    pub async fn create(&self, draft: &PatientDraft) -> Result<Patient, ApiError> {
        let url = format!("{}/patients", self.base_url);
        self.gateway.post_json(&url, draft).await
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update(&self, id: &str, update: &PatientUpdate) -> Result<Patient, ApiError> {
        let url = format!("{}/patients/{}", self.base_url, id);
        self.gateway.put_json(&url, update).await
    }
}

#[async_trait]
impl PatientProfiles for PatientClient {
    async fn find_by_email(&self, email: &str) -> Result<Option<Patient>, ApiError> {
        PatientClient::find_by_email(self, email).await
    }

    async fn create(&self, draft: &PatientDraft) -> Result<Patient, ApiError> {
        PatientClient::create(self, draft).await
    }
}
