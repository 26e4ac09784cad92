use async_trait::async_trait;

use medilink_common::models::doctor::Doctor;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::services::DoctorDirectory;

/// Client for the doctor directory service.
pub struct DoctorClient {
    gateway: Gateway,
    base_url: String,
}

impl DoctorClient {
    pub fn new(gateway: Gateway, base_url: &str) -> Self {
        Self {
            gateway,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Doctor>, ApiError> {
        let url = format!("{}/api/v1/doctors", self.base_url);
        self.gateway.get_json(&url).await
    }
}

#[async_trait]
impl DoctorDirectory for DoctorClient {
    async fn list_all(&self) -> Result<Vec<Doctor>, ApiError> {
        DoctorClient::list_all(self).await
    }
}
