use async_trait::async_trait;

use medilink_common::models::appointment::Appointment;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::services::AppointmentBook;

/// Client for the appointment service. "Upcoming" filtering is the
/// service's own; the client never derives appointment status.
pub struct AppointmentClient {
    gateway: Gateway,
    base_url: String,
}

impl AppointmentClient {
    pub fn new(gateway: Gateway, base_url: &str) -> Self {
        Self {
            gateway,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn upcoming_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, ApiError> {
        let url = format!(
            "{}/api/appointments/patient/{}/upcoming",
            self.base_url, patient_id
        );
        self.gateway.get_json(&url).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn all_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, ApiError> {
        let url = format!("{}/api/appointments/patient/{}", self.base_url, patient_id);
        self.gateway.get_json(&url).await
    }
}

#[async_trait]
impl AppointmentBook for AppointmentClient {
    async fn upcoming_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, ApiError> {
        AppointmentClient::upcoming_for_patient(self, patient_id).await
    }
}
