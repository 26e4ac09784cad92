use async_trait::async_trait;

use medilink_common::models::appointment::Appointment;
use medilink_common::models::auth::{RegisterRequest, Session};
use medilink_common::models::doctor::Doctor;
use medilink_common::models::patient::{Patient, PatientDraft};

use crate::error::{ApiError, AuthError};

pub mod appointment;
pub mod auth;
pub mod doctor;
pub mod medical_record;
pub mod patient;

pub use appointment::AppointmentClient;
pub use auth::AuthClient;
pub use doctor::DoctorClient;
pub use medical_record::MedicalRecordClient;
pub use patient::PatientClient;

/// Credential exchange against the auth service.
#[async_trait]
pub trait CredentialExchange: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError>;
    async fn register(&self, draft: &RegisterRequest) -> Result<Session, AuthError>;
}

/// Patient profile lookup and creation. The lookup is the cross-service
/// identity join: it correlates by email and may legitimately find nothing.
#[async_trait]
pub trait PatientProfiles: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Patient>, ApiError>;
    async fn create(&self, draft: &PatientDraft) -> Result<Patient, ApiError>;
}

#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Doctor>, ApiError>;
}

#[async_trait]
pub trait AppointmentBook: Send + Sync {
    async fn upcoming_for_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, ApiError>;
}
