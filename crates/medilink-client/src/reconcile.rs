use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use medilink_common::models::auth::Session;
use medilink_common::models::patient::{Patient, PatientDraft};

use crate::error::ReconcileError;
use crate::services::PatientProfiles;

/// Resolves the logged-in account to its patient profile. The auth service
/// and the patient service do not share primary keys; email is the only
/// correlation between them, and the join may legitimately find nothing.
pub struct IdentityReconciler {
    patients: Arc<dyn PatientProfiles>,
}

impl IdentityReconciler {
    pub fn new(patients: Arc<dyn PatientProfiles>) -> Self {
        Self { patients }
    }

    #[tracing::instrument(skip(self, session), fields(email = %session.email))]
    pub async fn resolve(&self, session: &Session) -> Result<Patient, ReconcileError> {
        match self.patients.find_by_email(&session.email).await {
            Ok(Some(patient)) => Ok(patient),
            Ok(None) => Err(ReconcileError::ProfileNotFound {
                email: session.email.clone(),
            }),
            Err(err) => Err(ReconcileError::Lookup(err)),
        }
    }

    /// Best-effort profile creation after a PATIENT registration.
    /// At-most-once: the task runs detached, a failure is logged and never
    /// retried, and the caller's result does not depend on the outcome.
    /// The handle is returned for observability only.
    pub fn spawn_profile_creation(&self, session: &Session) -> tokio::task::JoinHandle<()> {
        let patients = Arc::clone(&self.patients);
        let draft = draft_from_session(session);
        let email = session.email.clone();
        tokio::spawn(async move {
            match patients.create(&draft).await {
                Ok(patient) => {
                    tracing::info!("Created patient profile {} for {}", patient.id, email)
                }
                Err(err) => {
                    tracing::warn!("Failed to create patient profile for {}: {}", email, err)
                }
            }
        })
    }
}

/// The registration form collects no address or birth date; the profile
/// starts with placeholders the patient edits later.
fn draft_from_session(session: &Session) -> PatientDraft {
    PatientDraft {
        name: session.display_name(),
        email: session.email.clone(),
        address: "Not provided".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
        registered_date: Utc::now().date_naive(),
    }
}
