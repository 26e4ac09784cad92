use std::sync::Arc;

use futures_util::FutureExt;

use medilink_common::models::appointment::Appointment;
use medilink_common::models::auth::Session;
use medilink_common::models::doctor::Doctor;
use medilink_common::models::patient::Patient;

use crate::services::{AppointmentBook, DoctorDirectory, PatientProfiles};

/// Per-source fetch state. Any subset of sources may be stale or missing
/// without invalidating the rest.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceState<T> {
    Loading,
    Loaded(T),
    Failed,
}

impl<T> SourceState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, SourceState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            SourceState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Ephemeral view model, recomputed each visit; never persisted.
/// `Loaded(None)` for the patient source means the profile simply does not
/// exist yet, which is a placeholder state rather than a failure.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub patient: SourceState<Option<Patient>>,
    pub doctors: SourceState<Vec<Doctor>>,
    pub appointments: SourceState<Vec<Appointment>>,
}

impl Dashboard {
    /// Initial state before any fetch has resolved.
    pub fn loading() -> Self {
        Self {
            patient: SourceState::Loading,
            doctors: SourceState::Loading,
            appointments: SourceState::Loading,
        }
    }

    /// False only once every source has resolved, successfully or not.
    pub fn is_loading(&self) -> bool {
        self.patient.is_loading() || self.doctors.is_loading() || self.appointments.is_loading()
    }

    /// One line per card for the presentation layer.
    pub fn summary(&self) -> Vec<String> {
        let appointments = match &self.appointments {
            SourceState::Loading => "Loading appointments...".to_string(),
            SourceState::Loaded(list) => format!("{} upcoming appointment(s)", list.len()),
            SourceState::Failed => "Appointments unavailable".to_string(),
        };
        let doctors = match &self.doctors {
            SourceState::Loading => "Loading doctors...".to_string(),
            SourceState::Loaded(list) => format!("{} doctor(s) available", list.len()),
            SourceState::Failed => "Doctor directory unavailable".to_string(),
        };
        let patient = match &self.patient {
            SourceState::Loading => "Loading profile...".to_string(),
            SourceState::Loaded(Some(p)) => format!("Profile: {}", p.name),
            SourceState::Loaded(None) => "Profile not set up yet".to_string(),
            SourceState::Failed => "Profile unavailable".to_string(),
        };
        vec![appointments, doctors, patient]
    }
}

/// Orchestrates the concurrent fetches behind the patient dashboard. Each
/// failure is caught at its own call site and degrades that source alone;
/// the aggregation itself never errors.
pub struct DashboardAggregator {
    patients: Arc<dyn PatientProfiles>,
    doctors: Arc<dyn DoctorDirectory>,
    appointments: Arc<dyn AppointmentBook>,
}

impl DashboardAggregator {
    pub fn new(
        patients: Arc<dyn PatientProfiles>,
        doctors: Arc<dyn DoctorDirectory>,
        appointments: Arc<dyn AppointmentBook>,
    ) -> Self {
        Self {
            patients,
            doctors,
            appointments,
        }
    }

    #[tracing::instrument(skip(self, session), fields(email = %session.email))]
    pub async fn load(&self, session: &Session) -> Dashboard {
        let email = session.email.clone();
        let patients = Arc::clone(&self.patients);

        // The appointment fetch needs the patient id from the profile
        // lookup, so that lookup is shared between the two branches rather
        // than issued twice. The doctor fetch is fully independent.
        let patient_fut = async move {
            match patients.find_by_email(&email).await {
                Ok(found) => SourceState::Loaded(found),
                Err(err) => {
                    tracing::warn!("Patient lookup failed: {}", err);
                    SourceState::Failed
                }
            }
        }
        .boxed()
        .shared();

        let doctors_fut = async {
            match self.doctors.list_all().await {
                Ok(list) => SourceState::Loaded(list),
                Err(err) => {
                    tracing::warn!("Doctor fetch failed: {}", err);
                    SourceState::Failed
                }
            }
        };

        let appointments_fut = {
            let patient_fut = patient_fut.clone();
            async move {
                match patient_fut.await {
                    SourceState::Loaded(Some(patient)) => {
                        match self.appointments.upcoming_for_patient(&patient.id).await {
                            Ok(list) => SourceState::Loaded(list),
                            Err(err) => {
                                tracing::warn!("Appointment fetch failed: {}", err);
                                SourceState::Failed
                            }
                        }
                    }
                    // No profile yet: nothing is booked against it.
                    SourceState::Loaded(None) => SourceState::Loaded(Vec::new()),
                    _ => SourceState::Failed,
                }
            }
        };

        let (patient, doctors, appointments) =
            tokio::join!(patient_fut, doctors_fut, appointments_fut);

        Dashboard {
            patient,
            doctors,
            appointments,
        }
    }
}
