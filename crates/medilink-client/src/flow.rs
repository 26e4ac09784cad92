use std::sync::Arc;

use medilink_common::models::auth::{RegisterRequest, Role, Session};

use crate::error::AuthError;
use crate::reconcile::IdentityReconciler;
use crate::services::{CredentialExchange, PatientProfiles};
use crate::session::SessionStore;

/// Result of a registration: the established session, plus the handle of
/// the detached profile-creation task for new PATIENT accounts. The flow
/// never awaits the handle; it exists for observability and tests.
pub struct Registration {
    pub session: Session,
    pub profile_task: Option<tokio::task::JoinHandle<()>>,
}

/// Orchestrates the credential exchange against the session store. A failed
/// exchange leaves the store untouched; a successful one persists the
/// session before anything else observes it.
pub struct AuthFlow {
    auth: Arc<dyn CredentialExchange>,
    session: Arc<SessionStore>,
    reconciler: IdentityReconciler,
}

impl AuthFlow {
    pub fn new(
        auth: Arc<dyn CredentialExchange>,
        session: Arc<SessionStore>,
        patients: Arc<dyn PatientProfiles>,
    ) -> Self {
        Self {
            auth,
            session,
            reconciler: IdentityReconciler::new(patients),
        }
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.auth.login(username, password).await?;
        self.session.establish(&session)?;
        tracing::info!("Established session for {} ({})", session.username, session.role.as_str());
        Ok(session)
    }

    /// Register, establish the session, then fire-and-forget the patient
    /// profile creation for PATIENT-role accounts. Profile creation failure
    /// never rolls back the registration.
    #[tracing::instrument(skip(self, draft), fields(username = %draft.username))]
    pub async fn register(&self, draft: RegisterRequest) -> Result<Registration, AuthError> {
        let session = self.auth.register(&draft).await?;
        self.session.establish(&session)?;

        let profile_task = (session.role == Role::Patient)
            .then(|| self.reconciler.spawn_profile_creation(&session));

        Ok(Registration {
            session,
            profile_task,
        })
    }

    pub fn logout(&self) {
        self.session.clear();
    }
}
