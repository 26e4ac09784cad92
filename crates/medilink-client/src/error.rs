use thiserror::Error;

/// Failure of the durable session storage. Fatal to the auth flow: a login
/// cannot complete without somewhere to keep the credential.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage unavailable: {0}")]
    Persistence(#[from] std::io::Error),
    #[error("failed to encode session profile: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Per-call failure from the authenticated gateway. Propagated unchanged by
/// the service clients; callers decide whether a source degrades or the
/// operation fails.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} rejected the credential")]
    Unauthorized { url: String },
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// HTTP status of the failure, when one was received at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Failure of the credential exchange. Surfaced to the user with a retry
/// affordance, never silently retried.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("authentication service unreachable: {0}")]
    ServerUnreachable(#[source] reqwest::Error),
    /// The service answered 2xx but issued no token. Token presence is the
    /// actual success signal, not HTTP status alone.
    #[error("authentication succeeded but no token was issued")]
    MissingToken,
    #[error("could not parse authentication response: {0}")]
    Malformed(#[source] reqwest::Error),
    #[error("authentication rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Outcome of matching an authenticated account to its patient profile.
/// `ProfileNotFound` is recoverable (the profile may simply not exist yet);
/// `Lookup` means the join itself could not be attempted.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("no patient profile exists for {email}")]
    ProfileNotFound { email: String },
    #[error("patient profile lookup failed: {0}")]
    Lookup(#[source] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_helpers() {
        let not_found = ApiError::Status {
            url: "http://localhost:4000/patients/search/email".to_string(),
            status: 404,
            body: "Patient not found".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_unauthorized());

        let unauthorized = ApiError::Unauthorized {
            url: "http://localhost:4001/api/v1/doctors".to_string(),
        };
        assert_eq!(unauthorized.status(), Some(401));
        assert!(unauthorized.is_unauthorized());
    }

    #[test]
    fn test_reconcile_error_display() {
        let err = ReconcileError::ProfileNotFound {
            email: "jdoe@example.com".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no patient profile exists for jdoe@example.com"
        );
    }
}
