use async_trait::async_trait;

use medilink_common::models::auth::{LoginRequest, RegisterRequest, Session};

use crate::error::AuthError;
use crate::services::CredentialExchange;

/// Client for the authentication service. Login and register are the only
/// unauthenticated endpoints in the platform, so this client talks to the
/// transport directly rather than through the gateway.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let url = format!("{}/auth/login", self.base_url);
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(AuthError::ServerUnreachable)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read body".to_string());
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let session: Session = response.json().await.map_err(AuthError::Malformed)?;
        ensure_token(session)
    }

    #[tracing::instrument(skip(self, draft), fields(username = %draft.username))]
    pub async fn register(&self, draft: &RegisterRequest) -> Result<Session, AuthError> {
        let url = format!("{}/auth/register", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(AuthError::ServerUnreachable)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read body".to_string());
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let session: Session = response.json().await.map_err(AuthError::Malformed)?;
        ensure_token(session)
    }
}

#[async_trait]
impl CredentialExchange for AuthClient {
    async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        AuthClient::login(self, username, password).await
    }

    async fn register(&self, draft: &RegisterRequest) -> Result<Session, AuthError> {
        AuthClient::register(self, draft).await
    }
}

/// Token presence is the success signal. A 2xx body without a token is a
/// failed exchange.
fn ensure_token(session: Session) -> Result<Session, AuthError> {
    if session.token.trim().is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medilink_common::models::auth::Role;

    fn session_with_token(token: &str) -> Session {
        Session {
            account_id: None,
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            role: Role::Patient,
            first_name: None,
            last_name: None,
            token: token.to_string(),
        }
    }

    #[test]
    fn test_ensure_token_accepts_present_token() {
        let session = ensure_token(session_with_token("token-abc")).unwrap();
        assert_eq!(session.token, "token-abc");
    }

    #[test]
    fn test_ensure_token_rejects_empty_token() {
        assert!(matches!(
            ensure_token(session_with_token("")),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            ensure_token(session_with_token("   ")),
            Err(AuthError::MissingToken)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_auth_service() {
        let client = AuthClient::new("http://127.0.0.1:1");
        let err = client.login("jdoe", "hunter2").await.unwrap_err();
        assert!(matches!(err, AuthError::ServerUnreachable(_)));
    }
}
