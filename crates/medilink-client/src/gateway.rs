use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::session::SessionStore;

/// Attaches the current credential to every outbound call.
///
/// Headers are built fresh per call from the current token snapshot, so two
/// concurrent requests never share mutable header state. With no token
/// present the request goes out unauthenticated and the backend decides.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    session: Arc<SessionStore>,
}

impl Gateway {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            session,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let req = self.authorize(self.http.get(url));
        self.execute(url, req).await
    }

    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let req = self.authorize(self.http.get(url).query(query));
        self.execute(url, req).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authorize(self.http.post(url).json(body));
        self.execute(url, req).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authorize(self.http.put(url).json(body));
        self.execute(url, req).await
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        url: &str,
        req: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = req.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // The backend reported the credential invalid; the persisted
            // session is dead weight from here on.
            tracing::warn!("Credential rejected by {}, clearing session", url);
            self.session.clear();
            return Err(ApiError::Unauthorized {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read body".to_string());
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
