//! Identity re-validation client.

#![allow(async_fn_in_trait)]

use serde::Deserialize;

use crate::user::SessionUser;

/// Errors from the identity endpoint that are NOT a rejection of the token.
/// A rejected token is `Ok(None)` from [`IdentityClient::fetch_me`], so
/// callers can distinguish "the server said no" from "the server was
/// unreachable".
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("network error")]
    Transport(#[source] anyhow::Error),
    #[error("malformed identity response")]
    Malformed,
}

/// Port for fetching the canonical user behind a session token.
pub trait IdentityClient {
    /// `Ok(Some)` — token accepted, fresh user returned.
    /// `Ok(None)` — token rejected (401, `success:false`, or no user).
    async fn fetch_me(&self, token: &str) -> Result<Option<SessionUser>, SessionError>;
}

#[derive(Debug, Deserialize)]
struct MeEnvelope {
    success: bool,
    data: Option<MeData>,
}

#[derive(Debug, Deserialize)]
struct MeData {
    user: Option<SessionUser>,
}

/// HTTP adapter for [`IdentityClient`], calling `GET /api/auth/me`.
#[derive(Debug, Clone)]
pub struct HttpIdentityClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpIdentityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

impl IdentityClient for HttpIdentityClient {
    async fn fetch_me(&self, token: &str) -> Result<Option<SessionUser>, SessionError> {
        let url = format!("{}/api/auth/me", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SessionError::Transport(e.into()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SessionError::Transport(anyhow::anyhow!(
                "identity endpoint returned {status}"
            )));
        }

        let envelope: MeEnvelope = response
            .json()
            .await
            .map_err(|_| SessionError::Malformed)?;

        if !envelope.success {
            return Ok(None);
        }
        Ok(envelope.data.and_then(|d| d.user))
    }
}
