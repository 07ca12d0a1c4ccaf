// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the external login provider's session-data endpoint.
//!
//! After the provider's hosted login completes, the frontend receives an
//! opaque session id. Exchanging it yields the user's identity and the
//! bearer token that becomes our session credential.

use crate::error::AppError;
use serde::Deserialize;

/// Header carrying the session id on the exchange request.
const SESSION_ID_HEADER: &str = "X-Session-ID";

/// Identity returned by the login provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalSession {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    pub session_token: String,
}

/// Login provider client.
#[derive(Clone)]
pub struct LoginExchangeClient {
    http: reqwest::Client,
    url: String,
}

impl LoginExchangeClient {
    pub fn new(url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
        }
    }

    /// Exchange a login session id for the user's identity and token.
    pub async fn exchange(&self, session_id: &str) -> Result<ExternalSession, AppError> {
        let response = self
            .http
            .get(&self.url)
            .header(SESSION_ID_HEADER, session_id)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Session exchange request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Session exchange HTTP {}: {}",
                status, body
            )));
        }

        let session: ExternalSession = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Session exchange JSON parse error: {}", e)))?;

        if session.session_token.is_empty() || session.email.is_empty() {
            return Err(AppError::Upstream(
                "Session exchange returned an empty token or email".to_string(),
            ));
        }

        Ok(session)
    }
}
