pub mod error;

pub use error::ResponseExt;

use crate::session_store::SessionStore;
use domain::DomainError;
use reqwest::header::{HeaderMap, HeaderValue};
use std::sync::Arc;

pub const API_KEY_HEADER: &str = "apikey";

/// Shared HTTP plumbing for the PostgREST and GoTrue endpoints of one project.
#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    http: reqwest::Client,
    sessions: Arc<SessionStore>,
}

impl SupabaseClient {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        sessions: Arc<SessionStore>,
    ) -> Result<Self, DomainError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let anon_key = anon_key.into();

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&anon_key)
            .map_err(|e| DomainError::ValidationError(format!("Invalid API key: {}", e)))?;
        headers.insert(API_KEY_HEADER, key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| DomainError::NetworkError(e.to_string()))?;

        Ok(Self {
            base_url,
            anon_key,
            http,
            sessions,
        })
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, endpoint)
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// The signed-in agent's access token, or the anon key when signed out.
    pub async fn bearer_token(&self) -> Result<String, DomainError> {
        Ok(match self.sessions.load().await? {
            Some(session) if !session.is_expired() => session.access_token,
            _ => self.anon_key.clone(),
        })
    }
}
