use crate::supabase::error::decode_error;
use crate::supabase::{ResponseExt, SupabaseClient};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain::{AuthRepository, AuthUser, DomainError, Session};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// GoTrue token grant response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)))
            .unwrap_or_else(|| now + Duration::hours(1));

        Session::new(self.access_token, self.refresh_token, expires_at, self.user)
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

pub struct SupabaseAuthRepository {
    client: SupabaseClient,
}

impl SupabaseAuthRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn grant<B: Serialize + Sync>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> Result<Session, DomainError> {
        debug!("POST token grant_type={}", grant_type);
        let token = self
            .client
            .http()
            .post(self.client.auth_url("token"))
            .query(&[("grant_type", grant_type)])
            .json(body)
            .send()
            .await
            .check()
            .await?
            .json::<TokenResponse>()
            .await
            .map_err(decode_error)?;

        let session = token.into_session(Utc::now());
        self.client.sessions().save(&session).await?;
        Ok(session)
    }

    async fn refresh(&self, session: &Session) -> Result<Session, DomainError> {
        self.grant(
            "refresh_token",
            &RefreshGrant {
                refresh_token: &session.refresh_token,
            },
        )
        .await
    }
}

#[async_trait]
impl AuthRepository for SupabaseAuthRepository {
    async fn get_session(&self) -> Result<Option<Session>, DomainError> {
        let Some(session) = self.client.sessions().load().await? else {
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session));
        }

        debug!("Stored session expired, refreshing");
        match self.refresh(&session).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(e) => {
                warn!("Session refresh failed, signing out locally: {}", e);
                self.client.sessions().clear().await?;
                Ok(None)
            }
        }
    }

    async fn get_current_user(&self) -> Result<AuthUser, DomainError> {
        let session = self
            .get_session()
            .await?
            .ok_or(DomainError::NotAuthenticated)?;

        let response = self
            .client
            .http()
            .get(self.client.auth_url("user"))
            .bearer_auth(&session.access_token)
            .send()
            .await
            .check()
            .await;

        match response {
            Ok(response) => response.json::<AuthUser>().await.map_err(decode_error),
            Err(DomainError::Gateway {
                status: 401 | 403, ..
            }) => Err(DomainError::NotAuthenticated),
            Err(e) => Err(e),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let session = self
            .grant("password", &PasswordGrant { email, password })
            .await?;
        info!(user = %session.user.id, "Signed in");
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), DomainError> {
        if let Some(session) = self.client.sessions().load().await? {
            let result = self
                .client
                .http()
                .post(self.client.auth_url("logout"))
                .bearer_auth(&session.access_token)
                .send()
                .await
                .check()
                .await;
            if let Err(e) = result {
                warn!("Remote sign out failed, clearing local session anyway: {}", e);
            }
        }

        self.client.sessions().clear().await?;
        info!("Signed out");
        Ok(())
    }
}
