//! In-process implementations of the gateway ports.
//!
//! Same ordering and not-found semantics as the Supabase adapters; used by
//! tests and offline demos.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use domain::{
    AuthRepository, AuthUser, DomainError, NewProperty, Property, PropertyFields,
    PropertyRepository, Session,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryPropertyRepository {
    rows: Mutex<Vec<Property>>,
    unavailable: AtomicBool,
    listing_unavailable: AtomicBool,
    inserts: AtomicUsize,
    updates: AtomicUsize,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(properties: Vec<Property>) -> Self {
        Self {
            rows: Mutex::new(properties),
            ..Self::default()
        }
    }

    /// Make every call fail with a network error until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Fail only `find_all`; writes keep working.
    pub fn set_listing_unavailable(&self, unavailable: bool) {
        self.listing_unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Vec<Property> {
        self.rows.lock().await.clone()
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::NetworkError("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn find_all(&self) -> Result<Vec<Property>, DomainError> {
        self.ensure_available()?;
        if self.listing_unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::NetworkError("read timed out".to_string()));
        }
        let mut rows = self.rows.lock().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, property: &NewProperty) -> Result<Property, DomainError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;

        let mut rows = self.rows.lock().await;
        // Strictly increasing timestamps keep newest-first ordering stable.
        let now = rows
            .iter()
            .map(|row| row.created_at + Duration::microseconds(1))
            .max()
            .map_or_else(Utc::now, |next| next.max(Utc::now()));

        let created = property.clone().into_property(Uuid::new_v4(), now);
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, fields: &PropertyFields) -> Result<Property, DomainError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.ensure_available()?;

        let mut rows = self.rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(DomainError::PropertyNotFound(id))?;
        row.apply(fields.clone());
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.ensure_available()?;

        let mut rows = self.rows.lock().await;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(DomainError::PropertyNotFound(id));
        }
        Ok(())
    }
}

/// Accounts keyed by email, plus at most one live session.
#[derive(Default)]
pub struct InMemoryAuthRepository {
    accounts: Mutex<HashMap<String, (String, AuthUser)>>,
    session: Mutex<Option<Session>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, email: &str, password: &str) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        };
        self.accounts
            .lock()
            .await
            .insert(email.to_string(), (password.to_string(), user.clone()));
        user
    }

    /// Start an already signed-in session for `user`.
    pub async fn start_session(&self, user: AuthUser) -> Session {
        let session = issue_session(user);
        *self.session.lock().await = Some(session.clone());
        session
    }
}

fn issue_session(user: AuthUser) -> Session {
    Session::new(
        Uuid::new_v4().to_string(),
        Uuid::new_v4().to_string(),
        Utc::now() + Duration::hours(1),
        user,
    )
}

#[async_trait]
impl AuthRepository for InMemoryAuthRepository {
    async fn get_session(&self) -> Result<Option<Session>, DomainError> {
        Ok(self
            .session
            .lock()
            .await
            .clone()
            .filter(|session| !session.is_expired()))
    }

    async fn get_current_user(&self) -> Result<AuthUser, DomainError> {
        self.get_session()
            .await?
            .map(|session| session.user)
            .ok_or(DomainError::NotAuthenticated)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let user = match self.accounts.lock().await.get(email) {
            Some((expected, user)) if expected == password => user.clone(),
            _ => {
                return Err(DomainError::Gateway {
                    status: 400,
                    message: "Invalid login credentials".to_string(),
                })
            }
        };
        Ok(self.start_session(user).await)
    }

    async fn sign_out(&self) -> Result<(), DomainError> {
        *self.session.lock().await = None;
        Ok(())
    }
}
