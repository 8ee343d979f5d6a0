use crate::entities::{AuthUser, Session};
use crate::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// The live session, if any. Expired sessions count as absent.
    async fn get_session(&self) -> Result<Option<Session>, DomainError>;
    /// Fails with `NotAuthenticated` when nobody is signed in.
    async fn get_current_user(&self) -> Result<AuthUser, DomainError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, DomainError>;
    async fn sign_out(&self) -> Result<(), DomainError>;
}
