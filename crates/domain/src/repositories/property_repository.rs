use crate::entities::{NewProperty, Property, PropertyFields};
use crate::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Listing persistence - the data half of the gateway contract
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// All listings, newest first by `created_at`.
    async fn find_all(&self) -> Result<Vec<Property>, DomainError>;
    async fn insert(&self, property: &NewProperty) -> Result<Property, DomainError>;
    /// Fails with `PropertyNotFound` when no row matches `id`.
    async fn update(&self, id: Uuid, fields: &PropertyFields) -> Result<Property, DomainError>;
    /// Fails with `PropertyNotFound` when no row matches `id`.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
