pub mod auth_repository;
pub mod property_repository;

pub use auth_repository::AuthRepository;
pub use property_repository::PropertyRepository;
