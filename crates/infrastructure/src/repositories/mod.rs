pub mod memory;
pub mod supabase_auth_repository;
pub mod supabase_property_repository;

pub use memory::{InMemoryAuthRepository, InMemoryPropertyRepository};
pub use supabase_auth_repository::SupabaseAuthRepository;
pub use supabase_property_repository::SupabasePropertyRepository;
