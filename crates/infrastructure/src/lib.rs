pub mod repositories;
pub mod session_store;
pub mod supabase;

pub use repositories::*;
pub use session_store::SessionStore;
pub use supabase::SupabaseClient;
