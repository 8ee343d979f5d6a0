pub mod profile;
pub mod property;
pub mod session;

pub use profile::*;
pub use property::*;
pub use session::*;
