//! Campus core types and session primitives

pub mod error;
pub mod events;
pub mod session;
pub mod types;

pub use error::SessionError;
pub use events::{SessionEvent, SessionEvents};
pub use session::{MemorySessionStore, SessionStore};
pub use types::{UserProfile, UserRole, UserStatus};
