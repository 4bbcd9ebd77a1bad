//! SOUK Session Management
//!
//! The one component in this client with a real contract:
//! - A session is a bearer token plus the authenticated user, set and
//!   cleared together.
//! - Sessions persist across process restarts and are restored without
//!   a network round trip.
//! - Logout notifies the remote best-effort; local state is always
//!   cleared.
//! - A corrupt or partial persisted record is discarded silently and
//!   the state resolves to anonymous.

mod credentials;
mod error;
mod manager;
mod session;

pub use credentials::{Credentials, Registration};
pub use error::SessionError;
pub use manager::SessionManager;
pub use session::{Session, User};

pub type Result<T> = std::result::Result<T, SessionError>;
