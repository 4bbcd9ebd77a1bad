//! Session data structures

use serde::{Deserialize, Serialize};

/// The authenticated account. Every field is required: a server
/// response missing any of them is rejected rather than propagated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// The authenticated identity held by the running client.
///
/// Token and user exist together or not at all; the manager persists
/// them in a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Wire shape of `/auth/login` and `/auth/register` responses.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self {
            token: resp.access_token,
            user: resp.user,
        }
    }
}
