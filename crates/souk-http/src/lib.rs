//! SOUK HTTP Transport
//!
//! Thin request/response layer over the remote marketplace API.
//! Holds the shared bearer slot: every outgoing request carries
//! `Authorization: Bearer <token>` iff a token is present. The session
//! manager is the only writer of that slot; absence of a token means
//! the request goes out unauthenticated and the remote side decides.

mod client;
mod error;

pub use client::HttpClient;
pub use error::HttpError;

pub type Result<T> = std::result::Result<T, HttpError>;
