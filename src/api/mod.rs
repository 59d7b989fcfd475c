//! REST API client module for the EduSpace backend.
//!
//! This module provides the `ApiClient` for communicating with the EduSpace
//! API: the two-step sign-in handshake plus the classroom, reservation,
//! meeting and breakdown-report resources.
//!
//! The API uses bearer token authentication; the token is read from the
//! session through the [`SessionAccess`] indirection on every request.

pub mod client;
pub mod error;

pub use client::{ApiClient, SignUpResponse, VerifyCodeResponse};
pub use error::ApiError;

/// The slice of the session the request pipeline needs.
///
/// Supplied at construction instead of a direct reference to the session
/// store, so the store can drive the client without the two depending on
/// each other statically.
pub trait SessionAccess: Send + Sync {
    /// Current bearer token. Read fresh for every outgoing request.
    fn token(&self) -> Option<String>;

    /// Tear the session down after an authentication failure. Must not fail.
    fn force_sign_out(&self);
}
