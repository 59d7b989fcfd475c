//! Core client library for EduSpace, a classroom and shared-space
//! management platform.
//!
//! Three pieces compose around a shared session:
//!
//! - [`auth::SessionStore`]: the two-step (credentials, then one-time code)
//!   sign-in state machine, persisted to disk and restored at startup
//! - [`api::ApiClient`]: the request pipeline that injects the bearer token
//!   into every call and classifies every error response, tearing the
//!   session down on authentication failure
//! - [`routing`]: per-destination access policy, the pure navigation guard,
//!   and the [`routing::Navigator`] handle
//!
//! The store drives the client for sign-in, and the client reads the
//! store's token; the cycle is broken by the [`api::SessionAccess`]
//! indirection supplied at client construction.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod routing;

pub use api::{ApiClient, ApiError, SessionAccess, SignUpResponse, VerifyCodeResponse};
pub use auth::{Identity, Role, SessionSnapshot, SessionStorage, SessionStore};
pub use config::Config;
pub use routing::{check_navigation, Decision, Destination, Navigator, RouteAccess};
