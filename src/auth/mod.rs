//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionStore`: the two-step sign-in state machine and role accessors
//! - `SessionStorage`: durable token + identity persistence
//!
//! Sessions are persisted to disk and restored at startup.

pub mod session;
pub mod storage;

pub use session::{Identity, Role, SessionSnapshot, SessionStore};
pub use storage::SessionStorage;
