//! Navigation for the EduSpace client.
//!
//! This module provides:
//! - `Destination`: the app's navigable pages with their static access policy
//! - `check_navigation`: the pure guard deciding allow vs. redirect
//! - `Navigator`: current-destination tracking plus the pending login
//!   redirect the request pipeline queues on authentication failure

pub mod destination;
pub mod guard;

pub use destination::{Destination, RouteAccess};
pub use guard::{check_navigation, Decision, Navigator};
