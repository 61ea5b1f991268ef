//! Authentication module
//!
//! A single local session stands in for real accounts; routes other than
//! health and auth require it.

mod middleware;

pub use middleware::{require_session, AuthUser};
