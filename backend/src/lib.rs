//! Waitline library modules.
//!
//! A first-come-first-served waiting line for registered users: a user
//! directory and an ordered line, persisted as JSON collection files and
//! served over a small HTTP API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use doc::ApiDoc;
pub use middleware::Trace;
