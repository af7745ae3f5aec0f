//! IssueForge Relay
//!
//! Thin HTTP surface over the request planner and the JIRA client: one
//! create endpoint plus read-only search and lookup passthroughs.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
