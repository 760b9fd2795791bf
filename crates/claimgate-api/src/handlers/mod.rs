//! HTTP handlers for the workflow API.

pub mod approvals;
pub mod compliance;
pub mod documents;
