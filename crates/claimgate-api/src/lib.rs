//! REST API for the approval and compliance workflow engine.
//!
//! Exposes the three engine services over HTTP:
//!
//! - `POST/GET /workflow/requests` and the decision sub-routes
//!   (`approve`, `reject`, `escalate`) for the approval request lifecycle
//! - `GET /workflow/my-approvals` for an approver's pending queue
//! - `/workflow/documents/{id}` sub-routes for the document approval gate
//! - `/compliance/checks` and `/compliance/fca-events` for the compliance
//!   monitor and regulatory event log
//!
//! Identity sits upstream: handlers read the authenticated actor from the
//! `x-actor-id` and `x-actor-authority` headers injected by the gateway.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod router;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use extract::{Actor, ACTOR_AUTHORITY_HEADER, ACTOR_ID_HEADER};
pub use router::{workflow_router, WorkflowState};
