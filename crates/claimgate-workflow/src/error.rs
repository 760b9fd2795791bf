//! Error types for the workflow engine.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::types::{
    CheckId, DocumentApprovalStatus, DocumentId, FcaEventId, RequestId, RequestStatus,
};

/// Errors returned by the workflow engine and compliance monitor.
///
/// Every variant carries the specific reason so callers can surface it
/// verbatim; nothing is swallowed inside the engine.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Malformed or missing required input; recoverable by correcting it.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Approval request not found.
    #[error("Approval request not found: {0}")]
    RequestNotFound(RequestId),

    /// Document approval record not found.
    #[error("Document approval not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Compliance check not found.
    #[error("Compliance check not found: {0}")]
    CheckNotFound(CheckId),

    /// Regulatory event not found.
    #[error("Regulatory event not found: {0}")]
    FcaEventNotFound(FcaEventId),

    /// Actor is not permitted to perform this transition.
    #[error("Actor {actor_id} is not authorized: {reason}")]
    Unauthorized {
        /// The actor attempting the transition.
        actor_id: Uuid,
        /// Why the actor is not permitted.
        reason: String,
    },

    /// Transition attempted from a state that forbids it.
    #[error("Invalid state for this action: request is {status}")]
    InvalidState {
        /// The status the record was in when the transition was attempted.
        status: RequestStatus,
    },

    /// Decision attempted on a document that is no longer pending.
    #[error("Invalid state for this action: document is {status}")]
    DocumentInvalidState {
        /// The gate status the document was in when the decision was attempted.
        status: DocumentApprovalStatus,
    },

    /// The request passed its deadline before the mutating call landed.
    #[error("Request expired at {expired_at}")]
    Expired {
        /// The fixed deadline that has passed.
        expired_at: DateTime<Utc>,
    },

    /// Optimistic-concurrency version mismatch; the caller should retry.
    #[error("Concurrent modification of request {0}, retry the operation")]
    Conflict(RequestId),

    /// Fault in the underlying record store; propagated, never masked.
    #[error("Store error: {0}")]
    Store(String),
}

impl WorkflowError {
    /// Whether this error means a referenced record is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RequestNotFound(_)
                | Self::DocumentNotFound(_)
                | Self::CheckNotFound(_)
                | Self::FcaEventNotFound(_)
        )
    }

    /// Whether this error is a concurrent-modification conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Whether this error is an authorization failure.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Whether this error is caller-correctable input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias for workflow operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;
