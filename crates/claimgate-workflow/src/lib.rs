//! Approval and compliance workflow engine for the claimgate dashboard.
//!
//! This crate owns the one genuinely stateful part of the dashboard: the
//! lifecycle of approval requests, the per-document approval gate, and the
//! compliance monitor that derives temporal risk flags at read time.
//!
//! # Design
//!
//! - Approval requests follow an explicit state machine
//!   (`pending -> approved | rejected | expired`, escalation as a
//!   side-channel flag) enforced centrally in
//!   [`services::ApprovalWorkflowService`].
//! - Expiry is lazy: no background timer flips status; every read and
//!   mutation checks the deadline against the injected [`clock::Clock`].
//! - Persistence is a pluggable trait per record family; in-memory
//!   implementations ship for tests and local runs, and any adapter with a
//!   version-checked update satisfies the approval store contract.
//! - Lifecycle events are published best-effort through
//!   [`events::EventSink`]; publish failures never roll back a transition.

pub mod clock;
pub mod error;
pub mod events;
pub mod services;
pub mod time_policy;
pub mod types;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, WorkflowError};
pub use events::{EventSink, InMemoryEventSink, LifecycleEvent, LogEventSink};
pub use services::{
    required_approval_level, ApprovalRequest, ApprovalRequestFilter, ApprovalRequestStore,
    ApprovalRequestView, ApprovalWorkflowService, CheckType, ComplianceCheck,
    ComplianceCheckFilter, ComplianceCheckStore, ComplianceCheckView, ComplianceMonitorService,
    CreateApprovalRequestInput, DocumentActor, DocumentApproval, DocumentApprovalService,
    DocumentApprovalStore, FcaEvent, FcaEventFilter, FcaEventStore, FcaEventView,
    InMemoryApprovalRequestStore, InMemoryComplianceCheckStore, InMemoryDocumentApprovalStore,
    InMemoryFcaEventStore, RecordCheckInput, RecordFcaEventInput, SubmitDocumentInput,
    UpdateCheckInput, UpdateFcaEventInput,
};
pub use types::{
    AuthorityLevel, CheckId, ComplianceStatus, DocumentApprovalStatus, DocumentId, FcaEventId,
    FcaSeverity, FcaStatus, RequestId, RequestStatus, RiskRating, Urgency, VisibilityLevel,
};
