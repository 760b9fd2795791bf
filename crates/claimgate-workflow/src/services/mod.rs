//! Business logic services for the workflow domain.

pub mod approval;
pub mod compliance;
pub mod document;

pub use approval::{
    ApprovalRequest, ApprovalRequestFilter, ApprovalRequestStore, ApprovalRequestView,
    ApprovalWorkflowService, CreateApprovalRequestInput, InMemoryApprovalRequestStore,
};
pub use compliance::{
    CheckType, ComplianceCheck, ComplianceCheckFilter, ComplianceCheckStore, ComplianceCheckView,
    ComplianceMonitorService, FcaEvent, FcaEventFilter, FcaEventStore, FcaEventView,
    InMemoryComplianceCheckStore, InMemoryFcaEventStore, RecordCheckInput, RecordFcaEventInput,
    UpdateCheckInput, UpdateFcaEventInput, DEFAULT_WARNING_WINDOW_DAYS,
};
pub use document::{
    required_approval_level, DocumentActor, DocumentApproval, DocumentApprovalService,
    DocumentApprovalStore, InMemoryDocumentApprovalStore, SubmitDocumentInput,
};
