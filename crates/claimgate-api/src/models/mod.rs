//! Request and response models for the workflow API.

mod approval;
mod compliance;
mod document;

pub use approval::{
    ApprovalRequestListResponse, ApprovalRequestResponse, ApproveRequestRequest,
    CreateRequestRequest, EscalateRequestRequest, ListRequestsQuery, RejectRequestRequest,
};
pub use compliance::{
    ComplianceCheckResponse, FcaEventResponse, ListChecksQuery, ListFcaEventsQuery,
    RecordCheckRequest, RecordFcaEventRequest, UpdateCheckRequest, UpdateFcaEventRequest,
};
pub use document::{
    ApproveDocumentRequest, DocumentApprovalResponse, RejectDocumentRequest, SubmitDocumentRequest,
};
