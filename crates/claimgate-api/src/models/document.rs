//! Request and response models for document gate endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use claimgate_workflow::{
    AuthorityLevel, DocumentApproval, DocumentApprovalStatus, DocumentId, VisibilityLevel,
};

/// Request to submit a document to the approval gate.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitDocumentRequest {
    /// Document type classification, e.g. "Claims Document".
    #[validate(length(
        min = 1,
        max = 100,
        message = "Document type is required (1-100 characters)"
    ))]
    pub document_type: String,

    /// Stage label shown in the dashboard.
    pub workflow_stage: Option<String>,

    /// Initial visibility.
    #[serde(default)]
    #[schema(value_type = String, example = "internal")]
    pub visibility_level: VisibilityLevel,

    /// Associated project, if any.
    pub project_id: Option<Uuid>,
}

/// Request to approve a document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApproveDocumentRequest {
    /// Optional visibility applied on approval.
    #[schema(value_type = Option<String>, example = "customers")]
    pub visibility: Option<VisibilityLevel>,
}

/// Request to reject a document.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RejectDocumentRequest {
    /// Required reason for the rejection.
    #[validate(length(min = 1, max = 2000, message = "A reason is required (1-2000 characters)"))]
    pub reason: String,
}

/// A document gate record as returned to callers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DocumentApprovalResponse {
    /// Document ID.
    #[schema(value_type = Uuid)]
    pub document_id: DocumentId,
    /// Document type classification.
    pub document_type: String,
    /// Stage label.
    pub workflow_stage: String,
    /// Gate status.
    #[schema(value_type = String, example = "pending")]
    pub approval_status: DocumentApprovalStatus,
    /// Visibility once approved.
    #[schema(value_type = String, example = "internal")]
    pub visibility_level: VisibilityLevel,
    /// Authority tier required to decide (recomputed from the type).
    #[schema(value_type = String, example = "director")]
    pub approval_level_required: AuthorityLevel,
    /// Submitting user.
    pub submitted_by: Uuid,
    /// Deciding actor, once decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<Uuid>,
    /// Rejection reason, once rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Associated project, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    /// Submission instant.
    pub submitted_at: DateTime<Utc>,
    /// Decision instant, once decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<DocumentApproval> for DocumentApprovalResponse {
    fn from(record: DocumentApproval) -> Self {
        Self {
            document_id: record.document_id,
            document_type: record.document_type,
            workflow_stage: record.workflow_stage,
            approval_status: record.approval_status,
            visibility_level: record.visibility_level,
            approval_level_required: record.approval_level_required,
            submitted_by: record.submitted_by,
            decided_by: record.decided_by,
            rejection_reason: record.rejection_reason,
            project_id: record.project_id,
            submitted_at: record.submitted_at,
            decided_at: record.decided_at,
        }
    }
}
