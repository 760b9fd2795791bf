//! Request and response models for approval request endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use claimgate_workflow::{
    ApprovalRequest, ApprovalRequestFilter, ApprovalRequestView, AuthorityLevel, RequestId,
    RequestStatus, Urgency,
};

use crate::error::ApiError;

/// Request to create an approval request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRequestRequest {
    /// Free-form classification, e.g. "cost_increase".
    #[validate(length(min = 1, max = 100, message = "Request type is required (1-100 characters)"))]
    pub request_type: String,

    /// What is being requested.
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Description is required (1-2000 characters)"
    ))]
    pub description: String,

    /// Why it is being requested.
    #[validate(length(max = 2000, message = "Justification must not exceed 2000 characters"))]
    pub justification: Option<String>,

    /// Monetary amount at stake, if any.
    pub amount: Option<Decimal>,

    /// Urgency tier; drives the expiry window.
    #[serde(default)]
    #[schema(value_type = String, example = "urgent")]
    pub urgency: Urgency,

    /// Authority tier expected of the deciding approver.
    #[serde(default)]
    #[schema(value_type = String, example = "manager")]
    pub required_authority_level: AuthorityLevel,

    /// Users allowed to decide. Must be non-empty.
    #[validate(length(min = 1, message = "At least one approver is required"))]
    pub approvers: Vec<Uuid>,

    /// Associated project, if any.
    pub project_id: Option<Uuid>,

    /// Opaque metadata map.
    #[schema(value_type = Object)]
    pub metadata: Option<serde_json::Value>,
}

/// Request to approve an approval request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ApproveRequestRequest {
    /// Optional comments from the approver.
    #[validate(length(max = 2000, message = "Comments must not exceed 2000 characters"))]
    pub comments: Option<String>,
}

/// Request to reject an approval request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RejectRequestRequest {
    /// Required reason for the rejection.
    #[validate(length(min = 1, max = 2000, message = "A reason is required (1-2000 characters)"))]
    pub reason: String,
}

/// Request to escalate an approval request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EscalateRequestRequest {
    /// Required reason for the escalation.
    #[validate(length(min = 1, max = 2000, message = "A reason is required (1-2000 characters)"))]
    pub reason: String,
}

/// Query parameters for listing approval requests.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListRequestsQuery {
    /// Comma-separated statuses, e.g. `pending,escalated`.
    pub status: Option<String>,

    /// Exact request type.
    pub request_type: Option<String>,

    /// Comma-separated urgency tiers, e.g. `high,urgent`.
    pub urgency: Option<String>,

    /// Associated project.
    pub project_id: Option<Uuid>,

    /// Substring search over description and request type.
    pub search: Option<String>,
}

impl ListRequestsQuery {
    /// Translate the query into an engine filter.
    pub fn into_filter(self) -> Result<ApprovalRequestFilter, ApiError> {
        let statuses = self
            .status
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse::<RequestStatus>().map_err(ApiError::Validation))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let urgencies = self
            .urgency
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.parse::<Urgency>().map_err(ApiError::Validation))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(ApprovalRequestFilter {
            statuses,
            request_type: self.request_type,
            urgencies,
            project_id: self.project_id,
            approver: None,
            search: self.search,
        })
    }
}

/// An approval request as returned to callers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApprovalRequestResponse {
    /// Request ID.
    #[schema(value_type = Uuid)]
    pub id: RequestId,
    /// Classification.
    pub request_type: String,
    /// What is being requested.
    pub description: String,
    /// Why it is being requested.
    pub justification: Option<String>,
    /// Monetary amount at stake, if any.
    pub amount: Option<Decimal>,
    /// Urgency tier.
    #[schema(value_type = String, example = "urgent")]
    pub urgency: Urgency,
    /// Authority tier expected of the deciding approver.
    #[schema(value_type = String, example = "manager")]
    pub required_authority_level: AuthorityLevel,
    /// Users allowed to decide.
    pub approvers: Vec<Uuid>,
    /// Lifecycle status at read time.
    #[schema(value_type = String, example = "pending")]
    pub status: RequestStatus,
    /// Requester.
    pub requested_by: Uuid,
    /// Deciding actor, once decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Uuid>,
    /// Rejection reason, once rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Escalation flag.
    pub escalated: bool,
    /// When the latest escalation was raised.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalated_at: Option<DateTime<Utc>>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Fixed expiry deadline.
    pub expires_at: DateTime<Utc>,
    /// Associated project, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    /// Opaque metadata map.
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    /// Whether the request reads as expired.
    pub is_expired: bool,
}

impl From<ApprovalRequestView> for ApprovalRequestResponse {
    fn from(view: ApprovalRequestView) -> Self {
        let is_expired = view.is_expired;
        from_record(view.request, is_expired)
    }
}

impl From<ApprovalRequest> for ApprovalRequestResponse {
    fn from(record: ApprovalRequest) -> Self {
        from_record(record, false)
    }
}

fn from_record(record: ApprovalRequest, is_expired: bool) -> ApprovalRequestResponse {
    ApprovalRequestResponse {
        id: record.id,
        request_type: record.request_type,
        description: record.description,
        justification: record.justification,
        amount: record.amount,
        urgency: record.urgency,
        required_authority_level: record.required_authority_level,
        approvers: record.approvers,
        status: record.status,
        requested_by: record.requested_by,
        approved_by: record.approved_by,
        rejection_reason: record.rejection_reason,
        escalated: record.escalated,
        escalated_at: record.escalated_at,
        created_at: record.created_at,
        expires_at: record.expires_at,
        project_id: record.project_id,
        metadata: record.metadata,
        is_expired,
    }
}

/// List of approval requests.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApprovalRequestListResponse {
    /// Matching requests, newest first.
    pub items: Vec<ApprovalRequestResponse>,
    /// Total count.
    pub total: usize,
}
