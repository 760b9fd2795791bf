//! Approval request handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use claimgate_workflow::CreateApprovalRequestInput;

use crate::error::ApiResult;
use crate::extract::Actor;
use crate::models::{
    ApprovalRequestListResponse, ApprovalRequestResponse, ApproveRequestRequest,
    CreateRequestRequest, EscalateRequestRequest, ListRequestsQuery, RejectRequestRequest,
};
use crate::router::WorkflowState;

/// Create an approval request.
#[utoipa::path(
    post,
    path = "/workflow/requests",
    tag = "Workflow - Approvals",
    request_body = CreateRequestRequest,
    responses(
        (status = 201, description = "Request created", body = ApprovalRequestResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Actor identity missing")
    )
)]
pub async fn create_request(
    State(state): State<WorkflowState>,
    actor: Actor,
    Json(request): Json<CreateRequestRequest>,
) -> ApiResult<(StatusCode, Json<ApprovalRequestResponse>)> {
    request.validate()?;

    let created = state
        .approvals
        .create(CreateApprovalRequestInput {
            request_type: request.request_type,
            description: request.description,
            justification: request.justification,
            amount: request.amount,
            urgency: request.urgency,
            required_authority_level: request.required_authority_level,
            approvers: request.approvers,
            requested_by: actor.id,
            project_id: request.project_id,
            metadata: request.metadata,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Approve an approval request.
#[utoipa::path(
    post,
    path = "/workflow/requests/{id}/approve",
    tag = "Workflow - Approvals",
    params(("id" = Uuid, Path, description = "Approval request ID")),
    request_body = ApproveRequestRequest,
    responses(
        (status = 200, description = "Request approved", body = ApprovalRequestResponse),
        (status = 403, description = "Actor is not an approver"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided"),
        (status = 410, description = "Request expired")
    )
)]
pub async fn approve_request(
    State(state): State<WorkflowState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(request): Json<ApproveRequestRequest>,
) -> ApiResult<Json<ApprovalRequestResponse>> {
    request.validate()?;
    let approved = state
        .approvals
        .approve(id.into(), actor.id, request.comments)
        .await?;
    Ok(Json(approved.into()))
}

/// Reject an approval request with a mandatory reason.
#[utoipa::path(
    post,
    path = "/workflow/requests/{id}/reject",
    tag = "Workflow - Approvals",
    params(("id" = Uuid, Path, description = "Approval request ID")),
    request_body = RejectRequestRequest,
    responses(
        (status = 200, description = "Request rejected", body = ApprovalRequestResponse),
        (status = 400, description = "Missing reason"),
        (status = 403, description = "Actor is not an approver"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided"),
        (status = 410, description = "Request expired")
    )
)]
pub async fn reject_request(
    State(state): State<WorkflowState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectRequestRequest>,
) -> ApiResult<Json<ApprovalRequestResponse>> {
    request.validate()?;
    let rejected = state
        .approvals
        .reject(id.into(), actor.id, &request.reason)
        .await?;
    Ok(Json(rejected.into()))
}

/// Escalate an approval request. Any authorized actor may escalate; the
/// request stays decidable until approved, rejected or expired.
#[utoipa::path(
    post,
    path = "/workflow/requests/{id}/escalate",
    tag = "Workflow - Approvals",
    params(("id" = Uuid, Path, description = "Approval request ID")),
    request_body = EscalateRequestRequest,
    responses(
        (status = 200, description = "Request escalated", body = ApprovalRequestResponse),
        (status = 400, description = "Missing reason"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn escalate_request(
    State(state): State<WorkflowState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(request): Json<EscalateRequestRequest>,
) -> ApiResult<Json<ApprovalRequestResponse>> {
    request.validate()?;
    let escalated = state
        .approvals
        .escalate(id.into(), actor.id, &request.reason)
        .await?;
    Ok(Json(escalated.into()))
}

/// Fetch a single approval request with read-time expiry applied.
#[utoipa::path(
    get,
    path = "/workflow/requests/{id}",
    tag = "Workflow - Approvals",
    params(("id" = Uuid, Path, description = "Approval request ID")),
    responses(
        (status = 200, description = "The request", body = ApprovalRequestResponse),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<WorkflowState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApprovalRequestResponse>> {
    let view = state.approvals.get(id.into()).await?;
    Ok(Json(view.into()))
}

/// List approval requests, newest first, with read-time expiry applied.
#[utoipa::path(
    get,
    path = "/workflow/requests",
    tag = "Workflow - Approvals",
    params(ListRequestsQuery),
    responses(
        (status = 200, description = "Matching requests", body = ApprovalRequestListResponse),
        (status = 400, description = "Unparseable filter")
    )
)]
pub async fn list_requests(
    State(state): State<WorkflowState>,
    _actor: Actor,
    Query(query): Query<ListRequestsQuery>,
) -> ApiResult<Json<ApprovalRequestListResponse>> {
    let filter = query.into_filter()?;
    let views = state.approvals.list(&filter).await?;
    let items: Vec<ApprovalRequestResponse> = views.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(ApprovalRequestListResponse { items, total }))
}

/// List the requests the calling actor can still decide.
#[utoipa::path(
    get,
    path = "/workflow/my-approvals",
    tag = "Workflow - Approvals",
    responses(
        (status = 200, description = "Pending approvals for the actor", body = ApprovalRequestListResponse),
        (status = 401, description = "Actor identity missing")
    )
)]
pub async fn list_my_approvals(
    State(state): State<WorkflowState>,
    actor: Actor,
) -> ApiResult<Json<ApprovalRequestListResponse>> {
    let views = state.approvals.list_pending_for(actor.id).await?;
    let items: Vec<ApprovalRequestResponse> = views.into_iter().map(Into::into).collect();
    let total = items.len();
    Ok(Json(ApprovalRequestListResponse { items, total }))
}
