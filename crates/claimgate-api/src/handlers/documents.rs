//! Document approval gate handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use claimgate_workflow::SubmitDocumentInput;

use crate::error::ApiResult;
use crate::extract::Actor;
use crate::models::{
    ApproveDocumentRequest, DocumentApprovalResponse, RejectDocumentRequest, SubmitDocumentRequest,
};
use crate::router::WorkflowState;

/// Submit a document to the approval gate. Types requiring only the
/// standard tier are auto-approved immediately.
#[utoipa::path(
    post,
    path = "/workflow/documents/{id}/submit",
    tag = "Workflow - Documents",
    params(("id" = Uuid, Path, description = "Document ID")),
    request_body = SubmitDocumentRequest,
    responses(
        (status = 201, description = "Document registered at the gate", body = DocumentApprovalResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Actor identity missing")
    )
)]
pub async fn submit_document(
    State(state): State<WorkflowState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitDocumentRequest>,
) -> ApiResult<(StatusCode, Json<DocumentApprovalResponse>)> {
    request.validate()?;

    let record = state
        .documents
        .submit(SubmitDocumentInput {
            document_id: id.into(),
            document_type: request.document_type,
            workflow_stage: request.workflow_stage,
            visibility_level: request.visibility_level,
            submitted_by: actor.id,
            project_id: request.project_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Approve a pending document. The actor's authority tier must admit the
/// level required by the document type.
#[utoipa::path(
    post,
    path = "/workflow/documents/{id}/approve",
    tag = "Workflow - Documents",
    params(("id" = Uuid, Path, description = "Document ID")),
    request_body = ApproveDocumentRequest,
    responses(
        (status = 200, description = "Document approved", body = DocumentApprovalResponse),
        (status = 403, description = "Insufficient authority"),
        (status = 404, description = "Document not found"),
        (status = 409, description = "Document already decided")
    )
)]
pub async fn approve_document(
    State(state): State<WorkflowState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(request): Json<ApproveDocumentRequest>,
) -> ApiResult<Json<DocumentApprovalResponse>> {
    let record = state
        .documents
        .approve(id.into(), actor.into(), request.visibility)
        .await?;
    Ok(Json(record.into()))
}

/// Reject a pending document with a mandatory reason.
#[utoipa::path(
    post,
    path = "/workflow/documents/{id}/reject",
    tag = "Workflow - Documents",
    params(("id" = Uuid, Path, description = "Document ID")),
    request_body = RejectDocumentRequest,
    responses(
        (status = 200, description = "Document rejected", body = DocumentApprovalResponse),
        (status = 400, description = "Missing reason"),
        (status = 403, description = "Insufficient authority"),
        (status = 404, description = "Document not found"),
        (status = 409, description = "Document already decided")
    )
)]
pub async fn reject_document(
    State(state): State<WorkflowState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectDocumentRequest>,
) -> ApiResult<Json<DocumentApprovalResponse>> {
    request.validate()?;
    let record = state
        .documents
        .reject(id.into(), actor.into(), &request.reason)
        .await?;
    Ok(Json(record.into()))
}

/// Fetch the gate record for a document.
#[utoipa::path(
    get,
    path = "/workflow/documents/{id}",
    tag = "Workflow - Documents",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Gate record", body = DocumentApprovalResponse),
        (status = 404, description = "Document not found")
    )
)]
pub async fn get_document(
    State(state): State<WorkflowState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DocumentApprovalResponse>> {
    let record = state.documents.get(id.into()).await?;
    Ok(Json(record.into()))
}
