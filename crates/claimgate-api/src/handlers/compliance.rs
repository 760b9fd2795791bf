//! Compliance monitor handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use claimgate_workflow::{
    RecordCheckInput, RecordFcaEventInput, UpdateCheckInput, UpdateFcaEventInput,
};

use crate::error::ApiResult;
use crate::extract::Actor;
use crate::models::{
    ComplianceCheckResponse, FcaEventResponse, ListChecksQuery, ListFcaEventsQuery,
    RecordCheckRequest, RecordFcaEventRequest, UpdateCheckRequest, UpdateFcaEventRequest,
};
use crate::router::WorkflowState;

/// Record a compliance check. The calling actor is recorded as assessor.
#[utoipa::path(
    post,
    path = "/compliance/checks",
    tag = "Compliance",
    request_body = RecordCheckRequest,
    responses(
        (status = 201, description = "Check recorded", body = ComplianceCheckResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Actor identity missing")
    )
)]
pub async fn record_check(
    State(state): State<WorkflowState>,
    actor: Actor,
    Json(request): Json<RecordCheckRequest>,
) -> ApiResult<(StatusCode, Json<ComplianceCheckResponse>)> {
    request.validate()?;

    let check = state
        .compliance
        .record_check(RecordCheckInput {
            check_type: request.check_type,
            compliance_status: request.compliance_status,
            risk_rating: request.risk_rating,
            assessment_date: request.assessment_date,
            expiry_date: request.expiry_date,
            next_review_date: request.next_review_date,
            findings: request.findings,
            recommendations: request.recommendations,
            action_required: request.action_required,
            project_id: request.project_id,
            assessor_id: actor.id,
        })
        .await?;

    let view = state.compliance.get_check(check.id).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

/// Update a compliance check. Absent fields are left unchanged; the
/// compliance status only moves when the assessor sets it explicitly.
#[utoipa::path(
    patch,
    path = "/compliance/checks/{id}",
    tag = "Compliance",
    params(("id" = Uuid, Path, description = "Check ID")),
    request_body = UpdateCheckRequest,
    responses(
        (status = 200, description = "Check updated", body = ComplianceCheckResponse),
        (status = 404, description = "Check not found")
    )
)]
pub async fn update_check(
    State(state): State<WorkflowState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCheckRequest>,
) -> ApiResult<Json<ComplianceCheckResponse>> {
    let check = state
        .compliance
        .update_check(
            id.into(),
            UpdateCheckInput {
                compliance_status: request.compliance_status,
                risk_rating: request.risk_rating,
                expiry_date: request.expiry_date,
                next_review_date: request.next_review_date,
                findings: request.findings,
                recommendations: request.recommendations,
                action_required: request.action_required,
            },
        )
        .await?;

    let view = state.compliance.get_check(check.id).await?;
    Ok(Json(view.into()))
}

/// Fetch a single compliance check with derived flags.
#[utoipa::path(
    get,
    path = "/compliance/checks/{id}",
    tag = "Compliance",
    params(("id" = Uuid, Path, description = "Check ID")),
    responses(
        (status = 200, description = "The check", body = ComplianceCheckResponse),
        (status = 404, description = "Check not found")
    )
)]
pub async fn get_check(
    State(state): State<WorkflowState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ComplianceCheckResponse>> {
    let view = state.compliance.get_check(id.into()).await?;
    Ok(Json(view.into()))
}

/// List compliance checks, newest assessment first, with derived
/// expiring and overdue flags computed against the current instant.
#[utoipa::path(
    get,
    path = "/compliance/checks",
    tag = "Compliance",
    params(ListChecksQuery),
    responses(
        (status = 200, description = "Matching checks", body = Vec<ComplianceCheckResponse>)
    )
)]
pub async fn list_checks(
    State(state): State<WorkflowState>,
    _actor: Actor,
    Query(query): Query<ListChecksQuery>,
) -> ApiResult<Json<Vec<ComplianceCheckResponse>>> {
    let views = state.compliance.list_checks(&query.into()).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}

/// Record a regulatory event.
#[utoipa::path(
    post,
    path = "/compliance/fca-events",
    tag = "Compliance",
    request_body = RecordFcaEventRequest,
    responses(
        (status = 201, description = "Event recorded", body = FcaEventResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn record_fca_event(
    State(state): State<WorkflowState>,
    _actor: Actor,
    Json(request): Json<RecordFcaEventRequest>,
) -> ApiResult<(StatusCode, Json<FcaEventResponse>)> {
    request.validate()?;

    let event = state
        .compliance
        .record_fca_event(RecordFcaEventInput {
            event_type: request.event_type,
            severity: request.severity,
            description: request.description,
            occurred_date: request.occurred_date,
            due_date: request.due_date,
            project_id: request.project_id,
            user_id: request.user_id,
        })
        .await?;

    let view = state.compliance.get_fca_event(event.id).await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

/// Update a regulatory event. Status transitions are free-form.
#[utoipa::path(
    patch,
    path = "/compliance/fca-events/{id}",
    tag = "Compliance",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateFcaEventRequest,
    responses(
        (status = 200, description = "Event updated", body = FcaEventResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_fca_event(
    State(state): State<WorkflowState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFcaEventRequest>,
) -> ApiResult<Json<FcaEventResponse>> {
    let event = state
        .compliance
        .update_fca_event(
            id.into(),
            UpdateFcaEventInput {
                status: request.status,
                severity: request.severity,
                due_date: request.due_date,
                root_cause: request.root_cause,
                remedial_action: request.remedial_action,
            },
        )
        .await?;

    let view = state.compliance.get_fca_event(event.id).await?;
    Ok(Json(view.into()))
}

/// List regulatory events, most recent occurrence first.
#[utoipa::path(
    get,
    path = "/compliance/fca-events",
    tag = "Compliance",
    params(ListFcaEventsQuery),
    responses(
        (status = 200, description = "Matching events", body = Vec<FcaEventResponse>)
    )
)]
pub async fn list_fca_events(
    State(state): State<WorkflowState>,
    _actor: Actor,
    Query(query): Query<ListFcaEventsQuery>,
) -> ApiResult<Json<Vec<FcaEventResponse>>> {
    let views = state.compliance.list_fca_events(&query.into()).await?;
    Ok(Json(views.into_iter().map(Into::into).collect()))
}
