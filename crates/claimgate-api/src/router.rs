//! Router configuration for the workflow API.

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use claimgate_workflow::{
    ApprovalWorkflowService, ComplianceMonitorService, DocumentApprovalService,
};

use crate::handlers::{approvals, compliance, documents};

/// Shared state behind every handler.
#[derive(Clone)]
pub struct WorkflowState {
    /// Approval request lifecycle engine.
    pub approvals: Arc<ApprovalWorkflowService>,
    /// Document approval gate.
    pub documents: Arc<DocumentApprovalService>,
    /// Compliance monitor.
    pub compliance: Arc<ComplianceMonitorService>,
}

impl WorkflowState {
    /// Bundle the three engine services into router state.
    pub fn new(
        approvals: Arc<ApprovalWorkflowService>,
        documents: Arc<DocumentApprovalService>,
        compliance: Arc<ComplianceMonitorService>,
    ) -> Self {
        Self {
            approvals,
            documents,
            compliance,
        }
    }
}

/// Build the workflow API router.
pub fn workflow_router(state: WorkflowState) -> Router {
    Router::new()
        // Approval requests
        .route("/workflow/requests", post(approvals::create_request))
        .route("/workflow/requests", get(approvals::list_requests))
        .route("/workflow/requests/{id}", get(approvals::get_request))
        .route(
            "/workflow/requests/{id}/approve",
            post(approvals::approve_request),
        )
        .route(
            "/workflow/requests/{id}/reject",
            post(approvals::reject_request),
        )
        .route(
            "/workflow/requests/{id}/escalate",
            post(approvals::escalate_request),
        )
        .route("/workflow/my-approvals", get(approvals::list_my_approvals))
        // Document gate
        .route(
            "/workflow/documents/{id}/submit",
            post(documents::submit_document),
        )
        .route("/workflow/documents/{id}", get(documents::get_document))
        .route(
            "/workflow/documents/{id}/approve",
            post(documents::approve_document),
        )
        .route(
            "/workflow/documents/{id}/reject",
            post(documents::reject_document),
        )
        // Compliance checks
        .route("/compliance/checks", post(compliance::record_check))
        .route("/compliance/checks", get(compliance::list_checks))
        .route("/compliance/checks/{id}", get(compliance::get_check))
        .route("/compliance/checks/{id}", patch(compliance::update_check))
        // Regulatory events
        .route("/compliance/fca-events", post(compliance::record_fca_event))
        .route("/compliance/fca-events", get(compliance::list_fca_events))
        .route(
            "/compliance/fca-events/{id}",
            patch(compliance::update_fca_event),
        )
        .with_state(state)
}
