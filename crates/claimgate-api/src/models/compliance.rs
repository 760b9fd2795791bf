//! Request and response models for compliance endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use claimgate_workflow::{
    CheckId, CheckType, ComplianceCheckFilter, ComplianceCheckView, ComplianceStatus, FcaEventId,
    FcaEventFilter, FcaEventView, FcaSeverity, FcaStatus, RiskRating,
};

/// Request to record a compliance check.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordCheckRequest {
    /// Classification of the check.
    #[schema(value_type = String, example = "regulatory")]
    pub check_type: CheckType,

    /// Explicit outcome; defaults to pending review when omitted.
    #[schema(value_type = Option<String>, example = "pending_review")]
    pub compliance_status: Option<ComplianceStatus>,

    /// Risk rating.
    #[serde(default)]
    #[schema(value_type = String, example = "medium")]
    pub risk_rating: RiskRating,

    /// When the assessment was performed. Required.
    pub assessment_date: Option<DateTime<Utc>>,

    /// When validity lapses, if bounded.
    pub expiry_date: Option<DateTime<Utc>>,

    /// When the next review is due, if scheduled.
    pub next_review_date: Option<DateTime<Utc>>,

    /// What the assessment found.
    #[validate(length(min = 1, max = 4000, message = "Findings are required (1-4000 characters)"))]
    pub findings: String,

    /// Suggested remediation, if any.
    #[validate(length(max = 4000, message = "Recommendations must not exceed 4000 characters"))]
    pub recommendations: Option<String>,

    /// Whether follow-up action is required.
    #[serde(default)]
    pub action_required: bool,

    /// Associated project, if any.
    pub project_id: Option<Uuid>,
}

/// Patch to update a compliance check. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCheckRequest {
    /// New outcome, set explicitly by the assessor.
    #[schema(value_type = Option<String>, example = "compliant")]
    pub compliance_status: Option<ComplianceStatus>,
    /// New risk rating.
    #[schema(value_type = Option<String>, example = "high")]
    pub risk_rating: Option<RiskRating>,
    /// New expiry date.
    pub expiry_date: Option<DateTime<Utc>>,
    /// New next review date.
    pub next_review_date: Option<DateTime<Utc>>,
    /// Revised findings.
    pub findings: Option<String>,
    /// Revised recommendations.
    pub recommendations: Option<String>,
    /// Revised action flag.
    pub action_required: Option<bool>,
}

/// Query parameters for listing compliance checks.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListChecksQuery {
    /// Filter by outcome.
    #[param(value_type = Option<String>, example = "compliant")]
    pub status: Option<ComplianceStatus>,
    /// Filter by classification.
    #[param(value_type = Option<String>, example = "regulatory")]
    pub check_type: Option<CheckType>,
    /// Filter by risk rating.
    #[param(value_type = Option<String>, example = "high")]
    pub risk_rating: Option<RiskRating>,
    /// Filter by project.
    pub project_id: Option<Uuid>,
    /// Assessments on or after this instant.
    pub assessed_from: Option<DateTime<Utc>>,
    /// Assessments on or before this instant.
    pub assessed_to: Option<DateTime<Utc>>,
}

impl From<ListChecksQuery> for ComplianceCheckFilter {
    fn from(query: ListChecksQuery) -> Self {
        Self {
            compliance_status: query.status,
            check_type: query.check_type,
            risk_rating: query.risk_rating,
            project_id: query.project_id,
            assessed_from: query.assessed_from,
            assessed_to: query.assessed_to,
        }
    }
}

/// A compliance check as returned to callers, with derived flags.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComplianceCheckResponse {
    /// Check ID.
    #[schema(value_type = Uuid)]
    pub id: CheckId,
    /// Classification.
    #[schema(value_type = String, example = "regulatory")]
    pub check_type: CheckType,
    /// Outcome set by the assessor.
    #[schema(value_type = String, example = "pending_review")]
    pub compliance_status: ComplianceStatus,
    /// Risk rating.
    #[schema(value_type = String, example = "medium")]
    pub risk_rating: RiskRating,
    /// When the assessment was performed.
    pub assessment_date: DateTime<Utc>,
    /// When validity lapses, if bounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    /// When the next review is due, if scheduled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<DateTime<Utc>>,
    /// What the assessment found.
    pub findings: String,
    /// Suggested remediation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    /// Whether follow-up action is required.
    pub action_required: bool,
    /// Associated project, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    /// Assessor who performed the check.
    pub assessor_id: Uuid,
    /// Expiry falls within the warning window of now. Derived, not stored.
    pub is_expiring: bool,
    /// Next review date has passed. Derived, not stored.
    pub is_overdue: bool,
}

impl From<ComplianceCheckView> for ComplianceCheckResponse {
    fn from(view: ComplianceCheckView) -> Self {
        let check = view.check;
        Self {
            id: check.id,
            check_type: check.check_type,
            compliance_status: check.compliance_status,
            risk_rating: check.risk_rating,
            assessment_date: check.assessment_date,
            expiry_date: check.expiry_date,
            next_review_date: check.next_review_date,
            findings: check.findings,
            recommendations: check.recommendations,
            action_required: check.action_required,
            project_id: check.project_id,
            assessor_id: check.assessor_id,
            is_expiring: view.is_expiring,
            is_overdue: view.is_overdue,
        }
    }
}

/// Request to record a regulatory event.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordFcaEventRequest {
    /// Free-form event classification, e.g. "breach_notification".
    #[validate(length(min = 1, max = 100, message = "Event type is required (1-100 characters)"))]
    pub event_type: String,

    /// Severity of the event.
    #[serde(default)]
    #[schema(value_type = String, example = "high")]
    pub severity: FcaSeverity,

    /// What happened.
    #[validate(length(
        min = 1,
        max = 4000,
        message = "Description is required (1-4000 characters)"
    ))]
    pub description: String,

    /// When the event occurred.
    pub occurred_date: DateTime<Utc>,

    /// When a report or remediation is due.
    pub due_date: DateTime<Utc>,

    /// Associated project, if any.
    pub project_id: Option<Uuid>,

    /// Associated user, if any.
    pub user_id: Option<Uuid>,
}

/// Patch to update a regulatory event. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateFcaEventRequest {
    /// New handling status.
    #[schema(value_type = Option<String>, example = "resolved")]
    pub status: Option<FcaStatus>,
    /// New severity.
    #[schema(value_type = Option<String>, example = "medium")]
    pub severity: Option<FcaSeverity>,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Root cause analysis.
    pub root_cause: Option<String>,
    /// Remedial action taken.
    pub remedial_action: Option<String>,
}

/// Query parameters for listing regulatory events.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListFcaEventsQuery {
    /// Filter by handling status.
    #[param(value_type = Option<String>, example = "open")]
    pub status: Option<FcaStatus>,
    /// Filter by severity.
    #[param(value_type = Option<String>, example = "high")]
    pub severity: Option<FcaSeverity>,
    /// Filter by project.
    pub project_id: Option<Uuid>,
}

impl From<ListFcaEventsQuery> for FcaEventFilter {
    fn from(query: ListFcaEventsQuery) -> Self {
        Self {
            status: query.status,
            severity: query.severity,
            project_id: query.project_id,
        }
    }
}

/// A regulatory event as returned to callers.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FcaEventResponse {
    /// Event ID.
    #[schema(value_type = Uuid)]
    pub id: FcaEventId,
    /// Event classification.
    pub event_type: String,
    /// Severity.
    #[schema(value_type = String, example = "high")]
    pub severity: FcaSeverity,
    /// What happened.
    pub description: String,
    /// Handling status.
    #[schema(value_type = String, example = "open")]
    pub status: FcaStatus,
    /// When the event occurred.
    pub occurred_date: DateTime<Utc>,
    /// When a report or remediation is due.
    pub due_date: DateTime<Utc>,
    /// Root cause, once analysed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    /// Remedial action taken, once decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remedial_action: Option<String>,
    /// Associated project, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    /// Associated user, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Whole days until due; negative means overdue. Derived, not stored.
    pub days_until_due: i64,
}

impl From<FcaEventView> for FcaEventResponse {
    fn from(view: FcaEventView) -> Self {
        let event = view.event;
        Self {
            id: event.id,
            event_type: event.event_type,
            severity: event.severity,
            description: event.description,
            status: event.status,
            occurred_date: event.occurred_date,
            due_date: event.due_date,
            root_cause: event.root_cause,
            remedial_action: event.remedial_action,
            project_id: event.project_id,
            user_id: event.user_id,
            days_until_due: view.days_until_due,
        }
    }
}
