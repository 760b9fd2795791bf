//! Compliance checks and regulatory reporting events.
//!
//! The monitor is read-oriented: it derives "expiring soon" and "overdue"
//! flags from stored dates against the injected clock at read time, and never
//! persists them. Compliance status itself is only ever set explicitly by an
//! assessor; the monitor flags temporal risk, it never infers an outcome.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{Result, WorkflowError};
use crate::time_policy::{days_until, is_within_window};
use crate::types::{CheckId, ComplianceStatus, FcaEventId, FcaSeverity, FcaStatus, RiskRating};

/// Default warning window for expiring checks.
pub const DEFAULT_WARNING_WINDOW_DAYS: i64 = 30;

// ============================================================================
// Domain Types
// ============================================================================

/// Classification of a compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    /// Regulatory obligations (FCA and similar).
    #[default]
    Regulatory,
    /// Data protection and privacy.
    DataProtection,
    /// Health and safety.
    HealthAndSafety,
    /// Financial controls and audit.
    Financial,
    /// Environmental obligations.
    Environmental,
    /// Day-to-day operational checks.
    Operational,
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regulatory => write!(f, "regulatory"),
            Self::DataProtection => write!(f, "data_protection"),
            Self::HealthAndSafety => write!(f, "health_and_safety"),
            Self::Financial => write!(f, "financial"),
            Self::Environmental => write!(f, "environmental"),
            Self::Operational => write!(f, "operational"),
        }
    }
}

/// A recorded compliance check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Unique identifier.
    pub id: CheckId,
    /// Classification of the check.
    pub check_type: CheckType,
    /// Outcome, set explicitly by an assessor.
    pub compliance_status: ComplianceStatus,
    /// Risk rating attached by the assessor.
    pub risk_rating: RiskRating,
    /// When the assessment was performed.
    pub assessment_date: DateTime<Utc>,
    /// When the check's validity lapses, if bounded.
    pub expiry_date: Option<DateTime<Utc>>,
    /// When the next review is due, if scheduled.
    pub next_review_date: Option<DateTime<Utc>>,
    /// What the assessment found.
    pub findings: String,
    /// Suggested remediation, if any.
    pub recommendations: Option<String>,
    /// Whether follow-up action is required.
    pub action_required: bool,
    /// Associated project, if any.
    pub project_id: Option<Uuid>,
    /// Assessor who performed the check.
    pub assessor_id: Uuid,
    /// When recorded.
    pub created_at: DateTime<Utc>,
    /// When last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a compliance check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCheckInput {
    /// Classification of the check.
    pub check_type: CheckType,
    /// Explicit outcome; defaults to pending review when omitted.
    pub compliance_status: Option<ComplianceStatus>,
    /// Risk rating.
    #[serde(default)]
    pub risk_rating: RiskRating,
    /// When the assessment was performed. Required.
    pub assessment_date: Option<DateTime<Utc>>,
    /// When validity lapses, if bounded.
    pub expiry_date: Option<DateTime<Utc>>,
    /// When the next review is due, if scheduled.
    pub next_review_date: Option<DateTime<Utc>>,
    /// What the assessment found. Must be non-blank.
    pub findings: String,
    /// Suggested remediation, if any.
    pub recommendations: Option<String>,
    /// Whether follow-up action is required.
    #[serde(default)]
    pub action_required: bool,
    /// Associated project, if any.
    pub project_id: Option<Uuid>,
    /// Assessor performing the check.
    pub assessor_id: Uuid,
}

/// Patch for updating a compliance check. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCheckInput {
    /// New outcome. The monitor never sets this on its own.
    pub compliance_status: Option<ComplianceStatus>,
    /// New risk rating.
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

/// Filter options for listing compliance checks.
#[derive(Debug, Clone, Default)]
pub struct ComplianceCheckFilter {
    /// Filter by outcome.
    pub compliance_status: Option<ComplianceStatus>,
    /// Filter by classification.
    pub check_type: Option<CheckType>,
    /// Filter by risk rating.
    pub risk_rating: Option<RiskRating>,
    /// Filter by project.
    pub project_id: Option<Uuid>,
    /// Assessments on or after this instant.
    pub assessed_from: Option<DateTime<Utc>>,
    /// Assessments on or before this instant.
    pub assessed_to: Option<DateTime<Utc>>,
}

/// A compliance check with read-time temporal flags.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceCheckView {
    /// The underlying record.
    #[serde(flatten)]
    pub check: ComplianceCheck,
    /// Expiry date falls within the warning window of `now`.
    pub is_expiring: bool,
    /// Next review date is strictly before `now`.
    pub is_overdue: bool,
}

/// A regulatory (FCA) reporting event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcaEvent {
    /// Unique identifier.
    pub id: FcaEventId,
    /// Free-form event classification.
    pub event_type: String,
    /// Severity of the event.
    pub severity: FcaSeverity,
    /// What happened.
    pub description: String,
    /// Handling status; transitions are free-form.
    pub status: FcaStatus,
    /// When the event occurred.
    pub occurred_date: DateTime<Utc>,
    /// When a report or remediation is due.
    pub due_date: DateTime<Utc>,
    /// Root cause, once analysed.
    pub root_cause: Option<String>,
    /// Remedial action taken, once decided.
    pub remedial_action: Option<String>,
    /// Associated project, if any.
    pub project_id: Option<Uuid>,
    /// Associated user, if any.
    pub user_id: Option<Uuid>,
    /// When recorded.
    pub created_at: DateTime<Utc>,
    /// When last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a regulatory event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFcaEventInput {
    /// Free-form event classification.
    pub event_type: String,
    /// Severity of the event.
    #[serde(default)]
    pub severity: FcaSeverity,
    /// What happened. Must be non-blank.
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

/// Patch for updating a regulatory event. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFcaEventInput {
    /// New handling status; no ordering is enforced.
    pub status: Option<FcaStatus>,
    /// New severity.
    pub severity: Option<FcaSeverity>,
    /// New due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Root cause analysis.
    pub root_cause: Option<String>,
    /// Remedial action taken.
    pub remedial_action: Option<String>,
}

/// Filter options for listing regulatory events.
#[derive(Debug, Clone, Default)]
pub struct FcaEventFilter {
    /// Filter by handling status.
    pub status: Option<FcaStatus>,
    /// Filter by severity.
    pub severity: Option<FcaSeverity>,
    /// Filter by project.
    pub project_id: Option<Uuid>,
}

/// A regulatory event with its read-time due-date arithmetic.
#[derive(Debug, Clone, Serialize)]
pub struct FcaEventView {
    /// The underlying record.
    #[serde(flatten)]
    pub event: FcaEvent,
    /// Whole days until the due date; negative means overdue.
    pub days_until_due: i64,
}

// ============================================================================
// Store Traits
// ============================================================================

/// Trait for compliance check storage backends.
#[async_trait::async_trait]
pub trait ComplianceCheckStore: Send + Sync {
    /// Get a check by ID.
    async fn get(&self, id: CheckId) -> Result<Option<ComplianceCheck>>;

    /// Insert or replace a check record.
    async fn put(&self, record: ComplianceCheck) -> Result<()>;

    /// Query checks matching the filter, newest assessment first.
    async fn query(&self, filter: &ComplianceCheckFilter) -> Result<Vec<ComplianceCheck>>;
}

/// Trait for regulatory event storage backends.
#[async_trait::async_trait]
pub trait FcaEventStore: Send + Sync {
    /// Get an event by ID.
    async fn get(&self, id: FcaEventId) -> Result<Option<FcaEvent>>;

    /// Insert or replace an event record.
    async fn put(&self, record: FcaEvent) -> Result<()>;

    /// Query events matching the filter, most recent occurrence first.
    async fn query(&self, filter: &FcaEventFilter) -> Result<Vec<FcaEvent>>;
}

// ============================================================================
// In-Memory Stores
// ============================================================================

/// In-memory compliance check store.
#[derive(Debug, Default)]
pub struct InMemoryComplianceCheckStore {
    records: Arc<RwLock<HashMap<Uuid, ComplianceCheck>>>,
}

impl InMemoryComplianceCheckStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ComplianceCheckStore for InMemoryComplianceCheckStore {
    async fn get(&self, id: CheckId) -> Result<Option<ComplianceCheck>> {
        let records = self.records.read().await;
        Ok(records.get(&id.into_inner()).cloned())
    }

    async fn put(&self, record: ComplianceCheck) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id.into_inner(), record);
        Ok(())
    }

    async fn query(&self, filter: &ComplianceCheckFilter) -> Result<Vec<ComplianceCheck>> {
        let records = self.records.read().await;
        let mut results: Vec<_> = records
            .values()
            .filter(|c| {
                filter
                    .compliance_status
                    .is_none_or(|s| c.compliance_status == s)
            })
            .filter(|c| filter.check_type.is_none_or(|t| c.check_type == t))
            .filter(|c| filter.risk_rating.is_none_or(|r| c.risk_rating == r))
            .filter(|c| filter.project_id.is_none_or(|p| c.project_id == Some(p)))
            .filter(|c| filter.assessed_from.is_none_or(|d| c.assessment_date >= d))
            .filter(|c| filter.assessed_to.is_none_or(|d| c.assessment_date <= d))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.assessment_date.cmp(&a.assessment_date));
        Ok(results)
    }
}

/// In-memory regulatory event store.
#[derive(Debug, Default)]
pub struct InMemoryFcaEventStore {
    records: Arc<RwLock<HashMap<Uuid, FcaEvent>>>,
}

impl InMemoryFcaEventStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl FcaEventStore for InMemoryFcaEventStore {
    async fn get(&self, id: FcaEventId) -> Result<Option<FcaEvent>> {
        let records = self.records.read().await;
        Ok(records.get(&id.into_inner()).cloned())
    }

    async fn put(&self, record: FcaEvent) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id.into_inner(), record);
        Ok(())
    }

    async fn query(&self, filter: &FcaEventFilter) -> Result<Vec<FcaEvent>> {
        let records = self.records.read().await;
        let mut results: Vec<_> = records
            .values()
            .filter(|e| filter.status.is_none_or(|s| e.status == s))
            .filter(|e| filter.severity.is_none_or(|s| e.severity == s))
            .filter(|e| filter.project_id.is_none_or(|p| e.project_id == Some(p)))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.occurred_date.cmp(&a.occurred_date));
        Ok(results)
    }
}

// ============================================================================
// Service
// ============================================================================

/// The compliance monitor.
pub struct ComplianceMonitorService {
    check_store: Arc<dyn ComplianceCheckStore>,
    event_store: Arc<dyn FcaEventStore>,
    clock: Arc<dyn Clock>,
    warning_window: Duration,
}

impl ComplianceMonitorService {
    /// Create a monitor with the default 30-day warning window.
    pub fn new(
        check_store: Arc<dyn ComplianceCheckStore>,
        event_store: Arc<dyn FcaEventStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            check_store,
            event_store,
            clock,
            warning_window: Duration::days(DEFAULT_WARNING_WINDOW_DAYS),
        }
    }

    /// Override the expiry warning window.
    pub fn with_warning_window(mut self, window: Duration) -> Self {
        self.warning_window = window;
        self
    }

    /// Record a compliance check. Findings must be non-blank and the
    /// assessment date present; status defaults to pending review.
    pub async fn record_check(&self, input: RecordCheckInput) -> Result<ComplianceCheck> {
        if input.findings.trim().is_empty() {
            return Err(WorkflowError::Validation("findings must not be empty".into()));
        }
        let assessment_date = input
            .assessment_date
            .ok_or_else(|| WorkflowError::Validation("an assessment date is required".into()))?;

        let now = self.clock.now();
        let check = ComplianceCheck {
            id: CheckId::new(),
            check_type: input.check_type,
            compliance_status: input
                .compliance_status
                .unwrap_or(ComplianceStatus::PendingReview),
            risk_rating: input.risk_rating,
            assessment_date,
            expiry_date: input.expiry_date,
            next_review_date: input.next_review_date,
            findings: input.findings,
            recommendations: input.recommendations,
            action_required: input.action_required,
            project_id: input.project_id,
            assessor_id: input.assessor_id,
            created_at: now,
            updated_at: now,
        };

        self.check_store.put(check.clone()).await?;
        tracing::info!(check_id = %check.id, check_type = %check.check_type, "compliance check recorded");
        Ok(check)
    }

    /// Apply an explicit patch to a check. The monitor never changes
    /// `compliance_status` unless the patch carries one.
    pub async fn update_check(&self, id: CheckId, patch: UpdateCheckInput) -> Result<ComplianceCheck> {
        let mut check = self
            .check_store
            .get(id)
            .await?
            .ok_or(WorkflowError::CheckNotFound(id))?;

        if let Some(status) = patch.compliance_status {
            check.compliance_status = status;
        }
        if let Some(risk_rating) = patch.risk_rating {
            check.risk_rating = risk_rating;
        }
        if let Some(expiry_date) = patch.expiry_date {
            check.expiry_date = Some(expiry_date);
        }
        if let Some(next_review_date) = patch.next_review_date {
            check.next_review_date = Some(next_review_date);
        }
        if let Some(findings) = patch.findings {
            if findings.trim().is_empty() {
                return Err(WorkflowError::Validation("findings must not be empty".into()));
            }
            check.findings = findings;
        }
        if let Some(recommendations) = patch.recommendations {
            check.recommendations = Some(recommendations);
        }
        if let Some(action_required) = patch.action_required {
            check.action_required = action_required;
        }
        check.updated_at = self.clock.now();

        self.check_store.put(check.clone()).await?;
        Ok(check)
    }

    /// List checks with derived temporal flags computed against `now`.
    pub async fn list_checks(
        &self,
        filter: &ComplianceCheckFilter,
    ) -> Result<Vec<ComplianceCheckView>> {
        let now = self.clock.now();
        let checks = self.check_store.query(filter).await?;
        Ok(checks
            .into_iter()
            .map(|check| self.check_view(check, now))
            .collect())
    }

    /// Get one check with derived flags.
    pub async fn get_check(&self, id: CheckId) -> Result<ComplianceCheckView> {
        let check = self
            .check_store
            .get(id)
            .await?
            .ok_or(WorkflowError::CheckNotFound(id))?;
        Ok(self.check_view(check, self.clock.now()))
    }

    /// Record a regulatory event.
    pub async fn record_fca_event(&self, input: RecordFcaEventInput) -> Result<FcaEvent> {
        if input.description.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "a description is required".into(),
            ));
        }

        let now = self.clock.now();
        let event = FcaEvent {
            id: FcaEventId::new(),
            event_type: input.event_type,
            severity: input.severity,
            description: input.description,
            status: FcaStatus::Open,
            occurred_date: input.occurred_date,
            due_date: input.due_date,
            root_cause: None,
            remedial_action: None,
            project_id: input.project_id,
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        };

        self.event_store.put(event.clone()).await?;
        tracing::info!(event_id = %event.id, severity = %event.severity, "regulatory event recorded");
        Ok(event)
    }

    /// Apply a free-form patch to a regulatory event; transitions between
    /// handling statuses are deliberately unconstrained.
    pub async fn update_fca_event(
        &self,
        id: FcaEventId,
        patch: UpdateFcaEventInput,
    ) -> Result<FcaEvent> {
        let mut event = self
            .event_store
            .get(id)
            .await?
            .ok_or(WorkflowError::FcaEventNotFound(id))?;

        if let Some(status) = patch.status {
            event.status = status;
        }
        if let Some(severity) = patch.severity {
            event.severity = severity;
        }
        if let Some(due_date) = patch.due_date {
            event.due_date = due_date;
        }
        if let Some(root_cause) = patch.root_cause {
            event.root_cause = Some(root_cause);
        }
        if let Some(remedial_action) = patch.remedial_action {
            event.remedial_action = Some(remedial_action);
        }
        event.updated_at = self.clock.now();

        self.event_store.put(event.clone()).await?;
        Ok(event)
    }

    /// Get one regulatory event with due-date arithmetic.
    pub async fn get_fca_event(&self, id: FcaEventId) -> Result<FcaEventView> {
        let event = self
            .event_store
            .get(id)
            .await?
            .ok_or(WorkflowError::FcaEventNotFound(id))?;
        Ok(FcaEventView {
            days_until_due: days_until(event.due_date, self.clock.now()),
            event,
        })
    }

    /// List regulatory events augmented with due-date arithmetic.
    pub async fn list_fca_events(&self, filter: &FcaEventFilter) -> Result<Vec<FcaEventView>> {
        let now = self.clock.now();
        let events = self.event_store.query(filter).await?;
        Ok(events
            .into_iter()
            .map(|event| FcaEventView {
                days_until_due: days_until(event.due_date, now),
                event,
            })
            .collect())
    }

    fn check_view(&self, check: ComplianceCheck, now: DateTime<Utc>) -> ComplianceCheckView {
        let is_expiring = check
            .expiry_date
            .is_some_and(|d| is_within_window(d, now, self.warning_window));
        let is_overdue = check.next_review_date.is_some_and(|d| d < now);
        ComplianceCheckView {
            check,
            is_expiring,
            is_overdue,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn t0() -> DateTime<Utc> {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    fn setup() -> (ComplianceMonitorService, ManualClock) {
        let clock = ManualClock::new(t0());
        let service = ComplianceMonitorService::new(
            Arc::new(InMemoryComplianceCheckStore::new()),
            Arc::new(InMemoryFcaEventStore::new()),
            Arc::new(clock.clone()),
        );
        (service, clock)
    }

    fn check_input() -> RecordCheckInput {
        RecordCheckInput {
            check_type: CheckType::Regulatory,
            compliance_status: None,
            risk_rating: RiskRating::Medium,
            assessment_date: Some(t0()),
            expiry_date: None,
            next_review_date: None,
            findings: "Annual FCA submission reviewed".to_string(),
            recommendations: None,
            action_required: false,
            project_id: None,
            assessor_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn record_defaults_to_pending_review() {
        let (service, _) = setup();
        let check = service.record_check(check_input()).await.unwrap();
        assert_eq!(check.compliance_status, ComplianceStatus::PendingReview);
    }

    #[tokio::test]
    async fn record_requires_findings_and_assessment_date() {
        let (service, _) = setup();

        let mut blank = check_input();
        blank.findings = "  ".to_string();
        assert!(matches!(
            service.record_check(blank).await,
            Err(WorkflowError::Validation(_))
        ));

        let mut undated = check_input();
        undated.assessment_date = None;
        assert!(matches!(
            service.record_check(undated).await,
            Err(WorkflowError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn expiring_flag_respects_warning_window() {
        let (service, _) = setup();
        let mut input = check_input();
        input.expiry_date = Some(t0() + Duration::days(10));
        service.record_check(input).await.unwrap();

        // Default 30-day window: expiring.
        let views = service
            .list_checks(&ComplianceCheckFilter::default())
            .await
            .unwrap();
        assert!(views[0].is_expiring);

        // 5-day window: not expiring.
        let clock = ManualClock::new(t0());
        let narrow = ComplianceMonitorService::new(
            Arc::new(InMemoryComplianceCheckStore::new()),
            Arc::new(InMemoryFcaEventStore::new()),
            Arc::new(clock),
        )
        .with_warning_window(Duration::days(5));
        let mut input = check_input();
        input.expiry_date = Some(t0() + Duration::days(10));
        narrow.record_check(input).await.unwrap();
        let views = narrow
            .list_checks(&ComplianceCheckFilter::default())
            .await
            .unwrap();
        assert!(!views[0].is_expiring);
    }

    #[tokio::test]
    async fn overdue_flag_is_strictly_before_now() {
        let (service, clock) = setup();
        let mut input = check_input();
        input.next_review_date = Some(t0() + Duration::days(1));
        service.record_check(input).await.unwrap();

        let views = service
            .list_checks(&ComplianceCheckFilter::default())
            .await
            .unwrap();
        assert!(!views[0].is_overdue);

        clock.advance(Duration::days(2));
        let views = service
            .list_checks(&ComplianceCheckFilter::default())
            .await
            .unwrap();
        assert!(views[0].is_overdue);
    }

    #[tokio::test]
    async fn update_without_status_never_transitions() {
        let (service, _) = setup();
        let check = service.record_check(check_input()).await.unwrap();

        let updated = service
            .update_check(
                check.id,
                UpdateCheckInput {
                    risk_rating: Some(RiskRating::High),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.compliance_status, ComplianceStatus::PendingReview);
        assert_eq!(updated.risk_rating, RiskRating::High);
    }

    #[tokio::test]
    async fn update_missing_check_is_not_found() {
        let (service, _) = setup();
        let result = service
            .update_check(CheckId::new(), UpdateCheckInput::default())
            .await;
        assert!(matches!(result, Err(WorkflowError::CheckNotFound(_))));
    }

    #[tokio::test]
    async fn explicit_status_patch_applies() {
        let (service, _) = setup();
        let check = service.record_check(check_input()).await.unwrap();

        let updated = service
            .update_check(
                check.id,
                UpdateCheckInput {
                    compliance_status: Some(ComplianceStatus::Compliant),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.compliance_status, ComplianceStatus::Compliant);
    }

    #[tokio::test]
    async fn filter_checks_by_status_and_risk() {
        let (service, _) = setup();
        service.record_check(check_input()).await.unwrap();
        let mut high = check_input();
        high.risk_rating = RiskRating::Critical;
        high.compliance_status = Some(ComplianceStatus::NonCompliant);
        service.record_check(high).await.unwrap();

        let filter = ComplianceCheckFilter {
            risk_rating: Some(RiskRating::Critical),
            ..Default::default()
        };
        let views = service.list_checks(&filter).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(
            views[0].check.compliance_status,
            ComplianceStatus::NonCompliant
        );
    }

    #[tokio::test]
    async fn fca_days_until_due_goes_negative() {
        let (service, clock) = setup();
        service
            .record_fca_event(RecordFcaEventInput {
                event_type: "late_claim_report".to_string(),
                severity: FcaSeverity::High,
                description: "Claim report filed past the statutory window".to_string(),
                occurred_date: t0(),
                due_date: t0() + Duration::days(5),
                project_id: None,
                user_id: None,
            })
            .await
            .unwrap();

        let views = service
            .list_fca_events(&FcaEventFilter::default())
            .await
            .unwrap();
        assert_eq!(views[0].days_until_due, 5);

        clock.advance(Duration::days(8));
        let views = service
            .list_fca_events(&FcaEventFilter::default())
            .await
            .unwrap();
        assert_eq!(views[0].days_until_due, -3);
    }

    #[tokio::test]
    async fn fca_status_updates_are_free_form() {
        let (service, _) = setup();
        let event = service
            .record_fca_event(RecordFcaEventInput {
                event_type: "breach_notification".to_string(),
                severity: FcaSeverity::Critical,
                description: "Customer data exposure".to_string(),
                occurred_date: t0(),
                due_date: t0() + Duration::days(30),
                project_id: None,
                user_id: None,
            })
            .await
            .unwrap();
        assert_eq!(event.status, FcaStatus::Open);

        // Closed straight from open; no ordering enforced.
        let updated = service
            .update_fca_event(
                event.id,
                UpdateFcaEventInput {
                    status: Some(FcaStatus::Closed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, FcaStatus::Closed);

        // And back again.
        let reopened = service
            .update_fca_event(
                event.id,
                UpdateFcaEventInput {
                    status: Some(FcaStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(reopened.status, FcaStatus::InProgress);
    }

    #[tokio::test]
    async fn update_missing_fca_event_is_not_found() {
        let (service, _) = setup();
        let result = service
            .update_fca_event(FcaEventId::new(), UpdateFcaEventInput::default())
            .await;
        assert!(matches!(result, Err(WorkflowError::FcaEventNotFound(_))));
    }
}
