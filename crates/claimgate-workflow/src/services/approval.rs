//! Approval request lifecycle engine.
//!
//! Requests move one-directionally through
//! `pending -> approved | rejected | expired`, with escalation as a
//! side-channel flag. Expiry is evaluated lazily against the injected clock;
//! no background timer ever flips stored status. Mutations are
//! read-validate-write with an optimistic version check, retried a bounded
//! number of times on conflict.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{Result, WorkflowError};
use crate::events::{
    publish_best_effort, EventSink, REQUEST_APPROVED, REQUEST_CREATED, REQUEST_ESCALATED,
    REQUEST_REJECTED,
};
use crate::time_policy::approval_window;
use crate::types::{AuthorityLevel, RequestId, RequestStatus, Urgency};

/// Mutating operations retry this many times on a version conflict before
/// surfacing [`WorkflowError::Conflict`] to the caller.
const CONFLICT_RETRIES: u32 = 3;

// ============================================================================
// Domain Types
// ============================================================================

/// An approval request record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// Unique identifier.
    pub id: RequestId,
    /// Free-form classification, e.g. "cost_increase".
    pub request_type: String,
    /// What is being requested.
    pub description: String,
    /// Why it is being requested.
    pub justification: Option<String>,
    /// Monetary amount at stake, if any.
    pub amount: Option<Decimal>,
    /// Urgency tier; fixes the expiry window at creation.
    pub urgency: Urgency,
    /// Authority tier expected of the deciding approver.
    pub required_authority_level: AuthorityLevel,
    /// Users allowed to approve or reject. Never empty.
    pub approvers: Vec<Uuid>,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// User who raised the request.
    pub requested_by: Uuid,
    /// Deciding actor; set exactly when status is approved or rejected.
    pub approved_by: Option<Uuid>,
    /// Set exactly when status is rejected.
    pub rejection_reason: Option<String>,
    /// Escalation flag; true-once, never cleared.
    pub escalated: bool,
    /// When the latest escalation was raised.
    pub escalated_at: Option<DateTime<Utc>>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Fixed deadline: `created_at + approval_window(urgency)`. Immutable.
    pub expires_at: DateTime<Utc>,
    /// Associated project, if any.
    pub project_id: Option<Uuid>,
    /// Opaque metadata map; decision comments and escalation notes land here.
    pub metadata: serde_json::Value,
    /// Optimistic-concurrency version, bumped by every store update.
    pub version: u64,
}

impl ApprovalRequest {
    /// The status a reader should act on at `now`: a stored non-terminal
    /// status past the deadline reads as expired.
    pub fn effective_status(&self, now: DateTime<Utc>) -> RequestStatus {
        if !self.status.is_terminal() && now > self.expires_at {
            RequestStatus::Expired
        } else {
            self.status
        }
    }
}

/// Input for creating an approval request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApprovalRequestInput {
    /// Free-form classification.
    pub request_type: String,
    /// What is being requested. Must be non-blank.
    pub description: String,
    /// Why it is being requested.
    pub justification: Option<String>,
    /// Monetary amount at stake, if any.
    pub amount: Option<Decimal>,
    /// Urgency tier.
    #[serde(default)]
    pub urgency: Urgency,
    /// Authority tier expected of the deciding approver.
    #[serde(default)]
    pub required_authority_level: AuthorityLevel,
    /// Users allowed to decide. Must be non-empty.
    pub approvers: Vec<Uuid>,
    /// User raising the request.
    pub requested_by: Uuid,
    /// Associated project, if any.
    pub project_id: Option<Uuid>,
    /// Opaque metadata map.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Filter options for listing approval requests.
#[derive(Debug, Clone, Default)]
pub struct ApprovalRequestFilter {
    /// Match any of these stored statuses.
    pub statuses: Option<Vec<RequestStatus>>,
    /// Exact request type.
    pub request_type: Option<String>,
    /// Match any of these urgency tiers.
    pub urgencies: Option<Vec<Urgency>>,
    /// Associated project.
    pub project_id: Option<Uuid>,
    /// Requests decidable by this user.
    pub approver: Option<Uuid>,
    /// Case-insensitive substring over description and request type.
    pub search: Option<String>,
}

/// Read-only projection of a request with read-time expiry applied.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalRequestView {
    /// The underlying record, with `status` replaced by the effective status.
    #[serde(flatten)]
    pub request: ApprovalRequest,
    /// Whether the request reads as expired at the caller's `now`.
    pub is_expired: bool,
}

impl ApprovalRequestView {
    fn at(mut request: ApprovalRequest, now: DateTime<Utc>) -> Self {
        let effective = request.effective_status(now);
        let is_expired = effective == RequestStatus::Expired;
        request.status = effective;
        Self {
            request,
            is_expired,
        }
    }
}

// ============================================================================
// Store Trait
// ============================================================================

/// Trait for approval request storage backends.
///
/// Any adapter providing these operations with a version-checked `update` is
/// a sufficient persistence layer; the engine owns no schema.
#[async_trait::async_trait]
pub trait ApprovalRequestStore: Send + Sync {
    /// Get a request by ID.
    async fn get(&self, id: RequestId) -> Result<Option<ApprovalRequest>>;

    /// Insert a new request record.
    async fn insert(&self, record: ApprovalRequest) -> Result<()>;

    /// Replace a request record if the stored version matches
    /// `record.version`; bumps the version on success. Returns
    /// [`WorkflowError::Conflict`] on mismatch.
    async fn update(&self, record: ApprovalRequest) -> Result<ApprovalRequest>;

    /// Query records matching the filter, ordered by `created_at` descending.
    async fn query(&self, filter: &ApprovalRequestFilter) -> Result<Vec<ApprovalRequest>>;
}

// ============================================================================
// In-Memory Store
// ============================================================================

/// In-memory approval request store.
#[derive(Debug, Default)]
pub struct InMemoryApprovalRequestStore {
    records: Arc<RwLock<HashMap<Uuid, ApprovalRequest>>>,
}

impl InMemoryApprovalRequestStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(record: &ApprovalRequest, filter: &ApprovalRequestFilter) -> bool {
    if let Some(ref statuses) = filter.statuses {
        if !statuses.contains(&record.status) {
            return false;
        }
    }
    if let Some(ref request_type) = filter.request_type {
        if &record.request_type != request_type {
            return false;
        }
    }
    if let Some(ref urgencies) = filter.urgencies {
        if !urgencies.contains(&record.urgency) {
            return false;
        }
    }
    if let Some(project_id) = filter.project_id {
        if record.project_id != Some(project_id) {
            return false;
        }
    }
    if let Some(approver) = filter.approver {
        if !record.approvers.contains(&approver) {
            return false;
        }
    }
    if let Some(ref search) = filter.search {
        let needle = search.to_lowercase();
        if !record.description.to_lowercase().contains(&needle)
            && !record.request_type.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    true
}

#[async_trait::async_trait]
impl ApprovalRequestStore for InMemoryApprovalRequestStore {
    async fn get(&self, id: RequestId) -> Result<Option<ApprovalRequest>> {
        let records = self.records.read().await;
        Ok(records.get(&id.into_inner()).cloned())
    }

    async fn insert(&self, record: ApprovalRequest) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.id.into_inner(), record);
        Ok(())
    }

    async fn update(&self, mut record: ApprovalRequest) -> Result<ApprovalRequest> {
        let mut records = self.records.write().await;
        let stored = records
            .get(&record.id.into_inner())
            .ok_or(WorkflowError::RequestNotFound(record.id))?;

        if stored.version != record.version {
            return Err(WorkflowError::Conflict(record.id));
        }

        record.version += 1;
        records.insert(record.id.into_inner(), record.clone());
        Ok(record)
    }

    async fn query(&self, filter: &ApprovalRequestFilter) -> Result<Vec<ApprovalRequest>> {
        let records = self.records.read().await;
        let mut results: Vec<_> = records
            .values()
            .filter(|r| matches_filter(r, filter))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }
}

// ============================================================================
// Service
// ============================================================================

/// The approval workflow engine.
pub struct ApprovalWorkflowService {
    store: Arc<dyn ApprovalRequestStore>,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
}

impl ApprovalWorkflowService {
    /// Create a new engine over a store, event sink and clock.
    pub fn new(
        store: Arc<dyn ApprovalRequestStore>,
        sink: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, sink, clock }
    }

    /// Create an approval request.
    ///
    /// Requires a non-blank description and at least one approver. The expiry
    /// deadline is fixed here from the urgency tier and never changes.
    pub async fn create(&self, input: CreateApprovalRequestInput) -> Result<ApprovalRequest> {
        if input.description.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "description must not be empty".into(),
            ));
        }

        let mut approvers = input.approvers;
        let mut seen = std::collections::HashSet::new();
        approvers.retain(|id| seen.insert(*id));
        if approvers.is_empty() {
            return Err(WorkflowError::Validation(
                "at least one approver is required".into(),
            ));
        }

        // Decision comments and escalation notes are written into metadata
        // by key, so any non-object shape is rejected up front.
        let metadata = match input.metadata {
            Some(value) if value.is_object() => value,
            Some(_) => {
                return Err(WorkflowError::Validation(
                    "metadata must be a JSON object".into(),
                ))
            }
            None => serde_json::json!({}),
        };

        let now = self.clock.now();
        let request = ApprovalRequest {
            id: RequestId::new(),
            request_type: input.request_type,
            description: input.description,
            justification: input.justification,
            amount: input.amount,
            urgency: input.urgency,
            required_authority_level: input.required_authority_level,
            approvers,
            status: RequestStatus::Pending,
            requested_by: input.requested_by,
            approved_by: None,
            rejection_reason: None,
            escalated: false,
            escalated_at: None,
            created_at: now,
            expires_at: now + approval_window(input.urgency),
            project_id: input.project_id,
            metadata,
            version: 0,
        };

        self.store.insert(request.clone()).await?;
        tracing::info!(request_id = %request.id, urgency = %request.urgency, "approval request created");

        publish_best_effort(
            self.sink.as_ref(),
            self.clock.as_ref(),
            REQUEST_CREATED,
            serde_json::json!({
                "request_id": request.id,
                "requested_by": request.requested_by,
                "urgency": request.urgency,
                "expires_at": request.expires_at,
            }),
        )
        .await;

        Ok(request)
    }

    /// Approve a request. The actor must be one of its approvers and the
    /// request must still be actionable and inside its expiry window.
    pub async fn approve(
        &self,
        id: RequestId,
        actor_id: Uuid,
        comments: Option<String>,
    ) -> Result<ApprovalRequest> {
        let updated = self
            .mutate(id, |mut request, now| {
                Self::check_decidable(&request, actor_id, now)?;

                request.status = RequestStatus::Approved;
                request.approved_by = Some(actor_id);
                if let Some(ref comments) = comments {
                    request.metadata["approval_comments"] = serde_json::json!(comments);
                }
                Ok(request)
            })
            .await?;

        tracing::info!(request_id = %id, actor_id = %actor_id, "approval request approved");
        publish_best_effort(
            self.sink.as_ref(),
            self.clock.as_ref(),
            REQUEST_APPROVED,
            serde_json::json!({ "request_id": id, "approved_by": actor_id }),
        )
        .await;

        Ok(updated)
    }

    /// Reject a request with a mandatory reason. Same preconditions as
    /// [`approve`](Self::approve).
    pub async fn reject(
        &self,
        id: RequestId,
        actor_id: Uuid,
        reason: &str,
    ) -> Result<ApprovalRequest> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "a rejection reason is required".into(),
            ));
        }

        let reason = reason.to_string();
        let updated = self
            .mutate(id, |mut request, now| {
                Self::check_decidable(&request, actor_id, now)?;

                request.status = RequestStatus::Rejected;
                request.approved_by = Some(actor_id);
                request.rejection_reason = Some(reason.clone());
                Ok(request)
            })
            .await?;

        tracing::info!(request_id = %id, actor_id = %actor_id, "approval request rejected");
        publish_best_effort(
            self.sink.as_ref(),
            self.clock.as_ref(),
            REQUEST_REJECTED,
            serde_json::json!({ "request_id": id, "rejected_by": actor_id }),
        )
        .await;

        Ok(updated)
    }

    /// Escalate a request with a mandatory reason.
    ///
    /// Escalation is an override path: the actor need not be an approver, and
    /// the flag may be raised in any state, terminal included. It never
    /// changes the outcome; a pending request's status moves to `escalated`
    /// so approvers see it surfaced, anything else only gains the flag.
    /// Escalation does not extend the expiry window.
    pub async fn escalate(
        &self,
        id: RequestId,
        actor_id: Uuid,
        reason: &str,
    ) -> Result<ApprovalRequest> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "an escalation reason is required".into(),
            ));
        }

        let reason = reason.to_string();
        let updated = self
            .mutate(id, |mut request, now| {
                if request.effective_status(now) == RequestStatus::Pending {
                    request.status = RequestStatus::Escalated;
                }
                request.escalated = true;
                request.escalated_at = Some(now);
                request.metadata["escalation"] =
                    serde_json::json!({ "actor_id": actor_id, "reason": reason });
                Ok(request)
            })
            .await?;

        tracing::info!(request_id = %id, actor_id = %actor_id, "approval request escalated");
        publish_best_effort(
            self.sink.as_ref(),
            self.clock.as_ref(),
            REQUEST_ESCALATED,
            serde_json::json!({ "request_id": id, "escalated_by": actor_id }),
        )
        .await;

        Ok(updated)
    }

    /// Get one request as a read-time projection.
    pub async fn get(&self, id: RequestId) -> Result<ApprovalRequestView> {
        let request = self
            .store
            .get(id)
            .await?
            .ok_or(WorkflowError::RequestNotFound(id))?;
        Ok(ApprovalRequestView::at(request, self.clock.now()))
    }

    /// List requests matching a filter, newest first, with read-time expiry.
    pub async fn list(&self, filter: &ApprovalRequestFilter) -> Result<Vec<ApprovalRequestView>> {
        let now = self.clock.now();
        let records = self.store.query(filter).await?;
        Ok(records
            .into_iter()
            .map(|r| ApprovalRequestView::at(r, now))
            .collect())
    }

    /// All requests the given user can still decide: actionable status,
    /// inside the expiry window, user among the approvers.
    pub async fn list_pending_for(&self, user_id: Uuid) -> Result<Vec<ApprovalRequestView>> {
        let filter = ApprovalRequestFilter {
            statuses: Some(vec![RequestStatus::Pending, RequestStatus::Escalated]),
            approver: Some(user_id),
            ..Default::default()
        };
        let views = self.list(&filter).await?;
        Ok(views.into_iter().filter(|v| !v.is_expired).collect())
    }

    /// Shared approve/reject preconditions: exists (checked by the caller),
    /// actor among the approvers, not past deadline, still actionable.
    ///
    /// Membership is checked first: a non-approver gets `Unauthorized`
    /// whatever state the request is in, never a state or expiry error.
    fn check_decidable(
        request: &ApprovalRequest,
        actor_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if !request.approvers.contains(&actor_id) {
            return Err(WorkflowError::Unauthorized {
                actor_id,
                reason: "actor is not an approver of this request".into(),
            });
        }
        if !request.status.is_terminal() && now > request.expires_at {
            return Err(WorkflowError::Expired {
                expired_at: request.expires_at,
            });
        }
        if !request.status.is_actionable() {
            return Err(WorkflowError::InvalidState {
                status: request.status,
            });
        }
        Ok(())
    }

    /// Read-validate-write with a bounded retry on version conflict. The
    /// closure re-validates against a fresh read on every attempt.
    async fn mutate<F>(&self, id: RequestId, apply: F) -> Result<ApprovalRequest>
    where
        F: Fn(ApprovalRequest, DateTime<Utc>) -> Result<ApprovalRequest>,
    {
        let mut last_conflict = None;
        for _ in 0..CONFLICT_RETRIES {
            let request = self
                .store
                .get(id)
                .await?
                .ok_or(WorkflowError::RequestNotFound(id))?;

            let next = apply(request, self.clock.now())?;
            match self.store.update(next).await {
                Ok(updated) => return Ok(updated),
                Err(err) if err.is_conflict() => {
                    tracing::warn!(request_id = %id, "version conflict, retrying");
                    last_conflict = Some(err);
                }
                Err(err) => return Err(err),
            }
        }
        Err(last_conflict.unwrap_or(WorkflowError::Conflict(id)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::events::InMemoryEventSink;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        "2024-01-01T00:00:00Z".parse().unwrap()
    }

    fn setup() -> (
        ApprovalWorkflowService,
        Arc<InMemoryApprovalRequestStore>,
        Arc<InMemoryEventSink>,
        ManualClock,
    ) {
        let store = Arc::new(InMemoryApprovalRequestStore::new());
        let sink = Arc::new(InMemoryEventSink::new());
        let clock = ManualClock::new(t0());
        let service =
            ApprovalWorkflowService::new(store.clone(), sink.clone(), Arc::new(clock.clone()));
        (service, store, sink, clock)
    }

    fn input(urgency: Urgency, approvers: Vec<Uuid>) -> CreateApprovalRequestInput {
        CreateApprovalRequestInput {
            request_type: "cost_increase".to_string(),
            description: "Approve tile cost increase".to_string(),
            justification: Some("Supplier price change".to_string()),
            amount: Some(Decimal::new(125_000, 2)),
            urgency,
            required_authority_level: AuthorityLevel::Manager,
            approvers,
            requested_by: Uuid::new_v4(),
            project_id: None,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn create_fixes_deadline_from_urgency() {
        let (service, _, _, _) = setup();
        let request = service
            .create(input(Urgency::Urgent, vec![Uuid::new_v4()]))
            .await
            .unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.expires_at, t0() + Duration::hours(24));
    }

    #[tokio::test]
    async fn create_rejects_empty_approvers() {
        let (service, _, _, _) = setup();
        let result = service.create(input(Urgency::Normal, vec![])).await;
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
    }

    #[tokio::test]
    async fn create_rejects_blank_description() {
        let (service, _, _, _) = setup();
        let mut bad = input(Urgency::Normal, vec![Uuid::new_v4()]);
        bad.description = "   ".to_string();
        let result = service.create(bad).await;
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
    }

    #[tokio::test]
    async fn approve_inside_window() {
        let (service, _, sink, clock) = setup();
        let u1 = Uuid::new_v4();
        let u2 = Uuid::new_v4();
        let request = service
            .create(input(Urgency::Urgent, vec![u1, u2]))
            .await
            .unwrap();

        clock.advance(Duration::hours(12));
        let approved = service
            .approve(request.id, u1, Some("Looks fine".to_string()))
            .await
            .unwrap();

        assert_eq!(approved.status, RequestStatus::Approved);
        assert_eq!(approved.approved_by, Some(u1));
        assert_eq!(
            approved.metadata["approval_comments"],
            serde_json::json!("Looks fine")
        );
        assert_eq!(
            sink.names().await,
            vec![REQUEST_CREATED.to_string(), REQUEST_APPROVED.to_string()]
        );
    }

    #[tokio::test]
    async fn approve_after_deadline_fails_expired() {
        let (service, _, _, clock) = setup();
        let u1 = Uuid::new_v4();
        let request = service
            .create(input(Urgency::Urgent, vec![u1]))
            .await
            .unwrap();

        clock.advance(Duration::hours(25));
        let result = service.approve(request.id, u1, None).await;
        assert!(matches!(result, Err(WorkflowError::Expired { expired_at })
            if expired_at == t0() + Duration::hours(24)));
    }

    #[tokio::test]
    async fn second_approval_is_invalid_state() {
        let (service, _, _, _) = setup();
        let u1 = Uuid::new_v4();
        let u2 = Uuid::new_v4();
        let request = service
            .create(input(Urgency::Urgent, vec![u1, u2]))
            .await
            .unwrap();

        service.approve(request.id, u1, None).await.unwrap();
        let result = service.approve(request.id, u2, None).await;
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidState {
                status: RequestStatus::Approved
            })
        ));
    }

    #[tokio::test]
    async fn approve_by_non_approver_is_unauthorized() {
        let (service, _, _, _) = setup();
        let request = service
            .create(input(Urgency::Normal, vec![Uuid::new_v4()]))
            .await
            .unwrap();

        let stranger = Uuid::new_v4();
        let result = service.approve(request.id, stranger, None).await;
        assert!(matches!(
            result,
            Err(WorkflowError::Unauthorized { actor_id, .. }) if actor_id == stranger
        ));
    }

    #[tokio::test]
    async fn non_approver_is_unauthorized_on_terminal_requests() {
        let (service, _, _, clock) = setup();
        let u1 = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let approved = service
            .create(input(Urgency::Urgent, vec![u1]))
            .await
            .unwrap();
        let rejected = service
            .create(input(Urgency::Urgent, vec![u1]))
            .await
            .unwrap();
        let lapsing = service
            .create(input(Urgency::Urgent, vec![u1]))
            .await
            .unwrap();

        service.approve(approved.id, u1, None).await.unwrap();
        service.reject(rejected.id, u1, "no").await.unwrap();
        clock.advance(Duration::hours(25));

        // Membership is checked before state or deadline: the stranger is
        // told "unauthorized" for every one of them.
        for id in [approved.id, rejected.id, lapsing.id] {
            let result = service.approve(id, stranger, None).await;
            assert!(matches!(
                result,
                Err(WorkflowError::Unauthorized { actor_id, .. }) if actor_id == stranger
            ));
        }
    }

    #[tokio::test]
    async fn create_rejects_non_object_metadata() {
        let (service, _, _, _) = setup();
        let mut bad = input(Urgency::Normal, vec![Uuid::new_v4()]);
        bad.metadata = Some(serde_json::json!([1, 2, 3]));
        let result = service.create(bad).await;
        assert!(matches!(result, Err(WorkflowError::Validation(_))));

        let mut bad = input(Urgency::Normal, vec![Uuid::new_v4()]);
        bad.metadata = Some(serde_json::json!("free text"));
        let result = service.create(bad).await;
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
    }

    #[tokio::test]
    async fn caller_metadata_survives_decision_comments() {
        let (service, _, _, _) = setup();
        let u1 = Uuid::new_v4();
        let mut with_meta = input(Urgency::Normal, vec![u1]);
        with_meta.metadata = Some(serde_json::json!({ "claim_ref": "CLM-104" }));

        let request = service.create(with_meta).await.unwrap();
        let approved = service
            .approve(request.id, u1, Some("checked against the claim".to_string()))
            .await
            .unwrap();

        assert_eq!(approved.metadata["claim_ref"], serde_json::json!("CLM-104"));
        assert_eq!(
            approved.metadata["approval_comments"],
            serde_json::json!("checked against the claim")
        );
    }

    #[tokio::test]
    async fn reject_requires_reason() {
        let (service, _, _, _) = setup();
        let u1 = Uuid::new_v4();
        let request = service
            .create(input(Urgency::Normal, vec![u1]))
            .await
            .unwrap();

        let result = service.reject(request.id, u1, "   ").await;
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
    }

    #[tokio::test]
    async fn reject_sets_reason_and_decider() {
        let (service, _, _, clock) = setup();
        let u1 = Uuid::new_v4();
        let u2 = Uuid::new_v4();
        let request = service
            .create(input(Urgency::Urgent, vec![u1, u2]))
            .await
            .unwrap();

        clock.advance(Duration::hours(1));
        let rejected = service
            .reject(request.id, u2, "Budget exceeded")
            .await
            .unwrap();

        assert_eq!(rejected.status, RequestStatus::Rejected);
        assert_eq!(rejected.approved_by, Some(u2));
        assert_eq!(rejected.rejection_reason, Some("Budget exceeded".to_string()));
    }

    #[tokio::test]
    async fn escalate_moves_pending_to_escalated() {
        let (service, _, _, _) = setup();
        let u1 = Uuid::new_v4();
        let request = service
            .create(input(Urgency::Normal, vec![u1]))
            .await
            .unwrap();

        let outsider = Uuid::new_v4();
        let escalated = service
            .escalate(request.id, outsider, "No response from approvers")
            .await
            .unwrap();

        assert!(escalated.escalated);
        assert_eq!(escalated.status, RequestStatus::Escalated);
        assert_eq!(escalated.escalated_at, Some(t0()));

        // Still decidable after escalation.
        let approved = service.approve(request.id, u1, None).await.unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);
    }

    #[tokio::test]
    async fn escalate_twice_keeps_one_flag_latest_timestamp() {
        let (service, _, _, clock) = setup();
        let request = service
            .create(input(Urgency::Normal, vec![Uuid::new_v4()]))
            .await
            .unwrap();

        let actor = Uuid::new_v4();
        service.escalate(request.id, actor, "first").await.unwrap();
        clock.advance(Duration::hours(2));
        let second = service.escalate(request.id, actor, "second").await.unwrap();

        assert!(second.escalated);
        assert_eq!(second.escalated_at, Some(t0() + Duration::hours(2)));
    }

    #[tokio::test]
    async fn escalate_on_rejected_request_still_succeeds() {
        let (service, _, _, _) = setup();
        let u1 = Uuid::new_v4();
        let request = service
            .create(input(Urgency::Normal, vec![u1]))
            .await
            .unwrap();

        service.reject(request.id, u1, "Budget exceeded").await.unwrap();
        let escalated = service
            .escalate(request.id, Uuid::new_v4(), "disputed")
            .await
            .unwrap();

        // Flag is raised; the terminal outcome is untouched.
        assert!(escalated.escalated);
        assert_eq!(escalated.status, RequestStatus::Rejected);
    }

    #[tokio::test]
    async fn escalation_does_not_extend_the_window() {
        let (service, _, _, clock) = setup();
        let u1 = Uuid::new_v4();
        let request = service
            .create(input(Urgency::Urgent, vec![u1]))
            .await
            .unwrap();

        service
            .escalate(request.id, Uuid::new_v4(), "urgent attention")
            .await
            .unwrap();

        clock.advance(Duration::hours(25));
        let result = service.approve(request.id, u1, None).await;
        assert!(matches!(result, Err(WorkflowError::Expired { .. })));
    }

    #[tokio::test]
    async fn list_round_trip_after_create() {
        let (service, _, _, _) = setup();
        let request = service
            .create(input(Urgency::Normal, vec![Uuid::new_v4()]))
            .await
            .unwrap();

        let filter = ApprovalRequestFilter {
            statuses: Some(vec![RequestStatus::Pending]),
            ..Default::default()
        };
        let views = service.list(&filter).await.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].request.id, request.id);
        assert!(!views[0].is_expired);
    }

    #[tokio::test]
    async fn list_applies_read_time_expiry() {
        let (service, _, _, clock) = setup();
        service
            .create(input(Urgency::Urgent, vec![Uuid::new_v4()]))
            .await
            .unwrap();

        clock.advance(Duration::days(2));
        let views = service.list(&ApprovalRequestFilter::default()).await.unwrap();

        assert_eq!(views.len(), 1);
        assert!(views[0].is_expired);
        assert_eq!(views[0].request.status, RequestStatus::Expired);
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let (service, _, _, clock) = setup();
        let first = service
            .create(input(Urgency::Normal, vec![Uuid::new_v4()]))
            .await
            .unwrap();
        clock.advance(Duration::hours(1));
        let second = service
            .create(input(Urgency::Normal, vec![Uuid::new_v4()]))
            .await
            .unwrap();

        let views = service.list(&ApprovalRequestFilter::default()).await.unwrap();
        assert_eq!(views[0].request.id, second.id);
        assert_eq!(views[1].request.id, first.id);
    }

    #[tokio::test]
    async fn list_pending_for_scopes_to_approver() {
        let (service, _, _, clock) = setup();
        let u1 = Uuid::new_v4();
        let u2 = Uuid::new_v4();

        let mine = service
            .create(input(Urgency::Normal, vec![u1]))
            .await
            .unwrap();
        service
            .create(input(Urgency::Normal, vec![u2]))
            .await
            .unwrap();
        // Expired request for u1 must not show up.
        service
            .create(input(Urgency::Urgent, vec![u1]))
            .await
            .unwrap();
        clock.advance(Duration::days(2));

        let pending = service.list_pending_for(u1).await.unwrap();
        // Normal urgency (7 days) is still open at day 2; urgent has lapsed.
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].request.id, mine.id);
    }

    #[tokio::test]
    async fn search_matches_description() {
        let (service, _, _, _) = setup();
        service
            .create(input(Urgency::Normal, vec![Uuid::new_v4()]))
            .await
            .unwrap();

        let filter = ApprovalRequestFilter {
            search: Some("tile cost".to_string()),
            ..Default::default()
        };
        assert_eq!(service.list(&filter).await.unwrap().len(), 1);

        let filter = ApprovalRequestFilter {
            search: Some("unrelated".to_string()),
            ..Default::default()
        };
        assert!(service.list(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn approve_missing_request_is_not_found() {
        let (service, _, _, _) = setup();
        let result = service
            .approve(RequestId::new(), Uuid::new_v4(), None)
            .await;
        assert!(matches!(result, Err(WorkflowError::RequestNotFound(_))));
    }

    #[tokio::test]
    async fn store_update_detects_stale_version() {
        let (service, store, _, _) = setup();
        let request = service
            .create(input(Urgency::Normal, vec![Uuid::new_v4()]))
            .await
            .unwrap();

        // Two readers hold version 0; the second write must conflict.
        let fresh = store.get(request.id).await.unwrap().unwrap();
        let stale = fresh.clone();
        store.update(fresh).await.unwrap();
        let result = store.update(stale).await;
        assert!(matches!(result, Err(WorkflowError::Conflict(_))));
    }
}
