//! Per-document approval gate.
//!
//! A single-stage workflow keyed to a required authority level derived from
//! the document type: `pending -> approved | rejected`, no expiry, no
//! escalation. The stored required level is an advisory cache; enforcement
//! always recomputes it from the document type.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{Result, WorkflowError};
use crate::events::{publish_best_effort, EventSink, DOCUMENT_APPROVED, DOCUMENT_REJECTED};
use crate::types::{AuthorityLevel, DocumentApprovalStatus, DocumentId, VisibilityLevel};

// ============================================================================
// Authority Policy
// ============================================================================

/// The authority tier required to sign off a document of the given type.
///
/// | document type                     | level      |
/// |-----------------------------------|------------|
/// | Contract, Quote                   | manager    |
/// | Invoice                           | finance    |
/// | Policy Document, Claims Document  | director   |
/// | Certificate, Technical Drawing    | specialist |
/// | anything else                     | standard   |
pub fn required_approval_level(document_type: &str) -> AuthorityLevel {
    match document_type.to_lowercase().as_str() {
        "contract" | "quote" => AuthorityLevel::Manager,
        "invoice" => AuthorityLevel::Finance,
        "policy document" | "claims document" => AuthorityLevel::Director,
        "certificate" | "technical drawing" => AuthorityLevel::Specialist,
        _ => AuthorityLevel::Standard,
    }
}

/// Whether an actor at `held` may decide a document requiring `required`.
///
/// Tiers are not a hierarchy; an exact match admits, and the director tier
/// admits everywhere.
fn admits(held: AuthorityLevel, required: AuthorityLevel) -> bool {
    held == required || held == AuthorityLevel::Director || required == AuthorityLevel::Standard
}

// ============================================================================
// Domain Types
// ============================================================================

/// The acting user at the gate: opaque id plus the authority tier the
/// upstream identity provider vouches for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DocumentActor {
    /// Opaque user id.
    pub id: Uuid,
    /// Authority tier held by the user.
    pub authority_level: AuthorityLevel,
}

/// Approval state carried 1:1 with a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentApproval {
    /// The document this record belongs to.
    pub document_id: DocumentId,
    /// Document type classification, source of the required level.
    pub document_type: String,
    /// Free-form stage label shown in the dashboard.
    pub workflow_stage: String,
    /// Gate status.
    pub approval_status: DocumentApprovalStatus,
    /// Who may see the document once approved.
    pub visibility_level: VisibilityLevel,
    /// Advisory cache of [`required_approval_level`]; never authoritative.
    pub approval_level_required: AuthorityLevel,
    /// User who submitted the document for approval.
    pub submitted_by: Uuid,
    /// Deciding actor, once approved or rejected.
    pub decided_by: Option<Uuid>,
    /// Set exactly when the gate rejects.
    pub rejection_reason: Option<String>,
    /// Associated project, if any.
    pub project_id: Option<Uuid>,
    /// Submission instant.
    pub submitted_at: DateTime<Utc>,
    /// Decision instant, once decided.
    pub decided_at: Option<DateTime<Utc>>,
}

/// Input for submitting a document to the gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitDocumentInput {
    /// The document to gate.
    pub document_id: DocumentId,
    /// Document type classification.
    pub document_type: String,
    /// Stage label.
    #[serde(default)]
    pub workflow_stage: Option<String>,
    /// Initial visibility.
    #[serde(default)]
    pub visibility_level: VisibilityLevel,
    /// Submitting user.
    pub submitted_by: Uuid,
    /// Associated project, if any.
    pub project_id: Option<Uuid>,
}

// ============================================================================
// Store Trait
// ============================================================================

/// Trait for document approval storage backends.
#[async_trait::async_trait]
pub trait DocumentApprovalStore: Send + Sync {
    /// Get the gate record for a document.
    async fn get(&self, id: DocumentId) -> Result<Option<DocumentApproval>>;

    /// Insert or replace the gate record for a document.
    async fn put(&self, record: DocumentApproval) -> Result<()>;
}

/// In-memory document approval store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentApprovalStore {
    records: Arc<RwLock<HashMap<Uuid, DocumentApproval>>>,
}

impl InMemoryDocumentApprovalStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentApprovalStore for InMemoryDocumentApprovalStore {
    async fn get(&self, id: DocumentId) -> Result<Option<DocumentApproval>> {
        let records = self.records.read().await;
        Ok(records.get(&id.into_inner()).cloned())
    }

    async fn put(&self, record: DocumentApproval) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.document_id.into_inner(), record);
        Ok(())
    }
}

// ============================================================================
// Service
// ============================================================================

/// Service enforcing the document approval gate.
pub struct DocumentApprovalService {
    store: Arc<dyn DocumentApprovalStore>,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
}

impl DocumentApprovalService {
    /// Create a new gate service.
    pub fn new(
        store: Arc<dyn DocumentApprovalStore>,
        sink: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, sink, clock }
    }

    /// Register a document at the gate. Documents whose type requires only
    /// the standard tier are auto-approved at submission.
    pub async fn submit(&self, input: SubmitDocumentInput) -> Result<DocumentApproval> {
        if input.document_type.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "document type must not be empty".into(),
            ));
        }

        let required = required_approval_level(&input.document_type);
        let status = if required == AuthorityLevel::Standard {
            DocumentApprovalStatus::AutoApproved
        } else {
            DocumentApprovalStatus::Pending
        };

        let record = DocumentApproval {
            document_id: input.document_id,
            document_type: input.document_type,
            workflow_stage: input
                .workflow_stage
                .unwrap_or_else(|| "review".to_string()),
            approval_status: status,
            visibility_level: input.visibility_level,
            approval_level_required: required,
            submitted_by: input.submitted_by,
            decided_by: None,
            rejection_reason: None,
            project_id: input.project_id,
            submitted_at: self.clock.now(),
            decided_at: None,
        };

        self.store.put(record.clone()).await?;
        tracing::info!(
            document_id = %record.document_id,
            required = %required,
            status = %record.approval_status,
            "document submitted to approval gate"
        );
        Ok(record)
    }

    /// Approve a pending document. The actor's authority tier must admit the
    /// level recomputed from the document type; an optional visibility change
    /// is applied as metadata on approval.
    pub async fn approve(
        &self,
        document_id: DocumentId,
        actor: DocumentActor,
        visibility: Option<VisibilityLevel>,
    ) -> Result<DocumentApproval> {
        let mut record = self.load_pending(document_id, actor).await?;

        record.approval_status = DocumentApprovalStatus::Approved;
        record.decided_by = Some(actor.id);
        record.decided_at = Some(self.clock.now());
        if let Some(visibility) = visibility {
            record.visibility_level = visibility;
        }

        self.store.put(record.clone()).await?;
        tracing::info!(document_id = %document_id, actor_id = %actor.id, "document approved");
        publish_best_effort(
            self.sink.as_ref(),
            self.clock.as_ref(),
            DOCUMENT_APPROVED,
            serde_json::json!({ "document_id": document_id, "approved_by": actor.id }),
        )
        .await;

        Ok(record)
    }

    /// Reject a pending document with a mandatory reason.
    pub async fn reject(
        &self,
        document_id: DocumentId,
        actor: DocumentActor,
        reason: &str,
    ) -> Result<DocumentApproval> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "a rejection reason is required".into(),
            ));
        }

        let mut record = self.load_pending(document_id, actor).await?;

        record.approval_status = DocumentApprovalStatus::Rejected;
        record.decided_by = Some(actor.id);
        record.decided_at = Some(self.clock.now());
        record.rejection_reason = Some(reason.to_string());

        self.store.put(record.clone()).await?;
        tracing::info!(document_id = %document_id, actor_id = %actor.id, "document rejected");
        publish_best_effort(
            self.sink.as_ref(),
            self.clock.as_ref(),
            DOCUMENT_REJECTED,
            serde_json::json!({ "document_id": document_id, "rejected_by": actor.id }),
        )
        .await;

        Ok(record)
    }

    /// Get the gate record for a document.
    pub async fn get(&self, document_id: DocumentId) -> Result<DocumentApproval> {
        self.store
            .get(document_id)
            .await?
            .ok_or(WorkflowError::DocumentNotFound(document_id))
    }

    /// Fetch the record and check the shared decision preconditions.
    async fn load_pending(
        &self,
        document_id: DocumentId,
        actor: DocumentActor,
    ) -> Result<DocumentApproval> {
        let record = self
            .store
            .get(document_id)
            .await?
            .ok_or(WorkflowError::DocumentNotFound(document_id))?;

        if record.approval_status != DocumentApprovalStatus::Pending {
            return Err(WorkflowError::DocumentInvalidState {
                status: record.approval_status,
            });
        }

        // Recompute; the stored level is advisory only.
        let required = required_approval_level(&record.document_type);
        if !admits(actor.authority_level, required) {
            return Err(WorkflowError::Unauthorized {
                actor_id: actor.id,
                reason: format!(
                    "requires {required} authority, actor holds {}",
                    actor.authority_level
                ),
            });
        }

        Ok(record)
    }
}

// ============================================================================
// Tests
// ============================================================================
