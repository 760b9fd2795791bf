//! Type definitions for the workflow domain.
//!
//! Includes newtype wrappers for IDs and enums for domain values.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ID Types (Newtype Pattern)
// ============================================================================

/// Unique identifier for an approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Create a new random RequestId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID.
    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<RequestId> for Uuid {
    fn from(id: RequestId) -> Self {
        id.0
    }
}

/// Unique identifier for a document under approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    /// Create a new random DocumentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID.
    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<DocumentId> for Uuid {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

/// Unique identifier for a compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckId(pub Uuid);

impl CheckId {
    /// Create a new random CheckId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID.
    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for CheckId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CheckId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<CheckId> for Uuid {
    fn from(id: CheckId) -> Self {
        id.0
    }
}

/// Unique identifier for a regulatory (FCA) reporting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FcaEventId(pub Uuid);

impl FcaEventId {
    /// Create a new random FcaEventId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID.
    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for FcaEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FcaEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for FcaEventId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<FcaEventId> for Uuid {
    fn from(id: FcaEventId) -> Self {
        id.0
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Urgency tier of an approval request. Drives the expiry window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Low urgency; widest approval window.
    Low,
    /// Normal urgency.
    #[default]
    Normal,
    /// High urgency.
    High,
    /// Urgent; shortest approval window.
    Urgent,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Normal => write!(f, "normal"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(format!("unknown urgency: {other}")),
        }
    }
}

/// Lifecycle status of an approval request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved by an approver (terminal).
    Approved,
    /// Rejected by an approver (terminal).
    Rejected,
    /// Escalated; still actionable by approvers.
    Escalated,
    /// Deadline passed without a decision (terminal).
    Expired,
}

impl RequestStatus {
    /// Whether the status admits no further approve/reject transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Expired)
    }

    /// Whether an approve/reject decision may still be taken.
    pub fn is_actionable(self) -> bool {
        matches!(self, Self::Pending | Self::Escalated)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Escalated => write!(f, "escalated"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "escalated" => Ok(Self::Escalated),
            "expired" => Ok(Self::Expired),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// Coarse authority tier gating document approvals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorityLevel {
    /// Baseline tier; documents at this tier auto-approve.
    #[default]
    Standard,
    /// Line management sign-off.
    Manager,
    /// Finance sign-off.
    Finance,
    /// Director sign-off; admits any document.
    Director,
    /// Technical specialist sign-off.
    Specialist,
}

impl fmt::Display for AuthorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Manager => write!(f, "manager"),
            Self::Finance => write!(f, "finance"),
            Self::Director => write!(f, "director"),
            Self::Specialist => write!(f, "specialist"),
        }
    }
}

impl std::str::FromStr for AuthorityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "manager" => Ok(Self::Manager),
            "finance" => Ok(Self::Finance),
            "director" => Ok(Self::Director),
            "specialist" => Ok(Self::Specialist),
            other => Err(format!("unknown authority level: {other}")),
        }
    }
}

/// Status of a per-document approval gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentApprovalStatus {
    /// Awaiting sign-off.
    Pending,
    /// Signed off.
    Approved,
    /// Rejected with a reason.
    Rejected,
    /// Auto-approved at submission (standard tier).
    AutoApproved,
}

impl fmt::Display for DocumentApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::AutoApproved => write!(f, "auto_approved"),
        }
    }
}

/// Who may see a document once approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityLevel {
    /// Internal staff only.
    #[default]
    Internal,
    /// Internal staff and contractors.
    Contractors,
    /// Customers of the associated project.
    Customers,
    /// Publicly visible.
    Public,
}

impl fmt::Display for VisibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::Contractors => write!(f, "contractors"),
            Self::Customers => write!(f, "customers"),
            Self::Public => write!(f, "public"),
        }
    }
}

/// Outcome of a compliance check, always set explicitly by an assessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Assessed compliant.
    Compliant,
    /// Assessed non-compliant.
    NonCompliant,
    /// Recorded, awaiting review.
    #[default]
    PendingReview,
    /// Validity window has lapsed.
    Expired,
    /// Review in progress.
    UnderReview,
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compliant => write!(f, "compliant"),
            Self::NonCompliant => write!(f, "non_compliant"),
            Self::PendingReview => write!(f, "pending_review"),
            Self::Expired => write!(f, "expired"),
            Self::UnderReview => write!(f, "under_review"),
        }
    }
}

/// Risk rating attached to a compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskRating {
    /// Negligible risk.
    VeryLow,
    /// Low risk.
    #[default]
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
    /// Critical risk requiring immediate action.
    Critical,
}

impl fmt::Display for RiskRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VeryLow => write!(f, "very_low"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Severity of a regulatory reporting event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FcaSeverity {
    /// Low severity.
    #[default]
    Low,
    /// Medium severity.
    Medium,
    /// High severity.
    High,
    /// Critical severity.
    Critical,
}

impl fmt::Display for FcaSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Handling status of a regulatory reporting event.
///
/// Transitions are free-form updates; no ordering is engine-enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FcaStatus {
    /// Newly raised.
    #[default]
    Open,
    /// Being worked.
    InProgress,
    /// Remediated.
    Resolved,
    /// Closed out.
    Closed,
}

impl fmt::Display for FcaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Resolved => write!(f, "resolved"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_status_terminality() {
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(RequestStatus::Expired.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::Escalated.is_terminal());
    }

    #[test]
    fn actionable_statuses() {
        assert!(RequestStatus::Pending.is_actionable());
        assert!(RequestStatus::Escalated.is_actionable());
        assert!(!RequestStatus::Approved.is_actionable());
    }

    #[test]
    fn enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&DocumentApprovalStatus::AutoApproved).unwrap(),
            "\"auto_approved\""
        );
        assert_eq!(
            serde_json::to_string(&ComplianceStatus::NonCompliant).unwrap(),
            "\"non_compliant\""
        );
        assert_eq!(serde_json::to_string(&Urgency::Urgent).unwrap(), "\"urgent\"");
        assert_eq!(
            serde_json::to_string(&FcaStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }
}
