//! Organization verification domain model.
//!
//! An organization (NGO or trust) is known to GiveFlow only through its
//! verification records. The organization identity itself is an opaque
//! string issued by the external identity provider; GiveFlow never
//! interprets or re-validates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a stored verification record.
///
/// The absent-record ("unregistered") state is implicit: it is derived by
/// the verification service from the lack of any record, not stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

/// The kind of evidence document attached to a registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    RegistrationCertificate,
    AddressProof,
    IdentityProof,
}

impl DocumentKind {
    /// Human-readable label, used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::RegistrationCertificate => "registration certificate",
            DocumentKind::AddressProof => "address proof",
            DocumentKind::IdentityProof => "identity proof",
        }
    }
}

/// Reference to an uploaded evidence document.
///
/// The URI is an opaque handle into the external blob store; GiveFlow
/// stores it without fetching or interpreting the content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentRef {
    pub kind: DocumentKind,
    pub uri: String,
}

/// One verification record for an organization.
///
/// Records are append-only history: a re-submission after rejection
/// creates a fresh record rather than mutating the rejected one, and no
/// record is ever hard-deleted. At most one record per organization is
/// "active", namely the most recently submitted one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub id: Uuid,
    /// Opaque external organization identity.
    pub organization_id: String,
    pub organization_name: String,
    /// Government registration number of the NGO/trust.
    pub registration_number: String,
    pub city: String,
    pub state: String,
    pub documents: Vec<DocumentRef>,
    pub status: VerificationStatus,
    /// Reviewer who decided this record (approve or reject).
    pub decided_by: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    /// Reason supplied on rejection; `None` for pending/approved records.
    pub rejection_reason: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when an organization submits a registration.
///
/// The resulting record always starts as [`VerificationStatus::Pending`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVerificationRecord {
    pub organization_id: String,
    pub organization_name: String,
    pub registration_number: String,
    pub city: String,
    pub state: String,
    pub documents: Vec<DocumentRef>,
}

/// An administrator's decision on a pending record.
#[derive(Debug, Clone)]
pub enum VerificationDecision {
    Approve {
        reviewer_id: String,
    },
    Reject {
        reviewer_id: String,
        reason: String,
    },
}

impl VerificationDecision {
    /// The status this decision moves the record to.
    pub fn status(&self) -> VerificationStatus {
        match self {
            VerificationDecision::Approve { .. } => VerificationStatus::Approved,
            VerificationDecision::Reject { .. } => VerificationStatus::Rejected,
        }
    }

    pub fn reviewer_id(&self) -> &str {
        match self {
            VerificationDecision::Approve { reviewer_id }
            | VerificationDecision::Reject { reviewer_id, .. } => reviewer_id,
        }
    }
}
