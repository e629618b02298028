//! Need-request domain model.
//!
//! A need-request is a declared requirement (category + target quantity)
//! posted by a verified organization. Requests are never deleted, only
//! status-transitioned, so historical fulfillment figures stay
//! reproducible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed category enumeration shared by requests and donations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    Food,
    Clothing,
    Medical,
    Education,
    Other,
}

impl ResourceCategory {
    /// Human-readable label, used in notification text.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceCategory::Food => "food",
            ResourceCategory::Clothing => "clothing",
            ResourceCategory::Medical => "medical",
            ResourceCategory::Education => "education",
            ResourceCategory::Other => "other",
        }
    }
}

/// Informational urgency level; does not affect fulfillment computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

/// Lifecycle status of a need-request. Transitions are externally driven
/// (an administrator marks a request fulfilled or rejected); the ledger
/// itself never infers them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Fulfilled,
    Rejected,
}

/// Per-category request attributes.
///
/// Each category carries its own fields, so the payload is a tagged union
/// rather than one flat record of optionals: the variant *is* the
/// category, which makes a category/details mismatch unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "category")]
pub enum RequestDetails {
    Food {
        /// People the requested quantity is meant to feed.
        beneficiaries: u32,
        /// Whether perishable goods can be accepted.
        perishable_ok: bool,
        dietary_notes: Option<String>,
    },
    Clothing {
        /// Target age group, e.g. `children`, `adults`, `elderly`.
        age_group: String,
        /// Season the clothing is needed for, e.g. `winter`.
        season: Option<String>,
    },
    Medical {
        /// Named item or supply class, e.g. `insulin`, `first-aid kits`.
        item_name: String,
        prescription_required: bool,
    },
    Education {
        /// School level the material targets, e.g. `primary`.
        grade_level: String,
        subject: Option<String>,
    },
    Other {
        summary: Option<String>,
    },
}

impl RequestDetails {
    /// The category this details payload belongs to.
    pub fn category(&self) -> ResourceCategory {
        match self {
            RequestDetails::Food { .. } => ResourceCategory::Food,
            RequestDetails::Clothing { .. } => ResourceCategory::Clothing,
            RequestDetails::Medical { .. } => ResourceCategory::Medical,
            RequestDetails::Education { .. } => ResourceCategory::Education,
            RequestDetails::Other { .. } => ResourceCategory::Other,
        }
    }
}

/// A declared need posted by a verified organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeedRequest {
    pub id: Uuid,
    /// Opaque external identity of the owning organization.
    pub organization_id: String,
    /// Target quantity; unit-less (the unit is category-defined, e.g. kg
    /// of food or item count). Always positive.
    pub required_quantity: u64,
    pub urgency: UrgencyLevel,
    pub description: String,
    /// Optional deadline the organization needs the quantity by.
    pub needed_by: Option<DateTime<Utc>>,
    pub details: RequestDetails,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NeedRequest {
    /// Category, derived from the details payload.
    pub fn category(&self) -> ResourceCategory {
        self.details.category()
    }
}

/// Fields required to create a new need-request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNeedRequest {
    pub organization_id: String,
    pub required_quantity: u64,
    pub urgency: UrgencyLevel,
    pub description: String,
    pub needed_by: Option<DateTime<Utc>>,
    pub details: RequestDetails,
}
