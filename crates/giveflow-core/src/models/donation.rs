//! Donation domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::request::ResourceCategory;

/// A donor-submitted item/quantity.
///
/// A donation starts unassigned. An assignment later earmarks it for an
/// organization and, optionally, for one of that organization's
/// need-requests. The assignment fields are set at most once: a second
/// assignment attempt is a conflict, never an overwrite, so two
/// organizations can never both believe they received the same item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,
    /// Opaque external identity of the donor.
    pub donor_id: String,
    pub category: ResourceCategory,
    /// Donated quantity; unit-less, positive, immutable after creation.
    pub quantity: u64,
    /// Set when the donation is assigned to an organization.
    pub assigned_organization_id: Option<String>,
    /// Set only when the donation is earmarked against a specific
    /// need-request. Implies `assigned_organization_id` is set and that
    /// the request belongs to that organization.
    pub assigned_request_id: Option<Uuid>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Donation {
    pub fn is_assigned(&self) -> bool {
        self.assigned_organization_id.is_some()
    }
}

/// Fields required to record a new (unassigned) donation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDonation {
    pub donor_id: String,
    pub category: ResourceCategory,
    pub quantity: u64,
}
