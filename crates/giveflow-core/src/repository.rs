//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Organization- and donor-scoped
//! queries take the opaque external identity string issued by the
//! identity provider.

use uuid::Uuid;

use crate::error::GiveFlowResult;
use crate::models::donation::{CreateDonation, Donation};
use crate::models::organization::{
    CreateVerificationRecord, VerificationDecision, VerificationRecord,
};
use crate::models::request::{CreateNeedRequest, NeedRequest, RequestStatus};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Verification records
// ---------------------------------------------------------------------------

pub trait VerificationRepository: Send + Sync {
    /// Persist a fresh `Pending` record. Never overwrites earlier
    /// records for the same organization.
    fn create(
        &self,
        input: CreateVerificationRecord,
    ) -> impl Future<Output = GiveFlowResult<VerificationRecord>> + Send;

    /// The most recently submitted record for an organization, or `None`
    /// if it has never submitted one (the implicit unregistered state).
    fn latest_for_organization(
        &self,
        organization_id: &str,
    ) -> impl Future<Output = GiveFlowResult<Option<VerificationRecord>>> + Send;

    /// Full submission history for an organization, oldest first.
    /// Rejected records are retained here for audit.
    fn history_for_organization(
        &self,
        organization_id: &str,
    ) -> impl Future<Output = GiveFlowResult<Vec<VerificationRecord>>> + Send;

    /// Apply a reviewer decision to a record: sets the status and the
    /// decision metadata. Fails with `NotFound` if the record is absent.
    fn decide(
        &self,
        id: Uuid,
        decision: VerificationDecision,
    ) -> impl Future<Output = GiveFlowResult<VerificationRecord>> + Send;
}

// ---------------------------------------------------------------------------
// Need-requests
// ---------------------------------------------------------------------------

pub trait NeedRequestRepository: Send + Sync {
    fn create(
        &self,
        input: CreateNeedRequest,
    ) -> impl Future<Output = GiveFlowResult<NeedRequest>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = GiveFlowResult<NeedRequest>> + Send;

    /// All requests owned by an organization, oldest first (creation
    /// order, which the dashboard renders stably).
    fn list_for_organization(
        &self,
        organization_id: &str,
    ) -> impl Future<Output = GiveFlowResult<Vec<NeedRequest>>> + Send;

    /// Externally driven status transition. Requests are never deleted.
    fn set_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> impl Future<Output = GiveFlowResult<NeedRequest>> + Send;
}

// ---------------------------------------------------------------------------
// Donations
// ---------------------------------------------------------------------------

pub trait DonationRepository: Send + Sync {
    fn create(&self, input: CreateDonation)
    -> impl Future<Output = GiveFlowResult<Donation>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = GiveFlowResult<Donation>> + Send;

    /// Donations submitted by one donor, newest first.
    fn list_for_donor(
        &self,
        donor_id: &str,
        pagination: Pagination,
    ) -> impl Future<Output = GiveFlowResult<PaginatedResult<Donation>>> + Send;

    /// The unassigned pool an administrator matches from, oldest first.
    fn list_unassigned(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = GiveFlowResult<PaginatedResult<Donation>>> + Send;

    /// Every donation assigned to an organization (with or without a
    /// request earmark). Input to the fulfillment reconciler.
    fn list_assigned_to_organization(
        &self,
        organization_id: &str,
    ) -> impl Future<Output = GiveFlowResult<Vec<Donation>>> + Send;

    /// Optimistic check-then-set assignment: sets the assignment fields
    /// only if the donation is currently unassigned.
    ///
    /// Returns the updated donation on success, or `None` when no
    /// unassigned donation with this id exists; the caller re-reads to
    /// distinguish "already assigned" from "no such donation".
    fn assign(
        &self,
        id: Uuid,
        organization_id: &str,
        request_id: Option<Uuid>,
    ) -> impl Future<Output = GiveFlowResult<Option<Donation>>> + Send;
}
