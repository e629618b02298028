//! Donation intake and assignment.

use giveflow_core::error::{GiveFlowError, GiveFlowResult};
use giveflow_core::models::donation::{CreateDonation, Donation};
use giveflow_core::notify::{NotificationCategory, Notifier};
use giveflow_core::repository::{
    DonationRepository, NeedRequestRepository, PaginatedResult, Pagination,
    VerificationRepository,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::guard::require_approved;

/// Donation service — intake of donor submissions and the
/// check-then-set assignment to organizations and requests.
pub struct DonationService<D, Q, V, N>
where
    D: DonationRepository,
    Q: NeedRequestRepository,
    V: VerificationRepository,
    N: Notifier,
{
    donations: D,
    requests: Q,
    verifications: V,
    notifier: N,
}

impl<D, Q, V, N> DonationService<D, Q, V, N>
where
    D: DonationRepository,
    Q: NeedRequestRepository,
    V: VerificationRepository,
    N: Notifier,
{
    pub fn new(donations: D, requests: Q, verifications: V, notifier: N) -> Self {
        Self {
            donations,
            requests,
            verifications,
            notifier,
        }
    }

    /// Record a donor submission. Donations always start unassigned.
    pub async fn submit_donation(&self, input: CreateDonation) -> GiveFlowResult<Donation> {
        if input.donor_id.trim().is_empty() {
            return Err(GiveFlowError::validation("donor_id", "must not be blank"));
        }
        if input.quantity == 0 {
            return Err(GiveFlowError::validation("quantity", "must be positive"));
        }

        let donation = self.donations.create(input).await?;

        info!(
            donor_id = %donation.donor_id,
            donation_id = %donation.id,
            category = donation.category.label(),
            quantity = donation.quantity,
            "donation submitted"
        );

        Ok(donation)
    }

    /// Assign a donation to an approved organization, optionally
    /// earmarking it against one of that organization's requests.
    ///
    /// The assignment fields are set at most once. A concurrent second
    /// assignment loses the check-then-set race and observes a conflict,
    /// so two organizations can never both receive the same item.
    pub async fn assign_donation(
        &self,
        donation_id: Uuid,
        organization_id: &str,
        request_id: Option<Uuid>,
    ) -> GiveFlowResult<Donation> {
        // 1. The target organization must be approved.
        require_approved(&self.verifications, organization_id).await?;

        // 2. An earmarked request must exist and belong to the target
        //    organization.
        if let Some(request_id) = request_id {
            let request = self.requests.get_by_id(request_id).await?;
            if request.organization_id != organization_id {
                return Err(GiveFlowError::Consistency {
                    reason: "request is owned by a different organization".into(),
                });
            }
        }

        // 3. Check-then-set in the store. `None` means the conditional
        //    update matched nothing; re-read to tell "already assigned"
        //    from "no such donation".
        let assigned = self
            .donations
            .assign(donation_id, organization_id, request_id)
            .await?;

        let donation = match assigned {
            Some(donation) => donation,
            None => {
                return match self.donations.get_by_id(donation_id).await {
                    Ok(_) => Err(GiveFlowError::Conflict {
                        reason: "donation is already assigned".into(),
                    }),
                    Err(e) => Err(e),
                };
            }
        };

        info!(
            donation_id = %donation.id,
            organization_id,
            request_id = ?request_id,
            quantity = donation.quantity,
            "donation assigned"
        );

        // 4. Best-effort notification; a delivery failure never fails
        //    the assignment.
        if let Err(e) = self
            .notifier
            .notify(
                organization_id,
                NotificationCategory::Donation,
                "Donation assigned",
                &format!(
                    "A {} donation of quantity {} has been assigned to your organization.",
                    donation.category.label(),
                    donation.quantity
                ),
            )
            .await
        {
            warn!(
                organization_id,
                donation_id = %donation.id,
                error = %e,
                "notification delivery failed"
            );
        }

        Ok(donation)
    }

    /// Donations submitted by one donor, newest first.
    pub async fn list_for_donor(
        &self,
        donor_id: &str,
        pagination: Pagination,
    ) -> GiveFlowResult<PaginatedResult<Donation>> {
        self.donations.list_for_donor(donor_id, pagination).await
    }

    /// The unassigned pool an administrator matches from, oldest first.
    pub async fn list_unassigned(
        &self,
        pagination: Pagination,
    ) -> GiveFlowResult<PaginatedResult<Donation>> {
        self.donations.list_unassigned(pagination).await
    }
}
