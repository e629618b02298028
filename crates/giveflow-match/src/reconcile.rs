//! Fulfillment reconciliation — recompute-from-source aggregation of an
//! organization's assigned donations against its need-requests.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use giveflow_core::error::GiveFlowResult;
use giveflow_core::models::donation::Donation;
use giveflow_core::models::request::NeedRequest;
use giveflow_core::repository::{DonationRepository, NeedRequestRepository};
use tracing::warn;
use uuid::Uuid;

/// Fulfillment figures for one need-request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFulfillment {
    pub request_id: Uuid,
    pub required_quantity: u64,
    /// Sum of every donation quantity earmarked against this request.
    pub received_quantity: u64,
    /// Display percentage, saturating at 100 on over-delivery.
    pub fulfilled_percent: u8,
}

/// Aggregate fulfillment picture for one organization.
#[derive(Debug, Clone)]
pub struct FulfillmentReport {
    pub organization_id: String,
    /// Per-request rows, in request creation order.
    pub requests: Vec<RequestFulfillment>,
    /// Total quantity assigned to the organization, earmarked or not.
    pub organization_total: u64,
    /// Quantity assigned to the organization without a request earmark.
    pub unattributed_total: u64,
    pub generated_at: DateTime<Utc>,
}

/// Fulfillment reconciler.
///
/// No running counters are kept anywhere: every report is recomputed
/// from the stored donations and requests, so a corrected donation row
/// is reflected on the next read.
pub struct FulfillmentReconciler<D: DonationRepository, Q: NeedRequestRepository> {
    donations: D,
    requests: Q,
}

impl<D: DonationRepository, Q: NeedRequestRepository> FulfillmentReconciler<D, Q> {
    pub fn new(donations: D, requests: Q) -> Self {
        Self {
            donations,
            requests,
        }
    }

    /// Compute the current fulfillment report for an organization.
    ///
    /// Idempotent and side-effect-free: the output is a pure function of
    /// the rows read, reflecting a snapshot at read time. A concurrent
    /// in-flight assignment simply lands in the next report.
    pub async fn report(&self, organization_id: &str) -> GiveFlowResult<FulfillmentReport> {
        let donations = self
            .donations
            .list_assigned_to_organization(organization_id)
            .await?;
        let requests = self.requests.list_for_organization(organization_id).await?;

        Ok(compute_report(organization_id, &requests, &donations))
    }
}

fn compute_report(
    organization_id: &str,
    requests: &[NeedRequest],
    donations: &[Donation],
) -> FulfillmentReport {
    let mut received: HashMap<Uuid, u64> =
        requests.iter().map(|request| (request.id, 0)).collect();
    let mut organization_total = 0u64;
    let mut unattributed_total = 0u64;

    for donation in donations {
        organization_total += donation.quantity;
        match donation.assigned_request_id {
            None => unattributed_total += donation.quantity,
            Some(request_id) => match received.get_mut(&request_id) {
                Some(sum) => *sum += donation.quantity,
                None => {
                    // Corrupt earmark. The quantity stays in the
                    // organization total but must not inflate any
                    // request's figure.
                    warn!(
                        donation_id = %donation.id,
                        request_id = %request_id,
                        organization_id,
                        "donation earmarked to a request outside the organization's ledger"
                    );
                }
            },
        }
    }

    let request_rows = requests
        .iter()
        .map(|request| {
            let received_quantity = received.get(&request.id).copied().unwrap_or(0);
            RequestFulfillment {
                request_id: request.id,
                required_quantity: request.required_quantity,
                received_quantity,
                fulfilled_percent: fulfilled_percent(received_quantity, request.required_quantity),
            }
        })
        .collect();

    FulfillmentReport {
        organization_id: organization_id.to_string(),
        requests: request_rows,
        organization_total,
        unattributed_total,
        generated_at: Utc::now(),
    }
}

/// `clamp(round(received / required × 100), 0, 100)`; `0` for an empty
/// or zero-required request rather than dividing by zero.
fn fulfilled_percent(received: u64, required: u64) -> u8 {
    if required == 0 || received == 0 {
        return 0;
    }
    let raw = (received as f64 / required as f64 * 100.0).round();
    raw.min(100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use giveflow_core::models::request::{
        RequestDetails, RequestStatus, ResourceCategory, UrgencyLevel,
    };

    fn request(id: Uuid, required: u64) -> NeedRequest {
        NeedRequest {
            id,
            organization_id: "org-1".into(),
            required_quantity: required,
            urgency: UrgencyLevel::Medium,
            description: "Rations for the relief camp kitchen".into(),
            needed_by: None,
            details: RequestDetails::Food {
                beneficiaries: 10,
                perishable_ok: true,
                dietary_notes: None,
            },
            status: RequestStatus::Approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn donation(quantity: u64, request_id: Option<Uuid>) -> Donation {
        Donation {
            id: Uuid::new_v4(),
            donor_id: "donor-1".into(),
            category: ResourceCategory::Food,
            quantity,
            assigned_organization_id: Some("org-1".into()),
            assigned_request_id: request_id,
            assigned_at: Some(Utc::now()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sums_earmarked_donations_per_request() {
        let id = Uuid::new_v4();
        let requests = [request(id, 20)];
        let donations = [donation(8, Some(id)), donation(5, Some(id))];

        let report = compute_report("org-1", &requests, &donations);

        assert_eq!(report.requests.len(), 1);
        assert_eq!(report.requests[0].received_quantity, 13);
        assert_eq!(report.requests[0].fulfilled_percent, 65);
        assert_eq!(report.organization_total, 13);
        assert_eq!(report.unattributed_total, 0);
    }

    #[test]
    fn percent_saturates_at_one_hundred() {
        let id = Uuid::new_v4();
        let requests = [request(id, 100)];
        let donations = [donation(150, Some(id))];

        let report = compute_report("org-1", &requests, &donations);

        assert_eq!(report.requests[0].received_quantity, 150);
        assert_eq!(report.requests[0].fulfilled_percent, 100);
    }

    #[test]
    fn unearmarked_donations_count_toward_totals_only() {
        let id = Uuid::new_v4();
        let requests = [request(id, 50)];
        let donations = [donation(30, None), donation(10, Some(id))];

        let report = compute_report("org-1", &requests, &donations);

        assert_eq!(report.requests[0].received_quantity, 10);
        assert_eq!(report.organization_total, 40);
        assert_eq!(report.unattributed_total, 30);
    }

    #[test]
    fn corrupt_earmark_is_excluded_from_request_sums() {
        let id = Uuid::new_v4();
        let requests = [request(id, 50)];
        // Earmarked against a request id that is not in the ledger.
        let donations = [donation(25, Some(Uuid::new_v4())), donation(5, Some(id))];

        let report = compute_report("org-1", &requests, &donations);

        assert_eq!(report.requests[0].received_quantity, 5);
        assert_eq!(report.organization_total, 30);
        assert_eq!(report.unattributed_total, 0);
    }

    #[test]
    fn zero_required_quantity_yields_zero_percent() {
        let id = Uuid::new_v4();
        let requests = [request(id, 0)];
        let donations = [donation(10, Some(id))];

        let report = compute_report("org-1", &requests, &donations);

        assert_eq!(report.requests[0].fulfilled_percent, 0);
        assert_eq!(report.requests[0].received_quantity, 10);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(fulfilled_percent(1, 3), 33);
        assert_eq!(fulfilled_percent(2, 3), 67);
        assert_eq!(fulfilled_percent(1, 2), 50);
        assert_eq!(fulfilled_percent(0, 20), 0);
    }

    #[test]
    fn empty_inputs_produce_an_empty_report() {
        let report = compute_report("org-1", &[], &[]);

        assert!(report.requests.is_empty());
        assert_eq!(report.organization_total, 0);
        assert_eq!(report.unattributed_total, 0);
    }
}
