//! Need/request ledger — creation, listing, and externally driven status
//! transitions.

use chrono::{DateTime, FixedOffset};
use giveflow_core::error::{GiveFlowError, GiveFlowResult};
use giveflow_core::models::request::{CreateNeedRequest, NeedRequest, RequestStatus};
use giveflow_core::repository::{NeedRequestRepository, VerificationRepository};
use giveflow_core::window::TimeWindow;
use tracing::info;
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::guard::require_approved;

/// One reason for every ownership-scoped miss, so probing request ids
/// confirms nothing about other organizations' ledgers.
const REQUEST_ACCESS_DENIED: &str = "request is not accessible to this organization";

/// Need-request ledger service.
pub struct NeedRequestLedger<Q: NeedRequestRepository, V: VerificationRepository> {
    requests: Q,
    verifications: V,
    config: LedgerConfig,
}

impl<Q: NeedRequestRepository, V: VerificationRepository> NeedRequestLedger<Q, V> {
    pub fn new(requests: Q, verifications: V, config: LedgerConfig) -> Self {
        Self {
            requests,
            verifications,
            config,
        }
    }

    /// Create a new need-request for an approved organization.
    pub async fn create_request(&self, input: CreateNeedRequest) -> GiveFlowResult<NeedRequest> {
        // 1. Input validation, naming the offending field.
        if input.organization_id.trim().is_empty() {
            return Err(GiveFlowError::validation(
                "organization_id",
                "must not be blank",
            ));
        }
        if input.required_quantity == 0 {
            return Err(GiveFlowError::validation(
                "required_quantity",
                "must be positive",
            ));
        }
        let description_chars = input.description.chars().count();
        if description_chars < self.config.min_description_chars
            || description_chars > self.config.max_description_chars
        {
            return Err(GiveFlowError::validation(
                "description",
                format!(
                    "must be between {} and {} characters",
                    self.config.min_description_chars, self.config.max_description_chars
                ),
            ));
        }

        // 2. Only approved organizations may declare needs.
        require_approved(&self.verifications, &input.organization_id).await?;

        // 3. Persist; new requests always start pending.
        let request = self.requests.create(input).await?;

        info!(
            organization_id = %request.organization_id,
            request_id = %request.id,
            category = request.category().label(),
            required_quantity = request.required_quantity,
            "need-request created"
        );

        Ok(request)
    }

    /// Requests owned by an organization, oldest first, optionally
    /// restricted to a trailing window anchored at `now`.
    ///
    /// `now` carries the dashboard's UTC offset so the Monday/1st
    /// calendar boundaries land on the caller's local midnight.
    pub async fn list_requests(
        &self,
        organization_id: &str,
        window: Option<TimeWindow>,
        now: DateTime<FixedOffset>,
    ) -> GiveFlowResult<Vec<NeedRequest>> {
        let mut requests = self.requests.list_for_organization(organization_id).await?;
        if let Some(window) = window {
            requests.retain(|request| window.contains(request.created_at, now));
        }
        Ok(requests)
    }

    /// Ownership-scoped read of a single request.
    ///
    /// A missing request and a request owned by someone else produce the
    /// identical permission failure.
    pub async fn get_request(
        &self,
        organization_id: &str,
        request_id: Uuid,
    ) -> GiveFlowResult<NeedRequest> {
        match self.requests.get_by_id(request_id).await {
            Ok(request) if request.organization_id == organization_id => Ok(request),
            Ok(_) => Err(GiveFlowError::permission_denied(REQUEST_ACCESS_DENIED)),
            Err(GiveFlowError::NotFound { .. }) => {
                Err(GiveFlowError::permission_denied(REQUEST_ACCESS_DENIED))
            }
            Err(e) => Err(e),
        }
    }

    /// Externally driven status transition, e.g. an administrator marks
    /// a request fulfilled. Requests are never deleted.
    pub async fn set_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> GiveFlowResult<NeedRequest> {
        let request = self.requests.set_status(request_id, status).await?;

        info!(
            organization_id = %request.organization_id,
            request_id = %request.id,
            status = ?request.status,
            "need-request status changed"
        );

        Ok(request)
    }
}
