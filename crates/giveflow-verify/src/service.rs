//! Verification service — registration submission and reviewer decisions.

use giveflow_core::error::{GiveFlowError, GiveFlowResult};
use giveflow_core::models::organization::{
    CreateVerificationRecord, VerificationDecision, VerificationRecord, VerificationStatus,
};
use giveflow_core::notify::{NotificationCategory, Notifier};
use giveflow_core::repository::VerificationRepository;
use tracing::{info, warn};

use crate::config::VerifyConfig;
use crate::error::VerifyError;
use crate::state::VerificationState;

fn status_label(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Pending => "pending",
        VerificationStatus::Approved => "approved",
        VerificationStatus::Rejected => "rejected",
    }
}

/// Verification service.
///
/// Generic over the repository and notifier implementations so that the
/// verification layer has no dependency on the database crate or any
/// concrete delivery channel.
pub struct VerificationService<R: VerificationRepository, N: Notifier> {
    repo: R,
    notifier: N,
    config: VerifyConfig,
}

impl<R: VerificationRepository, N: Notifier> VerificationService<R, N> {
    pub fn new(repo: R, notifier: N, config: VerifyConfig) -> Self {
        Self {
            repo,
            notifier,
            config,
        }
    }

    /// Submit a registration for review.
    ///
    /// Valid from the unregistered state or after a rejection; the
    /// resulting record always starts as `Pending`. A rejected history
    /// is retained, since resubmission creates a fresh record.
    pub async fn submit_registration(
        &self,
        input: CreateVerificationRecord,
    ) -> GiveFlowResult<VerificationRecord> {
        // 1. Every descriptive field is mandatory.
        require_field("organization_id", &input.organization_id)?;
        require_field("organization_name", &input.organization_name)?;
        require_field("registration_number", &input.registration_number)?;
        require_field("city", &input.city)?;
        require_field("state", &input.state)?;

        // 2. Document set must cover every required kind, with usable
        //    references.
        for document in &input.documents {
            if document.uri.trim().is_empty() {
                return Err(VerifyError::BlankDocumentUri.into());
            }
        }
        for kind in &self.config.required_documents {
            if !input.documents.iter().any(|d| d.kind == *kind) {
                return Err(VerifyError::MissingDocument(kind.label()).into());
            }
        }

        // 3. Gate on the current lifecycle state.
        let latest = self
            .repo
            .latest_for_organization(&input.organization_id)
            .await?;
        match VerificationState::from_latest(latest.as_ref()) {
            VerificationState::Pending => {
                return Err(VerifyError::AlreadyUnderReview.into());
            }
            VerificationState::Approved => {
                return Err(VerifyError::AlreadyApproved.into());
            }
            VerificationState::Unregistered | VerificationState::Rejected => {}
        }

        // 4. Persist the fresh pending record.
        let record = self.repo.create(input).await?;

        info!(
            organization_id = %record.organization_id,
            record_id = %record.id,
            "registration submitted for review"
        );

        Ok(record)
    }

    /// Approve the organization's pending submission.
    pub async fn approve(
        &self,
        organization_id: &str,
        reviewer_id: &str,
    ) -> GiveFlowResult<VerificationRecord> {
        require_field("reviewer_id", reviewer_id)?;

        let record = self.latest_pending(organization_id).await?;

        let decided = self
            .repo
            .decide(
                record.id,
                VerificationDecision::Approve {
                    reviewer_id: reviewer_id.to_string(),
                },
            )
            .await?;

        info!(
            organization_id = %decided.organization_id,
            reviewer_id,
            "registration approved"
        );

        self.send_notification(
            &decided.organization_id,
            "Registration approved",
            &format!(
                "{} is now verified and eligible to receive donations.",
                decided.organization_name
            ),
        )
        .await;

        Ok(decided)
    }

    /// Reject the organization's pending submission, recording the reason.
    pub async fn reject(
        &self,
        organization_id: &str,
        reviewer_id: &str,
        reason: &str,
    ) -> GiveFlowResult<VerificationRecord> {
        require_field("reviewer_id", reviewer_id)?;
        require_field("reason", reason)?;

        let record = self.latest_pending(organization_id).await?;

        let decided = self
            .repo
            .decide(
                record.id,
                VerificationDecision::Reject {
                    reviewer_id: reviewer_id.to_string(),
                    reason: reason.to_string(),
                },
            )
            .await?;

        info!(
            organization_id = %decided.organization_id,
            reviewer_id,
            "registration rejected"
        );

        self.send_notification(
            &decided.organization_id,
            "Registration rejected",
            &format!("The submission for {} was rejected: {reason}", decided.organization_name),
        )
        .await;

        Ok(decided)
    }

    /// Current lifecycle state of an organization.
    pub async fn state(&self, organization_id: &str) -> GiveFlowResult<VerificationState> {
        let latest = self.repo.latest_for_organization(organization_id).await?;
        Ok(VerificationState::from_latest(latest.as_ref()))
    }

    /// Full submission history, oldest first. Rejected records are kept
    /// for audit.
    pub async fn history(&self, organization_id: &str) -> GiveFlowResult<Vec<VerificationRecord>> {
        self.repo.history_for_organization(organization_id).await
    }

    /// Fetch the latest record and require it to be pending: the only
    /// state a reviewer decision applies to.
    async fn latest_pending(&self, organization_id: &str) -> GiveFlowResult<VerificationRecord> {
        let record = self
            .repo
            .latest_for_organization(organization_id)
            .await?
            .ok_or_else(|| GiveFlowError::NotFound {
                entity: "verification_record".into(),
                id: organization_id.to_string(),
            })?;

        if record.status != VerificationStatus::Pending {
            return Err(VerifyError::NotPending(status_label(record.status)).into());
        }

        Ok(record)
    }

    /// Fire-and-forget delivery: failures are logged, never propagated.
    async fn send_notification(&self, organization_id: &str, title: &str, message: &str) {
        if let Err(e) = self
            .notifier
            .notify(
                organization_id,
                NotificationCategory::Registration,
                title,
                message,
            )
            .await
        {
            warn!(
                organization_id,
                error = %e,
                "notification delivery failed"
            );
        }
    }
}

fn require_field(field: &'static str, value: &str) -> Result<(), VerifyError> {
    if value.trim().is_empty() {
        return Err(VerifyError::BlankField(field));
    }
    Ok(())
}
