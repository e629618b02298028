//! Derived verification state for an organization.
//!
//! The store never holds an `Unregistered` row; that state is the absence
//! of any record. Everything that gates on verification state therefore
//! derives it from the latest record rather than reading a stored field.

use giveflow_core::models::organization::{VerificationRecord, VerificationStatus};

/// Where an organization currently stands in the verification lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    /// No record has ever been submitted.
    Unregistered,
    /// The latest submission awaits a reviewer decision.
    Pending,
    /// The latest submission was approved.
    Approved,
    /// The latest submission was rejected; resubmission is allowed.
    Rejected,
}

impl VerificationState {
    /// Derive the state from the most recent record, if any.
    pub fn from_latest(latest: Option<&VerificationRecord>) -> Self {
        match latest.map(|record| record.status) {
            None => VerificationState::Unregistered,
            Some(VerificationStatus::Pending) => VerificationState::Pending,
            Some(VerificationStatus::Approved) => VerificationState::Approved,
            Some(VerificationStatus::Rejected) => VerificationState::Rejected,
        }
    }

    /// A new submission is valid only from the initial state or after a
    /// rejection.
    pub fn can_submit(self) -> bool {
        matches!(
            self,
            VerificationState::Unregistered | VerificationState::Rejected
        )
    }

    pub fn is_approved(self) -> bool {
        matches!(self, VerificationState::Approved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerificationState::Unregistered => "unregistered",
            VerificationState::Pending => "pending",
            VerificationState::Approved => "approved",
            VerificationState::Rejected => "rejected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn record_with(status: VerificationStatus) -> VerificationRecord {
        VerificationRecord {
            id: Uuid::new_v4(),
            organization_id: "org-1".into(),
            organization_name: "Test Org".into(),
            registration_number: "R-1".into(),
            city: "Pune".into(),
            state: "Maharashtra".into(),
            documents: Vec::new(),
            status,
            decided_by: None,
            decided_at: None,
            rejection_reason: None,
            submitted_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn absent_record_is_unregistered() {
        assert_eq!(
            VerificationState::from_latest(None),
            VerificationState::Unregistered
        );
    }

    #[test]
    fn state_follows_latest_record_status() {
        let pending = record_with(VerificationStatus::Pending);
        let approved = record_with(VerificationStatus::Approved);
        let rejected = record_with(VerificationStatus::Rejected);

        assert_eq!(
            VerificationState::from_latest(Some(&pending)),
            VerificationState::Pending
        );
        assert_eq!(
            VerificationState::from_latest(Some(&approved)),
            VerificationState::Approved
        );
        assert_eq!(
            VerificationState::from_latest(Some(&rejected)),
            VerificationState::Rejected
        );
    }

    #[test]
    fn submission_allowed_only_from_unregistered_or_rejected() {
        assert!(VerificationState::Unregistered.can_submit());
        assert!(VerificationState::Rejected.can_submit());
        assert!(!VerificationState::Pending.can_submit());
        assert!(!VerificationState::Approved.can_submit());
    }

    #[test]
    fn only_approved_grants_capability() {
        assert!(VerificationState::Approved.is_approved());
        assert!(!VerificationState::Pending.is_approved());
        assert!(!VerificationState::Rejected.is_approved());
        assert!(!VerificationState::Unregistered.is_approved());
    }
}
