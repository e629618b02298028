//! Verification-state capability guard.

use giveflow_core::error::{GiveFlowError, GiveFlowResult};
use giveflow_core::models::organization::VerificationStatus;
use giveflow_core::repository::VerificationRepository;

/// Every organization capability requires an approved verification
/// record. A violation is a permission failure, never a silent no-op.
pub(crate) async fn require_approved<V: VerificationRepository>(
    verifications: &V,
    organization_id: &str,
) -> GiveFlowResult<()> {
    let latest = verifications
        .latest_for_organization(organization_id)
        .await?;
    let record = latest.ok_or_else(|| GiveFlowError::NotFound {
        entity: "organization".into(),
        id: organization_id.to_string(),
    })?;

    if record.status != VerificationStatus::Approved {
        return Err(GiveFlowError::permission_denied(
            "organization is not approved",
        ));
    }

    Ok(())
}
