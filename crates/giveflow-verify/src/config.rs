//! Verification configuration.

use giveflow_core::models::organization::DocumentKind;

/// Configuration for the verification service.
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Document kinds that must accompany every submission.
    pub required_documents: Vec<DocumentKind>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            required_documents: vec![
                DocumentKind::RegistrationCertificate,
                DocumentKind::AddressProof,
                DocumentKind::IdentityProof,
            ],
        }
    }
}
