//! Verification error types.

use giveflow_core::error::GiveFlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("required field '{0}' is blank")]
    BlankField(&'static str),

    #[error("required document missing: {0}")]
    MissingDocument(&'static str),

    #[error("document reference has an empty URI")]
    BlankDocumentUri,

    #[error("a submission is already under review")]
    AlreadyUnderReview,

    #[error("organization is already approved")]
    AlreadyApproved,

    #[error("latest verification record is {0}, not pending")]
    NotPending(&'static str),
}

impl From<VerifyError> for GiveFlowError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::BlankField(field) => GiveFlowError::Validation {
                field: field.into(),
                message: "must not be blank".into(),
            },
            VerifyError::MissingDocument(_) | VerifyError::BlankDocumentUri => {
                GiveFlowError::Validation {
                    field: "documents".into(),
                    message: err.to_string(),
                }
            }
            VerifyError::AlreadyUnderReview
            | VerifyError::AlreadyApproved
            | VerifyError::NotPending(_) => GiveFlowError::PermissionDenied {
                reason: err.to_string(),
            },
        }
    }
}
