//! GiveFlow Verify — the NGO verification lifecycle: registration
//! submission, reviewer decisions, and the derived state machine that
//! gates every organization capability.

pub mod config;
pub mod error;
pub mod service;
pub mod state;

pub use config::VerifyConfig;
pub use error::VerifyError;
pub use service::VerificationService;
pub use state::VerificationState;
