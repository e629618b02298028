//! SurrealDB repository implementations.

mod donation;
mod request;
mod verification;

pub use donation::SurrealDonationRepository;
pub use request::SurrealNeedRequestRepository;
pub use verification::SurrealVerificationRepository;
