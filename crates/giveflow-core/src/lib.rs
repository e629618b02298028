//! GiveFlow Core — domain models, error taxonomy, repository traits, and
//! collaborator interfaces shared across all crates.

pub mod error;
pub mod models;
pub mod notify;
pub mod repository;
pub mod window;

pub use error::{GiveFlowError, GiveFlowResult};
pub use notify::{NoopNotifier, NotificationCategory, Notifier, NotifyError};
pub use repository::{PaginatedResult, Pagination};
pub use window::TimeWindow;
