//! Notification channel collaborator interface.
//!
//! The delivery channel (push, email, in-app) lives outside GiveFlow and
//! guarantees best-effort delivery only. Services treat every call as
//! fire-and-forget: a delivery failure is logged and never fails the
//! operation that triggered it.

use thiserror::Error;

/// Coarse grouping the channel can use for routing/templating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    /// Registration decisions (approved/rejected).
    Registration,
    /// A donation was assigned to the recipient organization.
    Donation,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Registration => "registration",
            NotificationCategory::Donation => "donation",
        }
    }
}

/// Delivery failure reported by the channel. Callers log and move on.
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// External notification channel.
pub trait Notifier: Send + Sync {
    fn notify(
        &self,
        recipient_id: &str,
        category: NotificationCategory,
        title: &str,
        message: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Notifier that drops every message. Used where no channel is wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    async fn notify(
        &self,
        _recipient_id: &str,
        _category: NotificationCategory,
        _title: &str,
        _message: &str,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}
