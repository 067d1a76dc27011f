pub mod line;

use crate::model::NotifyError;

pub use line::LineNotifier;

/// Delivers a finished report to its single recipient.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
