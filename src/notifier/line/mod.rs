pub mod sender;

use crate::config::Credentials;
use crate::model::NotifyError;
use crate::notifier::Notifier;
use reqwest::Client;

/// Push client for the LINE Messaging API.
pub struct LineNotifier {
    pub credentials: Option<Credentials>,
    pub endpoint: String,
    pub client: Client,
}

impl LineNotifier {
    /// Without credentials the notifier still builds, but every send is refused
    /// before any request goes out.
    pub fn new(
        credentials: Option<Credentials>,
        endpoint: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .build()
            .map_err(|e| NotifyError::Client(e.to_string()))?;

        Ok(Self {
            credentials,
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }
}

#[async_trait::async_trait]
impl Notifier for LineNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        sender::push_text(self, text).await
    }
}
