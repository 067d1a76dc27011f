// notifier/line/sender.rs

use crate::config::{RECIPIENT_VAR, TOKEN_VAR};
use crate::model::NotifyError;
use crate::notifier::line::LineNotifier;
use crate::utils::truncate_chars;
use serde::Serialize;
use tracing::{info, warn};

/// LINE rejects text messages longer than this.
pub const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: Vec<TextMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Sends one text message to the configured recipient. No retries.
pub async fn push_text(notifier: &LineNotifier, text: &str) -> Result<(), NotifyError> {
    let Some(credentials) = notifier.credentials.as_ref() else {
        warn!("❌ LINE push skipped: {} or {} not set", TOKEN_VAR, RECIPIENT_VAR);
        return Err(NotifyError::NotConfigured(format!(
            "{} or {} not set",
            TOKEN_VAR, RECIPIENT_VAR
        )));
    };

    let text = if text.chars().count() > MAX_TEXT_CHARS {
        warn!("Message exceeds {} chars, truncating", MAX_TEXT_CHARS);
        truncate_chars(text, MAX_TEXT_CHARS)
    } else {
        text
    };

    let payload = PushRequest {
        to: &credentials.recipient,
        messages: vec![TextMessage { kind: "text", text }],
    };

    info!("📤 Sending LINE push ({} chars)", text.chars().count());
    let response = notifier
        .client
        .post(&notifier.endpoint)
        .bearer_auth(&credentials.access_token)
        .json(&payload)
        .send()
        .await
        .map_err(|e| {
            warn!("❌ LINE send() failed: {:?}", e);
            NotifyError::Http(e)
        })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("❌ LINE API responded [{}]: {}", status, body);
        return Err(NotifyError::Status {
            status: status.as_u16(),
            body,
        });
    }

    info!("✅ LINE push sent [{}]", status);
    Ok(())
}
