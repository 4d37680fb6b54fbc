use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::SmsConfig;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Minimal Twilio Messages API client. One POST per message, HTTP basic auth
/// with the account SID and auth token.
#[derive(Clone)]
pub struct TwilioClient {
    client: Client,
    config: SmsConfig,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct TwilioError {
    message: String,
    #[serde(default)]
    code: Option<i64>,
}

impl TwilioClient {
    pub fn new(config: SmsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(
                config.request_timeout_seconds.max(1),
            ))
            .user_agent("Causelist/1.0")
            .build()
            .context("Failed to build Twilio HTTP client")?;

        Ok(Self {
            client,
            config,
            base_url: TWILIO_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API host (integration tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send one SMS and return the Twilio message SID.
    pub async fn send_message(&self, to: &str, body: &str) -> Result<String> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.base_url, self.config.account_sid
        );

        let params = [
            ("To", to),
            ("From", self.config.from_number.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .context("Twilio request failed")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<TwilioError>()
                .await
                .map_or_else(
                    |_| format!("HTTP {status}"),
                    |e| match e.code {
                        Some(code) => format!("{} (code {code})", e.message),
                        None => e.message,
                    },
                );
            bail!("Twilio rejected message to {to}: {detail}");
        }

        let message: MessageResponse = response
            .json()
            .await
            .context("Failed to parse Twilio response")?;

        debug!("Twilio accepted message {} for {}", message.sid, to);
        Ok(message.sid)
    }
}
