use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::MailerError;
use crate::types::OutboundEmail;

/// Client for the JSON mail-relay API.
///
/// Manages the HTTP client, bearer token, and base URL. Point `base_url` at a
/// mock server in tests.
#[derive(Debug, Clone)]
pub struct MailerClient {
    client: Client,
    api_token: Option<String>,
    base_url: Url,
}

impl MailerClient {
    /// Creates a new client for the relay at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MailerError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn new(
        base_url: &str,
        api_token: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, MailerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("fmdb/0.1 (market-directory)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining "messages" appends a path segment rather than replacing one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| MailerError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self {
            client,
            api_token: api_token.map(ToOwned::to_owned),
            base_url,
        })
    }

    /// Posts one message to the relay's `messages` endpoint.
    ///
    /// # Errors
    ///
    /// - [`MailerError::Relay`] if the relay answers with a non-2xx status.
    /// - [`MailerError::Http`] on network failure.
    pub async fn send(&self, email: &OutboundEmail) -> Result<(), MailerError> {
        let url = self
            .base_url
            .join("messages")
            .map_err(|_| MailerError::InvalidBaseUrl(self.base_url.to_string()))?;

        let mut request = self.client.post(url).json(email);
        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(MailerError::Relay {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_base_url() {
        let result = MailerClient::new("not a url", None, 30);
        assert!(matches!(result, Err(MailerError::InvalidBaseUrl(_))));
    }

    #[test]
    fn new_accepts_url_without_trailing_slash() {
        let client = MailerClient::new("https://mail.example.com/v1", Some("token"), 30);
        assert!(client.is_ok());
    }
}
