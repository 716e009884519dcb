use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{Result, TierError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const RESPONSE_TEXT_PATH: &str = "/candidates/0/content/parts/0/text";

/// Cloud-model configuration. The base URL is swappable so another provider
/// with the same text-in/text-out contract can stand in.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Client for the primary, cloud-hosted model tier.
#[derive(Debug, Clone)]
pub struct CloudClient {
    client: Client,
    config: CloudConfig,
}

impl CloudClient {
    pub fn new(config: CloudConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Sends the framed prompt to the generation endpoint. Fails immediately
    /// when no API key is configured so the chain advances without a network
    /// round trip.
    pub async fn attempt(&self, prompt: &str) -> std::result::Result<String, TierError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(TierError::MissingCredentials)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let payload = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await
            .map_err(TierError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TierError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(TierError::from_reqwest)?;
        body.pointer(RESPONSE_TEXT_PATH)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToOwned::to_owned)
            .ok_or(TierError::MalformedPayload("candidates[0].content.parts[0].text"))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use httpmock::MockServer;

    use super::*;

    fn client(base_url: String, api_key: Option<&str>) -> CloudClient {
        CloudClient::new(CloudConfig {
            base_url,
            model: DEFAULT_MODEL.to_owned(),
            api_key: api_key.map(ToOwned::to_owned),
            timeout: Duration::from_secs(2),
        })
        .expect("client should build")
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = client("http://127.0.0.1:9".to_owned(), None);
        let err = client.attempt("hi").await.unwrap_err();
        assert_matches!(err, TierError::MissingCredentials);
    }

    #[tokio::test]
    async fn extracts_candidate_text() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST)
                .path(format!("/models/{DEFAULT_MODEL}:generateContent"))
                .query_param("key", "test-key");
            then.status(200).json_body(json!({
                "candidates": [
                    { "content": { "parts": [ { "text": "Plant trees." } ] } }
                ]
            }));
        });

        let client = client(server.base_url(), Some("test-key"));
        let text = client.attempt("how to offset?").await.expect("cloud reply");
        assert_eq!(text, "Plant trees.");
        mock.assert();
    }

    #[tokio::test]
    async fn missing_text_is_malformed_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST);
            then.status(200).json_body(json!({ "candidates": [] }));
        });

        let client = client(server.base_url(), Some("test-key"));
        let err = client.attempt("hi").await.unwrap_err();
        assert_matches!(err, TierError::MalformedPayload(_));
    }

    #[tokio::test]
    async fn upstream_error_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST);
            then.status(403);
        });

        let client = client(server.base_url(), Some("bad-key"));
        let err = client.attempt("hi").await.unwrap_err();
        assert_matches!(err, TierError::Status(403));
    }
}
