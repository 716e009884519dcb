use std::time::Duration;

use clap::ValueEnum;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{Result, TierError};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 11434;
pub const DEFAULT_MODEL: &str = "llama2";

/// Request/response shape of the local endpoint. Ollama exposes both; the
/// required response field differs, so the shape also selects validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndpointStyle {
    /// `/api/generate`: `{model, prompt, stream}` -> `{response}`.
    Generate,
    /// `/api/chat`: `{model, messages, stream}` -> `{message: {content}}`.
    Chat,
}

/// Local-model configuration (Ollama-compatible endpoint).
#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub base_url: String,
    pub model: String,
    pub style: EndpointStyle,
    pub timeout: Duration,
}

/// Client for the secondary, locally-hosted model tier.
#[derive(Debug, Clone)]
pub struct LocalClient {
    client: Client,
    config: LocalConfig,
}

impl LocalClient {
    pub fn new(config: LocalConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Sends the framed prompt to the local endpoint and validates that the
    /// payload carries the field its shape requires. A payload without it is
    /// a failure, not a success with empty content.
    pub async fn attempt(&self, prompt: &str) -> std::result::Result<String, TierError> {
        let (path, payload, field) = match self.config.style {
            EndpointStyle::Generate => (
                "/api/generate",
                json!({
                    "model": self.config.model,
                    "prompt": prompt,
                    "stream": false,
                }),
                "response",
            ),
            EndpointStyle::Chat => (
                "/api/chat",
                json!({
                    "model": self.config.model,
                    "messages": [ { "role": "user", "content": prompt } ],
                    "stream": false,
                }),
                "message.content",
            ),
        };

        let url = format!("{}{path}", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(TierError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TierError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(TierError::from_reqwest)?;
        let text = match self.config.style {
            EndpointStyle::Generate => body.get("response").and_then(Value::as_str),
            EndpointStyle::Chat => body.pointer("/message/content").and_then(Value::as_str),
        };

        text.map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToOwned::to_owned)
            .ok_or(TierError::MalformedPayload(field))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use httpmock::MockServer;

    use super::*;

    fn client(base_url: String, style: EndpointStyle, timeout: Duration) -> LocalClient {
        LocalClient::new(LocalConfig {
            base_url,
            model: DEFAULT_MODEL.to_owned(),
            style,
            timeout,
        })
        .expect("client should build")
    }

    #[tokio::test]
    async fn generate_style_reads_response_field() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/api/generate");
            then.status(200).json_body(json!({ "response": "Ride a bike." }));
        });

        let client = client(server.base_url(), EndpointStyle::Generate, Duration::from_secs(2));
        let text = client.attempt("commute advice?").await.expect("local reply");
        assert_eq!(text, "Ride a bike.");
        mock.assert();
    }

    #[tokio::test]
    async fn chat_style_reads_message_content() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/api/chat");
            then.status(200)
                .json_body(json!({ "message": { "role": "assistant", "content": "Compost." } }));
        });

        let client = client(server.base_url(), EndpointStyle::Chat, Duration::from_secs(2));
        let text = client.attempt("food waste?").await.expect("local reply");
        assert_eq!(text, "Compost.");
    }

    #[tokio::test]
    async fn missing_field_is_malformed_payload() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/api/generate");
            then.status(200).json_body(json!({ "done": true }));
        });

        let client = client(server.base_url(), EndpointStyle::Generate, Duration::from_secs(2));
        let err = client.attempt("hi").await.unwrap_err();
        assert_matches!(err, TierError::MalformedPayload("response"));
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/api/generate");
            then.status(200)
                .json_body(json!({ "response": "too late" }))
                .delay(Duration::from_millis(750));
        });

        let client = client(server.base_url(), EndpointStyle::Generate, Duration::from_millis(100));
        let err = client.attempt("hi").await.unwrap_err();
        assert_matches!(err, TierError::Timeout);
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(httpmock::Method::POST).path("/api/generate");
            then.status(500);
        });

        let client = client(server.base_url(), EndpointStyle::Generate, Duration::from_secs(2));
        let err = client.attempt("hi").await.unwrap_err();
        assert_matches!(err, TierError::Status(500));
    }
}
