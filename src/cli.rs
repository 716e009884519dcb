use std::time::Duration;

use clap::Parser;

use crate::error::Result;
use crate::responder::{
    cloud::{CloudClient, CloudConfig, DEFAULT_BASE_URL, DEFAULT_MODEL as DEFAULT_CLOUD_MODEL},
    fallback,
    local::{EndpointStyle, LocalClient, LocalConfig, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT},
    Responder,
};
use crate::server::DEFAULT_LISTEN_ADDR;
use crate::session::SessionConfig;

const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.0.0 Safari/537.36";

/// Command-line options for the carbontrace service.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Carbon footprint estimator and sustainability chatbot", long_about = None)]
pub struct CliArgs {
    /// Listen address for the HTTP API.
    #[arg(long = "listen", value_name = "ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    pub listen: String,

    /// User-Agent value sent with outbound website fetches.
    #[arg(long = "ua", default_value = DEFAULT_UA)]
    pub user_agent: String,

    /// Network timeout (seconds) applied to website fetches.
    #[arg(long = "fetch-timeout", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=120))]
    fetch_timeout_secs: u64,

    /// API key for the cloud model tier; without it the tier is skipped.
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY")]
    pub gemini_api_key: Option<String>,

    /// Cloud model identifier.
    #[arg(long = "gemini-model", default_value = DEFAULT_CLOUD_MODEL)]
    pub gemini_model: String,

    /// Network timeout (seconds) for cloud model requests.
    #[arg(long = "gemini-timeout", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=120))]
    gemini_timeout_secs: u64,

    /// Host of the local Ollama-compatible endpoint.
    #[arg(long = "ollama-host", default_value = DEFAULT_HOST)]
    pub ollama_host: String,

    /// Port of the local Ollama-compatible endpoint.
    #[arg(long = "ollama-port", default_value_t = DEFAULT_PORT)]
    pub ollama_port: u16,

    /// Model served by the local endpoint.
    #[arg(long = "ollama-model", default_value = DEFAULT_MODEL)]
    pub ollama_model: String,

    /// Request shape of the local endpoint.
    #[arg(long = "ollama-style", value_enum, default_value_t = EndpointStyle::Generate)]
    pub ollama_style: EndpointStyle,

    /// Network timeout (seconds) for local model requests.
    #[arg(long = "ollama-timeout", default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..=60))]
    ollama_timeout_secs: u64,

    /// Minimum fuzzy-match score (0-100) for topical fallback replies.
    #[arg(long = "match-threshold", default_value_t = fallback::DEFAULT_THRESHOLD)]
    pub match_threshold: f64,

    /// Answer a single question on the command line instead of serving.
    #[arg(long = "ask", value_name = "TEXT")]
    pub ask: Option<String>,
}

impl CliArgs {
    /// Returns the configured website-fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Convert CLI arguments into a fetch session configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.user_agent.clone(), self.fetch_timeout())
    }

    /// Base URL of the local model endpoint.
    pub fn local_base_url(&self) -> String {
        format!("http://{}:{}", self.ollama_host, self.ollama_port)
    }

    /// Build the three-tier chat responder from CLI configuration.
    pub fn responder(&self) -> Result<Responder> {
        let cloud = CloudClient::new(CloudConfig {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: self.gemini_model.clone(),
            api_key: self.gemini_api_key.clone(),
            timeout: Duration::from_secs(self.gemini_timeout_secs),
        })?;
        let local = LocalClient::new(LocalConfig {
            base_url: self.local_base_url(),
            model: self.ollama_model.clone(),
            style: self.ollama_style,
            timeout: Duration::from_secs(self.ollama_timeout_secs),
        })?;
        Ok(Responder::new(cloud, local, self.match_threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_ollama() {
        let args = CliArgs::parse_from(["carbontrace"]);
        assert_eq!(args.local_base_url(), "http://localhost:11434");
        assert_eq!(args.ollama_style, EndpointStyle::Generate);
        assert_eq!(args.match_threshold, 70.0);
    }

    #[test]
    fn parses_endpoint_style() {
        let args = CliArgs::parse_from(["carbontrace", "--ollama-style", "chat"]);
        assert_eq!(args.ollama_style, EndpointStyle::Chat);
    }

    #[test]
    fn timeouts_are_durations() {
        let args = CliArgs::parse_from(["carbontrace", "--fetch-timeout", "3"]);
        assert_eq!(args.fetch_timeout(), Duration::from_secs(3));
    }
}
