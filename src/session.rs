use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, ClientBuilder};

use crate::error::Result;
use crate::util::{platform_token, sec_ch_ua};

/// Wrapper around the configured HTTP client used for website fetches.
///
/// Sends browser-like identification headers; some sites refuse requests
/// from obvious non-browser agents.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
}

/// Minimal data required to build an HTTP session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn new(user_agent: String, timeout: Duration) -> Self {
        Self {
            user_agent,
            timeout,
        }
    }
}

impl HttpSession {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        default_headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        default_headers.insert(
            sec_ch_ua_header(),
            HeaderValue::from_str(&sec_ch_ua(&config.user_agent))?,
        );
        default_headers.insert(sec_ch_ua_mobile_header(), HeaderValue::from_static("?0"));
        default_headers.insert(
            sec_ch_ua_platform_header(),
            HeaderValue::from_str(platform_token(&config.user_agent))?,
        );

        let client = ClientBuilder::new()
            .default_headers(default_headers)
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Returns reference to the inner `reqwest::Client`.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn sec_ch_ua_header() -> HeaderName {
    HeaderName::from_static("sec-ch-ua")
}

fn sec_ch_ua_mobile_header() -> HeaderName {
    HeaderName::from_static("sec-ch-ua-mobile")
}

fn sec_ch_ua_platform_header() -> HeaderName {
    HeaderName::from_static("sec-ch-ua-platform")
}
