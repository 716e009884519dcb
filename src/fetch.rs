use reqwest::header::CONTENT_LENGTH;
use scraper::{ElementRef, Html};

use crate::error::Result;
use crate::factors::DEFAULT_PAGE_SIZE_MB;
use crate::session::HttpSession;
use crate::util::{collapse_whitespace, truncate_chars};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const PREVIEW_CHARS: usize = 500;
const NO_TEXT_MESSAGE: &str = "No text content could be extracted from this website.";

/// Tags stripped before extracting visible text.
const NON_CONTENT_TAGS: &[&str] = &[
    "script", "style", "header", "footer", "nav", "aside", "noscript",
];

/// Prepends `http://` when the URL carries no scheme.
pub fn ensure_scheme(url: &str) -> String {
    if url.contains("://") {
        url.to_owned()
    } else {
        format!("http://{url}")
    }
}

/// Measures a page's size in MB, preferring the declared `Content-Length`
/// over the received body length. A footprint estimate must always come out,
/// so any network failure degrades to the default page size.
pub async fn page_size_mb(session: &HttpSession, url: &str) -> f64 {
    match try_page_size(session, url).await {
        Ok(size_mb) => {
            tracing::debug!("website size: {size_mb:.2} MB for {url}");
            size_mb
        }
        Err(err) => {
            tracing::warn!("error fetching website {url}: {err:#}");
            DEFAULT_PAGE_SIZE_MB
        }
    }
}

async fn try_page_size(session: &HttpSession, url: &str) -> Result<f64> {
    let url = ensure_scheme(url);
    let response = session.client().get(&url).send().await?.error_for_status()?;

    let declared = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    let bytes = match declared {
        Some(length) => length,
        None => response.bytes().await?.len() as u64,
    };

    Ok(bytes as f64 / BYTES_PER_MB)
}

/// Fetches a short plain-text preview of a page. Best-effort enrichment:
/// every failure path yields a human-readable string, never an error.
pub async fn text_preview(session: &HttpSession, url: &str) -> String {
    match try_text_preview(session, url).await {
        Ok(preview) => preview,
        Err(err) => {
            tracing::warn!("error extracting website text from {url}: {err:#}");
            format!("Error extracting website content: {err:#}")
        }
    }
}

async fn try_text_preview(session: &HttpSession, url: &str) -> Result<String> {
    let url = ensure_scheme(url);
    let body = session
        .client()
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let text = extract_visible_text(&body);
    if text.is_empty() {
        return Ok(NO_TEXT_MESSAGE.to_owned());
    }
    Ok(truncate_chars(&text, PREVIEW_CHARS))
}

/// Strips non-content markup and collapses the remaining visible text.
pub(crate) fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut buffer = String::new();
    collect_text(document.root_element(), &mut buffer);
    collapse_whitespace(&buffer)
}

fn collect_text(element: ElementRef, out: &mut String) {
    if NON_CONTENT_TAGS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use httpmock::MockServer;

    use super::*;
    use crate::session::SessionConfig;

    fn test_session() -> HttpSession {
        let config = SessionConfig::new("carbontrace-test/0.1".to_owned(), Duration::from_secs(2));
        HttpSession::new(&config).expect("session should build")
    }

    #[test]
    fn adds_missing_scheme() {
        assert_eq!(ensure_scheme("example.com"), "http://example.com");
        assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
    }

    #[test]
    fn strips_non_content_tags() {
        let html = "<html><head><style>body{}</style></head><body>\
                    <nav>menu</nav><p>Green  hosting</p>\
                    <script>var x = 1;</script><footer>legal</footer></body></html>";
        assert_eq!(extract_visible_text(html), "Green hosting");
    }

    #[test]
    fn preview_is_bounded() {
        let long = format!("<p>{}</p>", "word ".repeat(400));
        let text = extract_visible_text(&long);
        let preview = truncate_chars(&text, PREVIEW_CHARS);
        assert!(preview.len() <= PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[tokio::test]
    async fn measures_body_size() {
        let server = MockServer::start();
        let body = "a".repeat(512 * 1024);
        server.mock(|when, then| {
            when.path("/");
            then.status(200).body(&body);
        });

        let size = page_size_mb(&test_session(), &server.url("/")).await;
        assert!((size - 0.5).abs() < 0.01, "got {size}");
    }

    #[tokio::test]
    async fn unreachable_site_uses_default_size() {
        let size = page_size_mb(&test_session(), "http://127.0.0.1:9/never").await;
        assert_eq!(size, DEFAULT_PAGE_SIZE_MB);
    }

    #[tokio::test]
    async fn http_error_uses_default_size() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/missing");
            then.status(404);
        });

        let size = page_size_mb(&test_session(), &server.url("/missing")).await;
        assert_eq!(size, DEFAULT_PAGE_SIZE_MB);
    }

    #[tokio::test]
    async fn preview_reports_fetch_failure_as_text() {
        let preview = text_preview(&test_session(), "http://127.0.0.1:9/never").await;
        assert!(preview.starts_with("Error extracting website content:"));
    }

    #[tokio::test]
    async fn preview_extracts_page_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.path("/page");
            then.status(200)
                .body("<html><body><h1>Solar</h1><p>power is renewable</p></body></html>");
        });

        let preview = text_preview(&test_session(), &server.url("/page")).await;
        assert_eq!(preview, "Solar power is renewable");
    }
}
