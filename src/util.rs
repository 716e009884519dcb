use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use regex::Regex;

static CHROME_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Chrome/(\d{2,3})").expect("regex should compile"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("regex should compile"));

/// Extracts the Chrome major version from a UA string (defaulting to `"140"`).
pub fn chrome_major_version(ua: &str) -> String {
    CHROME_VERSION_RE
        .captures(ua)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .unwrap_or_else(|| "140".to_owned())
}

/// Best-effort platform detection for Sec-CH-UA-Platform.
pub fn platform_token(ua: &str) -> &'static str {
    if ua.contains("Mac OS X") {
        "macOS"
    } else if ua.contains("Android") {
        "Android"
    } else if ua.contains("X11; Linux") {
        "Linux"
    } else {
        "Windows"
    }
}

/// Builds a Sec-CH-UA header string mirroring Chromium style.
pub fn sec_ch_ua(ua: &str) -> String {
    let major = chrome_major_version(ua);
    format!(r#""Chromium";v="{major}", "Not=A?Brand";v="24", "Google Chrome";v="{major}""#)
}

/// Rounds a value to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Collapses runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Truncates to at most `limit` characters, appending an ellipsis marker.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_owned();
    }
    let mut preview: String = text.chars().take(limit).collect();
    preview.push_str("...");
    preview
}

/// Seconds since the unix epoch.
pub fn current_unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}
