//! Upstream log API client: per-request configuration, key decode, fetch,
//! and payload parsing (server-only).

use base64::prelude::*;

use crate::log;
use crate::model::{LogRecord, parse_delimited_payload, sort_newest_first};

/// Upstream connection settings, resolved from the environment at the start
/// of each request and validated before any network work.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub url: String,
    pub key_base64: String,
}

impl UpstreamConfig {
    pub fn from_env() -> Result<Self, String> {
        let url = std::env::var("API_URL").unwrap_or_default();
        if url.is_empty() {
            return Err("API_URL is not defined".to_string());
        }
        let key_base64 = std::env::var("API_KEY_BASE64").unwrap_or_default();
        if key_base64.is_empty() {
            return Err("API_KEY_BASE64 is not defined".to_string());
        }
        Ok(Self { url, key_base64 })
    }

    /// Decode the stored credential to its raw text form.
    pub fn decoded_key(&self) -> Result<String, String> {
        let raw = BASE64_STANDARD
            .decode(self.key_base64.as_bytes())
            .map_err(|e| format!("API key is not valid base64: {}", e))?;
        String::from_utf8(raw).map_err(|e| format!("API key is not valid UTF-8: {}", e))
    }
}

/// Upstream failure message; `StatusCode` displays as
/// `<code> <reason phrase>`, e.g. `503 Service Unavailable`.
fn status_error(status: reqwest::StatusCode) -> String {
    format!("API error: {}", status)
}

fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(500)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    &body[..end]
}

/// Fetch the full log set from the upstream API: GET with the decoded key
/// in the `x-log-key` header, parse the delimited payload, sort
/// newest-first. Any failure is terminal for the request; no retries and
/// no partial results. No timeout is configured, so a hanging upstream
/// hangs the request.
pub async fn fetch_upstream_logs() -> Result<Vec<LogRecord>, String> {
    let config = UpstreamConfig::from_env()?;
    let api_key = config.decoded_key()?;

    log::app_log("INFO", format!("Upstream: GET {}", config.url));
    let response = reqwest::Client::new()
        .get(&config.url)
        .header("x-log-key", api_key)
        .send()
        .await
        .map_err(|e| format!("Upstream request failed: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::app_log(
            "ERROR",
            format!("Upstream: {} - {}", status, snippet(&body)),
        );
        return Err(status_error(status));
    }

    let raw = response
        .text()
        .await
        .map_err(|e| format!("Upstream response read failed: {}", e))?;

    let mut records = parse_delimited_payload(&raw);
    sort_newest_first(&mut records);
    log::app_log("INFO", format!("Upstream: parsed {} records", records.len()));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code_and_reason_phrase() {
        assert_eq!(
            status_error(reqwest::StatusCode::SERVICE_UNAVAILABLE),
            "API error: 503 Service Unavailable"
        );
        assert_eq!(
            status_error(reqwest::StatusCode::UNAUTHORIZED),
            "API error: 401 Unauthorized"
        );
    }

    #[test]
    fn decodes_base64_key_to_text() {
        let config = UpstreamConfig {
            url: "http://localhost".to_string(),
            key_base64: "c3VwZXJzZWNyZXQ=".to_string(),
        };
        assert_eq!(config.decoded_key().unwrap(), "supersecret");
    }

    #[test]
    fn rejects_non_base64_key() {
        let config = UpstreamConfig {
            url: "http://localhost".to_string(),
            key_base64: "not base64!!".to_string(),
        };
        assert!(config.decoded_key().is_err());
    }

    #[test]
    fn snippet_caps_long_bodies() {
        let body = "x".repeat(2000);
        assert_eq!(snippet(&body).len(), 500);
        assert_eq!(snippet("short"), "short");
    }
}
