//! Shared HTTP plumbing
//!
//! Every registrar call goes through [`HttpUtils::execute_request`]: send, log, map
//! transport-level failures. Envelope decoding (`status: SUCCESS | ERROR`) is left to
//! the client module, which knows the endpoint context.
//!
//! Requests are sent exactly once. A timeout or 5xx surfaces to the caller unchanged.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// # Arguments
    /// * `request_builder` - fully configured request (URL, body, timeout)
    /// * `method_name` - request method for the log line (`"POST"`)
    /// * `endpoint` - endpoint path for the log line; must not contain credentials
    ///
    /// # Errors
    /// * `ApiError::Timeout` when the configured timeout elapsed
    /// * `ApiError::NetworkError` on connection failure or HTTP 500-599
    /// * `ApiError::RateLimited` on HTTP 429
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        endpoint: &str,
    ) -> Result<(u16, String), ApiError> {
        log::debug!("[porkbun] {method_name} {endpoint}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    detail: format!("{endpoint}: {e}"),
                }
            } else {
                ApiError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[porkbun] Response Status: {status_code}");

        // Read before the body consumes the response
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[porkbun] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ApiError::RateLimited {
                retry_after,
                raw_message: extract_message(&body),
            });
        }

        if (500..=599).contains(&status_code) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[porkbun] Server error (HTTP {status_code})");
            return Err(ApiError::NetworkError {
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[porkbun] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body.
    ///
    /// # Errors
    /// `ApiError::ParseError` when the text is not valid JSON for `T`.
    pub fn parse_json<T>(response_text: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[porkbun] JSON parse failed: {e}");
            log::error!("[porkbun] Raw response: {}", truncate_for_log(response_text));
            ApiError::ParseError {
                detail: e.to_string(),
            }
        })
    }
}

/// Best-effort pull of the `message` field out of an error body.
fn extract_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .or_else(|| Some(truncate_for_log(body)))
}
