//! Porkbun request execution

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ErrorMapper, RawApiError};
use crate::utils::log_sanitizer::{redact_body, truncate_for_log};

use super::PorkbunClient;

impl PorkbunClient {
    /// POST `body` (plus credentials) to `{base_url}/{path}` and decode the envelope.
    pub(crate) async fn post<T, B>(
        &self,
        path: &str,
        body: Option<&B>,
        context: ErrorContext,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let payload = self.authenticated_body(body)?;
        let url = format!("{}/{path}", self.base_url);
        log::debug!("Request Body: {}", redact_body(&payload));

        let request = self.client.post(&url).json(&payload);
        let (status, text) = HttpUtils::execute_request(request, "POST", path).await?;

        self.decode_response(status, &text, context)
    }

    /// POST without a payload beyond the credentials.
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        self.post::<T, Value>(path, None, context).await
    }

    /// Merge the key pair into the request body.
    fn authenticated_body<B>(&self, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let mut map = match body {
            None => Map::new(),
            Some(b) => match serde_json::to_value(b) {
                Ok(Value::Object(m)) => m,
                Ok(Value::Null) => Map::new(),
                Ok(other) => {
                    return Err(ApiError::SerializationError {
                        detail: format!("request body must be a JSON object, got {other}"),
                    });
                }
                Err(e) => {
                    return Err(ApiError::SerializationError {
                        detail: e.to_string(),
                    });
                }
            },
        };
        map.insert(
            "apikey".to_string(),
            Value::String(self.credentials.api_key.clone()),
        );
        map.insert(
            "secretapikey".to_string(),
            Value::String(self.credentials.secret_api_key.clone()),
        );
        Ok(Value::Object(map))
    }

    /// Decode `{status: SUCCESS|ERROR, ...}` into `T` or a mapped error.
    pub(crate) fn decode_response<T: DeserializeOwned>(
        &self,
        http_status: u16,
        text: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let value: Value = match HttpUtils::parse_json(text) {
            Ok(v) => v,
            // Gateways and auth failures may answer with HTML or plain text
            Err(_) if http_status >= 400 => {
                return Err(self.fail(
                    RawApiError::with_status(http_status, truncate_for_log(text)),
                    context,
                ));
            }
            Err(e) => return Err(e),
        };

        let status = value
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_ascii_uppercase);

        match status.as_deref() {
            Some("SUCCESS") if http_status < 400 => serde_json::from_value(value).map_err(|e| {
                log::error!("[porkbun] Unexpected response shape: {e}");
                self.parse_error(e)
            }),
            None if http_status < 400 => Err(self.parse_error(format!(
                "response has no status field: {}",
                truncate_for_log(text)
            ))),
            _ => {
                let message = value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown error")
                    .to_string();
                Err(self.fail(RawApiError::with_status(http_status, message), context))
            }
        }
    }

    /// Map and log a registrar error.
    fn fail(&self, raw: RawApiError, context: ErrorContext) -> ApiError {
        let err = self.map_error(raw, context);
        if err.is_expected() {
            log::warn!("[porkbun] API error: {err}");
        } else {
            log::error!("[porkbun] API error: {err}");
        }
        err
    }
}
