//! HTTP transport to the operations backend.
//!
//! Every resource client goes through [`BackendClient`], which forwards the
//! caller's cookie and request id, injects trace context, and turns backend
//! failures into [`BackendError`]s carrying a user-facing message.

use crate::config::BackendSettings;
use crate::models::CurrentUser;
use axum::http::StatusCode;
use reqwest::{header::COOKIE, multipart::Form, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use track_core::error::{AppError, GENERIC_ERROR_MESSAGE};
use track_core::observability::PropagateContext;

/// Shown when a success response cannot be decoded.
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Received an unexpected response from the server";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Malformed backend response: {0}")]
    Malformed(String),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Transport(_) => AppError::BadGateway(GENERIC_ERROR_MESSAGE.to_string()),
            BackendError::Status { status, message } => {
                let message = message.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
                // Client errors are the backend's validation verdicts and keep
                // their status; server faults surface as 502.
                let status = if status.is_client_error() {
                    status
                } else {
                    StatusCode::BAD_GATEWAY
                };
                AppError::Upstream(status, message)
            }
            BackendError::Malformed(_) => AppError::BadGateway(MALFORMED_RESPONSE_MESSAGE.to_string()),
        }
    }
}

/// Pulls a readable message out of an error body.
///
/// Accepts a bare JSON string or an object with `message`, `error`, `title`
/// or `detail`. Anything else (HTML error pages, plain text) yields `None`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let non_blank = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    match value {
        Value::String(s) => non_blank(&s),
        Value::Object(map) => ["message", "error", "title", "detail"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .find_map(non_blank),
        _ => None,
    }
}

pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, BackendError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(settings.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        caller: &CurrentUser,
    ) -> Result<T, BackendError> {
        let url = self.url(path);
        let response = self
            .execute("GET", &url, self.client.get(&url), caller)
            .await?;
        decode(response, &url).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B, caller: &CurrentUser) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self
            .execute("POST", &url, self.client.post(&url).json(body), caller)
            .await?;
        decode(response, &url).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        caller: &CurrentUser,
    ) -> Result<T, BackendError> {
        let url = self.url(path);
        let response = self
            .execute("POST", &url, self.client.post(&url).multipart(form), caller)
            .await?;
        decode(response, &url).await
    }

    /// PUT whose response body is optional.
    ///
    /// Returns `None` when the backend answers with an empty body or one
    /// that is not a `T`; callers then keep their locally patched copy.
    pub async fn put_json<B, T>(
        &self,
        path: &str,
        body: &B,
        caller: &CurrentUser,
    ) -> Result<Option<T>, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self
            .execute("PUT", &url, self.client.put(&url).json(body), caller)
            .await?;

        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "PUT response is not a record, patching locally");
                Ok(None)
            }
        }
    }

    pub async fn delete(&self, path: &str, caller: &CurrentUser) -> Result<(), BackendError> {
        let url = self.url(path);
        self.execute("DELETE", &url, self.client.delete(&url), caller)
            .await?;
        Ok(())
    }

    async fn execute(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
        caller: &CurrentUser,
    ) -> Result<Response, BackendError> {
        let request = match caller.cookie.as_deref() {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        };

        let response = match request.propagate(caller.request_id.as_deref()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(method, url = %url, error = %e, "Failed to reach backend");
                super::metrics::record_backend_call(method, "transport_error");
                return Err(BackendError::Transport(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            super::metrics::record_backend_call(method, "ok");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);
        tracing::error!(
            method,
            url = %url,
            status = %status,
            message = message.as_deref().unwrap_or("-"),
            "Backend request failed"
        );
        super::metrics::record_backend_call(method, "error_status");

        Err(BackendError::Status { status, message })
    }
}

async fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, BackendError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!(url = %url, error = %e, "Failed to decode backend response");
        BackendError::Malformed(e.to_string())
    })
}
