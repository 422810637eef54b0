//! Thin HTTP transport over `reqwest`.
//!
//! Every failure mode (connect error, timeout, non-2xx status, malformed
//! body) is normalized into a single [`TransportError`] whose `Display`
//! string is what backends place into failure envelopes.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A failure reported by the transport layer, in descending priority of
/// specificity: a structured error field from the response body wins over
/// the bare status, which wins over the underlying client error.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The remote side returned a structured `{"error": "..."}` body.
    #[error("{0}")]
    Api(String),

    /// Non-2xx status with no structured error field in the body.
    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Connection failure, timeout, or other client-level error.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// 2xx response whose body did not match the expected shape.
    #[error("Malformed response body: {0}")]
    Decode(String),
}

/// Error body shape produced by the weather origin on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// HTTP client bound to a single base origin with a fixed timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Build a client for `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self { base_url: base_url.into().trim_end_matches('/').to_string(), http })
    }

    /// GET `path` with `query` parameters, decoding a JSON body into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "sending GET request");

        let res = self.http.get(&url).query(query).send().await?;
        Self::decode_response(res).await
    }

    /// POST a JSON `body` to `path`, decoding a JSON body into `T`.
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "sending POST request");

        let res = self.http.post(&url).json(body).send().await?;
        Self::decode_response(res).await
    }

    async fn decode_response<T: DeserializeOwned>(
        res: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            // Prefer the origin's own error message when the body carries one.
            if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(&body) {
                return Err(TransportError::Api(api_err.error));
            }

            return Err(TransportError::Status { status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Cut on a char boundary so multi-byte bodies cannot panic the slice.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
