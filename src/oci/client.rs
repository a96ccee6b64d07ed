//! Signed HTTP transport shared by the OCI service clients.

use super::signer::RequestSigner;
use crate::error::{Result, TranscribeError};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default timeout for OCI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an HTTP client with the default request timeout.
pub fn create_http_client() -> Result<reqwest::Client> {
    create_http_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an HTTP client with a custom timeout.
pub fn create_http_client_with_timeout(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("oci-transcribe/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// An error response returned by an OCI service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{status} {code}: {message}")]
pub struct ServiceError {
    /// HTTP status code.
    pub status: u16,
    /// Service error code, e.g. `BucketNotFound`.
    pub code: String,
    /// Human-readable message from the service.
    pub message: String,
    /// `opc-request-id` for support requests.
    pub request_id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl ServiceError {
    /// Build from a status code and a raw response body.
    ///
    /// Bodies that are not the usual `{code, message}` JSON are kept verbatim
    /// as the message.
    pub fn from_body(status: u16, body: &str, request_id: Option<String>) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self {
                status,
                code: parsed.code,
                message: parsed.message,
                request_id,
            },
            Err(_) => Self {
                status,
                code: String::new(),
                message: body.trim().to_string(),
                request_id,
            },
        }
    }
}

/// A request payload and how it is signed.
pub(crate) enum Payload<'a> {
    Empty,
    /// JSON body; its digest is part of the signature.
    Json(&'a [u8]),
    /// Raw upload body; signed on the generic headers only.
    Unsigned { bytes: Vec<u8>, content_type: &'a str },
}

/// HTTP client that signs every request for one OCI identity.
#[derive(Clone)]
pub struct OciHttpClient {
    http: reqwest::Client,
    signer: RequestSigner,
}

impl OciHttpClient {
    pub fn new(http: reqwest::Client, signer: RequestSigner) -> Self {
        Self { http, signer }
    }

    /// Send a signed request and turn non-2xx responses into [`ServiceError`].
    pub(crate) async fn send(&self, method: Method, url: Url, payload: Payload<'_>) -> Result<Response> {
        let mut headers = HeaderMap::new();
        let body = match payload {
            Payload::Empty => {
                self.signer.sign(&method, &url, &mut headers, None)?;
                None
            }
            Payload::Json(bytes) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                self.signer.sign(&method, &url, &mut headers, Some(bytes))?;
                Some(bytes.to_vec())
            }
            Payload::Unsigned {
                bytes,
                content_type,
            } => {
                headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_str(content_type).map_err(|e| {
                        TranscribeError::InvalidInput(format!("invalid content type: {}", e))
                    })?,
                );
                self.signer.sign(&method, &url, &mut headers, None)?;
                Some(bytes)
            }
        };

        debug!("{} {}", method, url);
        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let request_id = response
            .headers()
            .get("opc-request-id")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let text = response.text().await.unwrap_or_default();
        Err(ServiceError::from_body(status.as_u16(), &text, request_id).into())
    }
}
