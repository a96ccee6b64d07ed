//! OCI HTTP request signing.
//!
//! Implements the `rsa-sha256` flavour of the HTTP Signatures draft that every
//! OCI API requires. A signature covers `date`, `(request-target)` and `host`,
//! and for requests whose body is signed also `content-length`, `content-type`
//! and `x-content-sha256`.

use crate::error::{Result, TranscribeError};
use base64::{engine::general_purpose, Engine as _};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, DATE, HOST};
use reqwest::Method;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::{Digest, Sha256};
use url::Url;

const GENERIC_HEADERS: &[&str] = &["date", "(request-target)", "host"];
const BODY_HEADERS: &[&str] = &["content-length", "content-type", "x-content-sha256"];
const CONTENT_SHA256: &str = "x-content-sha256";

/// Signs outgoing requests with an API signing key.
#[derive(Clone)]
pub struct RequestSigner {
    key_id: String,
    signing_key: SigningKey<Sha256>,
}

impl RequestSigner {
    /// Create a signer from an already-parsed private key.
    ///
    /// `key_id` has the form `{tenancy}/{user}/{fingerprint}`.
    pub fn new(key_id: impl Into<String>, private_key: RsaPrivateKey) -> Self {
        Self {
            key_id: key_id.into(),
            signing_key: SigningKey::<Sha256>::new(private_key),
        }
    }

    /// Create a signer from a PEM-encoded key (PKCS#8 or PKCS#1).
    pub fn from_pem(key_id: impl Into<String>, pem: &str) -> Result<Self> {
        Ok(Self::new(key_id, parse_private_key(pem)?))
    }

    /// The `keyId` placed in the Authorization header.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Add `date`, `host`, body digest and `authorization` headers to a request.
    ///
    /// Pass `Some(body)` to sign the body headers as well; PutObject-style
    /// uploads pass `None` and are signed on the generic headers only.
    pub fn sign(
        &self,
        method: &Method,
        url: &Url,
        headers: &mut HeaderMap,
        body: Option<&[u8]>,
    ) -> Result<()> {
        if !headers.contains_key(DATE) {
            let date = chrono::Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
            headers.insert(DATE, header_value(&date)?);
        }
        headers.insert(HOST, header_value(&host_header(url)?)?);

        let mut signed: Vec<&str> = GENERIC_HEADERS.to_vec();
        if let Some(body) = body {
            let digest = general_purpose::STANDARD.encode(Sha256::digest(body));
            headers.insert(HeaderName::from_static(CONTENT_SHA256), header_value(&digest)?);
            headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            signed.extend_from_slice(BODY_HEADERS);
        }

        let plaintext = signing_string(method, url, headers, &signed)?;
        let signature = self.signing_key.sign(plaintext.as_bytes());
        let encoded = general_purpose::STANDARD.encode(signature.to_bytes());

        let authorization = format!(
            "Signature version=\"1\",keyId=\"{}\",algorithm=\"rsa-sha256\",headers=\"{}\",signature=\"{}\"",
            self.key_id,
            signed.join(" "),
            encoded
        );
        headers.insert(AUTHORIZATION, header_value(&authorization)?);
        Ok(())
    }
}

/// Parse an unencrypted RSA private key in PKCS#8 or PKCS#1 PEM form.
pub(crate) fn parse_private_key(pem: &str) -> Result<RsaPrivateKey> {
    if pem.contains("ENCRYPTED") {
        return Err(TranscribeError::Config(
            "encrypted API signing keys are not supported; use an unencrypted key_file".to_string(),
        ));
    }
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| TranscribeError::Config(format!("invalid API signing key: {}", e)))
}

/// Build the newline-separated string that gets signed.
fn signing_string(
    method: &Method,
    url: &Url,
    headers: &HeaderMap,
    names: &[&str],
) -> Result<String> {
    let mut lines = Vec::with_capacity(names.len());
    for name in names {
        let value = if *name == "(request-target)" {
            request_target(method, url)
        } else {
            headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    TranscribeError::InvalidInput(format!("missing header to sign: {}", name))
                })?
                .to_string()
        };
        lines.push(format!("{}: {}", name, value));
    }
    Ok(lines.join("\n"))
}

fn request_target(method: &Method, url: &Url) -> String {
    let mut target = format!("{} {}", method.as_str().to_lowercase(), url.path());
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    target
}

fn host_header(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| TranscribeError::InvalidInput(format!("URL has no host: {}", url)))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| TranscribeError::InvalidInput(format!("invalid header value: {}", e)))
}
