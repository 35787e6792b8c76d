//! Credential strategies for Bitbucket Server authentication
//!
//! Every outbound request carries exactly one `Authorization` header; the
//! [`Credentials`] value decides what goes in it. Secret material never
//! appears in `Debug` output or log events.

use std::{fmt, sync::Arc};

use compact_str::CompactString;
use reqwest::header::HeaderValue;

use crate::error::{ClientError, Result};

/// Source of bearer tokens that may rotate between requests
///
/// Consulted on every request; implementations must not assume any call
/// ordering and must be safe for concurrent reads.
pub trait TokenSource: Send + Sync {
    /// Return a currently valid token
    fn token(&self) -> Result<CompactString>;
}

/// Strategy producing the `Authorization` header for outbound requests
#[derive(Clone)]
pub enum Credentials {
    /// Pre-encoded `user:password` blob, sent as `Basic <blob>`
    ///
    /// The blob is not validated locally; bad credentials surface as a 401
    /// from the server.
    Basic(CompactString),

    /// Static token, sent as `Bearer <token>`
    Bearer(CompactString),

    /// Refreshable token source, queried per request
    OAuth(Arc<dyn TokenSource>),
}

impl Credentials {
    /// Basic auth from a pre-encoded base64 blob
    pub fn basic(encoded: impl Into<CompactString>) -> Self {
        Self::Basic(encoded.into())
    }

    /// Bearer auth from a raw token, trimmed of surrounding whitespace
    pub fn bearer(token: impl AsRef<str>) -> Self {
        Self::Bearer(token.as_ref().trim().into())
    }

    /// OAuth-style auth backed by a refreshable token source
    pub fn oauth(source: Arc<dyn TokenSource>) -> Self {
        Self::OAuth(source)
    }

    /// Produce the `Authorization` header value for one request
    ///
    /// The OAuth variant asks its source every time, so rotated tokens take
    /// effect without rebuilding the client. A source failure fails the
    /// request; it is not retried here.
    pub(crate) fn authorization(&self) -> Result<HeaderValue> {
        let value = match self {
            Credentials::Basic(blob) => format!("Basic {blob}"),
            Credentials::Bearer(token) => format!("Bearer {token}"),
            Credentials::OAuth(source) => format!("Bearer {}", source.token()?),
        };

        let mut header = HeaderValue::from_str(&value)
            .map_err(|_| ClientError::credentials("credential contains invalid header bytes"))?;
        header.set_sensitive(true);
        Ok(header)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // variant only; the secret itself must never leak into logs
        match self {
            Credentials::Basic(_) => f.write_str("Credentials::Basic(***)"),
            Credentials::Bearer(_) => f.write_str("Credentials::Bearer(***)"),
            Credentials::OAuth(_) => f.write_str("Credentials::OAuth(***)"),
        }
    }
}
