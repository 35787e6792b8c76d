//! Core HTTP transport for the Bitbucket Server API
//!
//! Building a request, sending it, and interpreting the response are three
//! separate steps. Building performs no I/O, and interpretation is a pure
//! function of the status code and body, so both are unit-testable without
//! a server.

use reqwest::{
    header::{HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, Request, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};
use url::Url;

use crate::{
    config::ClientConfig,
    error::{ClientError, Result},
};

const JSON_MEDIA_TYPE: &str = "application/json";

/// HTTP transport core for the Bitbucket Server API
#[derive(Debug, Clone)]
pub struct StashApi {
    client: Client,
    endpoint: Url,
    config: ClientConfig,
}

impl StashApi {
    /// Create a new API transport from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let endpoint = config.api_url()?;

        let client = Client::builder()
            .timeout(config.request.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self { client, endpoint, config })
    }

    /// Get current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolved API endpoint, base URL plus the fixed API prefix
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build an immutable request specification; no network I/O happens here
    ///
    /// The path is resolved against the endpoint with standard RFC 3986
    /// merging. Bodies are serialized for POST/PUT only; a body supplied
    /// with GET/DELETE is ignored. Static header overrides from the config
    /// are applied after the defaults and the credential header.
    pub(crate) fn build_request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint.join(path).map_err(|e| ClientError::InvalidUrl {
            url: format!("{}{}", self.endpoint, path),
            source: e,
        })?;

        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .header(AUTHORIZATION, self.config.credentials.authorization()?);

        if method == Method::POST || method == Method::PUT {
            if let Some(body) = body {
                let buf = serde_json::to_vec(body).map_err(ClientError::Encoding)?;
                builder = builder.header(CONTENT_TYPE, JSON_MEDIA_TYPE).body(buf);
            }
        } else if body.is_some() {
            debug!(method = %method, path, "ignoring body on bodyless method");
        }

        let mut request = builder.build().map_err(ClientError::Transport)?;

        // insert, not append: overrides replace the defaults they collide with
        for (name, value) in &self.config.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                ClientError::config_validation("headers", format!("invalid header name: {name}"))
            })?;
            let value = HeaderValue::from_str(value.as_str()).map_err(|_| {
                ClientError::config_validation("headers", "invalid header value")
            })?;
            request.headers_mut().insert(name, value);
        }

        Ok(request)
    }

    /// Execute one request and decode the response body into `T`
    ///
    /// Returns `Ok(None)` for 204 responses, where the server promises no
    /// body and nothing is decoded. No retries at this level: the caller is
    /// the only one who knows whether the operation is idempotent.
    pub(crate) async fn execute<T>(&self, request: Request) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let (endpoint, status, body) = self.dispatch(request).await?;
        interpret(&endpoint, status, &body)
    }

    /// Execute one request without a decode target
    ///
    /// The body can never produce an error on a success status, even if the
    /// server sent garbage.
    pub(crate) async fn execute_unit(&self, request: Request) -> Result<()> {
        let (endpoint, status, body) = self.dispatch(request).await?;
        interpret_unit(&endpoint, status, &body)
    }

    /// Probe the projects endpoint to confirm reachability and credentials
    #[instrument(skip(self))]
    pub(crate) async fn ping(&self) -> Result<()> {
        let request = self.build_request(Method::GET, "projects", None::<&()>)?;
        self.execute_unit(request).await
    }

    /// Send the request and read the full response body
    ///
    /// The body is always read to completion, on every path, so the pooled
    /// connection is never left with a half-read response.
    async fn dispatch(&self, request: Request) -> Result<(String, StatusCode, String)> {
        let endpoint = request.url().path().to_string();
        debug!(method = %request.method(), path = %endpoint, "sending request");

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(path = %endpoint, status = status.as_u16(), "received response");
        Ok((endpoint, status, body))
    }
}

/// Map a raw response to a decoded value or a classified error
///
/// This is the central policy of the whole client:
/// 401 and 404 classify on status alone, 204 succeeds without touching the
/// body, any other 2xx decodes, and everything else carries its raw status.
fn interpret<T>(endpoint: &str, status: StatusCode, body: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    match status.as_u16() {
        401 => Err(ClientError::Permission),
        404 => Err(ClientError::not_found(endpoint)),
        204 => Ok(None),
        _ if status.is_success() => serde_json::from_str(body).map(Some).map_err(|e| {
            if e.is_syntax() || e.is_eof() {
                ClientError::malformed_response(endpoint, e)
            } else {
                ClientError::decode(endpoint, e)
            }
        }),
        s => Err(ClientError::request_failed(s, body)),
    }
}

/// Same policy as [`interpret`], with no decode target
fn interpret_unit(endpoint: &str, status: StatusCode, body: &str) -> Result<()> {
    match status.as_u16() {
        401 => Err(ClientError::Permission),
        404 => Err(ClientError::not_found(endpoint)),
        _ if status.is_success() => Ok(()),
        s => Err(ClientError::request_failed(s, body)),
    }
}
