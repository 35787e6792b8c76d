//! Configuration management for the Bitbucket Server client

use std::{collections::HashMap, time::Duration};

use compact_str::CompactString;
use url::Url;

use crate::{
    auth::Credentials,
    error::{ClientError, Result},
};

/// Fixed API path prefix for Bitbucket Server's project-management API
pub(crate) const API_PATH: &str = "/rest/api/1.0/";

/// Main configuration for the Bitbucket Server client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bitbucket Server base URL, without the API prefix
    pub base_url: CompactString,
    /// Credential strategy applied to every request
    pub credentials: Credentials,
    /// Static header overrides applied after the defaults
    pub headers: HashMap<CompactString, CompactString>,
    /// Request configuration
    pub request: RequestConfig,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Client-wide timeout for the send+receive phase of each request
    pub timeout: Duration,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(10) }
    }
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<CompactString>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            headers: HashMap::new(),
            request: RequestConfig::default(),
        }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::config("base URL cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::config("base URL must start with http:// or https://"));
        }

        if self.request.timeout.is_zero() {
            return Err(ClientError::config("timeout must be greater than zero"));
        }

        // an Authorization override would silently displace the credential
        // strategy; reject it outright
        if self.headers.keys().any(|k| k.eq_ignore_ascii_case("authorization")) {
            return Err(ClientError::config_validation(
                "headers",
                "Authorization cannot be overridden; use a credential strategy",
            ));
        }

        Ok(())
    }

    /// Resolve the immutable API endpoint: base URL + fixed API prefix
    ///
    /// The trailing slash matters: relative resource paths merge against it
    /// per RFC 3986, so everything stays under the API root.
    pub(crate) fn api_url(&self) -> Result<Url> {
        let endpoint = format!("{}{}", self.base_url.trim_end_matches('/'), API_PATH);
        Url::parse(&endpoint).map_err(|e| ClientError::InvalidUrl { url: endpoint, source: e })
    }

    /// Set static header overrides
    pub fn with_headers(mut self, headers: HashMap<CompactString, CompactString>) -> Self {
        self.headers = headers;
        self
    }

    /// Set request configuration
    pub fn with_request(mut self, request: RequestConfig) -> Self {
        self.request = request;
        self
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<CompactString>,
    credentials: Option<Credentials>,
    headers: HashMap<CompactString, CompactString>,
    request: Option<RequestConfig>,
}

impl ClientConfigBuilder {
    /// Set base URL
    pub fn base_url(mut self, url: impl Into<CompactString>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the credential strategy
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Add a static header override
    pub fn header(
        mut self,
        name: impl Into<CompactString>,
        value: impl Into<CompactString>,
    ) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set request configuration
    pub fn request(mut self, request: RequestConfig) -> Self {
        self.request = Some(request);
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let mut request = self.request.unwrap_or_default();
        request.timeout = timeout;
        self.request = Some(request);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::config("base URL is required"))?;
        let credentials = self
            .credentials
            .ok_or_else(|| ClientError::config("credentials are required"))?;

        let config = ClientConfig {
            base_url,
            credentials,
            headers: self.headers,
            request: self.request.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
