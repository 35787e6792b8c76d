//! Client composition root

use tracing::{debug, info, instrument};

use crate::{
    api::StashApi,
    config::ClientConfig,
    error::Result,
    projects::ProjectService,
};

/// Handle to a Bitbucket Server instance
///
/// Construction is atomic: [`Client::connect`] probes the server before
/// returning, so a `Client` value always represents a reachable instance
/// with accepted credentials. The client holds no per-call mutable state
/// and can be shared freely across concurrent tasks; connection reuse is
/// handled by the underlying transport pool.
#[derive(Debug, Clone)]
pub struct Client {
    api: StashApi,
}

impl Client {
    /// Connect to a Bitbucket Server instance
    ///
    /// Builds the transport and performs a liveness check against the
    /// projects endpoint. Any probe failure, transport-level or a rejecting
    /// status, propagates immediately and no client is returned.
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        info!(base_url = %config.base_url, "connecting to Bitbucket Server");

        let api = StashApi::new(config)?;
        api.ping().await?;

        debug!("liveness check passed");
        Ok(Self { api })
    }

    /// Typed operations on the projects resource
    ///
    /// The returned handle borrows the client, so it cannot outlive it.
    pub fn projects(&self) -> ProjectService<'_> {
        ProjectService::new(&self.api)
    }

    /// Current client configuration
    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;

    #[tokio::test]
    async fn test_connect_invalid_config() {
        let config = ClientConfig::new("", Credentials::basic("dGVzdDp0ZXN0"));
        let result = Client::connect(config).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config =
            ClientConfig::new("https://stash.example.com", Credentials::basic("c2VjcmV0"));
        let api = StashApi::new(config).unwrap();
        let client = Client { api };

        let rendered = format!("{client:?}");
        assert!(!rendered.contains("c2VjcmV0"));
    }
}
