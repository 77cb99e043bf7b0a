use std::time::Duration;

use log::debug;

use super::{ChainFetcher, FetchError, RemoteChain};

/// Seconds before a peer fetch is abandoned. The base design has no
/// timeout; this bounds the resolver's worst-case latency per peer.
const FETCH_TIMEOUT_SECS: u64 = 5;

/// reqwest-backed [`ChainFetcher`] issuing `GET <peer>/chain/`.
/// Peer addresses are base URLs including the API scope, e.g.
/// `http://127.0.0.1:8081/api/v1`.
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    client: reqwest::Client,
}

impl HttpChainFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .expect("build http client");
        Self { client }
    }
}

impl Default for HttpChainFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainFetcher for HttpChainFetcher {
    async fn fetch_chain(&self, peer: &str) -> Result<RemoteChain, FetchError> {
        let url = format!("{peer}/chain/");
        debug!("FETCH - GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<RemoteChain>()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))
    }
}
