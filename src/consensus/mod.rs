pub mod http;

use std::sync::Mutex;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::{Block, Blockchain, valid_chain};

pub use http::HttpChainFetcher;

/// Shape of a peer's `GET <peer>/chain/` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("peer returned status {0}")]
    Status(u16),
    #[error("malformed chain payload: {0}")]
    Malformed(String),
}

/// Capability to fetch a peer's chain. The resolver only depends on this
/// trait; the HTTP client lives in [`http`].
pub trait ChainFetcher {
    fn fetch_chain(
        &self,
        peer: &str,
    ) -> impl Future<Output = Result<RemoteChain, FetchError>> + Send;
}

/// Longest-valid-chain conflict resolution.
///
/// Snapshots the peer set and local length under the lock, fetches every
/// peer chain with the lock released, and re-acquires it only for the final
/// swap. Peers are scanned in lexicographic address order so that ties among
/// equally-long valid candidates resolve deterministically (first address
/// wins). A fetch failure or malformed payload skips that peer; the scan
/// never aborts. Returns true iff the local chain was replaced.
pub async fn resolve_conflicts<F: ChainFetcher>(ledger: &Mutex<Blockchain>, fetcher: &F) -> bool {
    let (peers, local_len) = {
        let bc = ledger.lock().expect("mutex poisoned");
        let mut peers: Vec<String> = bc.peers().iter().cloned().collect();
        peers.sort();
        (peers, bc.len())
    };

    let mut best: Option<Vec<Block>> = None;
    let mut max_len = local_len;

    for peer in &peers {
        let remote = match fetcher.fetch_chain(peer).await {
            Ok(remote) => remote,
            Err(err) => {
                warn!("RESOLVE - skipping peer {peer}: {err}");
                continue;
            }
        };
        if remote.length != remote.chain.len() {
            warn!(
                "RESOLVE - skipping peer {peer}: reported length {} but sent {} blocks",
                remote.length,
                remote.chain.len()
            );
            continue;
        }
        if remote.length <= max_len {
            debug!(
                "RESOLVE - peer {peer} at length {} does not beat {max_len}",
                remote.length
            );
            continue;
        }
        if !valid_chain(&remote.chain) {
            warn!(
                "RESOLVE - peer {peer} sent an invalid chain of length {}",
                remote.length
            );
            continue;
        }
        debug!("RESOLVE - peer {peer} is the new best candidate at length {}", remote.length);
        max_len = remote.length;
        best = Some(remote.chain);
    }

    let Some(candidate) = best else {
        return false;
    };

    // The local chain may have grown while we were fetching; only swap if
    // the candidate is still strictly longer.
    let mut bc = ledger.lock().expect("mutex poisoned");
    if candidate.len() > bc.len() {
        info!(
            "RESOLVE - replacing local chain (length {} -> {})",
            bc.len(),
            candidate.len()
        );
        bc.replace_chain(candidate);
        true
    } else {
        debug!("RESOLVE - local chain caught up meanwhile, keeping it");
        false
    }
}
