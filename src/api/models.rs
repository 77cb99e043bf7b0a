use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::blockchain::{Block, Blockchain};
use crate::consensus::HttpChainFetcher;
use crate::transaction::Transaction;

/// Shared application state: the in-memory ledger behind a single write
/// lock, this node's mining identity and the peer-fetch client.
pub struct AppState {
    pub blockchain: Mutex<Blockchain>,
    pub node_id: String,
    pub fetcher: HttpChainFetcher,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            blockchain: Mutex::new(Blockchain::new()),
            node_id: uuid::Uuid::new_v4().simple().to_string(),
            fetcher: HttpChainFetcher::new(),
        }
    }
}

/* ---------- Transaction API Models ---------- */

#[derive(Deserialize)]
pub struct NewTransactionRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

#[derive(Serialize)]
pub struct NewTransactionResponse {
    pub message: String,
    pub index: u64,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/* ---------- Mining API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
    pub length: usize,
}
