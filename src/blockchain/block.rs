use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

/// A single block in the chain holding an ordered list of transactions.
///
/// Field order is canonical: the hash preimage is the block's JSON
/// serialization, so reordering fields here changes every digest and breaks
/// cross-node validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Build a block stamped with the current time. Linkage (`index`,
    /// `previous_hash`) is the caller's responsibility; see
    /// [`Blockchain::new_block`](super::Blockchain::new_block).
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: Utc::now().timestamp(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// SHA-256 over the canonical JSON serialization of the whole block,
    /// hex encoded. Serializing a well-formed block cannot fail; if it ever
    /// does that is an internal defect, not a recoverable error.
    pub fn hash(&self) -> String {
        let canonical = serde_json::to_vec(self).expect("serialize block");
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }
}
