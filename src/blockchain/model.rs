use std::collections::HashSet;

use super::pow::valid_proof;
use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// In-memory ledger: the chain of blocks, the pending-transaction pool and
/// the set of known peer addresses.
///
/// Not internally synchronized. Callers share it behind a mutex and treat
/// pool mutation, block append, peer registration and chain replacement as
/// mutually exclusive writes; reads take a consistent [`snapshot`].
///
/// [`snapshot`]: Blockchain::snapshot
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    pending: Vec<Transaction>,
    peers: HashSet<String>,
}

impl Blockchain {
    /// Initialize a ledger with its genesis block (fixed proof, sentinel
    /// previous hash). The chain is never empty afterwards.
    pub fn new() -> Self {
        let mut bc = Self {
            chain: Vec::new(),
            pending: Vec::new(),
            peers: HashSet::new(),
        };
        bc.new_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        bc
    }

    /// Queue a transaction for inclusion in the next mined block and return
    /// the index that block will occupy. No identity or balance validation.
    pub fn new_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: u64,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, recipient, amount));
        self.last_block().index + 1
    }

    pub fn push_transaction(&mut self, tx: Transaction) -> u64 {
        self.pending.push(tx);
        self.last_block().index + 1
    }

    /// Append a new block consuming the whole pending pool atomically.
    /// `previous_hash` is only supplied for the genesis block; every other
    /// append links to the hash of the current tail. Sole mutator of chain
    /// length.
    pub fn new_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash());
        let block = Block::new(
            self.chain.len() as u64 + 1,
            std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Return the tail block.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds at least the genesis block")
    }

    /// Consistent copy of the chain plus its length, for reporting and for
    /// the resolver's pre-fetch read.
    pub fn snapshot(&self) -> (Vec<Block>, usize) {
        (self.chain.clone(), self.chain.len())
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    /// Register a peer address. Addresses are opaque strings, stored
    /// verbatim (no normalization) and never removed. Returns false when
    /// the address was already known.
    pub fn register_peer(&mut self, address: impl Into<String>) -> bool {
        self.peers.insert(address.into())
    }

    pub fn peers(&self) -> &HashSet<String> {
        &self.peers
    }

    /// Wholesale chain swap, used only by conflict resolution.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-chain structural and proof verification: every block must link to
/// the hash of its predecessor and carry a proof valid against the
/// predecessor's proof. Vacuously true for chains of length <= 1. Index
/// monotonicity is not checked independently of the hash linkage.
pub fn valid_chain(chain: &[Block]) -> bool {
    for pair in chain.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.previous_hash != prev.hash() {
            return false;
        }
        if !valid_proof(prev.proof, curr.proof) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{Blockchain, valid_chain};
    use crate::blockchain::pow::proof_of_work;
    use crate::blockchain::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};

    /// Extend a ledger by `n` properly mined blocks.
    fn mine_blocks(bc: &mut Blockchain, n: usize) {
        for _ in 0..n {
            let proof = proof_of_work(bc.last_block().proof).expect("pow");
            bc.new_block(proof, None);
        }
    }

    #[test]
    fn genesis_invariant() {
        let bc = Blockchain::new();
        assert_eq!(bc.len(), 1);
        assert_eq!(bc.chain[0].index, 1);
        assert_eq!(bc.chain[0].previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(bc.chain[0].proof, GENESIS_PROOF);
        assert!(bc.chain[0].transactions.is_empty());
        assert!(bc.pending().is_empty());
    }

    #[test]
    fn chain_link_invariant_on_mined_chain() {
        let mut bc = Blockchain::new();
        mine_blocks(&mut bc, 3);

        assert_eq!(bc.len(), 4);
        for (i, pair) in bc.chain.windows(2).enumerate() {
            assert_eq!(pair[1].index, pair[0].index + 1, "at position {i}");
            assert_eq!(pair[1].previous_hash, pair[0].hash(), "at position {i}");
        }
    }

    #[test]
    fn transaction_returns_index_of_next_block() {
        let mut bc = Blockchain::new();
        assert_eq!(bc.new_transaction("alice", "bob", 3), 2);
        assert_eq!(bc.new_transaction("bob", "carol", 1), 2);

        let proof = proof_of_work(bc.last_block().proof).expect("pow");
        bc.new_block(proof, None);
        assert_eq!(bc.new_transaction("carol", "dan", 2), 3);
    }

    #[test]
    fn append_drains_the_pool_into_the_block() {
        let mut bc = Blockchain::new();
        bc.new_transaction("alice", "bob", 3);
        bc.new_transaction("bob", "carol", 1);
        bc.new_transaction("carol", "dan", 7);

        let proof = proof_of_work(bc.last_block().proof).expect("pow");
        let block = bc.new_block(proof, None).clone();

        let senders: Vec<&str> = block
            .transactions
            .iter()
            .map(|t| t.sender.as_str())
            .collect();
        assert_eq!(senders, ["alice", "bob", "carol"]);
        assert!(bc.pending().is_empty());
    }

    #[test]
    fn validator_accepts_untampered_chain() {
        let mut bc = Blockchain::new();
        bc.new_transaction("alice", "bob", 3);
        mine_blocks(&mut bc, 3);
        assert!(valid_chain(&bc.chain));
    }

    #[test]
    fn validator_rejects_tampered_previous_hash() {
        let mut bc = Blockchain::new();
        mine_blocks(&mut bc, 3);

        let mut tampered = bc.chain.clone();
        tampered[2].previous_hash = "0".repeat(64);
        assert!(!valid_chain(&tampered));
    }

    #[test]
    fn validator_rejects_tampered_transaction() {
        let mut bc = Blockchain::new();
        bc.new_transaction("alice", "bob", 3);
        mine_blocks(&mut bc, 2);

        // Rewriting history invalidates the next block's previous_hash.
        let mut tampered = bc.chain.clone();
        tampered[1].transactions[0].amount = 1_000_000;
        assert!(!valid_chain(&tampered));
    }

    #[test]
    fn short_chains_are_vacuously_valid() {
        assert!(valid_chain(&[]));
        assert!(valid_chain(&Blockchain::new().chain));
    }

    #[test]
    fn peer_registration_is_idempotent() {
        let mut bc = Blockchain::new();
        assert!(bc.register_peer("http://127.0.0.1:8081/api/v1"));
        assert!(!bc.register_peer("http://127.0.0.1:8081/api/v1"));
        assert_eq!(bc.peers().len(), 1);
    }

    #[test]
    fn concurrent_transactions_all_land_in_the_next_block() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 25;

        let shared = Arc::new(Mutex::new(Blockchain::new()));
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        let mut bc = shared.lock().expect("mutex poisoned");
                        bc.new_transaction(format!("sender-{t}-{i}"), "sink", 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("worker panicked");
        }

        let mut bc = shared.lock().expect("mutex poisoned");
        let proof = proof_of_work(bc.last_block().proof).expect("pow");
        let block = bc.new_block(proof, None).clone();

        assert_eq!(block.transactions.len(), THREADS * PER_THREAD);
        let unique: std::collections::HashSet<&str> = block
            .transactions
            .iter()
            .map(|t| t.sender.as_str())
            .collect();
        assert_eq!(unique.len(), THREADS * PER_THREAD);
        assert!(bc.pending().is_empty());
    }
}
