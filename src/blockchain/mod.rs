pub mod block;
pub mod model;
pub mod pow;

pub use block::Block;
pub use model::{Blockchain, valid_chain};
pub use pow::{PowError, proof_of_work, valid_proof};

/// Proof value hardcoded into the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel previous-hash of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Hex prefix a guess hash must carry for a proof to be accepted.
/// Fixed difficulty (16 bits of leading zero); not adjustable.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Units credited to the mining node per sealed block.
pub const MINING_REWARD: u64 = 1;

/// Cap on the brute-force proof search. The expected search length at the
/// fixed difficulty is ~65k candidates, so hitting this cap means something
/// is wrong rather than bad luck.
pub const MAX_PROOF_ITERATIONS: u64 = 50_000_000;
