use serde::{Deserialize, Serialize};

/// Sender identifier used on mining-reward transactions.
pub const REWARD_SENDER: &str = "0";

/// A transfer of `amount` units from `sender` to `recipient`.
/// Immutable once created; no identity or balance checks are performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: u64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// Mining-reward transaction credited to the mining node.
    pub fn reward(recipient: impl Into<String>, amount: u64) -> Self {
        Self::new(REWARD_SENDER, recipient, amount)
    }
}
