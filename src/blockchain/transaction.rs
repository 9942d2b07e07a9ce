use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use std::fmt;

/// Sender address used for mining reward transactions
pub const MINING_REWARD_SENDER: &str = "00";

/// Represents an account address on the ledger
///
/// Addresses are opaque strings; no key material is attached to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Address(pub String);

impl Address {
    /// Address that mints mining rewards
    pub fn mining_reward() -> Self {
        Address(MINING_REWARD_SENDER.to_string())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address(value.to_string())
    }
}

/// Represents a transfer of value between two addresses
///
/// Field order is part of the proof-of-work input and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Amount being transferred
    pub amount: f64,

    /// Sender's address
    pub sender: Address,

    /// Recipient's address
    pub recipient: Address,

    /// Unique identifier for the transaction
    pub transaction_id: String,
}

impl Transaction {
    /// Creates a new transaction with a fresh unique id
    ///
    /// # Arguments
    ///
    /// * `amount` - The amount to transfer
    /// * `sender` - The address of the sender
    /// * `recipient` - The address of the recipient
    pub fn new(amount: f64, sender: Address, recipient: Address) -> Self {
        Self::with_id(amount, sender, recipient, new_transaction_id())
    }

    /// Creates a transaction carrying an id assigned elsewhere
    ///
    /// Used when a peer forwards a transaction it already created.
    pub fn with_id(amount: f64, sender: Address, recipient: Address, transaction_id: String) -> Self {
        Transaction {
            amount,
            sender,
            recipient,
            transaction_id,
        }
    }

    /// Creates a mining reward transaction
    pub fn new_reward(recipient: Address, amount: f64) -> Self {
        Self::new(amount, Address::mining_reward(), recipient)
    }

    /// Checks if the transaction mints a mining reward
    pub fn is_mining_reward(&self) -> bool {
        self.sender.0 == MINING_REWARD_SENDER
    }

    /// Checks if the address takes part in the transaction
    pub fn involves(&self, address: &Address) -> bool {
        &self.sender == address || &self.recipient == address
    }
}

/// Generates a dash-free UUID v4
fn new_transaction_id() -> String {
    Uuid::new_v4().simple().to_string()
}
