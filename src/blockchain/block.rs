use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transaction::Transaction;

/// Nonce carried by the genesis block
pub const GENESIS_NONCE: u64 = 100;

/// Hash and previous hash carried by the genesis block
pub const GENESIS_HASH: &str = "0";

/// Represents a block in the blockchain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Index of the block in the chain, starting at 1
    pub index: u64,

    /// Timestamp when the block was created
    #[schema(value_type = String, example = "2023-01-01T12:00:00Z")]
    pub timestamp: DateTime<Utc>,

    /// List of transactions included in this block
    pub transactions: Vec<Transaction>,

    /// Proof of work
    pub nonce: u64,

    /// Hash of this block
    pub hash: String,

    /// Hash of the previous block
    pub previous_block_hash: String,
}

/// The part of a block covered by proof of work
///
/// Serializes as `{"transactions":[...],"index":n}`; the field order is fixed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BlockData<'a> {
    pub transactions: &'a [Transaction],
    pub index: u64,
}

impl<'a> BlockData<'a> {
    pub fn new(transactions: &'a [Transaction], index: u64) -> Self {
        BlockData { transactions, index }
    }
}

impl Block {
    /// Creates a new block stamped with the current time
    ///
    /// # Arguments
    ///
    /// * `index` - The index of the block in the chain
    /// * `transactions` - The transactions sealed in the block
    /// * `nonce` - The proof of work
    /// * `previous_block_hash` - The hash of the previous block
    /// * `hash` - The digest found by proof of work
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        nonce: u64,
        previous_block_hash: String,
        hash: String,
    ) -> Self {
        Block {
            index,
            timestamp: Utc::now(),
            transactions,
            nonce,
            hash,
            previous_block_hash,
        }
    }

    /// Creates the genesis block
    pub fn genesis() -> Self {
        Block::new(
            1,
            Vec::new(),
            GENESIS_NONCE,
            GENESIS_HASH.to_string(),
            GENESIS_HASH.to_string(),
        )
    }

    /// Checks the fixed values every genesis block carries
    pub fn has_genesis_sentinels(&self) -> bool {
        self.nonce == GENESIS_NONCE
            && self.previous_block_hash == GENESIS_HASH
            && self.hash == GENESIS_HASH
            && self.transactions.is_empty()
    }

    /// The proof-of-work payload of this block
    pub fn data(&self) -> BlockData<'_> {
        BlockData::new(&self.transactions, self.index)
    }
}
