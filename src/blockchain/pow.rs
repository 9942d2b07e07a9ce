//! Proof of work: digest computation, difficulty check and nonce search

use log::debug;
use sha2::{Digest, Sha256};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::block::BlockData;

/// Prefix every valid block digest starts with
pub const DIFFICULTY_PREFIX: &str = "0000";

/// How often the search loop reports progress
const PROGRESS_INTERVAL: u64 = 100_000;

/// Shared flag used to abandon a running nonce search
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the search holding this flag to stop
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Hashes a block candidate
///
/// The digest input is `previous_hash + nonce + json(block_data)`.
///
/// # Returns
///
/// The SHA-256 digest as a 64 character lowercase hex string
pub fn hash_block_candidate(previous_hash: &str, block_data: &BlockData<'_>, nonce: u64) -> String {
    let data = serde_json::to_string(block_data).expect("block data serializes to JSON");

    let mut hasher = Sha256::new();
    hasher.update(previous_hash.as_bytes());
    hasher.update(nonce.to_string().as_bytes());
    hasher.update(data.as_bytes());

    hex::encode(hasher.finalize())
}

/// Checks whether a digest satisfies the difficulty target
pub fn meets_difficulty(digest: &str) -> bool {
    digest.starts_with(DIFFICULTY_PREFIX)
}

/// Finds the smallest nonce whose digest satisfies the difficulty target
pub fn mine(previous_hash: &str, block_data: &BlockData<'_>) -> u64 {
    let never = CancelFlag::new();
    // an uncancelled search only returns once it succeeds
    mine_cancellable(previous_hash, block_data, &never).unwrap_or_default()
}

/// Nonce search that gives up once `cancel` is raised
///
/// # Returns
///
/// The smallest satisfying nonce, or `None` if the search was cancelled
pub fn mine_cancellable(
    previous_hash: &str,
    block_data: &BlockData<'_>,
    cancel: &CancelFlag,
) -> Option<u64> {
    let mut nonce = 0u64;

    loop {
        if cancel.is_cancelled() {
            debug!("Nonce search for block {} cancelled at {}", block_data.index, nonce);
            return None;
        }

        let digest = hash_block_candidate(previous_hash, block_data, nonce);
        if meets_difficulty(&digest) {
            return Some(nonce);
        }

        nonce += 1;

        if nonce % PROGRESS_INTERVAL == 0 {
            debug!("Mining block {}: {} attempts", block_data.index, nonce);
        }
    }
}
