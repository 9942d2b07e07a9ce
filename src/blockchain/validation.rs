//! Whole-chain validation

use super::block::Block;
use super::pow::{hash_block_candidate, meets_difficulty};

/// Validates a candidate chain
///
/// Every block after the genesis block must link to its predecessor's hash
/// and carry a nonce that satisfies proof of work over its transactions and
/// index. The genesis block must carry the fixed genesis values. All blocks
/// are checked even after a failure; only the overall verdict is returned.
pub fn is_valid(chain: &[Block]) -> bool {
    let genesis_ok = match chain.first() {
        Some(genesis) => genesis.has_genesis_sentinels(),
        None => return false,
    };

    chain
        .windows(2)
        .map(|pair| is_valid_link(&pair[0], &pair[1]))
        .fold(genesis_ok, |valid, link_ok| valid & link_ok)
}

/// Checks a single block against its predecessor
fn is_valid_link(previous: &Block, block: &Block) -> bool {
    let digest = hash_block_candidate(&previous.hash, &block.data(), block.nonce);

    meets_difficulty(&digest) & (block.previous_block_hash == previous.hash)
}
