//! Longest-chain selection
//!
//! This is eventual agreement, not Byzantine agreement: any peer that
//! serves a longer chain with valid proof of work wins, whoever mined it.

use crate::api::schema::ChainSnapshot;

/// Picks the longest chain strictly longer than the local one
///
/// Among equally long candidates the first one in peer order wins.
/// Validation is left to the caller.
pub fn select_longest<I>(local_len: usize, candidates: I) -> Option<ChainSnapshot>
where
    I: IntoIterator<Item = ChainSnapshot>,
{
    let mut max_len = local_len;
    let mut longest = None;

    for candidate in candidates {
        if candidate.chain.len() > max_len {
            max_len = candidate.chain.len();
            longest = Some(candidate);
        }
    }

    longest
}
