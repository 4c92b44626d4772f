//! Merkle root computation
//!
//! Commits to the ordered transaction set of a block.

use super::{hash_pair, Hash};

/// Merkle root over transaction ids, in block order.
///
/// Empty input gives the zero hash and a single id is its own root. A level
/// with an odd count pairs its last id with itself, so `[a, b, c]` and
/// `[a, b, c, c]` share a root; rejecting duplicate transactions is up to
/// block validation.
pub fn compute_merkle_root(txids: &[Hash]) -> Hash {
    let mut level = match txids {
        [] => return Hash::zero(),
        [only] => return *only,
        _ => txids.to_vec(),
    };

    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| hash_pair(&pair[0], &pair[pair.len() - 1]))
            .collect();
    }

    level[0]
}
