//! Proof-of-work hash seam
//!
//! The chain's block hash is X11 over the 80-byte header. The X11 chain itself
//! lives outside this crate; whoever links it provides a [`PowHasher`] and the
//! parameter registry verifies the genesis hash through it.

use super::{double_hash, Hash};

/// Maps serialized header bytes to a 256-bit digest.
///
/// A numerically lower digest means more work.
pub trait PowHasher: Send + Sync {
    fn pow_hash(&self, header: &[u8]) -> Hash;
}

/// Double-SHA256 header hash (the Bitcoin block hash)
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256dHasher;

impl PowHasher for Sha256dHasher {
    fn pow_hash(&self, header: &[u8]) -> Hash {
        double_hash(header)
    }
}

impl<F> PowHasher for F
where
    F: Fn(&[u8]) -> Hash + Send + Sync,
{
    fn pow_hash(&self, header: &[u8]) -> Hash {
        self(header)
    }
}
