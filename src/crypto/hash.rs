//! Double-SHA256 hashing and the 256-bit hash type
//!
//! Transaction ids, merkle nodes and base58check checksums all use
//! SHA256(SHA256(x)). Hashes are stored in internal (little-endian) byte
//! order and displayed reversed, the way block explorers print them.

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// 32-byte hash in internal byte order
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The null hash (previous-block hash of a genesis block)
    pub const fn zero() -> Self {
        Hash([0u8; 32])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse a display-order hex string (optionally `0x`-prefixed).
    ///
    /// Exactly 64 hex digits are required; literals in this crate are never
    /// abbreviated.
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let hex = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        let mut arr = [0u8; 32];
        hex::decode_to_slice(hex, &mut arr)?;
        arr.reverse();
        Ok(Hash(arr))
    }

    /// Display-order hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// Big-endian bytes, i.e. the hash read as a 256-bit number
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = self.0;
        out.reverse();
        out
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::zero()
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// SHA256(SHA256(data))
pub fn double_hash(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    Hash(out)
}

/// Hash two hashes together (for Merkle tree)
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut data = Vec::with_capacity(64);
    data.extend_from_slice(&left.0);
    data.extend_from_slice(&right.0);
    double_hash(&data)
}

/// First four bytes of the double hash, as used by base58check
pub fn checksum(data: &[u8]) -> [u8; 4] {
    let hash = double_hash(data);
    [hash.0[0], hash.0[1], hash.0[2], hash.0[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let data = b"hello world";
        assert_eq!(double_hash(data), double_hash(data));
    }

    #[test]
    fn test_double_sha256_known_vector() {
        // sha256d("") is a well-known constant
        let h = double_hash(b"");
        assert_eq!(
            hex::encode(h.0),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_zero_hash() {
        let zero = Hash::zero();
        assert_eq!(zero.0, [0u8; 32]);
        assert!(zero.is_zero());
    }

    #[test]
    fn test_hex_is_display_order() {
        let h = Hash::from_hex(
            "0x000009f0353e76cd91b30ccb8cdc75a8fe32577c8a24b6984d4bb4abd802c04b",
        )
        .unwrap();
        assert_eq!(h.0[31], 0x00);
        assert_eq!(h.0[0], 0x4b);
        assert_eq!(
            h.to_string(),
            "000009f0353e76cd91b30ccb8cdc75a8fe32577c8a24b6984d4bb4abd802c04b"
        );
        assert_eq!(h.to_be_bytes()[2], 0x09);
    }

    #[test]
    fn test_from_hex_rejects_short_and_garbage() {
        assert!(Hash::from_hex("00ff").is_err());
        assert!(Hash::from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_hash_pair_order_matters() {
        let left = double_hash(b"left");
        let right = double_hash(b"right");
        assert_eq!(hash_pair(&left, &right), hash_pair(&left, &right));
        assert_ne!(hash_pair(&left, &right), hash_pair(&right, &left));
    }

    #[test]
    fn test_checksum_is_hash_prefix() {
        let data = b"payload";
        assert_eq!(checksum(data), double_hash(data).0[0..4]);
    }
}
