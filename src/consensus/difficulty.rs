//! Compact difficulty encoding
//!
//! Converts between the 32-bit "bits" field of a header and the 256-bit
//! target it stands for. Targets are big-endian byte arrays so they compare
//! numerically with plain array ordering.

use crate::crypto::Hash;

/// 256-bit big-endian target
pub type Target = [u8; 32];

/// Sign bit of the compact mantissa
const COMPACT_SIGN_BIT: u32 = 0x0080_0000;

/// Convert compact difficulty to 256-bit target
///
/// Returns `None` for negative or overflowing encodings.
pub fn compact_to_target(compact: u32) -> Option<Target> {
    let exponent = (compact >> 24) as isize;
    let mantissa = compact & 0x007f_ffff;

    let mut target = [0u8; 32];
    if mantissa == 0 {
        return Some(target);
    }
    if compact & COMPACT_SIGN_BIT != 0 {
        return None;
    }

    let digits = [(mantissa >> 16) as u8, (mantissa >> 8) as u8, mantissa as u8];
    for (k, byte) in digits.iter().enumerate() {
        let pos = 32 - exponent + k as isize;
        if pos < 0 {
            if *byte != 0 {
                return None;
            }
        } else if pos < 32 {
            target[pos as usize] = *byte;
        }
        // pos >= 32 falls off the low end (exponent < 3)
    }

    Some(target)
}

/// Convert 256-bit target to compact difficulty
pub fn target_to_compact(target: &Target) -> u32 {
    let first_nonzero = match target.iter().position(|&b| b != 0) {
        Some(i) => i,
        None => return 0,
    };

    let mut size = (32 - first_nonzero) as u32;
    let byte_at = |i: usize| target.get(i).copied().unwrap_or(0) as u32;
    let mut mantissa = (byte_at(first_nonzero) << 16)
        | (byte_at(first_nonzero + 1) << 8)
        | byte_at(first_nonzero + 2);

    if mantissa & COMPACT_SIGN_BIT != 0 {
        mantissa >>= 8;
        size += 1;
    }

    (size << 24) | mantissa
}

/// Whether `hash`, read as a number, is at or below the target of `bits`
pub fn hash_meets_target(hash: &Hash, bits: u32) -> bool {
    match compact_to_target(bits) {
        Some(target) => hash.to_be_bytes() <= target,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_bits_target() {
        let target = compact_to_target(0x1e0ffff0).unwrap();
        assert_eq!(
            hex::encode(target),
            "00000ffff0000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_bitcoin_limit_roundtrip() {
        let target = compact_to_target(0x1d00ffff).unwrap();
        assert_eq!(target[4], 0xff);
        assert_eq!(target[5], 0xff);
        assert_eq!(target_to_compact(&target), 0x1d00ffff);
    }

    #[test]
    fn test_small_exponent_shifts_right() {
        let target = compact_to_target(0x02123456).unwrap();
        assert_eq!(&target[30..], &[0x12, 0x34]);
        assert_eq!(target_to_compact(&target), 0x02123400);
    }

    #[test]
    fn test_negative_and_overflow_rejected() {
        assert_eq!(compact_to_target(0x04923456), None);
        assert_eq!(compact_to_target(0xff123456), None);
        assert!(compact_to_target(0x01003456).is_some());
    }

    #[test]
    fn test_compact_sign_bit_renormalized() {
        let mut target = [0u8; 32];
        target[31] = 0x80;
        assert_eq!(target_to_compact(&target), 0x02008000);
    }

    #[test]
    fn test_zero_target() {
        assert_eq!(target_to_compact(&[0u8; 32]), 0);
        assert_eq!(compact_to_target(0x1d000000), Some([0u8; 32]));
    }

    #[test]
    fn test_hash_meets_target() {
        let easy = Hash::from_hex(
            "000009f0353e76cd91b30ccb8cdc75a8fe32577c8a24b6984d4bb4abd802c04b",
        )
        .unwrap();
        assert!(hash_meets_target(&easy, 0x1e0ffff0));
        assert!(!hash_meets_target(&easy, 0x1d00ffff));
    }
}
