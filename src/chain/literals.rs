//! Parsing of compiled-in hex literals
//!
//! A failure here means the constants in this crate are wrong, never that a
//! user supplied bad input.

use crate::crypto::{Hash, PublicKey};
use crate::error::{ParamsError, Result};

pub(crate) fn hash_literal(field: &'static str, hex: &str) -> Result<Hash> {
    Hash::from_hex(hex).map_err(|e| ParamsError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

pub(crate) fn pubkey_literal(field: &'static str, hex: &str) -> Result<PublicKey> {
    PublicKey::from_hex(hex).map_err(|e| ParamsError::InvalidPublicKey {
        field,
        reason: e.to_string(),
    })
}
