//! Base58check address codec
//!
//! Address format: Base58(prefix || payload || checksum[0:4]) where the
//! checksum is the double-SHA256 of `prefix || payload`.

use thiserror::Error;

use super::{Base58Prefixes, Base58Type};
use crate::crypto::checksum;

/// Address decoding errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid base58 encoding: {0}")]
    Base58(String),
    #[error("Address too short")]
    TooShort,
    #[error("Invalid checksum")]
    Checksum,
    #[error("Prefix does not belong to this network")]
    UnknownPrefix,
    #[error("Expected {expected} data, found {found}")]
    WrongKind {
        expected: Base58Type,
        found: Base58Type,
    },
    #[error("No prefix defined for {0}")]
    MissingPrefix(Base58Type),
}

impl Base58Prefixes {
    /// Encode `payload` as base58check with the prefix for `kind`
    pub fn encode(&self, kind: Base58Type, payload: &[u8]) -> Result<String, AddressError> {
        let prefix = self.get(kind).ok_or(AddressError::MissingPrefix(kind))?;

        let mut data = Vec::with_capacity(prefix.len() + payload.len() + 4);
        data.extend_from_slice(prefix);
        data.extend_from_slice(payload);
        let check = checksum(&data);
        data.extend_from_slice(&check);

        Ok(bs58::encode(data).into_string())
    }

    /// Decode a base58check string, resolving its prefix to exactly one kind
    pub fn decode(&self, encoded: &str) -> Result<(Base58Type, Vec<u8>), AddressError> {
        let decoded = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| AddressError::Base58(e.to_string()))?;

        if decoded.len() < 4 {
            return Err(AddressError::TooShort);
        }

        let (data, check) = decoded.split_at(decoded.len() - 4);
        if check != checksum(data) {
            return Err(AddressError::Checksum);
        }

        let (kind, prefix) = self.kind_for(data).ok_or(AddressError::UnknownPrefix)?;
        Ok((kind, data[prefix.len()..].to_vec()))
    }

    /// Decode and require a particular kind
    pub fn decode_as(&self, kind: Base58Type, encoded: &str) -> Result<Vec<u8>, AddressError> {
        let (found, payload) = self.decode(encoded)?;
        if found != kind {
            return Err(AddressError::WrongKind {
                expected: kind,
                found,
            });
        }
        Ok(payload)
    }
}
