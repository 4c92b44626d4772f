//! Base58 prefix tables
//!
//! Each address kind has a fixed byte sequence that is prepended to the
//! payload before base58check encoding. The table for one network must be
//! prefix-free so a decoded byte string maps back to exactly one kind.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Kinds of base58-encoded data
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
    /// BIP44 coin type
    ExtCoinType,
}

impl Base58Type {
    pub const ALL: [Base58Type; 6] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
        Base58Type::ExtCoinType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Base58Type::PubkeyAddress => "pubkey",
            Base58Type::ScriptAddress => "script",
            Base58Type::SecretKey => "secret",
            Base58Type::ExtPublicKey => "xpub",
            Base58Type::ExtSecretKey => "xprv",
            Base58Type::ExtCoinType => "coin-type",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for Base58Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Prefix bytes for every address kind of one network
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    #[serde(serialize_with = "serialize_prefix_map")]
    entries: BTreeMap<Base58Type, Vec<u8>>,
}

impl Base58Prefixes {
    pub fn new(
        pubkey_address: u8,
        script_address: u8,
        secret_key: u8,
        ext_public_key: [u8; 4],
        ext_secret_key: [u8; 4],
        ext_coin_type: [u8; 4],
    ) -> Self {
        let entries = BTreeMap::from([
            (Base58Type::PubkeyAddress, vec![pubkey_address]),
            (Base58Type::ScriptAddress, vec![script_address]),
            (Base58Type::SecretKey, vec![secret_key]),
            (Base58Type::ExtPublicKey, ext_public_key.to_vec()),
            (Base58Type::ExtSecretKey, ext_secret_key.to_vec()),
            (Base58Type::ExtCoinType, ext_coin_type.to_vec()),
        ]);
        Self { entries }
    }

    /// Build from arbitrary entries; used to exercise validation
    pub fn from_entries(entries: impl IntoIterator<Item = (Base58Type, Vec<u8>)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, kind: Base58Type) -> Option<&[u8]> {
        self.entries.get(&kind).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Base58Type, &[u8])> {
        self.entries.iter().map(|(kind, prefix)| (*kind, prefix.as_slice()))
    }

    /// The kind whose prefix starts `data`, with that prefix
    pub fn kind_for(&self, data: &[u8]) -> Option<(Base58Type, &[u8])> {
        self.iter().find(|(_, prefix)| data.starts_with(prefix))
    }

    /// Every kind present, non-empty, and no prefix a leading part of another
    pub fn check(&self) -> Result<(), String> {
        for kind in Base58Type::ALL {
            match self.get(kind) {
                None => return Err(format!("missing prefix for {}", kind)),
                Some([]) => return Err(format!("empty prefix for {}", kind)),
                Some(_) => {}
            }
        }

        let entries: Vec<_> = self.iter().collect();
        for (i, (kind_a, a)) in entries.iter().enumerate() {
            for (kind_b, b) in &entries[i + 1..] {
                if a.starts_with(b) || b.starts_with(a) {
                    return Err(format!(
                        "{} prefix {} collides with {} prefix {}",
                        kind_a,
                        hex::encode(a),
                        kind_b,
                        hex::encode(b)
                    ));
                }
            }
        }
        Ok(())
    }
}

fn serialize_prefix_map<S>(
    entries: &BTreeMap<Base58Type, Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (kind, prefix) in entries {
        map.serialize_entry(kind.name(), &hex::encode(prefix))?;
    }
    map.end()
}
