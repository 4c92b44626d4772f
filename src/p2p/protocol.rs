//! Network message framing constants
//!
//! Every P2P message starts with four magic bytes identifying the network,
//! so a peer from another network is detected on the first message.

use serde::{Serialize, Serializer};
use std::fmt;

/// Four-byte network magic
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageStart(pub [u8; 4]);

impl MessageStart {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Whether a raw message begins with this network's magic
    pub fn matches(&self, message: &[u8]) -> bool {
        message.starts_with(&self.0)
    }
}

impl fmt::Debug for MessageStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageStart({})", hex::encode(self.0))
    }
}

impl fmt::Display for MessageStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for MessageStart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_prefix_only() {
        let magic = MessageStart([0x44, 0x49, 0x53, 0x4c]);
        assert!(magic.matches(b"DISLversion"));
        assert!(!magic.matches(b"DISMversion"));
        assert!(!magic.matches(b"DIS"));
        assert_eq!(magic.to_string(), "4449534c");
    }
}
