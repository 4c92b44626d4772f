//! Network identifiers

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ParamsError;

/// The closed set of networks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main,
    #[serde(rename = "test")]
    Testnet,
    Regtest,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Main, Network::Testnet, Network::Regtest];

    /// Identifier used on the command line and in logs
    pub fn id(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Testnet => "test",
            Network::Regtest => "regtest",
        }
    }
}

impl FromStr for Network {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .iter()
            .copied()
            .find(|network| network.id() == s)
            .ok_or_else(|| ParamsError::UnknownNetwork(s.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_identifiers() {
        assert_eq!("main".parse::<Network>(), Ok(Network::Main));
        assert_eq!("test".parse::<Network>(), Ok(Network::Testnet));
        assert_eq!("regtest".parse::<Network>(), Ok(Network::Regtest));
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(
            "bogus".parse::<Network>(),
            Err(ParamsError::UnknownNetwork("bogus".to_string()))
        );
        // identifiers are exact, not case-folded
        assert!("Main".parse::<Network>().is_err());
        assert!("testnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>(), Ok(network));
        }
    }

    #[test]
    fn test_serializes_as_identifier() {
        for network in Network::ALL {
            assert_eq!(
                serde_json::to_value(network).unwrap(),
                serde_json::Value::from(network.id())
            );
        }
    }
}
