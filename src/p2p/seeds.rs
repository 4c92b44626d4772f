//! Seed node configuration
//!
//! Hardcoded bootstrap data for initial peer discovery. How DNS seeds and
//! fixed seeds are combined is up to the discovery subsystem; this module
//! only describes them.

use serde::Serialize;
use std::net::SocketAddr;

use crate::error::{ParamsError, Result};

/// A DNS seed: a hostname that resolves to live peers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: &'static str,
    pub host: &'static str,
}

impl DnsSeed {
    pub const fn new(name: &'static str, host: &'static str) -> Self {
        Self { name, host }
    }
}

/// Mainnet DNS seeds
pub const MAINNET_DNS_SEEDS: &[DnsSeed] = &[
    DnsSeed::new("ds1", "ds1.digitslate.io"),
    DnsSeed::new("ds2", "ds2.digitslate.io"),
    DnsSeed::new("ds3", "ds3.digitslate.io"),
    DnsSeed::new("ds4", "ds4.digitslate.io"),
    DnsSeed::new("ds5", "ds5.digitslate.io"),
];

/// Parse seed address to SocketAddr
pub fn parse_seed(seed: &str) -> Option<SocketAddr> {
    seed.parse().ok()
}

/// Parse a compiled-in fixed seed list. Any malformed entry is fatal.
pub fn parse_fixed_seeds(seeds: &[&str]) -> Result<Vec<SocketAddr>> {
    seeds
        .iter()
        .map(|seed| parse_seed(seed).ok_or_else(|| ParamsError::InvalidSeed(seed.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_dns_seeds() {
        assert_eq!(MAINNET_DNS_SEEDS.len(), 5);
        assert!(MAINNET_DNS_SEEDS
            .iter()
            .all(|seed| seed.host.ends_with(".digitslate.io")));
    }

    #[test]
    fn test_parse_seed_valid() {
        let addr = parse_seed("127.0.0.1:11226");
        assert_eq!(addr.map(|a| a.port()), Some(11226));
        assert!(parse_seed("[::1]:21226").is_some());
    }

    #[test]
    fn test_parse_seed_invalid() {
        assert!(parse_seed("invalid-address").is_none());
        // hostnames need resolution and are not fixed seeds
        assert!(parse_seed("ds1.digitslate.io:11226").is_none());
    }

    #[test]
    fn test_parse_fixed_seeds_valid() {
        let parsed = parse_fixed_seeds(&["10.0.0.1:11226", "[::1]:11226"]).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parse_fixed_seeds(&[]), Ok(Vec::new()));
    }

    #[test]
    fn test_parse_fixed_seeds_rejects_bad_literal() {
        assert_eq!(
            parse_fixed_seeds(&["10.0.0.1:11226", "10.0.0.300:11226", "10.0.0.2"]),
            Err(ParamsError::InvalidSeed("10.0.0.300:11226".into()))
        );
        assert_eq!(
            parse_fixed_seeds(&["10.0.0.2"]),
            Err(ParamsError::InvalidSeed("10.0.0.2".into()))
        );
    }
}
