//! Parameter registry and network selection
//!
//! [`Registry`] is a plain value holding all three networks; pass it (or the
//! selected `&ChainParams`) into consumers where possible.
//!
//! For code that needs a process-wide answer there is a publish-once global:
//! one thread calls [`select_params`] during startup, before workers start,
//! and everybody else reads [`params`]. The selection is stored in a
//! `OnceCell`, so readers on any core observe the fully built value, and it is
//! never replaced afterwards.

use once_cell::sync::OnceCell;
use tracing::info;

use super::network::Network;
use super::params::ChainParams;
use crate::crypto::PowHasher;
use crate::error::{ParamsError, Result};

/// All three network variants
#[derive(Clone, Debug)]
pub struct Registry {
    main: ChainParams,
    testnet: ChainParams,
    regtest: ChainParams,
}

impl Registry {
    /// Build every network's parameters
    pub fn new() -> Result<Self> {
        Ok(Self {
            main: ChainParams::new(Network::Main)?,
            testnet: ChainParams::new(Network::Testnet)?,
            regtest: ChainParams::new(Network::Regtest)?,
        })
    }

    pub fn get(&self, network: Network) -> &ChainParams {
        match network {
            Network::Main => &self.main,
            Network::Testnet => &self.testnet,
            Network::Regtest => &self.regtest,
        }
    }

    /// Look up a network by identifier ("main", "test" or "regtest")
    pub fn lookup(&self, id: &str) -> Result<&ChainParams> {
        let network: Network = id.parse()?;
        Ok(self.get(network))
    }

    /// Look up and fully validate a network by identifier
    pub fn select(&self, id: &str, pow: &dyn PowHasher) -> Result<&ChainParams> {
        let params = self.lookup(id)?;
        params.validate(pow)?;
        Ok(params)
    }
}

static REGISTRY: OnceCell<Registry> = OnceCell::new();
static CURRENT: OnceCell<&'static ChainParams> = OnceCell::new();

/// Process-wide registry, built on first use
pub fn registry() -> Result<&'static Registry> {
    REGISTRY.get_or_try_init(Registry::new)
}

/// Select and publish the process-wide network.
///
/// Validates the parameters (including the genesis hash under `pow`) before
/// publishing them. Selecting the same network again returns the published
/// value; selecting a different one fails with
/// [`ParamsError::AlreadySelected`].
pub fn select_params(id: &str, pow: &dyn PowHasher) -> Result<&'static ChainParams> {
    let selected = registry()?.select(id, pow)?;

    let current = *CURRENT.get_or_init(|| selected);
    if current.network != selected.network {
        return Err(ParamsError::AlreadySelected {
            current: current.id().to_string(),
            requested: selected.id().to_string(),
        });
    }

    info!(network = %current.network, port = current.default_port, "selected network");
    Ok(current)
}

/// The selected network's parameters.
///
/// # Panics
///
/// Panics if called before [`select_params`] succeeded. That is a startup
/// ordering bug, not a runtime condition.
pub fn params() -> &'static ChainParams {
    CURRENT
        .get()
        .copied()
        .expect("select_params must succeed before params() is read")
}

/// The selected network's parameters, if any network was selected yet
pub fn try_params() -> Option<&'static ChainParams> {
    CURRENT.get().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Sha256dHasher;

    #[test]
    fn test_lookup_known_networks() {
        let registry = Registry::new().unwrap();
        assert_eq!(registry.lookup("main").unwrap().network, Network::Main);
        assert_eq!(registry.lookup("test").unwrap().network, Network::Testnet);
        assert_eq!(registry.lookup("regtest").unwrap().network, Network::Regtest);
    }

    #[test]
    fn test_lookup_returns_distinct_variants() {
        let registry = Registry::new().unwrap();
        let main = registry.lookup("main").unwrap();
        let test = registry.lookup("test").unwrap();
        let regtest = registry.lookup("regtest").unwrap();
        assert!(!std::ptr::eq(main, test));
        assert!(!std::ptr::eq(test, regtest));
        assert_ne!(main.message_start, regtest.message_start);
    }

    #[test]
    fn test_lookup_unknown_network() {
        let registry = Registry::new().unwrap();
        assert_eq!(
            registry.lookup("bogus").unwrap_err(),
            ParamsError::UnknownNetwork("bogus".into())
        );
    }

    #[test]
    fn test_select_requires_matching_pow_hash() {
        let registry = Registry::new().unwrap();
        assert!(matches!(
            registry.select("main", &Sha256dHasher),
            Err(ParamsError::GenesisMismatch { .. })
        ));
    }
}
