//! DigitSlate (DS) Chain Parameters Library
//!
//! Consensus and network constants for the three DigitSlate networks
//! (main, test, regtest): genesis block construction, checkpoints, seed
//! nodes, address prefixes and version-bits deployments.
//!
//! Select a network once at startup with [`chain::select_params`] and read it
//! anywhere afterwards with [`chain::params`].

pub mod chain;
pub mod consensus;
pub mod crypto;
pub mod error;
pub mod node;
pub mod p2p;
pub mod wallet;

pub use error::{ParamsError, Result};

/// Protocol constants - HARD-CODED, NEVER CONFIGURABLE
pub mod constants {
    /// Base units per DS coin (8 decimal places)
    pub const COIN: i64 = 100_000_000;

    /// Chain name (short form for tickers)
    pub const CHAIN_NAME: &str = "DS";

    /// Full chain name
    pub const CHAIN_FULL_NAME: &str = "DigitSlate";
}
