//! Genesis block generation
//!
//! Builds the hardcoded first block of a DigitSlate chain from literal inputs.
//! Construction is a pure function: the same inputs always give a
//! byte-identical block. Checking the result against expected constants is
//! left to the caller (see `ChainParams::validate`).

use serde::Serialize;

use crate::chain::literals::pubkey_literal;
use crate::consensus::{Block, BlockHeader, Script, Transaction};
use crate::constants::COIN;
use crate::crypto::Hash;
use crate::error::Result;

/// Headline embedded in the genesis coinbase
pub const GENESIS_TIMESTAMP: &str =
    "The Times 27/Nov/2018 GM to Idle Plants and Cut Thousands of Jobs as Sales Slow";

/// Key the genesis output pays to
pub const GENESIS_OUTPUT_PUBKEY: &str = "049e32d8811be7cabf4e0b6010e0694c21181dfc121364d0b10f4ad986bd851a4390b669900ae5be4309bd1842b4b1978069ccbada779340b9c1d303e971570bdf";

/// First push of the coinbase script (0x1d00ffff)
const COINBASE_MARKER_BITS: i64 = 486_604_799;

/// Second push of the coinbase script
const COINBASE_MARKER_NUM: i64 = 4;

/// Literal inputs for one network's genesis block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenesisInputs {
    pub timestamp: String,
    pub output_script: Script,
    pub time: u32,
    pub nonce: u32,
    pub bits: u32,
    pub version: i32,
    pub reward: i64,
}

impl GenesisInputs {
    /// DigitSlate headline and output key with per-network header fields
    pub fn digitslate(time: u32, nonce: u32, bits: u32, version: i32, reward: i64) -> Result<Self> {
        let key = pubkey_literal("genesis output key", GENESIS_OUTPUT_PUBKEY)?;
        Ok(Self {
            timestamp: GENESIS_TIMESTAMP.to_string(),
            output_script: Script::pay_to_pubkey(key.as_bytes()),
            time,
            nonce,
            bits,
            version,
            reward,
        })
    }

    /// Inputs shared by every DigitSlate network
    pub fn digitslate_default() -> Result<Self> {
        Self::digitslate(1543278791, 2614551, 0x1e0ffff0, 1, 50 * COIN)
    }

    /// Coinbase script: `<486604799> <4> <timestamp>`
    pub fn coinbase_script(&self) -> Script {
        Script::new()
            .push_int(COINBASE_MARKER_BITS)
            .push_num(COINBASE_MARKER_NUM)
            .push_slice(self.timestamp.as_bytes())
    }
}

/// Create the genesis block
///
/// This function produces a reproducible, byte-for-byte identical genesis block.
pub fn create_genesis_block(inputs: &GenesisInputs) -> Block {
    let coinbase = Transaction::coinbase(
        inputs.coinbase_script(),
        inputs.reward,
        inputs.output_script.clone(),
    );

    let mut block = Block::new(
        BlockHeader {
            version: inputs.version,
            prev_hash: Hash::zero(),
            merkle_root: Hash::zero(),
            time: inputs.time,
            bits: inputs.bits,
            nonce: inputs.nonce,
        },
        vec![coinbase],
    );
    block.header.merkle_root = block.compute_merkle_root();
    block
}
