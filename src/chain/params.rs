//! Per-network chain parameters
//!
//! One plain record per network, built by [`ChainParams::new`]. Every value
//! here is consensus-critical or identifies the network on the wire; changing
//! any of them forks the chain or breaks existing addresses.

use serde::Serialize;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use tracing::debug;

use super::checkpoints::CheckpointData;
use super::literals::{hash_literal, pubkey_literal};
use super::network::Network;
use crate::consensus::{
    Bip34Activation, Block, ConsensusParams, ConsensusUpgrade, Deployment, DeploymentPos,
};
use crate::crypto::{Hash, PublicKey};
use crate::error::Result;
use crate::node::{create_genesis_block, GenesisInputs};
use crate::p2p::{parse_fixed_seeds, DnsSeed, MessageStart, MAINNET_DNS_SEEDS};
use crate::wallet::{AddressError, Base58Prefixes, Base58Type};

const GENESIS_HASH: &str = "0x000009f0353e76cd91b30ccb8cdc75a8fe32577c8a24b6984d4bb4abd802c04b";
const GENESIS_MERKLE_ROOT: &str =
    "0xcc52975a2e4abaab4f00f62410cb896c6aab70b7b8f999c383b60ec92f7b384d";

const SPORK_PUBKEY: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";

/// January 1, 2008
const TESTDUMMY_START: i64 = 1199145601;
/// December 31, 2008
const TESTDUMMY_TIMEOUT: i64 = 1230767999;
/// Aug 9th, 2017
const CSV_START: i64 = 1502280000;
/// Aug 9th, 2018
const CSV_TIMEOUT: i64 = 1533816000;
/// Never times out on regtest
const REGTEST_TIMEOUT: i64 = 999_999_999_999;

/// Everything a node needs to know about the network it runs on
#[derive(Clone, Debug, Serialize)]
pub struct ChainParams {
    pub network: Network,
    pub consensus: ConsensusParams,

    pub message_start: MessageStart,
    pub alert_pubkey: Option<PublicKey>,
    pub default_port: u16,
    /// Seconds a tip may lag wall-clock time before the node counts as syncing
    pub max_tip_age: i64,
    pub prune_after_height: u64,

    pub genesis: Block,
    pub expected_merkle_root: Hash,

    pub dns_seeds: &'static [DnsSeed],
    pub fixed_seeds: Vec<SocketAddr>,
    pub base58_prefixes: Base58Prefixes,

    pub mining_requires_peers: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub testnet_to_be_deprecated_field_rpc: bool,

    pub pool_max_transactions: u32,
    /// Seconds
    pub fulfilled_request_expire_time: i64,
    pub spork_pubkey: PublicKey,
    pub masternode_payments_pubkey: PublicKey,

    pub checkpoints: CheckpointData,
}

impl ChainParams {
    /// Build the parameters for `network`.
    ///
    /// Fails only if a compiled-in literal does not parse. Consistency of the
    /// values is checked separately by [`ChainParams::validate`].
    pub fn new(network: Network) -> Result<Self> {
        let params = match network {
            Network::Main => mainnet()?,
            Network::Testnet => testnet()?,
            Network::Regtest => regtest()?,
        };
        debug!(network = %network, port = params.default_port, "built chain parameters");
        Ok(params)
    }

    pub fn id(&self) -> &'static str {
        self.network.id()
    }

    /// Expected genesis block hash
    pub fn genesis_hash(&self) -> &Hash {
        &self.consensus.hash_genesis_block
    }

    pub fn deployment(&self, pos: DeploymentPos) -> Option<&Deployment> {
        self.consensus.deployment(pos)
    }

    pub fn encode_address(
        &self,
        kind: Base58Type,
        payload: &[u8],
    ) -> std::result::Result<String, AddressError> {
        self.base58_prefixes.encode(kind, payload)
    }

    pub fn decode_address(
        &self,
        encoded: &str,
    ) -> std::result::Result<(Base58Type, Vec<u8>), AddressError> {
        self.base58_prefixes.decode(encoded)
    }
}

fn deployments(testdummy: (i64, i64), csv: (i64, i64)) -> BTreeMap<DeploymentPos, Deployment> {
    BTreeMap::from([
        (
            DeploymentPos::TestDummy,
            Deployment {
                bit: 28,
                start_time: testdummy.0,
                timeout: testdummy.1,
            },
        ),
        (
            DeploymentPos::Csv,
            Deployment {
                bit: 0,
                start_time: csv.0,
                timeout: csv.1,
            },
        ),
    ])
}

fn genesis() -> Result<Block> {
    Ok(create_genesis_block(&GenesisInputs::digitslate_default()?))
}

fn mainnet() -> Result<ChainParams> {
    let consensus = ConsensusParams {
        hash_genesis_block: hash_literal("genesis hash", GENESIS_HASH)?,
        subsidy_halving_interval: 87600, // one year
        masternode_payments_start_block: 240, // 1 day
        masternode_payments_increase_block: 158000,
        masternode_payments_increase_period: 576 * 30,
        instantsend_keep_lock: 24,
        budget_payments_start_block: 22180,
        budget_payments_cycle_blocks: 20160, // 21 days
        budget_payments_window_blocks: 100,
        budget_proposal_establishing_time: 60 * 60 * 24,
        superblock_start_block: 2_100_000_000,
        superblock_cycle: 20160, // 21 days
        governance_min_quorum: 10,
        governance_filter_elements: 20000,
        masternode_minimum_confirmations: 15,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        bip34: Some(Bip34Activation {
            height: 227931,
            hash: hash_literal(
                "bip34 hash",
                "0x000000000000024b89b42a942fe0d9fea3bb44ab7bd1b19115dd6a759c0808b8",
            )?,
        }),
        pow_limit: hash_literal(
            "pow limit",
            "00000fffff000000000000000000000000000000000000000000000000000000",
        )?,
        pow_target_timespan: 24 * 60 * 60, // 1 day
        pow_target_spacing: 6 * 60,
        pow_allow_min_difficulty_blocks: false,
        pow_no_retargeting: false,
        rule_change_activation_threshold: 1916, // 95% of 2016
        miner_confirmation_window: 2016,
        deployments: deployments(
            (TESTDUMMY_START, TESTDUMMY_TIMEOUT),
            (CSV_START, CSV_TIMEOUT),
        ),
        upgrade_1_2_0: Some(ConsensusUpgrade {
            height: 9000,
            pow_target_timespan: 60 * 60,
        }),
    };

    Ok(ChainParams {
        network: Network::Main,
        consensus,
        message_start: MessageStart([0x44, 0x49, 0x53, 0x4c]),
        alert_pubkey: Some(pubkey_literal(
            "alert key",
            "046ae91c49b05aa24ed780f25e3a97a9d87ae0acb585313bdc6dffdab5b879d838895cfb0052b62230575c9b5c34e20bffc37993231db252b67da5dc81139f569a",
        )?),
        default_port: 11226,
        max_tip_age: 6 * 60 * 60,
        prune_after_height: 100_000,
        genesis: genesis()?,
        expected_merkle_root: hash_literal("genesis merkle root", GENESIS_MERKLE_ROOT)?,
        dns_seeds: MAINNET_DNS_SEEDS,
        fixed_seeds: parse_fixed_seeds(&[])?,
        // S / H / P
        base58_prefixes: Base58Prefixes::new(
            63,
            40,
            55,
            [0x08, 0x88, 0xb2, 0x1e],
            [0x09, 0x88, 0xad, 0xe4],
            [0x81, 0x00, 0x00, 0x05],
        ),
        mining_requires_peers: true,
        default_consistency_checks: false,
        require_standard: true,
        mine_blocks_on_demand: false,
        testnet_to_be_deprecated_field_rpc: false,
        pool_max_transactions: 3,
        fulfilled_request_expire_time: 60 * 60,
        spork_pubkey: pubkey_literal("spork key", SPORK_PUBKEY)?,
        masternode_payments_pubkey: pubkey_literal("masternode payments key", SPORK_PUBKEY)?,
        checkpoints: CheckpointData::new(
            &[
                (0, GENESIS_HASH),
                (
                    20000,
                    "0x0000000020353d4f27a281c06351e1045702b5767a6117992a53411be72d0260",
                ),
            ],
            1543277053,
            10000,
            10000.0,
        )?,
    })
}

fn testnet() -> Result<ChainParams> {
    let consensus = ConsensusParams {
        hash_genesis_block: hash_literal("genesis hash", GENESIS_HASH)?,
        subsidy_halving_interval: 7300,
        masternode_payments_start_block: 10000,
        masternode_payments_increase_block: 46000,
        masternode_payments_increase_period: 576,
        instantsend_keep_lock: 6,
        budget_payments_start_block: 2_100_000_000,
        budget_payments_cycle_blocks: 50,
        budget_payments_window_blocks: 10,
        budget_proposal_establishing_time: 60 * 20,
        superblock_start_block: 2_100_000_000,
        superblock_cycle: 24, // hourly
        governance_min_quorum: 1,
        governance_filter_elements: 500,
        masternode_minimum_confirmations: 1,
        majority_enforce_block_upgrade: 51,
        majority_reject_block_outdated: 75,
        majority_window: 100,
        bip34: Some(Bip34Activation {
            height: 21111,
            hash: hash_literal(
                "bip34 hash",
                "0x0000000023b3a96d3484e5abb3755c413e7d41500f8e2a5c3f0dd01299cd8ef8",
            )?,
        }),
        pow_limit: hash_literal(
            "pow limit",
            "00fffff000000000000000000000000000000000000000000000000000000000",
        )?,
        pow_target_timespan: 24 * 60 * 60,
        pow_target_spacing: 3 * 60,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: false,
        rule_change_activation_threshold: 1512, // 75%
        miner_confirmation_window: 2016,
        deployments: deployments(
            (TESTDUMMY_START, TESTDUMMY_TIMEOUT),
            (CSV_START, CSV_TIMEOUT),
        ),
        upgrade_1_2_0: None,
    };

    Ok(ChainParams {
        network: Network::Testnet,
        consensus,
        message_start: MessageStart([0x44, 0x49, 0x53, 0x4d]),
        alert_pubkey: Some(pubkey_literal("alert key", crate::node::GENESIS_OUTPUT_PUBKEY)?),
        default_port: 21226,
        // allow mining on top of old blocks
        max_tip_age: 0x7fff_ffff,
        prune_after_height: 1000,
        genesis: genesis()?,
        expected_merkle_root: hash_literal("genesis merkle root", GENESIS_MERKLE_ROOT)?,
        dns_seeds: &[],
        fixed_seeds: parse_fixed_seeds(&[])?,
        // L / Q / U
        base58_prefixes: Base58Prefixes::new(
            48,
            58,
            68,
            [0x03, 0x35, 0x87, 0xcf],
            [0x08, 0x35, 0x83, 0x94],
            [0x89, 0x00, 0x00, 0x01],
        ),
        mining_requires_peers: true,
        default_consistency_checks: false,
        require_standard: false,
        mine_blocks_on_demand: false,
        testnet_to_be_deprecated_field_rpc: true,
        pool_max_transactions: 3,
        fulfilled_request_expire_time: 5 * 60,
        spork_pubkey: pubkey_literal("spork key", SPORK_PUBKEY)?,
        masternode_payments_pubkey: pubkey_literal("masternode payments key", SPORK_PUBKEY)?,
        checkpoints: CheckpointData::new(&[(0, GENESIS_HASH)], 1543277053, 10, 5000.0)?,
    })
}

fn regtest() -> Result<ChainParams> {
    let consensus = ConsensusParams {
        hash_genesis_block: hash_literal("genesis hash", GENESIS_HASH)?,
        subsidy_halving_interval: 150,
        masternode_payments_start_block: 240,
        masternode_payments_increase_block: 350,
        masternode_payments_increase_period: 10,
        instantsend_keep_lock: 6,
        budget_payments_start_block: 1000,
        budget_payments_cycle_blocks: 50,
        budget_payments_window_blocks: 10,
        budget_proposal_establishing_time: 60 * 20,
        superblock_start_block: 1500,
        superblock_cycle: 10,
        governance_min_quorum: 1,
        governance_filter_elements: 100,
        masternode_minimum_confirmations: 1,
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1000,
        bip34: None,
        pow_limit: hash_literal(
            "pow limit",
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        )?,
        pow_target_timespan: 12 * 60 * 60,
        pow_target_spacing: 2 * 60,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: true,
        rule_change_activation_threshold: 108, // 75%
        miner_confirmation_window: 144,
        deployments: deployments((0, REGTEST_TIMEOUT), (0, REGTEST_TIMEOUT)),
        upgrade_1_2_0: None,
    };

    Ok(ChainParams {
        network: Network::Regtest,
        consensus,
        message_start: MessageStart([0x44, 0x49, 0x53, 0x4e]),
        alert_pubkey: None,
        default_port: 31226,
        max_tip_age: 12 * 60 * 60,
        prune_after_height: 1000,
        genesis: genesis()?,
        expected_merkle_root: hash_literal("genesis merkle root", GENESIS_MERKLE_ROOT)?,
        dns_seeds: &[],
        fixed_seeds: parse_fixed_seeds(&[])?,
        // 8 / C / G
        base58_prefixes: Base58Prefixes::new(
            18,
            28,
            38,
            [0x05, 0x35, 0x87, 0xcf],
            [0x07, 0x35, 0x83, 0x94],
            [0x89, 0x00, 0x00, 0x01],
        ),
        mining_requires_peers: false,
        default_consistency_checks: true,
        require_standard: false,
        mine_blocks_on_demand: true,
        testnet_to_be_deprecated_field_rpc: false,
        pool_max_transactions: 3,
        fulfilled_request_expire_time: 5 * 60,
        spork_pubkey: pubkey_literal("spork key", SPORK_PUBKEY)?,
        masternode_payments_pubkey: pubkey_literal("masternode payments key", SPORK_PUBKEY)?,
        checkpoints: CheckpointData::new(&[(0, GENESIS_HASH)], 1543277053, 10, 5000.0)?,
    })
}
