//! Consensus rule set
//!
//! Protocol constants and soft-fork deployment descriptors for one network.
//! Values are plain data; the validation engine interprets them.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::crypto::Hash;

/// Version prefix a block must carry for its low bits to count as signals
pub const VERSIONBITS_TOP_BITS: u32 = 0x2000_0000;

/// Mask selecting the version prefix
pub const VERSIONBITS_TOP_MASK: u32 = 0xe000_0000;

/// Number of signal bits available to deployments
pub const VERSIONBITS_NUM_BITS: u8 = 29;

/// Known soft-fork deployments
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentPos {
    TestDummy,
    /// BIP68, BIP112 and BIP113
    Csv,
}

impl DeploymentPos {
    pub const ALL: [DeploymentPos; 2] = [DeploymentPos::TestDummy, DeploymentPos::Csv];

    pub fn name(self) -> &'static str {
        match self {
            DeploymentPos::TestDummy => "testdummy",
            DeploymentPos::Csv => "csv",
        }
    }
}

/// Where a deployment stands relative to its time window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeploymentPhase {
    /// Median time past is before `start_time`
    Defined,
    /// Signalling may lock the deployment in
    Started,
    /// `timeout` passed; the deployment can no longer lock in
    TimedOut,
}

/// A version-bits soft-fork descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Deployment {
    /// Bit position within the block version
    pub bit: u8,
    /// Median time past at which signalling starts
    pub start_time: i64,
    /// Median time past after which the deployment is abandoned
    pub timeout: i64,
}

impl Deployment {
    pub fn mask(&self) -> u32 {
        1u32 << self.bit
    }

    pub fn phase(&self, median_time_past: i64) -> DeploymentPhase {
        if median_time_past >= self.timeout {
            DeploymentPhase::TimedOut
        } else if median_time_past >= self.start_time {
            DeploymentPhase::Started
        } else {
            DeploymentPhase::Defined
        }
    }

    /// Whether a block version signals for this deployment
    pub fn is_signalled_by(&self, version: i32) -> bool {
        let version = version as u32;
        (version & VERSIONBITS_TOP_MASK) == VERSIONBITS_TOP_BITS && version & self.mask() != 0
    }
}

/// BIP34 activation point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Bip34Activation {
    pub height: u32,
    pub hash: Hash,
}

/// Consensus update v1.2.0: shorter retarget timespan from `height` on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ConsensusUpgrade {
    pub height: u32,
    pub pow_target_timespan: i64,
}

/// Parameters that influence chain consensus.
#[derive(Clone, Debug, Serialize)]
pub struct ConsensusParams {
    pub hash_genesis_block: Hash,
    pub subsidy_halving_interval: u32,

    pub masternode_payments_start_block: u32,
    pub masternode_payments_increase_block: u32,
    pub masternode_payments_increase_period: u32,
    pub instantsend_keep_lock: u32,
    pub budget_payments_start_block: u32,
    pub budget_payments_cycle_blocks: u32,
    pub budget_payments_window_blocks: u32,
    /// Seconds
    pub budget_proposal_establishing_time: i64,
    pub superblock_start_block: u32,
    pub superblock_cycle: u32,
    pub governance_min_quorum: u32,
    pub governance_filter_elements: u32,
    pub masternode_minimum_confirmations: u32,

    /// Blocks out of `majority_window` needed to enforce an upgrade
    pub majority_enforce_block_upgrade: u32,
    /// Blocks out of `majority_window` needed to reject outdated versions
    pub majority_reject_block_outdated: u32,
    pub majority_window: u32,

    /// `None` where BIP34 is not necessarily active (regtest)
    pub bip34: Option<Bip34Activation>,

    /// Highest permitted target, i.e. the lowest difficulty
    pub pow_limit: Hash,
    pub pow_target_timespan: i64,
    pub pow_target_spacing: i64,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,

    /// Minimum signalling blocks in a confirmation window, e.g. 1916 of 2016 for 95%
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub deployments: BTreeMap<DeploymentPos, Deployment>,

    pub upgrade_1_2_0: Option<ConsensusUpgrade>,
}

impl ConsensusParams {
    pub fn deployment(&self, pos: DeploymentPos) -> Option<&Deployment> {
        self.deployments.get(&pos)
    }

    /// Retarget timespan in force at `height`
    pub fn pow_target_timespan_at(&self, height: u32) -> i64 {
        match self.upgrade_1_2_0 {
            Some(upgrade) if height >= upgrade.height => upgrade.pow_target_timespan,
            _ => self.pow_target_timespan,
        }
    }

    /// Calculates the number of blocks between difficulty adjustments.
    pub fn difficulty_adjustment_interval(&self, height: u32) -> i64 {
        self.pow_target_timespan_at(height) / self.pow_target_spacing
    }
}
