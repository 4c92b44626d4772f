//! Startup validation of chain parameters
//!
//! Run once before any subsystem reads the parameters. A failure means the
//! compiled-in constants are inconsistent and the process must not continue.

use std::collections::HashSet;
use tracing::{error, info};

use super::params::ChainParams;
use crate::consensus::{compact_to_target, hash_meets_target, DeploymentPos, VERSIONBITS_NUM_BITS};
use crate::crypto::PowHasher;
use crate::error::{ParamsError, Result};

impl ChainParams {
    /// Full validation, including the genesis proof-of-work hash computed
    /// with `pow`.
    pub fn validate(&self, pow: &dyn PowHasher) -> Result<()> {
        self.validate_static()?;

        let computed = self.genesis.hash_with(pow);
        if computed != self.consensus.hash_genesis_block {
            return Err(self.report(ParamsError::GenesisMismatch {
                network: self.id().to_string(),
                field: "hash",
                expected: self.consensus.hash_genesis_block.to_hex(),
                computed: computed.to_hex(),
            }));
        }

        info!(network = %self.network, genesis = %computed, "chain parameters validated");
        Ok(())
    }

    /// Every check that does not need the proof-of-work hash function
    pub fn validate_static(&self) -> Result<()> {
        self.check_genesis()
            .and_then(|_| self.checkpoints.check(self.genesis_hash()))
            .and_then(|_| {
                self.base58_prefixes
                    .check()
                    .map_err(ParamsError::InvalidPrefixes)
            })
            .and_then(|_| self.check_deployments())
            .and_then(|_| self.check_consensus())
            .map_err(|e| self.report(e))
    }

    fn report(&self, err: ParamsError) -> ParamsError {
        error!(network = %self.network, error = %err, "chain parameters rejected");
        err
    }

    fn check_genesis(&self) -> Result<()> {
        let block = &self.genesis;
        if !block.is_genesis() {
            return Err(ParamsError::InvalidConsensus(
                "genesis block has a previous hash".into(),
            ));
        }

        let computed = block.compute_merkle_root();
        for (field, value) in [
            ("header merkle root", block.header.merkle_root),
            ("merkle root", self.expected_merkle_root),
        ] {
            if value != computed {
                return Err(ParamsError::GenesisMismatch {
                    network: self.id().to_string(),
                    field,
                    expected: value.to_hex(),
                    computed: computed.to_hex(),
                });
            }
        }

        let target = compact_to_target(block.header.bits).ok_or_else(|| {
            ParamsError::InvalidConsensus(format!(
                "genesis bits {:08x} do not encode a target",
                block.header.bits
            ))
        })?;
        if target > self.consensus.pow_limit.to_be_bytes() {
            return Err(ParamsError::InvalidConsensus(format!(
                "genesis target {} exceeds pow limit {}",
                hex::encode(target),
                self.consensus.pow_limit
            )));
        }
        if !hash_meets_target(self.genesis_hash(), block.header.bits) {
            return Err(ParamsError::InvalidConsensus(format!(
                "genesis hash {} does not meet its own bits {:08x}",
                self.genesis_hash(),
                block.header.bits
            )));
        }
        Ok(())
    }

    fn check_deployments(&self) -> Result<()> {
        let consensus = &self.consensus;
        let mut bits = HashSet::new();

        for pos in DeploymentPos::ALL {
            let deployment = consensus.deployment(pos).ok_or_else(|| {
                ParamsError::InvalidDeployments(format!("{} is not defined", pos.name()))
            })?;

            if deployment.bit >= VERSIONBITS_NUM_BITS {
                return Err(ParamsError::InvalidDeployments(format!(
                    "{} uses bit {}, only {} available",
                    pos.name(),
                    deployment.bit,
                    VERSIONBITS_NUM_BITS
                )));
            }
            if !bits.insert(deployment.bit) {
                return Err(ParamsError::InvalidDeployments(format!(
                    "{} reuses bit {}",
                    pos.name(),
                    deployment.bit
                )));
            }
            if deployment.start_time >= deployment.timeout {
                return Err(ParamsError::InvalidDeployments(format!(
                    "{} times out before it starts",
                    pos.name()
                )));
            }
        }

        let threshold = consensus.rule_change_activation_threshold;
        let window = consensus.miner_confirmation_window;
        if threshold == 0 || threshold > window {
            return Err(ParamsError::InvalidDeployments(format!(
                "activation threshold {} outside confirmation window {}",
                threshold, window
            )));
        }
        Ok(())
    }

    fn check_consensus(&self) -> Result<()> {
        let c = &self.consensus;

        if !(0 < c.majority_enforce_block_upgrade
            && c.majority_enforce_block_upgrade <= c.majority_reject_block_outdated
            && c.majority_reject_block_outdated <= c.majority_window)
        {
            return Err(ParamsError::InvalidConsensus(format!(
                "majority thresholds {}/{} out of window {}",
                c.majority_enforce_block_upgrade,
                c.majority_reject_block_outdated,
                c.majority_window
            )));
        }

        if c.pow_target_spacing <= 0 || c.pow_target_timespan < c.pow_target_spacing {
            return Err(ParamsError::InvalidConsensus(format!(
                "target timespan {} shorter than spacing {}",
                c.pow_target_timespan, c.pow_target_spacing
            )));
        }
        if let Some(upgrade) = c.upgrade_1_2_0 {
            if upgrade.pow_target_timespan < c.pow_target_spacing {
                return Err(ParamsError::InvalidConsensus(format!(
                    "upgraded timespan {} shorter than spacing {}",
                    upgrade.pow_target_timespan, c.pow_target_spacing
                )));
            }
        }

        if c.pow_limit.is_zero() {
            return Err(ParamsError::InvalidConsensus("pow limit is zero".into()));
        }
        if c.subsidy_halving_interval == 0 {
            return Err(ParamsError::InvalidConsensus("halving interval is zero".into()));
        }
        if let Some(bip34) = c.bip34 {
            if bip34.hash.is_zero() {
                return Err(ParamsError::InvalidConsensus(
                    "bip34 activation without a block hash".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Network;
    use crate::consensus::Deployment;
    use crate::crypto::{Hash, Sha256dHasher};
    use crate::wallet::{Base58Prefixes, Base58Type};

    fn mainnet() -> ChainParams {
        ChainParams::new(Network::Main).unwrap()
    }

    /// Stands in for X11: answers with the expected hash for the one header it knows
    fn known_genesis(params: &ChainParams) -> impl Fn(&[u8]) -> Hash {
        let header = params.genesis.header.to_bytes();
        let hash = *params.genesis_hash();
        move |bytes: &[u8]| {
            if bytes == &header[..] {
                hash
            } else {
                Hash::zero()
            }
        }
    }

    #[test]
    fn test_all_networks_pass_static_validation() {
        for network in Network::ALL {
            let params = ChainParams::new(network).unwrap();
            assert_eq!(params.validate_static(), Ok(()), "{}", network);
        }
    }

    #[test]
    fn test_full_validation_with_matching_hasher() {
        let params = mainnet();
        let pow = known_genesis(&params);
        assert_eq!(params.validate(&pow), Ok(()));
    }

    #[test]
    fn test_wrong_pow_hash_is_fatal() {
        let params = mainnet();
        let err = params.validate(&Sha256dHasher).unwrap_err();
        assert!(matches!(err, ParamsError::GenesisMismatch { field: "hash", .. }));
    }

    #[test]
    fn test_tampered_genesis_breaks_merkle_root() {
        let mut params = mainnet();
        params.genesis.transactions[0].outputs[0].value += 1;
        let err = params.validate_static().unwrap_err();
        assert!(matches!(
            err,
            ParamsError::GenesisMismatch {
                field: "header merkle root",
                ..
            }
        ));
    }

    #[test]
    fn test_wrong_expected_merkle_root() {
        let mut params = mainnet();
        params.expected_merkle_root = Hash([1; 32]);
        assert!(matches!(
            params.validate_static(),
            Err(ParamsError::GenesisMismatch { field: "merkle root", .. })
        ));
    }

    #[test]
    fn test_duplicate_deployment_bit_rejected() {
        let mut params = mainnet();
        params.consensus.deployments.insert(
            DeploymentPos::TestDummy,
            Deployment {
                bit: 0,
                start_time: 0,
                timeout: 1,
            },
        );
        assert!(matches!(
            params.validate_static(),
            Err(ParamsError::InvalidDeployments(_))
        ));
    }

    #[test]
    fn test_out_of_range_bit_rejected() {
        let mut params = mainnet();
        params.consensus.deployments.insert(
            DeploymentPos::TestDummy,
            Deployment {
                bit: 29,
                start_time: 0,
                timeout: 1,
            },
        );
        assert!(params.validate_static().is_err());
    }

    #[test]
    fn test_threshold_above_window_rejected() {
        let mut params = mainnet();
        params.consensus.rule_change_activation_threshold = 2017;
        assert!(matches!(
            params.validate_static(),
            Err(ParamsError::InvalidDeployments(_))
        ));
    }

    #[test]
    fn test_colliding_prefixes_rejected() {
        let mut params = mainnet();
        params.base58_prefixes = Base58Prefixes::from_entries(
            Base58Type::ALL.iter().map(|kind| (*kind, vec![0x3f])),
        );
        assert!(matches!(
            params.validate_static(),
            Err(ParamsError::InvalidPrefixes(_))
        ));
    }

    #[test]
    fn test_genesis_bits_above_pow_limit_rejected() {
        let mut params = mainnet();
        params.consensus.pow_limit = Hash::from_hex(
            "000000ffff000000000000000000000000000000000000000000000000000000",
        )
        .unwrap();
        assert!(matches!(
            params.validate_static(),
            Err(ParamsError::InvalidConsensus(_))
        ));
    }

    #[test]
    fn test_majority_thresholds_checked() {
        let mut params = mainnet();
        params.consensus.majority_reject_block_outdated = 1001;
        assert!(matches!(
            params.validate_static(),
            Err(ParamsError::InvalidConsensus(_))
        ));
    }
}
