//! Checkpoint table
//!
//! Hardcoded (height, hash) anchors. The table only guarantees its own
//! structure; rejecting mismatching chains and limiting reorgs is done by the
//! validation engine using the lookups below.

use serde::Serialize;

use super::literals::hash_literal;
use crate::crypto::Hash;
use crate::error::{ParamsError, Result};

/// Relative cost of verifying a block past the last checkpoint
const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    pub height: u32,
    pub hash: Hash,
}

/// Checkpoints plus the sync-estimation metadata that goes with them
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckpointData {
    checkpoints: Vec<Checkpoint>,
    /// UNIX timestamp of the last checkpoint block
    pub last_checkpoint_time: i64,
    /// Total transactions between genesis and the last checkpoint
    pub transactions_last_checkpoint: u64,
    /// Estimated transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

impl CheckpointData {
    /// Parse a literal table. Order is kept as written so [`check`] can
    /// catch mistakes in it.
    ///
    /// [`check`]: CheckpointData::check
    pub fn new(
        entries: &[(u32, &str)],
        last_checkpoint_time: i64,
        transactions_last_checkpoint: u64,
        transactions_per_day: f64,
    ) -> Result<Self> {
        let checkpoints = entries
            .iter()
            .map(|(height, hash)| {
                Ok(Checkpoint {
                    height: *height,
                    hash: hash_literal("checkpoint", hash)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            checkpoints,
            last_checkpoint_time,
            transactions_last_checkpoint,
            transactions_per_day,
        })
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Expected hash at `height`, if checkpointed
    pub fn get(&self, height: u32) -> Option<&Hash> {
        self.checkpoints
            .binary_search_by_key(&height, |cp| cp.height)
            .ok()
            .map(|i| &self.checkpoints[i].hash)
    }

    /// False only when a checkpoint exists at `height` and disagrees with `hash`
    pub fn check_block(&self, height: u32, hash: &Hash) -> bool {
        self.get(height).map_or(true, |expected| expected == hash)
    }

    pub fn last_checkpoint(&self) -> Option<&Checkpoint> {
        self.checkpoints.last()
    }

    /// Highest checkpoint at or below `height`
    pub fn highest_at_or_below(&self, height: u32) -> Option<&Checkpoint> {
        let idx = self.checkpoints.partition_point(|cp| cp.height <= height);
        idx.checked_sub(1).map(|i| &self.checkpoints[i])
    }

    /// Whether a reorg forking at `fork_height` is allowed for a node that
    /// has verified its chain up to `verified_height`.
    ///
    /// The fork point may not lie below the highest checkpoint already passed.
    pub fn allows_reorg(&self, fork_height: u32, verified_height: u32) -> bool {
        match self.highest_at_or_below(verified_height) {
            Some(cp) => fork_height >= cp.height,
            None => true,
        }
    }

    /// Rough fraction of the chain verified, in [0, 1].
    ///
    /// `chain_tx` is the transaction count up to the tip, `tip_time` its
    /// timestamp and `now` the current time. Blocks before the last checkpoint
    /// count as cheap; later ones weigh [`SIGCHECK_VERIFICATION_FACTOR`] times more.
    pub fn estimate_progress(&self, chain_tx: u64, tip_time: i64, now: i64) -> f64 {
        let per_day = self.transactions_per_day;
        let (work_before, work_after) = if chain_tx <= self.transactions_last_checkpoint {
            let cheap_before = chain_tx as f64;
            let cheap_after = (self.transactions_last_checkpoint - chain_tx) as f64;
            let elapsed = (now - self.last_checkpoint_time).max(0) as f64;
            let expensive_after = elapsed / SECONDS_PER_DAY * per_day;
            (
                cheap_before,
                cheap_after + expensive_after * SIGCHECK_VERIFICATION_FACTOR,
            )
        } else {
            let cheap_before = self.transactions_last_checkpoint as f64;
            let expensive_before = (chain_tx - self.transactions_last_checkpoint) as f64;
            let elapsed = (now - tip_time).max(0) as f64;
            let expensive_after = elapsed / SECONDS_PER_DAY * per_day;
            (
                cheap_before + expensive_before * SIGCHECK_VERIFICATION_FACTOR,
                expensive_after * SIGCHECK_VERIFICATION_FACTOR,
            )
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        work_before / total
    }

    /// Structural invariants: height 0 is the genesis hash and heights
    /// strictly increase.
    pub fn check(&self, genesis_hash: &Hash) -> Result<()> {
        let first = self
            .checkpoints
            .first()
            .ok_or_else(|| ParamsError::InvalidCheckpoints("table is empty".into()))?;

        if first.height != 0 {
            return Err(ParamsError::InvalidCheckpoints(format!(
                "first checkpoint is at height {}, not 0",
                first.height
            )));
        }
        if first.hash != *genesis_hash {
            return Err(ParamsError::InvalidCheckpoints(format!(
                "height 0 is {}, genesis is {}",
                first.hash, genesis_hash
            )));
        }

        for pair in self.checkpoints.windows(2) {
            if pair[1].height <= pair[0].height {
                return Err(ParamsError::InvalidCheckpoints(format!(
                    "height {} follows {}",
                    pair[1].height, pair[0].height
                )));
            }
        }

        if self.transactions_per_day.is_nan() || self.transactions_per_day < 0.0 {
            return Err(ParamsError::InvalidCheckpoints(
                "transactions per day must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "000009f0353e76cd91b30ccb8cdc75a8fe32577c8a24b6984d4bb4abd802c04b";
    const CP_20000: &str = "0000000020353d4f27a281c06351e1045702b5767a6117992a53411be72d0260";

    fn genesis() -> Hash {
        Hash::from_hex(GENESIS).unwrap()
    }

    fn table() -> CheckpointData {
        let entries = [(0, GENESIS), (20000, CP_20000)];
        CheckpointData::new(&entries, 1543277053, 10000, 10000.0).unwrap()
    }

    #[test]
    fn test_lookup() {
        let t = table();
        assert_eq!(t.get(0), Some(&genesis()));
        assert_eq!(t.get(20000).map(|h| h.to_hex()), Some(CP_20000.to_string()));
        assert_eq!(t.get(1), None);
        assert_eq!(t.last_checkpoint().map(|cp| cp.height), Some(20000));
    }

    #[test]
    fn test_check_block() {
        let t = table();
        assert!(t.check_block(0, &genesis()));
        assert!(!t.check_block(20000, &genesis()));
        // heights without a checkpoint are unconstrained
        assert!(t.check_block(123, &Hash::zero()));
    }

    #[test]
    fn test_highest_at_or_below() {
        let t = table();
        assert_eq!(t.highest_at_or_below(0).map(|cp| cp.height), Some(0));
        assert_eq!(t.highest_at_or_below(19999).map(|cp| cp.height), Some(0));
        assert_eq!(t.highest_at_or_below(20000).map(|cp| cp.height), Some(20000));
        assert_eq!(t.highest_at_or_below(u32::MAX).map(|cp| cp.height), Some(20000));
    }

    #[test]
    fn test_reorg_cannot_cross_verified_checkpoint() {
        let t = table();
        assert!(t.allows_reorg(100, 19000));
        assert!(!t.allows_reorg(19999, 25000));
        assert!(t.allows_reorg(20000, 25000));
    }

    #[test]
    fn test_structure_valid() {
        assert_eq!(table().check(&genesis()), Ok(()));
    }

    #[test]
    fn test_structure_rejects_missing_genesis() {
        let t = CheckpointData::new(&[(20000, CP_20000)], 0, 0, 0.0).unwrap();
        assert!(t.check(&genesis()).is_err());

        let t = CheckpointData::new(&[(0, CP_20000)], 0, 0, 0.0).unwrap();
        assert!(t.check(&genesis()).is_err());

        let t = CheckpointData::new(&[], 0, 0, 0.0).unwrap();
        assert!(t.check(&genesis()).is_err());
    }

    #[test]
    fn test_structure_rejects_unordered_heights() {
        let entries = [(0, GENESIS), (5, CP_20000), (5, CP_20000)];
        let t = CheckpointData::new(&entries, 0, 0, 0.0).unwrap();
        assert!(matches!(
            t.check(&genesis()),
            Err(ParamsError::InvalidCheckpoints(_))
        ));
    }

    #[test]
    fn test_bad_literal_surfaces_at_construction() {
        assert!(CheckpointData::new(&[(0, "xyz")], 0, 0, 0.0).is_err());
    }

    #[test]
    fn test_progress_estimate() {
        let t = table();
        // fully synced at the checkpoint with no time elapsed
        assert_eq!(t.estimate_progress(10000, 1543277053, 1543277053), 1.0);
        // halfway through the cheap section, checkpoint is fresh
        let half = t.estimate_progress(5000, 0, 1543277053);
        assert!((half - 0.5).abs() < 1e-9);
        // past the checkpoint with a stale tip: less than done
        let stale = t.estimate_progress(20000, 1543277053, 1543277053 + 86_400);
        assert!(stale > 0.0 && stale < 1.0);
        let empty = CheckpointData::new(&[], 0, 0, 0.0).unwrap();
        assert_eq!(empty.estimate_progress(0, 0, 0), 0.0);
    }
}
