//! Committed block records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A 256-bit digest. Used uniformly for transaction digests, confirmation
/// digests, and Merkle nodes.
pub type Digest = [u8; 32];

/// A state digest committed to the base ledger.
///
/// Created either by a deposit (root derived from the synthetic
/// single-output deposit transaction) or by the operator committing an
/// externally computed root. Immutable once written; never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlasmaBlock {
    /// Merkle root over the block's transaction leaves.
    pub root: Digest,
    /// When the root was committed on the base ledger.
    pub committed_at: DateTime<Utc>,
}

impl PlasmaBlock {
    #[must_use]
    pub fn new(root: Digest, committed_at: DateTime<Utc>) -> Self {
        Self { root, committed_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serde_roundtrip() {
        let block = PlasmaBlock::new([7u8; 32], Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let json = serde_json::to_string(&block).unwrap();
        let back: PlasmaBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }
}
