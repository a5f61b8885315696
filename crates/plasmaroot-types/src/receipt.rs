//! Settlement receipts for the plasmaroot audit trail.
//!
//! Every queue entry drained by the settlement sweep produces a receipt
//! recording what happened to the claim, so the distinction between a paid
//! and a discarded exit stays observable after the record is tombstoned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::block::Digest;
use crate::{Address, Amount, ExitOutcome, ReceiptId, UtxoPosition};

/// A record of one drained exit claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// Globally unique receipt identifier.
    pub id: ReceiptId,
    /// The position the drained claim was keyed by.
    pub position: UtxoPosition,
    /// The owner on record at drain time (before tombstoning).
    pub owner: Address,
    /// The claimed amount.
    pub amount: Amount,
    /// Whether the claim was paid or discarded.
    pub outcome: ExitOutcome,
    /// SHA-256 hash over the canonical receipt payload.
    pub payload_hash: Digest,
    /// When the sweep drained the claim.
    pub settled_at: DateTime<Utc>,
}

impl SettlementReceipt {
    /// Record a drained claim, computing the payload hash.
    #[must_use]
    pub fn record(
        position: UtxoPosition,
        owner: Address,
        amount: Amount,
        outcome: ExitOutcome,
        settled_at: DateTime<Utc>,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"plasmaroot:receipt:v1:");
        hasher.update(position.0.to_be_bytes());
        hasher.update(owner.as_bytes());
        hasher.update(amount.0.to_be_bytes());
        hasher.update(match outcome {
            ExitOutcome::Paid => &[0u8],
            ExitOutcome::Discarded => &[1u8],
        });
        hasher.update(settled_at.timestamp().to_be_bytes());
        let mut payload_hash = [0u8; 32];
        payload_hash.copy_from_slice(&hasher.finalize());

        Self {
            id: ReceiptId::new(),
            position,
            owner,
            amount,
            outcome,
            payload_hash,
            settled_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_receipt(outcome: ExitOutcome) -> SettlementReceipt {
        SettlementReceipt::record(
            UtxoPosition(1_000_000_000),
            Address::dummy(1),
            Amount::new(10),
            outcome,
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn payload_hash_is_nonzero() {
        let receipt = make_receipt(ExitOutcome::Paid);
        assert_ne!(receipt.payload_hash, [0u8; 32]);
    }

    #[test]
    fn payload_hash_differs_by_outcome() {
        let paid = make_receipt(ExitOutcome::Paid);
        let discarded = make_receipt(ExitOutcome::Discarded);
        assert_ne!(paid.payload_hash, discarded.payload_hash);
    }

    #[test]
    fn receipt_ids_are_unique() {
        let a = make_receipt(ExitOutcome::Paid);
        let b = make_receipt(ExitOutcome::Paid);
        assert_ne!(a.id, b.id);
        assert_eq!(a.payload_hash, b.payload_hash);
    }

    #[test]
    fn serde_roundtrip() {
        let receipt = make_receipt(ExitOutcome::Discarded);
        let json = serde_json::to_string(&receipt).unwrap();
        let back: SettlementReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, back);
    }
}
