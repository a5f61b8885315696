//! Identifiers used throughout plasmaroot.
//!
//! `Address` is the raw ed25519 verifying key (32 bytes); `UtxoPosition`
//! packs `(block number, tx index, output index)` into one integer so that
//! every output in the chain's history has a unique, re-derivable key.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{BLOCK_OFFSET, TX_OFFSET};
use crate::error::{PlasmaError, Result};

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A base-ledger address: the raw ed25519 verifying key (32 bytes).
///
/// The all-zero address is the null address — never a valid signer. Exit
/// records have their owner cleared to [`Address::NULL`] once settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The null address. Marks tombstoned exit owners and empty output slots.
    pub const NULL: Self = Self([0u8; 32]);

    #[must_use]
    pub fn from_pubkey(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn from_verifying_key(key: &ed25519_dalek::VerifyingKey) -> Self {
        Self(key.to_bytes())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "addr:{}", hex::encode(&self.0[..8]))
    }
}

/// Deterministic throwaway addresses for tests. **Never a real key.**
#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    #[must_use]
    pub fn dummy(tag: u8) -> Self {
        Self([tag; 32])
    }
}

// ---------------------------------------------------------------------------
// BlockNumber
// ---------------------------------------------------------------------------

/// Monotonically increasing block number. Numbering starts at 1; deposits
/// and operator commitments share the same space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BlockNumber(pub u64);

impl BlockNumber {
    /// The first block number ever assigned.
    pub const FIRST: Self = Self(1);

    /// The next block number, erring if the numbering space is exhausted.
    pub fn next(self) -> Result<Self> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(PlasmaError::BlockNumberExhausted)
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// UtxoPosition
// ---------------------------------------------------------------------------

/// The unique position of an output in the chain's history.
///
/// Encoded as `blknum * 1_000_000_000 + txindex * 10_000 + oindex`, so the
/// encoding is deterministic and collision-free for `txindex < 100_000` and
/// `oindex < 10_000`. Used as the primary key of the exit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UtxoPosition(pub u64);

impl UtxoPosition {
    /// Encode a `(block, tx index, output index)` triple into a position.
    ///
    /// # Errors
    /// Returns [`PlasmaError::PositionOutOfRange`] if a component exceeds
    /// its encoding bounds or the packed value overflows.
    pub fn encode(block: BlockNumber, tx_index: u64, output_index: u64) -> Result<Self> {
        if tx_index >= BLOCK_OFFSET / TX_OFFSET || output_index >= TX_OFFSET {
            return Err(PlasmaError::PositionOutOfRange);
        }
        let packed = block
            .0
            .checked_mul(BLOCK_OFFSET)
            .and_then(|b| b.checked_add(tx_index * TX_OFFSET))
            .and_then(|b| b.checked_add(output_index))
            .ok_or(PlasmaError::PositionOutOfRange)?;
        Ok(Self(packed))
    }

    #[must_use]
    pub fn block_number(&self) -> BlockNumber {
        BlockNumber(self.0 / BLOCK_OFFSET)
    }

    #[must_use]
    pub fn tx_index(&self) -> u64 {
        (self.0 % BLOCK_OFFSET) / TX_OFFSET
    }

    #[must_use]
    pub fn output_index(&self) -> u64 {
        self.0 % TX_OFFSET
    }
}

impl fmt::Display for UtxoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "utxo:{}.{}.{}",
            self.block_number().0,
            self.tx_index(),
            self.output_index()
        )
    }
}

// ---------------------------------------------------------------------------
// ReceiptId
// ---------------------------------------------------------------------------

/// Globally unique settlement receipt identifier. Uses UUIDv7 for
/// time-ordered lexicographic sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ReceiptId(pub Uuid);

impl ReceiptId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ReceiptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rcpt:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
