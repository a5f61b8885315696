//! The two-input, two-output transaction form of the secondary ledger.
//!
//! The base-ledger side never executes transactions; it only decodes them
//! to check output ownership (exit start) and input references (challenge).
//! Unused slots are null: an all-zero input, or a null-owner zero-amount
//! output.

use serde::{Deserialize, Serialize};

use crate::constants::TX_SLOTS;
use crate::error::{PlasmaError, Result};
use crate::{Address, Amount, BlockNumber, UtxoPosition};

// ---------------------------------------------------------------------------
// TxInput
// ---------------------------------------------------------------------------

/// A reference to a previously created output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxInput {
    /// Block in which the referenced output was created.
    pub blknum: u64,
    /// Index in the block of the transaction that created the output.
    pub txindex: u64,
    /// Index of the output within that transaction.
    pub oindex: u64,
}

impl TxInput {
    /// The null input, marking an unused slot.
    pub const NULL: Self = Self {
        blknum: 0,
        txindex: 0,
        oindex: 0,
    };

    #[must_use]
    pub fn new(blknum: u64, txindex: u64, oindex: u64) -> Self {
        Self {
            blknum,
            txindex,
            oindex,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    /// Whether this slot references a funded output. Block numbering starts
    /// at 1, so a zero block number can never name a real output.
    #[must_use]
    pub fn is_funded(&self) -> bool {
        self.blknum != 0
    }

    /// The referenced output's position in the chain.
    pub fn position(&self) -> Result<UtxoPosition> {
        UtxoPosition::encode(BlockNumber(self.blknum), self.txindex, self.oindex)
    }

    /// Whether this input references exactly the given position.
    #[must_use]
    pub fn references(&self, position: UtxoPosition) -> bool {
        self.is_funded()
            && self.blknum == position.block_number().0
            && self.txindex == position.tx_index()
            && self.oindex == position.output_index()
    }
}

// ---------------------------------------------------------------------------
// TxOutput
// ---------------------------------------------------------------------------

/// A newly created output: an owner and an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub owner: Address,
    pub amount: Amount,
}

impl TxOutput {
    /// The null output, marking an unused slot.
    pub const NULL: Self = Self {
        owner: Address::NULL,
        amount: Amount::ZERO,
    };

    #[must_use]
    pub fn new(owner: Address, amount: Amount) -> Self {
        Self { owner, amount }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A secondary-ledger transaction: up to [`TX_SLOTS`] inputs and outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub inputs: [TxInput; TX_SLOTS],
    pub outputs: [TxOutput; TX_SLOTS],
}

impl Transaction {
    /// Build a transaction, padding unused slots with null entries.
    ///
    /// # Errors
    /// Returns [`PlasmaError::TooManyTxSlots`] if either list exceeds
    /// [`TX_SLOTS`].
    pub fn new(inputs: &[TxInput], outputs: &[TxOutput]) -> Result<Self> {
        if inputs.len() > TX_SLOTS || outputs.len() > TX_SLOTS {
            return Err(PlasmaError::TooManyTxSlots { max: TX_SLOTS });
        }
        let mut padded_inputs = [TxInput::NULL; TX_SLOTS];
        padded_inputs[..inputs.len()].copy_from_slice(inputs);
        let mut padded_outputs = [TxOutput::NULL; TX_SLOTS];
        padded_outputs[..outputs.len()].copy_from_slice(outputs);
        Ok(Self {
            inputs: padded_inputs,
            outputs: padded_outputs,
        })
    }

    /// The synthetic single-output transaction backing a deposit block.
    #[must_use]
    pub fn deposit(owner: Address, amount: Amount) -> Self {
        Self {
            inputs: [TxInput::NULL; TX_SLOTS],
            outputs: [TxOutput::new(owner, amount), TxOutput::NULL],
        }
    }

    /// Whether this is a deposit transaction (no funded inputs).
    #[must_use]
    pub fn is_deposit(&self) -> bool {
        self.inputs.iter().all(|input| !input.is_funded())
    }

    /// The output at `index`, if the index is within the slot range.
    #[must_use]
    pub fn output(&self, index: u64) -> Option<&TxOutput> {
        usize::try_from(index).ok().and_then(|i| self.outputs.get(i))
    }

    /// Whether any funded input spends the output at `position`.
    #[must_use]
    pub fn spends(&self, position: UtxoPosition) -> bool {
        self.inputs.iter().any(|input| input.references(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pads_null_slots() {
        let input = TxInput::new(1, 0, 0);
        let output = TxOutput::new(Address::dummy(1), Amount::new(10));
        let tx = Transaction::new(&[input], &[output]).unwrap();
        assert_eq!(tx.inputs[0], input);
        assert!(tx.inputs[1].is_null());
        assert_eq!(tx.outputs[0], output);
        assert!(tx.outputs[1].is_null());
    }

    #[test]
    fn new_rejects_too_many_slots() {
        let inputs = [TxInput::NULL; 3];
        let err = Transaction::new(&inputs, &[]).unwrap_err();
        assert!(matches!(err, PlasmaError::TooManyTxSlots { max: 2 }));
    }

    #[test]
    fn deposit_has_no_funded_inputs() {
        let tx = Transaction::deposit(Address::dummy(1), Amount::new(10));
        assert!(tx.is_deposit());
        assert_eq!(tx.outputs[0].amount, Amount::new(10));
        assert!(tx.outputs[1].is_null());
    }

    #[test]
    fn spend_is_not_deposit() {
        let tx = Transaction::new(
            &[TxInput::new(1, 0, 0)],
            &[TxOutput::new(Address::dummy(2), Amount::new(10))],
        )
        .unwrap();
        assert!(!tx.is_deposit());
    }

    #[test]
    fn spends_matches_input_position() {
        let position = UtxoPosition::encode(BlockNumber(3), 2, 1).unwrap();
        let tx = Transaction::new(&[TxInput::new(3, 2, 1)], &[]).unwrap();
        assert!(tx.spends(position));

        let other = UtxoPosition::encode(BlockNumber(3), 2, 0).unwrap();
        assert!(!tx.spends(other));
    }

    #[test]
    fn null_input_references_nothing() {
        // Position 0 decodes to block 0, which no funded input can name.
        let tx = Transaction::deposit(Address::dummy(1), Amount::new(10));
        assert!(!tx.spends(UtxoPosition(0)));
    }

    #[test]
    fn output_lookup_out_of_range() {
        let tx = Transaction::deposit(Address::dummy(1), Amount::new(10));
        assert!(tx.output(0).is_some());
        assert!(tx.output(2).is_none());
    }

    #[test]
    fn input_position_roundtrip() {
        let input = TxInput::new(5, 3, 1);
        let position = input.position().unwrap();
        assert_eq!(position.block_number(), BlockNumber(5));
        assert_eq!(position.tx_index(), 3);
        assert_eq!(position.output_index(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let tx = Transaction::new(
            &[TxInput::new(1, 0, 0)],
            &[TxOutput::new(Address::dummy(2), Amount::new(7))],
        )
        .unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, back);
    }
}
