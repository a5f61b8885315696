//! The append-only block registry.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use plasmaroot_codec::{encode_unsigned, joined_signatures, leaf_digest};
use plasmaroot_types::{
    Address, Amount, BlockNumber, Digest, PlasmaBlock, PlasmaError, Result, Transaction,
};

/// Append-only log of committed state digests, indexed by block number.
///
/// Blocks are immutable once written and never deleted. The operator
/// identity is fixed at construction; only it may commit externally
/// computed roots, while anyone may create deposit blocks.
pub struct BlockRegistry {
    /// All committed blocks, keyed by their number.
    blocks: BTreeMap<BlockNumber, PlasmaBlock>,
    /// The number the next block will receive.
    next: BlockNumber,
    /// The privileged block committer.
    operator: Address,
}

impl BlockRegistry {
    /// Create an empty registry for the given operator. Numbering starts
    /// at 1.
    #[must_use]
    pub fn new(operator: Address) -> Self {
        Self {
            blocks: BTreeMap::new(),
            next: BlockNumber::FIRST,
            operator,
        }
    }

    /// Record a deposit as a single-transaction block.
    ///
    /// Synthesizes the deposit transaction, takes its Merkle leaf digest as
    /// the root of the depth-0 block, and appends it.
    ///
    /// # Errors
    /// Returns [`PlasmaError::ZeroDeposit`] if `amount` is zero.
    pub fn record_deposit(
        &mut self,
        depositor: Address,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<BlockNumber> {
        if amount.is_zero() {
            return Err(PlasmaError::ZeroDeposit);
        }

        let tx = Transaction::deposit(depositor, amount);
        let root = leaf_digest(&encode_unsigned(&tx), &joined_signatures(&[None, None]));
        let number = self.append(root, now)?;

        tracing::info!(
            block = %number,
            depositor = %depositor,
            amount = %amount,
            "deposit block recorded"
        );
        Ok(number)
    }

    /// Commit an externally computed root.
    ///
    /// # Errors
    /// Returns [`PlasmaError::NotOperator`] unless `caller` is the
    /// designated operator.
    pub fn commit_root(
        &mut self,
        root: Digest,
        caller: Address,
        now: DateTime<Utc>,
    ) -> Result<BlockNumber> {
        if caller != self.operator {
            return Err(PlasmaError::NotOperator);
        }

        let number = self.append(root, now)?;
        tracing::info!(block = %number, "root committed");
        Ok(number)
    }

    /// Look up a committed block.
    #[must_use]
    pub fn get(&self, number: BlockNumber) -> Option<&PlasmaBlock> {
        self.blocks.get(&number)
    }

    /// The number the next block will receive.
    #[must_use]
    pub fn next_block_number(&self) -> BlockNumber {
        self.next
    }

    /// Number of committed blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The designated operator.
    #[must_use]
    pub fn operator(&self) -> Address {
        self.operator
    }

    fn append(&mut self, root: Digest, now: DateTime<Utc>) -> Result<BlockNumber> {
        // Reserve the successor first so a full numbering space leaves the
        // registry untouched.
        let successor = self.next.next()?;
        let number = self.next;
        self.blocks.insert(number, PlasmaBlock::new(root, now));
        self.next = successor;
        Ok(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn make_registry() -> BlockRegistry {
        BlockRegistry::new(Address::dummy(9))
    }

    #[test]
    fn numbering_starts_at_one_and_is_gapless() {
        let mut registry = make_registry();
        let operator = registry.operator();

        let n1 = registry
            .record_deposit(Address::dummy(1), Amount::new(10), t0())
            .unwrap();
        let n2 = registry.commit_root([1u8; 32], operator, t0()).unwrap();
        let n3 = registry
            .record_deposit(Address::dummy(2), Amount::new(5), t0())
            .unwrap();

        assert_eq!(n1, BlockNumber(1));
        assert_eq!(n2, BlockNumber(2));
        assert_eq!(n3, BlockNumber(3));
        assert_eq!(registry.next_block_number(), BlockNumber(4));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn zero_deposit_rejected() {
        let mut registry = make_registry();
        let err = registry
            .record_deposit(Address::dummy(1), Amount::ZERO, t0())
            .unwrap_err();
        assert!(matches!(err, PlasmaError::ZeroDeposit));
        assert!(registry.is_empty());
        assert_eq!(registry.next_block_number(), BlockNumber(1));
    }

    #[test]
    fn commit_requires_operator() {
        let mut registry = make_registry();
        let err = registry
            .commit_root([1u8; 32], Address::dummy(1), t0())
            .unwrap_err();
        assert!(matches!(err, PlasmaError::NotOperator));
        assert!(registry.is_empty());
    }

    #[test]
    fn absent_block_is_none() {
        let registry = make_registry();
        assert!(registry.get(BlockNumber(1)).is_none());
    }

    #[test]
    fn deposit_root_matches_synthetic_transaction_leaf() {
        let mut registry = make_registry();
        let depositor = Address::dummy(1);
        let number = registry
            .record_deposit(depositor, Amount::new(10), t0())
            .unwrap();

        let tx = Transaction::deposit(depositor, Amount::new(10));
        let expected = leaf_digest(&encode_unsigned(&tx), &joined_signatures(&[None, None]));
        assert_eq!(registry.get(number).unwrap().root, expected);
    }

    #[test]
    fn committed_block_keeps_root_and_time() {
        let mut registry = make_registry();
        let operator = registry.operator();
        let number = registry.commit_root([7u8; 32], operator, t0()).unwrap();

        let block = registry.get(number).unwrap();
        assert_eq!(block.root, [7u8; 32]);
        assert_eq!(block.committed_at, t0());
    }
}
