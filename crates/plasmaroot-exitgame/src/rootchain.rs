//! The root-chain state machine: one object owning every table the exit
//! game mutates, plus the mutex wrapper giving the whole surface the
//! single-caller-at-a-time semantics the protocol assumes.
//!
//! Every operation validates all of its preconditions before its first
//! write, so a returned error always means zero state change.

use std::cmp;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use plasmaroot_chain::{BlockRegistry, Vault};
use plasmaroot_codec::{
    check_membership, confirmation_digest, decode_transaction, joined_signatures, leaf_digest,
    recover_signer, tx_digest, validate_signatures, SignatureSlots, SignedDigest,
};
use plasmaroot_types::{
    Address, Amount, BlockNumber, ChainConfig, Digest, Exit, ExitStatus, PlasmaBlock, PlasmaError,
    Result, SettlementReceipt, UtxoPosition,
};

use crate::queue::ExitQueue;
use crate::sweep::{run_sweep, SweepReport};
use crate::table::ExitTable;

/// The base-ledger side of the plasma protocol.
///
/// Holds the block registry, the per-position exit table, the settlement
/// queue, the value vault, and the receipt log. Constructed once with the
/// operator identity fixed; there is no reinitialization path.
pub struct RootChain {
    config: ChainConfig,
    registry: BlockRegistry,
    exits: ExitTable,
    queue: ExitQueue,
    vault: Vault,
    receipts: Vec<SettlementReceipt>,
}

impl RootChain {
    /// Create a fresh chain from its configuration.
    #[must_use]
    pub fn new(config: ChainConfig) -> Self {
        let registry = BlockRegistry::new(config.operator);
        Self {
            config,
            registry,
            exits: ExitTable::new(),
            queue: ExitQueue::new(),
            vault: Vault::new(),
            receipts: Vec::new(),
        }
    }

    // =================================================================
    // Commitment surface
    // =================================================================

    /// Move value onto the secondary ledger, creating a deposit block.
    ///
    /// # Errors
    /// [`PlasmaError::ZeroDeposit`] for a zero amount; the deposit is
    /// otherwise permissionless.
    pub fn deposit(
        &mut self,
        depositor: Address,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<BlockNumber> {
        if amount.is_zero() {
            return Err(PlasmaError::ZeroDeposit);
        }
        // Probe the numbering space before the vault is touched.
        self.registry.next_block_number().next()?;

        self.vault.fund(amount)?;
        self.registry.record_deposit(depositor, amount, now)
    }

    /// Commit an externally computed block root. Operator only.
    pub fn commit_root(
        &mut self,
        root: Digest,
        caller: Address,
        now: DateTime<Utc>,
    ) -> Result<BlockNumber> {
        self.registry.commit_root(root, caller, now)
    }

    // =================================================================
    // Exit surface
    // =================================================================

    /// Start a withdrawal claim on the output at `position`.
    ///
    /// `encoded_tx` is the unsigned encoding of the transaction that
    /// created the output; `proof` proves the transaction's leaf is
    /// included under the root of `position`'s block.
    ///
    /// The scheduled release time is
    /// `max(committed_at + 2 × challenge_period, now + challenge_period)`:
    /// a claim on an old, long-settled block still gets a full one-period
    /// window, while a claim on a just-committed block waits two full
    /// periods so the block itself can be reviewed.
    ///
    /// # Errors
    /// Any failed precondition aborts with zero state change; see
    /// [`PlasmaError`] codes 3xx, 6xx, and 7xx.
    #[allow(clippy::too_many_arguments)]
    pub fn start_exit(
        &mut self,
        caller: Address,
        position: UtxoPosition,
        encoded_tx: &[u8],
        proof: &[Digest],
        tx_signatures: &SignatureSlots,
        confirmation_signatures: &SignatureSlots,
        attached_bond: Amount,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if attached_bond != self.config.exit_bond {
            return Err(PlasmaError::BondMismatch {
                expected: self.config.exit_bond,
                attached: attached_bond,
            });
        }

        let tx = decode_transaction(encoded_tx)?;
        let output_index = position.output_index();
        let output = *tx
            .output(output_index)
            .ok_or(PlasmaError::NoSuchOutput {
                index: output_index,
            })?;
        if output.owner != caller {
            return Err(PlasmaError::NotOutputOwner);
        }
        if output.amount.is_zero() {
            return Err(PlasmaError::ZeroValueOutput);
        }

        if self.exits.contains(position) {
            return Err(PlasmaError::ExitAlreadyStarted(position));
        }

        let txd = tx_digest(encoded_tx);
        let confd = confirmation_digest(&txd);
        validate_signatures(
            &txd,
            &confd,
            &tx.inputs,
            tx_signatures,
            confirmation_signatures,
        )?;

        let block_number = position.block_number();
        let block = self
            .registry
            .get(block_number)
            .ok_or(PlasmaError::UnknownBlock(block_number))?;
        let leaf = leaf_digest(encoded_tx, &joined_signatures(tx_signatures));
        if !check_membership(&leaf, position.tx_index(), &block.root, proof) {
            return Err(PlasmaError::InvalidInclusionProof);
        }

        let period = self.config.challenge_period();
        let exitable_at = cmp::max(block.committed_at + period * 2, now + period);

        self.vault.fund(attached_bond)?;
        self.exits.start(
            position,
            Exit::open(caller, output.amount, attached_bond, now, exitable_at),
        )?;
        self.queue.insert(exitable_at, position);

        tracing::info!(
            position = %position,
            owner = %caller,
            amount = %output.amount,
            exitable_at = %exitable_at,
            "exit started"
        );
        Ok(())
    }

    /// Dispute the claim at `exiting_position` by presenting a transaction
    /// that spends the claimed output, confirmed by the exiting owner.
    ///
    /// The claim is invalidated in place: its queue entry keeps its slot
    /// and is discarded unpaid when its time arrives. The exit bond goes to
    /// the challenger.
    pub fn challenge_exit(
        &mut self,
        challenger: Address,
        exiting_position: UtxoPosition,
        encoded_spend: &[u8],
        confirmation: &SignedDigest,
    ) -> Result<()> {
        let exit = self
            .exits
            .get(exiting_position)
            .ok_or(PlasmaError::ExitNotFound(exiting_position))?;
        if exit.status != ExitStatus::Open {
            return Err(PlasmaError::ExitNotChallengeable {
                status: exit.status,
            });
        }
        let owner = exit.owner;
        let bond = exit.bond;

        let spend = decode_transaction(encoded_spend)?;
        if !spend.spends(exiting_position) {
            return Err(PlasmaError::SpendDoesNotReference(exiting_position));
        }

        let confd = confirmation_digest(&tx_digest(encoded_spend));
        let signer = recover_signer(&confd, confirmation)?;
        if signer != owner {
            return Err(PlasmaError::ChallengeSignerMismatch);
        }

        self.vault.pay(challenger, bond)?;
        self.exits.challenge(exiting_position)?;

        tracing::info!(
            position = %exiting_position,
            challenger = %challenger,
            "exit challenged"
        );
        Ok(())
    }

    /// Drain due queue entries under the configured work budget.
    /// Permissionless and idempotent; call again while
    /// [`SweepReport::exhausted_budget`] is set.
    pub fn process_exits(&mut self, now: DateTime<Utc>) -> Result<SweepReport> {
        self.process_exits_bounded(now, self.config.sweep_budget)
    }

    /// Drain due queue entries under an explicit work budget.
    pub fn process_exits_bounded(
        &mut self,
        now: DateTime<Utc>,
        budget: usize,
    ) -> Result<SweepReport> {
        run_sweep(
            &mut self.queue,
            &mut self.exits,
            &mut self.vault,
            &mut self.receipts,
            now,
            budget,
        )
    }

    // =================================================================
    // Read-only state
    // =================================================================

    #[must_use]
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    #[must_use]
    pub fn operator(&self) -> Address {
        self.config.operator
    }

    #[must_use]
    pub fn block(&self, number: BlockNumber) -> Option<&PlasmaBlock> {
        self.registry.get(number)
    }

    #[must_use]
    pub fn next_block_number(&self) -> BlockNumber {
        self.registry.next_block_number()
    }

    #[must_use]
    pub fn exit(&self, position: UtxoPosition) -> Option<&Exit> {
        self.exits.get(position)
    }

    #[must_use]
    pub fn queue(&self) -> &ExitQueue {
        &self.queue
    }

    #[must_use]
    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    #[must_use]
    pub fn receipts(&self) -> &[SettlementReceipt] {
        &self.receipts
    }
}

/// [`RootChain`] behind one process-wide lock.
///
/// Models the execution environment's guarantee that each public operation
/// runs to completion with no interleaving: every method takes the lock for
/// the full call. Since the inner operations never write before their
/// preconditions pass, a poisoned lock still guards consistent state and is
/// recovered rather than propagated.
#[derive(Clone)]
pub struct SharedRootChain {
    inner: Arc<Mutex<RootChain>>,
}

impl SharedRootChain {
    #[must_use]
    pub fn new(config: ChainConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RootChain::new(config))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RootChain> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn deposit(
        &self,
        depositor: Address,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<BlockNumber> {
        self.lock().deposit(depositor, amount, now)
    }

    pub fn commit_root(
        &self,
        root: Digest,
        caller: Address,
        now: DateTime<Utc>,
    ) -> Result<BlockNumber> {
        self.lock().commit_root(root, caller, now)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn start_exit(
        &self,
        caller: Address,
        position: UtxoPosition,
        encoded_tx: &[u8],
        proof: &[Digest],
        tx_signatures: &SignatureSlots,
        confirmation_signatures: &SignatureSlots,
        attached_bond: Amount,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.lock().start_exit(
            caller,
            position,
            encoded_tx,
            proof,
            tx_signatures,
            confirmation_signatures,
            attached_bond,
            now,
        )
    }

    pub fn challenge_exit(
        &self,
        challenger: Address,
        exiting_position: UtxoPosition,
        encoded_spend: &[u8],
        confirmation: &SignedDigest,
    ) -> Result<()> {
        self.lock()
            .challenge_exit(challenger, exiting_position, encoded_spend, confirmation)
    }

    pub fn process_exits(&self, now: DateTime<Utc>) -> Result<SweepReport> {
        self.lock().process_exits(now)
    }

    /// Run an arbitrary read against the locked state.
    pub fn with<R>(&self, read: impl FnOnce(&RootChain) -> R) -> R {
        read(&self.lock())
    }

    #[must_use]
    pub fn block(&self, number: BlockNumber) -> Option<PlasmaBlock> {
        self.lock().block(number).copied()
    }

    #[must_use]
    pub fn exit(&self, position: UtxoPosition) -> Option<Exit> {
        self.lock().exit(position).copied()
    }

    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.lock().queue().len()
    }

    #[must_use]
    pub fn withdrawable(&self, address: Address) -> Amount {
        self.lock().vault().withdrawable(address)
    }
}
