//! The bounded settlement sweep.
//!
//! Drains due queue entries in time order, up to a per-call work budget.
//! The sweep is permissionless, idempotent, and resumable: stopping with
//! entries still queued — not yet due, or beyond the budget — is a normal
//! quiescent state, and the next call picks up where this one left off.

use chrono::{DateTime, Utc};
use plasmaroot_chain::Vault;
use plasmaroot_types::{ExitOutcome, PlasmaError, Result, SettlementReceipt};

use crate::queue::ExitQueue;
use crate::table::ExitTable;

/// What one `process_exits` call accomplished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Claims paid out (amount plus bond refund).
    pub paid: usize,
    /// Challenged claims dequeued without payment.
    pub discarded: usize,
    /// Whether the budget ran out while due entries remained. The caller
    /// should invoke the sweep again.
    pub exhausted_budget: bool,
}

impl SweepReport {
    /// Total entries drained this call.
    #[must_use]
    pub fn drained(&self) -> usize {
        self.paid + self.discarded
    }
}

/// Drain at most `budget` due entries at time `now`.
pub(crate) fn run_sweep(
    queue: &mut ExitQueue,
    table: &mut ExitTable,
    vault: &mut Vault,
    receipts: &mut Vec<SettlementReceipt>,
    now: DateTime<Utc>,
    budget: usize,
) -> Result<SweepReport> {
    let mut report = SweepReport::default();

    for _ in 0..budget {
        let Ok((exitable_at, position)) = queue.peek_min() else {
            break;
        };
        if exitable_at > now {
            break;
        }
        queue.pop_min()?;

        let exit = table.get_mut(position).ok_or_else(|| {
            PlasmaError::Internal(format!("queued {position} has no exit record"))
        })?;
        let owner = exit.owner;
        let amount = exit.amount;
        let bond = exit.bond;

        match exit.finalize()? {
            ExitOutcome::Paid => {
                let payout = amount
                    .checked_add(bond)
                    .ok_or(PlasmaError::AmountOverflow)?;
                vault.pay(owner, payout)?;
                report.paid += 1;
                tracing::info!(
                    position = %position,
                    owner = %owner,
                    amount = %amount,
                    "exit paid"
                );
                receipts.push(SettlementReceipt::record(
                    position,
                    owner,
                    amount,
                    ExitOutcome::Paid,
                    now,
                ));
            }
            ExitOutcome::Discarded => {
                // Bond went to the challenger when the dispute landed;
                // nothing moves here.
                report.discarded += 1;
                tracing::info!(position = %position, "challenged exit discarded");
                receipts.push(SettlementReceipt::record(
                    position,
                    owner,
                    amount,
                    ExitOutcome::Discarded,
                    now,
                ));
            }
        }
    }

    report.exhausted_budget = report.drained() == budget
        && queue.peek_min().is_ok_and(|(at, _)| at <= now);

    Ok(report)
}
