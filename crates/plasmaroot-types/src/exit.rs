//! # Exit — a unilateral withdrawal claim
//!
//! An `Exit` is a claim against one specific output, keyed by its
//! [`UtxoPosition`](crate::UtxoPosition) in the exit table.
//!
//! ## State Machine
//!
//! ```text
//!   ┌──────┐  challenge   ┌────────────┐
//!   │ OPEN ├─────────────▶│ CHALLENGED │
//!   └──┬───┘              └─────┬──────┘
//!      │ sweep (due)            │ sweep (due)
//!      ▼                        ▼
//!   ┌──────────────┐   ┌───────────────────┐
//!   │ FINALIZED:   │   │ FINALIZED:        │
//!   │ PAID         │   │ DISCARDED         │
//!   └──────────────┘   └───────────────────┘
//! ```
//!
//! ## Safety Properties
//!
//! - **Single claim**: the table holds at most one record per position for
//!   its lifetime; finalized records persist as tombstones.
//! - **Monotonic**: transitions never go backwards; a finalized exit is
//!   terminal.
//! - **Challenge keeps the slot**: a challenged exit stays in the queue and
//!   is discarded unpaid when its scheduled time arrives.
//! - **Tombstoning**: finalization clears the owner to the null address
//!   while retaining the amount, so the position can never be claimed again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlasmaError, Result};
use crate::{Address, Amount};

/// What happened to an exit when the settlement sweep drained it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitOutcome {
    /// The claim was still undisputed; amount and bond were paid out.
    Paid,
    /// The claim had been challenged; it was dequeued without payment.
    Discarded,
}

impl std::fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "PAID"),
            Self::Discarded => write!(f, "DISCARDED"),
        }
    }
}

/// The lifecycle state of an exit claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitStatus {
    /// Active, currently undisputed claim awaiting its scheduled time.
    Open,
    /// Disputed. Still occupies its queue slot but will not be paid.
    Challenged,
    /// Drained by the settlement sweep. Terminal; the record is a tombstone.
    Finalized(ExitOutcome),
}

impl ExitStatus {
    /// Can this status transition to the given target?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Challenged)
                | (Self::Open, Self::Finalized(ExitOutcome::Paid))
                | (Self::Challenged, Self::Finalized(ExitOutcome::Discarded))
        )
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        matches!(self, Self::Finalized(_))
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Challenged => write!(f, "CHALLENGED"),
            Self::Finalized(outcome) => write!(f, "FINALIZED_{outcome}"),
        }
    }
}

/// A withdrawal claim against one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// The claimed output's owner. Cleared to the null address on
    /// finalization; the record itself persists.
    pub owner: Address,
    /// The claimed output's value.
    pub amount: Amount,
    /// The bond attached when the claim was started.
    pub bond: Amount,
    /// When the claim was started.
    pub started_at: DateTime<Utc>,
    /// Earliest time the settlement sweep may drain this claim. Fixed at
    /// start; disputes never reschedule it.
    pub exitable_at: DateTime<Utc>,
    /// Current lifecycle state.
    pub status: ExitStatus,
}

impl Exit {
    /// Open a fresh, undisputed claim.
    #[must_use]
    pub fn open(
        owner: Address,
        amount: Amount,
        bond: Amount,
        started_at: DateTime<Utc>,
        exitable_at: DateTime<Utc>,
    ) -> Self {
        Self {
            owner,
            amount,
            bond,
            started_at,
            exitable_at,
            status: ExitStatus::Open,
        }
    }

    /// Mark this claim as disputed.
    ///
    /// # Errors
    /// Returns [`PlasmaError::ExitNotChallengeable`] unless the claim is
    /// currently [`ExitStatus::Open`].
    pub fn mark_challenged(&mut self) -> Result<()> {
        if !self.status.can_transition_to(ExitStatus::Challenged) {
            return Err(PlasmaError::ExitNotChallengeable {
                status: self.status,
            });
        }
        self.status = ExitStatus::Challenged;
        Ok(())
    }

    /// Finalize this claim, tombstoning the record. The outcome follows
    /// from the current state: open claims are paid, challenged claims are
    /// discarded.
    ///
    /// # Errors
    /// Returns [`PlasmaError::ExitAlreadyFinalized`] if already terminal.
    pub fn finalize(&mut self) -> Result<ExitOutcome> {
        let outcome = match self.status {
            ExitStatus::Open => ExitOutcome::Paid,
            ExitStatus::Challenged => ExitOutcome::Discarded,
            ExitStatus::Finalized(_) => return Err(PlasmaError::ExitAlreadyFinalized),
        };
        self.status = ExitStatus::Finalized(outcome);
        self.owner = Address::NULL;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_exit() -> Exit {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Exit::open(
            Address::dummy(1),
            Amount::new(10),
            Amount::new(5),
            t0,
            t0 + chrono::Duration::weeks(2),
        )
    }

    #[test]
    fn state_transitions_valid() {
        assert!(ExitStatus::Open.can_transition_to(ExitStatus::Challenged));
        assert!(ExitStatus::Open.can_transition_to(ExitStatus::Finalized(ExitOutcome::Paid)));
        assert!(
            ExitStatus::Challenged.can_transition_to(ExitStatus::Finalized(ExitOutcome::Discarded))
        );
    }

    #[test]
    fn state_transitions_invalid() {
        assert!(!ExitStatus::Open.can_transition_to(ExitStatus::Finalized(ExitOutcome::Discarded)));
        assert!(!ExitStatus::Challenged.can_transition_to(ExitStatus::Open));
        assert!(
            !ExitStatus::Finalized(ExitOutcome::Paid).can_transition_to(ExitStatus::Challenged)
        );
    }

    #[test]
    fn open_exit_finalizes_paid() {
        let mut exit = make_exit();
        let outcome = exit.finalize().unwrap();
        assert_eq!(outcome, ExitOutcome::Paid);
        assert_eq!(exit.status, ExitStatus::Finalized(ExitOutcome::Paid));
    }

    #[test]
    fn challenged_exit_finalizes_discarded() {
        let mut exit = make_exit();
        exit.mark_challenged().unwrap();
        let outcome = exit.finalize().unwrap();
        assert_eq!(outcome, ExitOutcome::Discarded);
    }

    #[test]
    fn finalize_tombstones_owner_but_keeps_amount() {
        let mut exit = make_exit();
        exit.finalize().unwrap();
        assert!(exit.owner.is_null());
        assert_eq!(exit.amount, Amount::new(10));
    }

    #[test]
    fn double_finalize_blocked() {
        let mut exit = make_exit();
        exit.finalize().unwrap();
        let err = exit.finalize().unwrap_err();
        assert!(matches!(err, PlasmaError::ExitAlreadyFinalized));
    }

    #[test]
    fn double_challenge_blocked() {
        let mut exit = make_exit();
        exit.mark_challenged().unwrap();
        let err = exit.mark_challenged().unwrap_err();
        assert!(matches!(
            err,
            PlasmaError::ExitNotChallengeable {
                status: ExitStatus::Challenged
            }
        ));
    }

    #[test]
    fn challenge_after_finalize_blocked() {
        let mut exit = make_exit();
        exit.finalize().unwrap();
        assert!(exit.mark_challenged().is_err());
    }

    #[test]
    fn challenge_keeps_schedule() {
        let mut exit = make_exit();
        let scheduled = exit.exitable_at;
        exit.mark_challenged().unwrap();
        assert_eq!(exit.exitable_at, scheduled);
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", ExitStatus::Open), "OPEN");
        assert_eq!(format!("{}", ExitStatus::Challenged), "CHALLENGED");
        assert_eq!(
            format!("{}", ExitStatus::Finalized(ExitOutcome::Discarded)),
            "FINALIZED_DISCARDED"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let exit = make_exit();
        let json = serde_json::to_string(&exit).unwrap();
        let back: Exit = serde_json::from_str(&json).unwrap();
        assert_eq!(exit, back);
    }
}
