//! Configuration for a plasmaroot chain instance.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::{Address, Amount};

/// Parameters fixed at chain construction.
///
/// The operator identity is set once here and never reassigned; there is no
/// implicit reinitialization path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// The privileged block committer.
    pub operator: Address,
    /// Mandatory dispute window, in seconds.
    pub challenge_period_secs: u64,
    /// Fixed bond attached to every exit claim.
    pub exit_bond: Amount,
    /// Default maximum queue entries drained per settlement sweep.
    pub sweep_budget: usize,
}

impl ChainConfig {
    /// Chain config with protocol defaults for the given operator.
    #[must_use]
    pub fn new(operator: Address) -> Self {
        Self {
            operator,
            challenge_period_secs: constants::CHALLENGE_PERIOD_SECS,
            exit_bond: Amount::new(constants::EXIT_BOND_UNITS),
            sweep_budget: constants::DEFAULT_SWEEP_BUDGET,
        }
    }

    /// The dispute window as a chrono duration.
    #[must_use]
    pub fn challenge_period(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.challenge_period_secs).unwrap_or(i64::MAX))
    }
}
