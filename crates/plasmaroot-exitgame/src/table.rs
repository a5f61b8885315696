//! The per-position exit table.
//!
//! Like a spent-output set: a position gets at most one exit record for its
//! lifetime. Finalized records persist as tombstones, which is what makes a
//! repeat claim on a settled position fail — tombstones must never expire.

use std::collections::HashMap;

use plasmaroot_types::{Exit, PlasmaError, Result, UtxoPosition};

/// All exit records, keyed by the claimed output's position.
#[derive(Debug, Default)]
pub struct ExitTable {
    exits: HashMap<UtxoPosition, Exit>,
}

impl ExitTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            exits: HashMap::new(),
        }
    }

    /// Record a freshly started exit.
    ///
    /// # Errors
    /// Returns [`PlasmaError::ExitAlreadyStarted`] if any record — open,
    /// challenged, or tombstoned — exists for the position.
    pub fn start(&mut self, position: UtxoPosition, exit: Exit) -> Result<()> {
        if self.exits.contains_key(&position) {
            return Err(PlasmaError::ExitAlreadyStarted(position));
        }
        self.exits.insert(position, exit);
        Ok(())
    }

    /// Mark the exit at `position` as challenged.
    ///
    /// # Errors
    /// - [`PlasmaError::ExitNotFound`] if no record exists
    /// - [`PlasmaError::ExitNotChallengeable`] if the record is not open
    pub fn challenge(&mut self, position: UtxoPosition) -> Result<&Exit> {
        let exit = self
            .exits
            .get_mut(&position)
            .ok_or(PlasmaError::ExitNotFound(position))?;
        exit.mark_challenged()?;
        Ok(&*exit)
    }

    /// Mutable access for the settlement sweep.
    pub(crate) fn get_mut(&mut self, position: UtxoPosition) -> Option<&mut Exit> {
        self.exits.get_mut(&position)
    }

    /// Look up an exit record.
    #[must_use]
    pub fn get(&self, position: UtxoPosition) -> Option<&Exit> {
        self.exits.get(&position)
    }

    /// Whether any record exists for the position.
    #[must_use]
    pub fn contains(&self, position: UtxoPosition) -> bool {
        self.exits.contains_key(&position)
    }

    /// Number of records, tombstones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::{DateTime, Utc};
    use plasmaroot_types::{Address, Amount, ExitStatus};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn make_exit() -> Exit {
        Exit::open(
            Address::dummy(1),
            Amount::new(10),
            Amount::new(5),
            t0(),
            t0() + chrono::Duration::weeks(2),
        )
    }

    #[test]
    fn start_and_lookup() {
        let mut table = ExitTable::new();
        let position = UtxoPosition(1_000_000_000);
        table.start(position, make_exit()).unwrap();

        assert!(table.contains(position));
        assert_eq!(table.get(position).unwrap().status, ExitStatus::Open);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn double_start_blocked() {
        let mut table = ExitTable::new();
        let position = UtxoPosition(1_000_000_000);
        table.start(position, make_exit()).unwrap();

        let err = table.start(position, make_exit()).unwrap_err();
        assert!(matches!(err, PlasmaError::ExitAlreadyStarted(p) if p == position));
    }

    #[test]
    fn start_blocked_by_tombstone() {
        let mut table = ExitTable::new();
        let position = UtxoPosition(1_000_000_000);
        table.start(position, make_exit()).unwrap();
        table.get_mut(position).unwrap().finalize().unwrap();

        let err = table.start(position, make_exit()).unwrap_err();
        assert!(matches!(err, PlasmaError::ExitAlreadyStarted(_)));
    }

    #[test]
    fn challenge_flips_status() {
        let mut table = ExitTable::new();
        let position = UtxoPosition(1_000_000_000);
        table.start(position, make_exit()).unwrap();

        let exit = table.challenge(position).unwrap();
        assert_eq!(exit.status, ExitStatus::Challenged);
    }

    #[test]
    fn challenge_unknown_position() {
        let mut table = ExitTable::new();
        let err = table.challenge(UtxoPosition(5)).unwrap_err();
        assert!(matches!(err, PlasmaError::ExitNotFound(_)));
    }

    #[test]
    fn challenge_twice_blocked() {
        let mut table = ExitTable::new();
        let position = UtxoPosition(1_000_000_000);
        table.start(position, make_exit()).unwrap();
        table.challenge(position).unwrap();

        let err = table.challenge(position).unwrap_err();
        assert!(matches!(err, PlasmaError::ExitNotChallengeable { .. }));
    }
}
