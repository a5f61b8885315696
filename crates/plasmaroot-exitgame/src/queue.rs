//! The time-ordered exit settlement queue.
//!
//! Uses `BTreeMap` keyed by `(exitable_at, seq)`:
//! - primary order is the scheduled release time, earliest first
//! - `seq` is a monotone insertion counter, so entries with equal times
//!   drain FIFO
//!
//! Entries are immutable snapshots taken at exit-start time. Challenges
//! never remove or reorder them — invalidation lives on the exit record,
//! which keeps every queue operation purely time-ordered.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use plasmaroot_types::{PlasmaError, Result, UtxoPosition};

/// Min-queue of scheduled exits, ordered by release time then insertion.
#[derive(Debug, Default)]
pub struct ExitQueue {
    /// `(exitable_at, seq) -> position`, iterated in key order.
    entries: BTreeMap<(DateTime<Utc>, u64), UtxoPosition>,
    /// Next insertion sequence number.
    next_seq: u64,
}

impl ExitQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedule a position for release at `exitable_at`. O(log n).
    pub fn insert(&mut self, exitable_at: DateTime<Utc>, position: UtxoPosition) {
        self.entries.insert((exitable_at, self.next_seq), position);
        self.next_seq += 1;
    }

    /// The earliest entry without removing it.
    ///
    /// # Errors
    /// Returns [`PlasmaError::EmptyQueue`] if no entries are scheduled.
    pub fn peek_min(&self) -> Result<(DateTime<Utc>, UtxoPosition)> {
        self.entries
            .first_key_value()
            .map(|((at, _), position)| (*at, *position))
            .ok_or(PlasmaError::EmptyQueue)
    }

    /// Remove and return the earliest entry. O(log n).
    ///
    /// # Errors
    /// Returns [`PlasmaError::EmptyQueue`] if no entries are scheduled.
    pub fn pop_min(&mut self) -> Result<(DateTime<Utc>, UtxoPosition)> {
        self.entries
            .pop_first()
            .map(|((at, _), position)| (at, position))
            .ok_or(PlasmaError::EmptyQueue)
    }

    /// Number of scheduled entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in drain order.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, UtxoPosition)> + '_ {
        self.entries
            .iter()
            .map(|((at, _), position)| (*at, *position))
    }
}
