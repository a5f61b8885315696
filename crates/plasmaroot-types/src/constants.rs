//! Protocol-wide constants for the plasmaroot settlement layer.

/// Mandatory dispute window, in seconds (one week).
pub const CHALLENGE_PERIOD_SECS: u64 = 7 * 24 * 60 * 60;

/// Fixed bond attached to every exit claim, in base-ledger units.
pub const EXIT_BOND_UNITS: u128 = 1_234_567_890;

/// Default maximum number of queue entries drained per settlement sweep.
pub const DEFAULT_SWEEP_BUDGET: usize = 64;

/// Position encoding: block numbers are scaled by this offset.
pub const BLOCK_OFFSET: u64 = 1_000_000_000;

/// Position encoding: transaction indices are scaled by this offset.
pub const TX_OFFSET: u64 = 10_000;

/// Number of input/output/signature slots per transaction.
pub const TX_SLOTS: usize = 2;

/// Maximum Merkle tree depth accepted for committed blocks.
pub const MAX_TREE_DEPTH: usize = 32;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "plasmaroot";
