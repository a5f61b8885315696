//! # plasmaroot-types
//!
//! Shared types, errors, and configuration for the **plasmaroot** base-ledger
//! settlement stack.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`BlockNumber`], [`UtxoPosition`], [`ReceiptId`]
//! - **Value model**: [`Amount`]
//! - **Block model**: [`PlasmaBlock`], [`Digest`]
//! - **Transaction model**: [`Transaction`], [`TxInput`], [`TxOutput`]
//! - **Exit model**: [`Exit`], [`ExitStatus`], [`ExitOutcome`]
//! - **Receipt model**: [`SettlementReceipt`]
//! - **Configuration**: [`ChainConfig`]
//! - **Errors**: [`PlasmaError`] with `PL_ERR_` prefix codes
//! - **Constants**: protocol-wide limits and defaults

pub mod amount;
pub mod block;
pub mod config;
pub mod constants;
pub mod error;
pub mod exit;
pub mod ids;
pub mod receipt;
pub mod transaction;

// Re-export all primary types at crate root for ergonomic imports:
//   use plasmaroot_types::{Address, UtxoPosition, Exit, ...};

pub use amount::*;
pub use block::*;
pub use config::*;
pub use error::*;
pub use exit::*;
pub use ids::*;
pub use receipt::*;
pub use transaction::*;

// Constants are accessed via `plasmaroot_types::constants::FOO`
// (not re-exported to avoid name collisions).
