//! # plasmaroot-chain
//!
//! **Commitment plane**: the append-only block registry and the vault
//! holding the base-ledger value backing it.
//!
//! ## Architecture
//!
//! The [`BlockRegistry`] assigns one strictly increasing, gapless numbering
//! space to both kinds of block:
//! 1. **Deposit blocks** — synthesized from a single-output transaction when
//!    a user moves value onto the secondary ledger
//! 2. **Committed blocks** — state digests submitted by the designated
//!    operator
//!
//! Sharing the numbering space lets a later exit-inclusion proof reference
//! either kind of block uniformly.
//!
//! The [`Vault`] is the custody side: deposits and exit bonds flow into one
//! pool, and the settlement sweep pays claims out of it into a per-address
//! withdrawable ledger. Pool accounting is conservation-checked.

pub mod registry;
pub mod vault;

pub use registry::BlockRegistry;
pub use vault::Vault;
