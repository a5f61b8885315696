//! # plasmaroot-codec
//!
//! **Verification core**: the pure, side-effect-free computations consumed
//! by the commitment and exit planes.
//!
//! ## Contents
//!
//! - [`encoding`] — the deterministic byte grammar for transactions
//! - [`digest`] — SHA-256 digests with domain separation
//! - [`merkle`] — inclusion proofs and the operator-side tree builder
//! - [`signatures`] — ed25519 signer recovery and the paired
//!   transaction/confirmation check
//!
//! Nothing in this crate touches chain state; every function maps inputs to
//! outputs and can be exercised in isolation.

pub mod digest;
pub mod encoding;
pub mod merkle;
pub mod signatures;

pub use digest::{confirmation_digest, leaf_digest, node_digest, tx_digest};
pub use encoding::{decode_transaction, encode_unsigned, joined_signatures, UNSIGNED_TX_LEN};
pub use merkle::{check_membership, MerkleTree};
pub use signatures::{recover_signer, validate_signatures, SignatureSlots, SignedDigest};

#[cfg(any(test, feature = "test-helpers"))]
pub mod testkit;
