//! Error types for the plasmaroot settlement layer.
//!
//! All errors use the `PL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Block registry errors
//! - 3xx: Exit start errors
//! - 4xx: Challenge errors
//! - 5xx: Queue errors
//! - 6xx: Codec errors
//! - 7xx: Signature / proof errors
//! - 8xx: Vault errors
//! - 9xx: General / internal errors
//!
//! Every precondition violation aborts its call before the first write, so
//! a returned error always means zero state change.

use thiserror::Error;

use crate::{Amount, BlockNumber, ExitStatus, UtxoPosition};

/// Central error enum for all plasmaroot operations.
#[derive(Debug, Error)]
pub enum PlasmaError {
    // =================================================================
    // Block Registry Errors (1xx)
    // =================================================================
    /// No block has been committed at the referenced number.
    #[error("PL_ERR_100: Unknown block: {0}")]
    UnknownBlock(BlockNumber),

    /// Only the designated operator may commit roots.
    #[error("PL_ERR_101: Caller is not the designated operator")]
    NotOperator,

    /// Deposits must carry a strictly positive amount.
    #[error("PL_ERR_102: Deposit amount must be positive")]
    ZeroDeposit,

    // =================================================================
    // Exit Start Errors (3xx)
    // =================================================================
    /// The attached bond did not equal the fixed exit bond.
    #[error("PL_ERR_300: Exit bond mismatch: expected {expected}, attached {attached}")]
    BondMismatch { expected: Amount, attached: Amount },

    /// The caller is not the owner of the claimed output.
    #[error("PL_ERR_301: Caller does not own the claimed output")]
    NotOutputOwner,

    /// The claimed output carries no value.
    #[error("PL_ERR_302: Claimed output has zero value")]
    ZeroValueOutput,

    /// An exit record (active or tombstoned) already exists for the position.
    #[error("PL_ERR_303: Exit already recorded for {0}")]
    ExitAlreadyStarted(UtxoPosition),

    /// The Merkle inclusion proof did not verify against the block root.
    #[error("PL_ERR_304: Inclusion proof did not verify")]
    InvalidInclusionProof,

    /// The transaction has no output at the claimed index.
    #[error("PL_ERR_305: Transaction has no output at index {index}")]
    NoSuchOutput { index: u64 },

    // =================================================================
    // Challenge Errors (4xx)
    // =================================================================
    /// No exit record exists for the challenged position.
    #[error("PL_ERR_400: No exit recorded for {0}")]
    ExitNotFound(UtxoPosition),

    /// The exit is not in a challengeable state.
    #[error("PL_ERR_401: Exit cannot be challenged in state {status}")]
    ExitNotChallengeable { status: ExitStatus },

    /// The spending transaction does not list the exiting position as input.
    #[error("PL_ERR_402: Spending transaction does not reference {0}")]
    SpendDoesNotReference(UtxoPosition),

    /// The confirmation signer is not the exiting owner on record.
    #[error("PL_ERR_403: Confirmation signer does not match the exiting owner")]
    ChallengeSignerMismatch,

    // =================================================================
    // Queue Errors (5xx)
    // =================================================================
    /// The exit queue has no entries. Guarded internally before use.
    #[error("PL_ERR_500: Exit queue is empty")]
    EmptyQueue,

    // =================================================================
    // Codec Errors (6xx)
    // =================================================================
    /// The byte payload could not be decoded as a transaction.
    #[error("PL_ERR_600: Transaction decode failed: {reason}")]
    Decode { reason: String },

    /// A position component exceeded its encoding bounds.
    #[error("PL_ERR_601: Position component out of range")]
    PositionOutOfRange,

    /// More inputs or outputs than the transaction form allows.
    #[error("PL_ERR_602: Transaction slot count exceeds {max}")]
    TooManyTxSlots { max: usize },

    /// The Merkle tree cannot hold the requested leaves at this depth.
    #[error("PL_ERR_603: Merkle tree capacity exceeded at depth {depth}")]
    MerkleCapacityExceeded { depth: usize },

    /// No leaf exists at the requested tree index.
    #[error("PL_ERR_604: No leaf at index {index}")]
    NoSuchLeaf { index: usize },

    // =================================================================
    // Signature / Proof Errors (7xx)
    // =================================================================
    /// An ed25519 signature failed verification.
    #[error("PL_ERR_700: Signature verification failed")]
    SignatureInvalid,

    /// Transaction and confirmation signatures recover to different signers.
    #[error("PL_ERR_701: Transaction and confirmation signers differ for input {slot}")]
    SignerMismatch { slot: usize },

    /// The signer bytes are not a valid ed25519 verifying key.
    #[error("PL_ERR_702: Malformed signing key")]
    MalformedKey,

    /// A funded input slot is missing its signature.
    #[error("PL_ERR_703: Missing signature for input {slot}")]
    MissingSignature { slot: usize },

    /// A null input slot carries a signature.
    #[error("PL_ERR_704: Unexpected signature for null input {slot}")]
    UnexpectedSignature { slot: usize },

    // =================================================================
    // Vault Errors (8xx)
    // =================================================================
    /// A payout would exceed the pooled value — a broken invariant.
    #[error("PL_ERR_800: Vault pool underflow: need {needed}, pooled {pooled}")]
    InsufficientPool { needed: Amount, pooled: Amount },

    /// Value conservation invariant violated — critical safety alert.
    #[error("PL_ERR_801: Value conservation violation: {reason}")]
    ConservationViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("PL_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Checked amount arithmetic overflowed.
    #[error("PL_ERR_901: Amount overflow")]
    AmountOverflow,

    /// The exit was already finalized; its record is a tombstone.
    #[error("PL_ERR_902: Exit already finalized")]
    ExitAlreadyFinalized,

    /// The block numbering space is exhausted.
    #[error("PL_ERR_903: Block number space exhausted")]
    BlockNumberExhausted,
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, PlasmaError>;
