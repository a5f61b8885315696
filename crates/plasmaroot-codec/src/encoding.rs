//! The deterministic byte grammar for transactions.
//!
//! Fixed layout, big-endian integers:
//!
//! ```text
//! unsigned tx :=  input*2  ‖  output*2          (144 bytes)
//! input       :=  blknum u64 ‖ txindex u64 ‖ oindex u64   (24 bytes)
//! output      :=  owner [u8;32] ‖ amount u128             (48 bytes)
//! ```
//!
//! Null slots encode as zero bytes, so the encoding of a padded transaction
//! is identical regardless of how it was constructed. The unsigned encoding
//! feeds the transaction digest; the unsigned encoding concatenated with
//! the joined signature slots feeds the Merkle leaf.

use plasmaroot_types::constants::TX_SLOTS;
use plasmaroot_types::{
    Address, Amount, PlasmaError, Result, Transaction, TxInput, TxOutput,
};

use crate::signatures::SignatureSlots;

const INPUT_LEN: usize = 24;
const OUTPUT_LEN: usize = 48;

/// Byte length of an unsigned transaction encoding.
pub const UNSIGNED_TX_LEN: usize = TX_SLOTS * (INPUT_LEN + OUTPUT_LEN);

/// Byte length of one joined signature slot (signer ‖ signature).
pub const SIG_SLOT_LEN: usize = 32 + 64;

/// Encode a transaction without its signatures.
#[must_use]
pub fn encode_unsigned(tx: &Transaction) -> Vec<u8> {
    let mut out = Vec::with_capacity(UNSIGNED_TX_LEN);
    for input in &tx.inputs {
        out.extend_from_slice(&input.blknum.to_be_bytes());
        out.extend_from_slice(&input.txindex.to_be_bytes());
        out.extend_from_slice(&input.oindex.to_be_bytes());
    }
    for output in &tx.outputs {
        out.extend_from_slice(output.owner.as_bytes());
        out.extend_from_slice(&output.amount.0.to_be_bytes());
    }
    out
}

/// Decode a transaction from its unsigned encoding.
///
/// # Errors
/// Returns [`PlasmaError::Decode`] if the payload is not exactly
/// [`UNSIGNED_TX_LEN`] bytes.
pub fn decode_transaction(bytes: &[u8]) -> Result<Transaction> {
    if bytes.len() != UNSIGNED_TX_LEN {
        return Err(PlasmaError::Decode {
            reason: format!(
                "expected {UNSIGNED_TX_LEN} bytes, got {}",
                bytes.len()
            ),
        });
    }

    let mut inputs = [TxInput::NULL; TX_SLOTS];
    let mut cursor = 0;
    for input in &mut inputs {
        *input = TxInput::new(
            read_u64(bytes, cursor),
            read_u64(bytes, cursor + 8),
            read_u64(bytes, cursor + 16),
        );
        cursor += INPUT_LEN;
    }

    let mut outputs = [TxOutput::NULL; TX_SLOTS];
    for output in &mut outputs {
        let mut owner = [0u8; 32];
        owner.copy_from_slice(&bytes[cursor..cursor + 32]);
        *output = TxOutput::new(
            Address::from_pubkey(owner),
            Amount::new(read_u128(bytes, cursor + 32)),
        );
        cursor += OUTPUT_LEN;
    }

    Ok(Transaction { inputs, outputs })
}

/// Join the signature slots into the canonical byte string appended to the
/// unsigned encoding when forming a Merkle leaf. Empty slots are zero
/// padding, so deposit leaves stay reproducible from the transaction alone.
#[must_use]
pub fn joined_signatures(slots: &SignatureSlots) -> Vec<u8> {
    let mut out = Vec::with_capacity(TX_SLOTS * SIG_SLOT_LEN);
    for slot in slots {
        match slot {
            Some(signed) => {
                out.extend_from_slice(signed.signer.as_bytes());
                out.extend_from_slice(&signed.signature);
            }
            None => out.extend_from_slice(&[0u8; SIG_SLOT_LEN]),
        }
    }
    out
}

fn read_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    u64::from_be_bytes(buf)
}

fn read_u128(bytes: &[u8], at: usize) -> u128 {
    let mut buf = [0u8; 16];
    buf.copy_from_slice(&bytes[at..at + 16]);
    u128::from_be_bytes(buf)
}
