//! Ed25519 signer recovery and the paired transaction/confirmation check.
//!
//! An [`Address`] is the raw ed25519 verifying key, so "recovering" a
//! signer means verifying the signature under the key carried alongside it
//! in a [`SignedDigest`] bundle. A confirmation signature is made over the
//! confirmation digest (hash of the transaction digest) and binds the
//! transaction to its accepted place in history; the check that ties the
//! two together is per input slot: the confirmation signer must be the same
//! key that authorized the transfer.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use plasmaroot_types::constants::TX_SLOTS;
use plasmaroot_types::{Address, Digest, PlasmaError, Result, TxInput};
use serde::{Deserialize, Serialize};

/// A signature bundled with its signer's verifying key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedDigest {
    /// The claimed signer. Verification proves the claim.
    pub signer: Address,
    /// Ed25519 signature bytes (64 bytes).
    pub signature: Vec<u8>,
}

impl SignedDigest {
    /// Sign a digest, bundling the signer's address.
    #[must_use]
    pub fn sign(digest: &Digest, key: &SigningKey) -> Self {
        Self {
            signer: Address::from_verifying_key(&key.verifying_key()),
            signature: key.sign(digest).to_vec(),
        }
    }
}

/// One optional signature per transaction slot, aligned with the input
/// slots of the transaction they sign.
pub type SignatureSlots = [Option<SignedDigest>; TX_SLOTS];

/// Verify `signed` over `digest` and return the proven signer address.
///
/// # Errors
/// - [`PlasmaError::MalformedKey`] if the signer bytes are not a valid key
/// - [`PlasmaError::SignatureInvalid`] if verification fails
pub fn recover_signer(digest: &Digest, signed: &SignedDigest) -> Result<Address> {
    let key = VerifyingKey::from_bytes(signed.signer.as_bytes())
        .map_err(|_| PlasmaError::MalformedKey)?;
    let signature =
        Signature::from_slice(&signed.signature).map_err(|_| PlasmaError::SignatureInvalid)?;
    key.verify_strict(digest, &signature)
        .map_err(|_| PlasmaError::SignatureInvalid)?;
    Ok(signed.signer)
}

/// Validate a transaction's signatures together with its confirmation
/// signatures.
///
/// For every funded input slot, both a transaction signature (over
/// `tx_digest`) and a confirmation signature (over `confirmation_digest`)
/// must be present, verify, and recover to the same signer. Null slots must
/// carry no signatures. A deposit transaction (no funded inputs) passes
/// vacuously.
pub fn validate_signatures(
    tx_digest: &Digest,
    confirmation_digest: &Digest,
    inputs: &[TxInput; TX_SLOTS],
    tx_signatures: &SignatureSlots,
    confirmation_signatures: &SignatureSlots,
) -> Result<()> {
    for (slot, input) in inputs.iter().enumerate() {
        if input.is_funded() {
            let tx_signed = tx_signatures[slot]
                .as_ref()
                .ok_or(PlasmaError::MissingSignature { slot })?;
            let confirmation_signed = confirmation_signatures[slot]
                .as_ref()
                .ok_or(PlasmaError::MissingSignature { slot })?;

            let tx_signer = recover_signer(tx_digest, tx_signed)?;
            let confirmation_signer = recover_signer(confirmation_digest, confirmation_signed)?;
            if tx_signer != confirmation_signer {
                return Err(PlasmaError::SignerMismatch { slot });
            }
        } else if tx_signatures[slot].is_some() || confirmation_signatures[slot].is_some() {
            return Err(PlasmaError::UnexpectedSignature { slot });
        }
    }
    Ok(())
}
