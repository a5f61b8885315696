//! SHA-256 digests with domain separation.
//!
//! One hash function serves transaction digests, confirmation digests, and
//! Merkle nodes; each use site prepends its own domain prefix so a digest
//! from one context can never be replayed in another. The confirmation
//! digest is a hash *of the transaction digest* — signing it binds a
//! transaction to its accepted place in history, distinct from the
//! signature authorizing the transfer itself.

use plasmaroot_types::Digest;
use sha2::{Digest as _, Sha256};

fn sha256(domain: &'static [u8], parts: &[&[u8]]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Digest of a transaction's unsigned encoding. This is what transaction
/// signatures are made over.
#[must_use]
pub fn tx_digest(unsigned: &[u8]) -> Digest {
    sha256(b"plasmaroot:tx:v1:", &[unsigned])
}

/// Digest confirmed by confirmation signatures: the hash of the
/// transaction digest.
#[must_use]
pub fn confirmation_digest(tx_digest: &Digest) -> Digest {
    sha256(b"plasmaroot:confirm:v1:", &[tx_digest])
}

/// Digest of a Merkle leaf: the unsigned encoding concatenated with the
/// joined signature slots.
#[must_use]
pub fn leaf_digest(unsigned: &[u8], signatures: &[u8]) -> Digest {
    sha256(b"plasmaroot:leaf:v1:", &[unsigned, signatures])
}

/// Digest of an interior Merkle node.
#[must_use]
pub fn node_digest(left: &Digest, right: &Digest) -> Digest {
    sha256(b"plasmaroot:node:v1:", &[left, right])
}
