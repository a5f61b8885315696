//! Deterministic fixtures for tests. **Never use these keys in production.**

use ed25519_dalek::SigningKey;
use plasmaroot_types::Address;

/// A deterministic ed25519 keypair derived from a one-byte seed.
#[must_use]
pub fn keypair(seed: u8) -> (SigningKey, Address) {
    let key = SigningKey::from_bytes(&[seed; 32]);
    let address = Address::from_verifying_key(&key.verifying_key());
    (key, address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypair_is_deterministic() {
        let (_, a) = keypair(1);
        let (_, b) = keypair(1);
        assert_eq!(a, b);
        let (_, c) = keypair(2);
        assert_ne!(a, c);
    }
}
