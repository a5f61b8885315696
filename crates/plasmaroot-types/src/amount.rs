//! Value amounts in integral base-ledger units.
//!
//! All arithmetic on amounts is checked; overflow is surfaced as `None`
//! and mapped to an error at the call site, never wrapped silently.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-negative value in base-ledger units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize,
)]
pub struct Amount(pub u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub fn new(units: u128) -> Self {
        Self(units)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_zero() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn checked_add_overflow() {
        assert_eq!(
            Amount::new(1).checked_add(Amount::new(2)),
            Some(Amount::new(3))
        );
        assert_eq!(Amount::new(u128::MAX).checked_add(Amount::new(1)), None);
    }

    #[test]
    fn checked_sub_underflow() {
        assert_eq!(
            Amount::new(3).checked_sub(Amount::new(2)),
            Some(Amount::new(1))
        );
        assert_eq!(Amount::new(1).checked_sub(Amount::new(2)), None);
    }

    #[test]
    fn serde_roundtrip() {
        let amount = Amount::new(1_234_567_890);
        let json = serde_json::to_string(&amount).unwrap();
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, back);
    }
}
