//! Custody of base-ledger value.
//!
//! Conservation invariant checked after every settlement sweep:
//! ```text
//! pool + Σ(withdrawable) == Σ(funded)
//! ```
//! Deposits and exit bonds fund the pool; the settlement sweep and
//! challenge awards pay out of it. If conservation ever breaks, something
//! has gone catastrophically wrong and the error must halt the caller.

use std::collections::HashMap;

use plasmaroot_types::{Address, Amount, PlasmaError, Result};

/// The contract's pooled value plus the per-address withdrawable ledger.
pub struct Vault {
    /// Value currently held against open claims and unexited deposits.
    pool: Amount,
    /// Value paid out, keyed by recipient.
    withdrawable: HashMap<Address, Amount>,
    /// Total value ever funded into the pool.
    total_funded: Amount,
    /// Total value ever paid out of the pool.
    total_paid: Amount,
}

impl Vault {
    /// Create an empty vault.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pool: Amount::ZERO,
            withdrawable: HashMap::new(),
            total_funded: Amount::ZERO,
            total_paid: Amount::ZERO,
        }
    }

    /// Move value into the pool (deposit or attached exit bond).
    ///
    /// # Errors
    /// Returns [`PlasmaError::AmountOverflow`] if the pool would overflow.
    /// Nothing is written on error.
    pub fn fund(&mut self, amount: Amount) -> Result<()> {
        let pool = self
            .pool
            .checked_add(amount)
            .ok_or(PlasmaError::AmountOverflow)?;
        let total_funded = self
            .total_funded
            .checked_add(amount)
            .ok_or(PlasmaError::AmountOverflow)?;

        self.pool = pool;
        self.total_funded = total_funded;
        Ok(())
    }

    /// Pay value out of the pool into `to`'s withdrawable ledger.
    ///
    /// Either the full payment lands or nothing changes.
    ///
    /// # Errors
    /// Returns [`PlasmaError::InsufficientPool`] if the pool cannot cover
    /// the payment — a broken invariant, since every payout corresponds to
    /// previously funded value.
    pub fn pay(&mut self, to: Address, amount: Amount) -> Result<()> {
        let pool = self
            .pool
            .checked_sub(amount)
            .ok_or(PlasmaError::InsufficientPool {
                needed: amount,
                pooled: self.pool,
            })?;
        let credited = self
            .withdrawable(to)
            .checked_add(amount)
            .ok_or(PlasmaError::AmountOverflow)?;
        let total_paid = self
            .total_paid
            .checked_add(amount)
            .ok_or(PlasmaError::AmountOverflow)?;

        self.pool = pool;
        self.withdrawable.insert(to, credited);
        self.total_paid = total_paid;
        tracing::debug!(to = %to, amount = %amount, "vault payout");
        Ok(())
    }

    /// Value paid out to `address` so far.
    #[must_use]
    pub fn withdrawable(&self, address: Address) -> Amount {
        self.withdrawable
            .get(&address)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Value currently pooled.
    #[must_use]
    pub fn pool(&self) -> Amount {
        self.pool
    }

    /// Total value ever funded.
    #[must_use]
    pub fn total_funded(&self) -> Amount {
        self.total_funded
    }

    /// Total value ever paid out.
    #[must_use]
    pub fn total_paid(&self) -> Amount {
        self.total_paid
    }

    /// Verify the conservation invariant.
    ///
    /// # Errors
    /// Returns [`PlasmaError::ConservationViolation`] if the pool and the
    /// payout ledger no longer account for every funded unit.
    pub fn verify_conservation(&self) -> Result<()> {
        let ledger_total = self
            .withdrawable
            .values()
            .try_fold(Amount::ZERO, |acc, amount| acc.checked_add(*amount))
            .ok_or(PlasmaError::AmountOverflow)?;

        let accounted = self
            .pool
            .checked_add(ledger_total)
            .ok_or(PlasmaError::AmountOverflow)?;

        if ledger_total != self.total_paid || accounted != self.total_funded {
            return Err(PlasmaError::ConservationViolation {
                reason: format!(
                    "pool {} + paid ledger {ledger_total} != funded {} (recorded payouts {})",
                    self.pool, self.total_funded, self.total_paid
                ),
            });
        }
        Ok(())
    }
}

impl Default for Vault {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vault_conserves() {
        let vault = Vault::new();
        assert_eq!(vault.pool(), Amount::ZERO);
        vault.verify_conservation().unwrap();
    }

    #[test]
    fn fund_increases_pool() {
        let mut vault = Vault::new();
        vault.fund(Amount::new(100)).unwrap();
        vault.fund(Amount::new(50)).unwrap();
        assert_eq!(vault.pool(), Amount::new(150));
        assert_eq!(vault.total_funded(), Amount::new(150));
        vault.verify_conservation().unwrap();
    }

    #[test]
    fn pay_moves_pool_to_ledger() {
        let mut vault = Vault::new();
        let alice = Address::dummy(1);
        vault.fund(Amount::new(100)).unwrap();
        vault.pay(alice, Amount::new(60)).unwrap();

        assert_eq!(vault.pool(), Amount::new(40));
        assert_eq!(vault.withdrawable(alice), Amount::new(60));
        assert_eq!(vault.total_paid(), Amount::new(60));
        vault.verify_conservation().unwrap();
    }

    #[test]
    fn pay_accumulates_per_address() {
        let mut vault = Vault::new();
        let alice = Address::dummy(1);
        vault.fund(Amount::new(100)).unwrap();
        vault.pay(alice, Amount::new(30)).unwrap();
        vault.pay(alice, Amount::new(20)).unwrap();
        assert_eq!(vault.withdrawable(alice), Amount::new(50));
    }

    #[test]
    fn overdraw_rejected_and_state_unchanged() {
        let mut vault = Vault::new();
        vault.fund(Amount::new(10)).unwrap();
        let err = vault.pay(Address::dummy(1), Amount::new(11)).unwrap_err();
        assert!(matches!(err, PlasmaError::InsufficientPool { .. }));
        assert_eq!(vault.pool(), Amount::new(10));
        assert_eq!(vault.withdrawable(Address::dummy(1)), Amount::ZERO);
        vault.verify_conservation().unwrap();
    }

    #[test]
    fn fund_overflow_rejected() {
        let mut vault = Vault::new();
        vault.fund(Amount::new(u128::MAX)).unwrap();
        let err = vault.fund(Amount::new(1)).unwrap_err();
        assert!(matches!(err, PlasmaError::AmountOverflow));
        assert_eq!(vault.pool(), Amount::new(u128::MAX));
    }

    #[test]
    fn unknown_address_has_zero_withdrawable() {
        let vault = Vault::new();
        assert_eq!(vault.withdrawable(Address::dummy(5)), Amount::ZERO);
    }
}
