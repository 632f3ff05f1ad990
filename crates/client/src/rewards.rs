//! Reward/points ledger.
//!
//! Persists the available balance and the owner-configured reward rate, and
//! applies the settlement delta. The arithmetic itself lives in
//! [`maejang_core::points`]; this module only adds state.
//!
//! [`PointsLedger::apply_outcome`] is called exactly once per completed
//! order, by the checkout coordinator's settle step, and never for failed or
//! cancelled orders.

use std::sync::Arc;

use maejang_core::points;
use maejang_core::types::Won;
use tracing::debug;

use crate::storage::{KvStore, StorageError, StorageKey};

/// Stateful points ledger over the key-value store.
pub struct PointsLedger<S: KvStore> {
    store: Arc<S>,
}

impl<S: KvStore> Clone for PointsLedger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KvStore> PointsLedger<S> {
    /// Open the ledger over the given store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The current point balance; zero if nothing was ever persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted balance cannot be read.
    pub fn available(&self) -> Result<Won, StorageError> {
        Ok(self
            .store
            .get::<Won>(StorageKey::Points)?
            .unwrap_or(Won::ZERO))
    }

    /// The owner-configured reward rate, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted rate cannot be read.
    pub fn reward_rate_percent(&self) -> Result<u32, StorageError> {
        Ok(self
            .store
            .get::<u32>(StorageKey::RewardRate)?
            .unwrap_or(points::DEFAULT_REWARD_RATE_PERCENT))
    }

    /// Persist a new reward rate (owner settings screen).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn set_reward_rate_percent(&self, rate: u32) -> Result<(), StorageError> {
        self.store.set(StorageKey::RewardRate, &rate)
    }

    /// Points this order's subtotal would accrue at the configured rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted rate cannot be read.
    pub fn accrual_for(&self, subtotal: Won) -> Result<Won, StorageError> {
        Ok(points::accrual(subtotal, self.reward_rate_percent()?))
    }

    /// The most points redeemable against an order of `order_total`.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted balance cannot be read.
    pub fn max_redeemable(&self, order_total: Won) -> Result<Won, StorageError> {
        Ok(points::max_redeemable(
            self.available()?,
            order_total,
            points::MIN_PAYABLE_FLOOR,
        ))
    }

    /// Clamp a requested redemption into range and return the corrected
    /// value for display. Out-of-range input is corrected, not rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted balance cannot be read.
    pub fn clamp_redemption(&self, requested: Won, order_total: Won) -> Result<Won, StorageError> {
        Ok(points::clamp_redemption(
            requested,
            self.available()?,
            order_total,
        ))
    }

    /// Clamp a redemption for checkout, where covering the whole order is
    /// allowed and any partial redemption leaves the payable floor intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted balance cannot be read.
    pub fn clamp_for_checkout(
        &self,
        requested: Won,
        order_total: Won,
    ) -> Result<Won, StorageError> {
        Ok(points::clamp_for_checkout(
            requested,
            self.available()?,
            order_total,
        ))
    }

    /// Apply a completed order's point delta in one write:
    /// `available := available - redeemed + accrued`.
    ///
    /// # Errors
    ///
    /// Returns an error if the balance cannot be read or persisted.
    pub fn apply_outcome(&self, redeemed: Won, accrued: Won) -> Result<Won, StorageError> {
        let balance = self.available()? - redeemed + accrued;
        self.store.set(StorageKey::Points, &balance)?;
        debug!(%redeemed, %accrued, %balance, "applied point outcome");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn ledger() -> PointsLedger<MemoryStore> {
        PointsLedger::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_defaults() {
        let ledger = ledger();
        assert_eq!(ledger.available().expect("available"), Won::ZERO);
        assert_eq!(ledger.reward_rate_percent().expect("rate"), 40);
    }

    #[test]
    fn test_accrual_uses_configured_rate() {
        let ledger = ledger();
        assert_eq!(
            ledger.accrual_for(Won::new(26700)).expect("accrual"),
            Won::new(10680)
        );

        ledger.set_reward_rate_percent(10).expect("set rate");
        assert_eq!(
            ledger.accrual_for(Won::new(26700)).expect("accrual"),
            Won::new(2670)
        );
    }

    #[test]
    fn test_max_redeemable_against_balance() {
        let ledger = ledger();
        ledger.apply_outcome(Won::ZERO, Won::new(15000)).expect("seed");
        assert_eq!(
            ledger.max_redeemable(Won::new(29200)).expect("max"),
            Won::new(15000)
        );

        ledger.apply_outcome(Won::ZERO, Won::new(15000)).expect("seed more");
        assert_eq!(
            ledger.max_redeemable(Won::new(29200)).expect("max"),
            Won::new(24200)
        );
    }

    #[test]
    fn test_clamp_echoes_corrected_value() {
        let ledger = ledger();
        ledger.apply_outcome(Won::ZERO, Won::new(30000)).expect("seed");
        assert_eq!(
            ledger
                .clamp_redemption(Won::new(999_999), Won::new(29200))
                .expect("clamp"),
            Won::new(24200)
        );
    }

    #[test]
    fn test_apply_outcome_is_one_delta() {
        let ledger = ledger();
        ledger.apply_outcome(Won::ZERO, Won::new(10000)).expect("seed");

        let balance = ledger
            .apply_outcome(Won::new(4000), Won::new(10680))
            .expect("settle");
        assert_eq!(balance, Won::new(16680));
        assert_eq!(ledger.available().expect("available"), Won::new(16680));
    }
}
