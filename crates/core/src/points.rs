//! Reward-point arithmetic.
//!
//! Pure functions only; the stateful ledger lives in the client crate.
//! All amounts are integer won, so accrual truncates rather than rounds.

use crate::types::Won;

/// Reward rate applied when the owner has not configured one.
pub const DEFAULT_REWARD_RATE_PERCENT: u32 = 40;

/// Minimum amount that must remain payable after redeeming points.
///
/// Point redemption can never push the widget amount below this floor,
/// except when points cover the entire order (see [`max_redeemable`]).
pub const MIN_PAYABLE_FLOOR: Won = Won::new(5000);

/// Points accrued for a completed order: `floor(subtotal * rate / 100)`.
#[must_use]
pub fn accrual(subtotal: Won, rate_percent: u32) -> Won {
    subtotal.percent_floor(rate_percent)
}

/// The most points a customer may redeem against an order.
///
/// Bounded by both the available balance and the requirement that at least
/// `min_payable_floor` remains payable. Never negative.
#[must_use]
pub fn max_redeemable(available: Won, order_total: Won, min_payable_floor: Won) -> Won {
    available
        .min(order_total - min_payable_floor)
        .max(Won::ZERO)
}

/// Clamp a requested redemption into `[0, max_redeemable]`.
///
/// Out-of-range input is corrected, not rejected; the corrected value is
/// returned so the caller can echo it back to the user.
#[must_use]
pub fn clamp_redemption(requested: Won, available: Won, order_total: Won) -> Won {
    let ceiling = max_redeemable(available, order_total, MIN_PAYABLE_FLOOR);
    requested.max(Won::ZERO).min(ceiling)
}

/// Clamp a redemption at checkout time, where full coverage is allowed.
///
/// The payable floor exists because the payment provider refuses tiny card
/// charges; when points cover the entire order no card charge happens, so
/// redeeming exactly the order total is legal. Any partial redemption must
/// still leave at least the floor payable. The result therefore makes the
/// payable amount either zero or at least [`MIN_PAYABLE_FLOOR`].
#[must_use]
pub fn clamp_for_checkout(requested: Won, available: Won, order_total: Won) -> Won {
    let capped = requested.max(Won::ZERO).min(available).min(order_total);
    if capped == order_total {
        return capped;
    }
    capped.min(max_redeemable(available, order_total, MIN_PAYABLE_FLOOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accrual_floor_division() {
        assert_eq!(accrual(Won::new(26700), 40), Won::new(10680));
        assert_eq!(accrual(Won::new(26701), 40), Won::new(10680));
        assert_eq!(accrual(Won::ZERO, 40), Won::ZERO);
    }

    #[test]
    fn test_max_redeemable_bounded_by_balance() {
        // min(15000, 29200 - 5000) = 15000
        assert_eq!(
            max_redeemable(Won::new(15000), Won::new(29200), MIN_PAYABLE_FLOOR),
            Won::new(15000)
        );
    }

    #[test]
    fn test_max_redeemable_bounded_by_floor() {
        // min(30000, 29200 - 5000) = 24200
        assert_eq!(
            max_redeemable(Won::new(30000), Won::new(29200), MIN_PAYABLE_FLOOR),
            Won::new(24200)
        );
    }

    #[test]
    fn test_max_redeemable_never_negative() {
        // order total below the floor: nothing is redeemable
        assert_eq!(
            max_redeemable(Won::new(10000), Won::new(3000), MIN_PAYABLE_FLOOR),
            Won::ZERO
        );
    }

    #[test]
    fn test_clamp_corrects_out_of_range_input() {
        let available = Won::new(30000);
        let total = Won::new(29200);
        assert_eq!(
            clamp_redemption(Won::new(999_999), available, total),
            Won::new(24200)
        );
        assert_eq!(clamp_redemption(Won::new(-50), available, total), Won::ZERO);
        assert_eq!(
            clamp_redemption(Won::new(1000), available, total),
            Won::new(1000)
        );
    }

    #[test]
    fn test_checkout_clamp_allows_full_coverage() {
        // balance covers the order: the whole total is redeemable
        assert_eq!(
            clamp_for_checkout(Won::new(29200), Won::new(30000), Won::new(29200)),
            Won::new(29200)
        );
        // and asking for more than the total still caps at the total
        assert_eq!(
            clamp_for_checkout(Won::new(999_999), Won::new(30000), Won::new(29200)),
            Won::new(29200)
        );
    }

    #[test]
    fn test_checkout_clamp_partial_respects_floor() {
        // a partial redemption may not push payable below the floor
        assert_eq!(
            clamp_for_checkout(Won::new(28000), Won::new(30000), Won::new(29200)),
            Won::new(24200)
        );
        // insufficient balance: bounded by the balance as usual
        assert_eq!(
            clamp_for_checkout(Won::new(20000), Won::new(15000), Won::new(29200)),
            Won::new(15000)
        );
    }
}
