//! Integer money type for KRW amounts.
//!
//! The backend speaks whole won everywhere (no fractional unit), so amounts
//! are represented as a newtype over `i64` rather than a decimal. All cart,
//! order, and point arithmetic stays in integer space, which keeps the
//! reward-rate floor division exact.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// An amount of Korean won.
///
/// Negative values are representable (for deltas) but every persisted
/// balance and price in the system is non-negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Won(i64);

impl Won {
    /// Zero won.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a raw won value.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the underlying won value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Whether this amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtract, clamping at zero rather than going negative.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        let diff = self.0 - rhs.0;
        if diff < 0 { Self(0) } else { Self(diff) }
    }

    /// Multiply by a percentage and truncate toward zero.
    ///
    /// This is the reward accrual rule: `floor(amount * percent / 100)`.
    #[must_use]
    pub const fn percent_floor(self, percent: u32) -> Self {
        Self(self.0 * percent as i64 / 100)
    }

    /// The smaller of two amounts.
    #[must_use]
    pub const fn min(self, rhs: Self) -> Self {
        if self.0 <= rhs.0 { self } else { rhs }
    }

    /// The larger of two amounts.
    #[must_use]
    pub const fn max(self, rhs: Self) -> Self {
        if self.0 >= rhs.0 { self } else { rhs }
    }
}

impl Add for Won {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Won {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Won {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Won {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul<u32> for Won {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * i64::from(rhs))
    }
}

impl Sum for Won {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Won {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}원", self.0)
    }
}

impl From<i64> for Won {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl From<Won> for i64 {
    fn from(amount: Won) -> Self {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Won::new(8900);
        assert_eq!(a + Won::new(100), Won::new(9000));
        assert_eq!(a - Won::new(900), Won::new(8000));
        assert_eq!(a * 2, Won::new(17800));
    }

    #[test]
    fn test_saturating_sub() {
        assert_eq!(Won::new(3000).saturating_sub(Won::new(5000)), Won::ZERO);
        assert_eq!(Won::new(5000).saturating_sub(Won::new(3000)), Won::new(2000));
    }

    #[test]
    fn test_percent_floor_truncates() {
        // 26700 * 40% = 10680 exactly
        assert_eq!(Won::new(26700).percent_floor(40), Won::new(10680));
        // 99 * 40% = 39.6, truncated to 39
        assert_eq!(Won::new(99).percent_floor(40), Won::new(39));
    }

    #[test]
    fn test_sum() {
        let total: Won = [Won::new(1000), Won::new(2500), Won::new(500)]
            .into_iter()
            .sum();
        assert_eq!(total, Won::new(4000));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Won::new(5000)).expect("serialize");
        assert_eq!(json, "5000");
    }
}
