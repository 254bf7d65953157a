//! Integer price representation.
//!
//! The shop API quotes prices as non-negative integers in whole rubles, so a
//! plain `u32` newtype is enough; there is no fractional unit on the wire.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// A price in whole rubles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// A zero price (the total of an empty cart).
    pub const ZERO: Self = Self(0);

    /// Create a price from whole rubles.
    #[must_use]
    pub const fn new(rubles: u32) -> Self {
        Self(rubles)
    }

    /// Get the amount in whole rubles.
    #[must_use]
    pub const fn rubles(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ₽", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

/// Line totals: unit price times quantity.
impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, count: u32) -> Self {
        Self(self.0 * count)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn displays_in_rubles() {
        assert_eq!(Price::new(3900).to_string(), "3900 ₽");
    }

    #[test]
    fn line_total_is_price_times_count() {
        assert_eq!(Price::new(1500) * 3, Price::new(4500));
    }

    #[test]
    fn sums_to_zero_for_empty_iterator() {
        let total: Price = core::iter::empty().sum();
        assert_eq!(total, Price::ZERO);
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&Price::new(990)).unwrap(), "990");
        let price: Price = serde_json::from_str("990").unwrap();
        assert_eq!(price, Price::new(990));
    }
}
