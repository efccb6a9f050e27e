use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Price in minor currency units (cents, or whole units for zero-decimal currencies)
/// Serialized as a bare integer, matching the catalog feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Zero price
    pub const ZERO: Price = Price(0);

    /// Create from minor units
    pub const fn from_minor(units: i64) -> Self {
        Price(units)
    }

    /// Get the value in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Create from an i128 intermediate, saturating at the i64 bounds
    pub fn saturating_from_i128(value: i128) -> Self {
        if value > i64::MAX as i128 {
            Price(i64::MAX)
        } else if value < i64::MIN as i128 {
            Price(i64::MIN)
        } else {
            Price(value as i64)
        }
    }

    /// Check if price is zero (free ticket)
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if price is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Saturating subtraction
    pub const fn saturating_sub(&self, other: Self) -> Self {
        Price(self.0.saturating_sub(other.0))
    }
}

impl From<i64> for Price {
    fn from(units: i64) -> Self {
        Price(units)
    }
}

impl Add for Price {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Price(self.0.saturating_add(other.0))
    }
}

impl Sub for Price {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        self.saturating_sub(other)
    }
}

impl Neg for Price {
    type Output = Self;
    fn neg(self) -> Self {
        Price(self.0.saturating_neg())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_arithmetic() {
        let a = Price::from_minor(1000);
        let b = Price::from_minor(300);

        assert_eq!((a + b).minor(), 1300);
        assert_eq!((a - b).minor(), 700);
        assert_eq!((-a).minor(), -1000);
    }

    #[test]
    fn test_price_saturates() {
        assert_eq!(Price::saturating_from_i128(i128::MAX).minor(), i64::MAX);
        assert_eq!(Price::saturating_from_i128(i128::MIN).minor(), i64::MIN);
        assert_eq!(Price::from_minor(i64::MAX) + Price::from_minor(1), Price::from_minor(i64::MAX));
    }

    #[test]
    fn test_price_serializes_as_integer() {
        let json = serde_json::to_string(&Price::from_minor(500000)).unwrap();
        assert_eq!(json, "500000");
    }
}
