//! # Point Values
//!
//! Fixed-point arithmetic for item costs and budgets.
//!
//! Point values carry four decimal places, so `0.0001` is the smallest
//! positive cost an item can have. Storing them as integer ten-thousandths
//! keeps budget accounting exact: ten draws of `0.1` spend exactly `1.0`.

use crate::config::POINT_SCALE;
use crate::{LootError, LootResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A non-negative point amount with four decimal places.
///
/// # Examples
///
/// ```
/// use loot_generator::Points;
///
/// let cost = Points::from_f64(2.5).unwrap();
/// assert_eq!(cost.units(), 25_000);
/// assert_eq!(cost.to_string(), "2.5");
/// assert!(cost < Points::from_whole(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Points(u64);

impl Points {
    /// Zero points.
    pub const ZERO: Self = Self(0);

    /// The smallest positive amount, `0.0001`.
    pub const MIN_POSITIVE: Self = Self(1);

    /// Creates an amount from raw ten-thousandths.
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Creates an amount from a whole number of points.
    pub const fn from_whole(whole: u32) -> Self {
        Self(whole as u64 * POINT_SCALE)
    }

    /// Converts a decimal, rounding to the nearest ten-thousandth.
    ///
    /// Returns `None` for negative, NaN, infinite, or out-of-range input.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let units = (value * POINT_SCALE as f64).round();
        if units > u64::MAX as f64 {
            return None;
        }
        Some(Self(units as u64))
    }

    /// Raw ten-thousandths.
    pub const fn units(self) -> u64 {
        self.0
    }

    /// Lossy conversion for display and serialization.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / POINT_SCALE as f64
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Multiplies by a material modifier, rounding to the nearest
    /// ten-thousandth and saturating at the representable range.
    ///
    /// # Examples
    ///
    /// ```
    /// use loot_generator::Points;
    ///
    /// let base = Points::from_whole(10);
    /// assert_eq!(base.scale(1.5), Points::from_whole(15));
    /// assert_eq!(base.scale(0.25), Points::from_f64(2.5).unwrap());
    /// ```
    pub fn scale(self, modifier: f64) -> Self {
        if !modifier.is_finite() || modifier <= 0.0 {
            return Self::ZERO;
        }
        let scaled = (self.0 as f64 * modifier).round();
        if scaled >= u64::MAX as f64 {
            Self(u64::MAX)
        } else {
            Self(scaled as u64)
        }
    }
}

impl Add for Points {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Points> for Points {
    fn sum<I: Iterator<Item = &'a Points>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl TryFrom<f64> for Points {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value).ok_or_else(|| format!("invalid point value: {}", value))
    }
}

impl From<Points> for f64 {
    fn from(points: Points) -> f64 {
        points.to_f64()
    }
}

impl FromStr for Points {
    type Err = LootError;

    fn from_str(s: &str) -> LootResult<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| LootError::InvalidCatalog(format!("not a number: {:?}", s)))?;
        Self::from_f64(value)
            .ok_or_else(|| LootError::InvalidCatalog(format!("invalid point value: {}", s)))
    }
}

impl fmt::Display for Points {
    /// Renders the shortest exact decimal, e.g. `12`, `2.5`, `0.0001`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / POINT_SCALE;
        let frac = self.0 % POINT_SCALE;
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:04}", frac);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_from_f64() {
        assert_eq!(Points::from_f64(0.0001), Some(Points::MIN_POSITIVE));
        assert_eq!(Points::from_f64(12.0), Some(Points::from_whole(12)));
        assert_eq!(Points::from_f64(-1.0), None);
        assert_eq!(Points::from_f64(f64::NAN), None);
        assert_eq!(Points::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_points_exact_accumulation() {
        let tenth = Points::from_f64(0.1).unwrap();
        let total: Points = std::iter::repeat(tenth).take(10).sum();
        assert_eq!(total, Points::from_whole(1));
    }

    #[test]
    fn test_points_subtraction() {
        let five = Points::from_whole(5);
        let three = Points::from_whole(3);
        assert_eq!(five.saturating_sub(three), Points::from_whole(2));
        assert_eq!(three.saturating_sub(five), Points::ZERO);
    }

    #[test]
    fn test_points_scale() {
        let base = Points::from_whole(10);
        assert_eq!(base.scale(1.0), base);
        assert_eq!(base.scale(1.2), Points::from_whole(12));
        assert_eq!(base.scale(0.0), Points::ZERO);
        assert_eq!(base.scale(f64::NAN), Points::ZERO);
        assert_eq!(Points::MIN_POSITIVE.scale(0.1), Points::ZERO);
    }

    #[test]
    fn test_points_display() {
        assert_eq!(Points::from_whole(12).to_string(), "12");
        assert_eq!(Points::from_f64(2.5).unwrap().to_string(), "2.5");
        assert_eq!(Points::MIN_POSITIVE.to_string(), "0.0001");
        assert_eq!(Points::from_f64(3.125).unwrap().to_string(), "3.125");
    }

    #[test]
    fn test_points_parse() {
        assert_eq!("7.5".parse::<Points>().unwrap(), Points::from_f64(7.5).unwrap());
        assert!("-2".parse::<Points>().is_err());
        assert!("ten".parse::<Points>().is_err());
    }

    #[test]
    fn test_points_serde() {
        let json = serde_json::to_string(&Points::from_f64(2.5).unwrap()).unwrap();
        assert_eq!(json, "2.5");

        let parsed: Points = serde_json::from_str("10").unwrap();
        assert_eq!(parsed, Points::from_whole(10));

        assert!(serde_json::from_str::<Points>("-1").is_err());
    }
}
