// ============================================================================
// Fixed-Point Decimal
// Integer-backed prices and quantities with compile-time precision
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Number of fractional digits carried by [`Price`] and [`Quantity`].
pub const DECIMALS: u8 = 9;

/// Fixed-point decimal number with compile-time precision.
///
/// Internally stores `value × 10^D` as an i64, so equality and ordering are
/// plain integer comparisons. `D` must be in `0..=18`.
///
/// # Example
/// ```
/// use l1_book::numeric::Price;
///
/// let price: Price = "100.25".parse().unwrap();
/// assert_eq!(price.raw_value(), 100_250_000_000);
/// assert_eq!(price.to_string(), "100.25");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedDecimal<const D: u8 = DECIMALS>(i64);

/// Compute 10^n at compile time
const fn pow10(n: u8) -> i64 {
    let mut result: i64 = 1;
    let mut i = 0;
    while i < n {
        result *= 10;
        i += 1;
    }
    result
}

impl<const D: u8> FixedDecimal<D> {
    /// The scale factor (10^D)
    pub const SCALE: i64 = pow10(D);

    pub const ZERO: Self = Self(0);

    pub const ONE: Self = Self(pow10(D));

    pub const MAX: Self = Self(i64::MAX);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from an already scaled value.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Create from an integer value.
    #[inline]
    pub fn from_integer(value: i64) -> NumericResult<Self> {
        value
            .checked_mul(Self::SCALE)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Convert from a decimal, rejecting values with more than `D`
    /// fractional digits.
    pub fn from_decimal(d: Decimal) -> NumericResult<Self> {
        if d.scale() > D as u32 && d.round_dp(D as u32) != d {
            return Err(NumericError::PrecisionLoss);
        }
        Self::scale_decimal(d)
    }

    /// Convert from a decimal, rounding half away from zero to `D` digits.
    pub fn from_decimal_rounded(d: Decimal) -> NumericResult<Self> {
        Self::scale_decimal(d.round_dp_with_strategy(D as u32, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Convert from a float received on the wire.
    ///
    /// The float is read as the shortest decimal it stands for, then rounded
    /// to `D` digits, so `100.1` lands on exactly `100.100000000`.
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }
        let d = Decimal::from_f64(value).ok_or(if value.is_sign_negative() {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        })?;
        Self::from_decimal_rounded(d)
    }

    fn scale_decimal(d: Decimal) -> NumericResult<Self> {
        let out_of_range = if d.is_sign_negative() {
            NumericError::Underflow
        } else {
            NumericError::Overflow
        };
        d.checked_mul(Decimal::from(Self::SCALE))
            .and_then(|scaled| scaled.trunc().to_i64())
            .map(Self)
            .ok_or(out_of_range)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The raw scaled value (`value × 10^D`).
    #[inline]
    pub const fn raw_value(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// True when `self` is a whole multiple of a positive `step`.
    #[inline]
    pub const fn is_multiple_of(self, step: Self) -> bool {
        step.0 > 0 && self.0 % step.0 == 0
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, D as u32)
    }

    /// Lossy conversion used for the JSON representation.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(NumericError::Underflow)
    }

    #[inline]
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        Ord::min(self, other)
    }
}

// ============================================================================
// Display, Debug and parsing
// ============================================================================

impl<const D: u8> fmt::Debug for FixedDecimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedDecimal<{}>({}, raw={})", D, self, self.0)
    }
}

impl<const D: u8> fmt::Display for FixedDecimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal().normalize())
    }
}

impl<const D: u8> FromStr for FixedDecimal<D> {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let d = Decimal::from_str(s.trim()).map_err(|_| NumericError::InvalidInput)?;
        Self::from_decimal(d)
    }
}

// ============================================================================
// Serde: JSON numbers on the wire
// ============================================================================

#[cfg(feature = "serde")]
impl<const D: u8> serde::Serialize for FixedDecimal<D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

#[cfg(feature = "serde")]
impl<'de, const D: u8> serde::Deserialize<'de> for FixedDecimal<D> {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let value = <f64 as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_f64(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Type Aliases
// ============================================================================

/// Price with nano precision
pub type Price = FixedDecimal<DECIMALS>;

/// Quantity with nano precision
pub type Quantity = FixedDecimal<DECIMALS>;
