//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE SPLIT-BILL ROUNDING PROBLEM                                        │
//! │                                                                         │
//! │  With floating point shares:                                            │
//! │    Rp 100 / 3 = 33.333... per person (×3 = 99.999...)                   │
//! │                                                                         │
//! │  With naive integer shares:                                             │
//! │    100 / 3 = 33 per person (×3 = 99)  → Lost 1!                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units + explicit remainder placement       │
//! │    split_even(3)  → [34, 33, 33]  (sum = 100)                           │
//! │    allocate(...)  → largest remainder, sum always equals the input      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let line_total = Money::from_minor(30_000).multiply_quantity(2);
//! let shares = line_total.split_even(3);
//!
//! assert_eq!(shares, vec![Money::from_minor(20_000); 3]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::ChargeRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD, rupiah
/// for IDR).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never panics on underflow of a bucket
/// - **Single field tuple struct**: serializes as a plain JSON number
/// - **No float constructor**: amounts enter as minor units only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_minor(1099);
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(299);
    /// assert_eq!(unit_price.multiply_quantity(3).minor(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Multiplies money by a quantity, or `None` if the result leaves i64.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` if the result leaves i64.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Applies a percentage rate, rounding half up to the nearest minor unit.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`, in i128 so large
    /// receipts in zero-decimal currencies cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::ChargeRate;
    ///
    /// let subtotal = Money::from_minor(100_000);
    /// let tax = subtotal.apply_rate(ChargeRate::from_bps(1000)); // 10%
    /// assert_eq!(tax.minor(), 10_000);
    ///
    /// // 1000 × 8.25% = 82.5 → 83
    /// let tax = Money::from_minor(1000).apply_rate(ChargeRate::from_bps(825));
    /// assert_eq!(tax.minor(), 83);
    /// ```
    pub fn apply_rate(&self, rate: ChargeRate) -> Money {
        let amount = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(amount as i64)
    }

    /// Splits the amount into `parts` near-equal pieces that sum exactly to
    /// the original.
    ///
    /// The first `amount % parts` pieces carry one extra minor unit, so the
    /// caller decides who absorbs the remainder by ordering recipients.
    /// Returns an empty vector when `parts` is zero.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let pieces = Money::from_minor(100).split_even(3);
    /// assert_eq!(pieces, vec![
    ///     Money::from_minor(34),
    ///     Money::from_minor(33),
    ///     Money::from_minor(33),
    /// ]);
    /// ```
    pub fn split_even(&self, parts: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }

        let n = parts as i64;
        let base = self.0.div_euclid(n);
        let remainder = self.0.rem_euclid(n) as usize;

        (0..parts)
            .map(|i| if i < remainder { Money(base + 1) } else { Money(base) })
            .collect()
    }

    /// Distributes the amount across `weights` using the largest-remainder
    /// method.
    ///
    /// Every piece is `floor(amount × w / Σw)` plus at most one minor unit,
    /// and the pieces always sum to the amount. Leftover units go to the
    /// largest fractional remainders; ties resolve to the lower index.
    /// When the weights sum to zero (or are empty) every piece is zero.
    ///
    /// Weights are expected to be non-negative and the amount non-negative.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// // 10 split 1:1:1 → 4, 3, 3
    /// let pieces = Money::from_minor(10).allocate(&[1, 1, 1]);
    /// assert_eq!(pieces.iter().map(|m| m.minor()).collect::<Vec<_>>(), vec![4, 3, 3]);
    /// ```
    pub fn allocate(&self, weights: &[i64]) -> Vec<Money> {
        let total_weight: i128 = weights.iter().map(|w| *w as i128).sum();
        if total_weight <= 0 {
            return vec![Money::zero(); weights.len()];
        }

        let amount = self.0 as i128;
        let mut pieces = Vec::with_capacity(weights.len());
        let mut remainders = Vec::with_capacity(weights.len());
        let mut distributed: i128 = 0;

        for (index, weight) in weights.iter().enumerate() {
            let scaled = amount * *weight as i128;
            let floor = scaled.div_euclid(total_weight);
            distributed += floor;
            pieces.push(floor as i64);
            remainders.push((scaled.rem_euclid(total_weight), index));
        }

        // Largest remainder first, lower index on ties.
        remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        let leftover = (amount - distributed) as usize;
        for (_, index) in remainders.into_iter().take(leftover) {
            pieces[index] += 1;
        }

        pieces.into_iter().map(Money).collect()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain minor-unit rendering for logs and debugging.
///
/// ## Note
/// Locale-aware currency formatting belongs to the front end.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn minors(pieces: &[Money]) -> Vec<i64> {
        pieces.iter().map(|m| m.minor()).collect()
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((a * 3).minor(), 3000);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.minor(), 2000);
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let huge = Money::from_minor(4_000_000_000_000_000_000);
        assert_eq!(huge.checked_multiply_quantity(3), None);
        assert_eq!(huge.checked_multiply_quantity(2), Some(Money::from_minor(8_000_000_000_000_000_000)));
        assert_eq!(huge.checked_add(huge), Some(Money::from_minor(8_000_000_000_000_000_000)));
        assert_eq!(huge.checked_add(Money::from_minor(i64::MAX)), None);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        assert_eq!(Money::from_minor(100_000).apply_rate(ChargeRate::from_bps(500)).minor(), 5000);
        assert_eq!(Money::from_minor(1000).apply_rate(ChargeRate::from_bps(825)).minor(), 83);
        assert_eq!(Money::from_minor(999).apply_rate(ChargeRate::zero()).minor(), 0);
    }

    #[test]
    fn test_apply_rate_large_amount_no_overflow() {
        // 50 billion rupiah at 11%
        let amount = Money::from_minor(50_000_000_000);
        assert_eq!(amount.apply_rate(ChargeRate::from_bps(1100)).minor(), 5_500_000_000);
    }

    #[test]
    fn test_split_even_exact() {
        let pieces = Money::from_minor(60_000).split_even(3);
        assert_eq!(minors(&pieces), vec![20_000, 20_000, 20_000]);
    }

    #[test]
    fn test_split_even_remainder_goes_first() {
        let pieces = Money::from_minor(1001).split_even(4);
        assert_eq!(minors(&pieces), vec![251, 250, 250, 250]);
        assert_eq!(pieces.iter().sum::<Money>().minor(), 1001);
    }

    #[test]
    fn test_split_even_zero_parts() {
        assert!(Money::from_minor(100).split_even(0).is_empty());
    }

    #[test]
    fn test_allocate_proportional() {
        // 10000 by 60000:40000
        let pieces = Money::from_minor(10_000).allocate(&[60_000, 40_000]);
        assert_eq!(minors(&pieces), vec![6000, 4000]);
    }

    #[test]
    fn test_allocate_conserves_with_remainders() {
        let pieces = Money::from_minor(100).allocate(&[1, 1, 1]);
        assert_eq!(minors(&pieces), vec![34, 33, 33]);

        let pieces = Money::from_minor(7).allocate(&[5, 3, 2]);
        // exact 3.5, 2.1, 1.4 → floors 3, 2, 1, leftover 1 to index 0
        assert_eq!(minors(&pieces), vec![4, 2, 1]);
    }

    #[test]
    fn test_allocate_zero_weights() {
        let pieces = Money::from_minor(500).allocate(&[0, 0]);
        assert_eq!(minors(&pieces), vec![0, 0]);
        assert!(Money::from_minor(500).allocate(&[]).is_empty());
    }

    #[test]
    fn test_allocate_zero_weight_gets_nothing() {
        let pieces = Money::from_minor(101).allocate(&[0, 1, 1]);
        assert_eq!(minors(&pieces), vec![0, 51, 50]);
    }
}
