use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::{EngineError, ResultEngine};

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (expense amounts,
/// shares, balances, payments) so that splitting and settling never drift.
///
/// The value is signed:
/// - positive = paid / owed to the participant
/// - negative = owed by the participant
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing rounds half-up to the cent and accepts `.` or `,` as separator:
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert_eq!("0.005".parse::<MoneyCents>().unwrap().cents(), 1);
/// assert!("ten".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Converts a decimal amount in major units to cents.
    ///
    /// Rounds half-up (midpoint away from zero) at the cent boundary, so
    /// `10.005` becomes `1001` and `-10.005` becomes `-1001`.
    pub fn from_decimal(value: Decimal) -> ResultEngine<Self> {
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let cents = rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|v| v.to_i64())
            .ok_or_else(overflow)?;
        Ok(Self(cents))
    }

    /// Exact decimal value in major units, always with two fraction digits.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 + rhs.0)
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 += rhs.0;
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 -= rhs.0;
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses a decimal string (major units) into cents.
    ///
    /// Accepts `.` or `,` as decimal separator, an optional leading `+`/`-`
    /// and scientific notation (`1.5e2`). Extra fraction digits are rounded
    /// half-up instead of rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let normalized = trimmed.replace(',', ".");
        let parsed = if normalized.contains(['e', 'E']) {
            Decimal::from_scientific(&normalized.to_ascii_lowercase())
        } else {
            Decimal::from_str_exact(&normalized)
        };
        let value =
            parsed.map_err(|_| EngineError::InvalidAmount(format!("invalid amount: {trimmed}")))?;

        MoneyCents::from_decimal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_fraction_digits() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(10).to_string(), "0.10");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<MoneyCents>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<MoneyCents>().unwrap().cents(), 230);
    }

    #[test]
    fn parse_rounds_half_up_at_the_cent() {
        assert_eq!("12.345".parse::<MoneyCents>().unwrap().cents(), 1235);
        assert_eq!("12.344".parse::<MoneyCents>().unwrap().cents(), 1234);
        assert_eq!("0.005".parse::<MoneyCents>().unwrap().cents(), 1);
        assert_eq!("0.004".parse::<MoneyCents>().unwrap().cents(), 0);
        assert_eq!("-10.005".parse::<MoneyCents>().unwrap().cents(), -1001);
        // 1.005 is not representable as a binary float; decimal parsing keeps it exact.
        assert_eq!("1.005".parse::<MoneyCents>().unwrap().cents(), 101);
    }

    #[test]
    fn parse_accepts_scientific_notation() {
        assert_eq!("1.5e2".parse::<MoneyCents>().unwrap().cents(), 15000);
        assert_eq!("1E-2".parse::<MoneyCents>().unwrap().cents(), 1);
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", "   ", "abc", "1.2.3", "12a", "--1", "NaN"] {
            assert!(
                matches!(
                    input.parse::<MoneyCents>(),
                    Err(EngineError::InvalidAmount(_))
                ),
                "expected InvalidAmount for {input:?}"
            );
        }
    }

    #[test]
    fn parse_rejects_values_out_of_range() {
        assert!(matches!(
            "100000000000000000000".parse::<MoneyCents>(),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn decimal_round_trip_is_exact() {
        let amount = MoneyCents::new(-123_456);
        assert_eq!(amount.to_decimal().to_string(), "-1234.56");
        assert_eq!(MoneyCents::from_decimal(amount.to_decimal()).unwrap(), amount);
    }
}
