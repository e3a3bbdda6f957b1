use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

/// Represents an amount of money in USD currency.
///
/// The amount is stored as an exact [`Decimal`], with no rounding. The
/// [`Display`] implementation rounds half away from zero to whole cents and
/// formats the result English-style, whatever the host locale:
///
/// ```
/// # use std::str::FromStr;
/// # use vehicle_report::Usd;
/// let price = Usd::from_str("1234.5").unwrap();
/// assert_eq!(price.to_string(), "$1,234.50");
/// ```
///
/// Width and alignment flags apply to the whole formatted string, so
/// `format!("{price:<15}")` pads after the amount.
///
/// Amounts are limited to what a [`Decimal`] holds (28 significant digits),
/// so arithmetic is checked and reports overflow as `None`.
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Usd(Decimal);

impl Usd {
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The exact, unrounded amount.
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    #[must_use]
    pub fn checked_mul(self, rhs: Decimal) -> Option<Self> {
        self.0.checked_mul(rhs).map(Self)
    }
}

impl Debug for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Usd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{:.2}", cents.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
        let sign = if cents.is_sign_negative() && !cents.is_zero() {
            "-"
        } else {
            ""
        };
        f.pad(&format!("${sign}{}.{fraction}", group_thousands(whole)))
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid amount {0:?}")]
pub struct ParseUsdError(String);

impl FromStr for Usd {
    type Err = ParseUsdError;

    /// Accepts plain (`25000`, `1234.50`) and scientific (`2.5e4`) notation.
    /// Nothing but a sign, digits, a decimal point and an exponent is
    /// allowed, so digit separators such as `25_000` are rejected.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ParseUsdError(s.to_string());
        if !s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        {
            return Err(invalid());
        }
        Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map(Self)
            .map_err(|_| invalid())
    }
}
