//! Money amounts in Swedish kronor, stored as öre.

use super::ExpenseDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

const ORE_PER_KRONA: i64 = 100;

/// A signed amount of money in minor units.
///
/// Parsed from and rendered as `"123.45"`. A comma is accepted as the
/// decimal separator on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(i64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from öre.
    #[must_use]
    pub const fn from_ore(ore: i64) -> Self {
        Self(ore)
    }

    /// Returns the amount in öre.
    #[must_use]
    pub const fn ore(self) -> i64 {
        self.0
    }

    /// Returns `true` for the zero amount.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parses a decimal kronor string with at most two decimals.
    ///
    /// # Errors
    ///
    /// Returns [`ExpenseDomainError::InvalidAmount`] for anything else.
    pub fn parse(value: &str) -> Result<Self, ExpenseDomainError> {
        let invalid = || ExpenseDomainError::InvalidAmount(value.to_owned());
        let trimmed = value.trim();
        let (negative, unsigned) = trimmed
            .strip_prefix('-')
            .map_or((false, trimmed), |rest| (true, rest));
        let (whole, fraction) = unsigned
            .split_once(['.', ','])
            .unwrap_or((unsigned, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) || fraction.len() > 2 {
            return Err(invalid());
        }

        let kronor: i64 = whole.parse().map_err(|_| invalid())?;
        let padded = format!("{fraction:0<2}");
        let ore: i64 = padded.parse().map_err(|_| invalid())?;
        let magnitude = kronor
            .checked_mul(ORE_PER_KRONA)
            .and_then(|value| value.checked_add(ore))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -magnitude } else { magnitude }))
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Amount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per_krona = ORE_PER_KRONA.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:02}",
            magnitude.div_euclid(per_krona),
            magnitude.rem_euclid(per_krona)
        )
    }
}

impl TryFrom<String> for Amount {
    type Error = ExpenseDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.to_string()
    }
}
