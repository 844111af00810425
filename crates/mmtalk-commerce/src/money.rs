//! Money type for representing monetary values.
//!
//! Amounts are integers in the smallest unit of the currency. The catalog
//! prices everything in whole won, so KRW is the default.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    KRW,
    USD,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "KRW").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::KRW => "KRW",
            Currency::USD => "USD",
            Currency::JPY => "JPY",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::KRW | Currency::JPY => 0,
            Currency::USD => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "KRW" => Some(Currency::KRW),
            "USD" => Some(Currency::USD),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }

    fn decorate(&self, digits: &str) -> String {
        match self {
            Currency::KRW => format!("{digits}\u{c6d0}"),
            Currency::USD => format!("${digits}"),
            Currency::JPY => format!("\u{00a5}{digits}"),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (won for KRW).
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Shorthand for a won amount.
    pub fn won(amount: i64) -> Self {
        Self::new(amount, Currency::KRW)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Get the absolute value.
    pub fn abs(&self) -> Self {
        Self::new(self.amount.saturating_abs(), self.currency)
    }

    /// Format as a display string (e.g., "34,000원", "$49.99").
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places();
        let digits = if places == 0 {
            format_grouped(self.amount)
        } else {
            let divisor = 10_i64.pow(places);
            let whole = format_grouped(self.amount / divisor);
            let fraction = (self.amount % divisor).unsigned_abs();
            let sign = if self.amount < 0 && self.amount / divisor == 0 {
                "-"
            } else {
                ""
            };
            format!("{sign}{whole}.{fraction:0width$}", width = places as usize)
        };

        if let Some(unsigned) = digits.strip_prefix('-') {
            format!("-{}", self.currency.decorate(unsigned))
        } else {
            self.currency.decorate(&digits)
        }
    }

    /// Format as a signed delta (e.g., "+1,000원", "-500원").
    ///
    /// Zero renders without a sign.
    pub fn display_delta(&self) -> String {
        if self.is_positive() {
            format!("+{}", self.display())
        } else {
            self.display()
        }
    }

    /// Try to add another Money value.
    pub fn try_add(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        self.amount
            .checked_add(other.amount)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Result<Money, CommerceError> {
        self.ensure_same_currency(other)?;
        self.amount
            .checked_sub(other.amount)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a scalar, failing on overflow.
    pub fn try_multiply(&self, factor: i64) -> Result<Money, CommerceError> {
        self.amount
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a scalar, clamping at the i64 bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount.saturating_mul(factor), self.currency)
    }

    /// Sum an iterator of Money values.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Result<Money, CommerceError> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), CommerceError> {
        if self.currency != other.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturating addition; currencies are expected to match.
    fn add(self, other: Money) -> Money {
        debug_assert_eq!(self.currency, other.currency);
        Money::new(self.amount.saturating_add(other.amount), self.currency)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        debug_assert_eq!(self.currency, other.currency);
        Money::new(self.amount.saturating_sub(other.amount), self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Group an integer's digits by thousands: `-1234567` becomes `-1,234,567`.
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
