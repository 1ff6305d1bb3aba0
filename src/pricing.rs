//! Pricing
//!
//! Monetary values are accumulated as exact decimals and only rounded to
//! minor units when they are turned into [`Money`] for display.

use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Number of decimal places shown for prices.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Errors converting decimals or currency codes for display.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The currency code is not supported.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// The amount does not fit into minor units.
    #[error("Amount out of range: {0}")]
    OutOfRange(Decimal),
}

/// Look up a supported ISO currency by code (case-insensitive).
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] for unsupported codes.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, PricingError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "GBP" => Ok(iso::GBP),
        "NOK" => Ok(iso::NOK),
        "SEK" => Ok(iso::SEK),
        "DKK" => Ok(iso::DKK),
        other => Err(PricingError::UnknownCurrency(other.to_string())),
    }
}

/// Round an amount to display precision, halves away from zero.
pub fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        DISPLAY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Convert an exact amount into minor units (cents/pence).
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] if the amount overflows `i64` minor units.
pub fn to_minor_units(amount: Decimal) -> Result<i64, PricingError> {
    round_for_display(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or(PricingError::OutOfRange(amount))
}

/// Convert an exact amount into [`Money`], rounding to display precision.
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] if the amount overflows `i64` minor units.
pub fn to_money(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PricingError> {
    Ok(Money::from_minor(to_minor_units(amount)?, currency))
}

/// Format an exact amount for display in the given currency.
///
/// Amounts that cannot be represented fall back to a plain two-decimal
/// rendering with the currency code, so display never fails.
pub fn format_amount(amount: Decimal, currency: &'static Currency) -> String {
    match to_money(amount, currency) {
        Ok(money) => format_money(&money),
        Err(_) => format!(
            "{} {}",
            round_for_display(amount),
            currency.iso_alpha_code
        ),
    }
}

/// Format money for display.
pub fn format_money(money: &Money<'_, Currency>) -> String {
    format!("{money}")
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn currency_lookup_is_case_insensitive() -> TestResult {
        assert_eq!(currency_from_code("usd")?, iso::USD);
        assert_eq!(currency_from_code(" NOK ")?, iso::NOK);

        Ok(())
    }

    #[test]
    fn currency_lookup_rejects_unknown_codes() {
        let result = currency_from_code("ABC");

        assert_eq!(result, Err(PricingError::UnknownCurrency("ABC".to_string())));
    }

    #[test]
    fn minor_units_round_half_away_from_zero() -> TestResult {
        assert_eq!(to_minor_units(Decimal::new(1_005, 3))?, 101);
        assert_eq!(to_minor_units(Decimal::new(1_004, 3))?, 100);
        assert_eq!(to_minor_units(Decimal::from(160))?, 16_000);

        Ok(())
    }

    #[test]
    fn to_money_uses_minor_units() -> TestResult {
        let money = to_money(Decimal::new(207_999, 2), iso::USD)?;

        assert_eq!(money, Money::from_minor(207_999, iso::USD));

        Ok(())
    }

    #[test]
    fn accumulating_before_rounding_avoids_drift() {
        // Three lines at 0.335 each: rounding per line would give 1.02.
        let total: Decimal = std::iter::repeat_n(Decimal::new(335, 3), 3).sum();

        assert_eq!(round_for_display(total), Decimal::new(101, 2));
    }
}
