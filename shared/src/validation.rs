//! Validation utilities for the Shop Management Platform

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Validate that a stock or line quantity is strictly positive
pub fn validate_positive_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate that a monetary amount is strictly positive
pub fn validate_positive_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Amount must be positive");
    }
    Ok(())
}

/// Validate that a monetary amount is not negative
///
/// Used for optional figures that default to zero: tax, discount, bonus,
/// fine, paid amount.
pub fn validate_non_negative_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Validate that a name field is non-empty after trimming
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    if name.len() > 200 {
        return Err("Name must be at most 200 characters");
    }
    Ok(())
}

/// Normalize any date to the first day of its month
///
/// Salary records are keyed by month; every date inside a month maps to
/// the same key.
pub fn normalize_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_positive_quantity() {
        assert!(validate_positive_quantity(dec("0.5")).is_ok());
        assert!(validate_positive_quantity(Decimal::ZERO).is_err());
        assert!(validate_positive_quantity(dec("-3")).is_err());
    }

    #[test]
    fn test_validate_non_negative_amount() {
        assert!(validate_non_negative_amount(Decimal::ZERO).is_ok());
        assert!(validate_non_negative_amount(dec("10")).is_ok());
        assert!(validate_non_negative_amount(dec("-0.01")).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Jasmine Rice 5kg").is_ok());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_normalize_month() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 19).unwrap();
        assert_eq!(
            normalize_month(date),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
        );
    }
}
