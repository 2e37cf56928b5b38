use validator::ValidationError;

/// Validates that an amount is positive (greater than 0)
pub fn validate_positive_amount(amount: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if *amount <= rust_decimal::Decimal::ZERO {
        let mut error = ValidationError::new("invalid_amount");
        error.message = Some("Amount must be greater than 0".into());
        return Err(error);
    }
    Ok(())
}

/// Validates that an amount is zero or positive
pub fn validate_non_negative_amount(amount: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    if *amount < rust_decimal::Decimal::ZERO {
        let mut error = ValidationError::new("invalid_amount");
        error.message = Some("Amount must not be negative".into());
        return Err(error);
    }
    Ok(())
}
