//! Input validation helpers
//!
//! Centralized text length constants and field rule checks shared by every
//! resource. Lengths are counted in characters, not bytes.

use serde_json::Value;
use shared::error::{AppError, AppResult};
use shared::util::parse_date_millis;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: station, device, automation, pool, customer, courier, etc.
pub const MAX_NAME_LEN: usize = 100;

/// Notes, descriptions, addresses
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: device identifier, QR code, transaction id, phone, order number
pub const MAX_SHORT_TEXT_LEN: usize = 64;

/// URLs
pub const MAX_URL_LEN: usize = 2048;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    check_length(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    match value {
        Some(v) => check_length(v, field, max_len),
        None => Ok(()),
    }
}

fn check_length(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

// ── Numbers ─────────────────────────────────────────────────────────

/// Integers such as `sortOrder`, `position` or `scanCount`
pub fn validate_non_negative(value: i64, field: &str) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::out_of_range(format!("{field} must not be negative"))
            .with_detail("field", field));
    }
    Ok(())
}

/// Money amounts, fees and weights
pub fn validate_non_negative_amount(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::out_of_range(format!("{field} must not be negative"))
            .with_detail("field", field));
    }
    Ok(())
}

/// Inclusive range check for decimals such as percentages
pub fn validate_range(value: f64, field: &str, min: f64, max: f64) -> AppResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(
            AppError::out_of_range(format!("{field} must be between {min} and {max}"))
                .with_detail("field", field),
        );
    }
    Ok(())
}

/// ISO 4217 style code: exactly three ASCII letters
pub fn validate_currency(value: &str, field: &str) -> AppResult<()> {
    if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::validation(format!(
            "{field} must be a 3-letter currency code"
        )));
    }
    Ok(())
}

// ── Embedded formats ────────────────────────────────────────────────

/// Parse JSON text that must describe an object
pub fn parse_json_object(raw: &str, field: &str) -> AppResult<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(AppError::invalid_format(format!("{field} must be a JSON object"))
            .with_detail("field", field)),
        Err(e) => Err(AppError::invalid_format(format!("{field} is not valid JSON: {e}"))
            .with_detail("field", field)),
    }
}

pub fn parse_optional_json_object(raw: Option<String>, field: &str) -> AppResult<Option<Value>> {
    raw.map(|s| parse_json_object(&s, field)).transpose()
}

/// RFC 3339 timestamp or `YYYY-MM-DD`, as Unix millis
pub fn parse_date(raw: &str, field: &str) -> AppResult<i64> {
    parse_date_millis(raw.trim(), false).ok_or_else(|| {
        AppError::invalid_format(format!("{field} must be a valid date"))
            .with_detail("field", field)
            .with_detail("value", raw)
    })
}

pub fn parse_optional_date(raw: Option<String>, field: &str) -> AppResult<Option<i64>> {
    raw.map(|s| parse_date(&s, field)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Grill", "name", MAX_NAME_LEN).is_ok());

        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "name must not be empty");

        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.message, "name is too long (101 chars, max 100)");
    }

    #[test]
    fn test_length_counts_characters() {
        let name = "é".repeat(MAX_NAME_LEN);
        assert!(validate_required_text(&name, "name", MAX_NAME_LEN).is_ok());
        assert!(validate_optional_text(&Some(name), "name", MAX_NAME_LEN).is_ok());
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
    }

    #[test]
    fn test_numeric_rules() {
        assert!(validate_non_negative(0, "position").is_ok());
        assert_eq!(
            validate_non_negative(-1, "position").unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        assert!(validate_non_negative_amount(12.5, "amount").is_ok());
        assert!(validate_non_negative_amount(-0.01, "amount").is_err());
        assert!(validate_non_negative_amount(f64::NAN, "amount").is_err());
        assert!(validate_range(100.0, "percentage", 0.0, 100.0).is_ok());
        assert!(validate_range(100.5, "percentage", 0.0, 100.0).is_err());
    }

    #[test]
    fn test_currency() {
        assert!(validate_currency("EUR", "currency").is_ok());
        assert!(validate_currency("eu", "currency").is_err());
        assert!(validate_currency("E1R", "currency").is_err());
    }

    #[test]
    fn test_json_object() {
        let value = parse_json_object(r#"{"columns": 3}"#, "settings").unwrap();
        assert_eq!(value["columns"], 3);

        let err = parse_json_object("[1, 2]", "settings").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(parse_json_object("{oops", "settings").is_err());
        assert_eq!(parse_optional_json_object(None, "payload").unwrap(), None);
    }

    #[test]
    fn test_dates() {
        assert_eq!(parse_date("2024-01-01", "paidAt").unwrap(), 1_704_067_200_000);
        assert_eq!(
            parse_date("2024-01-01T00:00:01Z", "paidAt").unwrap(),
            1_704_067_201_000
        );
        assert_eq!(
            parse_date("01/02/2024", "paidAt").unwrap_err().code,
            ErrorCode::InvalidFormat
        );
    }
}
