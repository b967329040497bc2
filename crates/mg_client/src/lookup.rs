//! Recipient identifier normalization and lookup hashing.
//!
//! Phone numbers and email addresses never reach the gateway in the
//! clear; lookups go by HMAC-SHA-256 of the normalized identifier. The
//! lookup keys are published by the gateway operator and are applied as
//! their literal ASCII bytes.

use crate::error::GatewayError;

/// Shared HMAC key for phone-number lookups.
pub const PHONE_HMAC_KEY: &[u8] =
    b"85adf8226953f3d96cfd5d09bf29555eb955fcd8aa5ec4f9fcd869e258370723";

/// Shared HMAC key for email lookups.
pub const EMAIL_HMAC_KEY: &[u8] =
    b"30a5500fed9701fa6defdb610841900febb8e430881f7ad816826264ec09bad7";

/// Reduce a phone number to canonical digit form: separators are
/// stripped and a leading `+` or `00` international prefix is dropped.
/// Characters that cannot be part of a phone number survive, so that
/// validation rejects them afterwards.
pub fn normalize_phone_number(raw: &str) -> String {
    let mut digits = String::with_capacity(raw.len());
    for (i, c) in raw.chars().enumerate() {
        match c {
            '+' if i == 0 => {}
            ' ' | '-' | '.' | '/' | '(' | ')' => {}
            other => digits.push(other),
        }
    }
    match digits.strip_prefix("00") {
        Some(rest) => rest.to_string(),
        None => digits,
    }
}

/// A canonical phone number is 7 to 15 ASCII digits (E.164 bounds).
pub fn validate_phone_number(phone_number: &str) -> Result<(), GatewayError> {
    if phone_number.chars().any(|c| !c.is_ascii_digit()) {
        return Err(GatewayError::InvalidPhoneNumber(
            "contains non-digit characters".into(),
        ));
    }
    if !(7..=15).contains(&phone_number.len()) {
        return Err(GatewayError::InvalidPhoneNumber(format!(
            "expected 7 to 15 digits, got {}",
            phone_number.len()
        )));
    }
    Ok(())
}

/// Canonical email form: surrounding whitespace removed, ASCII lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), GatewayError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(GatewayError::InvalidEmail("missing @".into()));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(GatewayError::InvalidEmail("malformed address".into()));
    }
    Ok(())
}
