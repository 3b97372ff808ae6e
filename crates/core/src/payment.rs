//! Checkout helpers for the hosted payment widget.
//!
//! The widget itself runs in the browser; the server only mints transaction
//! references and sanity-checks the amount and currency it is handed.

use rand::distr::{Alphanumeric, SampleString};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Largest single donation accepted through checkout.
pub const MAX_DONATION_AMOUNT: f64 = 10_000_000.0;

/// Length of the random suffix on a transaction reference.
const TX_REF_SUFFIX_LEN: usize = 6;

/// Mint a transaction reference: `{PREFIX}-{unix_millis}-{random}`.
///
/// The prefix is upper-cased; the suffix is six ASCII alphanumerics.
pub fn generate_tx_ref(prefix: &str, now: Timestamp) -> String {
    let suffix = Alphanumeric.sample_string(&mut rand::rng(), TX_REF_SUFFIX_LEN);
    format!(
        "{}-{}-{}",
        prefix.to_ascii_uppercase(),
        now.timestamp_millis(),
        suffix
    )
}

/// Validate a donation amount: finite, positive, and within the cap.
pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(CoreError::Validation(
            "Donation amount must be greater than zero".to_string(),
        ));
    }
    if amount > MAX_DONATION_AMOUNT {
        return Err(CoreError::Validation(format!(
            "Donation amount must not exceed {MAX_DONATION_AMOUNT}"
        )));
    }
    Ok(())
}

/// Validate an ISO-4217 style currency code (three uppercase letters).
pub fn validate_currency(code: &str) -> Result<(), CoreError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid currency code '{code}'. Expected three uppercase letters"
        )))
    }
}
