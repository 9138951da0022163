//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API.

use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine};

/// Parse a UUID from storage or user input and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| EngineError::InvalidInput(format!("invalid {label} id: {value}")))
}

/// Recorded expenses must cost something.
pub(crate) fn ensure_positive_amount(amount: MoneyCents) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "amount must be > 0, got {amount}"
        )));
    }
    Ok(())
}
