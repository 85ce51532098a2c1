//! Request validation utilities.

use validator::ValidationError;

/// Builds a [`ValidationError`] carrying a client-facing message.
pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}
