//! Field rules for test form submissions.
//!
//! Every rule runs; failures accumulate in field order (name, email, message)
//! instead of stopping at the first one.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::TestFormSubmission;

/// Minimum trimmed length of the name field.
pub const MIN_NAME_LEN: usize = 2;
/// Minimum trimmed length of the message field.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Error reported for a short or missing name.
pub const NAME_ERROR: &str = "Name must be at least 2 characters";
/// Error reported for a missing or malformed email.
pub const EMAIL_ERROR: &str = "Valid email is required";
/// Error reported for a short or missing message.
pub const MESSAGE_ERROR: &str = "Message must be at least 10 characters";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

fn trimmed_len_at_least(value: Option<&str>, min: usize) -> bool {
    value.is_some_and(|v| v.trim().chars().count() >= min)
}

/// Name is present and at least two characters after trimming.
pub fn is_valid_name(name: Option<&str>) -> bool {
    trimmed_len_at_least(name, MIN_NAME_LEN)
}

/// Email is present and looks like `local@domain.tld`.
pub fn is_valid_email(email: Option<&str>) -> bool {
    email.is_some_and(|e| EMAIL_PATTERN.is_match(e))
}

/// Message is present and at least ten characters after trimming.
pub fn is_valid_message(message: Option<&str>) -> bool {
    trimmed_len_at_least(message, MIN_MESSAGE_LEN)
}

/// Run every rule and collect the failures in field order.
pub fn validate_submission(form: &TestFormSubmission) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_valid_name(form.name.as_deref()) {
        errors.push(NAME_ERROR.to_string());
    }
    if !is_valid_email(form.email.as_deref()) {
        errors.push(EMAIL_ERROR.to_string());
    }
    if !is_valid_message(form.message.as_deref()) {
        errors.push(MESSAGE_ERROR.to_string());
    }

    errors
}
