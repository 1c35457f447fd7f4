//! Input validation for writes.
//!
//! Titles and messages are trimmed before validation and the trimmed values
//! are what gets submitted. Validation runs before any network call.

use crate::config::LimitsConfig;
use crate::errors::{JournalError, JournalResult};

/// Trimmed, non-empty input for a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInput {
    pub title: String,
    pub message: String,
}

/// True when both fields are non-empty after trimming.
pub fn is_submittable(title: &str, message: &str) -> bool {
    !title.trim().is_empty() && !message.trim().is_empty()
}

/// Validate a title and return its trimmed form.
pub fn validate_title(title: &str, limits: &LimitsConfig) -> JournalResult<String> {
    let t = title.trim();
    if t.is_empty() {
        return Err(JournalError::validation("title must not be empty"));
    }
    if t.len() > limits.max_title_bytes {
        return Err(JournalError::validation(format!(
            "title is {} bytes, maximum is {}",
            t.len(),
            limits.max_title_bytes
        )));
    }
    Ok(t.to_string())
}

/// Validate a message and return its trimmed form.
pub fn validate_message(message: &str, limits: &LimitsConfig) -> JournalResult<String> {
    let m = message.trim();
    if m.is_empty() {
        return Err(JournalError::validation("message must not be empty"));
    }
    if m.len() > limits.max_message_bytes {
        return Err(JournalError::validation(format!(
            "message is {} bytes, maximum is {}",
            m.len(),
            limits.max_message_bytes
        )));
    }
    Ok(m.to_string())
}

pub fn validate_entry_input(title: &str, message: &str, limits: &LimitsConfig) -> JournalResult<EntryInput> {
    Ok(EntryInput {
        title: validate_title(title, limits)?,
        message: validate_message(message, limits)?,
    })
}
