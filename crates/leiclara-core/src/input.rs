//! Pre-flight input validation.
//!
//! Rejections here are caller-facing: the user must re-enter the text.
//! Nothing is dispatched to either engine for rejected input.

use thiserror::Error;

/// Maximum document length, in characters.
pub const CHAR_LIMIT: usize = 5000;

/// Input rejected before processing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Cole um documento para processar.")]
    Empty,

    #[error("Texto acima do limite de {limit} caracteres ({length} recebidos).")]
    TooLong { length: usize, limit: usize },
}

/// Strip NUL characters, then surrounding whitespace, control characters
/// and byte-order marks.
pub fn sanitize(raw: &str) -> String {
    raw.replace('\u{0}', "")
        .trim_matches(|c: char| c.is_whitespace() || c.is_control() || c == '\u{FEFF}')
        .to_string()
}

/// Sanitize `raw` and enforce the non-empty and length rules.
pub fn prepare(raw: &str) -> Result<String, ValidationError> {
    let text = sanitize(raw);

    if text.is_empty() {
        return Err(ValidationError::Empty);
    }

    let length = text.chars().count();
    if length > CHAR_LIMIT {
        return Err(ValidationError::TooLong {
            length,
            limit: CHAR_LIMIT,
        });
    }

    Ok(text)
}
