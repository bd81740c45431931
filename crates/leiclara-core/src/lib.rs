//! # leiclara-core
//!
//! Deterministic simplification engine and result contract for Lei Clara.
//!
//! A user supplies a legal or contractual text and a [`Mode`]; the engine
//! answers with a [`ResultShape`]: simplified text, executive summary,
//! flagged clauses, glossary, attention points and suggested questions.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **No network calls**: All simplification is rule-based
//! 3. **Always well-formed**: Every result carries all six fields
//! 4. **Traceable**: Clause excerpts are verbatim slices of the input
//!
//! ## Example
//!
//! ```rust
//! use leiclara_core::{process_local, Mode};
//!
//! let result = process_local("Haverá multa de 10% em caso de atraso.", Mode::Claro)?;
//! assert_eq!(result.important_clauses.len(), 1);
//! # Ok::<(), leiclara_core::ValidationError>(())
//! ```

pub mod engine;
pub mod history;
pub mod input;
pub mod samples;
pub mod shape;
pub mod share;
pub mod types;

// Re-export main types at crate root
pub use engine::simplify;
pub use history::{History, HistoryEntry, HistoryError, HISTORY_CAPACITY};
pub use input::{prepare, sanitize, ValidationError, CHAR_LIMIT};
pub use shape::{validate, ShapeError, REQUIRED_KEYS};
pub use share::share_text;
pub use types::{AlertLevel, Clause, GlossaryEntry, Mode, ResultShape, UnknownMode};

/// Validate raw input and simplify it with the local engine.
///
/// This is the offline entry point: input validation followed by
/// [`simplify`].
pub fn process_local(raw: &str, mode: Mode) -> Result<ResultShape, ValidationError> {
    let text = prepare(raw)?;
    Ok(simplify(&text, mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_local_rejects_empty() {
        assert_eq!(process_local("   ", Mode::Claro), Err(ValidationError::Empty));
    }

    #[test]
    fn test_process_local_sanitizes_before_simplifying() {
        let result = process_local("\u{0}  Multa de 5%.  ", Mode::Claro).unwrap();
        assert_eq!(result.simplified_text, "penalidade de 5%.");
        assert_eq!(result.important_clauses[0].excerpt, "Multa de 5%.");
    }
}
