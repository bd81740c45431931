//! Local (rule-based) simplification engine.
//!
//! Used when no remote credential is configured and as the fallback whenever
//! the remote path fails. Pure and reentrant: no I/O, no shared state.
//!
//! | Step | Input | Module |
//! |------|-------|--------|
//! | Lexical substitution | text, mode | [`lexicon`] |
//! | Clause extraction | original text | [`clauses`] |
//! | Glossary, attention points, questions | none | [`reference`] |
//! | Executive summary | original text | [`summary`] |

pub mod clauses;
pub mod lexicon;
pub mod reference;
pub mod summary;

pub use clauses::{extract_clauses, ClauseRule, CLAUSE_RULES};
pub use lexicon::substitute;
pub use summary::executive_summary;

use crate::types::{Mode, ResultShape};

/// Simplify `text` in the register requested by `mode`.
///
/// Never fails: empty input yields empty sequences where the content is
/// derived from the text.
pub fn simplify(text: &str, mode: Mode) -> ResultShape {
    let result = ResultShape {
        simplified_text: substitute(text, mode),
        executive_summary: executive_summary(text),
        important_clauses: extract_clauses(text),
        glossary: reference::glossary(),
        attention_points: reference::attention_points(),
        suggested_questions: reference::suggested_questions(),
    };

    tracing::debug!(
        mode = %mode,
        clauses = result.important_clauses.len(),
        summary_points = result.executive_summary.len(),
        "Local simplification complete"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::validate;
    use crate::types::AlertLevel;
    use proptest::prelude::*;

    const LEASE: &str = "CONTRATO DE LOCAÇÃO\n\n\
        O locatário deverá pagar o aluguel até o dia 5.\n\n\
        Haverá multa de 10% em caso de atraso, com juros de 1% ao mês.\n\n\
        A rescisão antecipada exige aviso de 30 dias.";

    #[test]
    fn test_simplify_builds_every_section() {
        let result = simplify(LEASE, Mode::Claro);

        assert!(result.simplified_text.contains("penalidade de 10%"));
        assert!(result.simplified_text.contains("taxa que aumenta a dívida"));
        assert_eq!(result.executive_summary.len(), 3);
        assert_eq!(result.executive_summary[0], "CONTRATO DE LOCAÇÃO");
        assert_eq!(result.glossary.len(), 3);
        assert_eq!(result.attention_points.len(), 3);
        assert_eq!(result.suggested_questions.len(), 3);
    }

    #[test]
    fn test_clauses_come_from_original_text() {
        let result = simplify(LEASE, Mode::Adolescente);

        assert!(result
            .important_clauses
            .iter()
            .any(|c| c.excerpt.starts_with("multa de 10%")));
        for clause in &result.important_clauses {
            assert!(LEASE.contains(&clause.excerpt));
        }
    }

    #[test]
    fn test_penalty_sentence_is_flagged_high() {
        let result = simplify("Haverá multa de 10%...", Mode::Claro);
        assert_eq!(
            result.important_clauses[0].alert_level,
            Some(AlertLevel::High)
        );
    }

    #[test]
    fn test_teen_mode_differs_on_trigger_term() {
        let text = "O contratante deverá comparecer.";
        let plain = simplify(text, Mode::Claro);
        let teen = simplify(text, Mode::Adolescente);

        assert_ne!(plain, teen);
        assert_eq!(teen.simplified_text, "O contratante tem que comparecer.");
    }

    #[test]
    fn test_empty_input_yields_defaults() {
        let result = simplify("", Mode::Tecnico);

        assert!(validate(&result.to_value()).is_ok());
        assert_eq!(result.simplified_text, "");
        assert!(result.executive_summary.is_empty());
        assert!(result.important_clauses.is_empty());
        assert_eq!(result.glossary.len(), 3);
    }

    fn any_mode() -> impl Strategy<Value = Mode> {
        prop_oneof![
            Just(Mode::Claro),
            Just(Mode::Adolescente),
            Just(Mode::Tecnico),
        ]
    }

    fn legal_words() -> impl Strategy<Value = String> {
        let words = prop_oneof![
            Just("multa"),
            Just("Multa"),
            Just("rescisão"),
            Just("vigência"),
            Just("juros"),
            Just("cláusula"),
            Just("oneroso"),
            Just("deverá"),
            Just("obriga-se"),
            Just("prazo"),
            Just("o"),
            Just("contrato"),
            Just("\n\n"),
            Just("."),
        ];
        prop::collection::vec(words, 0..40).prop_map(|w| w.join(" "))
    }

    proptest! {
        #[test]
        fn prop_result_always_validates(text in ".{0,400}", mode in any_mode()) {
            let result = simplify(&text, mode);
            prop_assert!(validate(&result.to_value()).is_ok());
            prop_assert!(ResultShape::from_value(result.to_value()).is_ok());
        }

        #[test]
        fn prop_excerpts_are_substrings(text in legal_words(), mode in any_mode()) {
            let result = simplify(&text, mode);
            for clause in &result.important_clauses {
                prop_assert!(text.contains(&clause.excerpt));
            }
        }

        #[test]
        fn prop_substitution_is_idempotent(text in legal_words(), mode in any_mode()) {
            let once = substitute(&text, mode);
            let twice = substitute(&once, mode);
            prop_assert_eq!(once, twice);
        }
    }
}
