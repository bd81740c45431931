//! Clause detection rules.
//!
//! An ordered table of (pattern, level, explanation). Each rule emits at most
//! one clause: its first match in the original text plus up to 120 trailing
//! characters.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{AlertLevel, Clause};

/// Characters captured after the trigger term.
pub const TRAILING_CONTEXT: usize = 120;

/// A single clause detection rule.
pub struct ClauseRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub level: AlertLevel,
    pub explanation: &'static str,
}

impl ClauseRule {
    fn new(
        name: &'static str,
        trigger: &str,
        level: AlertLevel,
        explanation: &'static str,
    ) -> Self {
        let pattern = format!(r"(?is)({}).{{0,{}}}", trigger, TRAILING_CONTEXT);
        Self {
            name,
            pattern: Regex::new(&pattern).unwrap(),
            level,
            explanation,
        }
    }

    /// First match of this rule in `text`, as a clause.
    pub fn detect(&self, text: &str) -> Option<Clause> {
        self.pattern
            .find(text)
            .map(|m| Clause::new(m.as_str(), self.explanation, self.level.clone()))
    }
}

lazy_static! {
    /// Rule order is significant: results are emitted in this order.
    pub static ref CLAUSE_RULES: Vec<ClauseRule> = vec![
        ClauseRule::new(
            "penalty",
            "multa|penalidade",
            AlertLevel::High,
            "Há multa ou penalidade prevista.",
        ),
        ClauseRule::new(
            "term",
            "prazo|vigência",
            AlertLevel::Medium,
            "Observe prazos e período de validade.",
        ),
        ClauseRule::new(
            "interest",
            "juros|correção monetária",
            AlertLevel::Medium,
            "Há incidência de juros.",
        ),
        ClauseRule::new(
            "termination",
            "rescisão|cancelamento",
            AlertLevel::Low,
            "Condições para cancelar o contrato.",
        ),
    ];
}

/// Run every rule against the original text.
pub fn extract_clauses(text: &str) -> Vec<Clause> {
    CLAUSE_RULES
        .iter()
        .filter_map(|rule| {
            let clause = rule.detect(text);
            if clause.is_some() {
                tracing::trace!(rule = rule.name, "Clause rule matched");
            }
            clause
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_is_high() {
        let text = "Haverá multa de 10% sobre o valor total.";
        let clauses = extract_clauses(text);

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].alert_level, Some(AlertLevel::High));
        assert_eq!(clauses[0].excerpt, "multa de 10% sobre o valor total.");
        assert_eq!(clauses[0].explanation, "Há multa ou penalidade prevista.");
    }

    #[test]
    fn test_excerpt_is_capped_after_trigger() {
        let tail = "x".repeat(300);
        let text = format!("Prazo {}", tail);
        let clauses = extract_clauses(&text);

        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].excerpt.chars().count(), "Prazo".len() + TRAILING_CONTEXT);
        assert!(text.contains(&clauses[0].excerpt));
    }

    #[test]
    fn test_excerpt_spans_newlines() {
        let text = "Juros\nde 2% ao mês";
        let clauses = extract_clauses(text);
        assert_eq!(clauses[0].excerpt, text);
    }

    #[test]
    fn test_one_clause_per_rule_in_rule_order() {
        let text = "Cancelamento a qualquer momento. Juros de 1%. Multa de 2%. \
                    Outra multa de 3%. Vigência de 12 meses.";
        let clauses = extract_clauses(text);

        let levels: Vec<_> = clauses.iter().map(|c| c.alert_level.clone()).collect();
        assert_eq!(
            levels,
            vec![
                Some(AlertLevel::High),
                Some(AlertLevel::Medium),
                Some(AlertLevel::Medium),
                Some(AlertLevel::Low),
            ]
        );
        // First match only.
        assert!(clauses[0].excerpt.starts_with("Multa de 2%"));
        for clause in &clauses {
            assert!(text.contains(&clause.excerpt));
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let clauses = extract_clauses("RESCISÃO imediata");
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].alert_level, Some(AlertLevel::Low));
    }

    #[test]
    fn test_no_triggers_no_clauses() {
        assert!(extract_clauses("Texto sem termos de risco.").is_empty());
        assert!(extract_clauses("").is_empty());
    }
}
