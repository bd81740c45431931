//! Static reference lists emitted by the local engine.
//!
//! These do not depend on the input text or the mode.

use crate::types::GlossaryEntry;

/// Common contractual vocabulary with plain-language definitions.
pub const GLOSSARY: [(&str, &str); 3] = [
    ("vigência", "período em que o contrato vale"),
    ("rescisão", "ato de terminar o contrato"),
    ("inadimplência", "ficar devendo, atrasar pagamento"),
];

pub const ATTENTION_POINTS: [&str; 3] = [
    "Verifique multas e prazos",
    "Confirme valores e reajustes",
    "Entenda condições de cancelamento",
];

pub const SUGGESTED_QUESTIONS: [&str; 3] = [
    "Qual o prazo de vigência?",
    "Há multa por rescisão?",
    "Como funciona reajuste/juros?",
];

pub fn glossary() -> Vec<GlossaryEntry> {
    GLOSSARY
        .iter()
        .map(|(term, definition)| GlossaryEntry::new(*term, *definition))
        .collect()
}

pub fn attention_points() -> Vec<String> {
    ATTENTION_POINTS.iter().map(|s| s.to_string()).collect()
}

pub fn suggested_questions() -> Vec<String> {
    SUGGESTED_QUESTIONS.iter().map(|s| s.to_string()).collect()
}
