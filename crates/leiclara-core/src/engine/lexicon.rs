//! Lexical substitution tables.
//!
//! The fixed dictionary runs first over the whole text; teen-mode rewrites
//! are layered on top of the already-substituted text. Every pattern is
//! case-insensitive and replaces all occurrences.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Mode;

lazy_static! {
    /// Legal jargon to everyday words, applied in every mode.
    static ref DICTIONARY: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)oneroso").unwrap(), "caro"),
        (Regex::new(r"(?i)rescisão").unwrap(), "cancelamento"),
        (Regex::new(r"(?i)inadimplência").unwrap(), "atraso no pagamento"),
        (Regex::new(r"(?i)multa").unwrap(), "penalidade"),
        (Regex::new(r"(?i)vigência").unwrap(), "período de validade"),
        (Regex::new(r"(?i)cláusula").unwrap(), "regra"),
        (Regex::new(r"(?i)juros").unwrap(), "taxa que aumenta a dívida"),
        (Regex::new(r"(?i)confidencialidade").unwrap(), "manter segredo"),
    ];

    /// Whole-word rewrites for `Mode::Adolescente`.
    static ref TEEN_REWRITES: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\bdeverá\b").unwrap(), "tem que"),
        (Regex::new(r"(?i)\bresponsabiliza-se\b").unwrap(), "fica responsável"),
        (Regex::new(r"(?i)\bobriga-se\b").unwrap(), "se compromete"),
    ];
}

fn apply(text: String, table: &[(Regex, &'static str)]) -> String {
    table.iter().fold(text, |acc, (pattern, replacement)| {
        // `NoExpand` keeps replacements literal.
        pattern
            .replace_all(&acc, regex::NoExpand(*replacement))
            .into_owned()
    })
}

/// Rewrite `text` in the register requested by `mode`.
pub fn substitute(text: &str, mode: Mode) -> String {
    let simplified = apply(text.to_string(), &DICTIONARY);

    match mode {
        Mode::Adolescente => apply(simplified, &TEEN_REWRITES),
        Mode::Claro | Mode::Tecnico => simplified,
    }
}
