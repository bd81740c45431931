//! Core types for Lei Clara simplification results.
//!
//! Field names follow Rust conventions; the serialized keys are the
//! pt-BR wire names that both the prompt template and the local engine use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Simplification register requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plain Portuguese
    #[default]
    Claro,

    /// Very simple language, as for a teenager
    Adolescente,

    /// Keeps technical terms but explains them
    Tecnico,
}

impl Mode {
    /// All modes, in presentation order.
    pub const ALL: [Mode; 3] = [Mode::Claro, Mode::Adolescente, Mode::Tecnico];

    /// Register descriptor embedded in the remote prompt.
    pub fn register(&self) -> &'static str {
        match self {
            Mode::Claro => "português claro",
            Mode::Adolescente => "super simples, como para um adolescente",
            Mode::Tecnico => "técnico simplificado (mantém termos mas explica)",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Claro => "Claro",
            Mode::Adolescente => "Adolescente",
            Mode::Tecnico => "Técnico",
        }
    }

    /// Wire name (`claro`, `adolescente`, `tecnico`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Claro => "claro",
            Mode::Adolescente => "adolescente",
            Mode::Tecnico => "tecnico",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown mode '{0}': expected claro, adolescente or tecnico")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claro" | "plain" => Ok(Mode::Claro),
            "adolescente" | "teen" => Ok(Mode::Adolescente),
            "tecnico" | "técnico" | "technical" => Ok(Mode::Tecnico),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Risk level attached to an extracted clause.
///
/// Remote results may carry values outside the three known levels; those are
/// kept verbatim in [`AlertLevel::Unrecognized`] so the raw value survives a
/// round trip, and are treated as [`AlertLevel::Medium`] when displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertLevel {
    High,
    Medium,
    Low,
    Unrecognized(String),
}

impl AlertLevel {
    /// Level used for display: unrecognized values count as medium.
    pub fn effective(&self) -> AlertLevel {
        match self {
            AlertLevel::Unrecognized(_) => AlertLevel::Medium,
            other => other.clone(),
        }
    }

    /// Wire value (`alto`, `medio`, `baixo`, or the raw string).
    pub fn as_str(&self) -> &str {
        match self {
            AlertLevel::High => "alto",
            AlertLevel::Medium => "medio",
            AlertLevel::Low => "baixo",
            AlertLevel::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for AlertLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "alto" => AlertLevel::High,
            "medio" => AlertLevel::Medium,
            "baixo" => AlertLevel::Low,
            _ => AlertLevel::Unrecognized(value),
        }
    }
}

impl From<AlertLevel> for String {
    fn from(level: AlertLevel) -> Self {
        match level {
            AlertLevel::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A risk-bearing excerpt of the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    /// Excerpt of the source document
    #[serde(rename = "texto")]
    pub excerpt: String,

    /// What the clause means in practice
    #[serde(rename = "explicacao", default)]
    pub explanation: String,

    /// Raw alert level, if the producer supplied one
    #[serde(
        rename = "nivelAlerta",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub alert_level: Option<AlertLevel>,
}

impl Clause {
    pub fn new(
        excerpt: impl Into<String>,
        explanation: impl Into<String>,
        level: AlertLevel,
    ) -> Self {
        Self {
            excerpt: excerpt.into(),
            explanation: explanation.into(),
            alert_level: Some(level),
        }
    }

    /// Alert level used for display; missing or unrecognized means medium.
    pub fn effective_level(&self) -> AlertLevel {
        self.alert_level
            .as_ref()
            .map(AlertLevel::effective)
            .unwrap_or(AlertLevel::Medium)
    }
}

/// A technical term and its plain-language definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    #[serde(rename = "termo")]
    pub term: String,

    #[serde(rename = "definicao")]
    pub definition: String,
}

impl GlossaryEntry {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// The six-field structured output of any simplification path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultShape {
    /// Full rewritten document in the requested register
    #[serde(rename = "textoSimplificado")]
    pub simplified_text: String,

    /// Top-level points
    #[serde(rename = "resumoExecutivo")]
    pub executive_summary: Vec<String>,

    /// Extracted risk-bearing clauses
    #[serde(rename = "clausulasImportantes")]
    pub important_clauses: Vec<Clause>,

    /// Technical-term definitions
    #[serde(rename = "glossario")]
    pub glossary: Vec<GlossaryEntry>,

    /// Free-form warnings
    #[serde(rename = "pontosAtencao")]
    pub attention_points: Vec<String>,

    /// Free-form follow-up questions
    #[serde(rename = "perguntasSugeridas")]
    pub suggested_questions: Vec<String>,
}
