//! Terminal rendering of results and history.

use leiclara_core::{AlertLevel, History, ResultShape};
use leiclara_runtime::ResultOrigin;

/// Marker shown before a clause of the given level.
fn level_badge(level: &AlertLevel) -> &'static str {
    match level {
        AlertLevel::High => "[ALTO]",
        AlertLevel::Low => "[BAIXO]",
        _ => "[MÉDIO]",
    }
}

/// Full text report: share block, then clauses and glossary.
pub fn result_report(result: &ResultShape) -> String {
    let mut out = leiclara_core::share_text(result);

    out.push_str("\n\nCláusulas importantes:\n");
    if result.important_clauses.is_empty() {
        out.push_str("(nenhuma identificada)\n");
    }
    for clause in &result.important_clauses {
        out.push_str(&format!(
            "{} {}\n    {}\n",
            level_badge(&clause.effective_level()),
            clause.excerpt.trim(),
            clause.explanation
        ));
    }

    out.push_str("\nGlossário:\n");
    for entry in &result.glossary {
        out.push_str(&format!("• {}: {}\n", entry.term, entry.definition));
    }

    out
}

pub fn origin_line(origin: &ResultOrigin) -> String {
    match origin {
        ResultOrigin::Remote { model } => format!("Origem: IA ({})", model),
        ResultOrigin::Local => "Origem: motor local".to_string(),
        ResultOrigin::Fallback => "Origem: motor local (após falha da IA)".to_string(),
    }
}

/// One line per entry, most recent first.
pub fn history_listing(history: &History) -> String {
    if history.is_empty() {
        return "Nenhum documento no histórico.".to_string();
    }

    history
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}. {} [{}] {}",
                i + 1,
                entry.timestamp.format("%d/%m/%Y %H:%M"),
                entry.mode.label(),
                entry.excerpt()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
