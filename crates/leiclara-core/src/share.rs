//! Plain-text rendering of a result for copy/share.

use crate::types::ResultShape;

const TITLE: &str = "Li & Entendi — Resultado";

fn section(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    lines.push(heading.to_string());
    lines.extend(items.iter().map(|item| format!("• {}", item)));
    lines.push(String::new());
}

/// Render the summary, attention points, questions and simplified text.
pub fn share_text(result: &ResultShape) -> String {
    let mut lines = vec![TITLE.to_string(), String::new()];

    section(&mut lines, "Resumo:", &result.executive_summary);
    section(&mut lines, "Pontos de atenção:", &result.attention_points);
    section(&mut lines, "Perguntas sugeridas:", &result.suggested_questions);

    lines.push("Texto simplificado:".to_string());
    lines.push(result.simplified_text.clone());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simplify;
    use crate::types::Mode;

    #[test]
    fn test_share_text_layout() {
        let result = simplify("Contrato simples.", Mode::Claro);
        let text = share_text(&result);

        assert!(text.starts_with("Li & Entendi — Resultado\n\nResumo:\n• Contrato simples.\n"));
        assert!(text.contains("Pontos de atenção:\n• Verifique multas e prazos\n"));
        assert!(text.contains("Perguntas sugeridas:\n• Qual o prazo de vigência?\n"));
        assert!(text.ends_with("Texto simplificado:\nContrato simples."));
    }

    #[test]
    fn test_empty_sections_keep_headings() {
        let mut result = simplify("", Mode::Claro);
        result.attention_points.clear();
        let text = share_text(&result);

        assert!(text.contains("Resumo:\n\nPontos de atenção:\n\nPerguntas sugeridas:"));
    }
}
