//! Recovery of the result object from free-form model output.

use leiclara_core::ResultShape;
use serde_json::Value as JsonValue;

use crate::remote::{RemoteError, RemoteErrorKind};

/// Slice from the first `{` to the last `}`, or the whole text when there is
/// no such pair.
pub fn extract_json_object(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => raw,
    }
}

/// Parse and validate the object embedded in `raw`.
///
/// Unparseable text is `malformed_json`; a parsed value that is not a
/// complete result is `incomplete`.
pub fn parse_result(raw: &str) -> Result<ResultShape, RemoteError> {
    let value: JsonValue = serde_json::from_str(extract_json_object(raw)).map_err(|e| {
        tracing::debug!(error = %e, "Model reply is not JSON");
        RemoteError::of(RemoteErrorKind::MalformedJson)
    })?;

    ResultShape::from_value(value).map_err(|e| {
        tracing::debug!(error = %e, "Model reply failed validation");
        RemoteError::of(RemoteErrorKind::Incomplete)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use leiclara_core::{simplify, Mode};
    use proptest::prelude::*;

    #[test]
    fn test_extract_ignores_surrounding_noise() {
        let raw = "Claro! Segue o JSON:\n```json\n{\"a\": {\"b\": 1}}\n```\nEspero ter ajudado.";
        assert_eq!(extract_json_object(raw), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_extract_without_braces_returns_whole_text() {
        assert_eq!(extract_json_object("sem objeto"), "sem objeto");
        assert_eq!(extract_json_object("} invertido {"), "} invertido {");
        assert_eq!(extract_json_object(""), "");
    }

    #[test]
    fn test_parse_result_with_noise() {
        let expected = simplify("Haverá multa de 10% em caso de atraso.", Mode::Claro);
        let raw = format!("noise {} trailing", expected.to_value());

        assert_eq!(parse_result(&raw).unwrap(), expected);
    }

    #[test]
    fn test_greedy_span_across_two_objects_is_malformed() {
        let err = parse_result("{\"a\": 1} e depois {\"b\": 2}").unwrap_err();
        assert_eq!(err.kind, RemoteErrorKind::MalformedJson);
    }

    #[test]
    fn test_parse_result_error_kinds() {
        let err = parse_result("não é json").unwrap_err();
        assert_eq!(err.kind, RemoteErrorKind::MalformedJson);
        assert_eq!(err.message, "A resposta da IA não é um JSON válido.");

        let err = parse_result(r#"{"textoSimplificado": "x"}"#).unwrap_err();
        assert_eq!(err.kind, RemoteErrorKind::Incomplete);
        assert_eq!(err.message, "Resposta incompleta da IA. Tente novamente.");
    }

    proptest! {
        #[test]
        fn prop_embedded_result_survives_chatter(
            prefix in "[^{}]{0,40}",
            suffix in "[^{}]{0,40}",
            mode_index in 0usize..3,
        ) {
            let expected = simplify("Prazo de vigência de 12 meses.", Mode::ALL[mode_index]);
            let raw = format!("{}{}{}", prefix, expected.to_value(), suffix);

            prop_assert_eq!(parse_result(&raw).unwrap(), expected);
        }
    }
}
