//! Instruction prompt for the remote simplification call.
//!
//! The prompt carries the document verbatim, the register descriptor of the
//! requested mode, and a JSON template using the fixed wire keys of
//! [`ResultShape`](leiclara_core::ResultShape).

use leiclara_core::Mode;

/// Opening of every prompt.
pub const ROLE_PROMPT: &str = "Você é um especialista em simplificação de textos jurídicos brasileiros.\n\n\
TAREFA: Analise o documento abaixo e forneça uma resposta estruturada em JSON.";

/// Closing guidance appended after the template.
pub const GUIDANCE_PROMPT: &str = r#"IMPORTANTE:
- Use português brasileiro coloquial mas correto
- Identifique cláusulas abusivas ou incomuns
- Destaque prazos, valores e obrigações principais
- Seja direto e honesto sobre riscos"#;

/// JSON template the model must fill. `{register}` is replaced by the mode
/// descriptor.
const RESULT_TEMPLATE: &str = r#"{
  "textoSimplificado": "versão completa do texto em linguagem {register}",
  "resumoExecutivo": ["ponto 1", "ponto 2", "ponto 3"],
  "clausulasImportantes": [
    {
      "texto": "trecho original da cláusula",
      "explicacao": "o que isso significa na prática",
      "nivelAlerta": "alto|medio|baixo"
    }
  ],
  "glossario": [
    {
      "termo": "palavra técnica",
      "definicao": "explicação simples"
    }
  ],
  "pontosAtencao": ["atenção 1", "atenção 2"],
  "perguntasSugeridas": ["pergunta 1", "pergunta 2", "pergunta 3"]
}"#;

/// Build the full prompt for `text` in `mode`.
pub fn build_prompt(text: &str, mode: Mode) -> String {
    let register = mode.register();

    format!(
        "{ROLE_PROMPT}\n\n\
         DOCUMENTO ORIGINAL:\n{text}\n\n\
         NÍVEL DE SIMPLIFICAÇÃO: {register}\n\n\
         Responda APENAS com um JSON válido no seguinte formato:\n\n\
         {template}\n\n\
         {GUIDANCE_PROMPT}",
        template = RESULT_TEMPLATE.replace("{register}", register),
    )
}
