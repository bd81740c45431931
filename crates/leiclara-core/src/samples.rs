//! Built-in sample documents for trying the engine.

/// A named sample document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub name: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

pub const SAMPLES: [Sample; 3] = [
    Sample {
        name: "aluguel",
        title: "Contrato de locação",
        text: "CONTRATO DE LOCAÇÃO\n\n\
Locador: João da Silva\n\
Locatário: Maria Souza\n\
Imóvel: Apto 101, Rua X, São Paulo\n\
Prazo: 12 meses a partir de 01/02/2025\n\
Aluguel: R$ 2.500,00 com reajuste anual pelo IPCA\n\
Multa por rescisão antecipada: 3 alugueis\n\
Responsabilidades: locatário deve pagar condomínio e água; locador cobre IPTU.\n\
Confidencialidade: não aplicável.\n",
    },
    Sample {
        name: "termo-uso",
        title: "Termo de uso de aplicativo",
        text: "TERMO DE USO - APP Exemplo\n\n\
Ao criar a conta, o usuário concorda com coleta de dados de uso e localização.\n\
Podem ser enviados e-mails promocionais.\n\
Cancelamento pode ser solicitado a qualquer momento, sem multa.\n\
Assinatura mensal renovada automaticamente. Juros por atraso: 2% ao mês.\n",
    },
    Sample {
        name: "trabalho",
        title: "Cláusula de trabalho",
        text: "CLÁUSULA DE TRABALHO\n\n\
O colaborador obriga-se a manter confidencialidade sobre informações estratégicas.\n\
Vigência do acordo: 24 meses. Em caso de rescisão sem aviso prévio, há multa.\n\
Reajuste anual conforme acordo coletivo.\n",
    },
];

/// Look up a sample by name.
pub fn find(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simplify;
    use crate::input::prepare;
    use crate::types::{AlertLevel, Mode};

    #[test]
    fn test_find_sample() {
        assert_eq!(find("aluguel").unwrap().title, "Contrato de locação");
        assert!(find("desconhecido").is_none());
    }

    #[test]
    fn test_samples_pass_input_validation() {
        for sample in SAMPLES.iter() {
            assert!(prepare(sample.text).is_ok(), "{} rejected", sample.name);
        }
    }

    #[test]
    fn test_lease_sample_flags_penalty() {
        let result = simplify(find("aluguel").unwrap().text, Mode::Claro);
        assert_eq!(
            result.important_clauses[0].alert_level,
            Some(AlertLevel::High)
        );
        assert!(result.important_clauses[0].excerpt.starts_with("Multa por rescisão"));
    }
}
