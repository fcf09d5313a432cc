//! # AnalysisResult — A Resposta do Serviço de Raciocínio
//!
//! Um [`AnalysisResult`] é o resultado simbólico de aplicar um [`Move`] a um
//! conceito. Ele chega pronto do serviço externo e é **somente leitura** para
//! este núcleo.
//!
//! ```json
//! {
//!   "pattern": "S",
//!   "move": "zoom-in",
//!   "elements": { "parts": ["nucleus", "membrane"] },
//!   "reasoning": "A cell decomposes into..."
//! }
//! ```
//!
//! O campo `move` é mantido como string crua: um movimento desconhecido ainda
//! é um resultado válido (gera só o nó principal). O campo `elements` é um
//! mapeamento livre; a decodificação tipada fica em
//! [`MovePayload`](crate::extraction::payload::MovePayload).

use serde::{Deserialize, Serialize};

use super::dsrp::{Move, Pattern};

/// Resultado de uma análise DSRP sobre um conceito.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Padrão DSRP com que o resultado foi marcado.
    pub pattern: Pattern,
    /// Identificador do movimento (ex: `"is-is-not"`), como recebido.
    #[serde(rename = "move")]
    pub move_id: String,
    /// Payload livre, dependente do movimento.
    #[serde(default)]
    pub elements: serde_json::Value,
    /// Justificativa textual do serviço de raciocínio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl AnalysisResult {
    #[cfg(test)]
    pub fn new(pattern: Pattern, move_id: impl Into<String>, elements: serde_json::Value) -> Self {
        Self {
            pattern,
            move_id: move_id.into(),
            elements,
            reasoning: None,
        }
    }

    /// Movimento reconhecido, ou `None` se o identificador é desconhecido.
    pub fn move_kind(&self) -> Option<Move> {
        Move::from_id(&self.move_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// O JSON do serviço usa "move"; elements e reasoning são opcionais
    #[test]
    fn deserializes_service_json() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "pattern": "D",
            "move": "is-is-not",
            "elements": { "identity": "A system of government" }
        }))
        .unwrap();
        assert_eq!(result.move_kind(), Some(Move::IsIsNot));
        assert!(result.reasoning.is_none());

        let bare: AnalysisResult =
            serde_json::from_value(json!({ "pattern": "P", "move": "unheard-of" })).unwrap();
        assert!(bare.elements.is_null());
        assert_eq!(bare.move_kind(), None);
    }
}
