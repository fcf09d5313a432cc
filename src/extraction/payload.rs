//! # MovePayload — O Payload Tipado de Cada Movimento
//!
//! O serviço de raciocínio devolve `elements` como um mapeamento livre. Este
//! módulo decodifica esse mapeamento em um **tagged union** com uma variante
//! por movimento, cada uma carregando apenas os campos que a regra de
//! extração espera.
//!
//! ## Tolerância a Formatos
//!
//! A decodificação **nunca falha**:
//!
//! | Situação | Resultado |
//! |----------|-----------|
//! | Movimento desconhecido | [`MovePayload::Unrecognized`] |
//! | Campo ausente ou de tipo errado | campo vazio (`None` / lista vazia) |
//! | Item de lista em branco | item ignorado |
//! | Mais de [`MAX_LIST_ITEMS`] itens | truncado, na ordem do payload |
//!
//! [`MovePayload::from_result_uncapped()`] decodifica sem o limite; é a
//! forma usada para listar conceitos relacionados.
//!
//! Itens de lista podem ser texto puro ou objetos com um sub-campo designado
//! (`point`, `effect`, `cause`...). Sem o sub-campo, o item inteiro é
//! serializado como texto JSON.

use serde_json::Value;

use crate::core::{AnalysisResult, Move};

/// Máximo de itens aproveitados de um campo de lista.
pub const MAX_LIST_ITEMS: usize = 4;

/// Um item de lista já normalizado.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEntry {
    /// Texto de onde sai o rótulo (o sub-campo designado).
    pub label_source: String,
    /// Texto completo para a vista de detalhe.
    pub full_text: String,
}

impl ListEntry {
    fn plain(text: &str) -> Self {
        Self {
            label_source: text.to_string(),
            full_text: text.to_string(),
        }
    }
}

/// Payload tipado, uma variante por movimento.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MovePayload {
    IsIsNot {
        identity: Option<String>,
        other: Option<String>,
    },
    ZoomIn {
        parts: Vec<ListEntry>,
    },
    ZoomOut {
        whole: Option<String>,
    },
    PartParty {
        parts: Vec<ListEntry>,
    },
    RdsBarbell {
        reactions: Vec<ListEntry>,
    },
    PCircle {
        perspectives: Vec<ListEntry>,
    },
    Woc {
        effects: Vec<ListEntry>,
    },
    Waoc {
        causes: Vec<ListEntry>,
    },
    /// Movimento sem regra de extração.
    Unrecognized {
        move_id: String,
    },
}

impl MovePayload {
    /// Decodifica o `elements` de um resultado conforme o seu movimento.
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self::decode(result, MAX_LIST_ITEMS)
    }

    /// Como [`from_result()`](Self::from_result), mas sem truncar as listas.
    pub fn from_result_uncapped(result: &AnalysisResult) -> Self {
        Self::decode(result, usize::MAX)
    }

    /// Textos de origem dos rótulos, em ordem, sem resumo.
    pub fn label_sources(&self) -> Vec<&str> {
        fn entries(list: &[ListEntry]) -> Vec<&str> {
            list.iter().map(|e| e.label_source.as_str()).collect()
        }
        match self {
            MovePayload::IsIsNot { identity, other } => {
                identity.iter().chain(other).map(String::as_str).collect()
            }
            MovePayload::ZoomOut { whole } => whole.iter().map(String::as_str).collect(),
            MovePayload::ZoomIn { parts } | MovePayload::PartParty { parts } => entries(parts),
            MovePayload::RdsBarbell { reactions } => entries(reactions),
            MovePayload::PCircle { perspectives } => entries(perspectives),
            MovePayload::Woc { effects } => entries(effects),
            MovePayload::Waoc { causes } => entries(causes),
            MovePayload::Unrecognized { .. } => Vec::new(),
        }
    }

    fn decode(result: &AnalysisResult, limit: usize) -> Self {
        let Some(kind) = result.move_kind() else {
            tracing::debug!(move_id = %result.move_id, "Payload: movimento desconhecido");
            return MovePayload::Unrecognized {
                move_id: result.move_id.clone(),
            };
        };
        let elements = &result.elements;
        match kind {
            Move::IsIsNot => MovePayload::IsIsNot {
                identity: text_field(elements, "identity"),
                other: text_field(elements, "other"),
            },
            Move::ZoomIn => MovePayload::ZoomIn {
                parts: list_field(elements, "parts", ItemShape::simple("part"), limit),
            },
            Move::ZoomOut => MovePayload::ZoomOut {
                whole: text_field(elements, "whole"),
            },
            Move::PartParty => MovePayload::PartParty {
                parts: list_field(elements, "parts", ItemShape::simple("part"), limit),
            },
            Move::RdsBarbell => MovePayload::RdsBarbell {
                reactions: list_field(elements, "reactions", ItemShape::simple("reaction"), limit),
            },
            Move::PCircle => MovePayload::PCircle {
                perspectives: list_field(elements, "perspectives", ItemShape::detailed("point", "view"), limit),
            },
            Move::Woc => MovePayload::Woc {
                effects: list_field(elements, "effects", ItemShape::detailed("effect", "description"), limit),
            },
            Move::Waoc => MovePayload::Waoc {
                causes: list_field(elements, "causes", ItemShape::detailed("cause", "description"), limit),
            },
        }
    }
}

/// Formato esperado de um item-objeto dentro de uma lista.
struct ItemShape {
    /// Sub-campo que dá o rótulo.
    label_key: &'static str,
    /// Sub-campo opcional anexado ao texto completo (`"rótulo: detalhe"`).
    detail_key: Option<&'static str>,
}

impl ItemShape {
    fn simple(label_key: &'static str) -> Self {
        Self {
            label_key,
            detail_key: None,
        }
    }

    fn detailed(label_key: &'static str, detail_key: &'static str) -> Self {
        Self {
            label_key,
            detail_key: Some(detail_key),
        }
    }
}

/// Campo de texto não vazio; qualquer outro formato vira `None`.
fn text_field(elements: &Value, key: &str) -> Option<String> {
    let text = elements.get(key)?.as_str()?.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.to_string())
}

/// Campo de lista, limitado a `limit` entradas não vazias.
fn list_field(elements: &Value, key: &str, shape: ItemShape, limit: usize) -> Vec<ListEntry> {
    let Some(items) = elements.get(key).and_then(Value::as_array) else {
        if elements.get(key).is_some() {
            tracing::debug!(field = key, "Payload: campo de lista com formato inválido");
        }
        return Vec::new();
    };
    let entries: Vec<ListEntry> = items.iter().filter_map(|item| entry(item, &shape)).collect();
    if entries.len() > limit {
        tracing::debug!(
            field = key,
            dropped = entries.len() - limit,
            "Payload: lista truncada"
        );
    }
    entries.into_iter().take(limit).collect()
}

fn entry(item: &Value, shape: &ItemShape) -> Option<ListEntry> {
    match item {
        Value::Null => None,
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| ListEntry::plain(text))
        }
        Value::Object(fields) => {
            let label = fields
                .get(shape.label_key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty());
            let Some(label) = label else {
                return Some(ListEntry::plain(&item.to_string()));
            };
            let detail = shape
                .detail_key
                .and_then(|k| fields.get(k))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty());
            let full_text = match detail {
                Some(detail) => format!("{label}: {detail}"),
                None => label.to_string(),
            };
            Some(ListEntry {
                label_source: label.to_string(),
                full_text,
            })
        }
        other => Some(ListEntry::plain(&other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pattern;
    use serde_json::json;

    fn result(move_id: &str, elements: Value) -> AnalysisResult {
        AnalysisResult::new(Pattern::S, move_id, elements)
    }

    #[test]
    fn decodes_text_fields() {
        let payload = MovePayload::from_result(&result(
            "is-is-not",
            json!({ "identity": " A system of government ", "other": "" }),
        ));
        assert_eq!(
            payload,
            MovePayload::IsIsNot {
                identity: Some("A system of government".into()),
                other: None,
            }
        );
    }

    /// Tipos errados viram campos vazios, sem erro
    #[test]
    fn wrong_shapes_become_empty() {
        let payload = MovePayload::from_result(&result("zoom-in", json!({ "parts": "nucleus" })));
        assert_eq!(payload, MovePayload::ZoomIn { parts: vec![] });

        let payload = MovePayload::from_result(&result("zoom-out", json!({ "whole": ["a", "b"] })));
        assert_eq!(payload, MovePayload::ZoomOut { whole: None });

        let payload = MovePayload::from_result(&result("woc", json!("not an object")));
        assert_eq!(payload, MovePayload::Woc { effects: vec![] });
    }

    #[test]
    fn unknown_move_is_unrecognized() {
        let payload = MovePayload::from_result(&result("teleport", json!({ "parts": ["a"] })));
        assert_eq!(
            payload,
            MovePayload::Unrecognized {
                move_id: "teleport".into()
            }
        );
    }

    #[test]
    fn caps_lists_after_skipping_blanks() {
        let payload = MovePayload::from_result(&result(
            "rds-barbell",
            json!({ "reactions": ["", null, "a", "b", "c", "d", "e"] }),
        ));
        let MovePayload::RdsBarbell { reactions } = payload else {
            panic!("variante inesperada");
        };
        let labels: Vec<&str> = reactions.iter().map(|r| r.label_source.as_str()).collect();
        assert_eq!(labels, ["a", "b", "c", "d"]);
    }

    /// Objetos usam o sub-campo designado; sem ele, o item inteiro é texto JSON
    #[test]
    fn accepts_object_items() {
        let payload = MovePayload::from_result(&result(
            "p-circle",
            json!({ "perspectives": [
                { "point": "Citizens", "view": "A voice in government" },
                "Historians",
                { "view": "orphan view" }
            ]}),
        ));
        let MovePayload::PCircle { perspectives } = payload else {
            panic!("variante inesperada");
        };
        assert_eq!(perspectives[0].label_source, "Citizens");
        assert_eq!(perspectives[0].full_text, "Citizens: A voice in government");
        assert_eq!(perspectives[1].full_text, "Historians");
        assert_eq!(perspectives[2].label_source, r#"{"view":"orphan view"}"#);
    }

    #[test]
    fn uncapped_decoding_keeps_every_entry() {
        let parts: Vec<String> = (0..7).map(|i| format!("part {i}")).collect();
        let r = result("zoom-in", json!({ "parts": parts }));
        let capped = MovePayload::from_result(&r);
        let uncapped = MovePayload::from_result_uncapped(&r);
        assert_eq!(capped.label_sources().len(), MAX_LIST_ITEMS);
        assert_eq!(uncapped.label_sources().len(), 7);
    }

    /// Perspectivas contribuem o `point`, não o texto completo
    #[test]
    fn label_sources_use_designated_field() {
        let payload = MovePayload::from_result(&result(
            "p-circle",
            json!({ "perspectives": [{ "point": "Citizens", "view": "A voice in government" }] }),
        ));
        assert_eq!(payload.label_sources(), vec!["Citizens"]);

        let payload = MovePayload::from_result(&result(
            "is-is-not",
            json!({ "identity": "A system of government", "other": "Autocracy" }),
        ));
        assert_eq!(payload.label_sources(), vec!["A system of government", "Autocracy"]);
    }

    #[test]
    fn causal_items_carry_description() {
        let payload = MovePayload::from_result(&result(
            "waoc",
            json!({ "causes": [{ "cause": "Drought", "level": 1, "description": "Crops failed" }, 42] }),
        ));
        let MovePayload::Waoc { causes } = payload else {
            panic!("variante inesperada");
        };
        assert_eq!(causes[0].label_source, "Drought");
        assert_eq!(causes[0].full_text, "Drought: Crops failed");
        assert_eq!(causes[1].full_text, "42");
    }
}
