//! # ConceptNode — Um Nó do Mapa de Conceitos
//!
//! Cada [`ConceptNode`] é um conceito descoberto por alguma análise: o
//! conceito analisado (o **nó principal**, `isMain = true`) ou um dos itens
//! extraídos do payload (identidade, parte, causa...).
//!
//! ## Campos
//!
//! | Campo | JSON | Descrição |
//! |-------|------|-----------|
//! | `id` | `id` | Identificador determinístico (ver [`crate::identity`]) |
//! | `label` | `label` | Rótulo curto para exibição (limitado a [`LABEL_MAX_LEN`]) |
//! | `full_text` | `fullText` | Texto original, sem truncamento |
//! | `pattern` | `pattern` | Padrão DSRP da análise que criou o nó |
//! | `is_main` | `isMain` | `true` para o conceito analisado |
//!
//! Um nó é **imutável** depois de criado: análises posteriores que derivam o
//! mesmo id não alteram rótulo nem texto, apenas reaproveitam o nó.

use serde::{Deserialize, Serialize};

use super::dsrp::Pattern;
use crate::extraction::summarizer::summarize;

/// Comprimento máximo (em caracteres) do rótulo de exibição.
pub const LABEL_MAX_LEN: usize = 30;

/// Alias de tipo para o identificador de um [ConceptNode].
pub type NodeId = String;

/// Nó do mapa de conceitos.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptNode {
    pub id: NodeId,
    pub label: String,
    pub full_text: String,
    pub pattern: Pattern,
    #[serde(default)]
    pub is_main: bool,
}

impl ConceptNode {
    /// Cria o nó principal de um conceito analisado.
    ///
    /// O rótulo é resumido; o texto completo preserva o label recebido.
    pub fn main(id: NodeId, concept_label: &str, pattern: Pattern) -> Self {
        Self {
            id,
            label: summarize(concept_label, LABEL_MAX_LEN),
            full_text: concept_label.trim().to_string(),
            pattern,
            is_main: true,
        }
    }

    /// Cria um nó derivado de um item extraído.
    pub fn child(id: NodeId, label: String, full_text: String, pattern: Pattern) -> Self {
        Self {
            id,
            label,
            full_text,
            pattern,
            is_main: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_node_keeps_full_text_and_bounds_label() {
        let label = "The long and winding history of parliamentary democracy";
        let node = ConceptNode::main("x".into(), label, Pattern::D);
        assert!(node.is_main);
        assert!(node.label.chars().count() <= LABEL_MAX_LEN);
        assert!(node.label.ends_with('…'));
        assert_eq!(node.full_text, label);
    }

    /// O JSON do nó usa camelCase (fullText, isMain)
    #[test]
    fn serializes_camel_case() {
        let node = ConceptNode::child("part-0-cell".into(), "nucleus".into(), "nucleus".into(), Pattern::S);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["fullText"], "nucleus");
        assert_eq!(json["isMain"], false);
        assert_eq!(json["pattern"], "S");
    }
}
