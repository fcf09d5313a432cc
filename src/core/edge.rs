//! # ConceptEdge — Uma Relação no Mapa
//!
//! Uma [`ConceptEdge`] liga dois [`ConceptNode`](super::ConceptNode)s por id e
//! carrega a [`Dynamic`] que descreve a relação (`=`, `⇔`, `✷`, `→`).
//!
//! As arestas "em anel" do movimento `part-party` (parte[i] → parte[i+1]) não
//! têm dinâmica: `dynamic` é `None` e serializa como `null`.
//!
//! ```json
//! { "id": "cell -> part-0-cell", "source": "cell", "target": "part-0-cell", "dynamic": "⇔" }
//! ```

use serde::{Deserialize, Serialize};

use super::concept::NodeId;
use super::dsrp::Dynamic;
use crate::identity;

/// Alias de tipo para o identificador de uma [ConceptEdge].
pub type EdgeId = String;

/// Aresta direcionada do mapa de conceitos.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConceptEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub dynamic: Option<Dynamic>,
}

impl ConceptEdge {
    /// Cria uma aresta com id derivado de origem e destino.
    pub fn new(source: NodeId, target: NodeId, dynamic: Option<Dynamic>) -> Self {
        Self {
            id: identity::edge_id(&source, &target),
            source,
            target,
            dynamic,
        }
    }

    /// Símbolo da dinâmica, ou string vazia para arestas de anel.
    pub fn symbol(&self) -> &'static str {
        self.dynamic.map(|d| d.symbol()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_edge_serializes_null_dynamic() {
        let edge = ConceptEdge::new("part-0-cell".into(), "part-1-cell".into(), None);
        let json = serde_json::to_value(&edge).unwrap();
        assert!(json["dynamic"].is_null());
        assert_eq!(edge.symbol(), "");
    }

    #[test]
    fn id_is_derived_from_endpoints() {
        let a = ConceptEdge::new("cell".into(), "part-0-cell".into(), Some(Dynamic::CoImplication));
        let b = ConceptEdge::new("cell".into(), "part-0-cell".into(), Some(Dynamic::CoImplication));
        assert_eq!(a.id, b.id);
        assert_eq!(a.symbol(), "⇔");
    }
}
