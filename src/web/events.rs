//! # Eventos SSE do Mapa
//!
//! Define o enum [`MapEvent`]: cada mudança no mapa cumulativo é publicada em
//! um canal broadcast e repassada ao frontend via Server-Sent Events.
//!
//! ## Ciclo de Vida
//!
//! ```text
//! POST /map/analyses → [NodeAdded* → EdgeAdded*] → AnalysisMerged
//! POST /map/clear    → Cleared
//! ```
//!
//! ## Serialização
//!
//! Usa `#[serde(tag = "type")]`, como no restante da API:
//!
//! ```json
//! { "type": "NodeAdded", "id": "part-0-cell", "label": "nucleus", "pattern": "S", "at": "..." }
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::{ConceptEdge, ConceptMap, ConceptNode, Pattern};
use crate::merger::MergeOutcome;

/// Evento emitido após uma mutação do mapa.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
pub enum MapEvent {
    /// Nó novo no mapa.
    NodeAdded {
        id: String,
        label: String,
        pattern: Pattern,
        is_main: bool,
        at: DateTime<Utc>,
    },

    /// Aresta nova no mapa; `symbol` vazio para arestas do anel.
    EdgeAdded {
        id: String,
        source: String,
        target: String,
        symbol: &'static str,
        at: DateTime<Utc>,
    },

    /// Fim de um merge, com o sumário e o tamanho atual do mapa.
    AnalysisMerged {
        main_id: String,
        move_id: String,
        new_nodes: usize,
        new_edges: usize,
        duplicates: usize,
        total_nodes: usize,
        total_edges: usize,
        at: DateTime<Utc>,
    },

    /// Mapa resetado.
    Cleared { at: DateTime<Utc> },
}

impl MapEvent {
    pub fn node_added(node: &ConceptNode) -> Self {
        MapEvent::NodeAdded {
            id: node.id.clone(),
            label: node.label.clone(),
            pattern: node.pattern,
            is_main: node.is_main,
            at: Utc::now(),
        }
    }

    pub fn edge_added(edge: &ConceptEdge) -> Self {
        MapEvent::EdgeAdded {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            symbol: edge.symbol(),
            at: Utc::now(),
        }
    }

    /// Eventos de um merge, em ordem: nós, arestas e o sumário final.
    pub fn from_merge(map: &ConceptMap, move_id: &str, outcome: &MergeOutcome) -> Vec<MapEvent> {
        let nodes = outcome
            .added_nodes
            .iter()
            .filter_map(|id| map.node(id))
            .map(MapEvent::node_added);
        let edges = outcome
            .added_edges
            .iter()
            .filter_map(|id| map.edge(id))
            .map(MapEvent::edge_added);
        let summary = MapEvent::AnalysisMerged {
            main_id: outcome.main_id.clone(),
            move_id: move_id.to_string(),
            new_nodes: outcome.added_nodes.len(),
            new_edges: outcome.added_edges.len(),
            duplicates: outcome.duplicates,
            total_nodes: map.node_count(),
            total_edges: map.edge_count(),
            at: Utc::now(),
        };
        nodes.chain(edges).chain(std::iter::once(summary)).collect()
    }

    pub fn cleared() -> Self {
        MapEvent::Cleared { at: Utc::now() }
    }
}
