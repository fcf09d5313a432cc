//! # Merger — Incorporando Análises ao Mapa
//!
//! O [`merge()`] é o ponto onde uma análise concluída vira estrutura no
//! [`ConceptMap`]. É a mesma rotina para o mapa cumulativo e para a vista de
//! análise única ([`single_analysis()`]).
//!
//! ## O Ciclo de Incorporação
//!
//! ```text
//! (conceito, AnalysisResult)
//!   │
//!   ├── 1. main_id(conceito)         → nó principal (se ausente)
//!   ├── 2. extract(conceito, result) → itens candidatos
//!   ├── 3. child_id(item)            → nó derivado (se ausente)
//!   ├── 4. aresta item ↔ principal    (se ausente, orientada pela direção)
//!   └── 5. anel part-party            (se ausente)
//! ```
//!
//! Como todos os ids são determinísticos, repetir o merge com o mesmo
//! resultado não altera o mapa: as inserções repetidas são recusadas e só
//! contadas em [`MergeOutcome::duplicates`].
//!
//! ## Concorrência
//!
//! O merge recebe `&mut ConceptMap`: o empréstimo exclusivo é a disciplina de
//! escritor único. No servidor o mapa fica atrás de um `parking_lot::Mutex` e
//! o lock é mantido durante todo o merge.

use serde::Serialize;

use crate::core::{AnalysisResult, ConceptEdge, ConceptMap, ConceptNode, EdgeId, NodeId};
use crate::extraction::{self, Direction};
use crate::identity;

/// Resumo do que um merge acrescentou ao mapa.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOutcome {
    /// Id do nó principal (novo ou já existente).
    pub main_id: NodeId,
    /// Nós inseridos por este merge, em ordem.
    pub added_nodes: Vec<NodeId>,
    /// Arestas inseridas por este merge, em ordem.
    pub added_edges: Vec<EdgeId>,
    /// Inserções recusadas por já existirem.
    pub duplicates: usize,
}

impl MergeOutcome {
    /// `true` quando o merge não alterou o mapa.
    pub fn is_noop(&self) -> bool {
        self.added_nodes.is_empty() && self.added_edges.is_empty()
    }

    fn node(&mut self, map: &mut ConceptMap, node: ConceptNode) {
        let id = node.id.clone();
        if map.add_node(node) {
            self.added_nodes.push(id);
        } else {
            self.duplicates += 1;
        }
    }

    fn edge(&mut self, map: &mut ConceptMap, edge: ConceptEdge) {
        let id = edge.id.clone();
        if map.add_edge(edge) {
            self.added_edges.push(id);
        } else {
            self.duplicates += 1;
        }
    }
}

/// Incorpora uma análise de `concept_label` ao mapa.
pub fn merge(map: &mut ConceptMap, concept_label: &str, result: &AnalysisResult) -> MergeOutcome {
    let main_id = identity::main_id(concept_label);
    let mut outcome = MergeOutcome {
        main_id: main_id.clone(),
        ..MergeOutcome::default()
    };

    outcome.node(map, ConceptNode::main(main_id.clone(), concept_label, result.pattern));

    let items = extraction::extract(concept_label, result);
    let child_ids: Vec<NodeId> = items
        .iter()
        .map(|item| identity::child_id(item.role, item.index, &main_id))
        .collect();

    for (item, child_id) in items.iter().zip(&child_ids) {
        outcome.node(
            map,
            ConceptNode::child(child_id.clone(), item.label.clone(), item.text.clone(), item.pattern),
        );
        let (source, target) = match item.direction {
            Direction::FromMain => (main_id.clone(), child_id.clone()),
            Direction::ToMain => (child_id.clone(), main_id.clone()),
        };
        outcome.edge(map, ConceptEdge::new(source, target, Some(item.dynamic)));
    }

    for (from, to) in extraction::part_ring(result, &items) {
        outcome.edge(
            map,
            ConceptEdge::new(child_ids[from].clone(), child_ids[to].clone(), None),
        );
    }

    tracing::debug!(
        main = %main_id,
        move_id = %result.move_id,
        nodes = outcome.added_nodes.len(),
        edges = outcome.added_edges.len(),
        duplicates = outcome.duplicates,
        "Merge: análise incorporada"
    );
    outcome
}

/// Grafo de uma análise isolada: um mapa novo com apenas esse resultado.
pub fn single_analysis(concept_label: &str, result: &AnalysisResult) -> ConceptMap {
    let mut map = ConceptMap::new();
    merge(&mut map, concept_label, result);
    map
}
