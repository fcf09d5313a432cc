//! # ConceptMap — O Mapa Cumulativo de Conceitos
//!
//! O [`ConceptMap`] é o contêiner de todos os nós e arestas descobertos ao
//! longo de uma sessão. É o único recurso mutável compartilhado do núcleo.
//!
//! ## Invariantes
//!
//! - ids de nós são únicos
//! - ids de arestas são únicos
//! - nenhuma aresta referencia um nó ausente
//! - a ordem de `nodes`/`edges` é a ordem de descoberta
//!
//! Todas as inserções passam por [`add_node()`](ConceptMap::add_node) e
//! [`add_edge()`](ConceptMap::add_edge), que recusam duplicatas e arestas
//! pendentes. Não existe remoção individual: o mapa só cresce, e
//! [`clear()`](ConceptMap::clear) é o único reset.
//!
//! ## Índices
//!
//! Os índices (`node_index`, `edge_index`) são `#[serde(skip)]`. A
//! desserialização passa por [`RawConceptMap`] e reinsere cada entrada pelos
//! mesmos métodos, então um JSON armazenado com duplicatas ou arestas
//! pendentes é saneado na carga em vez de violar os invariantes.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! let mut map = ConceptMap::new();
//! map.add_node(ConceptNode::main("cell".into(), "Cell", Pattern::S));
//! assert!(map.contains_node("cell"));
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::concept::ConceptNode;
use super::edge::ConceptEdge;

/// Mapa de conceitos: nós e arestas em ordem de descoberta.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "RawConceptMap")]
pub struct ConceptMap {
    nodes: Vec<ConceptNode>,
    edges: Vec<ConceptEdge>,

    /// id do nó → posição em `nodes`.
    #[serde(skip)]
    node_index: HashMap<String, usize>,

    #[serde(skip)]
    edge_index: HashSet<String>,
}

/// Forma crua do JSON, antes da validação dos invariantes.
#[derive(Deserialize)]
struct RawConceptMap {
    #[serde(default)]
    nodes: Vec<ConceptNode>,
    #[serde(default)]
    edges: Vec<ConceptEdge>,
}

impl From<RawConceptMap> for ConceptMap {
    fn from(raw: RawConceptMap) -> Self {
        let mut map = ConceptMap::new();
        let total = raw.nodes.len() + raw.edges.len();
        for node in raw.nodes {
            map.add_node(node);
        }
        for edge in raw.edges {
            map.add_edge(edge);
        }
        let kept = map.node_count() + map.edge_count();
        if kept < total {
            tracing::warn!(discarded = total - kept, "Mapa: entradas inválidas descartadas na carga");
        }
        map
    }
}

impl PartialEq for ConceptMap {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

impl ConceptMap {
    /// Cria um mapa vazio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reseta o mapa para `{ nodes: [], edges: [] }`.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_index.clear();
        self.edge_index.clear();
    }

    /// Insere um nó se o id ainda não existe.
    ///
    /// Retorna `false` (e não altera nada) para ids já presentes.
    pub fn add_node(&mut self, node: ConceptNode) -> bool {
        if self.node_index.contains_key(&node.id) {
            tracing::debug!(id = %node.id, "Mapa: nó duplicado ignorado");
            return false;
        }
        tracing::debug!(id = %node.id, label = %node.label, "Mapa: nó armazenado");
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Insere uma aresta se o id ainda não existe e ambos os extremos existem.
    pub fn add_edge(&mut self, edge: ConceptEdge) -> bool {
        if self.edge_index.contains(&edge.id) {
            tracing::debug!(id = %edge.id, "Mapa: aresta duplicada ignorada");
            return false;
        }
        if !self.contains_node(&edge.source) || !self.contains_node(&edge.target) {
            tracing::warn!(
                id = %edge.id,
                source = %edge.source,
                target = %edge.target,
                "Mapa: aresta referencia nó ausente"
            );
            return false;
        }
        tracing::debug!(id = %edge.id, dynamic = %edge.symbol(), "Mapa: aresta armazenada");
        self.edge_index.insert(edge.id.clone());
        self.edges.push(edge);
        true
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edge_index.contains(id)
    }

    /// Busca um nó por id.
    pub fn node(&self, id: &str) -> Option<&ConceptNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Busca uma aresta por id (busca linear).
    pub fn edge(&self, id: &str) -> Option<&ConceptEdge> {
        if !self.contains_edge(id) {
            return None;
        }
        self.edges.iter().find(|e| e.id == id)
    }

    /// Nós em ordem de descoberta.
    pub fn nodes(&self) -> &[ConceptNode] {
        &self.nodes
    }

    /// Arestas em ordem de descoberta.
    pub fn edges(&self) -> &[ConceptEdge] {
        &self.edges
    }

    /// Conceitos analisados (nós principais), em ordem de descoberta.
    pub fn main_nodes(&self) -> impl Iterator<Item = &ConceptNode> {
        self.nodes.iter().filter(|n| n.is_main)
    }

    /// Todas as arestas que tocam um nó (como origem ou destino).
    pub fn edges_for_node<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ConceptEdge> {
        self.edges
            .iter()
            .filter(move |e| e.source == id || e.target == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
