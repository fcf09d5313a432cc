//! # Exportador de Canvas
//!
//! Terceiro consumidor da tabela de regras: converte um [`ConceptMap`] em uma
//! cena de formas e setas para um quadro branco. As coordenadas já saem
//! calculadas; o cliente só desenha.
//!
//! ## Disposição
//!
//! ```text
//!            ○ anel 2 (nós sem aresta com o centro)
//!        ○ anel 1 (vizinhos do centro)
//!     ◉ centro (primeiro nó principal)
//! ```
//!
//! Cada anel usa um [`LayoutConfig::radial()`] próprio, com espaçamento
//! angular uniforme. As formas são coloridas pelo padrão DSRP e o texto vem
//! da [heurística de palavras-chave](crate::extraction::keywords).

use serde::Serialize;

use crate::core::{AnalysisResult, ConceptMap, ConceptNode};
use crate::extraction::keywords::{canvas_label, KeywordExtractor};
use crate::layout::LayoutConfig;
use crate::merger;

/// Comprimento máximo do texto de uma forma.
pub const SHAPE_TEXT_MAX_LEN: usize = 40;

const MAIN_WIDTH: f64 = 200.0;
const MAIN_HEIGHT: f64 = 90.0;
const CHILD_WIDTH: f64 = 160.0;
const CHILD_HEIGHT: f64 = 70.0;

/// Uma forma retangular centrada em `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasShape {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
    pub text: String,
    pub is_main: bool,
}

/// Seta entre duas formas; `label` é o símbolo da dinâmica (vazio no anel).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasArrow {
    pub id: String,
    pub from: String,
    pub to: String,
    pub label: &'static str,
}

/// Cena completa pronta para desenhar.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CanvasScene {
    pub shapes: Vec<CanvasShape>,
    pub arrows: Vec<CanvasArrow>,
}

impl CanvasScene {
    /// Cena de um mapa qualquer (cumulativo ou de análise única).
    pub fn from_map(map: &ConceptMap) -> Self {
        let Some(center) = map.main_nodes().next().or_else(|| map.nodes().first()) else {
            return CanvasScene::default();
        };
        let extractor = KeywordExtractor::new();

        let (inner, outer): (Vec<&ConceptNode>, Vec<&ConceptNode>) = map
            .nodes()
            .iter()
            .filter(|n| n.id != center.id)
            .partition(|n| {
                map.edges_for_node(&n.id)
                    .any(|e| e.source == center.id || e.target == center.id)
            });

        let mut shapes = Vec::with_capacity(map.node_count());
        shapes.push(shape(&extractor, center, 0.0, 0.0));
        place_ring(&extractor, &inner, 1, &mut shapes);
        place_ring(&extractor, &outer, 2, &mut shapes);

        let arrows = map
            .edges()
            .iter()
            .map(|e| CanvasArrow {
                id: e.id.clone(),
                from: e.source.clone(),
                to: e.target.clone(),
                label: e.symbol(),
            })
            .collect();

        tracing::debug!(
            shapes = shapes.len(),
            center = %center.id,
            "Canvas: cena exportada"
        );
        CanvasScene { shapes, arrows }
    }

    /// Cena de uma análise isolada.
    pub fn from_analysis(concept_label: &str, result: &AnalysisResult) -> Self {
        Self::from_map(&merger::single_analysis(concept_label, result))
    }
}

fn place_ring(
    extractor: &KeywordExtractor,
    nodes: &[&ConceptNode],
    level: usize,
    shapes: &mut Vec<CanvasShape>,
) {
    if nodes.is_empty() {
        return;
    }
    let LayoutConfig::Radial {
        level_spacing,
        start_angle,
        angle_step,
    } = LayoutConfig::radial(nodes.len())
    else {
        return;
    };
    let radius = level_spacing * level as f64;
    for (i, node) in nodes.iter().enumerate() {
        let angle = start_angle + angle_step * i as f64;
        shapes.push(shape(extractor, node, radius * angle.cos(), radius * angle.sin()));
    }
}

fn shape(extractor: &KeywordExtractor, node: &ConceptNode, x: f64, y: f64) -> CanvasShape {
    let (width, height) = if node.is_main {
        (MAIN_WIDTH, MAIN_HEIGHT)
    } else {
        (CHILD_WIDTH, CHILD_HEIGHT)
    };
    let text = if node.is_main {
        node.label.clone()
    } else {
        canvas_label(extractor, &node.full_text, SHAPE_TEXT_MAX_LEN)
    };
    CanvasShape {
        id: node.id.clone(),
        x,
        y,
        width,
        height,
        color: node.pattern.color(),
        text,
        is_main: node.is_main,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Move, Pattern};
    use serde_json::{json, Value};

    fn result(move_id: &str, elements: Value) -> AnalysisResult {
        let pattern = Move::from_id(move_id).map(|m| m.pattern()).unwrap_or(Pattern::D);
        AnalysisResult::new(pattern, move_id, elements)
    }

    fn shape_by_id<'a>(scene: &'a CanvasScene, id: &str) -> Option<&'a CanvasShape> {
        scene.shapes.iter().find(|s| s.id == id)
    }

    #[test]
    fn empty_map_gives_empty_scene() {
        assert_eq!(CanvasScene::from_map(&ConceptMap::new()), CanvasScene::default());
    }

    #[test]
    fn main_node_sits_at_the_center() {
        let scene = CanvasScene::from_analysis(
            "Democracy",
            &result("p-circle", json!({ "perspectives": ["Citizens", "Historians", "Rulers"] })),
        );
        let main = shape_by_id(&scene, "democracy").unwrap();
        assert!(main.is_main);
        assert_eq!((main.x, main.y), (0.0, 0.0));
        assert_eq!(main.text, "Democracy");
        assert_eq!(scene.shapes.len(), 4);
        assert_eq!(scene.arrows.len(), 3);
    }

    /// Os filhos ficam todos no primeiro anel, à mesma distância
    #[test]
    fn children_share_the_first_ring() {
        let scene = CanvasScene::from_analysis(
            "Cell",
            &result("zoom-in", json!({ "parts": ["nucleus", "membrane", "ribosome", "cytoplasm"] })),
        );
        let LayoutConfig::Radial { level_spacing, .. } = LayoutConfig::radial(4) else {
            panic!("esperado radial");
        };
        for s in scene.shapes.iter().filter(|s| !s.is_main) {
            let distance = (s.x * s.x + s.y * s.y).sqrt();
            assert!((distance - level_spacing).abs() < 1e-6, "{}", s.id);
        }
        // primeiro filho no topo
        let first = shape_by_id(&scene, "part-0-cell").unwrap();
        assert!(first.x.abs() < 1e-6);
        assert!(first.y < 0.0);
    }

    #[test]
    fn shapes_use_pattern_colors_and_arrows_use_symbols() {
        let scene = CanvasScene::from_analysis(
            "Flood",
            &result("waoc", json!({ "causes": ["Heavy rain"] })),
        );
        assert!(scene.shapes.iter().all(|s| s.color == Pattern::R.color()));
        assert_eq!(scene.arrows[0].label, "→");
        assert_eq!(scene.arrows[0].from, "cause-0-flood");
    }

    #[test]
    fn ring_arrows_have_no_label() {
        let scene = CanvasScene::from_analysis(
            "Team",
            &result("part-party", json!({ "parts": ["Lead", "Dev", "QA"] })),
        );
        let ring = scene.arrows.iter().filter(|a| a.label.is_empty()).count();
        assert_eq!(ring, 3);
    }

    /// Nós sem ligação direta ao centro vão para o segundo anel
    #[test]
    fn unrelated_nodes_go_to_the_outer_ring() {
        let mut map = ConceptMap::new();
        merger::merge(&mut map, "Cell", &result("zoom-in", json!({ "parts": ["nucleus"] })));
        merger::merge(&mut map, "Atom", &result("zoom-in", json!({ "parts": ["proton"] })));
        let scene = CanvasScene::from_map(&map);
        let inner = shape_by_id(&scene, "part-0-cell").unwrap();
        let outer = shape_by_id(&scene, "part-0-atom").unwrap();
        let dist = |s: &CanvasShape| (s.x * s.x + s.y * s.y).sqrt();
        assert!(dist(outer) > dist(inner));
        assert_eq!(scene.shapes.len(), map.node_count());
    }

    #[test]
    fn long_texts_are_shortened() {
        let long = "it is the process by which citizens elect representatives to govern on their behalf";
        let scene = CanvasScene::from_analysis("Vote", &result("zoom-out", json!({ "whole": long })));
        let shape = shape_by_id(&scene, "whole-vote").unwrap();
        assert!(shape.text.chars().count() <= SHAPE_TEXT_MAX_LEN);
        assert!(!shape.text.is_empty());
    }
}
