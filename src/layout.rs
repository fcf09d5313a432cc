//! # Seletor de Layout
//!
//! Decide **como** o renderizador deve dispor o grafo, a partir do movimento
//! atual, do número de nós e do modo de exibição. Puro e sem estado: o
//! chamador recalcula a cada renderização.
//!
//! ## Tabela de Decisão (avaliada em ordem)
//!
//! | # | Condição | Layout |
//! |---|----------|--------|
//! | 1 | modo `cumulative-map` e mais de 5 nós | `force` |
//! | 2 | `zoom-in`, `zoom-out` | `hierarchical-TB` |
//! | 3 | `p-circle`, `part-party` | `circular` |
//! | 4 | qualquer outro (inclusive desconhecido) | `hierarchical-LR` |
//!
//! O layout `radial` não sai da tabela: é montado por
//! [`LayoutConfig::radial()`] para o [exportador de canvas](crate::canvas).
//!
//! ## JSON
//!
//! ```json
//! { "kind": "circular", "radius": 200.0, "startAngle": -1.5707963, "angleStep": 1.5707963 }
//! ```

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Move;

/// Acima deste número de nós, o mapa cumulativo passa para `force`.
const FORCE_THRESHOLD: usize = 5;

const RANK_SEPARATION: f64 = 120.0;
const NODE_SEPARATION: f64 = 60.0;
const EDGE_SEPARATION: f64 = 20.0;
const CIRCLE_RADIUS: f64 = 200.0;
const RADIAL_LEVEL_SPACING: f64 = 180.0;
const FORCE_NODE_REPULSION: f64 = 8000.0;
const FORCE_EDGE_LENGTH: f64 = 110.0;
const FORCE_GRAVITY: f64 = 0.25;
const FORCE_OVERLAP_PADDING: f64 = 12.0;
const FORCE_ITERATIONS: u32 = 1000;

/// Modo de exibição do grafo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// Grafo de uma única análise.
    SingleAnalysis,
    /// Mapa cumulativo da sessão.
    CumulativeMap,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::SingleAnalysis => "single-analysis",
            LayoutMode::CumulativeMap => "cumulative-map",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Erro de parse de um [`LayoutMode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("modo de layout desconhecido: {0}")]
pub struct UnknownLayoutMode(pub String);

impl FromStr for LayoutMode {
    type Err = UnknownLayoutMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single-analysis" => Ok(LayoutMode::SingleAnalysis),
            "cumulative-map" => Ok(LayoutMode::CumulativeMap),
            other => Err(UnknownLayoutMode(other.to_string())),
        }
    }
}

/// Configuração de layout consumida pela biblioteca de grafos externa.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum LayoutConfig {
    /// Camadas da esquerda para a direita.
    #[serde(rename = "hierarchical-LR")]
    HierarchicalLr {
        rank_separation: f64,
        node_separation: f64,
        edge_separation: f64,
    },
    /// Camadas de cima para baixo.
    #[serde(rename = "hierarchical-TB")]
    HierarchicalTb {
        rank_separation: f64,
        node_separation: f64,
        edge_separation: f64,
    },
    /// Raio fixo, espaçamento angular uniforme.
    #[serde(rename = "circular")]
    Circular {
        radius: f64,
        start_angle: f64,
        angle_step: f64,
    },
    /// Nó principal no centro, os demais em anéis concêntricos.
    #[serde(rename = "radial")]
    Radial {
        level_spacing: f64,
        start_angle: f64,
        angle_step: f64,
    },
    /// Simulação de forças com repulsão entre nós.
    #[serde(rename = "force")]
    Force {
        node_repulsion: f64,
        ideal_edge_length: f64,
        gravity: f64,
        prevent_overlap: bool,
        overlap_padding: f64,
        iterations: u32,
    },
}

impl LayoutConfig {
    fn hierarchical_lr() -> Self {
        LayoutConfig::HierarchicalLr {
            rank_separation: RANK_SEPARATION,
            node_separation: NODE_SEPARATION,
            edge_separation: EDGE_SEPARATION,
        }
    }

    fn hierarchical_tb() -> Self {
        LayoutConfig::HierarchicalTb {
            rank_separation: RANK_SEPARATION,
            node_separation: NODE_SEPARATION,
            edge_separation: EDGE_SEPARATION,
        }
    }

    fn circular(node_count: usize) -> Self {
        LayoutConfig::Circular {
            radius: CIRCLE_RADIUS,
            start_angle: -FRAC_PI_2,
            angle_step: TAU / node_count.max(1) as f64,
        }
    }

    fn force() -> Self {
        LayoutConfig::Force {
            node_repulsion: FORCE_NODE_REPULSION,
            ideal_edge_length: FORCE_EDGE_LENGTH,
            gravity: FORCE_GRAVITY,
            prevent_overlap: true,
            overlap_padding: FORCE_OVERLAP_PADDING,
            iterations: FORCE_ITERATIONS,
        }
    }

    /// Layout radial: o nó principal fica no centro e os `ring_count` nós
    /// restantes se distribuem uniformemente no primeiro anel.
    pub fn radial(ring_count: usize) -> Self {
        LayoutConfig::Radial {
            level_spacing: RADIAL_LEVEL_SPACING,
            start_angle: -FRAC_PI_2,
            angle_step: TAU / ring_count.max(1) as f64,
        }
    }

    /// Nome do tipo, como serializado em `kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            LayoutConfig::HierarchicalLr { .. } => "hierarchical-LR",
            LayoutConfig::HierarchicalTb { .. } => "hierarchical-TB",
            LayoutConfig::Circular { .. } => "circular",
            LayoutConfig::Radial { .. } => "radial",
            LayoutConfig::Force { .. } => "force",
        }
    }
}

/// Escolhe o layout para o movimento, o número de nós e o modo.
///
/// Total: `None` (movimento desconhecido) cai no padrão `hierarchical-LR`.
pub fn select_layout(move_kind: Option<Move>, node_count: usize, mode: LayoutMode) -> LayoutConfig {
    if mode == LayoutMode::CumulativeMap && node_count > FORCE_THRESHOLD {
        return LayoutConfig::force();
    }
    match move_kind {
        Some(Move::ZoomIn | Move::ZoomOut) => LayoutConfig::hierarchical_tb(),
        Some(Move::PCircle | Move::PartParty) => LayoutConfig::circular(node_count),
        _ => LayoutConfig::hierarchical_lr(),
    }
}
