//! # DSRP — Vocabulário do Framework 4-8-3
//!
//! Define os três vocabulários fixos sobre os quais todo o mapa é construído:
//!
//! - [`Pattern`] — os **4 padrões** (Distinctions, Systems, Relationships, Perspectives)
//! - [`Move`] — os **8 movimentos** analíticos que o serviço de raciocínio aplica
//! - [`Dynamic`] — os **símbolos de dinâmica** anexados às arestas
//!
//! ## Tabela de Movimentos
//!
//! | Movimento | Padrão | Pergunta-guia |
//! |-----------|--------|---------------|
//! | `is-is-not` | D | O que torna isto distinto de todo o resto? |
//! | `zoom-in` | S | Quais componentes formam este conceito? |
//! | `zoom-out` | S | Que sistema maior contém isto? |
//! | `part-party` | S | Como as partes se relacionam entre si? |
//! | `rds-barbell` | R | Que relações emergem e que sistemas formam? |
//! | `p-circle` | P | Quem vê isto de forma diferente, e o que vê? |
//! | `woc` | R | O que isto CAUSA? |
//! | `waoc` | R | O que CAUSOU isto? |
//!
//! Os identificadores serializados (`"is-is-not"`, `"D"`, `"⇔"`...) são
//! exatamente os que o serviço de raciocínio e o renderizador trocam em JSON.

use serde::{Deserialize, Serialize};

/// Um dos quatro padrões cognitivos DSRP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    /// Distinctions — identidade / outro.
    D,
    /// Systems — parte / todo.
    S,
    /// Relationships — ação / reação.
    R,
    /// Perspectives — ponto / visão.
    P,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [Pattern::D, Pattern::S, Pattern::R, Pattern::P];

    /// Letra do padrão, como aparece no JSON.
    pub fn letter(&self) -> &'static str {
        match self {
            Pattern::D => "D",
            Pattern::S => "S",
            Pattern::R => "R",
            Pattern::P => "P",
        }
    }

    /// Nome em inglês do padrão (vocabulário do framework, não traduzido).
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::D => "Distinctions",
            Pattern::S => "Systems",
            Pattern::R => "Relationships",
            Pattern::P => "Perspectives",
        }
    }

    /// Par de elementos co-implicados do padrão.
    pub fn elements(&self) -> [&'static str; 2] {
        match self {
            Pattern::D => ["identity", "other"],
            Pattern::S => ["part", "whole"],
            Pattern::R => ["action", "reaction"],
            Pattern::P => ["point", "view"],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Pattern::D => "Defining what something IS and IS NOT",
            Pattern::S => "Understanding components and containers",
            Pattern::R => "Connections between things",
            Pattern::P => "Different viewpoints on the same thing",
        }
    }

    /// Cor de exibição do padrão (hex), usada pelo renderizador e pelo canvas.
    pub fn color(&self) -> &'static str {
        match self {
            Pattern::D => "#1976D2",
            Pattern::S => "#388E3C",
            Pattern::R => "#F57C00",
            Pattern::P => "#7B1FA2",
        }
    }
}

/// Um dos oito movimentos analíticos.
///
/// O serviço de raciocínio sempre devolve o movimento como string; a conversão
/// para este enum é feita por [`Move::from_id()`], que retorna `None` para
/// movimentos desconhecidos em vez de falhar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Move {
    IsIsNot,
    ZoomIn,
    ZoomOut,
    PartParty,
    RdsBarbell,
    PCircle,
    /// Web of Causality — efeitos para frente.
    Woc,
    /// Web of Anticausality — causas-raiz.
    Waoc,
}

impl Move {
    pub const ALL: [Move; 8] = [
        Move::IsIsNot,
        Move::ZoomIn,
        Move::ZoomOut,
        Move::PartParty,
        Move::RdsBarbell,
        Move::PCircle,
        Move::Woc,
        Move::Waoc,
    ];

    /// Identificador serializado (ex: `"is-is-not"`).
    pub fn id(&self) -> &'static str {
        match self {
            Move::IsIsNot => "is-is-not",
            Move::ZoomIn => "zoom-in",
            Move::ZoomOut => "zoom-out",
            Move::PartParty => "part-party",
            Move::RdsBarbell => "rds-barbell",
            Move::PCircle => "p-circle",
            Move::Woc => "woc",
            Move::Waoc => "waoc",
        }
    }

    /// Converte o identificador textual. Tolera espaços e caixa alta.
    pub fn from_id(id: &str) -> Option<Move> {
        let id = id.trim().to_ascii_lowercase();
        Move::ALL.into_iter().find(|m| m.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Move::IsIsNot => "Is/Is Not",
            Move::ZoomIn => "Zoom In",
            Move::ZoomOut => "Zoom Out",
            Move::PartParty => "Part Party",
            Move::RdsBarbell => "RDS Barbell",
            Move::PCircle => "P-Circle",
            Move::Woc => "Web of Causality",
            Move::Waoc => "Web of Anticausality",
        }
    }

    /// Padrão DSRP ao qual o movimento pertence.
    pub fn pattern(&self) -> Pattern {
        match self {
            Move::IsIsNot => Pattern::D,
            Move::ZoomIn | Move::ZoomOut | Move::PartParty => Pattern::S,
            Move::RdsBarbell | Move::Woc | Move::Waoc => Pattern::R,
            Move::PCircle => Pattern::P,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Move::IsIsNot => "Define what it IS and IS NOT",
            Move::ZoomIn => "Examine the parts",
            Move::ZoomOut => "Examine the whole",
            Move::PartParty => "Parts + relationships",
            Move::RdsBarbell => "Relate, Distinguish, Systematize",
            Move::PCircle => "Map perspectives",
            Move::Woc => "Map forward causal effects",
            Move::Waoc => "Map root causes",
        }
    }

    /// Pergunta-guia exibida ao usuário antes de rodar o movimento.
    pub fn question(&self) -> &'static str {
        match self {
            Move::IsIsNot => "What makes this distinct from everything else?",
            Move::ZoomIn => "What components make up this concept?",
            Move::ZoomOut => "What larger system contains this?",
            Move::PartParty => "How do the parts relate to each other?",
            Move::RdsBarbell => "What relationships emerge and what systems do they form?",
            Move::PCircle => "Who sees this differently and what do they see?",
            Move::Woc => "What does this cause to happen?",
            Move::Waoc => "What caused this to exist or happen?",
        }
    }
}

/// Símbolo de dinâmica anexado a uma aresta.
///
/// Serializa como o próprio símbolo (`"="`, `"⇔"`, `"✷"`, `"→"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dynamic {
    /// `=` — o padrão equivale aos seus dois elementos.
    #[serde(rename = "=")]
    Equality,
    /// `⇔` — se um elemento existe, o outro também existe.
    #[serde(rename = "⇔")]
    CoImplication,
    /// `✷` — qualquer elemento existe simultaneamente como outro.
    #[serde(rename = "✷")]
    Simultaneity,
    /// `→` — causalidade direcional (WoC / WAoC).
    #[serde(rename = "→")]
    Causality,
}

impl Dynamic {
    pub const ALL: [Dynamic; 4] = [
        Dynamic::Equality,
        Dynamic::CoImplication,
        Dynamic::Simultaneity,
        Dynamic::Causality,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Dynamic::Equality => "=",
            Dynamic::CoImplication => "⇔",
            Dynamic::Simultaneity => "✷",
            Dynamic::Causality => "→",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dynamic::Equality => "Equality",
            Dynamic::CoImplication => "Co-implication",
            Dynamic::Simultaneity => "Simultaneity",
            Dynamic::Causality => "Causality",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Dynamic::Equality => "Each pattern equals its two co-implying elements",
            Dynamic::CoImplication => "If one element exists, the other must exist",
            Dynamic::Simultaneity => {
                "Any element exists simultaneously as any of the other 7 elements"
            }
            Dynamic::Causality => "One element brings the other about",
        }
    }
}
