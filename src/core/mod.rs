//! # Módulo Core — Tipos Fundamentais do Domínio
//!
//! Este módulo agrupa os **tipos fundamentais** do mapa de conceitos:
//!
//! - [`Pattern`], [`Move`], [`Dynamic`] — o vocabulário fixo do framework DSRP
//! - [`AnalysisResult`] — a resposta simbólica do serviço de raciocínio
//! - [`ConceptNode`] — um conceito no mapa (principal ou derivado)
//! - [`ConceptEdge`] — uma relação entre dois conceitos, com sua dinâmica
//! - [`ConceptMap`] — o contêiner cumulativo e deduplicado
//!
//! ## Fluxo dos Dados
//!
//! ```text
//! AnalysisResult ──extract──▶ ExtractedItem* ──merge──▶ ConceptMap
//!                                                     (ConceptNode + ConceptEdge)
//! ```

/// Sub-módulo com [`Pattern`], [`Move`] e [`Dynamic`].
pub mod dsrp;

/// Sub-módulo com [`AnalysisResult`].
pub mod analysis;

/// Sub-módulo com [`ConceptNode`].
pub mod concept;

/// Sub-módulo com [`ConceptEdge`].
pub mod edge;

/// Sub-módulo com [`ConceptMap`] — contêiner central.
pub mod concept_map;

// Re-exports para conveniência — permite usar `crate::core::ConceptMap` diretamente.
pub use analysis::AnalysisResult;
pub use concept::{ConceptNode, NodeId, LABEL_MAX_LEN};
pub use concept_map::ConceptMap;
pub use dsrp::{Dynamic, Move, Pattern};
pub use edge::{ConceptEdge, EdgeId};
