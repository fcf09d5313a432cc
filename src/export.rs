//! # Exportação — O Mapa como Markdown
//!
//! Converte o [`ConceptMap`] cumulativo em um documento Markdown, um bloco
//! por conceito analisado (nó principal), com as conexões do nó listadas
//! pela dinâmica.
//!
//! ## Formatos
//!
//! | Formato | Título do conceito | Vizinho | Extra |
//! |---------|--------------------|---------|-------|
//! | `markdown` | `## Cell` | texto completo | — |
//! | `obsidian` | `## [[Cell]]` | `[[rótulo]]` + tag do padrão | linha de tags no topo |
//!
//! ```text
//! # DSRP Knowledge Export
//!
//! ## Cell
//!
//! Pattern: S (Systems)
//!
//! ### Connections
//!
//! - ⇔ nucleus (outgoing)
//! - ⇔ membrane (outgoing)
//!
//! ---
//! ```
//!
//! Arestas de anel (sem dinâmica) nunca tocam um nó principal e por isso não
//! aparecem; só as arestas do próprio conceito entram no bloco.

use std::fmt;
use std::str::FromStr;

use crate::core::{ConceptEdge, ConceptMap, ConceptNode};

const TITLE: &str = "# DSRP Knowledge Export";
const OBSIDIAN_TAGS: &str = "Tags: #dsrp #systems-thinking #knowledge-graph";

/// Caracteres que quebram um wikilink do Obsidian.
const WIKILINK_RESERVED: &[char] = &['[', ']', '|', '#', '^'];

/// Formato do documento exportado.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Markdown simples.
    Markdown,
    /// Markdown com wikilinks e tags.
    Obsidian,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "markdown",
            ExportFormat::Obsidian => "obsidian",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Erro de parse de um [`ExportFormat`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("formato de exportação desconhecido: {0}")]
pub struct UnknownExportFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "obsidian" => Ok(ExportFormat::Obsidian),
            other => Err(UnknownExportFormat(other.to_string())),
        }
    }
}

/// Renderiza o mapa inteiro no formato pedido.
pub fn render(map: &ConceptMap, format: ExportFormat) -> String {
    let mut lines = vec![TITLE.to_string(), String::new()];
    if format == ExportFormat::Obsidian {
        lines.push(OBSIDIAN_TAGS.to_string());
        lines.push(String::new());
    }

    if map.is_empty() {
        lines.push("No concepts yet.".to_string());
        lines.push(String::new());
    }
    for main in map.main_nodes() {
        concept_block(&mut lines, map, main, format);
    }

    tracing::debug!(format = %format, nodes = map.node_count(), "Mapa exportado");
    lines.join("\n")
}

fn concept_block(lines: &mut Vec<String>, map: &ConceptMap, main: &ConceptNode, format: ExportFormat) {
    let heading = match format {
        ExportFormat::Markdown => main.full_text.clone(),
        ExportFormat::Obsidian => wikilink(&main.full_text),
    };
    lines.push(format!("## {heading}"));
    lines.push(String::new());
    lines.push(format!("Pattern: {} ({})", main.pattern.letter(), main.pattern.name()));
    lines.push(String::new());
    lines.push("### Connections".to_string());
    lines.push(String::new());

    let connections: Vec<String> = map
        .edges_for_node(&main.id)
        .filter_map(|edge| connection_line(map, main, edge, format))
        .collect();
    if connections.is_empty() {
        lines.push("- No connections yet".to_string());
    } else {
        lines.extend(connections);
    }
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
}

/// `- ⇔ vizinho (outgoing)`; laços e vizinhos ausentes são ignorados.
fn connection_line(
    map: &ConceptMap,
    main: &ConceptNode,
    edge: &ConceptEdge,
    format: ExportFormat,
) -> Option<String> {
    let (neighbor_id, direction) = if edge.source == main.id {
        (&edge.target, "outgoing")
    } else {
        (&edge.source, "incoming")
    };
    if *neighbor_id == main.id {
        return None;
    }
    let neighbor = map.node(neighbor_id)?;

    let symbol = match edge.dynamic {
        Some(dynamic) => format!("{} ", dynamic.symbol()),
        None => String::new(),
    };
    let line = match format {
        ExportFormat::Markdown => format!("- {symbol}{} ({direction})", neighbor.full_text),
        ExportFormat::Obsidian => format!(
            "- {symbol}{} ({direction}) #{}",
            wikilink(&neighbor.label),
            neighbor.pattern.letter().to_lowercase()
        ),
    };
    Some(line)
}

fn wikilink(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| if WIKILINK_RESERVED.contains(&c) { ' ' } else { c })
        .collect();
    format!("[[{}]]", cleaned.split_whitespace().collect::<Vec<_>>().join(" "))
}
