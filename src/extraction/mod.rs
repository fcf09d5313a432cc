//! # Tabela de Regras de Extração
//!
//! Converte um [`AnalysisResult`] em uma lista de [`ExtractedItem`]s: os
//! conceitos candidatos que a análise revelou e a forma como cada um se liga
//! ao conceito principal.
//!
//! ## Pipeline
//!
//! ```text
//! AnalysisResult
//!   │
//!   ├── 1. MovePayload::from_result()   (payload tipado, tolerante)
//!   ├── 2. regra do movimento           (papel, dinâmica, direção)
//!   └── 3. summarize(texto, 30)         (rótulo de exibição)
//!        ↓
//! Vec<ExtractedItem>
//! ```
//!
//! ## Tabela de Regras
//!
//! | Movimento | Campo | Papel | Dinâmica | Direção |
//! |-----------|-------|-------|----------|---------|
//! | `is-is-not` | `identity` / `other` | identity / other | `=` / `⇔` | identity→main, main→other |
//! | `zoom-in` | `parts` | part | `⇔` | main→part |
//! | `zoom-out` | `whole` | whole | `⇔` | whole→main |
//! | `part-party` | `parts` | part | `=` (+ anel sem dinâmica) | main→part |
//! | `rds-barbell` | `reactions` | reaction | `⇔` | main→reaction |
//! | `p-circle` | `perspectives` | perspective | `✷` | perspective→main |
//! | `woc` | `effects` | effect | `→` | main→effect |
//! | `waoc` | `causes` | cause | `→` | cause→main |
//!
//! Esta é a **única** implementação da tabela: a vista de análise única, o
//! mapa cumulativo e o exportador de canvas chamam todos [`extract()`].
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`payload`] | Decodificação tipada de `elements` |
//! | [`summarizer`] | Rótulos curtos |
//! | [`keywords`] | Heurística de palavras-chave (canvas) |

pub mod keywords;
pub mod payload;
pub mod summarizer;

use std::collections::HashSet;

use serde::Serialize;

use crate::core::{AnalysisResult, Dynamic, Pattern, LABEL_MAX_LEN};
use payload::{ListEntry, MovePayload};
use summarizer::summarize;

/// Máximo de conceitos relacionados devolvidos por [`related_concepts()`].
const MAX_RELATED: usize = 10;

/// Papel de um item extraído em relação ao conceito principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemRole {
    Identity,
    Other,
    Part,
    Whole,
    Reaction,
    Perspective,
    Effect,
    Cause,
}

impl ItemRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemRole::Identity => "identity",
            ItemRole::Other => "other",
            ItemRole::Part => "part",
            ItemRole::Whole => "whole",
            ItemRole::Reaction => "reaction",
            ItemRole::Perspective => "perspective",
            ItemRole::Effect => "effect",
            ItemRole::Cause => "cause",
        }
    }
}

/// Sentido da aresta entre o item e o conceito principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// main → item
    FromMain,
    /// item → main
    ToMain,
}

/// Um conceito candidato extraído de uma análise. Transiente.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExtractedItem {
    pub role: ItemRole,
    /// Posição na lista de origem; `None` para campos de texto único.
    pub index: Option<usize>,
    /// Rótulo de exibição (resumido).
    pub label: String,
    /// Texto completo, sem truncamento.
    pub text: String,
    pub pattern: Pattern,
    pub dynamic: Dynamic,
    pub direction: Direction,
}

/// Aplica a regra do movimento de `result` e devolve os itens extraídos.
///
/// Total: movimento desconhecido ou payload malformado resultam em lista
/// vazia. Itens cujo texto é o próprio conceito principal são ignorados.
pub fn extract(main_label: &str, result: &AnalysisResult) -> Vec<ExtractedItem> {
    let rule = Rule {
        main: main_label.trim().to_lowercase(),
        pattern: result.pattern,
    };
    let mut items = Vec::new();

    match MovePayload::from_result(result) {
        MovePayload::IsIsNot { identity, other } => {
            rule.single(&mut items, ItemRole::Identity, identity, Dynamic::Equality, Direction::ToMain);
            rule.single(&mut items, ItemRole::Other, other, Dynamic::CoImplication, Direction::FromMain);
        }
        MovePayload::ZoomIn { parts } => {
            rule.list(&mut items, ItemRole::Part, parts, Dynamic::CoImplication, Direction::FromMain);
        }
        MovePayload::ZoomOut { whole } => {
            rule.single(&mut items, ItemRole::Whole, whole, Dynamic::CoImplication, Direction::ToMain);
        }
        MovePayload::PartParty { parts } => {
            rule.list(&mut items, ItemRole::Part, parts, Dynamic::Equality, Direction::FromMain);
        }
        MovePayload::RdsBarbell { reactions } => {
            rule.list(&mut items, ItemRole::Reaction, reactions, Dynamic::CoImplication, Direction::FromMain);
        }
        MovePayload::PCircle { perspectives } => {
            rule.list(&mut items, ItemRole::Perspective, perspectives, Dynamic::Simultaneity, Direction::ToMain);
        }
        MovePayload::Woc { effects } => {
            rule.list(&mut items, ItemRole::Effect, effects, Dynamic::Causality, Direction::FromMain);
        }
        MovePayload::Waoc { causes } => {
            rule.list(&mut items, ItemRole::Cause, causes, Dynamic::Causality, Direction::ToMain);
        }
        MovePayload::Unrecognized { .. } => {}
    }

    items
}

/// Arestas em anel do `part-party`: pares `(i, i+1 mod n)` sobre `items`.
///
/// Só existe anel para `part-party` e com pelo menos duas partes; um anel de
/// uma parte só seria um laço, e não é produzido.
pub fn part_ring(result: &AnalysisResult, items: &[ExtractedItem]) -> Vec<(usize, usize)> {
    if result.move_kind() != Some(crate::core::Move::PartParty) {
        return Vec::new();
    }
    let parts: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.role == ItemRole::Part)
        .map(|(i, _)| i)
        .collect();
    let n = parts.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n).map(|i| (parts[i], parts[(i + 1) % n])).collect()
}

/// Conceitos relacionados: textos de origem distintos, sem resumo e sem o
/// limite de 4 itens por lista, no máximo [`MAX_RELATED`].
///
/// A deduplicação ignora caixa; vence a primeira grafia.
pub fn related_concepts(main_label: &str, result: &AnalysisResult) -> Vec<String> {
    let main = main_label.trim().to_lowercase();
    let mut seen = HashSet::new();
    MovePayload::from_result_uncapped(result)
        .label_sources()
        .into_iter()
        .map(str::trim)
        .filter(|text| {
            let key = text.to_lowercase();
            key != main && seen.insert(key)
        })
        .map(String::from)
        .take(MAX_RELATED)
        .collect()
}

/// Contexto de uma extração: conceito principal e padrão do resultado.
struct Rule {
    /// Label principal normalizado (trim + lowercase), para descartar auto-referências.
    main: String,
    pattern: Pattern,
}

impl Rule {
    fn single(
        &self,
        items: &mut Vec<ExtractedItem>,
        role: ItemRole,
        text: Option<String>,
        dynamic: Dynamic,
        direction: Direction,
    ) {
        if let Some(text) = text {
            if let Some(item) = self.item(role, None, &text, &text, dynamic, direction) {
                items.push(item);
            }
        }
    }

    fn list(
        &self,
        items: &mut Vec<ExtractedItem>,
        role: ItemRole,
        entries: Vec<ListEntry>,
        dynamic: Dynamic,
        direction: Direction,
    ) {
        for (index, entry) in entries.iter().enumerate() {
            if let Some(item) = self.item(
                role,
                Some(index),
                &entry.label_source,
                &entry.full_text,
                dynamic,
                direction,
            ) {
                items.push(item);
            }
        }
    }

    fn item(
        &self,
        role: ItemRole,
        index: Option<usize>,
        label_source: &str,
        full_text: &str,
        dynamic: Dynamic,
        direction: Direction,
    ) -> Option<ExtractedItem> {
        if label_source.trim().to_lowercase() == self.main {
            tracing::debug!(role = role.as_str(), "Extração: auto-referência ignorada");
            return None;
        }
        Some(ExtractedItem {
            role,
            index,
            label: summarize(label_source, LABEL_MAX_LEN),
            text: full_text.to_string(),
            pattern: self.pattern,
            dynamic,
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;
    use serde_json::{json, Value};

    fn result(move_id: &str, elements: Value) -> AnalysisResult {
        let pattern = Move::from_id(move_id).map(|m| m.pattern()).unwrap_or(Pattern::D);
        AnalysisResult::new(pattern, move_id, elements)
    }

    /// Payload de exemplo com 5 itens em todos os campos de lista
    fn full_payload() -> Value {
        let five = json!(["alpha", "beta", "gamma", "delta", "epsilon"]);
        json!({
            "identity": "identity text",
            "other": "other text",
            "whole": "whole text",
            "parts": five,
            "reactions": five,
            "perspectives": five,
            "effects": five,
            "causes": five,
        })
    }

    #[test]
    fn is_is_not_yields_identity_and_other() {
        let items = extract(
            "Democracy",
            &result(
                "is-is-not",
                json!({ "identity": "A system of government", "other": "Autocracy" }),
            ),
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].role, ItemRole::Identity);
        assert_eq!(items[0].dynamic, Dynamic::Equality);
        assert_eq!(items[0].direction, Direction::ToMain);
        assert_eq!(items[1].role, ItemRole::Other);
        assert_eq!(items[1].dynamic, Dynamic::CoImplication);
        assert_eq!(items[1].direction, Direction::FromMain);
    }

    #[test]
    fn zoom_in_caps_parts_at_four() {
        let items = extract(
            "Cell",
            &result(
                "zoom-in",
                json!({ "parts": ["nucleus", "membrane", "cytoplasm", "ribosome", "mitochondria"] }),
            ),
        );
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i.text != "mitochondria"));
        assert!(items.iter().all(|i| i.dynamic == Dynamic::CoImplication));
        assert_eq!(items[3].index, Some(3));
    }

    /// Nenhum movimento produz mais de 4 itens
    #[test]
    fn every_move_respects_the_cap() {
        for m in Move::ALL {
            let items = extract("Topic", &result(m.id(), full_payload()));
            assert!(items.len() <= 4, "{}", m.id());
            assert!(!items.is_empty(), "{}", m.id());
        }
    }

    #[test]
    fn rule_table_dynamics_and_directions() {
        let cases = [
            (Move::ZoomOut, ItemRole::Whole, Dynamic::CoImplication, Direction::ToMain),
            (Move::PartParty, ItemRole::Part, Dynamic::Equality, Direction::FromMain),
            (Move::RdsBarbell, ItemRole::Reaction, Dynamic::CoImplication, Direction::FromMain),
            (Move::PCircle, ItemRole::Perspective, Dynamic::Simultaneity, Direction::ToMain),
            (Move::Woc, ItemRole::Effect, Dynamic::Causality, Direction::FromMain),
            (Move::Waoc, ItemRole::Cause, Dynamic::Causality, Direction::ToMain),
        ];
        for (m, role, dynamic, direction) in cases {
            let items = extract("Topic", &result(m.id(), full_payload()));
            for item in items {
                assert_eq!(item.role, role, "{}", m.id());
                assert_eq!(item.dynamic, dynamic, "{}", m.id());
                assert_eq!(item.direction, direction, "{}", m.id());
            }
        }
    }

    #[test]
    fn unknown_move_and_malformed_payload_yield_nothing() {
        assert!(extract("X", &result("teleport", full_payload())).is_empty());
        assert!(extract("X", &result("zoom-in", json!({ "parts": 7 }))).is_empty());
        assert!(extract("X", &result("is-is-not", Value::Null)).is_empty());
    }

    #[test]
    fn labels_are_summarized_and_text_is_verbatim() {
        let long = "a deliberately long effect description that will not fit";
        let items = extract("X", &result("woc", json!({ "effects": [long] })));
        assert!(items[0].label.chars().count() <= LABEL_MAX_LEN);
        assert_eq!(items[0].text, long);
    }

    #[test]
    fn skips_self_references() {
        let items = extract("Cell", &result("zoom-out", json!({ "whole": "cell" })));
        assert!(items.is_empty());
    }

    /// O anel do part-party é cíclico e tem no máximo 4 arestas
    #[test]
    fn part_ring_wraps_cyclically() {
        let r = result("part-party", full_payload());
        let items = extract("Topic", &r);
        let ring = part_ring(&r, &items);
        assert_eq!(ring, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);

        let single = result("part-party", json!({ "parts": ["only"] }));
        assert!(part_ring(&single, &extract("Topic", &single)).is_empty());

        let zoom = result("zoom-in", full_payload());
        assert!(part_ring(&zoom, &extract("Topic", &zoom)).is_empty());
    }

    #[test]
    fn related_concepts_are_distinct() {
        let r = result("zoom-in", json!({ "parts": ["Nucleus", "nucleus", "membrane", "cell"] }));
        assert_eq!(related_concepts("Cell", &r), vec!["Nucleus", "membrane"]);
    }

    /// Texto longo com vírgula volta inteiro, sem o resumo do rótulo
    #[test]
    fn related_concepts_keep_full_text() {
        let long = "the nucleus, which controls the cell and stores its genetic material";
        let r = result("zoom-in", json!({ "parts": [long, "a membrane"] }));
        assert_eq!(related_concepts("Cell", &r), vec![long, "a membrane"]);
    }

    /// O limite é 10, não o limite de 4 itens da extração
    #[test]
    fn related_concepts_cap_at_ten() {
        let parts: Vec<String> = (0..12).map(|i| format!("part {i}")).collect();
        let related = related_concepts("Topic", &result("part-party", json!({ "parts": parts })));
        assert_eq!(related.len(), MAX_RELATED);
        assert_eq!(related[9], "part 9");
    }

    #[test]
    fn related_concepts_use_perspective_points() {
        let r = result(
            "p-circle",
            json!({ "perspectives": [{ "point": "Citizens", "view": "A voice in government" }] }),
        );
        assert_eq!(related_concepts("Democracy", &r), vec!["Citizens"]);
    }
}
