//! # Identidade — Ids Determinísticos para Deduplicação
//!
//! O mapa cumulativo só cresce sem duplicar porque os ids são
//! **determinísticos**: rodar a mesma extração duas vezes sobre o mesmo
//! conceito e movimento produz exatamente os mesmos ids, e a segunda
//! inserção é recusada pelo [`ConceptMap`](crate::core::ConceptMap).
//!
//! ## Esquema
//!
//! | Função | Exemplo |
//! |--------|---------|
//! | [`main_id`] | `"Liberal  Democracy"` → `"liberal-democracy"` |
//! | [`child_id`] (lista) | `part`, `2`, `"cell"` → `"part-2-cell"` |
//! | [`child_id`] (texto) | `whole`, —, `"cell"` → `"whole-cell"` |
//! | [`edge_id`] | `"cell"`, `"part-2-cell"` → `"cell -> part-2-cell"` |
//!
//! O label passa por normalização Unicode NFC antes do lowercase, para que
//! variantes compostas/decompostas do mesmo texto (`"é"` vs `"e\u{301}"`)
//! caiam no mesmo id.
//!
//! O separador de [`edge_id`] contém espaços, que [`main_id`] nunca produz:
//! ids de nós com `->` no texto não colidem entre si.

use unicode_normalization::UnicodeNormalization;

use crate::extraction::ItemRole;

/// Id usado quando o label do conceito está em branco.
pub const UNTITLED_ID: &str = "untitled";

/// Slug do conceito principal: NFC, lowercase, espaços colapsados em hífens.
pub fn main_id(concept_label: &str) -> String {
    let normalized: String = concept_label.nfc().collect::<String>().to_lowercase();
    let slug = normalized.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.is_empty() {
        return UNTITLED_ID.to_string();
    }
    slug
}

/// Id de um item extraído, composto de papel, posição opcional e id principal.
pub fn child_id(role: ItemRole, index: Option<usize>, main_id: &str) -> String {
    match index {
        Some(index) => format!("{}-{}-{}", role.as_str(), index, main_id),
        None => format!("{}-{}", role.as_str(), main_id),
    }
}

/// Id de uma aresta entre dois nós.
pub fn edge_id(source: &str, target: &str) -> String {
    format!("{source} -> {target}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_id_is_a_slug() {
        assert_eq!(main_id("Democracy"), "democracy");
        assert_eq!(main_id("  Liberal \t Democracy \n"), "liberal-democracy");
        assert_eq!(main_id("   "), UNTITLED_ID);
    }

    /// Formas compostas e decompostas geram o mesmo id
    #[test]
    fn main_id_normalizes_unicode() {
        assert_eq!(main_id("Caf\u{e9}"), main_id("Cafe\u{301}"));
    }

    #[test]
    fn child_ids_are_deterministic() {
        let main = main_id("Cell");
        assert_eq!(child_id(ItemRole::Part, Some(2), &main), "part-2-cell");
        assert_eq!(child_id(ItemRole::Whole, None, &main), "whole-cell");
        assert_eq!(
            child_id(ItemRole::Part, Some(2), &main),
            child_id(ItemRole::Part, Some(2), &main_id("cell"))
        );
        assert_ne!(
            child_id(ItemRole::Part, Some(0), &main),
            child_id(ItemRole::Reaction, Some(0), &main)
        );
    }

    #[test]
    fn edge_id_is_directional() {
        assert_eq!(edge_id("a", "b"), "a -> b");
        assert_ne!(edge_id("a", "b"), edge_id("b", "a"));
    }

    /// Labels com `->` não produzem o mesmo id de aresta
    #[test]
    fn edge_id_separator_never_collides() {
        let left = edge_id(&main_id("a->b"), &main_id("c"));
        let right = edge_id(&main_id("a"), &main_id("b->c"));
        assert_ne!(left, right);
        assert_eq!(left, "a->b -> c");

        let tricky = main_id("a -> b");
        assert!(!tricky.contains(' '));
        assert_ne!(edge_id(&tricky, "c"), edge_id("a", &main_id("b -> c")));
    }
}
