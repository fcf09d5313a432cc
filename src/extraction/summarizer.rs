//! # Sumarizador de Rótulos
//!
//! Transforma um texto livre em um **rótulo curto** para exibição no grafo.
//!
//! ## Algoritmo
//!
//! 1. Remove espaços e delimitadores no início do texto
//! 2. Pega a **cláusula inicial**, até o primeiro `,` `.` `:` `;` ou traço
//! 3. Se a cláusula cabe em `max_len` caracteres → retorna a cláusula
//! 4. Senão → primeiros `max_len − 1` caracteres do texto + `…`
//!
//! ```text
//! summarize("nucleus, the control center", 20)          → "nucleus"
//! summarize("it is a form of government, based on", 20) → "it is a form of gov…"
//! ```
//!
//! A função é pura, total e **idempotente**: aplicar duas vezes dá o mesmo
//! resultado que aplicar uma. Comprimentos são contados em `char`s.

/// Delimitadores que encerram a cláusula inicial.
const CLAUSE_DELIMITERS: &[char] = &[',', '.', ':', ';', '-', '–', '—'];

const ELLIPSIS: char = '…';

/// Resume `text` em no máximo `max_len` caracteres.
pub fn summarize(text: &str, max_len: usize) -> String {
    let text = text.trim_start_matches(|c: char| c.is_whitespace() || CLAUSE_DELIMITERS.contains(&c));
    let text = text.trim_end();
    if text.is_empty() || max_len == 0 {
        return String::new();
    }

    let clause = match text.find(CLAUSE_DELIMITERS) {
        Some(end) => &text[..end],
        None => text,
    }
    .trim();

    if clause.chars().count() <= max_len {
        return clause.to_string();
    }

    let mut label: String = text.chars().take(max_len - 1).collect();
    label.push(ELLIPSIS);
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_leading_clause_when_it_fits() {
        assert_eq!(summarize("nucleus, the control center", 20), "nucleus");
        assert_eq!(summarize("Autocracy; rule by one", 20), "Autocracy");
        assert_eq!(summarize("  membrane  ", 20), "membrane");
    }

    #[test]
    fn truncates_with_ellipsis() {
        let label = summarize("it is a form of government, based on elections", 20);
        assert_eq!(label, "it is a form of gov…");
        assert_eq!(label.chars().count(), 20);
    }

    #[test]
    fn empty_input_and_zero_length() {
        assert_eq!(summarize("", 20), "");
        assert_eq!(summarize("   ", 20), "");
        assert_eq!(summarize("anything", 0), "");
    }

    /// Traços e marcadores no início não produzem rótulos vazios
    #[test]
    fn skips_leading_delimiters() {
        assert_eq!(summarize("- bullet item", 20), "bullet item");
        assert_eq!(summarize("well-known fact", 20), "well");
    }

    /// Contagem por caracteres, não por bytes
    #[test]
    fn counts_characters_not_bytes() {
        let label = summarize("ação coordenação cooperação", 10);
        assert_eq!(label.chars().count(), 10);
        assert!(label.ends_with('…'));
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "it is a form of government, based on elections",
            "A system of government",
            "short",
            "  leading spaces that go on and on without any break at all",
            "- dash first, then text",
            "exactly twenty chars",
            "ação coordenação cooperação",
            "",
        ];
        for text in samples {
            for n in [1, 5, 10, 20, 30] {
                let once = summarize(text, n);
                assert!(once.chars().count() <= n, "{text:?} / {n}");
                assert_eq!(summarize(&once, n), once, "{text:?} / {n}");
            }
        }
    }
}
