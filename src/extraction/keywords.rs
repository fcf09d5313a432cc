//! # Heurística de Palavras-Chave — Mineração de Texto Best-Effort
//!
//! ⚠️ **Isto é uma heurística**, não um parser. Divide o texto por regex,
//! remove stopwords e expressões de preenchimento ("it is", "this is"...) e
//! devolve frases-chave candidatas. Não há garantia de que os limites
//! encontrados correspondam a limites semânticos reais.
//!
//! É usada pelo [exportador de canvas](crate::canvas) para produzir rótulos
//! compactos a partir de textos longos devolvidos pelo serviço de raciocínio.
//!
//! ## Estratégia de Extração (4 etapas)
//!
//! | Prioridade | Estratégia | Exemplo |
//! |-----------|------------|---------|
//! | 1 | Texto entre aspas | `"checks and balances"` |
//! | 2 | Frases capitalizadas | `Roman Empire`, `Bill of Rights` |
//! | 3 | Bigrams de content words | `free elections` |
//! | 4 | Palavras individuais ≥ 4 chars | `government` |
//!
//! Os bigrams e palavras nunca atravessam pontuação: o texto é antes dividido
//! em segmentos por [`SEGMENT_SPLIT`]. Deduplicação case-insensitive.

use std::collections::HashSet;

use regex::Regex;

use super::summarizer::summarize;

/// Stopwords em inglês (o serviço de raciocínio responde em inglês).
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "of", "in", "on", "at", "to", "for", "from",
    "by", "with", "without", "into", "onto", "over", "under", "about", "as", "is", "are", "was",
    "were", "be", "been", "being", "it", "its", "this", "that", "these", "those", "they", "them",
    "their", "there", "which", "who", "whom", "whose", "what", "when", "where", "why", "how",
    "not", "no", "so", "such", "than", "then", "also", "can", "could", "may", "might", "must",
    "will", "would", "should", "has", "have", "had", "do", "does", "did", "each", "other",
    "some", "any", "all", "more", "most", "very", "just", "only", "own", "same", "both",
    "between", "through", "during", "before", "after", "within", "while", "because", "if",
    "thing", "things", "way", "ways", "form", "kind", "type", "based",
];

/// Expressões de preenchimento removidas do início de um texto.
///
/// Ordem importa: as mais longas primeiro.
const LEADING_FILLERS: &[&str] = &[
    "it is ", "it's ", "this is ", "that is ", "they are ", "these are ", "there are ",
    "there is ", "refers to ", "is ", "are ", "means ",
];

/// Sufixos de formas verbais (gerúndio e particípio em inglês).
const VERB_SUFFIXES: &[&str] = &["ing", "ed"];

/// Regex de segmentação: pontuação que encerra uma frase-chave.
const SEGMENT_SPLIT: &str = r"[,.;:!?()\[\]{}/|]+|\s[-–—]\s";

/// Extrator de palavras-chave com regexes compiladas uma única vez.
pub struct KeywordExtractor {
    /// Texto entre aspas retas ou curvas.
    quoted_re: Regex,
    /// Sequências de palavras capitalizadas, incluindo conectores (`of`, `and`, `the`).
    capitalized_re: Regex,
    /// Divisor de segmentos.
    segment_re: Regex,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self {
            quoted_re: Regex::new(r#"["“”]([^"“”]+)["“”]"#).expect("regex de aspas válida"),
            capitalized_re: Regex::new(
                r"\b[A-Z][a-z]{2,}(?:\s+(?:(?:of|and|the)\s+)?[A-Z][a-z]+)*\b",
            )
            .expect("regex de capitalizadas válida"),
            segment_re: Regex::new(SEGMENT_SPLIT).expect("regex de segmentação válida"),
        }
    }

    /// Extrai frases-chave candidatas em ordem de prioridade, sem duplicatas.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut keywords = Vec::new();
        let mut seen = HashSet::new();
        let mut push = |phrase: String, keywords: &mut Vec<String>| {
            let lower = phrase.to_lowercase();
            if !phrase.is_empty() && seen.insert(lower) {
                keywords.push(phrase);
            }
        };

        // ─── 1. Texto entre aspas ────────────────────────────────
        for cap in self.quoted_re.captures_iter(text) {
            if let Some(m) = cap.get(1) {
                let phrase = m.as_str().trim();
                if phrase.chars().count() > 1 {
                    push(phrase.to_string(), &mut keywords);
                }
            }
        }

        // ─── 2. Frases capitalizadas ─────────────────────────────
        for m in self.capitalized_re.find_iter(text) {
            let phrase = strip_leading_stopwords(m.as_str());
            if !phrase.is_empty() && !is_stopword(&phrase.to_lowercase()) {
                push(phrase.to_string(), &mut keywords);
            }
        }

        let segments: Vec<Vec<&str>> = self
            .segment_re
            .split(text)
            .map(|segment| {
                segment
                    .split_whitespace()
                    .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
                    .filter(|w| !w.is_empty())
                    .collect()
            })
            .collect();

        // ─── 3. Bigrams de content words ─────────────────────────
        for words in &segments {
            for pair in words.windows(2) {
                if pair.iter().all(|w| is_content_word(w, 5)) {
                    push(pair.join(" "), &mut keywords);
                }
            }
        }

        // ─── 4. Palavras individuais ≥ 4 caracteres ──────────────
        for words in &segments {
            for word in words {
                if is_content_word(word, 4) {
                    push(word.to_string(), &mut keywords);
                }
            }
        }

        keywords
    }
}

/// Remove expressões de preenchimento do início do texto.
///
/// ```text
/// "it is a form of government" → "a form of government"
/// ```
pub fn strip_filler(text: &str) -> &str {
    let mut rest = text.trim_start();
    loop {
        let filler = LEADING_FILLERS.iter().find(|f| {
            rest.get(..f.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(f))
        });
        let Some(filler) = filler else {
            return rest;
        };
        rest = rest[filler.len()..].trim_start();
    }
}

/// Rótulo conciso: remove o preenchimento e aplica o [`summarize`].
pub fn concise_label(text: &str, max_len: usize) -> String {
    summarize(strip_filler(text), max_len)
}

/// Rótulo para o canvas.
///
/// Textos curtos mantêm a cláusula inicial; textos longos colapsam nas
/// (até três) frases-chave principais.
pub fn canvas_label(extractor: &KeywordExtractor, text: &str, max_len: usize) -> String {
    let concise = concise_label(text, max_len);
    if !concise.ends_with('…') {
        return concise;
    }
    let keywords = extractor.extract(strip_filler(text));
    if keywords.is_empty() {
        return concise;
    }
    let joined = keywords.into_iter().take(3).collect::<Vec<_>>().join(" · ");
    summarize(&joined, max_len)
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Heurística simples de forma verbal; só vale para palavras com mais de 5 letras.
fn looks_like_verb(word: &str) -> bool {
    word.chars().count() > 5 && VERB_SUFFIXES.iter().any(|s| word.ends_with(s))
}

fn is_content_word(word: &str, min_len: usize) -> bool {
    let lower = word.to_lowercase();
    lower.chars().count() >= min_len && !is_stopword(&lower) && !looks_like_verb(&lower)
}

fn strip_leading_stopwords(phrase: &str) -> &str {
    let mut rest = phrase.trim();
    while let Some((head, tail)) = rest.split_once(char::is_whitespace) {
        if !is_stopword(&head.to_lowercase()) {
            break;
        }
        rest = tail.trim_start();
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_filler() {
        assert_eq!(strip_filler("it is a form of government"), "a form of government");
        assert_eq!(strip_filler("It's This is the thing"), "the thing");
        assert_eq!(strip_filler("island nation"), "island nation");
    }

    /// Com o preenchimento removido, a cláusula inicial cabe em 20 caracteres
    #[test]
    fn concise_label_uses_leading_clause() {
        assert_eq!(
            concise_label("it is a form of government, based on elections", 20),
            "a form of government"
        );
    }

    #[test]
    fn extracts_quoted_and_capitalized_phrases_first() {
        let extractor = KeywordExtractor::new();
        let keywords =
            extractor.extract("The Roman Empire relied on \"checks and balances\" for stability");
        assert_eq!(keywords[0], "checks and balances");
        assert_eq!(keywords[1], "Roman Empire");
        assert!(keywords.iter().any(|k| k == "stability"));
        assert!(!keywords.iter().any(|k| k.eq_ignore_ascii_case("the")));
    }

    /// Bigrams não atravessam pontuação e stopwords ficam de fora
    #[test]
    fn bigrams_stay_inside_segments() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("free elections, public debate");
        assert!(keywords.iter().any(|k| k == "public debate"));
        assert!(!keywords.iter().any(|k| k == "elections public"));
    }

    #[test]
    fn deduplicates_case_insensitively() {
        let extractor = KeywordExtractor::new();
        let keywords = extractor.extract("Markets shape markets");
        let count = keywords.iter().filter(|k| k.eq_ignore_ascii_case("markets")).count();
        assert_eq!(count, 1);
    }

    #[test]
    fn canvas_label_collapses_long_text() {
        let extractor = KeywordExtractor::new();
        assert_eq!(canvas_label(&extractor, "nucleus", 24), "nucleus");
        let long = "it is a mechanism through which citizens select representatives regularly";
        let label = canvas_label(&extractor, long, 24);
        assert!(label.chars().count() <= 24);
        assert!(label.contains("citizens"));
    }

    #[test]
    fn empty_text_yields_nothing() {
        let extractor = KeywordExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert_eq!(canvas_label(&extractor, "", 24), "");
    }
}
