// src/relevance.rs
//! Keyword relevance: counts how many configured keywords occur in an entry's text.
//!
//! Matching is plain case-insensitive substring containment. No stemming, no word
//! boundaries, and a keyword found several times still counts once.

/// Separator placed between title and summary before scoring.
pub const TEXT_SEPARATOR: &str = " ";

/// Join title and optional summary into the text that gets scored.
pub fn scoring_text(title: &str, summary: Option<&str>) -> String {
    format!("{title}{TEXT_SEPARATOR}{}", summary.unwrap_or_default())
}

/// Number of keyword entries contained in `text`.
pub fn relevance_score<S: AsRef<str>>(text: &str, keywords: &[S]) -> u32 {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| haystack.contains(&k.as_ref().to_lowercase()))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keyword_counts_once() {
        let kw = ["anp"];
        assert_eq!(relevance_score("ANP, anp e Anp", &kw), 1);
    }

    #[test]
    fn counts_each_matching_keyword() {
        let kw = ["royalties", "anp", "capex"];
        let text = scoring_text("Governo anuncia novos royalties", Some("ANP detalha leilão"));
        assert_eq!(relevance_score(&text, &kw), 2);
    }

    #[test]
    fn substring_without_word_boundary_matches() {
        // "campo" is inside "campos"
        assert_eq!(relevance_score("Bacia de Campos", &["campo"]), 1);
    }

    #[test]
    fn unicode_is_case_folded() {
        assert_eq!(relevance_score("PRÉ-SAL bate recorde", &["pré-sal"]), 1);
    }

    #[test]
    fn missing_summary_is_fine() {
        assert_eq!(scoring_text("Título", None), "Título ");
        assert_eq!(relevance_score(&scoring_text("Título", None), &["x"]), 0);
    }
}
