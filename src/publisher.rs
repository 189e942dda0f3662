//! # Publisher
//!
//! Extracts the publisher name from a news headline and validates it against a
//! topic allowlist.
//!
//! - Search-engine headlines look like `"<headline> - <publisher>"`; the publisher is
//!   whatever follows the **last** `" - "`.
//! - An allowlist entry matches when it is a case-insensitive substring of the
//!   publisher (`"Folha"` accepts `"Folha de S.Paulo"`, not the other way round).

/// Separator between headline and publisher in search-engine titles.
pub const TITLE_SEPARATOR: &str = " - ";

/// Publisher used for every Bing entry. Bing entries skip allowlist validation.
pub const BING_PUBLISHER: &str = "Bing News";

/// Publisher suffix of `title`, trimmed. Empty when the title has no separator.
pub fn publisher_from_title(title: &str) -> String {
    title
        .rsplit_once(TITLE_SEPARATOR)
        .map(|(_, publisher)| publisher.trim().to_string())
        .unwrap_or_default()
}

/// True when `publisher` is non-empty and contains some allowlist entry.
pub fn is_allowed_publisher<S: AsRef<str>>(publisher: &str, allowlist: &[S]) -> bool {
    let p = publisher.trim();
    if p.is_empty() {
        return false;
    }
    let p = p.to_lowercase();
    allowlist
        .iter()
        .map(|a| a.as_ref().trim())
        .filter(|a| !a.is_empty())
        .any(|a| p.contains(&a.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_text_after_last_separator() {
        assert_eq!(
            publisher_from_title("Petrobras - Equinor fecham acordo - Valor Econômico "),
            "Valor Econômico"
        );
    }

    #[test]
    fn no_separator_means_empty() {
        assert_eq!(publisher_from_title("Petrobras-Equinor fecham acordo"), "");
    }

    #[test]
    fn allowlist_entry_must_be_inside_publisher() {
        let wl = ["Folha"];
        assert!(is_allowed_publisher("Folha de S.Paulo", &wl));
        assert!(is_allowed_publisher("FOLHA", &wl));

        // reverse containment does not count
        let wl = ["Folha de S.Paulo"];
        assert!(!is_allowed_publisher("Folha", &wl));
    }

    #[test]
    fn empty_publisher_is_never_allowed() {
        assert!(!is_allowed_publisher("", &["Reuters"]));
        assert!(!is_allowed_publisher("   ", &["Reuters"]));
    }

    #[test]
    fn blank_allowlist_entries_are_ignored() {
        assert!(!is_allowed_publisher("Random Blog", &["", "  "]));
    }
}
