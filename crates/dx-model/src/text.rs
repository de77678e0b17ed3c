//! Text normalization shared by corpus records and dictionary search terms.
//!
//! Both sides of every comparison go through [`normalize`], so a search term
//! and a record token are only ever compared in the same canonical form:
//!
//! 1. lowercase
//! 2. drop every character that is neither alphanumeric nor whitespace
//! 3. collapse whitespace runs to single spaces
//!
//! ```
//! use dx_model::text::{normalize, tokenize};
//!
//! assert_eq!(normalize("  Acute (Heroin)  toxicity; "), "acute heroin toxicity");
//! assert_eq!(tokenize("Cocaine!"), vec!["cocaine"]);
//! ```

/// Normalizes free text into its canonical, space-separated form.
///
/// The transform is idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            pending_space = !normalized.is_empty();
            continue;
        }
        if !ch.is_alphanumeric() {
            continue;
        }
        if pending_space {
            normalized.push(' ');
            pending_space = false;
        }
        normalized.push(ch);
    }
    normalized
}

/// Normalizes and splits text into tokens.
pub fn tokenize(raw: &str) -> Vec<String> {
    normalize(raw)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of tokens in an already normalized string.
pub fn word_count(normalized: &str) -> usize {
    normalized.split(' ').filter(|token| !token.is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_symbols_and_case() {
        assert_eq!(normalize("Cocaine!"), normalize("cocaine"));
        assert_eq!(normalize("@#$%^&*_+={}[]|<>/"), "");
        assert_eq!(normalize("a(b),c;d:e"), "abcde");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("\tmixed   drug\n\ntoxicity "), "mixed drug toxicity");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn removed_symbols_do_not_split_words() {
        // Separators are deleted rather than replaced by a space.
        assert_eq!(normalize("heroin/fentanyl"), "heroinfentanyl");
        assert_eq!(tokenize("heroin / fentanyl"), vec!["heroin", "fentanyl"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ;; ").is_empty());
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(tokenize("4-ANPP 2mg"), vec!["4anpp", "2mg"]);
    }
}
