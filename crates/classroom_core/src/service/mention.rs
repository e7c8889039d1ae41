//! `@mention` extraction from notification text.
//!
//! # Invariants
//! - Pure and stateless; the same text always yields the same list.
//! - Matches are returned left to right, repeats included.

use once_cell::sync::Lazy;
use regex::Regex;

static MENTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@([a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})").expect("valid mention regex")
});

/// Returns every `@<email>` token in `text`, without the leading `@`.
///
/// A bare address (`a@x.com` with no `@` prefix) is not a mention. The
/// caller is responsible for deduplication.
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::extract_mentions;

    #[test]
    fn repeated_mentions_are_preserved() {
        assert_eq!(
            extract_mentions("Hi @a@x.com and @a@x.com"),
            vec!["a@x.com".to_string(), "a@x.com".to_string()]
        );
    }

    #[test]
    fn mentions_keep_text_order() {
        let mentions =
            extract_mentions("Hello students! @studentagnes@gmail.com @studentmiche@gmail.com");
        assert_eq!(
            mentions,
            vec![
                "studentagnes@gmail.com".to_string(),
                "studentmiche@gmail.com".to_string()
            ]
        );
    }

    #[test]
    fn bare_address_is_not_a_mention() {
        assert!(extract_mentions("mail me at someone@example.com").is_empty());
    }

    #[test]
    fn trailing_punctuation_is_not_captured() {
        assert_eq!(
            extract_mentions("Ping @first.last+tag@mail.example.org, thanks."),
            vec!["first.last+tag@mail.example.org".to_string()]
        );
    }

    #[test]
    fn single_letter_top_level_label_is_rejected() {
        assert!(extract_mentions("@a@x.c").is_empty());
    }

    #[test]
    fn text_without_mentions_yields_empty_list() {
        assert!(extract_mentions("Hello class, no mentions today").is_empty());
    }
}
