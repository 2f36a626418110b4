use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalizes text for comparison: lower-case, NFD-decompose and strip
/// diacritics, drop punctuation, collapse whitespace runs, trim ends.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`. Targets the
/// Brazilian-Portuguese character set implicitly via accent stripping.
pub fn normalize(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_alphanumeric() || c == '_' {
            for lower in c.to_lowercase() {
                cleaned.push(lower);
            }
        } else if c.is_whitespace() {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Common articles and question words that carry no search signal.
const STOP_WORDS: &[&str] = &[
    "o", "a", "os", "as", "um", "uma", "uns", "umas", "de", "do", "da", "dos", "das", "no",
    "na", "nos", "nas", "em", "que", "qual", "quais", "quem", "como", "onde", "quando",
    "por", "porque", "para", "com", "sem", "sobre", "e", "ou", "eh", "ser", "sao", "foi",
    "me", "meu", "minha", "se",
];

/// Normalizes and strips stop words, returning the remaining tokens joined
/// by single spaces. Used only as a fallback search key, not for FAQ
/// matching.
pub fn extract_keyword(text: &str) -> String {
    normalize(text)
        .split_whitespace()
        .filter(|t| !STOP_WORDS.contains(t))
        .collect::<Vec<_>>()
        .join(" ")
}
