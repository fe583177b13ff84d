use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

// Two or more word characters, unicode-aware.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("static token pattern"));

/// NFC-normalise and lowercase.
pub fn fold(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// Folded tokens in order of appearance, duplicates kept.
pub fn tokens(s: &str) -> Vec<String> {
    let folded = fold(s);
    TOKEN_RE
        .find_iter(&folded)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn term_set<T: AsRef<str>>(xs: impl IntoIterator<Item = T>) -> BTreeSet<String> {
    xs.into_iter()
        .flat_map(|s| tokens(s.as_ref()))
        .collect()
}
