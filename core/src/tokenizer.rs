use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALPHA: Regex = Regex::new(r"[^A-Za-z]+").expect("valid regex");
}

/// Strip every non-ASCII-letter character and lowercase the rest. May return an empty string.
pub fn normalize(token: &str) -> String {
    NON_ALPHA.replace_all(token, "").to_ascii_lowercase()
}

/// Split text on whitespace and normalize each token, dropping tokens that normalize to nothing.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize)
        .filter(|w| !w.is_empty())
        .collect()
}
