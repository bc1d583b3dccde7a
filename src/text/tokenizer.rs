//! Word Tokenizer
//! Splits review text into lowercase alphabetic tokens.

use regex::Regex;
use std::sync::LazyLock;

/// Anything that is neither a lowercase ASCII letter nor whitespace.
static NON_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z\s]").unwrap());

/// Tokenize text into lowercase `[a-z]+` words.
///
/// Characters other than ASCII lowercase letters and whitespace are removed
/// rather than replaced, so "don't" becomes "dont".
pub fn tokenize(text: &str) -> Vec<String> {
    NON_LETTER
        .replace_all(&text.to_lowercase(), "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
