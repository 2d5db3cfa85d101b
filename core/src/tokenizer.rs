use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Characters trimmed from both ends of every whitespace-delimited word.
///
/// Interior occurrences are kept, so account names like `Assets:Bank` and
/// file names like `receipt.pdf` survive as single tokens.
pub const PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}'];

/// Tokenize text using NFKC normalization, lowercase, whitespace splitting and edge punctuation trimming.
pub fn tokenize(text: &str) -> Vec<String> {
    // lowercasing can leave text outside NFKC, so normalize on both sides of it
    let normalized = text.nfkc().collect::<String>().to_lowercase().nfkc().collect::<String>();
    normalized
        .split_whitespace()
        .map(|word| word.trim_matches(PUNCTUATION))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct tokens of `text`; a repeated word counts once.
pub fn unique_tokens(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}
