//! Tokenizer
//!
//! Raw text -> ordered, normalized tokens.
//! Pure and deterministic: same input, same output, no locale involved.

use once_cell::sync::Lazy;
use regex::Regex;

/// One run of alphabetic or numeric characters
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{Alphabetic}\p{N}]+").unwrap());

/// Lowercase `text` and split it on every non-alphanumeric character.
///
/// Empty tokens never appear in the output; empty input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
