//! Text normalization for A2UI-IN.
//!
//! Normalizes free-text reports before signal extraction:
//! - Lowercase conversion
//! - Whitespace normalization
//! - Expansion of contractions
//! - Word-level correction of common field typos

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Contractions that show up in spoken reports
    static ref CONTRACTIONS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("can't", "cannot");
        m.insert("won't", "will not");
        m.insert("don't", "do not");
        m.insert("doesn't", "does not");
        m.insert("didn't", "did not");
        m.insert("isn't", "is not");
        m.insert("aren't", "are not");
        m.insert("wasn't", "was not");
        m.insert("it's", "it is");
        m.insert("that's", "that is");
        m.insert("there's", "there is");
        m
    };

    /// Typos only replaced when they are the whole word
    static ref TYPO_CORRECTIONS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("isle", "aisle");
        m.insert("ailse", "aisle");
        m.insert("asile", "aisle");
        m.insert("leakin", "leaking");
        m.insert("leeking", "leaking");
        m.insert("urgnet", "urgent");
        m.insert("critcal", "critical");
        m.insert("palet", "pallet");
        m
    };

    /// Multiple whitespace pattern
    static ref MULTI_SPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize text for signal extraction
pub fn normalize(text: &str) -> String {
    let mut result = text.trim().to_lowercase();

    for (contraction, expansion) in CONTRACTIONS.iter() {
        result = result.replace(contraction, expansion);
    }

    result = MULTI_SPACE.replace_all(&result, " ").to_string();

    result
        .split(' ')
        .map(correct_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Correct a single word, keeping any punctuation around it.
fn correct_word(word: &str) -> String {
    let core = word.trim_matches(|c: char| c.is_ascii_punctuation());
    match TYPO_CORRECTIONS.get(core) {
        Some(fixed) if !core.is_empty() => word.replacen(core, fixed, 1),
        _ => word.to_string(),
    }
}

/// Blank input carries nothing to infer from.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
