// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Text normalization and dictionary-based spelling validation.

use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use zspell::{DictBuilder, Dictionary};

/// Read-only spell dictionary shared by all requests.
///
/// Built once at startup from a hunspell affix/word-list pair; lookups are
/// safe for unbounded concurrent readers and the dictionary is never
/// mutated after construction.
pub struct Speller {
    dictionary: Dictionary,
}

impl Speller {
    /// Load `en_US.aff` and `en_US.dic` from the given directory.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let aff_path = dir.join("en_US.aff");
        let dic_path = dir.join("en_US.dic");

        let aff = fs::read_to_string(&aff_path)
            .with_context(|| format!("failed to read affix file {}", aff_path.display()))?;
        let dic = fs::read_to_string(&dic_path)
            .with_context(|| format!("failed to read word list {}", dic_path.display()))?;

        Self::from_strings(&aff, &dic)
    }

    /// Build from in-memory affix rules and word list.
    pub fn from_strings(aff: &str, dic: &str) -> Result<Self> {
        let dictionary = DictBuilder::new()
            .config_str(aff)
            .dict_str(dic)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build dictionary: {e}"))?;

        Ok(Self { dictionary })
    }

    pub fn check(&self, word: &str) -> bool {
        self.dictionary.check_word(word)
    }
}

/// Reduce text to its candidate words: every character that is not a
/// letter, digit, apostrophe, or whitespace is removed, the remainder is
/// split on whitespace and lowercased, and duplicates merge into a set.
/// Empty tokens never make it into the set.
pub fn tokenize(text: &str) -> HashSet<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Tokens the dictionary does not recognize, sorted for deterministic
/// responses.
pub fn find_misspelled(tokens: &HashSet<String>, speller: &Speller) -> BTreeSet<String> {
    tokens
        .iter()
        .filter(|token| !speller.check(token))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_AFF: &str = "SET UTF-8\n";
    const TEST_DIC: &str = "4\nhello\nworld\nlinks\nrust\n";

    fn test_speller() -> Speller {
        Speller::from_strings(TEST_AFF, TEST_DIC).expect("test dictionary should build")
    }

    #[test]
    fn test_tokenize_strips_punctuation_and_lowercases() {
        let tokens = tokenize("Hello, World! Hello again.");
        let expected: HashSet<String> = ["hello", "world", "again"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_tokenize_keeps_apostrophes_and_digits() {
        let tokens = tokenize("don't panic, it's 42");
        assert!(tokens.contains("don't"));
        assert!(tokens.contains("it's"));
        assert!(tokens.contains("42"));
    }

    #[test]
    fn test_tokenize_removes_punctuation_without_splitting() {
        // "foo-bar" loses the hyphen but stays one token
        let tokens = tokenize("foo-bar");
        assert!(tokens.contains("foobar"));
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_tokenize_excludes_empty_tokens() {
        let tokens = tokenize("  ... !!! ");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        let first = tokenize("It's a test -- truly, a TEST!");
        let rejoined = first.iter().cloned().collect::<Vec<_>>().join(" ");
        let second = tokenize(&rejoined);
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_misspelled_collects_unknown_tokens() {
        let speller = test_speller();
        let tokens = tokenize("hello wrld rust linkz");
        let misspelled = find_misspelled(&tokens, &speller);

        let expected: BTreeSet<String> =
            ["linkz", "wrld"].into_iter().map(String::from).collect();
        assert_eq!(misspelled, expected);
    }

    #[test]
    fn test_find_misspelled_empty_for_known_text() {
        let speller = test_speller();
        let tokens = tokenize("Hello world, links!");
        assert!(find_misspelled(&tokens, &speller).is_empty());
    }

    #[test]
    fn test_check_rejects_unknown_word() {
        let speller = test_speller();
        assert!(speller.check("hello"));
        assert!(!speller.check("helo"));
    }
}
