//! Text normalization shared by the catalog and the matcher
//!
//! Both sides must agree on how a phrase is normalized, otherwise a
//! vocabulary entry such as `node.js` would never line up with the same
//! words in scanned text.

use regex::Regex;

use crate::error::Result;

/// A normalized word and the raw line it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercase word without punctuation
    pub text: String,
    /// Zero-based line index in the raw input
    pub line: usize,
}

/// Lowercases text, strips punctuation and splits it into words
#[derive(Debug, Clone)]
pub struct Tokenizer {
    punctuation: Regex,
}

impl Tokenizer {
    /// Compile the normalization pattern
    ///
    /// # Errors
    ///
    /// Returns [`crate::CatalogError::Pattern`] if the pattern fails to compile.
    pub fn new() -> Result<Self> {
        let punctuation = Regex::new(r"[^\w\s]+")?;
        Ok(Self { punctuation })
    }

    /// Normalize a phrase into lowercase words joined by single spaces
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        self.words(text).join(" ")
    }

    /// Split text into tokens, remembering the line of each one
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        text.lines()
            .enumerate()
            .flat_map(|(line, raw)| {
                self.words(raw)
                    .into_iter()
                    .map(move |text| Token { text, line })
            })
            .collect()
    }

    fn words(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.punctuation
            .replace_all(&lowered, " ")
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }
}
