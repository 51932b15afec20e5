//! Skill matching engine
//!
//! A single pass over the token stream with a one-word lookahead, followed
//! by importance flagging and confidence scoring.

use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use crate::catalog::SkillCatalog;
use skilltwin_types::Detection;

/// Phrases that mark a line as the start of a key document section
pub const DEFAULT_SECTION_PHRASES: [&str; 3] = ["tech stack", "features", "built with"];

/// Tokens per unit of size normalization
const TOKENS_PER_SIZE_UNIT: f64 = 500.0;
/// Floor of the size factor, so short snippets do not saturate at once
const MIN_SIZE_FACTOR: f64 = 2.0;
const IMPORTANCE_BOOST: f64 = 2.0;
/// Occurrences at which a skill counts as important on repetition alone
const REPEAT_THRESHOLD: u32 = 2;

#[derive(Debug, Default)]
struct Hit {
    frequency: u32,
    in_section: bool,
}

/// Detects skills from a [`SkillCatalog`] in free text
///
/// The matcher holds no mutable state, so one instance can be shared
/// across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    catalog: SkillCatalog,
    section_phrases: Vec<String>,
}

impl SkillMatcher {
    /// Create a matcher using [`DEFAULT_SECTION_PHRASES`]
    pub fn new(catalog: SkillCatalog) -> Self {
        Self {
            catalog,
            section_phrases: DEFAULT_SECTION_PHRASES
                .iter()
                .map(|p| (*p).to_string())
                .collect(),
        }
    }

    /// Replace the section phrases
    #[must_use]
    pub fn with_section_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.section_phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        self
    }

    /// The catalog this matcher reads from
    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    /// Detect skills in `text`
    ///
    /// Returns one detection per distinct skill, ordered by confidence
    /// (highest first) and then by name. Empty or symbol-only input yields
    /// an empty vector.
    ///
    /// At each position the aliases are tried before the vocabulary, and the
    /// two-word phrase before the single word. When a two-word phrase
    /// matches, its second word is consumed with it. So "Next.js" or
    /// "Node.js" count once for their own skill and never also count
    /// towards `javascript` through a `js` alias. Frequencies are therefore
    /// lower than a scan that tries every position independently.
    #[must_use]
    pub fn match_skills(&self, text: &str) -> Vec<Detection> {
        let tokens = self.catalog.tokenizer().tokenize(text);
        if tokens.is_empty() {
            return Vec::new();
        }

        let first_section_line = self.first_section_line(text);
        let mut hits: HashMap<usize, Hit> = HashMap::new();
        let mut phrase = String::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];

            let pair = match tokens.get(i + 1) {
                Some(next) => {
                    phrase.clear();
                    phrase.push_str(&token.text);
                    phrase.push(' ');
                    phrase.push_str(&next.text);
                    Some(phrase.as_str())
                }
                None => None,
            };

            // Aliases before vocabulary, the pair before the single word
            let (id, width) = if let Some(id) = pair.and_then(|p| self.catalog.lookup_alias(p)) {
                (Some(id), 2)
            } else if let Some(id) = self.catalog.lookup_alias(&token.text) {
                (Some(id), 1)
            } else if let Some(id) = pair.and_then(|p| self.catalog.lookup_vocabulary(p)) {
                (Some(id), 2)
            } else {
                (self.catalog.lookup_vocabulary(&token.text), 1)
            };

            if let Some(id) = id {
                let hit = hits.entry(id).or_default();
                hit.frequency += 1;
                hit.in_section |= first_section_line.is_some_and(|start| token.line >= start);
            }

            i += width;
        }

        let size_factor = (tokens.len() as f64 / TOKENS_PER_SIZE_UNIT).max(MIN_SIZE_FACTOR);

        let mut detections: Vec<Detection> = hits
            .into_iter()
            .map(|(id, hit)| {
                let important = hit.frequency >= REPEAT_THRESHOLD || hit.in_section;
                let boost = if important { IMPORTANCE_BOOST } else { 1.0 };
                let confidence = (f64::from(hit.frequency) * boost / size_factor).min(1.0);
                Detection::new(
                    self.catalog.name(id),
                    self.catalog.category(id),
                    confidence,
                    important,
                )
            })
            .collect();

        detections.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        debug!(
            tokens = tokens.len(),
            detected = detections.len(),
            "Matched skills"
        );
        detections
    }

    /// Index of the first section line, if any
    ///
    /// Every mention on or after this line is boosted, whatever follows.
    /// The boost is not scoped to the section: after a title such as
    /// `# My Todo App` the whole rest of the document counts.
    fn first_section_line(&self, text: &str) -> Option<usize> {
        text.lines().position(|line| self.is_section_line(line))
    }

    /// Any heading (`#`) or a line containing a section phrase
    fn is_section_line(&self, line: &str) -> bool {
        let line = line.trim_start().to_lowercase();
        line.starts_with('#')
            || self
                .section_phrases
                .iter()
                .any(|phrase| line.contains(phrase.as_str()))
    }
}
