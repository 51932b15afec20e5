//! `SkillTwin` Skill Matcher
//!
//! Rule-based detection of known skills in unstructured text such as
//! README files, notes or OCR transcripts.
//!
//! ## Features
//!
//! - Static vocabulary, alias table and category table loaded once at startup
//! - Single-pass scan with two-word lookahead for skills like "machine learning"
//! - Importance flagging for repeated skills and skills under key sections
//! - Confidence scores normalized by document length, bucketed into tiers
//!
//! ## Usage
//!
//! ```no_run
//! use skilltwin_matcher::{CatalogPaths, SkillCatalog, SkillMatcher};
//!
//! let catalog = SkillCatalog::load(&CatalogPaths::in_dir("data"))?;
//! let matcher = SkillMatcher::new(catalog);
//!
//! for skill in matcher.match_skills("# Tech Stack\nBuilt on Node.js and Redis") {
//!     println!("{} ({}) {:.2} {}", skill.name, skill.category, skill.confidence, skill.tier);
//! }
//! # Ok::<(), skilltwin_matcher::CatalogError>(())
//! ```

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod tokenizer;

pub use catalog::{CatalogPaths, SkillCatalog};
pub use error::CatalogError;
pub use matcher::{SkillMatcher, DEFAULT_SECTION_PHRASES};
pub use tokenizer::{Token, Tokenizer};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{CatalogError, CatalogPaths, SkillCatalog, SkillMatcher};
    pub use skilltwin_types::{Detection, Tier};
}
