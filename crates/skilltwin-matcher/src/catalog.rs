//! Skill catalog: vocabulary, alias table and category table
//!
//! The catalog is built once at startup and never mutated afterwards.
//! Vocabulary entries and aliases are indexed separately by their
//! normalized surface form, so the scan can try aliases before raw phrases
//! with a hash probe each.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::tokenizer::Tokenizer;
use skilltwin_types::DEFAULT_CATEGORY;

/// Default vocabulary file name inside a data directory
pub const SKILLS_FILE: &str = "skills.txt";
/// Default alias file name inside a data directory
pub const ALIASES_FILE: &str = "aliases.json";
/// Default category file name inside a data directory
pub const CATEGORIES_FILE: &str = "categories.json";

/// The scan looks at most two words ahead
const MAX_PHRASE_WORDS: usize = 2;

/// Locations of the three catalog sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    /// Newline-delimited vocabulary
    pub skills: PathBuf,
    /// JSON object mapping alias to canonical skill
    pub aliases: PathBuf,
    /// JSON object mapping skills to categories
    pub categories: PathBuf,
}

impl CatalogPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            skills: dir.join(SKILLS_FILE),
            aliases: dir.join(ALIASES_FILE),
            categories: dir.join(CATEGORIES_FILE),
        }
    }
}

/// One entry of the category source.
///
/// Either `"skill": "category"` or `"category": ["skill", ...]`; both shapes
/// may appear in the same file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryEntry {
    Label(String),
    Members(Vec<String>),
}

/// Raw text of one source plus a label used in errors and logs
struct Source<'a> {
    origin: String,
    text: &'a str,
}

/// Immutable lookup tables used by the matcher
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    tokenizer: Tokenizer,
    /// Canonical names, indexed by skill id
    names: Vec<String>,
    /// Category label per skill id
    categories: Vec<Option<String>>,
    /// Normalized vocabulary entry to skill id
    vocabulary: HashMap<String, usize>,
    /// Normalized alias to skill id
    aliases: HashMap<String, usize>,
}

impl SkillCatalog {
    /// Load the catalog from disk
    ///
    /// # Errors
    ///
    /// Fails if any source is missing, unreadable or malformed, or if the
    /// vocabulary ends up empty. Callers should treat this as fatal.
    pub fn load(paths: &CatalogPaths) -> Result<Self> {
        let skills = read_source(&paths.skills)?;
        let aliases = read_source(&paths.aliases)?;
        let categories = read_source(&paths.categories)?;

        let catalog = Self::build(
            Source {
                origin: paths.skills.display().to_string(),
                text: &skills,
            },
            Source {
                origin: paths.aliases.display().to_string(),
                text: &aliases,
            },
            Source {
                origin: paths.categories.display().to_string(),
                text: &categories,
            },
        )?;

        info!(
            "Loaded skill catalog: {} skills, {} aliases",
            catalog.len(),
            catalog.alias_count()
        );
        Ok(catalog)
    }

    /// Build the catalog from in-memory sources
    ///
    /// # Errors
    ///
    /// Same conditions as [`SkillCatalog::load`], minus the I/O.
    pub fn from_sources(vocabulary: &str, aliases_json: &str, categories_json: &str) -> Result<Self> {
        Self::build(
            Source {
                origin: "<inline vocabulary>".to_string(),
                text: vocabulary,
            },
            Source {
                origin: "<inline aliases>".to_string(),
                text: aliases_json,
            },
            Source {
                origin: "<inline categories>".to_string(),
                text: categories_json,
            },
        )
    }

    fn build(vocabulary: Source<'_>, aliases: Source<'_>, categories: Source<'_>) -> Result<Self> {
        let mut catalog = Self {
            tokenizer: Tokenizer::new()?,
            names: Vec::new(),
            categories: Vec::new(),
            vocabulary: HashMap::new(),
            aliases: HashMap::new(),
        };

        let by_name = catalog.add_vocabulary(&vocabulary);
        if catalog.names.is_empty() {
            return Err(CatalogError::EmptyVocabulary {
                origin: vocabulary.origin,
            });
        }

        catalog.add_aliases(&aliases, &by_name)?;
        catalog.add_categories(&categories, &by_name)?;
        Ok(catalog)
    }

    /// Index vocabulary entries, returning canonical name to id
    fn add_vocabulary(&mut self, source: &Source<'_>) -> HashMap<String, usize> {
        let mut by_name = HashMap::new();

        for line in source.text.lines() {
            let name = line.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }

            let Some(form) = self.phrase_form(&name, "skill", &source.origin) else {
                continue;
            };

            if let Some(&existing) = self.vocabulary.get(&form) {
                if self.names[existing] != name {
                    warn!(
                        "Skill '{}' in {} collides with '{}', keeping the first",
                        name, source.origin, self.names[existing]
                    );
                }
                continue;
            }

            let id = self.names.len();
            self.names.push(name.clone());
            self.categories.push(None);
            self.vocabulary.insert(form, id);
            by_name.insert(name, id);
        }

        by_name
    }

    fn add_aliases(&mut self, source: &Source<'_>, by_name: &HashMap<String, usize>) -> Result<()> {
        let aliases: BTreeMap<String, String> = parse_json(source)?;

        for (alias, target) in aliases {
            let target = target.trim().to_lowercase();
            let Some(&id) = by_name.get(&target) else {
                warn!(
                    "Alias '{}' in {} points to unknown skill '{}', skipping",
                    alias, source.origin, target
                );
                continue;
            };

            let Some(form) = self.phrase_form(&alias, "alias", &source.origin) else {
                continue;
            };

            self.aliases.insert(form, id);
        }

        Ok(())
    }

    fn add_categories(
        &mut self,
        source: &Source<'_>,
        by_name: &HashMap<String, usize>,
    ) -> Result<()> {
        let entries: BTreeMap<String, CategoryEntry> = parse_json(source)?;

        for (key, entry) in entries {
            match entry {
                CategoryEntry::Label(category) => self.assign_category(&key, &category, by_name),
                CategoryEntry::Members(skills) => {
                    for skill in &skills {
                        self.assign_category(skill, &key, by_name);
                    }
                }
            }
        }

        Ok(())
    }

    fn assign_category(&mut self, skill: &str, category: &str, by_name: &HashMap<String, usize>) {
        let skill = skill.trim().to_lowercase();
        let category = category.trim();

        match by_name.get(&skill) {
            Some(&id) if !category.is_empty() => {
                self.categories[id] = Some(category.to_string());
            }
            Some(_) => debug!("Empty category for skill '{}', ignoring", skill),
            None => debug!("Category entry for unknown skill '{}', ignoring", skill),
        }
    }

    /// Normalized form of a phrase, if the two-word scan can ever match it
    fn phrase_form(&self, phrase: &str, kind: &str, origin: &str) -> Option<String> {
        let form = self.tokenizer.normalize(phrase);
        let words = form.split(' ').filter(|w| !w.is_empty()).count();

        if words == 0 {
            warn!("Empty {} '{}' in {}, skipping", kind, phrase, origin);
            return None;
        }
        if words > MAX_PHRASE_WORDS {
            warn!(
                "{} '{}' in {} has more than {} words and can never match, skipping",
                kind, phrase, origin, MAX_PHRASE_WORDS
            );
            return None;
        }
        Some(form)
    }

    pub(crate) fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Skill id for a normalized alias
    pub(crate) fn lookup_alias(&self, form: &str) -> Option<usize> {
        self.aliases.get(form).copied()
    }

    /// Skill id for a normalized vocabulary entry
    pub(crate) fn lookup_vocabulary(&self, form: &str) -> Option<usize> {
        self.vocabulary.get(form).copied()
    }

    pub(crate) fn name(&self, id: usize) -> &str {
        &self.names[id]
    }

    pub(crate) fn category(&self, id: usize) -> &str {
        self.categories[id].as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Canonical skill name for a phrase, resolving aliases
    pub fn resolve(&self, phrase: &str) -> Option<&str> {
        let form = self.tokenizer.normalize(phrase);
        self.lookup_alias(&form)
            .or_else(|| self.lookup_vocabulary(&form))
            .map(|id| self.name(id))
    }

    /// Whether `name` is a canonical vocabulary entry
    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.names.iter().any(|n| *n == name)
    }

    /// Category of a canonical skill, `"other"` when it has none
    pub fn category_of(&self, name: &str) -> Option<&str> {
        let name = name.trim().to_lowercase();
        self.names
            .iter()
            .position(|n| *n == name)
            .map(|id| self.category(id))
    }

    /// All canonical skill names in vocabulary order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of canonical skills
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the catalog holds no skills
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of aliases that were accepted
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: for<'de> Deserialize<'de>>(source: &Source<'_>) -> Result<T> {
    serde_json::from_str(source.text).map_err(|e| CatalogError::Json {
        origin: source.origin.clone(),
        source: e,
    })
}
