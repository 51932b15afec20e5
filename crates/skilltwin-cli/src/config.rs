use serde::{Deserialize, Serialize};
use skilltwin_matcher::catalog::{ALIASES_FILE, CATEGORIES_FILE, SKILLS_FILE};
use skilltwin_matcher::CatalogPaths;
use std::env;
use std::path::{Path, PathBuf};

/// Built-in defaults, the lowest configuration layer
const DEFAULT_CONFIG: &str = r#"
[data]
dir = "data"  # Set via SKILLTWIN_DATA_DIR env var
skills = "skills.txt"
aliases = "aliases.json"
categories = "categories.json"
roles = "roles.yaml"

[matcher]
section_phrases = ["tech stack", "features", "built with"]

[logging]
level = "info"  # trace, debug, info, warn, error
format = "text"  # or "json"
"#;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub skills: PathBuf,
    pub aliases: PathBuf,
    pub categories: PathBuf,
    pub roles: PathBuf,
}

impl DataConfig {
    /// Catalog sources, relative names resolved against `dir`
    pub fn catalog_paths(&self) -> CatalogPaths {
        CatalogPaths {
            skills: self.resolve(&self.skills),
            aliases: self.resolve(&self.aliases),
            categories: self.resolve(&self.categories),
        }
    }

    pub fn roles_path(&self) -> PathBuf {
        self.resolve(&self.roles)
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.dir.join(file)
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MatcherConfig {
    pub section_phrases: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub matcher: MatcherConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the global config path: ~/.skilltwin/skilltwin.toml
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".skilltwin").join("skilltwin.toml"))
    }

    /// Load configuration with layered approach:
    /// 1. Built-in defaults
    /// 2. Global config: ~/.skilltwin/skilltwin.toml (optional)
    /// 3. Local override: ./skilltwin.toml (optional)
    /// 4. Explicit `--config` file (required when given)
    /// 5. Environment variables (highest priority)
    pub fn load(extra: Option<&Path>) -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let mut config_builder = config::Config::builder()
            // Layer 1: Defaults
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ));

        // Layer 2: Global config
        if let Some(global_config_path) = Self::global_config_path() {
            config_builder =
                config_builder.add_source(config::File::from(global_config_path).required(false));
        }

        // Layer 3: Local workspace config
        config_builder =
            config_builder.add_source(config::File::with_name("skilltwin").required(false));

        // Layer 4: Explicit config file
        if let Some(path) = extra {
            config_builder = config_builder.add_source(config::File::from(path).required(true));
        }

        // Layer 5: Environment variables with SKILLTWIN__ prefix
        config_builder = config_builder
            .add_source(config::Environment::with_prefix("SKILLTWIN").separator("__"));

        // Convenience env var overrides (highest priority)
        if let Ok(dir) = env::var("SKILLTWIN_DATA_DIR") {
            config_builder = config_builder.set_override("data.dir", dir)?;
        }

        if let Ok(level) = env::var("SKILLTWIN_LOG_LEVEL") {
            config_builder = config_builder.set_override("logging.level", level)?;
        }

        let config = config_builder.build()?;

        let config: Self = config.try_deserialize()?;
        Ok(config)
    }
}
