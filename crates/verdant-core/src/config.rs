use std::env;
use std::path::{Path, PathBuf};

/// Locations of the three backing knowledge sources.
///
/// Reads the `VERDANT_DATA_DIR` environment variable. When no directory is
/// configured the knowledge base falls back to the data bundled into the
/// crate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeConfig {
    /// Directory holding the source documents, if any.
    pub data_dir: Option<PathBuf>,
}

impl KnowledgeConfig {
    /// Environment variable naming the data directory.
    pub const DATA_DIR_ENV: &str = "VERDANT_DATA_DIR";

    pub const CURATED_FILE: &str = "plant_care_schedules.json";
    pub const PERSONALITIES_FILE: &str = "plant_personalities.json";
    pub const CATALOG_FILE: &str = "house_plants.json";

    /// Build a config from the environment. An empty variable counts as unset.
    pub fn from_env() -> Self {
        let data_dir = env::var(Self::DATA_DIR_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self { data_dir }
    }

    /// Build a config pointing at an explicit directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Config that always uses the bundled data.
    pub fn bundled() -> Self {
        Self { data_dir: None }
    }

    fn file(&self, name: &str) -> Option<PathBuf> {
        self.data_dir.as_deref().map(|dir| dir.join(name))
    }

    pub fn curated_path(&self) -> Option<PathBuf> {
        self.file(Self::CURATED_FILE)
    }

    pub fn personalities_path(&self) -> Option<PathBuf> {
        self.file(Self::PERSONALITIES_FILE)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.file(Self::CATALOG_FILE)
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }
}
