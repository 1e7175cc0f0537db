//! Configuration file management for verdant.
//!
//! Provides a TOML-based config file at `~/.config/verdant/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use verdant_core::{EngineConfig, Hemisphere, KnowledgeConfig};

/// Env var overriding the configured hemisphere.
pub const HEMISPHERE_ENV: &str = "VERDANT_HEMISPHERE";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub schedule: ScheduleSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DataSection {
    /// Directory holding the three knowledge documents. Unset means the
    /// bundled data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleSection {
    #[serde(default)]
    pub hemisphere: Hemisphere,
    #[serde(default = "default_grace_days")]
    pub fertilizing_grace_days: u32,
    #[serde(default = "default_max_care_tips")]
    pub max_care_tips: usize,
}

fn default_grace_days() -> u32 {
    EngineConfig::DEFAULT_FERTILIZING_GRACE_DAYS
}

fn default_max_care_tips() -> usize {
    EngineConfig::DEFAULT_MAX_CARE_TIPS
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            hemisphere: Hemisphere::default(),
            fertilizing_grace_days: default_grace_days(),
            max_care_tips: default_max_care_tips(),
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the verdant config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/verdant` or `~/.config/verdant`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("verdant");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("verdant")
}

/// Return the path to the verdant config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct VerdantConfig {
    pub knowledge: KnowledgeConfig,
    pub engine: EngineConfig,
}

impl VerdantConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Data dir: `cli_data_dir` > `VERDANT_DATA_DIR` env > `data.dir` > bundled data
    /// - Hemisphere: `cli_hemisphere` > `VERDANT_HEMISPHERE` env > `schedule.hemisphere` > northern
    ///
    /// A missing config file is fine; a config file that exists but does not
    /// parse is an error.
    pub fn resolve(cli_data_dir: Option<&str>, cli_hemisphere: Option<Hemisphere>) -> Result<Self> {
        let file_config = if config_path().exists() {
            load_config()?
        } else {
            ConfigFile::default()
        };

        let knowledge = if let Some(dir) = cli_data_dir {
            KnowledgeConfig::new(dir)
        } else {
            let from_env = KnowledgeConfig::from_env();
            if from_env.data_dir().is_some() {
                from_env
            } else {
                match file_config.data.dir.as_deref().map(str::trim) {
                    Some(dir) if !dir.is_empty() => KnowledgeConfig::new(dir),
                    _ => KnowledgeConfig::bundled(),
                }
            }
        };

        let hemisphere = if let Some(hemisphere) = cli_hemisphere {
            hemisphere
        } else {
            match std::env::var(HEMISPHERE_ENV) {
                Ok(value) if !value.trim().is_empty() => value
                    .parse()
                    .with_context(|| format!("{HEMISPHERE_ENV} env var is invalid"))?,
                _ => file_config.schedule.hemisphere,
            }
        };

        let engine = EngineConfig::default()
            .hemisphere(hemisphere)
            .fertilizing_grace_days(file_config.schedule.fertilizing_grace_days)
            .max_care_tips(file_config.schedule.max_care_tips);

        debug!(
            data_dir = ?knowledge.data_dir(),
            %hemisphere,
            "configuration resolved"
        );
        Ok(Self { knowledge, engine })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
