//! Configuration management for the clockface host.
//!
//! This module handles loading and parsing TOML configuration files from
//! platform-specific directories. It provides:
//! - Structured configuration with sensible defaults
//! - TOML deserialization with `#[serde(default)]` for graceful partial configs
//! - `include` directives that layer extra files over the main one
//!
//! # Configuration Location
//! - Linux: `~/.config/clockface/config.toml`
//! - macOS: `~/Library/Application Support/clockface/config.toml`
//! - Windows: `%APPDATA%\clockface\config.toml`
//!
//! # Example
//! ```toml
//! include = ["slow.toml"]
//!
//! [animation]
//! duration_frames = 20
//! frames_per_second = 60
//!
//! [output]
//! only_changes = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml::value::Table;

use crate::animation::DEFAULT_DURATION_FRAMES;
use crate::error::ConfigError;

const APP_DIR: &str = "clockface";
const CONFIG_FILE: &str = "config.toml";

/// Result of loading configuration, including all source file paths for hot-reload watching.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// All resolved file paths that contributed to this config (main + includes).
    pub source_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub animation: AnimationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frames a hand transition takes from old to new position
    pub duration_frames: u32,
    /// Frame rate of the host loop
    pub frames_per_second: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Skip frames identical to the one emitted before
    pub only_changes: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            duration_frames: DEFAULT_DURATION_FRAMES,
            frames_per_second: 60,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig { only_changes: true }
    }
}

impl AnimationConfig {
    /// Transition length, rejecting zero.
    pub fn duration(&self) -> Result<NonZeroU32, ConfigError> {
        NonZeroU32::new(self.duration_frames)
            .ok_or_else(|| ConfigError::Invalid("animation.duration_frames must be > 0".into()))
    }

    /// Wall-clock length of one frame, rejecting a zero frame rate.
    pub fn frame_interval(&self) -> Result<Duration, ConfigError> {
        if self.frames_per_second == 0 {
            return Err(ConfigError::Invalid(
                "animation.frames_per_second must be > 0".into(),
            ));
        }
        Ok(Duration::from_secs(1) / self.frames_per_second)
    }
}

impl Config {
    /// Loads configuration from a TOML file, processing any `include` directives.
    ///
    /// The `include` key is an array of file paths (relative to the main config's
    /// directory or absolute) that are loaded and deep-merged on top of the main
    /// config. Later includes override earlier ones. Included files' own `include`
    /// keys are stripped (no recursive includes). Includes that cannot be read or
    /// parsed are skipped with a warning.
    ///
    /// # Errors
    /// Unreadable or malformed main file, or values that fail [`Config::validate`].
    pub fn load(path: &Path) -> Result<ConfigLoadResult, ConfigError> {
        let mut table = read_table(path)?;

        let base_dir = path.parent().unwrap_or(Path::new("."));
        let mut source_files = vec![path.to_path_buf()];

        // Extract and remove the `include` array before deserialization
        if let Some(include_val) = table.remove("include")
            && let Some(includes) = include_val.as_array()
        {
            for include in includes.iter().filter_map(|item| item.as_str()) {
                let include_path = resolve_include_path(base_dir, include);
                match read_table(&include_path) {
                    Ok(mut include_table) => {
                        include_table.remove("include");
                        deep_merge_toml(&mut table, include_table);
                        source_files.push(include_path);
                    }
                    Err(e) => tracing::warn!("skipping include: {}", e),
                }
            }
        }

        let config: Config =
            toml::Value::Table(table)
                .try_into()
                .map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
        config.validate()?;

        Ok(ConfigLoadResult {
            config,
            source_files,
        })
    }

    /// Checks values that deserialize fine but cannot drive the animation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.animation.duration()?;
        self.animation.frame_interval()?;
        Ok(())
    }

    /// Returns the platform-specific default path for the config file.
    ///
    /// Falls back to `./clockface/config.toml` if the system config directory
    /// cannot be determined.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        path
    }

    /// Loads config from `path`, falling back to defaults if unavailable.
    ///
    /// On failure the default config is returned with just `path` as its source,
    /// so the file is still watched and picked up once it appears.
    pub fn load_or_default(path: &Path) -> ConfigLoadResult {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("{}, using defaults", e);
            ConfigLoadResult {
                config: Self::default(),
                source_files: vec![path.to_path_buf()],
            }
        })
    }
}

fn read_table(path: &Path) -> Result<Table, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves an include path relative to a base directory.
///
/// If the include path is absolute, it is returned as-is.
/// If relative, it is joined to the base directory.
pub fn resolve_include_path(base_dir: &Path, include: &str) -> PathBuf {
    let path = Path::new(include);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Deep-merges an overlay TOML table into a base table.
///
/// For nested tables, merges recursively. For all other value types,
/// the overlay value replaces the base value.
pub fn deep_merge_toml(base: &mut Table, overlay: Table) {
    for (key, overlay_val) in overlay {
        match (base.get_mut(&key), overlay_val) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge_toml(base_table, overlay_table);
            }
            (_, overlay_val) => {
                base.insert(key, overlay_val);
            }
        }
    }
}
