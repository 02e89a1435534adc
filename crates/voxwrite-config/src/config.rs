//! Configuration structs with defaults, validation, and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use voxwrite_voxel::Rgba;

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Grid bounds.
    pub grid: GridConfig,
    /// Which generator to run.
    pub pattern: Pattern,
    /// Random-walk settings.
    pub random_walk: RandomWalkConfig,
    /// Wave settings.
    pub wave: WaveConfig,
    /// Palette overrides applied after generation.
    pub palette: PaletteConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Inclusive maximum coordinate per axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub max_x: u8,
    pub max_y: u8,
    pub max_z: u8,
}

/// Procedural pattern written into the grid.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum,
)]
pub enum Pattern {
    /// Four-way mirrored random walk.
    RandomWalk,
    /// Radial cosine wave surface.
    #[default]
    Wave,
    /// A single row along the x axis.
    Line,
}

/// Random-walk settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RandomWalkConfig {
    /// Number of walk steps.
    pub steps: u32,
    /// RNG seed.
    pub seed: u64,
    /// Probability (0.0 - 1.0) of placing `accent_index` instead of `base_index`.
    pub accent_chance: f64,
    /// Color index for ordinary steps.
    pub base_index: u8,
    /// Color index for accent steps.
    pub accent_index: u8,
}

/// Wave settings. The wave is centred on the grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaveConfig {
    /// Height variation relative to the centre height.
    pub amplitude: f64,
    /// Ripple frequency in half-turns per cell of radial distance.
    pub frequency: f64,
    /// Maximum vertical distance from the surface for a cell to be filled.
    pub thickness: f64,
    /// Color index of the surface.
    pub color_index: u8,
}

/// Palette overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub overrides: Vec<PaletteOverride>,
}

/// Assigns `color` to logical palette index `index` (1..=255).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PaletteOverride {
    pub index: u8,
    pub color: Rgba,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_x: 125,
            max_y: 125,
            max_z: 125,
        }
    }
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        Self {
            steps: 12_000,
            seed: 42,
            accent_chance: 0.01,
            base_index: 1,
            accent_index: 2,
        }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.25,
            frequency: 0.1,
            thickness: 2.0,
            color_index: 2,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            overrides: vec![PaletteOverride {
                index: 2,
                color: Rgba::from_argb(0xffff_8000),
            }],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Default config directory: `<platform config dir>/voxwrite`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("voxwrite"))
}

// --- Validation ---

impl Config {
    /// Checks value ranges that the type system does not enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let walk = &self.random_walk;
        if !(0.0..=1.0).contains(&walk.accent_chance) {
            return Err(invalid(
                "random_walk.accent_chance",
                format!("{} is not a probability", walk.accent_chance),
            ));
        }
        if walk.base_index == 0 {
            return Err(invalid("random_walk.base_index", "index 0 is empty".into()));
        }
        if walk.accent_index == 0 {
            return Err(invalid("random_walk.accent_index", "index 0 is empty".into()));
        }
        if self.wave.color_index == 0 {
            return Err(invalid("wave.color_index", "index 0 is empty".into()));
        }
        if self.wave.thickness.is_nan() || self.wave.thickness < 0.0 {
            return Err(invalid(
                "wave.thickness",
                format!("{} must be non-negative", self.wave.thickness),
            ));
        }
        if let Some(bad) = self.palette.overrides.iter().find(|o| o.index == 0) {
            return Err(invalid(
                "palette.overrides",
                format!("index {} is outside 1..=255", bad.index),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    ///
    /// The loaded config is validated before it is returned.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }
}
