#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level parameter lookup backed by an optional configuration table.
//!
//! Level `n` uses the `n`-th configured entry when one exists; every other
//! level is derived from [`scaled_params`].

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use maze_chase_core::{HunterBehaviour, LevelParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const MAX_WALL_DENSITY: f64 = 0.6;
const MAX_HUNTERS: u32 = 10;

/// Failures encountered while loading a level table.
#[derive(Debug, Error)]
pub enum LevelConfigError {
    /// The file could not be read.
    #[error("failed to read level configuration {}", path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not a valid TOML level table.
    #[error("invalid TOML level configuration {}", path.display())]
    Toml {
        /// File that was parsed.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: toml::de::Error,
    },
    /// The file is not a valid JSON level table.
    #[error("invalid JSON level configuration {}", path.display())]
    Json {
        /// File that was parsed.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: serde_json::Error,
    },
}

/// Ordered table of hand-tuned level definitions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    #[serde(default)]
    levels: Vec<LevelParams>,
}

impl LevelCatalog {
    /// Creates a catalog from explicit level definitions, first level first.
    #[must_use]
    pub fn new(levels: Vec<LevelParams>) -> Self {
        Self { levels }
    }

    /// Parses a catalog from TOML containing `[[levels]]` tables.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Parses a catalog from JSON shaped as `{"levels": [...]}`.
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Loads a catalog from disk, reading JSON for `.json` files and TOML otherwise.
    pub fn load(path: &Path) -> Result<Self, LevelConfigError> {
        let content = fs::read_to_string(path).map_err(|source| LevelConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content).map_err(|source| LevelConfigError::Json {
                path: path.to_path_buf(),
                source,
            })
        } else {
            Self::from_toml_str(&content).map_err(|source| LevelConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Loads a catalog, degrading to an empty one when the file is unusable.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(error) => {
                warn!(%error, "using built-in level scaling only");
                Self::default()
            }
        }
    }

    /// Configured level definitions, first level first.
    #[must_use]
    pub fn levels(&self) -> &[LevelParams] {
        &self.levels
    }

    /// Number of configured levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Reports whether no levels are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Parameters for the provided level number; level `0` is treated as level `1`.
    #[must_use]
    pub fn params(&self, level_number: u32) -> LevelParams {
        let level_number = level_number.max(1);
        usize::try_from(level_number - 1)
            .ok()
            .and_then(|index| self.levels.get(index))
            .cloned()
            .unwrap_or_else(|| scaled_params(level_number))
    }
}

/// Parameters derived from the level number alone.
///
/// Mazes grow by two cells per level on both axes, walls densify up to
/// `0.6`, hunters speed up by `0.05` per level and one hunter joins every
/// second level up to ten.
#[must_use]
pub fn scaled_params(level_number: u32) -> LevelParams {
    let level_number = level_number.max(1);
    let level = f64::from(level_number);
    let extent = level_number.saturating_mul(2).saturating_add(10);

    LevelParams {
        maze_size: [extent, extent],
        wall_density: (0.1 + 0.05 * level).min(MAX_WALL_DENSITY),
        hunter_speed: 0.5 + 0.05 * level,
        hunter_behaviour: HunterBehaviour::CoordinatedAttack,
        hunter_count: (4 + (level_number - 1) / 2).min(MAX_HUNTERS),
    }
}
