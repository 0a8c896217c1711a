//! Configuration for the display.
//!
//! Loaded from a JSON file given on the command line or in `LIFECANVAS_CONFIG`. Every field has a
//! default, so a config file only needs the fields it changes.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::GridSize;
use crate::Pixel;
use crate::color::Rgba;
use crate::coords::CellGeometry;
use crate::render::GRID_COLOR;
use crate::rule_set::RuleError;
use crate::rule_set::RuleSet;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "LIFECANVAS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid rules: {0}")]
    Rules(#[from] RuleError),

    #[error("Invalid grid color \"{0}\", expected #RRGGBB")]
    GridColor(String),

    #[error("Cell size must be at least one pixel")]
    ZeroCellSize,

    #[error("A {size}x{size} grid doesn't fit with these cell sizes, the most is {max}x{max}")]
    GridTooLarge { size: GridSize, max: GridSize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Side length of a cell, in pixels
    pub cell_size: Pixel,

    /// Width of the lines between cells, in pixels
    pub grid_thickness: Pixel,

    /// `#RRGGBB`
    pub grid_color: String,

    /// Side length of the grid, in cells
    pub grid_size: GridSize,

    /// Chance for each cell of a new grid to start alive
    pub life_probability: f64,

    /// Ticks per second while running
    pub framerate: f64,

    pub heatmap: bool,

    /// Rulestring, e.g. `B3/S23`
    pub rules: String,

    /// Seed for new grids. Random when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: 10,
            grid_thickness: 1,
            grid_color: "#CCCCCC".to_string(),
            grid_size: 64,
            life_probability: 0.5,
            framerate: 10.0,
            heatmap: false,
            rules: "B3/S23".to_string(),
            seed: None,
        }
    }
}

impl Config {
    /// Path of the config file, from the first command line argument or [`CONFIG_ENV`]
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(CONFIG_ENV))
            .map(PathBuf::from)
    }

    /// Load and validate the config at `path`. Without a path, or if the file doesn't exist, the
    /// defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No config file found at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let max = self.geometry().max_grid_size();
        if self.grid_size > max {
            return Err(ConfigError::GridTooLarge {
                size: self.grid_size,
                max,
            });
        }

        if Rgba::from_hex(&self.grid_color).is_none() {
            return Err(ConfigError::GridColor(self.grid_color.clone()));
        }

        self.rules()?;

        Ok(())
    }

    pub fn geometry(&self) -> CellGeometry {
        CellGeometry::new(self.cell_size, self.grid_thickness)
    }

    /// The configured grid color, or the default one if it doesn't parse
    pub fn grid_color(&self) -> Rgba {
        Rgba::from_hex(&self.grid_color).unwrap_or(GRID_COLOR)
    }

    pub fn rules(&self) -> Result<RuleSet, RuleError> {
        self.rules.parse()
    }
}
