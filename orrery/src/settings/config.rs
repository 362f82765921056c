use ephemeris::prelude::{Catalogue, LookupError, StarSystemKind};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::{
    kepler::Dimensionality,
    sampler::{frame_count_in_bounds, MAX_FRAMES},
    spirograph::{SpiroSpeed, LINES_PER_ORBIT},
};

/// Orbit duration assumed when a file sets only `orbit-count` [s]
pub const DEFAULT_ORBIT_DURATION_SECS: f64 = 1.0;

/// On-disk settings. Every key is optional; missing keys keep the defaults.
#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub star_system: Option<String>,
    #[serde(alias = "center")]
    pub centre: Option<String>,
    #[serde(alias = "objects")]
    pub bodies: Option<Vec<String>>,
    /// Wall-clock seconds per orbit of the slowest body
    pub orbit_duration: Option<f64>,
    pub orbit_count: Option<u32>,
    pub view: Option<Dimensionality>,
    pub repeat: Option<bool>,
    pub stats_body: Option<String>,
    pub palette_seed: Option<u64>,
    pub spirograph: Option<SpiroConfig>,
}

#[derive(Clone, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SpiroConfig {
    pub first: Option<String>,
    pub second: Option<String>,
    pub orbits: Option<u32>,
    pub speed: Option<SpiroSpeed>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str_checked(&content)
    }

    /// Parses and checks every named body against the named star system.
    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;

        let catalogue = Catalogue::load();
        let system = catalogue.system(cfg.star_system_kind()?.unwrap_or_default());

        if let Some(c) = cfg.centre.as_ref() {
            system.lookup(c)?;
        }
        if let Some(b) = cfg.stats_body.as_ref() {
            system.lookup(b)?;
        }

        let mut seen = HashSet::new();
        for name in cfg.bodies.iter().flatten() {
            let body = system.lookup(name)?;
            if !seen.insert(body.index) {
                return Err(ConfigError::DuplicateBody(name.clone()));
            }
        }

        if let Some(spiro) = cfg.spirograph.as_ref() {
            for name in [spiro.first.as_ref(), spiro.second.as_ref()].into_iter().flatten() {
                system.lookup(name)?;
            }
        }

        if let Some(d) = cfg.orbit_duration {
            if !(d.is_finite() && d > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: "orbit-duration",
                    value: d.to_string(),
                });
            }
        }
        if cfg.orbit_count == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "orbit-count",
                value: "0".to_string(),
            });
        }
        if cfg.orbit_duration.is_some() || cfg.orbit_count.is_some() {
            let d = cfg.orbit_duration.unwrap_or(DEFAULT_ORBIT_DURATION_SECS);
            let n = cfg.orbit_count.unwrap_or(1);
            if !frame_count_in_bounds(d, n) {
                return Err(ConfigError::InvalidValue {
                    key: "orbit-duration",
                    value: format!("{d} s over {n} orbit(s) exceeds {MAX_FRAMES} frames"),
                });
            }
        }
        if let Some(n) = cfg.spirograph.as_ref().and_then(|s| s.orbits) {
            if n as usize > MAX_FRAMES / LINES_PER_ORBIT {
                return Err(ConfigError::InvalidValue {
                    key: "spirograph.orbits",
                    value: n.to_string(),
                });
            }
        }
        if cfg.spirograph.as_ref().and_then(|s| s.orbits) == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "spirograph.orbits",
                value: "0".to_string(),
            });
        }

        Ok(cfg)
    }

    pub fn star_system_kind(&self) -> Result<Option<StarSystemKind>, LookupError> {
        self.star_system
            .as_deref()
            .map(str::parse::<StarSystemKind>)
            .transpose()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file. {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Duplicate configuration entry for body '{0}'")]
    DuplicateBody(String),

    #[error("Invalid value '{value}' for '{key}'")]
    InvalidValue { key: &'static str, value: String },
}
