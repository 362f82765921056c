use ephemeris::prelude::{BodyIndex, Catalogue, StarSystem, StarSystemKind};
use std::path::Path;
use tracing::info;

use self::config::Config;
use crate::{
    driver::DriverOptions,
    kepler::Dimensionality,
    request::{RequestError, SimulationRequest},
    spirograph::{SpiroRequest, SpiroSpeed},
};

pub use self::config::ConfigError;

pub mod config;

/// User-facing animation settings.
///
/// Bodies are held by name so a settings value can outlive a catalogue
/// borrow; [`Settings::request`] resolves them.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub star_system: StarSystemKind,
    pub centre: String,
    pub bodies: Vec<String>,
    pub orbit_duration_secs: f64,
    pub orbit_count: u32,
    pub view: Dimensionality,
    pub repeat: bool,
    pub stats_body: Option<String>,
    pub palette_seed: Option<u64>,
    pub spirograph: SpiroSettings,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpiroSettings {
    pub first: String,
    pub second: String,
    pub orbits: u32,
    pub speed: SpiroSpeed,
}

impl SpiroSettings {
    /// The system's first two planets, 10 orbits, fast
    pub fn for_system(system: &StarSystem) -> Self {
        let mut planets = system.planets().map(|b| b.name.to_string());
        let first = planets.next().unwrap_or_default();
        let second = planets.next().unwrap_or_default();
        SpiroSettings {
            first,
            second,
            orbits: 10,
            speed: SpiroSpeed::Fast,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let catalogue = Catalogue::load();
        let mut s = Self::for_system(catalogue.system(StarSystemKind::SolarSystem));
        s.spirograph.first = "Venus".to_string();
        s.spirograph.second = "Earth".to_string();
        s
    }
}

impl Settings {
    /// Star at the centre, every planet shown, one orbit per second in 2D
    pub fn for_system(system: &StarSystem) -> Self {
        Settings {
            star_system: system.kind(),
            centre: system.sun().name.to_string(),
            bodies: system.planets().map(|b| b.name.to_string()).collect(),
            orbit_duration_secs: config::DEFAULT_ORBIT_DURATION_SECS,
            orbit_count: 1,
            view: Dimensionality::TwoD,
            repeat: true,
            stats_body: None,
            palette_seed: None,
            spirograph: SpiroSettings::for_system(system),
        }
    }

    pub fn load<P: AsRef<Path>>(config: Option<P>) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        if let Some(cfg_path) = config.as_ref() {
            info!(
                config = %cfg_path.as_ref().display(),
                "Loading settings from config file",
            );
            let cfg = Config::load(cfg_path)?;
            settings.apply(&Catalogue::load(), &cfg)?;
        }
        Ok(settings)
    }

    /// Overlays every key present in `cfg`.
    ///
    /// A new star system resets the body selection first, then the
    /// remaining keys apply on top.
    pub fn apply(&mut self, catalogue: &Catalogue, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(kind) = cfg.star_system_kind()? {
            if kind != self.star_system {
                self.set_star_system(catalogue, kind);
            }
        }
        if let Some(c) = cfg.centre.as_ref() {
            self.centre = c.clone();
        }
        if let Some(b) = cfg.bodies.as_ref() {
            self.bodies = b.clone();
        }
        if let Some(d) = cfg.orbit_duration {
            self.orbit_duration_secs = d;
        }
        if let Some(n) = cfg.orbit_count {
            self.orbit_count = n;
        }
        if let Some(v) = cfg.view {
            self.view = v;
        }
        if let Some(r) = cfg.repeat {
            self.repeat = r;
        }
        if cfg.stats_body.is_some() {
            self.stats_body = cfg.stats_body.clone();
        }
        if cfg.palette_seed.is_some() {
            self.palette_seed = cfg.palette_seed;
        }
        if let Some(spiro) = cfg.spirograph.as_ref() {
            if let Some(f) = spiro.first.as_ref() {
                self.spirograph.first = f.clone();
            }
            if let Some(s) = spiro.second.as_ref() {
                self.spirograph.second = s.clone();
            }
            if let Some(n) = spiro.orbits {
                self.spirograph.orbits = n;
            }
            if let Some(s) = spiro.speed {
                self.spirograph.speed = s;
            }
        }
        Ok(())
    }

    /// Switches systems, resetting the centre to the new star and the
    /// bodies to all of its planets. Timing and view are kept.
    pub fn set_star_system(&mut self, catalogue: &Catalogue, kind: StarSystemKind) {
        let system = catalogue.system(kind);
        let fresh = Settings::for_system(system);
        self.star_system = kind;
        self.centre = fresh.centre;
        self.bodies = fresh.bodies;
        self.stats_body = None;
        self.spirograph = SpiroSettings {
            orbits: self.spirograph.orbits,
            speed: self.spirograph.speed,
            ..fresh.spirograph
        };
    }

    pub fn system<'c>(&self, catalogue: &'c Catalogue) -> &'c StarSystem {
        catalogue.system(self.star_system)
    }

    pub fn request(&self, catalogue: &Catalogue) -> Result<SimulationRequest, RequestError> {
        SimulationRequest::new(
            self.system(catalogue),
            &self.centre,
            &self.bodies,
            self.orbit_duration_secs,
            self.orbit_count,
            self.view,
        )
    }

    pub fn spiro_request(&self, catalogue: &Catalogue) -> Result<SpiroRequest, RequestError> {
        SpiroRequest::new(
            self.system(catalogue),
            &self.spirograph.first,
            &self.spirograph.second,
            self.spirograph.orbits,
            self.spirograph.speed,
        )
    }

    /// The body to report statistics for, if one is selected
    pub fn stats_body(&self, catalogue: &Catalogue) -> Result<Option<BodyIndex>, RequestError> {
        let Some(name) = self.stats_body.as_deref() else {
            return Ok(None);
        };
        Ok(Some(self.system(catalogue).lookup(name)?.index))
    }

    pub fn driver_options(&self) -> DriverOptions {
        DriverOptions {
            repeat: self.repeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.star_system, StarSystemKind::SolarSystem);
        assert_eq!(s.centre, "Sun");
        assert!(!s.bodies.iter().any(|b| b == "Sun"));
        assert_eq!(s.bodies.first().map(String::as_str), Some("Mercury"));
        assert_eq!(s.orbit_count, 1);
        assert_eq!(s.view, Dimensionality::TwoD);
        assert!(s.repeat);
        assert_eq!(s.spirograph.first, "Venus");
        assert_eq!(s.spirograph.second, "Earth");
        assert_eq!(s.spirograph.orbits, 10);
        assert_eq!(s.spirograph.speed, SpiroSpeed::Fast);

        let cat = Catalogue::load();
        let req = s.request(&cat).unwrap();
        assert_eq!(req.centre(), StarSystem::SUN);
        assert_eq!(req.bodies().len(), cat.system(s.star_system).planets().count());
        assert_eq!(req.frame_count(), 50);
        assert!(s.spiro_request(&cat).is_ok());
    }

    #[test]
    fn changing_system_resets_bodies() {
        let cat = Catalogue::load();
        let mut s = Settings::default();
        s.orbit_duration_secs = 3.0;
        s.stats_body = Some("Earth".to_string());
        s.set_star_system(&cat, StarSystemKind::Hd219134);

        let sys = cat.system(StarSystemKind::Hd219134);
        assert_eq!(s.centre, sys.sun().name);
        assert_eq!(s.bodies.len(), sys.planets().count());
        assert_eq!(s.stats_body, None);
        assert_eq!(s.orbit_duration_secs, 3.0);
        assert_ne!(s.spirograph.first, s.spirograph.second);
        assert!(s.request(&cat).is_ok());
        assert!(s.spiro_request(&cat).is_ok());
    }

    #[test]
    fn config_overlays_defaults() {
        let cat = Catalogue::load();
        let cfg = Config::from_str_checked(indoc! {r#"
            star-system = 'tau-ceti'
            bodies = ['g', 'f']
            view = '3d'
            stats-body = 'f'
        "#})
        .unwrap();
        let mut s = Settings::default();
        s.apply(&cat, &cfg).unwrap();

        assert_eq!(s.star_system, StarSystemKind::TauCeti);
        assert_eq!(s.centre, "Tau Ceti");
        assert_eq!(s.view, Dimensionality::ThreeD);
        assert_eq!(s.spirograph.first, "Tau Ceti g");

        let req = s.request(&cat).unwrap();
        assert_eq!(req.bodies(), &[1, 4]);
        assert_eq!(s.stats_body(&cat).unwrap(), Some(4));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Settings::load(Some("/nonexistent/orrery.toml")),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(Settings::load::<&str>(None).unwrap(), Settings::default());
    }
}
