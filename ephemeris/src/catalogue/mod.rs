//! Static orbital-element tables, one module per star system.

use crate::star_system::{StarSystem, StarSystemKind};

pub mod hd_219134;
pub mod proxima_centauri;
pub mod solar_system;
pub mod tau_ceti;

/// Mass of the Sun [Earth masses], used to scale the exoplanet hosts
pub const SOLAR_MASS_EARTH_UNITS: f64 = 333030.0;

const DAYS_PER_YEAR: f64 = 365.0;

/// Every star system known to the engine, built once at start-up.
#[derive(Clone, Debug)]
pub struct Catalogue {
    systems: Vec<StarSystem>,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::load()
    }
}

impl Catalogue {
    pub fn load() -> Self {
        let systems = StarSystemKind::ALL.into_iter().map(build).collect();
        Catalogue { systems }
    }

    pub fn system(&self, kind: StarSystemKind) -> &StarSystem {
        // Built from StarSystemKind::ALL, so the position always matches
        &self.systems[kind as usize]
    }

    pub fn systems(&self) -> impl Iterator<Item = &StarSystem> {
        self.systems.iter()
    }
}

fn build(kind: StarSystemKind) -> StarSystem {
    match kind {
        StarSystemKind::SolarSystem => solar_system::star_system(),
        StarSystemKind::TauCeti => tau_ceti::star_system(),
        StarSystemKind::Hd219134 => hd_219134::star_system(),
        StarSystemKind::ProximaCentauri => proxima_centauri::star_system(),
    }
}
