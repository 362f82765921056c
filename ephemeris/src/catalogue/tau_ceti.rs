use super::{DAYS_PER_YEAR, SOLAR_MASS_EARTH_UNITS};
use crate::{
    elements::OrbitalElements,
    star_system::{StarSystem, StarSystemKind},
};

/// Periods are published in days; masses are minimum masses (m sin i)
fn planet(a: f64, e: f64, period_days: f64, mass: f64) -> OrbitalElements {
    OrbitalElements::from_semi_major(a, e, period_days / DAYS_PER_YEAR, 0.0, mass)
}

pub fn star_system() -> StarSystem {
    StarSystem::new(
        StarSystemKind::TauCeti,
        (
            "TAU_CETI",
            "Tau Ceti",
            OrbitalElements::central(0.783 * SOLAR_MASS_EARTH_UNITS),
        ),
        vec![
            ("g", "Tau Ceti g", planet(0.133, 0.06, 20.0, 1.75)),
            ("h", "Tau Ceti h", planet(0.243, 0.23, 49.41, 1.83)),
            ("e", "Tau Ceti e", planet(0.538, 0.18, 162.87, 3.93)),
            ("f", "Tau Ceti f", planet(1.334, 0.16, 636.13, 3.93)),
        ],
    )
}
