use super::{DAYS_PER_YEAR, SOLAR_MASS_EARTH_UNITS};
use crate::{
    elements::OrbitalElements,
    star_system::{StarSystem, StarSystemKind},
};

pub fn star_system() -> StarSystem {
    let d = DAYS_PER_YEAR;
    StarSystem::new(
        StarSystemKind::ProximaCentauri,
        (
            "PROXIMA_CENTAURI",
            "Proxima Centauri",
            OrbitalElements::central(0.1221 * SOLAR_MASS_EARTH_UNITS),
        ),
        vec![
            (
                "d",
                "Proxima Centauri d",
                OrbitalElements::with_axes(0.02885, 0.0288038, 0.04, 5.122 / d, 0.0, 0.26),
            ),
            (
                "b",
                "Proxima Centauri b",
                OrbitalElements::with_axes(0.04857, 0.0479930, 0.109, 11.18418 / d, 0.0, 1.07),
            ),
        ],
    )
}
