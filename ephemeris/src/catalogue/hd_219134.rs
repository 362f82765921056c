use super::{DAYS_PER_YEAR, SOLAR_MASS_EARTH_UNITS};
use crate::{
    elements::OrbitalElements,
    star_system::{StarSystem, StarSystemKind},
};

pub fn star_system() -> StarSystem {
    let d = DAYS_PER_YEAR;
    StarSystem::new(
        StarSystemKind::Hd219134,
        (
            "HD_219134",
            "HD 219134",
            OrbitalElements::central(0.75 * SOLAR_MASS_EARTH_UNITS),
        ),
        vec![
            (
                "b",
                "HD 219134 b",
                OrbitalElements::with_axes(0.03876, 0.03876, 0.0, 3.092926 / d, 1.4844, 4.74),
            ),
            (
                "c",
                "HD 219134 c",
                OrbitalElements::with_axes(0.06530, 0.06504899, 0.062, 6.76458 / d, 1.5233, 4.36),
            ),
            (
                "f",
                "HD 219134 f",
                OrbitalElements::with_axes(0.1463, 0.143095, 0.148, 22.717 / d, 0.0, 7.3),
            ),
            (
                "d",
                "HD 219134 d",
                OrbitalElements::with_axes(0.2370, 0.232487, 0.138, 46.859 / d, 0.0, 16.170),
            ),
            (
                "g",
                "HD 219134 g",
                OrbitalElements::with_axes(0.3753, 0.3753, 0.0, 94.2 / d, 0.0, 10.80622),
            ),
            (
                "h",
                "HD 219134 h",
                OrbitalElements::with_axes(3.11, 3.09880, 0.06, 2100.6 / d, 0.0, 0.34 * 317.907),
            ),
        ],
    )
}
