use crate::{
    elements::OrbitalElements,
    star_system::{StarSystem, StarSystemKind},
};

/// Inclinations are tabulated in degrees relative to the ecliptic and
/// converted to radians here.
///
/// Deviation: earlier plots of this table fed the degree values to cos/sin
/// unconverted, so Mercury was tilted by 7 rad rather than 7°. 3D views
/// built from this catalogue are flatter than those plots.
fn planet(a: f64, e: f64, period: f64, inclination_deg: f64, mass: f64) -> OrbitalElements {
    OrbitalElements::from_semi_major(a, e, period, inclination_deg.to_radians(), mass)
}

pub fn star_system() -> StarSystem {
    StarSystem::new(
        StarSystemKind::SolarSystem,
        ("SUN", "Sun", OrbitalElements::central(332837.0)),
        vec![
            ("MERCURY", "Mercury", planet(0.387, 0.21, 0.241, 7.0, 0.055)),
            ("VENUS", "Venus", planet(0.723, 0.01, 0.615, 3.39, 0.815)),
            ("EARTH", "Earth", planet(1.0, 0.02, 1.0, 0.0, 1.0)),
            ("MARS", "Mars", planet(1.523, 0.09, 1.881, 1.85, 0.107)),
            ("JUPITER", "Jupiter", planet(5.202, 0.05, 11.861, 1.31, 317.85)),
            ("SATURN", "Saturn", planet(9.576, 0.06, 29.628, 2.49, 95.159)),
            ("URANUS", "Uranus", planet(19.293, 0.05, 84.747, 0.77, 14.5)),
            ("NEPTUNE", "Neptune", planet(30.246, 0.01, 166.344, 1.77, 17.204)),
            ("PLUTO", "Pluto", planet(39.509, 0.25, 248.348, 17.5, 0.003)),
        ],
    )
}
