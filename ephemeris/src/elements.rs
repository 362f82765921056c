use derive_more::Display;

/// Mass of the Earth [kg]
pub const EARTH_MASS_KG: f64 = 5.972E24;

/// Astronomical unit [m]
pub const AU_METERS: f64 = 1.496E11;

/// Per-body orbit description.
///
/// A period of zero marks the system's star, which sits at the focus of
/// every other orbit and never moves in its own frame.
#[derive(Copy, Clone, PartialEq, Debug, Display)]
#[display(
    fmt = "{{e: {}, a: {} AU, b: {} AU, period: {} yr}}",
    "eccentricity",
    "semi_major_axis_au",
    "semi_minor_axis_au",
    "orbital_period_years"
)]
pub struct OrbitalElements {
    /// Scalar, 0 is a circle. Always < 1.
    pub eccentricity: f64,

    /// Semi-major axis [AU]
    pub semi_major_axis_au: f64,

    /// Semi-minor axis [AU]
    pub semi_minor_axis_au: f64,

    /// Orbital period [years]
    pub orbital_period_years: f64,

    /// Tilt of the orbital plane [rad]
    pub inclination_rad: f64,

    /// Mass [Earth masses]
    pub mass_earth_units: f64,
}

impl OrbitalElements {
    /// Elements of a system's star.
    pub const fn central(mass_earth_units: f64) -> Self {
        Self {
            eccentricity: 0.0,
            semi_major_axis_au: 0.0,
            semi_minor_axis_au: 0.0,
            orbital_period_years: 0.0,
            inclination_rad: 0.0,
            mass_earth_units,
        }
    }

    /// Derives the semi-minor axis as b = a(1 - e^2).
    pub fn from_semi_major(
        semi_major_axis_au: f64,
        eccentricity: f64,
        orbital_period_years: f64,
        inclination_rad: f64,
        mass_earth_units: f64,
    ) -> Self {
        Self {
            eccentricity,
            semi_major_axis_au,
            semi_minor_axis_au: semi_major_axis_au * (1.0 - eccentricity * eccentricity),
            orbital_period_years,
            inclination_rad,
            mass_earth_units,
        }
    }

    /// For catalogues that publish both axes.
    pub const fn with_axes(
        semi_major_axis_au: f64,
        semi_minor_axis_au: f64,
        eccentricity: f64,
        orbital_period_years: f64,
        inclination_rad: f64,
        mass_earth_units: f64,
    ) -> Self {
        Self {
            eccentricity,
            semi_major_axis_au,
            semi_minor_axis_au,
            orbital_period_years,
            inclination_rad,
            mass_earth_units,
        }
    }

    pub fn is_central(&self) -> bool {
        self.orbital_period_years == 0.0
    }

    /// Mass [kg]
    pub fn mass_kg(&self) -> f64 {
        self.mass_earth_units * EARTH_MASS_KG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn semi_minor_from_semi_major() {
        let el = OrbitalElements::from_semi_major(1.523, 0.09, 1.881, 0.0, 0.107);
        assert_relative_eq!(el.semi_minor_axis_au, 1.523 * (1.0 - 0.0081));
        assert!(!el.is_central());
    }

    #[test]
    fn central_body() {
        let el = OrbitalElements::central(332837.0);
        assert!(el.is_central());
        assert_relative_eq!(el.semi_minor_axis_au, 0.0);
        assert_relative_eq!(el.mass_kg(), 332837.0 * EARTH_MASS_KG);
    }
}
