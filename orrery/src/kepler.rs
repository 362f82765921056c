//! The position function every trajectory in the engine is built from.
//!
//! Orbits are polar ellipses with the star at the origin, parameterized by
//! the semi-minor axis:
//!
//! ```text
//! r = b / (1 - e cos θ)
//! x = r cos θ cos(i)
//! y = r sin θ
//! z = r cos θ sin(i)      (3D only)
//! ```
//!
//! This is not the textbook focus-ellipse (which uses the semi-latus rectum),
//! and the statistics are calibrated against it. Keep it as is.

use ephemeris::prelude::OrbitalElements;
use serde::{Deserialize, Serialize};
use std::{f64::consts::TAU, str::FromStr};

/// Cartesian position [AU]. In 2D the z coordinate is always 0.
pub type Point = na::Point3<f64>;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Dimensionality {
    #[default]
    #[serde(rename = "2d", alias = "2D")]
    TwoD,
    #[serde(rename = "3d", alias = "3D")]
    ThreeD,
}

impl Dimensionality {
    /// Number of meaningful coordinates in a point
    pub const fn len(self) -> usize {
        match self {
            Dimensionality::TwoD => 2,
            Dimensionality::ThreeD => 3,
        }
    }

    pub fn coords(self, p: &Point) -> &[f64] {
        &p.coords.as_slice()[..self.len()]
    }
}

impl std::fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimensionality::TwoD => f.write_str("2D"),
            Dimensionality::ThreeD => f.write_str("3D"),
        }
    }
}

impl FromStr for Dimensionality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "2d" | "2" => Dimensionality::TwoD,
            "3d" | "3" => Dimensionality::ThreeD,
            _ => return Err(format!("Bad view type '{s}', expected 2d or 3d")),
        })
    }
}

/// Position at orbital angle `theta` [rad].
///
/// Undefined for e >= 1; the catalogue only holds bound orbits.
pub fn position(
    theta: f64,
    eccentricity: f64,
    semi_minor_axis: f64,
    inclination: f64,
    dims: Dimensionality,
) -> Point {
    let r = semi_minor_axis / (1.0 - eccentricity * theta.cos());
    let in_plane_x = r * theta.cos();
    let y = r * theta.sin();
    match dims {
        Dimensionality::TwoD => Point::new(in_plane_x, y, 0.0),
        Dimensionality::ThreeD => Point::new(
            in_plane_x * inclination.cos(),
            y,
            in_plane_x * inclination.sin(),
        ),
    }
}

pub fn body_position(theta: f64, elements: &OrbitalElements, dims: Dimensionality) -> Point {
    position(
        theta,
        elements.eccentricity,
        elements.semi_minor_axis_au,
        elements.inclination_rad,
        dims,
    )
}

/// Distance from the star at angle `theta` [AU]
pub fn radius(theta: f64, elements: &OrbitalElements) -> f64 {
    elements.semi_minor_axis_au / (1.0 - elements.eccentricity * theta.cos())
}

/// Orbital angle after `t_years` [rad]. The star (period 0) stays at 0.
pub fn orbital_angle(t_years: f64, period_years: f64) -> f64 {
    if period_years == 0.0 {
        0.0
    } else {
        TAU * t_years / period_years
    }
}
