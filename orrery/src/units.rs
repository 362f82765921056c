//! A lightweight uom-ish library, scoped to what orbit statistics need.

use std::ops::Div;

use ephemeris::prelude::{AU_METERS, EARTH_MASS_KG};
use serde::Serialize;

const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Length {
    meters: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.meters)
    }
}

impl Length {
    pub fn from_meters(meters: f64) -> Length {
        Length { meters }
    }

    pub fn from_au(au: f64) -> Length {
        Length {
            meters: au * AU_METERS,
        }
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    pub fn as_au(&self) -> f64 {
        self.meters / AU_METERS
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Mass {
    kilograms: f64,
}

impl std::fmt::Debug for Mass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kg", self.kilograms)
    }
}

impl Mass {
    pub fn from_kilograms(kilograms: f64) -> Mass {
        Mass { kilograms }
    }

    pub fn from_earth_masses(earth_masses: f64) -> Mass {
        Mass {
            kilograms: earth_masses * EARTH_MASS_KG,
        }
    }

    pub fn as_kilograms(&self) -> f64 {
        self.kilograms
    }

    pub fn as_earth_masses(&self) -> f64 {
        self.kilograms / EARTH_MASS_KG
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Time {
    seconds: f64,
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} s", self.seconds)
    }
}

impl Time {
    pub fn from_secs(seconds: f64) -> Time {
        Time { seconds }
    }

    pub fn from_millis(millis: f64) -> Time {
        Time {
            seconds: millis / 1000.0,
        }
    }

    pub fn from_years(years: f64) -> Time {
        Time {
            seconds: years * SECONDS_PER_YEAR,
        }
    }

    pub fn as_secs(&self) -> f64 {
        self.seconds
    }

    pub fn as_millis(&self) -> f64 {
        self.seconds * 1_000.0
    }

    pub fn as_years(&self) -> f64 {
        self.seconds / SECONDS_PER_YEAR
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Angle {
    radians: f64,
}

impl std::fmt::Debug for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rad", self.radians)
    }
}

impl Angle {
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle {
            radians: degrees.to_radians(),
        }
    }

    pub fn from_radians(radians: f64) -> Angle {
        Angle { radians }
    }

    pub fn as_degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    pub fn as_radians(&self) -> f64 {
        self.radians
    }

    /// Wrapped into [0, 2π)
    pub fn normalized(&self) -> Angle {
        Angle::from_radians(self.radians.rem_euclid(std::f64::consts::TAU))
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Velocity {
    meters_per_second: f64,
}

impl std::fmt::Debug for Velocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m/s", self.meters_per_second)
    }
}

impl Velocity {
    pub fn from_meters_per_second(meters_per_second: f64) -> Velocity {
        Velocity { meters_per_second }
    }

    pub fn as_meters_per_second(&self) -> f64 {
        self.meters_per_second
    }
}

impl Div<Length> for Velocity {
    type Output = AngularVelocity;

    fn div(self, rhs: Length) -> Self::Output {
        AngularVelocity::from_radians_per_second(self.as_meters_per_second() / rhs.as_meters())
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct AngularVelocity {
    radians_per_second: f64,
}

impl std::fmt::Debug for AngularVelocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rad/s", self.radians_per_second)
    }
}

impl AngularVelocity {
    pub fn from_radians_per_second(radians_per_second: f64) -> AngularVelocity {
        AngularVelocity { radians_per_second }
    }

    pub fn as_radians_per_second(&self) -> f64 {
        self.radians_per_second
    }
}
