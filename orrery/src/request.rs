use ephemeris::prelude::{BodyIndex, LookupError, StarSystem, StarSystemKind};
use thiserror::Error;

use crate::{
    kepler::Dimensionality,
    sampler::{frame_count, frame_count_in_bounds, FRAME_INTERVAL_MS, MAX_FRAMES},
};

/// Immutable snapshot of the settings for one animation run.
///
/// Bodies are kept in the order given, with duplicates dropped. The order
/// fixes colour and stats slot assignment. The centre does not have to be
/// one of the bodies.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationRequest {
    star_system: StarSystemKind,
    centre: BodyIndex,
    bodies: Vec<BodyIndex>,
    orbit_duration_secs: f64,
    orbit_count: u32,
    dims: Dimensionality,
}

impl SimulationRequest {
    pub fn new<S: AsRef<str>>(
        system: &StarSystem,
        centre: &str,
        bodies: &[S],
        orbit_duration_secs: f64,
        orbit_count: u32,
        dims: Dimensionality,
    ) -> Result<Self, RequestError> {
        let centre = system.lookup(centre)?.index;

        let mut indices: Vec<BodyIndex> = Vec::with_capacity(bodies.len());
        for b in bodies {
            let idx = system.lookup(b.as_ref())?.index;
            if !indices.contains(&idx) {
                indices.push(idx);
            }
        }
        if indices.is_empty() {
            return Err(RequestError::NoBodies);
        }

        if !(orbit_duration_secs.is_finite() && orbit_duration_secs > 0.0) {
            return Err(RequestError::InvalidDuration(orbit_duration_secs));
        }
        if orbit_count == 0 {
            return Err(RequestError::NoOrbits);
        }
        if !frame_count_in_bounds(orbit_duration_secs, orbit_count) {
            return Err(RequestError::TooManyFrames {
                orbit_duration_secs,
                orbit_count,
                max: MAX_FRAMES,
            });
        }
        if frame_count(orbit_duration_secs, orbit_count, FRAME_INTERVAL_MS) == 0 {
            return Err(RequestError::NoFrames {
                orbit_duration_secs,
                orbit_count,
            });
        }

        Ok(Self {
            star_system: system.kind(),
            centre,
            bodies: indices,
            orbit_duration_secs,
            orbit_count,
            dims,
        })
    }

    pub fn star_system(&self) -> StarSystemKind {
        self.star_system
    }

    pub fn centre(&self) -> BodyIndex {
        self.centre
    }

    pub fn bodies(&self) -> &[BodyIndex] {
        &self.bodies
    }

    /// Slot of `body` in the per-frame payloads, if it is animated
    pub fn slot(&self, body: BodyIndex) -> Option<usize> {
        self.bodies.iter().position(|b| *b == body)
    }

    /// Wall-clock seconds per orbit of the slowest body
    pub fn orbit_duration_secs(&self) -> f64 {
        self.orbit_duration_secs
    }

    pub fn orbit_count(&self) -> u32 {
        self.orbit_count
    }

    pub fn dims(&self) -> Dimensionality {
        self.dims
    }

    pub fn frame_count(&self) -> usize {
        frame_count(self.orbit_duration_secs, self.orbit_count, FRAME_INTERVAL_MS)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("At least one body must be selected")]
    NoBodies,

    #[error("Orbit duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("Orbit count must be at least 1")]
    NoOrbits,

    #[error("{orbit_duration_secs} s over {orbit_count} orbit(s) is shorter than one frame")]
    NoFrames {
        orbit_duration_secs: f64,
        orbit_count: u32,
    },

    #[error("{orbit_duration_secs} s over {orbit_count} orbit(s) needs more than {max} frames")]
    TooManyFrames {
        orbit_duration_secs: f64,
        orbit_count: u32,
        max: usize,
    },

    #[error("{orbit_count} orbit(s) needs more than {max} spirograph lines")]
    TooManyLines { orbit_count: u32, max: usize },

    #[error("A spirograph needs two different bodies, got '{0}' twice")]
    SameBody(String),

    #[error("'{0}' does not orbit and cannot be drawn in a spirograph")]
    CentralBody(String),
}
