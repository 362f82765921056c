//! Turns orbital elements into frame-indexed, recentred positions.
//!
//! Every body is sampled on the same uniform time grid, so recentring can
//! subtract the centre's position at the matching sample index.

use ephemeris::prelude::{BodyIndex, StarSystem};
use ordered_float::OrderedFloat;

use crate::{
    kepler::{body_position, orbital_angle, Dimensionality, Point},
    request::SimulationRequest,
};

/// Wall-clock time between animation frames [ms]
pub const FRAME_INTERVAL_MS: u64 = 20;

/// Samples per static orbit path
pub const PATH_SAMPLES: usize = 1000;

/// Upper bound on frames in one table, about 33 minutes of playback
pub const MAX_FRAMES: usize = 100_000;

/// F = round(duration * orbits * 1000 / interval), before any cast.
///
/// Not finite when the inputs overflow.
pub fn frame_count_f64(orbit_duration_secs: f64, orbit_count: u32, tick_interval_ms: u64) -> f64 {
    (orbit_duration_secs * f64::from(orbit_count) * 1000.0 / tick_interval_ms as f64).round()
}

/// Only meaningful for inputs already checked against [`MAX_FRAMES`].
pub fn frame_count(orbit_duration_secs: f64, orbit_count: u32, tick_interval_ms: u64) -> usize {
    frame_count_f64(orbit_duration_secs, orbit_count, tick_interval_ms) as usize
}

/// True when the frame count is finite and no larger than [`MAX_FRAMES`]
pub fn frame_count_in_bounds(orbit_duration_secs: f64, orbit_count: u32) -> bool {
    let f = frame_count_f64(orbit_duration_secs, orbit_count, FRAME_INTERVAL_MS);
    f.is_finite() && f <= MAX_FRAMES as f64
}

/// Longest period among `bodies` and `centre`, skipping the star.
pub fn max_period(system: &StarSystem, bodies: &[BodyIndex], centre: BodyIndex) -> f64 {
    bodies
        .iter()
        .chain(std::iter::once(&centre))
        .map(|b| system.elements(*b).orbital_period_years)
        .filter(|p| *p > 0.0)
        .map(OrderedFloat)
        .max()
        .map(|p| p.0)
        .unwrap_or(0.0)
}

/// Uniform time grid over `[0, span_years]`, both ends included.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SampleGrid {
    pub span_years: f64,
    pub samples: usize,
}

impl SampleGrid {
    pub fn new(span_years: f64, samples: usize) -> Self {
        Self {
            span_years,
            samples,
        }
    }

    /// Spans `orbit_count` orbits of the slowest body involved.
    pub fn for_orbits(
        system: &StarSystem,
        bodies: &[BodyIndex],
        centre: BodyIndex,
        orbit_count: u32,
        samples: usize,
    ) -> Self {
        Self::new(
            f64::from(orbit_count) * max_period(system, bodies, centre),
            samples,
        )
    }

    /// t_i [years]
    pub fn time(&self, i: usize) -> f64 {
        if self.samples <= 1 {
            0.0
        } else {
            i as f64 * self.span_years / (self.samples - 1) as f64
        }
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.samples).map(|i| self.time(i))
    }
}

/// One body's angles and positions over a sample grid
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    pub body: BodyIndex,
    pub angles: Vec<f64>,
    pub positions: Vec<Point>,
}

impl Trajectory {
    /// Positions around the body's own focus, without recentring
    pub fn raw(
        system: &StarSystem,
        body: BodyIndex,
        grid: &SampleGrid,
        dims: Dimensionality,
    ) -> Self {
        let elements = system.elements(body);
        let angles: Vec<f64> = grid
            .times()
            .map(|t| orbital_angle(t, elements.orbital_period_years))
            .collect();
        let positions = if elements.is_central() {
            vec![Point::origin(); grid.samples]
        } else {
            angles
                .iter()
                .map(|theta| body_position(*theta, elements, dims))
                .collect()
        };
        Trajectory {
            body,
            angles,
            positions,
        }
    }

    fn recentre(&mut self, centre: &Trajectory) {
        for (p, c) in self.positions.iter_mut().zip(centre.positions.iter()) {
            *p = Point::from(*p - c);
        }
    }
}

/// Samples every body in `bodies` on `grid`, relative to `centre`.
///
/// Indices must come from `system`; nothing is re-validated here.
pub fn sample(
    system: &StarSystem,
    bodies: &[BodyIndex],
    centre: BodyIndex,
    grid: &SampleGrid,
    dims: Dimensionality,
) -> Vec<Trajectory> {
    let centre_traj =
        (!system.is_sun(centre)).then(|| Trajectory::raw(system, centre, grid, dims));

    bodies
        .iter()
        .map(|b| {
            let mut traj = Trajectory::raw(system, *b, grid, dims);
            if let Some(c) = centre_traj.as_ref() {
                traj.recentre(c);
            }
            traj
        })
        .collect()
}

/// A single frame: one point and one angle per requested body, in request order
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    positions: Vec<Point>,
    angles: Vec<f64>,
}

impl Frame {
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }
}

/// Precomputed frames for one animation run.
///
/// Never patched; a settings change builds a new table.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameTable {
    dims: Dimensionality,
    bodies: Vec<BodyIndex>,
    frames: Vec<Frame>,
}

impl FrameTable {
    pub fn build(system: &StarSystem, request: &SimulationRequest) -> Self {
        let grid = SampleGrid::for_orbits(
            system,
            request.bodies(),
            request.centre(),
            request.orbit_count(),
            request.frame_count(),
        );
        let trajectories = sample(
            system,
            request.bodies(),
            request.centre(),
            &grid,
            request.dims(),
        );
        Self::from_trajectories(request.dims(), grid.samples, &trajectories)
    }

    /// Transposes per-body trajectories into per-frame rows
    pub fn from_trajectories(
        dims: Dimensionality,
        frame_count: usize,
        trajectories: &[Trajectory],
    ) -> Self {
        let frames = (0..frame_count)
            .map(|i| Frame {
                positions: trajectories.iter().map(|t| t.positions[i]).collect(),
                angles: trajectories.iter().map(|t| t.angles[i]).collect(),
            })
            .collect();
        FrameTable {
            dims,
            bodies: trajectories.iter().map(|t| t.body).collect(),
            frames,
        }
    }

    pub fn dims(&self) -> Dimensionality {
        self.dims
    }

    pub fn bodies(&self) -> &[BodyIndex] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> &Frame {
        &self.frames[index]
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

/// Full orbit paths for static drawing, sampled like the frames but denser
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitPaths {
    dims: Dimensionality,
    paths: Vec<Trajectory>,
}

impl OrbitPaths {
    pub fn build(system: &StarSystem, request: &SimulationRequest) -> Self {
        let grid = SampleGrid::for_orbits(
            system,
            request.bodies(),
            request.centre(),
            request.orbit_count(),
            PATH_SAMPLES,
        );
        OrbitPaths {
            dims: request.dims(),
            paths: sample(
                system,
                request.bodies(),
                request.centre(),
                &grid,
                request.dims(),
            ),
        }
    }

    pub fn dims(&self) -> Dimensionality {
        self.dims
    }

    pub fn paths(&self) -> &[Trajectory] {
        &self.paths
    }

    /// View extents for all paths, padded for display
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.paths.iter().flat_map(|t| t.positions.iter())).map(|b| b.padded())
    }
}

/// Axis-aligned extents [AU]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Padding applied to a z range with no extent [AU]
    pub const FLAT_Z_PADDING: f64 = 0.04;

    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds { min: *p, max: *p },
                Some(b) => Bounds {
                    min: b.min.inf(p),
                    max: b.max.sup(p),
                },
            })
        })
    }

    /// x and y grow by 1/20 of their span, z by 1/2
    pub fn padded(&self) -> Self {
        let span = self.max - self.min;
        let mut pad = na::Vector3::new(span.x / 20.0, span.y / 20.0, span.z / 2.0);
        if pad.z == 0.0 {
            pad.z = Self::FLAT_Z_PADDING;
        }
        Bounds {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::SimulationRequest;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ephemeris::prelude::{Catalogue, OrbitalElements, StarSystemKind};

    fn toy_system() -> StarSystem {
        StarSystem::new(
            StarSystemKind::SolarSystem,
            ("SUN", "Sun", OrbitalElements::central(1.0)),
            vec![
                ("A", "A", OrbitalElements::with_axes(1.0, 1.0, 0.0, 1.0, 0.0, 1.0)),
                ("B", "B", OrbitalElements::with_axes(2.0, 2.0, 0.0, 2.0, 0.0, 1.0)),
            ],
        )
    }

    #[test]
    fn frame_count_formula() {
        assert_eq!(frame_count(2.0, 1, 20), 100);
        assert_eq!(frame_count(1.0, 3, 20), 150);
        assert_eq!(frame_count(0.009, 1, 20), 0);
    }

    #[test]
    fn frame_count_bounds() {
        assert!(frame_count_in_bounds(2000.0, 1));
        assert!(!frame_count_in_bounds(2000.02, 1));
        assert!(!frame_count_in_bounds(1e300, u32::MAX));
        assert!(frame_count_f64(1e300, u32::MAX, FRAME_INTERVAL_MS).is_infinite());
    }

    #[test]
    fn max_period_skips_star() {
        let sys = toy_system();
        assert_relative_eq!(max_period(&sys, &[1], StarSystem::SUN), 1.0);
        assert_relative_eq!(max_period(&sys, &[1], 2), 2.0);
        assert_relative_eq!(max_period(&sys, &[StarSystem::SUN], StarSystem::SUN), 0.0);
    }

    #[test]
    fn grid_endpoints() {
        let grid = SampleGrid::new(3.0, 4);
        let t: Vec<f64> = grid.times().collect();
        assert_eq!(t, vec![0.0, 1.0, 2.0, 3.0]);
        assert_relative_eq!(SampleGrid::new(3.0, 1).time(0), 0.0);
    }

    // 1.02 s gives F = 51, so sample 25 lands exactly on t = 0.5 yr and the
    // half-orbit point can be checked to 1e-9. With F = 50 no sample hits pi.
    #[test]
    fn single_circular_body_about_the_star() {
        let sys = toy_system();
        let req = SimulationRequest::new(&sys, "SUN", &["A"], 1.02, 1, Dimensionality::TwoD)
            .unwrap();
        let table = FrameTable::build(&sys, &req);
        assert_eq!(table.len(), 51);

        let p0 = table.frame(0).positions()[0];
        assert_abs_diff_eq!(p0.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p0.y, 0.0, epsilon = 1e-9);

        // t_25 = 0.5 yr, theta = pi
        let half = table.frame(25);
        assert_abs_diff_eq!(half.angles()[0], std::f64::consts::PI, epsilon = 1e-12);
        assert_abs_diff_eq!(half.positions()[0].x, -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(half.positions()[0].y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn single_circular_body_over_one_second() {
        let sys = toy_system();
        let req =
            SimulationRequest::new(&sys, "SUN", &["A"], 1.0, 1, Dimensionality::TwoD).unwrap();
        let table = FrameTable::build(&sys, &req);
        assert_eq!(table.len(), 50);

        let p0 = table.frame(0).positions()[0];
        assert_abs_diff_eq!(p0.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p0.y, 0.0, epsilon = 1e-9);

        let pi = std::f64::consts::PI;
        let nearest = table
            .frames()
            .iter()
            .min_by_key(|f| OrderedFloat((f.angles()[0] - pi).abs()))
            .unwrap();
        // One grid step of arc on the unit circle, 2*pi / 49
        let step = std::f64::consts::TAU / 49.0;
        assert!((nearest.angles()[0] - pi).abs() <= step / 2.0);
        let p = nearest.positions()[0];
        assert!(((p.x + 1.0).powi(2) + p.y.powi(2)).sqrt() <= step);
    }

    #[test]
    fn sun_centre_is_not_recentred() {
        let cat = Catalogue::load();
        let sys = cat.system(StarSystemKind::SolarSystem);
        let req = SimulationRequest::new(
            sys,
            "Sun",
            &["Mercury", "Earth", "Pluto"],
            1.0,
            2,
            Dimensionality::ThreeD,
        )
        .unwrap();
        let table = FrameTable::build(sys, &req);
        let grid = SampleGrid::for_orbits(sys, req.bodies(), req.centre(), 2, table.len());
        for (slot, body) in req.bodies().iter().enumerate() {
            let raw = Trajectory::raw(sys, *body, &grid, Dimensionality::ThreeD);
            for (i, frame) in table.frames().iter().enumerate() {
                assert_eq!(frame.positions()[slot], raw.positions[i]);
            }
        }
    }

    #[test]
    fn centre_body_sits_at_origin() {
        let cat = Catalogue::load();
        for sys in cat.systems() {
            let names: Vec<&str> = sys.bodies().iter().map(|b| b.key).collect();
            for centre in sys.bodies() {
                for dims in [Dimensionality::TwoD, Dimensionality::ThreeD] {
                    let req = SimulationRequest::new(sys, centre.key, &names, 0.5, 1, dims)
                        .unwrap();
                    let table = FrameTable::build(sys, &req);
                    let slot = req.slot(centre.index).unwrap();
                    for frame in table.frames() {
                        assert_eq!(frame.positions()[slot], Point::origin());
                    }
                }
            }
        }
    }

    #[test]
    fn star_follows_the_negated_centre() {
        let sys = toy_system();
        let req =
            SimulationRequest::new(&sys, "A", &["SUN", "A"], 0.5, 1, Dimensionality::TwoD).unwrap();
        let table = FrameTable::build(&sys, &req);
        let grid = SampleGrid::for_orbits(&sys, req.bodies(), req.centre(), 1, table.len());
        let a = Trajectory::raw(&sys, 1, &grid, Dimensionality::TwoD);
        for (i, frame) in table.frames().iter().enumerate() {
            assert_eq!(frame.positions()[0], Point::from(-a.positions[i].coords));
            assert_relative_eq!(frame.angles()[0], 0.0);
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let cat = Catalogue::load();
        let sys = cat.system(StarSystemKind::Hd219134);
        let req = SimulationRequest::new(
            sys,
            "c",
            &["b", "d", "h"],
            3.0,
            2,
            Dimensionality::ThreeD,
        )
        .unwrap();
        assert_eq!(FrameTable::build(sys, &req), FrameTable::build(sys, &req));
    }

    #[test]
    fn padded_bounds() {
        let pts = [Point::new(-1.0, -2.0, 0.0), Point::new(1.0, 2.0, 0.0)];
        let b = Bounds::of(pts.iter()).unwrap().padded();
        assert_relative_eq!(b.min.x, -1.1);
        assert_relative_eq!(b.max.y, 2.2);
        assert_relative_eq!(b.min.z, -Bounds::FLAT_Z_PADDING);
        assert!(Bounds::of(std::iter::empty()).is_none());
    }

    #[test]
    fn paths_use_the_dense_grid() {
        let sys = toy_system();
        let req = SimulationRequest::new(&sys, "SUN", &["A", "B"], 1.0, 1, Dimensionality::TwoD)
            .unwrap();
        let paths = OrbitPaths::build(&sys, &req);
        assert_eq!(paths.paths().len(), 2);
        assert!(paths.paths().iter().all(|t| t.positions.len() == PATH_SAMPLES));
        let b = paths.bounds().unwrap();
        assert!(b.max.x > 2.0 && b.min.x < -2.0);
    }
}
