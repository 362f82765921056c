//! Chords between two bodies sampled on a shared time grid.
//!
//! Each body moves on its own ellipse around the star. Nothing is
//! recentred and the drawing is always planar.

use ephemeris::prelude::{BodyIndex, OrbitalElements, StarSystem, StarSystemKind};
use serde::{Deserialize, Serialize};
use std::{f64::consts::TAU, str::FromStr, time::Duration};
use tracing::{debug, info};

use crate::{
    driver::{AnimationCursor, DriverOptions, DriverState, Playback},
    kepler::{body_position, Dimensionality, Point},
    request::RequestError,
    sampler::{Bounds, SampleGrid, Trajectory, MAX_FRAMES},
    AnimationComponent,
};

pub const LINES_PER_ORBIT: usize = 70;

/// Samples per drawn ellipse
pub const ELLIPSE_SAMPLES: usize = 1000;

/// Delay between consecutive chords
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiroSpeed {
    Slow,
    Medium,
    #[default]
    Fast,
}

impl SpiroSpeed {
    pub const fn interval(self) -> Duration {
        match self {
            SpiroSpeed::Slow => Duration::from_millis(100),
            SpiroSpeed::Medium => Duration::from_millis(40),
            SpiroSpeed::Fast => Duration::from_millis(10),
        }
    }
}

impl std::fmt::Display for SpiroSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SpiroSpeed::Slow => "slow",
            SpiroSpeed::Medium => "medium",
            SpiroSpeed::Fast => "fast",
        })
    }
}

impl FromStr for SpiroSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "slow" => SpiroSpeed::Slow,
            "medium" => SpiroSpeed::Medium,
            "fast" => SpiroSpeed::Fast,
            _ => return Err(format!("Bad speed '{s}', expected slow, medium or fast")),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpiroRequest {
    star_system: StarSystemKind,
    first: BodyIndex,
    second: BodyIndex,
    orbit_count: u32,
    speed: SpiroSpeed,
}

impl SpiroRequest {
    pub fn new(
        system: &StarSystem,
        first: &str,
        second: &str,
        orbit_count: u32,
        speed: SpiroSpeed,
    ) -> Result<Self, RequestError> {
        let a = system.lookup(first)?;
        let b = system.lookup(second)?;
        for body in [a, b] {
            if body.is_central() {
                return Err(RequestError::CentralBody(body.name.to_string()));
            }
        }
        if a.index == b.index {
            return Err(RequestError::SameBody(a.name.to_string()));
        }
        if orbit_count == 0 {
            return Err(RequestError::NoOrbits);
        }
        if orbit_count as usize > MAX_FRAMES / LINES_PER_ORBIT {
            return Err(RequestError::TooManyLines {
                orbit_count,
                max: MAX_FRAMES,
            });
        }
        Ok(SpiroRequest {
            star_system: system.kind(),
            first: a.index,
            second: b.index,
            orbit_count,
            speed,
        })
    }

    pub fn star_system(&self) -> StarSystemKind {
        self.star_system
    }

    pub fn first(&self) -> BodyIndex {
        self.first
    }

    pub fn second(&self) -> BodyIndex {
        self.second
    }

    /// Orbits of the slower body
    pub fn orbit_count(&self) -> u32 {
        self.orbit_count
    }

    pub fn speed(&self) -> SpiroSpeed {
        self.speed
    }

    pub fn line_count(&self) -> usize {
        self.orbit_count as usize * LINES_PER_ORBIT
    }
}

/// Chord endpoints [AU], z always 0
#[derive(Copy, Clone, PartialEq, Debug, Serialize)]
pub struct PointPair {
    pub first: Point,
    pub second: Point,
}

/// `line_count` chords over `orbit_count` orbits of the slower body.
pub fn sample_pairs(
    system: &StarSystem,
    first: BodyIndex,
    second: BodyIndex,
    orbit_count: u32,
    line_count: usize,
) -> Vec<PointPair> {
    let grid = SampleGrid::for_orbits(
        system,
        &[first, second],
        StarSystem::SUN,
        orbit_count,
        line_count,
    );
    let a = Trajectory::raw(system, first, &grid, Dimensionality::TwoD);
    let b = Trajectory::raw(system, second, &grid, Dimensionality::TwoD);
    a.positions
        .into_iter()
        .zip(b.positions)
        .map(|(first, second)| PointPair { first, second })
        .collect()
}

/// One full revolution of `elements`, for drawing the orbit itself
pub fn ellipse(elements: &OrbitalElements) -> Vec<Point> {
    (0..ELLIPSE_SAMPLES)
        .map(|i| TAU * i as f64 / (ELLIPSE_SAMPLES - 1) as f64)
        .map(|theta| body_position(theta, elements, Dimensionality::TwoD))
        .collect()
}

/// View extents of a drawing, x and y padded by 1/20 of their span
pub fn bounds(pairs: &[PointPair]) -> Option<Bounds> {
    Bounds::of(pairs.iter().flat_map(|p| [&p.first, &p.second])).map(|b| b.padded())
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct SpiroProgress {
    pub completed_orbits: usize,
    pub line_index: usize,
}

impl SpiroProgress {
    pub fn from_line(line_index: usize) -> Self {
        SpiroProgress {
            completed_orbits: line_index / LINES_PER_ORBIT,
            line_index,
        }
    }
}

pub trait SpiroConsumer {
    /// Called once at start with both bodies' full orbits
    fn ellipses(&mut self, _first: &[Point], _second: &[Point]) {}

    fn line(&mut self, index: usize, pair: &PointPair);

    fn progress(&mut self, _progress: SpiroProgress) {}
}

impl<C: SpiroConsumer + ?Sized> SpiroConsumer for &mut C {
    fn ellipses(&mut self, first: &[Point], second: &[Point]) {
        (**self).ellipses(first, second)
    }

    fn line(&mut self, index: usize, pair: &PointPair) {
        (**self).line(index, pair)
    }

    fn progress(&mut self, progress: SpiroProgress) {
        (**self).progress(progress)
    }
}

/// Emits one chord per tick. Chords stay drawn, so a repeating run redraws
/// over the same figure.
pub struct SpiroDriver<C> {
    request: SpiroRequest,
    pairs: Vec<PointPair>,
    playback: Playback,
    consumer: C,
}

impl<C: SpiroConsumer> SpiroDriver<C> {
    pub fn start(
        system: &StarSystem,
        request: SpiroRequest,
        options: DriverOptions,
        mut consumer: C,
    ) -> Self {
        debug_assert_eq!(system.kind(), request.star_system());

        let pairs = sample_pairs(
            system,
            request.first(),
            request.second(),
            request.orbit_count(),
            request.line_count(),
        );
        consumer.ellipses(
            &ellipse(system.elements(request.first())),
            &ellipse(system.elements(request.second())),
        );

        info!(
            first = %system.body(request.first()),
            second = %system.body(request.second()),
            lines = pairs.len(),
            speed = %request.speed(),
            "Starting spirograph"
        );

        let playback = Playback::start(pairs.len(), options.repeat);
        SpiroDriver {
            request,
            pairs,
            playback,
            consumer,
        }
    }

    pub fn tick(&mut self) {
        let Some(index) = self.playback.next_frame() else {
            return;
        };
        self.consumer.line(index, &self.pairs[index]);
        self.consumer.progress(SpiroProgress::from_line(index));

        if self.playback.state() == DriverState::Idle {
            debug!(lines = self.pairs.len(), "Spirograph complete");
        }
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn resume(&mut self) {
        self.playback.resume();
    }

    pub fn stop(self) -> C {
        info!(
            line = self.playback.cursor().frame_index(),
            "Stopping spirograph"
        );
        self.consumer
    }

    pub fn state(&self) -> DriverState {
        self.playback.state()
    }

    pub fn cursor(&self) -> &AnimationCursor {
        self.playback.cursor()
    }

    pub fn request(&self) -> &SpiroRequest {
        &self.request
    }

    pub fn pairs(&self) -> &[PointPair] {
        &self.pairs
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }
}

impl<C: SpiroConsumer> AnimationComponent for SpiroDriver<C> {
    fn tick_interval(&self) -> Duration {
        self.request.speed().interval()
    }

    fn state(&self) -> DriverState {
        SpiroDriver::state(self)
    }

    fn tick(&mut self) {
        SpiroDriver::tick(self)
    }

    fn pause(&mut self) {
        SpiroDriver::pause(self)
    }

    fn resume(&mut self) {
        SpiroDriver::resume(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kepler::radius;
    use approx::assert_relative_eq;
    use ephemeris::prelude::Catalogue;

    fn solar() -> StarSystem {
        Catalogue::load()
            .system(StarSystemKind::SolarSystem)
            .clone()
    }

    #[derive(Default)]
    struct Canvas {
        ellipse_lens: (usize, usize),
        lines: Vec<usize>,
        progress: Vec<SpiroProgress>,
    }

    impl SpiroConsumer for Canvas {
        fn ellipses(&mut self, first: &[Point], second: &[Point]) {
            self.ellipse_lens = (first.len(), second.len());
        }

        fn line(&mut self, index: usize, _pair: &PointPair) {
            self.lines.push(index);
        }

        fn progress(&mut self, progress: SpiroProgress) {
            self.progress.push(progress);
        }
    }

    #[test]
    fn one_orbit_gives_seventy_chords_on_independent_ellipses() {
        let sys = solar();
        let req = SpiroRequest::new(&sys, "Venus", "Earth", 1, SpiroSpeed::Fast).unwrap();
        assert_eq!(req.line_count(), LINES_PER_ORBIT);

        let pairs = sample_pairs(&sys, req.first(), req.second(), 1, req.line_count());
        assert_eq!(pairs.len(), 70);

        let grid = SampleGrid::for_orbits(&sys, &[req.first(), req.second()], 0, 1, 70);
        for (i, pair) in pairs.iter().enumerate() {
            assert_relative_eq!(pair.first.z, 0.0);
            assert_relative_eq!(pair.second.z, 0.0);
            for (body, p) in [(req.first(), pair.first), (req.second(), pair.second)] {
                let el = sys.elements(body);
                let theta = TAU * grid.time(i) / el.orbital_period_years;
                assert_relative_eq!(p.coords.norm(), radius(theta, el), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn grid_follows_the_slower_body() {
        let sys = solar();
        let earth = sys.lookup("Earth").unwrap().index;
        let mars = sys.lookup("Mars").unwrap().index;
        let pairs = sample_pairs(&sys, earth, mars, 2, 3);
        // The last chord lands on Mars' start point after two of its orbits
        let last = pairs[2].second;
        let start = pairs[0].second;
        assert_relative_eq!(last.x, start.x, epsilon = 1e-9);
        assert_relative_eq!(last.y, start.y, epsilon = 1e-9);
    }

    #[test]
    fn rejects_degenerate_pairs() {
        let sys = solar();
        assert_eq!(
            SpiroRequest::new(&sys, "Earth", "earth", 3, SpiroSpeed::Slow),
            Err(RequestError::SameBody("Earth".to_string()))
        );
        assert_eq!(
            SpiroRequest::new(&sys, "Sun", "Earth", 3, SpiroSpeed::Slow),
            Err(RequestError::CentralBody("Sun".to_string()))
        );
        assert_eq!(
            SpiroRequest::new(&sys, "Venus", "Earth", 0, SpiroSpeed::Slow),
            Err(RequestError::NoOrbits)
        );
        assert!(matches!(
            SpiroRequest::new(&sys, "Venus", "Earth", u32::MAX, SpiroSpeed::Slow),
            Err(RequestError::TooManyLines { .. })
        ));
    }

    #[test]
    fn progress_counts_completed_orbits() {
        assert_eq!(
            SpiroProgress::from_line(69),
            SpiroProgress {
                completed_orbits: 0,
                line_index: 69
            }
        );
        assert_eq!(SpiroProgress::from_line(70).completed_orbits, 1);
        assert_eq!(SpiroProgress::from_line(699).completed_orbits, 9);
    }

    #[test]
    fn driver_draws_each_chord_once() {
        let sys = solar();
        let req = SpiroRequest::new(&sys, "Venus", "Earth", 2, SpiroSpeed::Medium).unwrap();
        let mut d = SpiroDriver::start(&sys, req, DriverOptions { repeat: false }, Canvas::default());
        assert_eq!(d.tick_interval(), Duration::from_millis(40));
        assert_eq!(d.consumer().ellipse_lens, (ELLIPSE_SAMPLES, ELLIPSE_SAMPLES));

        for _ in 0..200 {
            d.tick();
        }
        assert!(d.is_finished());
        let canvas = d.stop();
        assert_eq!(canvas.lines, (0..140).collect::<Vec<_>>());
        assert_eq!(canvas.progress.last().map(|p| p.completed_orbits), Some(1));
    }

    #[test]
    fn ellipse_closes() {
        let sys = solar();
        let pts = ellipse(sys.elements(sys.lookup("Mercury").unwrap().index));
        let (first, last) = (pts[0], pts[ELLIPSE_SAMPLES - 1]);
        assert_relative_eq!(first.x, last.x, epsilon = 1e-9);
        assert_relative_eq!(first.y, last.y, epsilon = 1e-9);
    }

    #[test]
    fn speed_parse() {
        assert_eq!("Slow".parse::<SpiroSpeed>(), Ok(SpiroSpeed::Slow));
        assert_eq!(SpiroSpeed::default().interval(), Duration::from_millis(10));
        assert!("warp".parse::<SpiroSpeed>().is_err());
    }
}
