//! Tick-driven playback of a precomputed [`FrameTable`].
//!
//! The host owns the timer and calls [`AnimationDriver::tick`] at
//! [`FRAME_INTERVAL_MS`]. Everything expensive happens in
//! [`AnimationDriver::start`], so a tick is just a table lookup plus the
//! consumer callbacks.

use ephemeris::prelude::StarSystem;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    kepler::Point,
    request::SimulationRequest,
    sampler::{Frame, FrameTable, OrbitPaths, FRAME_INTERVAL_MS},
    AnimationComponent,
};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize)]
pub enum DriverState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Position within a run of `frame_count` frames
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct AnimationCursor {
    frame_index: usize,
    frame_count: usize,
    repeat: bool,
}

impl AnimationCursor {
    pub fn new(frame_count: usize, repeat: bool) -> Self {
        AnimationCursor {
            frame_index: 0,
            frame_count,
            repeat,
        }
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    /// Moves past the current frame.
    ///
    /// Returns false once a non-repeating run has nothing left to emit.
    pub fn advance(&mut self) -> bool {
        if self.frame_index + 1 < self.frame_count {
            self.frame_index += 1;
            true
        } else if self.repeat && self.frame_count > 0 {
            self.frame_index = 0;
            true
        } else {
            false
        }
    }
}

/// Cursor plus the Idle/Running/Paused state machine.
///
/// Shared by the orbit and spirograph drivers.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Playback {
    cursor: AnimationCursor,
    state: DriverState,
}

impl Playback {
    pub fn start(frame_count: usize, repeat: bool) -> Self {
        Playback {
            cursor: AnimationCursor::new(frame_count, repeat),
            state: if frame_count == 0 {
                DriverState::Idle
            } else {
                DriverState::Running
            },
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn cursor(&self) -> &AnimationCursor {
        &self.cursor
    }

    /// The frame to emit on this tick, if running. The cursor moves past it.
    pub fn next_frame(&mut self) -> Option<usize> {
        if self.state != DriverState::Running {
            return None;
        }
        let index = self.cursor.frame_index();
        if !self.cursor.advance() {
            self.state = DriverState::Idle;
        }
        Some(index)
    }

    pub fn pause(&mut self) -> bool {
        if self.state == DriverState::Running {
            self.state = DriverState::Paused;
            true
        } else {
            false
        }
    }

    pub fn resume(&mut self) -> bool {
        if self.state == DriverState::Paused {
            self.state = DriverState::Running;
            true
        } else {
            false
        }
    }
}

/// Receives everything a driver emits.
pub trait FrameConsumer {
    /// Called once when a driver starts, before any frame
    fn paths(&mut self, _paths: &OrbitPaths) {}

    fn render(&mut self, index: usize, frame: &Frame);

    /// Called after every `render` with the same frame's payload, in request order
    fn stats(&mut self, _angles: &[f64], _positions: &[Point]) {}
}

impl<C: FrameConsumer + ?Sized> FrameConsumer for &mut C {
    fn paths(&mut self, paths: &OrbitPaths) {
        (**self).paths(paths)
    }

    fn render(&mut self, index: usize, frame: &Frame) {
        (**self).render(index, frame)
    }

    fn stats(&mut self, angles: &[f64], positions: &[Point]) {
        (**self).stats(angles, positions)
    }
}

impl<A: FrameConsumer, B: FrameConsumer> FrameConsumer for (A, B) {
    fn paths(&mut self, paths: &OrbitPaths) {
        self.0.paths(paths);
        self.1.paths(paths);
    }

    fn render(&mut self, index: usize, frame: &Frame) {
        self.0.render(index, frame);
        self.1.render(index, frame);
    }

    fn stats(&mut self, angles: &[f64], positions: &[Point]) {
        self.0.stats(angles, positions);
        self.1.stats(angles, positions);
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DriverOptions {
    /// Wrap to frame 0 after the last frame instead of going idle
    pub repeat: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        DriverOptions { repeat: true }
    }
}

pub struct AnimationDriver<C> {
    request: SimulationRequest,
    table: FrameTable,
    playback: Playback,
    consumer: C,
}

impl<C: FrameConsumer> AnimationDriver<C> {
    /// Samples the whole run up front and enters Running.
    ///
    /// `request` must have been built against `system`.
    pub fn start(
        system: &StarSystem,
        request: SimulationRequest,
        options: DriverOptions,
        mut consumer: C,
    ) -> Self {
        debug_assert_eq!(system.kind(), request.star_system());

        let table = FrameTable::build(system, &request);
        consumer.paths(&OrbitPaths::build(system, &request));

        info!(
            system = %request.star_system(),
            centre = %system.body(request.centre()),
            bodies = request.bodies().len(),
            frames = table.len(),
            view = %request.dims(),
            repeat = options.repeat,
            "Starting orbit animation"
        );

        let playback = Playback::start(table.len(), options.repeat);
        AnimationDriver {
            request,
            table,
            playback,
            consumer,
        }
    }

    pub fn tick(&mut self) {
        let Some(index) = self.playback.next_frame() else {
            return;
        };

        let frame = self.table.frame(index);
        self.consumer.render(index, frame);
        self.consumer.stats(frame.angles(), frame.positions());

        if self.playback.state() == DriverState::Idle {
            debug!(frames = self.table.len(), "Orbit animation complete");
        }
    }

    pub fn pause(&mut self) {
        if self.playback.pause() {
            debug!(frame = self.playback.cursor().frame_index(), "Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.playback.resume() {
            debug!(frame = self.playback.cursor().frame_index(), "Resumed");
        }
    }

    /// Drops the frame table and hands the consumer back.
    pub fn stop(self) -> C {
        info!(
            frame = self.playback.cursor().frame_index(),
            "Stopping orbit animation"
        );
        self.consumer
    }

    pub fn state(&self) -> DriverState {
        self.playback.state()
    }

    pub fn cursor(&self) -> &AnimationCursor {
        self.playback.cursor()
    }

    pub fn request(&self) -> &SimulationRequest {
        &self.request
    }

    pub fn frame_table(&self) -> &FrameTable {
        &self.table
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }
}

impl<C: FrameConsumer> AnimationComponent for AnimationDriver<C> {
    fn tick_interval(&self) -> Duration {
        Duration::from_millis(FRAME_INTERVAL_MS)
    }

    fn state(&self) -> DriverState {
        AnimationDriver::state(self)
    }

    fn tick(&mut self) {
        AnimationDriver::tick(self)
    }

    fn pause(&mut self) {
        AnimationDriver::pause(self)
    }

    fn resume(&mut self) {
        AnimationDriver::resume(self)
    }
}

/// Owns at most one driver.
///
/// Applying new settings stops the old driver before the new one exists,
/// so two drivers never tick at once.
pub struct Player<C> {
    current: Option<AnimationDriver<C>>,
}

impl<C> Default for Player<C> {
    fn default() -> Self {
        Player { current: None }
    }
}

impl<C: FrameConsumer> Player<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the running driver, returning the previous driver's consumer.
    pub fn apply(
        &mut self,
        system: &StarSystem,
        request: SimulationRequest,
        options: DriverOptions,
        consumer: C,
    ) -> Option<C> {
        let previous = self.stop();
        self.current = Some(AnimationDriver::start(system, request, options, consumer));
        previous
    }

    pub fn stop(&mut self) -> Option<C> {
        self.current.take().map(AnimationDriver::stop)
    }

    pub fn driver(&self) -> Option<&AnimationDriver<C>> {
        self.current.as_ref()
    }

    pub fn driver_mut(&mut self) -> Option<&mut AnimationDriver<C>> {
        self.current.as_mut()
    }

    pub fn tick(&mut self) {
        if let Some(d) = self.current.as_mut() {
            d.tick();
        }
    }

    pub fn state(&self) -> DriverState {
        self.current
            .as_ref()
            .map(AnimationDriver::state)
            .unwrap_or_default()
    }
}
