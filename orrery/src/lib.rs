pub extern crate nalgebra as na;

pub mod driver;
pub mod kepler;
pub mod palette;
pub mod playback_info;
pub mod request;
pub mod sampler;
pub mod settings;
pub mod spirograph;
pub mod stats;
pub mod ticker;
pub mod units;

use driver::DriverState;
use std::time::Duration;

/// Something the host steps once per tick of its timer.
pub trait AnimationComponent {
    /// Wall-clock time the host should wait between ticks
    fn tick_interval(&self) -> Duration;

    fn state(&self) -> DriverState;

    /// Emits at most one frame. A no-op unless running.
    fn tick(&mut self);

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn is_finished(&self) -> bool {
        self.state() == DriverState::Idle
    }
}
