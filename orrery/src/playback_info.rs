use serde::Serialize;
use std::time::{Duration, Instant};

use crate::units::Time;

/// Counters for a host loop driving an [`AnimationComponent`](crate::AnimationComponent)
#[derive(Debug, Clone)]
pub struct PlaybackInfo {
    pub tick: u64,
    /// Ticks that were due but ran late
    pub late_ticks: u64,
    pub playback_time: Time,
    pub real_time_start: Instant,
    pub real_time: Duration,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackInfo {
    pub fn new() -> Self {
        PlaybackInfo {
            tick: 0,
            late_ticks: 0,
            playback_time: Time::from_secs(0.0),
            real_time_start: Instant::now(),
            real_time: Duration::ZERO,
        }
    }

    pub fn step(&mut self, interval: Duration, late: bool) {
        self.tick += 1;
        if late {
            self.late_ticks += 1;
        }
        self.playback_time = Time::from_secs(self.playback_time.as_secs() + interval.as_secs_f64());
        self.real_time = Instant::now().duration_since(self.real_time_start);
    }

    pub fn summary(&self) -> PlaybackSummary {
        PlaybackSummary {
            ticks: self.tick,
            late_ticks: self.late_ticks,
            playback_time: self.playback_time,
            real_time: self.real_time.as_secs_f64(),
        }
    }
}

/// Serializable snapshot of [`PlaybackInfo`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaybackSummary {
    pub ticks: u64,
    pub late_ticks: u64,
    pub playback_time: Time,
    /// [s]
    pub real_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn counts_ticks_and_playback_time() {
        let mut info = PlaybackInfo::new();
        info.step(Duration::from_millis(20), false);
        info.step(Duration::from_millis(20), true);
        let s = info.summary();
        assert_eq!(s.ticks, 2);
        assert_eq!(s.late_ticks, 1);
        assert_relative_eq!(s.playback_time.as_millis(), 40.0, epsilon = 1e-9);
    }
}
