//! Frame clock
//!
//! Measures wall time between frames so a host can pace a fixed-step loop.
//! The simulation itself never reads the clock; it is handed `elapsed`.

use std::time::{Duration, Instant};

/// Wall-clock frame timer
#[derive(Debug, Clone)]
pub struct Timer {
    started: Instant,
    frame_start: Instant,
    last_delta: f32,
    frames: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Start the clock
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            frame_start: now,
            last_delta: 0.0,
            frames: 0,
        }
    }

    /// Mark the start of a frame
    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_delta = now.duration_since(self.frame_start).as_secs_f32();
        self.frame_start = now;
        self.frames += 1;
    }

    /// Seconds between the last two frame starts
    pub fn delta_time(&self) -> f32 {
        self.last_delta
    }

    /// Seconds since the clock started
    pub fn total_time(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Frames started so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Frames per second over the whole run
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        let total = self.total_time();
        if total > 0.0 {
            self.frames as f32 / total
        } else {
            0.0
        }
    }

    /// Time left in the current frame before `target_seconds` is reached.
    ///
    /// `None` once the frame has used its budget.
    pub fn remaining_in_frame(&self, target_seconds: f32) -> Option<Duration> {
        let used = self.frame_start.elapsed().as_secs_f32();
        (used < target_seconds).then(|| Duration::from_secs_f32(target_seconds - used))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.delta_time() >= 0.0);
    }

    #[test]
    fn test_no_slack_without_budget() {
        let timer = Timer::new();
        assert!(timer.remaining_in_frame(0.0).is_none());
        assert!(timer.remaining_in_frame(60.0).is_some());
    }
}
