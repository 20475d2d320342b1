//! Wall-clock frame deltas for driving playback.

use web_time::{Duration, Instant};

/// Longest delta handed to the animator; a stalled frame (window dragged,
/// tab hidden) must not jump the fold to its end.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Frame timing with smoothed FPS.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Timer starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Restart the clock so the next delta does not include an idle gap.
    pub fn restart(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Mark the end of a frame and return the clamped time since the
    /// previous one.
    pub fn end_frame(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed.min(MAX_FRAME_DELTA)
    }

    /// Current FPS (smoothed).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_clamped() {
        let mut timing = FrameTiming::new();
        timing.last_frame = Instant::now() - Duration::from_secs(5);
        assert_eq!(timing.end_frame(), MAX_FRAME_DELTA);
    }

    #[test]
    fn fps_moves_toward_frame_rate() {
        let mut timing = FrameTiming::new();
        timing.last_frame = Instant::now() - Duration::from_millis(50);
        let _ = timing.end_frame();
        assert!(timing.fps() < 60.0);
    }
}
