//! Frame pacing for hosts that drive [`Orchestrator::on_frame`] themselves.
//!
//! [`Orchestrator::on_frame`]: crate::engine::Orchestrator::on_frame

use web_time::{Duration, Instant};

/// Fixed-rate frame pacer with a smoothed rate estimate.
pub struct FrameTiming {
    /// 0 = unpaced
    target_fps: u32,
    frame_budget: Duration,
    last_frame: Instant,
    smoothed_fps: f32,
    /// Weight of the newest sample in the moving average.
    smoothing: f32,
    frames: u64,
}

impl FrameTiming {
    /// Pacer targeting `target_fps` frames per second (0 = unpaced).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let frame_budget = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };
        Self {
            target_fps,
            frame_budget,
            last_frame: Instant::now(),
            smoothed_fps: target_fps.max(1) as f32,
            smoothing: 0.05,
            frames: 0,
        }
    }

    /// Time left before the next frame is due.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        if self.target_fps == 0 {
            return Duration::ZERO;
        }
        self.frame_budget.saturating_sub(self.last_frame.elapsed())
    }

    /// Block the calling thread until the next frame is due.
    pub fn wait_for_frame(&self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }

    /// Record the end of a frame.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frames += 1;
        if frame_time > 0.0 {
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + self.smoothing / frame_time;
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Frames recorded by [`end_frame`](Self::end_frame).
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaced_timer_never_waits() {
        let mut timing = FrameTiming::new(0);
        assert_eq!(timing.remaining(), Duration::ZERO);
        timing.end_frame();
        timing.end_frame();
        assert_eq!(timing.frames(), 2);
    }

    #[test]
    fn paced_timer_budget_never_exceeds_one_frame() {
        let timing = FrameTiming::new(60);
        assert!(timing.remaining() <= Duration::from_secs_f64(1.0 / 60.0));
    }
}
