//! Frame timing and delta time.
//!
//! [`Time`] is stepped once at the start of each frame by the app.

use std::time::{Duration, Instant};

/// Frame clock.
#[derive(Clone, Copy)]
pub struct Time {
    /// When the app started.
    startup: Instant,
    /// When the current frame started.
    frame_start: Instant,
    /// Duration of the previous frame.
    delta: Duration,
    /// Total time since app startup.
    elapsed: Duration,
    frame_count: u64,
}

impl Time {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            startup: now,
            frame_start: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Call at the start of each frame to update timing.
    pub fn update(&mut self) {
        self.advance_to(Instant::now());
    }

    fn advance_to(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.frame_start);
        self.frame_start = now;
        self.elapsed = now.saturating_duration_since(self.startup);
        self.frame_count += 1;
    }

    /// Restart the frame clock without counting a frame, so the first real
    /// frame after a stall (window creation, font loading) sees a small delta.
    pub fn reset_frame(&mut self) {
        self.frame_start = Instant::now();
        self.delta = Duration::ZERO;
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Delta time in seconds (f32), the most common way to use it.
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Number of frames stepped so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_measures_delta_and_elapsed() {
        let start = Instant::now();
        let mut time = Time::starting_at(start);
        time.advance_to(start + Duration::from_millis(20));
        time.advance_to(start + Duration::from_millis(50));

        assert_eq!(time.delta(), Duration::from_millis(30));
        assert_eq!(time.elapsed(), Duration::from_millis(50));
        assert_eq!(time.frame_count(), 2);
        assert!((time.elapsed_secs() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn fresh_clock_has_no_delta() {
        let time = Time::new();
        assert_eq!(time.delta_secs(), 0.0);
        assert_eq!(time.frame_count(), 0);
    }
}
