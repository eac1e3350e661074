//! Frame timing

use std::time::Instant;

/// Frame timer
///
/// Measures wall-clock time between ticks, or reports a constant step when
/// built with [`fixed`](Self::fixed) so headless runs are reproducible.
#[derive(Debug)]
pub struct Timer {
    last_frame: Instant,
    fixed_delta: Option<f32>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Wall-clock timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_delta: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Timer advancing by exactly `delta_time` seconds per tick
    pub fn fixed(delta_time: f32) -> Self {
        Self {
            fixed_delta: Some(delta_time),
            ..Self::new()
        }
    }

    /// Start a new frame and return its delta time in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = match self.fixed_delta {
            Some(step) => step,
            None => now.duration_since(self.last_frame).as_secs_f32(),
        };
        self.last_frame = now;
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Delta time of the current frame
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Sum of all delta times so far
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second since creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_step() {
        let mut timer = Timer::fixed(0.25);
        assert_relative_eq!(timer.tick(), 0.25);
        assert_relative_eq!(timer.tick(), 0.25);

        assert_eq!(timer.frame_count(), 2);
        assert_relative_eq!(timer.total_time(), 0.5);
        assert_relative_eq!(timer.average_fps(), 4.0);
    }

    #[test]
    fn test_wall_clock_never_negative() {
        let mut timer = Timer::new();
        assert!(timer.tick() >= 0.0);
        assert!(timer.total_time() >= timer.delta_time());
    }
}
