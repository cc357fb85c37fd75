use std::time::Instant;

/// Process-relative elapsed time plus a monotonically increasing frame
/// counter. The start instant is captured once and never reset.
pub struct FrameClock {
    start: Instant,
    frames: u32,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            frames: 0,
        }
    }

    /// Seconds since `start()` as a real number. `Duration` already
    /// normalizes the nanosecond remainder across second boundaries.
    pub fn elapsed(&self) -> f64 {
        let elapsed = self.start.elapsed();
        elapsed.as_secs() as f64 + f64::from(elapsed.subsec_nanos()) / 1_000_000_000.0
    }

    /// Pre-incrementing frame counter: the first rendered frame reports 1.
    pub fn tick(&mut self) -> u32 {
        self.frames += 1;
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_starts_at_one_and_increments() {
        let mut clock = FrameClock::start();
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.tick(), 3);
    }

    #[test]
    fn elapsed_is_non_negative_and_non_decreasing() {
        let clock = FrameClock::start();
        let first = clock.elapsed();
        let second = clock.elapsed();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
