//! Game clock
//!
//! Tracks gameplay time in milliseconds. The playback rate scales how far
//! gameplay time moves per unit of real time and doubles as the speed factor
//! applied to line visibility windows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameClock {
    /// Current gameplay time (ms)
    pub current_time: f64,
    rate: f64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            rate: 1.0,
        }
    }
}

impl GameClock {
    pub fn new(start_time: f64) -> Self {
        Self {
            current_time: start_time,
            ..Self::default()
        }
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Set playback rate; negative or non-finite rates stop the clock
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
    }

    /// Advance by `elapsed` ms of real time. Never moves backwards.
    pub fn advance(&mut self, elapsed: f64) {
        if elapsed > 0.0 {
            self.current_time += elapsed * self.rate;
        }
    }

    pub fn seek(&mut self, time: f64) {
        self.current_time = time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales_by_rate() {
        let mut clock = GameClock::new(100.0);
        clock.advance(50.0);
        assert_eq!(clock.current_time, 150.0);

        clock.set_rate(1.5);
        clock.advance(100.0);
        assert_eq!(clock.current_time, 300.0);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = GameClock::default();
        clock.advance(-10.0);
        assert_eq!(clock.current_time, 0.0);

        clock.set_rate(-2.0);
        assert_eq!(clock.rate(), 0.0);
        clock.set_rate(f64::NAN);
        assert_eq!(clock.rate(), 0.0);
        clock.advance(100.0);
        assert_eq!(clock.current_time, 0.0);
    }
}
