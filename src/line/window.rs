//! Time window during which a line is on screen
//!
//! A line fades in `animation_duration * speed_factor` before its notes
//! reach the ring and disappears as they arrive. Both inputs may change at
//! any time; the window is recomputed immediately on every change.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_ANIMATION_DURATION;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityWindow {
    start_time: f64,
    animation_duration: f64,
    speed_factor: f64,
    window_start: f64,
    window_end: f64,
}

impl VisibilityWindow {
    pub fn new(start_time: f64, animation_duration: f64, speed_factor: f64) -> Self {
        let mut window = Self {
            start_time,
            animation_duration,
            speed_factor,
            window_start: start_time,
            window_end: start_time,
        };
        window.refresh();
        window
    }

    /// Window with the default animation duration at normal speed
    pub fn at(start_time: f64) -> Self {
        Self::new(start_time, DEFAULT_ANIMATION_DURATION, 1.0)
    }

    #[inline]
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    #[inline]
    pub fn animation_duration(&self) -> f64 {
        self.animation_duration
    }

    #[inline]
    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    #[inline]
    pub fn window_start(&self) -> f64 {
        self.window_start
    }

    #[inline]
    pub fn window_end(&self) -> f64 {
        self.window_end
    }

    /// Approach time after speed adjustment, never negative or NaN
    pub fn effective_duration(&self) -> f64 {
        let duration = self.animation_duration * self.speed_factor;
        if duration.is_finite() { duration.max(0.0) } else { 0.0 }
    }

    pub fn set_animation_duration(&mut self, animation_duration: f64) {
        self.animation_duration = animation_duration;
        self.refresh();
    }

    pub fn set_speed_factor(&mut self, speed_factor: f64) {
        self.speed_factor = speed_factor;
        self.refresh();
    }

    /// True while `time` lies in `[window_start, window_end]`
    pub fn is_live(&self, time: f64) -> bool {
        time >= self.window_start && time <= self.window_end
    }

    /// True once `time` has passed the end of the window
    pub fn has_expired(&self, time: f64) -> bool {
        time > self.window_end
    }

    fn refresh(&mut self) {
        self.window_start = self.start_time - self.effective_duration();
        self.window_end = self.start_time;
        log::debug!(
            "line window at {} -> [{}, {}]",
            self.start_time,
            self.window_start,
            self.window_end
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_window_scaled_by_speed() {
        let mut window = VisibilityWindow::new(1000.0, 500.0, 2.0);
        assert_eq!(window.window_start(), 0.0);
        assert_eq!(window.window_end(), 1000.0);

        window.set_speed_factor(0.0);
        assert_eq!(window.window_start(), 1000.0);
        assert_eq!(window.window_end(), 1000.0);
        assert!(window.is_live(1000.0));
        assert!(!window.is_live(999.0));
    }

    #[test]
    fn test_duration_change_recomputes() {
        let mut window = VisibilityWindow::at(2000.0);
        assert_eq!(window.window_start(), 1000.0);

        window.set_animation_duration(250.0);
        assert_eq!(window.window_start(), 1750.0);
        assert_eq!(window.animation_duration(), 250.0);
    }

    #[test]
    fn test_degenerate_inputs_collapse() {
        let window = VisibilityWindow::new(500.0, 1000.0, -1.0);
        assert_eq!(window.window_start(), 500.0);

        let window = VisibilityWindow::new(500.0, f64::NAN, 1.0);
        assert_eq!(window.window_start(), 500.0);
        assert_eq!(window.effective_duration(), 0.0);

        let window = VisibilityWindow::new(500.0, f64::INFINITY, 0.0);
        assert_eq!(window.window_start(), 500.0);
    }

    #[test]
    fn test_expiry_is_after_window_end() {
        let window = VisibilityWindow::at(1000.0);
        assert!(!window.has_expired(1000.0));
        assert!(window.has_expired(1000.001));
        assert!(!window.is_live(-0.5));
    }

    proptest! {
        #[test]
        fn prop_window_never_inverted(
            start in -10_000.0f64..10_000.0,
            duration in -5_000.0f64..5_000.0,
            speed in -4.0f64..4.0,
        ) {
            let window = VisibilityWindow::new(start, duration, speed);
            prop_assert!(window.window_start() <= window.window_end());
            prop_assert_eq!(window.window_end(), start);
            prop_assert!(window.is_live(start));
        }
    }
}
