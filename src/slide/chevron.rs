//! Chevron markers along a slide path
//!
//! Each chevron sits at a fixed progress along its path. As the slide's
//! progress sweeps past a chevron it is hidden; rewinding shows it again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::chevron_count;
use super::path::SlidePath;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chevron {
    /// Fraction of the path, 0-1
    pub progress: f64,
    pub position: Vec2,
    /// Heading of the path at the chevron (degrees)
    pub angle: f32,
    /// 1 while ahead of the sweep, 0 once passed
    pub alpha: f32,
}

impl Chevron {
    pub fn new(progress: f64) -> Self {
        Self {
            progress,
            position: Vec2::ZERO,
            angle: 0.0,
            alpha: 1.0,
        }
    }

    /// Hide once the slide has reached this chevron
    #[inline]
    pub fn update_progress(&mut self, progress: f64) {
        self.alpha = if progress >= self.progress { 0.0 } else { 1.0 };
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

/// One chevron per spacing slot, centred in its slot
pub fn layout_chevrons(path: &SlidePath) -> Vec<Chevron> {
    let count = chevron_count(path.distance());
    (0..count)
        .map(|i| {
            let progress = (i as f64 + 0.5) / count as f64;
            Chevron {
                position: path.position_at(progress),
                angle: path.angle_at(progress),
                ..Chevron::new(progress)
            }
        })
        .collect()
}

/// Apply the current slide progress to every chevron
pub fn sweep(chevrons: &mut [Chevron], progress: f64) {
    for chevron in chevrons {
        chevron.update_progress(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_boundary_hides_inclusive() {
        let mut chevron = Chevron::new(0.4);
        chevron.update_progress(0.4);
        assert_eq!(chevron.alpha, 0.0);

        chevron.update_progress(0.39999);
        assert_eq!(chevron.alpha, 1.0);
        assert!(chevron.is_visible());
    }

    #[test]
    fn test_update_is_idempotent_and_reversible() {
        let mut chevron = Chevron::new(0.5);
        chevron.update_progress(0.8);
        chevron.update_progress(0.8);
        assert!(!chevron.is_visible());

        chevron.update_progress(0.1);
        assert!(chevron.is_visible());
    }

    #[test]
    fn test_layout_along_straight_path() {
        let path = SlidePath::from_points(vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]);
        let chevrons = layout_chevrons(&path);
        assert_eq!(chevrons.len(), 4);
        assert_eq!(chevrons[0].progress, 0.125);
        assert!((chevrons[0].position - Vec2::new(12.5, 0.0)).length() < 0.001);
        assert!(chevrons.iter().all(|c| (c.angle - 90.0).abs() < 0.001));
        assert!(chevrons.windows(2).all(|w| w[0].progress < w[1].progress));
    }

    #[test]
    fn test_chevrons_centred_in_slots() {
        let path = SlidePath::from_points(vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]);
        let progress: Vec<f64> = layout_chevrons(&path).iter().map(|c| c.progress).collect();
        assert_eq!(progress, vec![0.125, 0.375, 0.625, 0.875]);

        // No chevron sits on the start or the end of the path
        let path = SlidePath::from_points(vec![Vec2::ZERO, Vec2::new(30.0, 0.0)]);
        let progress: Vec<f64> = layout_chevrons(&path).iter().map(|c| c.progress).collect();
        assert_eq!(progress, vec![0.25, 0.75]);
    }

    #[test]
    fn test_sweep_hides_passed_chevrons() {
        let path = SlidePath::from_points(vec![Vec2::ZERO, Vec2::new(100.0, 0.0)]);
        let mut chevrons = layout_chevrons(&path);

        sweep(&mut chevrons, 0.5);
        let visible: Vec<bool> = chevrons.iter().map(Chevron::is_visible).collect();
        assert_eq!(visible, vec![false, false, true, true]);

        sweep(&mut chevrons, 1.0);
        assert!(chevrons.iter().all(|c| !c.is_visible()));
    }

    #[test]
    fn test_empty_path_has_no_chevrons() {
        assert!(layout_chevrons(&SlidePath::default()).is_empty());
    }
}
