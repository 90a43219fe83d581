//! Slide path geometry
//!
//! A slide path is a polyline in screen space. Progress along it is measured
//! by distance, so `position_at(0.5)` is the halfway point by length.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::INTERSECT_DISTANCE;
use crate::lane::{LaneLayout, RotationDirection};
use crate::{normalize_degrees, ring_position};

/// Degrees of ring covered by each sampled segment of a ring path
const RING_SAMPLE_STEP: f32 = 5.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlidePath {
    points: Vec<Vec2>,
    /// Distance from the first point to each point
    cumulative: Vec<f32>,
}

impl SlidePath {
    pub fn from_points(points: Vec<Vec2>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                total += point.distance(points[i - 1]);
            }
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    /// Straight line between the judgement points of two lanes
    pub fn straight(layout: &LaneLayout, start_lane: u32, end_lane: u32) -> Self {
        Self::from_points(vec![
            layout.lane_position(start_lane, INTERSECT_DISTANCE),
            layout.lane_position(end_lane, INTERSECT_DISTANCE),
        ])
    }

    /// Path following the ring from one lane to another. Ending on the
    /// starting lane goes all the way round.
    pub fn around_ring(
        layout: &LaneLayout,
        start_lane: u32,
        end_lane: u32,
        direction: RotationDirection,
    ) -> Self {
        let steps = match direction {
            RotationDirection::Clockwise => layout.forward(start_lane, end_lane),
            RotationDirection::CounterClockwise => layout.backward(start_lane, end_lane),
        };
        let steps = if steps == 0 { layout.lane_count } else { steps };

        let span = steps as f32 * layout.step();
        let samples = (span / RING_SAMPLE_STEP).ceil().max(1.0) as usize;
        let start = layout.angle_for(start_lane);

        let points = (0..=samples)
            .map(|i| {
                let angle = start + direction.sign() * span * i as f32 / samples as f32;
                ring_position(angle, INTERSECT_DISTANCE)
            })
            .collect();
        Self::from_points(points)
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Total path length
    pub fn distance(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at a fraction of the path's length, clamped to [0, 1]
    pub fn position_at(&self, progress: f64) -> Vec2 {
        let Some((index, t)) = self.locate(progress) else {
            return Vec2::ZERO;
        };
        if index + 1 >= self.points.len() {
            return self.points[index];
        }
        self.points[index].lerp(self.points[index + 1], t)
    }

    /// Heading of the path at `progress` (degrees, clockwise from up)
    pub fn angle_at(&self, progress: f64) -> f32 {
        let Some((index, _)) = self.locate(progress) else {
            return 0.0;
        };
        let segment = if index + 1 < self.points.len() {
            index
        } else if index > 0 {
            index - 1
        } else {
            return 0.0;
        };
        let dir = self.points[segment + 1] - self.points[segment];
        normalize_degrees(dir.x.atan2(-dir.y).to_degrees())
    }

    /// Segment index and fraction within it for a progress value
    fn locate(&self, progress: f64) -> Option<(usize, f32)> {
        if self.points.is_empty() {
            return None;
        }
        let total = self.distance();
        if total <= 0.0 {
            return Some((0, 0.0));
        }
        let target = progress.clamp(0.0, 1.0) as f32 * total;
        let index = self
            .cumulative
            .partition_point(|&d| d <= target)
            .saturating_sub(1)
            .min(self.points.len() - 1);
        if index + 1 >= self.points.len() {
            return Some((index, 0.0));
        }
        let seg_len = self.cumulative[index + 1] - self.cumulative[index];
        let t = if seg_len > 0.0 {
            (target - self.cumulative[index]) / seg_len
        } else {
            0.0
        };
        Some((index, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_polyline_distance() {
        let path = SlidePath::from_points(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(30.0, 40.0),
        ]);
        assert_eq!(path.distance(), 70.0);
        assert!((path.position_at(0.5) - Vec2::new(30.0, 5.0)).length() < 0.001);
        assert_eq!(path.position_at(2.0), Vec2::new(30.0, 40.0));
        assert_eq!(path.position_at(-1.0), Vec2::ZERO);
    }

    #[test]
    fn test_angle_follows_segments() {
        let path = SlidePath::from_points(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        ]);
        // Heading right, then down the screen
        assert!((path.angle_at(0.25) - 90.0).abs() < 0.001);
        assert!((path.angle_at(0.75) - 180.0).abs() < 0.001);
        assert!((path.angle_at(1.0) - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_degenerate_paths() {
        let empty = SlidePath::default();
        assert_eq!(empty.distance(), 0.0);
        assert_eq!(empty.position_at(0.5), Vec2::ZERO);

        let point = SlidePath::from_points(vec![Vec2::new(3.0, 4.0)]);
        assert_eq!(point.distance(), 0.0);
        assert_eq!(point.position_at(0.7), Vec2::new(3.0, 4.0));
        assert_eq!(point.angle_at(0.7), 0.0);
    }

    #[test]
    fn test_straight_across_ring() {
        let layout = LaneLayout::default();
        let path = SlidePath::straight(&layout, 0, 4);
        assert!((path.distance() - 2.0 * INTERSECT_DISTANCE).abs() < 0.01);
        assert!(path.position_at(0.5).length() < 0.01);
    }

    #[test]
    fn test_around_ring_lengths() {
        let layout = LaneLayout::default();
        let quarter = SlidePath::around_ring(&layout, 0, 2, RotationDirection::Clockwise);
        let expected = INTERSECT_DISTANCE * PI / 2.0;
        assert!((quarter.distance() - expected).abs() / expected < 0.01);

        let other_way =
            SlidePath::around_ring(&layout, 0, 2, RotationDirection::CounterClockwise);
        assert!((other_way.distance() - 3.0 * expected).abs() / expected < 0.03);

        let full = SlidePath::around_ring(&layout, 3, 3, RotationDirection::Clockwise);
        assert!((full.distance() - 4.0 * expected).abs() / expected < 0.04);
        assert!((full.position_at(1.0) - full.position_at(0.0)).length() < 0.01);
    }
}
