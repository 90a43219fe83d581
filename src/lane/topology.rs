//! Lane topology on the ring
//!
//! Lanes are integers in `[0, N)` arranged clockwise around the ring, with
//! lane `N-1` adjacent to lane `0`. Every function here takes the lane count
//! explicitly; [`LaneLayout`] bundles it with the angular offset of lane 0.
//!
//! Lanes outside `[0, N)` are a caller bug and panic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LANE_BASE_OFFSET, LANE_COUNT};
use crate::ring_position;

/// Direction of travel around the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// +1 for clockwise, -1 for counter-clockwise
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            RotationDirection::Clockwise => 1.0,
            RotationDirection::CounterClockwise => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

#[inline]
fn check_lane(lane: u32, lane_count: u32) {
    assert!(lane_count > 0, "lane count must be positive");
    assert!(
        lane < lane_count,
        "lane {lane} out of range for {lane_count} lanes"
    );
}

/// Orientation of a lane in degrees (clockwise from 12 o'clock)
#[inline]
pub fn angle_for_lane(lane: u32, lane_count: u32, base_offset: f32) -> f32 {
    check_lane(lane, lane_count);
    base_offset + lane as f32 * (360.0 / lane_count as f32)
}

/// Steps travelling clockwise from `a` to `b`
#[inline]
pub fn forward_distance(a: u32, b: u32, lane_count: u32) -> u32 {
    check_lane(a, lane_count);
    check_lane(b, lane_count);
    (b + lane_count - a) % lane_count
}

/// Steps travelling counter-clockwise from `a` to `b`
#[inline]
pub fn backward_distance(a: u32, b: u32, lane_count: u32) -> u32 {
    check_lane(a, lane_count);
    check_lane(b, lane_count);
    (a + lane_count - b) % lane_count
}

/// Lane count plus the angle of lane 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    pub lane_count: u32,
    /// Angle of lane 0 (degrees)
    pub base_offset: f32,
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            base_offset: LANE_BASE_OFFSET,
        }
    }
}

impl LaneLayout {
    pub fn new(lane_count: u32, base_offset: f32) -> Self {
        assert!(lane_count > 0, "lane count must be positive");
        Self {
            lane_count,
            base_offset,
        }
    }

    /// Angle between neighbouring lanes (45° for 8 lanes)
    #[inline]
    pub fn step(&self) -> f32 {
        360.0 / self.lane_count as f32
    }

    /// Rotation applied per lane of line delta (22.5° for 8 lanes)
    #[inline]
    pub fn half_step(&self) -> f32 {
        self.step() / 2.0
    }

    #[inline]
    pub fn angle_for(&self, lane: u32) -> f32 {
        angle_for_lane(lane, self.lane_count, self.base_offset)
    }

    #[inline]
    pub fn forward(&self, a: u32, b: u32) -> u32 {
        forward_distance(a, b, self.lane_count)
    }

    #[inline]
    pub fn backward(&self, a: u32, b: u32) -> u32 {
        backward_distance(a, b, self.lane_count)
    }

    /// Lane reached after moving `steps` lanes in `direction`
    pub fn offset(&self, lane: u32, steps: u32, direction: RotationDirection) -> u32 {
        check_lane(lane, self.lane_count);
        let steps = steps % self.lane_count;
        match direction {
            RotationDirection::Clockwise => (lane + steps) % self.lane_count,
            RotationDirection::CounterClockwise => {
                (lane + self.lane_count - steps) % self.lane_count
            }
        }
    }

    /// All lane angles in lane order
    pub fn lane_angles(&self) -> Vec<f32> {
        (0..self.lane_count).map(|lane| self.angle_for(lane)).collect()
    }

    /// Screen offset of a lane at `distance` from the ring centre
    pub fn lane_position(&self, lane: u32, distance: f32) -> Vec2 {
        ring_position(self.angle_for(lane), distance)
    }
}
