//! Arc spans on the ring
//!
//! A line connector is painted as a thick arc band around the ring:
//! - radius: distance of the band's centreline from the ring centre
//! - thickness: radial extent of the band
//! - start, span: clockwise angular extent in degrees

use serde::{Deserialize, Serialize};

use crate::normalize_degrees;

/// A thickened arc band in ring space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingArc {
    /// Centreline radius from ring centre
    pub radius: f32,
    pub thickness: f32,
    /// Start angle (degrees, normalized to [0, 360))
    pub start: f32,
    /// Clockwise extent from `start` (degrees, clamped to [0, 360])
    pub span: f32,
}

impl RingArc {
    pub fn new(radius: f32, thickness: f32, start: f32, span: f32) -> Self {
        Self {
            radius,
            thickness,
            start: normalize_degrees(start),
            span: span.clamp(0.0, 360.0),
        }
    }

    /// Arc of `span` degrees centred on `centre`
    pub fn centred(radius: f32, thickness: f32, centre: f32, span: f32) -> Self {
        Self::new(radius, thickness, centre - span / 2.0, span)
    }

    /// End angle, normalized
    pub fn end(&self) -> f32 {
        normalize_degrees(self.start + self.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_extent() {
        let arc = RingArc::new(100.0, 10.0, -90.0, 400.0);
        assert_eq!(arc.start, 270.0);
        assert_eq!(arc.span, 360.0);
        assert_eq!(arc.end(), 270.0);

        let arc = RingArc::new(100.0, 10.0, 0.0, -5.0);
        assert_eq!(arc.span, 0.0);
    }

    #[test]
    fn test_centred_arc_wraps_past_zero() {
        // Centred on 0°, spanning 315° through 45°
        let arc = RingArc::centred(100.0, 10.0, 0.0, 90.0);
        assert_eq!(arc.start, 315.0);
        assert_eq!(arc.end(), 45.0);
    }
}
