//! Sentakki Lanes - geometry and timing for a circular rhythm playfield
//!
//! Core modules:
//! - `lane`: Circular lane topology, ring arcs and lane notes
//! - `line`: Line connector classification and visibility windows
//! - `slide`: Slide paths, node timing and chevron sweep visibility
//! - `clock`: Game clock with adjustable playback rate
//! - `cancel`: Cooperative cancellation for batch generation
//! - `settings`: User-tunable configuration

pub mod cancel;
pub mod clock;
pub mod lane;
pub mod line;
pub mod settings;
pub mod slide;

pub use cancel::CancellationToken;
pub use clock::GameClock;
pub use settings::{Palette, RingColour, Settings, SettingsError};

use glam::Vec2;

/// RGBA colour, components in 0-1
pub type Colour = glam::Vec4;

/// Playfield configuration constants
pub mod consts {
    /// Number of lanes around the ring
    pub const LANE_COUNT: u32 = 8;
    /// Angle of lane 0 (degrees, clockwise from 12 o'clock)
    pub const LANE_BASE_OFFSET: f32 = 22.5;

    /// Ring dimensions
    pub const RING_SIZE: f32 = 600.0;
    pub const DOT_SIZE: f32 = 20.0;
    /// Distance from centre where notes are judged
    pub const INTERSECT_DISTANCE: f32 = 296.5;
    /// Distance from centre where notes appear
    pub const NOTE_START_DISTANCE: f32 = 66.0;

    /// Default line/note approach time (ms)
    pub const DEFAULT_ANIMATION_DURATION: f64 = 1000.0;

    /// Path distance between consecutive slide chevrons
    pub const SLIDE_CHEVRON_DISTANCE: f32 = 25.0;
    /// Minimum travel time a shoot delay must leave on a slide (ms)
    pub const MIN_SLIDE_TRAVEL: f64 = 50.0;
    /// Beat length used when no timing point exists (120 BPM)
    pub const DEFAULT_BEAT_LENGTH: f64 = 60_000.0 / 120.0;
}

/// Normalized angle to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert a ring angle (degrees, clockwise from 12 o'clock) and a distance
/// from the centre into a screen-space offset (y grows downward)
#[inline]
pub fn ring_position(angle: f32, distance: f32) -> Vec2 {
    let theta = angle.to_radians();
    Vec2::new(distance * theta.sin(), -distance * theta.cos())
}
