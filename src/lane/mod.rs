//! Circular lane space
//!
//! Pure functions and small value types over the ring of lanes:
//! - Lane angles and circular distances
//! - Arc spans drawn on the ring
//! - Notes that occupy a lane at a point in time

pub mod arc;
pub mod note;
pub mod topology;

pub use arc::RingArc;
pub use note::{LaneNote, NoteId, NoteKind};
pub use topology::{
    LaneLayout, RotationDirection, angle_for_lane, backward_distance, forward_distance,
};
