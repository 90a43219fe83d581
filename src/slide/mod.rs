//! Slides: a star tap followed by one or more bodies travelling along paths
//!
//! - `path`: Path geometry and distance-based progress
//! - `timing`: Beat length lookup for shoot delays
//! - `body`: Slide bodies and their timed nodes
//! - `chevron`: Progress markers and their sweep visibility

pub mod body;
pub mod chevron;
pub mod path;
pub mod timing;

pub use body::{Generation, SlideBody, SlideNode, chevron_count, effective_shoot_delay};
pub use chevron::{Chevron, layout_chevrons, sweep};
pub use path::SlidePath;
pub use timing::{BeatLength, TimingPoint, TimingPoints};

use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;

/// Extra spin time of the star after its first body finishes (ms)
const STAR_SPIN_TAIL: f64 = 250.0;
/// Star spin time when a slide has no bodies (ms)
const STAR_SPIN_FALLBACK: f64 = 1000.0;

/// A slide tap and its bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    pub lane: u32,
    pub start_time: f64,
    pub bodies: Vec<SlideBody>,
}

impl Slide {
    pub fn new(lane: u32, start_time: f64) -> Self {
        Self {
            lane,
            start_time,
            bodies: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: SlideBody) -> Self {
        self.bodies.push(body);
        self
    }

    /// Time for one full turn of the star on the slide tap
    pub fn star_spin_duration(&self) -> f64 {
        self.bodies
            .first()
            .map_or(STAR_SPIN_FALLBACK, |body| body.duration + STAR_SPIN_TAIL)
    }

    /// Slides with several bodies draw a second star on the tap
    pub fn shows_second_star(&self) -> bool {
        self.bodies.len() > 1
    }

    pub fn apply_defaults(&mut self, timing: &impl BeatLength) {
        for body in &mut self.bodies {
            body.apply_defaults(timing);
        }
    }

    /// Regenerate nodes for every body; stops at the first cancellation
    pub fn create_nodes(&mut self, cancel: &CancellationToken) -> Generation {
        let mut total = 0;
        for body in &mut self.bodies {
            match body.create_nodes(cancel) {
                Generation::Committed { nodes } => total += nodes,
                Generation::Cancelled => return Generation::Cancelled,
            }
        }
        Generation::Committed { nodes: total }
    }
}
