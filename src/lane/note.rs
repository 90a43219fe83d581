//! Notes that land on a lane

use serde::{Deserialize, Serialize};

use crate::Colour;
use crate::settings::palette;

/// Stable identifier for a note on the gameplay timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoteId(pub u32);

/// Laned note types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoteKind {
    #[default]
    Tap,
    Hold,
    /// Star-shaped tap that launches one or more slide bodies
    SlideTap,
    SlideBody,
}

impl NoteKind {
    /// Built-in colour for this kind; the default for the settings palette
    pub fn default_colour(self) -> Colour {
        match self {
            NoteKind::Tap => palette::HOT_PINK,
            NoteKind::Hold => palette::CRIMSON,
            NoteKind::SlideTap | NoteKind::SlideBody => palette::AQUA,
        }
    }
}

/// A note occupying one lane at `start_time`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneNote {
    pub id: NoteId,
    pub kind: NoteKind,
    pub lane: u32,
    /// Break notes are drawn in the break colour
    pub is_break: bool,
    /// Time the note reaches the judgement ring (ms)
    pub start_time: f64,
}

impl LaneNote {
    pub fn new(id: NoteId, kind: NoteKind, lane: u32, start_time: f64) -> Self {
        Self {
            id,
            kind,
            lane,
            is_break: false,
            start_time,
        }
    }

    pub fn with_break(mut self, is_break: bool) -> Self {
        self.is_break = is_break;
        self
    }
}
