//! Line connectors between notes landing at the same instant
//!
//! A [`LineEntry`] groups every note that reaches the ring at one timestamp.
//! Its shape (type, colour, rotation) is a pure function of its members and
//! is recomputed synchronously on every membership or member change, so a
//! stale classification is never observable.

use serde::{Deserialize, Serialize};

use super::window::VisibilityWindow;
use crate::Colour;
use crate::lane::{LaneLayout, LaneNote, NoteId, RingArc, RotationDirection};
use crate::settings::Palette;

/// Line shapes, named by how far apart the outermost notes are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineType {
    #[default]
    Single,
    OneAway,
    TwoAway,
    ThreeAway,
    FullCircle,
}

impl LineType {
    /// Shape for a lane delta; anything past three lanes wraps the ring
    pub fn for_distance(distance: u32) -> Self {
        match distance {
            0 => LineType::Single,
            1 => LineType::OneAway,
            2 => LineType::TwoAway,
            3 => LineType::ThreeAway,
            _ => LineType::FullCircle,
        }
    }

    /// Skin texture used to draw this shape
    pub fn texture_path(self) -> &'static str {
        match self {
            LineType::Single => "Lines/90",
            LineType::OneAway => "Lines/135",
            LineType::TwoAway => "Lines/180",
            LineType::ThreeAway => "Lines/225",
            LineType::FullCircle => "Lines/360",
        }
    }

    /// Angular span of the drawn arc (degrees)
    pub fn arc_degrees(self) -> f32 {
        match self {
            LineType::Single => 90.0,
            LineType::OneAway => 135.0,
            LineType::TwoAway => 180.0,
            LineType::ThreeAway => 225.0,
            LineType::FullCircle => 360.0,
        }
    }
}

/// The parts of a note a line needs, keyed by the note's id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineMember {
    pub id: NoteId,
    pub lane: u32,
    pub is_break: bool,
    pub colour: Colour,
}

impl LineMember {
    /// Member for `note`, coloured from the configured palette
    pub fn new(note: &LaneNote, palette: &Palette) -> Self {
        Self {
            id: note.id,
            lane: note.lane,
            is_break: note.is_break,
            colour: palette.note_colour(note.kind),
        }
    }
}

/// Result of classifying a set of members
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    pub line_type: LineType,
    pub colour: Colour,
    /// Degrees, not normalized (may be negative)
    pub rotation: f32,
    pub direction: RotationDirection,
}

/// Classify lane-sorted members; `None` when there are no members
pub fn classify(
    members: &[LineMember],
    layout: &LaneLayout,
    palette: &Palette,
) -> Option<LineShape> {
    let first = members.first()?;

    if members.len() == 1 {
        return Some(LineShape {
            line_type: LineType::Single,
            colour: if first.is_break {
                palette.break_colour
            } else {
                first.colour
            },
            rotation: layout.angle_for(first.lane),
            direction: RotationDirection::Clockwise,
        });
    }

    let last = members[members.len() - 1];
    let second = members[1];

    let clockwise = layout.forward(first.lane, last.lane);
    // Not reduced mod N: two notes on the first lane must count a full lap
    let counter_clockwise = first.lane + layout.lane_count - second.lane;

    let (direction, delta) = if clockwise <= counter_clockwise {
        (RotationDirection::Clockwise, clockwise)
    } else {
        (RotationDirection::CounterClockwise, counter_clockwise)
    };

    Some(LineShape {
        line_type: LineType::for_distance(delta),
        colour: palette.multi_colour,
        rotation: layout.angle_for(first.lane)
            + direction.sign() * delta as f32 * layout.half_step(),
        direction,
    })
}

/// Notes sharing a timestamp plus their derived line shape and window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineEntry {
    layout: LaneLayout,
    palette: Palette,
    /// Sorted by lane, insertion order among equal lanes
    members: Vec<LineMember>,
    shape: LineShape,
    window: VisibilityWindow,
}

impl LineEntry {
    pub fn new(
        first: LineMember,
        window: VisibilityWindow,
        layout: LaneLayout,
        palette: Palette,
    ) -> Self {
        let mut entry = Self {
            layout,
            palette,
            members: vec![first],
            shape: LineShape {
                line_type: LineType::Single,
                colour: first.colour,
                rotation: 0.0,
                direction: RotationDirection::Clockwise,
            },
            window,
        };
        entry.update_line();
        entry
    }

    #[inline]
    pub fn start_time(&self) -> f64 {
        self.window.start_time()
    }

    #[inline]
    pub fn members(&self) -> &[LineMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    #[inline]
    pub fn line_type(&self) -> LineType {
        self.shape.line_type
    }

    #[inline]
    pub fn colour(&self) -> Colour {
        self.shape.colour
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.shape.rotation
    }

    #[inline]
    pub fn shape(&self) -> &LineShape {
        &self.shape
    }

    #[inline]
    pub fn texture_path(&self) -> &'static str {
        self.shape.line_type.texture_path()
    }

    #[inline]
    pub fn window(&self) -> &VisibilityWindow {
        &self.window
    }

    /// Arc band a renderer paints for this line
    pub fn arc(&self, radius: f32, thickness: f32) -> RingArc {
        RingArc::centred(
            radius,
            thickness,
            self.shape.rotation,
            self.shape.line_type.arc_degrees(),
        )
    }

    /// Insert a member in lane order and reclassify
    pub fn add(&mut self, member: LineMember) {
        self.insert_sorted(member);
        self.update_line();
    }

    /// Remove a member by note id and reclassify
    pub fn remove(&mut self, id: NoteId) -> Option<LineMember> {
        let index = self.members.iter().position(|m| m.id == id)?;
        let removed = self.members.remove(index);
        self.update_line();
        Some(removed)
    }

    /// Move a member to another lane; returns false if not a member
    pub fn set_lane(&mut self, id: NoteId, lane: u32) -> bool {
        assert!(
            lane < self.layout.lane_count,
            "lane {lane} out of range for {} lanes",
            self.layout.lane_count
        );
        let Some(index) = self.members.iter().position(|m| m.id == id) else {
            return false;
        };
        let mut member = self.members.remove(index);
        member.lane = lane;
        self.insert_sorted(member);
        self.update_line();
        true
    }

    /// Change a member's break state; returns false if not a member
    pub fn set_break(&mut self, id: NoteId, is_break: bool) -> bool {
        let Some(member) = self.members.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        member.is_break = is_break;
        self.update_line();
        true
    }

    pub fn set_animation_duration(&mut self, animation_duration: f64) {
        self.window.set_animation_duration(animation_duration);
    }

    pub fn set_speed_factor(&mut self, speed_factor: f64) {
        self.window.set_speed_factor(speed_factor);
    }

    fn insert_sorted(&mut self, member: LineMember) {
        let index = self.members.partition_point(|m| m.lane <= member.lane);
        self.members.insert(index, member);
    }

    fn update_line(&mut self) {
        // An empty entry keeps its last shape until it is recycled
        if let Some(shape) = classify(&self.members, &self.layout, &self.palette) {
            log::debug!(
                "line at {}: {:?} rot={} ({} notes)",
                self.window.start_time(),
                shape.line_type,
                shape.rotation,
                self.members.len()
            );
            self.shape = shape;
        }
    }
}
