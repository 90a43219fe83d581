//! Playfield settings and preferences
//!
//! Persisted as JSON. Loading never fails: a missing or corrupt file falls
//! back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Colour;
use crate::consts::{DEFAULT_ANIMATION_DURATION, LANE_BASE_OFFSET, LANE_COUNT};
use crate::lane::{LaneLayout, NoteKind};

/// Named colours used by the playfield
pub mod palette {
    use crate::Colour;

    pub const WHITE: Colour = Colour::new(1.0, 1.0, 1.0, 1.0);
    pub const HOT_PINK: Colour = Colour::new(1.0, 105.0 / 255.0, 180.0 / 255.0, 1.0);
    pub const CRIMSON: Colour = Colour::new(220.0 / 255.0, 20.0 / 255.0, 60.0 / 255.0, 1.0);
    pub const AQUA: Colour = Colour::new(0.0, 1.0, 1.0, 1.0);
    pub const ORANGE_RED: Colour = Colour::new(1.0, 69.0 / 255.0, 0.0, 1.0);
    pub const GOLD: Colour = Colour::new(1.0, 215.0 / 255.0, 0.0, 1.0);
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the ring accent colour comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RingColour {
    #[default]
    Default,
    Difficulty,
    Skin,
}

impl RingColour {
    pub fn as_str(&self) -> &'static str {
        match self {
            RingColour::Default => "Default",
            RingColour::Difficulty => "Difficulty",
            RingColour::Skin => "Skin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(RingColour::Default),
            "difficulty" | "diff" => Some(RingColour::Difficulty),
            "skin" => Some(RingColour::Skin),
            _ => None,
        }
    }
}

/// Colours consumed by line classification and note drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Lone break notes
    pub break_colour: Colour,
    /// Lines joining two or more notes
    pub multi_colour: Colour,
    pub tap: Colour,
    pub hold: Colour,
    pub slide: Colour,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            break_colour: palette::ORANGE_RED,
            multi_colour: palette::GOLD,
            tap: NoteKind::Tap.default_colour(),
            hold: NoteKind::Hold.default_colour(),
            slide: NoteKind::SlideBody.default_colour(),
        }
    }
}

impl Palette {
    pub fn note_colour(&self, kind: NoteKind) -> Colour {
        match kind {
            NoteKind::Tap => self.tap,
            NoteKind::Hold => self.hold,
            NoteKind::SlideTap | NoteKind::SlideBody => self.slide,
        }
    }
}

/// Playfield settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ring ===
    /// Number of lanes around the ring
    pub lane_count: u32,
    /// Angle of lane 0 (degrees)
    pub lane_base_offset: f32,
    /// Ring accent colour source
    pub ring_colour: RingColour,

    // === Lines ===
    /// Draw connector lines between notes
    pub show_lines: bool,
    /// Approach time for notes and lines (ms, before speed adjustment)
    pub animation_duration: f64,

    // === Colours ===
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            lane_base_offset: LANE_BASE_OFFSET,
            ring_colour: RingColour::Default,

            show_lines: true,
            animation_duration: DEFAULT_ANIMATION_DURATION,

            palette: Palette::default(),
        }
    }
}

impl Settings {
    pub fn layout(&self) -> LaneLayout {
        LaneLayout::new(self.lane_count.max(1), self.lane_base_offset)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// Ring accent for the selected source. A source with no colour
    /// available falls back to white.
    pub fn ring_accent(&self, difficulty: Option<Colour>, skin: Option<Colour>) -> Colour {
        match self.ring_colour {
            RingColour::Default => palette::WHITE,
            RingColour::Difficulty => difficulty.unwrap_or(palette::WHITE),
            RingColour::Skin => skin.unwrap_or(palette::WHITE),
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from disk, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp hand-edited values back into range
    fn sanitize(&mut self) {
        if self.lane_count == 0 {
            log::warn!("lane_count 0 is invalid, using {}", LANE_COUNT);
            self.lane_count = LANE_COUNT;
        }
        if !self.animation_duration.is_finite() || self.animation_duration < 0.0 {
            self.animation_duration = DEFAULT_ANIMATION_DURATION;
        }
    }
}
