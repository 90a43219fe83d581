//! Line entry lifecycle
//!
//! Groups notes by start time into [`LineEntry`]s, forwards note edits to the
//! owning entry, pushes duration/speed changes to every window and recycles
//! entries once their window has closed. The tracker is the single writer
//! for every entry it owns.

use std::collections::HashMap;

use super::entry::{LineEntry, LineMember};
use super::window::VisibilityWindow;
use crate::Settings;
use crate::lane::{LaneLayout, LaneNote, NoteId};
use crate::settings::Palette;

#[derive(Debug, Clone)]
pub struct LineTracker {
    layout: LaneLayout,
    palette: Palette,
    animation_duration: f64,
    speed_factor: f64,
    /// Sorted by start time
    entries: Vec<LineEntry>,
    /// Start time of the entry holding each note
    note_times: HashMap<NoteId, f64>,
}

impl LineTracker {
    pub fn new(layout: LaneLayout, palette: Palette, animation_duration: f64) -> Self {
        Self {
            layout,
            palette,
            animation_duration,
            speed_factor: 1.0,
            entries: Vec::new(),
            note_times: HashMap::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.layout(), settings.palette, settings.animation_duration)
    }

    pub fn entries(&self) -> &[LineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn animation_duration(&self) -> f64 {
        self.animation_duration
    }

    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    /// Entry whose notes land at exactly `start_time`
    pub fn entry_at(&self, start_time: f64) -> Option<&LineEntry> {
        self.find(start_time).ok().map(|i| &self.entries[i])
    }

    /// Entry containing the given note
    pub fn entry_for(&self, id: NoteId) -> Option<&LineEntry> {
        let time = *self.note_times.get(&id)?;
        self.entry_at(time)
    }

    /// Add a note, creating an entry for its start time if needed.
    /// Re-adding a tracked note moves it to its new time and lane.
    pub fn add(&mut self, note: &LaneNote) {
        assert!(
            note.lane < self.layout.lane_count,
            "lane {} out of range for {} lanes",
            note.lane,
            self.layout.lane_count
        );
        if self.note_times.contains_key(&note.id) {
            self.remove(note.id);
        }

        let member = LineMember::new(note, &self.palette);
        match self.find(note.start_time) {
            Ok(index) => self.entries[index].add(member),
            Err(index) => {
                let window = VisibilityWindow::new(
                    note.start_time,
                    self.animation_duration,
                    self.speed_factor,
                );
                let entry = LineEntry::new(member, window, self.layout, self.palette);
                log::info!("line entry created at {}", note.start_time);
                self.entries.insert(index, entry);
            }
        }
        self.note_times.insert(note.id, note.start_time);
    }

    /// Remove a note; its entry is dropped once empty
    pub fn remove(&mut self, id: NoteId) -> bool {
        let Some(time) = self.note_times.remove(&id) else {
            return false;
        };
        let Ok(index) = self.find(time) else {
            return false;
        };
        self.entries[index].remove(id);
        if self.entries[index].is_empty() {
            self.entries.remove(index);
            log::debug!("line entry at {} dropped (no notes left)", time);
        }
        true
    }

    pub fn set_lane(&mut self, id: NoteId, lane: u32) -> bool {
        self.entry_for_mut(id)
            .is_some_and(|entry| entry.set_lane(id, lane))
    }

    pub fn set_break(&mut self, id: NoteId, is_break: bool) -> bool {
        self.entry_for_mut(id)
            .is_some_and(|entry| entry.set_break(id, is_break))
    }

    /// Change the approach time of every line
    pub fn set_animation_duration(&mut self, animation_duration: f64) {
        self.animation_duration = animation_duration;
        for entry in &mut self.entries {
            entry.set_animation_duration(animation_duration);
        }
    }

    /// Change the gameplay speed applied to every line window
    pub fn set_speed_factor(&mut self, speed_factor: f64) {
        self.speed_factor = speed_factor;
        for entry in &mut self.entries {
            entry.set_speed_factor(speed_factor);
        }
    }

    /// Entries whose window contains `now`
    pub fn live(&self, now: f64) -> impl Iterator<Item = &LineEntry> {
        self.entries.iter().filter(move |e| e.window().is_live(now))
    }

    /// Drop entries whose window closed before `now`; returns how many
    pub fn expire(&mut self, now: f64) -> usize {
        let before = self.entries.len();
        let note_times = &mut self.note_times;
        self.entries.retain(|entry| {
            if entry.window().has_expired(now) {
                for member in entry.members() {
                    note_times.remove(&member.id);
                }
                false
            } else {
                true
            }
        });
        let expired = before - self.entries.len();
        if expired > 0 {
            log::info!("{} line entries expired at {}", expired, now);
        }
        expired
    }

    fn find(&self, start_time: f64) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|e| e.start_time().total_cmp(&start_time))
    }

    fn entry_for_mut(&mut self, id: NoteId) -> Option<&mut LineEntry> {
        let time = *self.note_times.get(&id)?;
        let index = self.find(time).ok()?;
        self.entries.get_mut(index)
    }
}
