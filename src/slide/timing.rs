//! Beat length lookup

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_BEAT_LENGTH;

/// Anything that can report the beat length in effect at a time
pub trait BeatLength {
    fn beat_length_at(&self, time: f64) -> f64;
}

impl<F: Fn(f64) -> f64> BeatLength for F {
    fn beat_length_at(&self, time: f64) -> f64 {
        self(time)
    }
}

/// A tempo change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    pub time: f64,
    /// Milliseconds per beat
    pub beat_length: f64,
}

impl TimingPoint {
    pub fn from_bpm(time: f64, bpm: f64) -> Self {
        Self {
            time,
            beat_length: 60_000.0 / bpm,
        }
    }
}

/// Tempo changes, kept sorted by time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingPoints {
    points: Vec<TimingPoint>,
}

impl TimingPoints {
    pub fn new(mut points: Vec<TimingPoint>) -> Self {
        points.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { points }
    }

    /// Insert a point, replacing any existing point at the same time
    pub fn add(&mut self, point: TimingPoint) {
        match self
            .points
            .binary_search_by(|p| p.time.total_cmp(&point.time))
        {
            Ok(i) => self.points[i] = point,
            Err(i) => self.points.insert(i, point),
        }
    }

    pub fn points(&self) -> &[TimingPoint] {
        &self.points
    }

    /// Point in effect at `time`: the last one at or before it, or the
    /// first point when `time` precedes them all
    pub fn point_at(&self, time: f64) -> Option<&TimingPoint> {
        let after = self.points.partition_point(|p| p.time <= time);
        self.points.get(after.saturating_sub(1))
    }
}

impl BeatLength for TimingPoints {
    fn beat_length_at(&self, time: f64) -> f64 {
        self.point_at(time)
            .map_or(DEFAULT_BEAT_LENGTH, |p| p.beat_length)
    }
}
