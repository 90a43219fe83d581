//! Slide bodies and their timed progress nodes
//!
//! A slide body travels along its path from `start_time` to `end_time`,
//! optionally waiting a beat-derived shoot delay first. Nodes mark points
//! along the path the player must pass; they are generated in one batch
//! that either commits completely or, if cancelled, publishes nothing.

use serde::{Deserialize, Serialize};

use super::path::SlidePath;
use super::timing::BeatLength;
use crate::cancel::CancellationToken;
use crate::consts::{MIN_SLIDE_TRAVEL, SLIDE_CHEVRON_DISTANCE};

/// Chevron slots between the first and every following node
const NODE_STRIDE: i64 = 5;
/// Chevron slots left without a node before the end
const NODE_TAIL_GAP: i64 = 2;

/// A timed checkpoint along a slide
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideNode {
    /// Fraction of the path, 0-1
    pub progress: f64,
    /// Time the slide reaches this node (ms)
    pub time: f64,
}

/// Outcome of a node generation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// The new node set replaced the old one
    Committed { nodes: usize },
    /// Cancelled before committing; existing nodes untouched
    Cancelled,
}

/// Number of chevron slots along a path of `distance`; never negative
pub fn chevron_count(distance: f32) -> i64 {
    let count = (distance as f64 / SLIDE_CHEVRON_DISTANCE as f64).ceil();
    if count.is_finite() && count >= 1.0 {
        count as i64
    } else {
        0
    }
}

/// Shoot delay for a slide, or 0 when it would leave too little travel time
pub fn effective_shoot_delay(beat_length: f64, shoot_delay_beats: f64, duration: f64) -> f64 {
    let candidate = beat_length * shoot_delay_beats / 2.0;
    if candidate < duration - MIN_SLIDE_TRAVEL {
        candidate
    } else {
        0.0
    }
}

/// Build the node set for a slide. Returns `None` if cancelled.
pub fn generate_nodes(
    distance: f32,
    start_time: f64,
    duration: f64,
    shoot_delay: f64,
    cancel: &CancellationToken,
) -> Option<Vec<SlideNode>> {
    generate_nodes_until(distance, start_time, duration, shoot_delay, |_| {
        cancel.is_cancelled()
    })
}

/// Node builder that asks `stop` before every push, passing the number of
/// nodes built so far. Returns `None` as soon as `stop` answers true.
fn generate_nodes_until(
    distance: f32,
    start_time: f64,
    duration: f64,
    shoot_delay: f64,
    mut stop: impl FnMut(usize) -> bool,
) -> Option<Vec<SlideNode>> {
    let chevrons = chevron_count(distance);
    let interval = if chevrons > 0 { 1.0 / chevrons as f64 } else { 0.0 };
    let travel = duration - shoot_delay;

    let mut nodes = Vec::new();
    let mut i = NODE_STRIDE;
    while i < chevrons - NODE_TAIL_GAP {
        if stop(nodes.len()) {
            return None;
        }
        let progress = i as f64 * interval;
        nodes.push(SlideNode {
            progress,
            time: start_time + shoot_delay + travel * progress,
        });
        i += NODE_STRIDE;
    }

    if stop(nodes.len()) {
        return None;
    }
    nodes.push(SlideNode {
        progress: 1.0,
        time: start_time + duration,
    });
    Some(nodes)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideBody {
    pub start_time: f64,
    /// Travel time including the shoot delay (ms)
    pub duration: f64,
    /// Shoot delay in beats, before halving
    pub shoot_delay_beats: f64,
    pub path: SlidePath,
    /// Derived from timing by `apply_defaults`
    shoot_delay: f64,
    /// Derived by `create_nodes`
    #[serde(skip)]
    nodes: Vec<SlideNode>,
}

impl SlideBody {
    pub fn new(start_time: f64, duration: f64, path: SlidePath) -> Self {
        Self {
            start_time,
            duration: duration.max(0.0),
            shoot_delay_beats: 1.0,
            path,
            shoot_delay: 0.0,
            nodes: Vec::new(),
        }
    }

    pub fn with_shoot_delay_beats(mut self, beats: f64) -> Self {
        self.shoot_delay_beats = beats;
        self
    }

    #[inline]
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    pub fn set_end_time(&mut self, end_time: f64) {
        self.duration = (end_time - self.start_time).max(0.0);
    }

    #[inline]
    pub fn shoot_delay(&self) -> f64 {
        self.shoot_delay
    }

    /// Nodes from the last committed generation pass, ordered by progress
    #[inline]
    pub fn nodes(&self) -> &[SlideNode] {
        &self.nodes
    }

    /// Derive the shoot delay from the beat length at the slide's start
    pub fn apply_defaults(&mut self, timing: &impl BeatLength) {
        self.shoot_delay = effective_shoot_delay(
            timing.beat_length_at(self.start_time),
            self.shoot_delay_beats,
            self.duration,
        );
    }

    /// Discard and rebuild the node set. On cancellation nothing changes.
    pub fn create_nodes(&mut self, cancel: &CancellationToken) -> Generation {
        self.create_nodes_until(|_| cancel.is_cancelled())
    }

    fn create_nodes_until(&mut self, stop: impl FnMut(usize) -> bool) -> Generation {
        match generate_nodes_until(
            self.path.distance(),
            self.start_time,
            self.duration,
            self.shoot_delay,
            stop,
        ) {
            Some(nodes) => {
                self.nodes = nodes;
                log::debug!(
                    "slide at {}: {} nodes over {:.1} units",
                    self.start_time,
                    self.nodes.len(),
                    self.path.distance()
                );
                Generation::Committed {
                    nodes: self.nodes.len(),
                }
            }
            None => {
                log::warn!("slide at {}: node generation cancelled", self.start_time);
                Generation::Cancelled
            }
        }
    }

    /// Fraction of the path covered at `time`, 0 during the shoot delay
    pub fn progress_at(&self, time: f64) -> f64 {
        let travel = self.duration - self.shoot_delay;
        if travel <= 0.0 {
            return if time >= self.end_time() { 1.0 } else { 0.0 };
        }
        ((time - self.start_time - self.shoot_delay) / travel).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::timing::{TimingPoint, TimingPoints};
    use glam::Vec2;

    fn line_path(length: f32) -> SlidePath {
        SlidePath::from_points(vec![Vec2::ZERO, Vec2::new(length, 0.0)])
    }

    #[test]
    fn test_chevron_count() {
        assert_eq!(chevron_count(300.0), 12);
        assert_eq!(chevron_count(301.0), 13);
        assert_eq!(chevron_count(1.0), 1);
        assert_eq!(chevron_count(0.0), 0);
        assert_eq!(chevron_count(-10.0), 0);
        assert_eq!(chevron_count(f32::NAN), 0);
    }

    #[test]
    fn test_short_slide_has_one_intermediate_node() {
        let cancel = CancellationToken::new();
        let nodes = generate_nodes(300.0, 1000.0, 1000.0, 0.0, &cancel).unwrap();
        // chevrons = 12: i = 5 only, since 10 is not < 10
        assert_eq!(nodes.len(), 2);
        assert!((nodes[0].progress - 5.0 / 12.0).abs() < 1e-12);
        assert!((nodes[0].time - (1000.0 + 1000.0 * 5.0 / 12.0)).abs() < 1e-9);
        assert_eq!(nodes[1], SlideNode { progress: 1.0, time: 2000.0 });
    }

    #[test]
    fn test_long_slide_steps_by_five() {
        let cancel = CancellationToken::new();
        let nodes = generate_nodes(1000.0, 0.0, 2000.0, 250.0, &cancel).unwrap();
        // chevrons = 40: i = 5..=35
        assert_eq!(nodes.len(), 8);
        let expected: Vec<f64> = (1..=7).map(|k| (k * 5) as f64 / 40.0).collect();
        for (node, progress) in nodes.iter().zip(&expected) {
            assert!((node.progress - progress).abs() < 1e-12);
            assert!((node.time - (250.0 + 1750.0 * progress)).abs() < 1e-9);
        }
        assert_eq!(nodes.last().unwrap().time, 2000.0);
    }

    #[test]
    fn test_degenerate_lengths_emit_terminal_only() {
        let cancel = CancellationToken::new();
        for length in [0.0, 10.0, 150.0, 175.0] {
            let nodes = generate_nodes(length, 0.0, 500.0, 0.0, &cancel).unwrap();
            assert_eq!(nodes, vec![SlideNode { progress: 1.0, time: 500.0 }]);
        }
        // chevrons = 8: i = 5 is included
        let nodes = generate_nodes(200.0, 0.0, 500.0, 0.0, &cancel).unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_shoot_delay_guard() {
        assert_eq!(effective_shoot_delay(500.0, 1.0, 1000.0), 250.0);
        // Would leave exactly 50ms of travel
        assert_eq!(effective_shoot_delay(500.0, 1.0, 300.0), 0.0);
        assert_eq!(effective_shoot_delay(500.0, 1.0, 300.1), 250.0);
        assert_eq!(effective_shoot_delay(500.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_apply_defaults_uses_timing_at_start() {
        let timing = TimingPoints::new(vec![
            TimingPoint::from_bpm(0.0, 120.0),
            TimingPoint::from_bpm(4000.0, 60.0),
        ]);
        let mut body = SlideBody::new(4000.0, 2000.0, line_path(300.0)).with_shoot_delay_beats(2.0);
        body.apply_defaults(&timing);
        assert_eq!(body.shoot_delay(), 1000.0);

        let mut early = SlideBody::new(1000.0, 2000.0, line_path(300.0));
        early.apply_defaults(&timing);
        assert_eq!(early.shoot_delay(), 250.0);
    }

    #[test]
    fn test_regeneration_is_deterministic() {
        let cancel = CancellationToken::new();
        let mut body = SlideBody::new(500.0, 1500.0, line_path(800.0));
        body.apply_defaults(&TimingPoints::default());

        assert_eq!(body.create_nodes(&cancel), Generation::Committed { nodes: 6 });
        let first = body.nodes().to_vec();
        assert_eq!(body.create_nodes(&cancel), Generation::Committed { nodes: 6 });
        assert_eq!(body.nodes(), first.as_slice());
    }

    #[test]
    fn test_cancelled_generation_publishes_nothing() {
        let cancel = CancellationToken::new();
        let mut body = SlideBody::new(0.0, 1000.0, line_path(1000.0));
        body.create_nodes(&cancel);
        let before = body.nodes().to_vec();

        body.path = line_path(300.0);
        cancel.cancel();
        assert_eq!(body.create_nodes(&cancel), Generation::Cancelled);
        assert_eq!(body.nodes(), before.as_slice());

        let mut fresh = SlideBody::new(0.0, 1000.0, line_path(0.0));
        assert_eq!(fresh.create_nodes(&cancel), Generation::Cancelled);
        assert!(fresh.nodes().is_empty());
    }

    #[test]
    fn test_cancel_during_generation_keeps_old_nodes() {
        let cancel = CancellationToken::new();
        let mut body = SlideBody::new(0.0, 1000.0, line_path(1000.0));
        assert_eq!(body.create_nodes(&cancel), Generation::Committed { nodes: 8 });
        let before = body.nodes().to_vec();

        // Cancelled from another thread after three nodes were built
        body.path = line_path(2000.0);
        let mut built = 0;
        let result = body.create_nodes_until(|count| {
            built = count;
            if count == 3 {
                cancel.cancel();
            }
            cancel.is_cancelled()
        });
        assert_eq!(result, Generation::Cancelled);
        assert_eq!(built, 3);
        assert_eq!(body.nodes(), before.as_slice());

        cancel.reset();
        assert_eq!(body.create_nodes(&cancel), Generation::Committed { nodes: 16 });
    }

    #[test]
    fn test_end_time_and_progress() {
        let mut body = SlideBody::new(1000.0, 1000.0, line_path(100.0));
        body.apply_defaults(&|_: f64| 400.0);
        assert_eq!(body.shoot_delay(), 200.0);
        assert_eq!(body.end_time(), 2000.0);

        assert_eq!(body.progress_at(1100.0), 0.0);
        assert_eq!(body.progress_at(1600.0), 0.5);
        assert_eq!(body.progress_at(2500.0), 1.0);

        body.set_end_time(1500.0);
        assert_eq!(body.duration, 500.0);
        body.set_end_time(0.0);
        assert_eq!(body.duration, 0.0);
        assert_eq!(body.progress_at(999.0), 0.0);
        assert_eq!(body.progress_at(1000.0), 1.0);
    }
}
