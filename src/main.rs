//! Sentakki Lanes demo
//!
//! Generates a seeded chart, then plays it on a simulated clock, logging
//! line connectors as they appear and slide chevrons as they are swept.
//!
//! Usage: `sentakki-lanes [settings.json] [seed]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use sentakki_lanes::lane::{LaneNote, NoteId, NoteKind, RotationDirection};
use sentakki_lanes::line::LineTracker;
use sentakki_lanes::slide::{
    Generation, Slide, SlideBody, SlidePath, TimingPoint, TimingPoints, layout_chevrons, sweep,
};
use sentakki_lanes::consts::{DOT_SIZE, INTERSECT_DISTANCE};
use sentakki_lanes::settings::palette;
use sentakki_lanes::{CancellationToken, GameClock, Settings};

/// Simulated frame length (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;
const BEATS: u32 = 32;
const BPM: f64 = 150.0;

struct Chart {
    notes: Vec<LaneNote>,
    slides: Vec<Slide>,
}

fn generate_chart(settings: &Settings, seed: u64) -> Chart {
    let layout = settings.layout();
    let mut rng = Pcg32::seed_from_u64(seed);
    let beat = 60_000.0 / BPM;

    let mut notes = Vec::new();
    let mut slides = Vec::new();
    let mut next_id = 0;

    for b in 0..BEATS {
        let time = 1000.0 + b as f64 * beat;

        if b % 8 == 4 {
            let lane = rng.random_range(0..layout.lane_count);
            let end = rng.random_range(0..layout.lane_count);
            let direction = if rng.random_bool(0.5) {
                RotationDirection::Clockwise
            } else {
                RotationDirection::CounterClockwise
            };
            let path = SlidePath::around_ring(&layout, lane, end, direction);
            slides.push(Slide::new(lane, time).with_body(SlideBody::new(time, beat * 4.0, path)));
            notes.push(LaneNote::new(NoteId(next_id), NoteKind::SlideTap, lane, time));
            next_id += 1;
            continue;
        }

        let count = rng.random_range(1..=2);
        for _ in 0..count {
            let kind = if rng.random_bool(0.2) {
                NoteKind::Hold
            } else {
                NoteKind::Tap
            };
            let lane = rng.random_range(0..layout.lane_count);
            let note = LaneNote::new(NoteId(next_id), kind, lane, time)
                .with_break(rng.random_bool(0.1));
            notes.push(note);
            next_id += 1;
        }
    }

    Chart { notes, slides }
}

fn main() {
    env_logger::init();
    log::info!("Sentakki Lanes demo starting...");

    let mut args = std::env::args().skip(1);
    let settings = args.next().map_or_else(Settings::default, Settings::load);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    let mut chart = generate_chart(&settings, seed);
    log::info!(
        "Chart generated with seed {}: {} notes, {} slides",
        seed,
        chart.notes.len(),
        chart.slides.len()
    );

    let timing = TimingPoints::new(vec![TimingPoint::from_bpm(0.0, BPM)]);
    let cancel = CancellationToken::new();
    let mut chevrons = Vec::with_capacity(chart.slides.len());
    for slide in &mut chart.slides {
        slide.apply_defaults(&timing);
        if let Generation::Committed { nodes } = slide.create_nodes(&cancel) {
            log::info!(
                "Slide at {:.0}: {} nodes, spin {:.0}ms",
                slide.start_time,
                nodes,
                slide.star_spin_duration()
            );
        }
        let markers = slide
            .bodies
            .first()
            .map(|body| layout_chevrons(&body.path))
            .unwrap_or_default();
        chevrons.push(markers);
    }

    let accent = settings.ring_accent(Some(palette::CRIMSON), None);
    log::info!(
        "Ring accent from {}: {:?}",
        settings.ring_colour.as_str(),
        accent
    );

    let mut lines = LineTracker::from_settings(&settings);
    if settings.show_lines {
        for note in &chart.notes {
            lines.add(note);
        }
    }

    let end_time = chart
        .slides
        .iter()
        .flat_map(|s| s.bodies.iter().map(SlideBody::end_time))
        .chain(chart.notes.iter().map(|n| n.start_time))
        .fold(0.0, f64::max)
        + 500.0;

    let mut clock = GameClock::default();
    let mut last_live = 0;
    while clock.current_time < end_time {
        // Speed up for the second half, like a mid-song rate change
        if clock.rate() == 1.0 && clock.current_time > end_time / 2.0 {
            clock.set_rate(1.5);
            lines.set_speed_factor(clock.rate());
            log::info!("Rate changed to {} at {:.0}", clock.rate(), clock.current_time);
        }

        let now = clock.current_time;
        let live: Vec<_> = lines.live(now).collect();
        if live.len() != last_live {
            for entry in &live {
                let arc = entry.arc(INTERSECT_DISTANCE, DOT_SIZE);
                log::info!(
                    "[{:>7.0}] line {:<10} arc {:>5.1}..{:>5.1} notes {} ({})",
                    now,
                    format!("{:?}", entry.line_type()),
                    arc.start,
                    arc.end(),
                    entry.len(),
                    entry.texture_path()
                );
            }
            last_live = live.len();
        }
        lines.expire(now);

        for (slide, markers) in chart.slides.iter().zip(chevrons.iter_mut()) {
            if let Some(body) = slide.bodies.first() {
                sweep(markers, body.progress_at(now));
            }
        }

        clock.advance(FRAME_MS);
    }

    let hidden: usize = chevrons
        .iter()
        .map(|markers| markers.iter().filter(|c| !c.is_visible()).count())
        .sum();
    log::info!(
        "Done at {:.0}: {} lines left, {} chevrons swept",
        clock.current_time,
        lines.len(),
        hidden
    );
}
