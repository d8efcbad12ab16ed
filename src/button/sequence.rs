//! The four-phase animation sequencer.
//!
//! The original control chained declarative animations through completion
//! callbacks; here the choreography is an explicit state machine advanced
//! once per frame against an injected timestamp, so ordering, the
//! single-flight guard and the fixed pause are all testable without a
//! renderer.

use std::time::Duration;

use crate::animation::{AnimatedScalar, TimingFunction, Transition};

/// The label, letter by letter. Each letter animates independently.
pub const LABEL: [char; 6] = ['D', 'e', 'l', 'e', 't', 'e'];

/// Position checkpoint names (see the geometry tables for their outputs).
pub const REST: f32 = 1.0;
pub const EXPANDED: f32 = 4.0;
pub const OVERSHOOT: f32 = 5.0;
pub const RESET: f32 = 6.0;

const EXPAND_MS: f32 = 600.0;
const REVEAL_MS: f32 = 300.0;
const REVEAL_STAGGER_MS: f32 = 60.0;
const SWEEP_MS: f32 = 400.0;
const PAUSE_MS: u64 = 200;
const RETURN_MS: f32 = 400.0;
const FADE_MS: f32 = 200.0;
const FADE_STAGGER_MS: f32 = 50.0;

fn expand_ease() -> TimingFunction {
    TimingFunction::CubicBezier(0.25, 1.0, 0.5, 1.0)
}

fn reveal_ease() -> TimingFunction {
    TimingFunction::CubicBezier(0.11, 0.0, 0.5, 0.0)
}

fn return_ease() -> TimingFunction {
    TimingFunction::CubicBezier(0.64, 0.0, 0.78, 0.0)
}

/// Where the sequencer currently is. `Idle` is both the initial and the
/// terminal state; everything else means a sequence is in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    /// Icon halves grow and drift apart.
    Expand,
    /// Letters animate out one by one.
    Reveal,
    /// Halves sweep toward the overshoot checkpoint while the scale settles.
    ResetSweep,
    /// Fixed breather between the two reset movements.
    ResetPause { until: Duration },
    /// Halves travel to the reset checkpoint.
    ResetReturn,
    /// Letters fade back in; ends the sequence.
    FadeIn,
}

/// Owns every animated value of the control and drives the phase machine.
pub struct Sequencer {
    phase: Phase,
    scale: AnimatedScalar,
    position: AnimatedScalar,
    letters: [AnimatedScalar; LABEL.len()],
    opacities: [AnimatedScalar; LABEL.len()],
}

impl Sequencer {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            scale: AnimatedScalar::new(REST),
            position: AnimatedScalar::new(REST),
            letters: std::array::from_fn(|_| AnimatedScalar::new(0.0)),
            opacities: std::array::from_fn(|_| AnimatedScalar::new(1.0)),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The single-flight guard: taps are only accepted here.
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    pub fn position(&self) -> f32 {
        self.position.get()
    }

    pub fn letter_progress(&self, index: usize) -> f32 {
        self.letters[index].get()
    }

    pub fn letter_opacity(&self, index: usize) -> f32 {
        self.opacities[index].get()
    }

    /// Start the sequence. A tap while one is already running is ignored
    /// and changes nothing.
    pub fn tap(&mut self, now: Duration) -> bool {
        if !self.is_idle() {
            log::debug!("tap ignored, sequence in flight ({:?})", self.phase);
            return false;
        }

        let expand = Transition::new(EXPAND_MS, expand_ease());
        self.scale.animate_to(EXPANDED, expand.clone(), now);
        self.position.animate_to(EXPANDED, expand, now);
        self.phase = Phase::Expand;
        log::debug!("phase: idle -> expand");
        true
    }

    /// Advance all values to `now`, then run due phase transitions.
    /// Returns true while the sequence is in flight.
    pub fn advance(&mut self, now: Duration) -> bool {
        self.scale.advance(now);
        self.position.advance(now);
        for letter in &mut self.letters {
            letter.advance(now);
        }
        for opacity in &mut self.opacities {
            opacity.advance(now);
        }

        match self.phase {
            Phase::Idle => {}
            Phase::Expand => {
                // The expand chains off the scale value; position shares its
                // transition and lands at the same instant.
                if !self.scale.is_running() {
                    for (i, letter) in self.letters.iter_mut().enumerate() {
                        letter.animate_to(
                            1.0,
                            Transition::new(REVEAL_MS, reveal_ease())
                                .delay(i as f32 * REVEAL_STAGGER_MS),
                            now,
                        );
                    }
                    self.phase = Phase::Reveal;
                    log::debug!("phase: expand -> reveal");
                }
            }
            Phase::Reveal => {
                // Chain off the last configured letter, never the last to
                // actually finish. Identical durations keep the two equal;
                // revisit this if the durations ever diverge.
                if !self.letters[LABEL.len() - 1].is_running() {
                    for opacity in &mut self.opacities {
                        opacity.snap(0.0);
                    }
                    for letter in &mut self.letters {
                        letter.snap(0.0);
                    }
                    self.position
                        .animate_to(OVERSHOOT, Transition::new(SWEEP_MS, TimingFunction::Linear), now);
                    self.scale
                        .animate_to(REST, Transition::new(SWEEP_MS, TimingFunction::Linear), now);
                    self.phase = Phase::ResetSweep;
                    log::debug!("phase: reveal -> reset sweep");
                }
            }
            Phase::ResetSweep => {
                // The pause is timed from the scale settling back to rest.
                if !self.scale.is_running() {
                    self.phase = Phase::ResetPause {
                        until: now + Duration::from_millis(PAUSE_MS),
                    };
                    log::debug!("phase: reset sweep -> pause");
                }
            }
            Phase::ResetPause { until } => {
                if now >= until {
                    self.position
                        .animate_to(RESET, Transition::new(RETURN_MS, return_ease()), now);
                    self.phase = Phase::ResetReturn;
                    log::debug!("phase: pause -> reset return");
                }
            }
            Phase::ResetReturn => {
                if !self.position.is_running() {
                    self.position.snap(REST);
                    for (i, opacity) in self.opacities.iter_mut().enumerate() {
                        opacity.animate_to(
                            1.0,
                            Transition::new(FADE_MS, reveal_ease())
                                .delay(i as f32 * FADE_STAGGER_MS),
                            now,
                        );
                    }
                    self.phase = Phase::FadeIn;
                    log::debug!("phase: reset return -> fade in");
                }
            }
            Phase::FadeIn => {
                if !self.opacities[LABEL.len() - 1].is_running() {
                    self.phase = Phase::Idle;
                    log::debug!("phase: fade in -> idle");
                }
            }
        }

        !self.is_idle()
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}
