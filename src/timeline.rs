//! The animation sequencer.
//!
//! A [`Timeline`] is an ordered list of [`Step`]s executed strictly one after
//! another: a step only begins once its predecessor has completed. Three step
//! kinds cover the whole choreography:
//!
//! - [`Step::Tween`] interpolates tensor positions/scales towards target
//!   values over a duration, with an easing curve and an optional stagger
//!   between the grouped channels
//! - [`Step::Oscillate`] flashes the vector unit's material as a triangle
//!   wave and always lands back on the baseline
//! - [`Step::Atomic`] applies a batch of mutations instantaneously, between
//!   two frames, so no intermediate state is ever observable
//!
//! The timeline is advanced by the frame clock. When a frame's `dt` overruns
//! the current step, the step is finalized on its exact end state and the
//! remainder carries into the next step, so step boundaries don't drift with
//! the frame rate.

use cgmath::Vector3;
use instant::Duration;

use crate::scene::{SceneState, TensorId};

/// Easing curves used by the choreography.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    QuadIn,
    QuadOut,
    CubicInOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// One animated property inside a tween, with its target value.
#[derive(Clone, Debug)]
pub enum Channel {
    Position { tensor: TensorId, to: Vector3<f32> },
    Scale { tensor: TensorId, to: f32 },
}

/// A group of channels animated together. `stagger` delays the start of each
/// subsequent channel; the step as a whole only completes when the last
/// channel does.
#[derive(Clone, Debug)]
pub struct Tween {
    pub channels: Vec<Channel>,
    pub duration: f32,
    pub ease: Ease,
    pub stagger: f32,
}

/// An instantaneous state change applied by an atomic step.
#[derive(Clone, Debug)]
pub enum Mutation {
    Visible(TensorId, bool),
    MoveTo(TensorId, Vector3<f32>),
    Rescale(TensorId, f32),
}

impl Mutation {
    fn apply(&self, scene: &mut SceneState) {
        match *self {
            Mutation::Visible(id, visible) => scene.tensor_mut(id).visible = visible,
            Mutation::MoveTo(id, position) => scene.tensor_mut(id).position = position,
            Mutation::Rescale(id, scale) => scene.tensor_mut(id).scale = scale,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Step {
    Tween(Tween),
    /// Flash the vector unit's material: a triangle wave from the baseline up
    /// to `intensity`/`color` and back, `cycles` times. Logs `marker` once
    /// when the step starts.
    Oscillate {
        intensity: f32,
        color: [f32; 3],
        half_period: f32,
        cycles: u32,
        marker: &'static str,
    },
    Atomic(Vec<Mutation>),
}

impl Step {
    /// Wall-clock duration of the step in seconds. Atomic steps take no time.
    pub fn duration(&self) -> f32 {
        match self {
            Step::Tween(tween) => {
                let staggered = tween.channels.len().saturating_sub(1) as f32 * tween.stagger;
                tween.duration + staggered
            }
            Step::Oscillate {
                half_period, cycles, ..
            } => *half_period * 2.0 * *cycles as f32,
            Step::Atomic(_) => 0.0,
        }
    }
}

/// Start values captured when a step begins, so interpolation is relative to
/// wherever the scene actually was.
enum ActiveStep {
    Tween { from: Vec<Origin> },
    Oscillate { intensity: f32, color: [f32; 3] },
}

enum Origin {
    Position(Vector3<f32>),
    Scale(f32),
}

/// The timeline state machine: idle until `play`, then advancing through its
/// steps with the frame clock until complete. `reset` rewinds unconditionally
/// and restores the scene's initial state.
pub struct Timeline {
    steps: Vec<Step>,
    cursor: usize,
    elapsed: f32,
    playing: bool,
    active: Option<ActiveStep>,
}

impl Timeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            cursor: 0,
            elapsed: 0.0,
            playing: false,
            active: None,
        }
    }

    /// Starts (or resumes) playback. Ignored while already running and after
    /// completion; replaying requires a reset first.
    pub fn play(&mut self) {
        if !self.playing && self.cursor < self.steps.len() {
            self.playing = true;
        }
    }

    /// Stops playback, rewinds to the first step and restores the scene's
    /// initial state.
    pub fn reset(&mut self, scene: &mut SceneState) {
        self.playing = false;
        self.cursor = 0;
        self.elapsed = 0.0;
        self.active = None;
        scene.reset();
    }

    pub fn is_active(&self) -> bool {
        self.playing
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Advances timeline time by `dt`, mutating `scene` accordingly. Does
    /// nothing unless playing.
    pub fn advance(&mut self, scene: &mut SceneState, dt: Duration) {
        if !self.playing {
            return;
        }
        let mut budget = dt.as_secs_f32();
        loop {
            let Some(step) = self.steps.get(self.cursor) else {
                self.playing = false;
                return;
            };

            if let Step::Atomic(mutations) = step {
                for mutation in mutations {
                    mutation.apply(scene);
                }
                self.cursor += 1;
                self.elapsed = 0.0;
                self.active = None;
                continue;
            }

            if self.active.is_none() {
                self.active = Some(Self::enter(step, scene));
            }
            let active = self.active.as_ref().unwrap();

            let total = step.duration();
            let target = self.elapsed + budget;
            if target < total {
                Self::apply(step, active, scene, target);
                self.elapsed = target;
                return;
            }

            // Land exactly on the end state, carry the remainder over.
            Self::apply(step, active, scene, total);
            budget = target - total;
            self.cursor += 1;
            self.elapsed = 0.0;
            self.active = None;
        }
    }

    fn enter(step: &Step, scene: &SceneState) -> ActiveStep {
        match step {
            Step::Tween(tween) => {
                let from = tween
                    .channels
                    .iter()
                    .map(|channel| match channel {
                        Channel::Position { tensor, .. } => {
                            Origin::Position(scene.tensor(*tensor).position)
                        }
                        Channel::Scale { tensor, .. } => Origin::Scale(scene.tensor(*tensor).scale),
                    })
                    .collect();
                ActiveStep::Tween { from }
            }
            Step::Oscillate { marker, .. } => {
                log::info!("{}", marker);
                ActiveStep::Oscillate {
                    intensity: scene.unit.emissive_intensity,
                    color: scene.unit.color,
                }
            }
            Step::Atomic(_) => unreachable!("atomic steps are applied without entering"),
        }
    }

    fn apply(step: &Step, active: &ActiveStep, scene: &mut SceneState, t: f32) {
        match (step, active) {
            (Step::Tween(tween), ActiveStep::Tween { from }) => {
                for (i, (channel, origin)) in tween.channels.iter().zip(from).enumerate() {
                    let local = if tween.duration > 0.0 {
                        (t - i as f32 * tween.stagger) / tween.duration
                    } else {
                        1.0
                    };
                    let k = tween.ease.apply(local);
                    match (channel, origin) {
                        (Channel::Position { tensor, to }, Origin::Position(from)) => {
                            scene.tensor_mut(*tensor).position = from + (to - from) * k;
                        }
                        (Channel::Scale { tensor, to }, Origin::Scale(from)) => {
                            scene.tensor_mut(*tensor).scale = from + (to - from) * k;
                        }
                        _ => unreachable!("channel/origin mismatch"),
                    }
                }
            }
            (
                Step::Oscillate {
                    intensity,
                    color,
                    half_period,
                    ..
                },
                ActiveStep::Oscillate {
                    intensity: base_intensity,
                    color: base_color,
                },
            ) => {
                // Triangle wave: 0 at the start of every cycle, 1 at each peak.
                let phase = (t / half_period).rem_euclid(2.0);
                let k = if phase <= 1.0 { phase } else { 2.0 - phase };
                scene.unit.emissive_intensity = base_intensity + (intensity - base_intensity) * k;
                for (channel, (base, peak)) in scene
                    .unit
                    .color
                    .iter_mut()
                    .zip(base_color.iter().zip(color.iter()))
                {
                    *channel = base + (peak - base) * k;
                }
            }
            _ => unreachable!("step/active mismatch"),
        }
    }
}
