//! Spin engine: the phase state machine that drives the wheel.
//!
//! A spin runs `Idle -> Accelerating -> Constant -> Decelerating -> Idle`.
//! The engine is advanced once per loop iteration with [`SpinEngine::tick`];
//! the angle moves by the current speed on every tick while spinning.

use std::f64::consts::TAU;
use std::fmt;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{self, SpinTuning};
use crate::wheel::WheelConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Accelerating,
    Constant,
    Decelerating,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Accelerating => "accelerating",
            Phase::Constant => "constant",
            Phase::Decelerating => "decelerating",
        };
        f.write_str(name)
    }
}

/// Parameters drawn once at the start of every spin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpinParams {
    pub max_speed: f64,
    pub acceleration_rate: f64,
    pub deceleration_rate: f64,
    pub constant_duration_ms: u64,
}

impl SpinParams {
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, tuning: &SpinTuning) -> Self {
        let (lo, hi) = tuning.max_speed;
        let max_speed = rng.random_range(lo..hi);
        let (lo, hi) = tuning.acceleration_rate;
        let acceleration_rate = rng.random_range(lo..hi);
        let (lo, hi) = tuning.deceleration_rate;
        let deceleration_rate = rng.random_range(lo..hi);
        // Sum of two draws, so mid-length constant phases are most likely
        let constant_duration_ms = rng.random_range(0..tuning.constant_half_ms)
            + rng.random_range(0..tuning.constant_half_ms);
        Self {
            max_speed,
            acceleration_rate,
            deceleration_rate,
            constant_duration_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpinState {
    pub phase: Phase,
    /// Radians per tick, never negative
    pub speed: f64,
    /// Radians, always in `[0, 2π)`
    pub angle: f64,
    pub phase_started_at: u64,
    pub params: SpinParams,
    /// Only set once a spin has come to rest
    pub selected: Option<usize>,
}

impl SpinState {
    pub fn is_spinning(&self) -> bool {
        self.phase != Phase::Idle
    }

    fn enter(&mut self, phase: Phase, now: u64) {
        self.phase = phase;
        self.phase_started_at = now;
    }
}

/// Outcome of a finished spin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinEvent {
    Entered(Phase),
    Stopped(Selection),
}

/// Index of the sector under the top pointer for a wheel rotated by `angle`.
///
/// Sector `i` spans `[angle + i·w, angle + (i+1)·w)` measured from the top,
/// so the pointer sits in sector `⌊N − angle·N/2π⌋ mod N`. This is exact for
/// angles that land on a sector boundary (`0` selects 0, `π` selects `N/2`).
pub fn resolve_selection(angle: f64, options: usize) -> usize {
    if options == 0 {
        return 0;
    }
    let n = options as i64;
    let sectors_turned = angle / TAU * options as f64;
    let index = (options as f64 - sectors_turned).floor() as i64 % n;
    if index < 0 {
        (index + n) as usize
    } else {
        index as usize
    }
}

pub struct SpinEngine<R = StdRng> {
    rng: R,
    tuning: SpinTuning,
    wheel: WheelConfig,
    state: SpinState,
}

impl SpinEngine<StdRng> {
    /// Engine seeded from the operating system's entropy source
    pub fn from_entropy(wheel: WheelConfig) -> Self {
        Self::new(wheel, StdRng::from_os_rng())
    }

    pub fn seeded(wheel: WheelConfig, seed: u64) -> Self {
        Self::new(wheel, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SpinEngine<R> {
    pub fn new(wheel: WheelConfig, rng: R) -> Self {
        Self {
            rng,
            tuning: SpinTuning::default(),
            wheel,
            state: SpinState::default(),
        }
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn wheel(&self) -> &WheelConfig {
        &self.wheel
    }

    pub fn is_spinning(&self) -> bool {
        self.state.is_spinning()
    }

    /// Begins a new spin. Returns `false` and leaves everything untouched if a
    /// spin is already in progress.
    pub fn start(&mut self, now: u64) -> bool {
        if self.state.is_spinning() {
            return false;
        }

        self.wheel.shuffle(&mut self.rng);
        let params = SpinParams::draw(&mut self.rng, &self.tuning);

        self.state.params = params;
        self.state.speed = config::SEED_SPEED;
        self.state.selected = None;
        self.state.enter(Phase::Accelerating, now);

        info!(
            "spin started: max speed {:.3}, acceleration {:.3}, deceleration {:.3}, constant {} ms",
            params.max_speed,
            params.acceleration_rate,
            params.deceleration_rate,
            params.constant_duration_ms
        );
        debug!("shuffled options: {}", self.wheel.labels().join(", "));
        true
    }

    /// Advances the spin by one loop iteration.
    pub fn tick(&mut self, now: u64) -> Option<SpinEvent> {
        if !self.state.is_spinning() {
            return None;
        }

        let elapsed = now.saturating_sub(self.state.phase_started_at);
        let params = self.state.params;
        let mut event = None;

        match self.state.phase {
            Phase::Accelerating => {
                self.state.speed += params.acceleration_rate;
                if self.state.speed >= params.max_speed {
                    self.state.speed = params.max_speed;
                    self.state.enter(Phase::Constant, now);
                    event = Some(SpinEvent::Entered(Phase::Constant));
                }
            }
            Phase::Constant => {
                if self.rng.random_bool(config::JITTER_PROBABILITY) {
                    let (lo, hi) = config::JITTER_BAND;
                    self.state.speed = params.max_speed * self.rng.random_range(lo..=hi);
                }
                if elapsed > params.constant_duration_ms {
                    self.state.enter(Phase::Decelerating, now);
                    event = Some(SpinEvent::Entered(Phase::Decelerating));
                }
            }
            Phase::Decelerating => {
                self.state.speed *= 1.0 - params.deceleration_rate;
                if self.state.speed < config::STOP_SPEED {
                    return Some(SpinEvent::Stopped(self.stop(now)));
                }
            }
            Phase::Idle => return None,
        }

        if let Some(SpinEvent::Entered(phase)) = &event {
            debug!("entering {phase} phase at {now} ms");
        }

        self.state.angle = (self.state.angle + self.state.speed) % TAU;
        event
    }

    // The wheel comes to rest at the current angle; it is not advanced again.
    fn stop(&mut self, now: u64) -> Selection {
        let index = resolve_selection(self.state.angle, self.wheel.len());
        self.state.speed = 0.0;
        self.state.selected = Some(index);
        self.state.enter(Phase::Idle, now);

        let label = self.wheel.label(index).unwrap_or_default().to_string();
        info!("selected: {label} (sector {index})");
        Selection { index, label }
    }
}
