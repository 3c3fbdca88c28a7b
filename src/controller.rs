//! One iteration of the fixed-rate control loop.
//!
//! Per iteration the controller advances the spin, then polls the touch
//! signal. While an overlay sequence plays, neither happens: presses made
//! during the startup or result animation are dropped, as they were on the
//! device where those animations blocked the loop.

use log::info;
use rand::Rng;

use crate::animation::Timeline;
use crate::canvas::Canvas;
use crate::config::{self, AnimationConfig};
use crate::input::Debouncer;
use crate::render::Renderer;
use crate::spin::{Phase, Selection, SpinEngine, SpinEvent};
use crate::wheel::WheelConfig;

pub struct Controller<R> {
    engine: SpinEngine<R>,
    debouncer: Debouncer,
    animation: AnimationConfig,
    overlay: Option<Timeline>,
}

impl<R: Rng> Controller<R> {
    pub fn new(engine: SpinEngine<R>) -> Self {
        Self {
            engine,
            debouncer: Debouncer::new(config::DEBOUNCE_MS),
            animation: AnimationConfig::default(),
            overlay: None,
        }
    }

    pub fn engine(&self) -> &SpinEngine<R> {
        &self.engine
    }

    pub fn is_overlay_active(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn play_startup(&mut self, now: u64) {
        self.overlay = Some(Timeline::startup(&self.animation, now));
    }

    /// Runs one loop iteration at `now` with the polled touch signal.
    pub fn step(&mut self, now: u64, pressed: bool) -> Option<SpinEvent> {
        if let Some(overlay) = &self.overlay {
            if !overlay.is_finished(now) {
                return None;
            }
            self.overlay = None;
        }

        let event = self.engine.tick(now);
        if let Some(SpinEvent::Stopped(selection)) = &event {
            self.overlay = Some(Timeline::result(&self.animation, &selection.label, now));
            return event;
        }

        if pressed && self.debouncer.accept(now) && self.engine.start(now) {
            return Some(SpinEvent::Entered(Phase::Accelerating));
        }
        event
    }

    pub fn draw(&self, renderer: &Renderer, canvas: &mut Canvas, now: u64) {
        let wheel = self.engine.wheel();
        let state = self.engine.state();
        match self.overlay.as_ref().and_then(|o| o.frame_at(now)) {
            Some(frame) => renderer.render_overlay(canvas, frame, wheel, state),
            None => renderer.render(canvas, wheel, state),
        }
    }
}

/// What a headless run observed
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub transitions: Vec<(u64, Phase)>,
    pub selection: Option<Selection>,
    pub final_angle: f64,
}

/// Drives a seeded controller in frame-period steps with the touch signal
/// held from `press_at` for one debounce interval, until the wheel settles or
/// `limit_ms` passes. No window and no intro.
pub fn simulate(seed: u64, press_at: u64, limit_ms: u64) -> SimulationReport {
    let engine = SpinEngine::seeded(WheelConfig::default(), seed);
    let mut controller = Controller::new(engine);
    let mut transitions = Vec::new();
    let mut selection = None;

    let mut now = 0;
    while now <= limit_ms {
        let pressed = (press_at..press_at + config::DEBOUNCE_MS).contains(&now);
        match controller.step(now, pressed) {
            Some(SpinEvent::Entered(phase)) => transitions.push((now, phase)),
            Some(SpinEvent::Stopped(result)) => {
                transitions.push((now, Phase::Idle));
                selection = Some(result);
                break;
            }
            None => {}
        }
        now += config::FRAME_PERIOD_MS;
    }

    if let Some(result) = &selection {
        info!("simulated spin settled on {} after {now} ms", result.label);
    }
    SimulationReport {
        transitions,
        selection,
        final_angle: controller.engine().state().angle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(seed: u64) -> Controller<rand::rngs::StdRng> {
        Controller::new(SpinEngine::seeded(WheelConfig::default(), seed))
    }

    /// Steps until the wheel stops, returning the time it stopped.
    fn spin_to_rest(controller: &mut Controller<rand::rngs::StdRng>, mut now: u64) -> u64 {
        loop {
            now += config::FRAME_PERIOD_MS;
            if let Some(SpinEvent::Stopped(_)) = controller.step(now, false) {
                return now;
            }
            assert!(now < 60_000, "spin never settled");
        }
    }

    #[test]
    fn press_starts_a_spin() {
        let mut controller = controller(3);
        assert_eq!(
            controller.step(0, true),
            Some(SpinEvent::Entered(Phase::Accelerating))
        );
        assert!(controller.engine().is_spinning());
    }

    #[test]
    fn held_press_does_not_restart_within_debounce() {
        let mut controller = controller(3);
        controller.step(0, true);
        let params = controller.engine().state().params;
        for now in (16..=496).step_by(16) {
            controller.step(now, true);
        }
        assert_eq!(controller.engine().state().params, params);
    }

    #[test]
    fn startup_overlay_swallows_presses() {
        let mut controller = controller(4);
        controller.play_startup(0);
        assert_eq!(controller.step(100, true), None);
        assert!(!controller.engine().is_spinning());
        assert!(controller.is_overlay_active());

        // Startup runs 1750 ms
        assert_eq!(
            controller.step(1750, true),
            Some(SpinEvent::Entered(Phase::Accelerating))
        );
        assert!(!controller.is_overlay_active());
    }

    #[test]
    fn result_overlay_follows_a_finished_spin() {
        let mut controller = controller(5);
        controller.step(0, true);
        let stopped_at = spin_to_rest(&mut controller, 0);
        assert!(controller.is_overlay_active());

        // Presses during the result sequence are ignored
        assert_eq!(controller.step(stopped_at + 1000, true), None);
        assert!(!controller.engine().is_spinning());

        // After it completes the next press spins again
        let done = stopped_at + 4300;
        assert_eq!(
            controller.step(done, true),
            Some(SpinEvent::Entered(Phase::Accelerating))
        );
    }

    #[test]
    fn simulation_is_deterministic_per_seed() {
        let first = simulate(77, 32, 60_000);
        let second = simulate(77, 32, 60_000);
        assert_eq!(first, second);
        assert!(first.selection.is_some());
    }

    #[test]
    fn simulation_visits_every_phase_in_order() {
        let report = simulate(2024, 0, 60_000);
        let phases: Vec<Phase> = report.transitions.iter().map(|(_, p)| *p).collect();
        assert_eq!(
            phases,
            [
                Phase::Accelerating,
                Phase::Constant,
                Phase::Decelerating,
                Phase::Idle
            ]
        );
        assert!(report.transitions.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
