// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod animation;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod render;
pub mod spin;
pub mod wheel;

// External crate imports
use bon::Builder;
use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub use canvas::Canvas;
pub use config::Color;
pub use controller::{simulate, Controller, SimulationReport};
pub use error::{Error, Result};
pub use render::Renderer;
pub use spin::{resolve_selection, Phase, Selection, SpinEngine, SpinEvent, SpinState};
pub use wheel::WheelConfig;

use input::TouchState;

/// Font used for every label on the wheel
pub const FONT_DATA: &[u8] = include_bytes!("DejaVuSansMono.ttf");

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

#[derive(Debug, Clone, Builder)]
pub struct FoodWheelConfig {
    #[builder(default = "Food Selection Wheel".to_string())]
    pub title: String,
    /// Window pixels per screen pixel
    #[builder(default = 2)]
    pub window_scale: u32,
    #[builder(default = config::FRAME_PERIOD_MS)]
    pub frame_period_ms: u64,
    /// Fixed seed for reproducible spins; OS entropy when unset
    pub seed: Option<u64>,
    #[builder(default = true)]
    pub show_intro: bool,
    #[builder(default = FONT_DATA)]
    pub font_data: &'static [u8],
}

impl FoodWheelConfig {
    /// Window side in logical pixels; a scale of zero counts as one
    pub fn window_side(&self) -> u32 {
        config::SCREEN_SIZE.saturating_mul(self.window_scale.max(1))
    }
}

/// The wheel gadget running in a desktop window
pub struct FoodWheel {
    config: FoodWheelConfig,
}

impl FoodWheel {
    pub fn new(config: FoodWheelConfig) -> Self {
        Self { config }
    }

    pub fn show(&self) -> Result<()> {
        let renderer = Renderer::new(self.config.font_data)?;
        let engine = match self.config.seed {
            Some(seed) => SpinEngine::seeded(WheelConfig::default(), seed),
            None => SpinEngine::from_entropy(WheelConfig::default()),
        };
        let mut controller = Controller::new(engine);
        self.run_window(&renderer, &mut controller)
    }

    fn run_window(
        &self,
        renderer: &Renderer,
        controller: &mut Controller<rand::rngs::StdRng>,
    ) -> Result<()> {
        let screen = config::SCREEN_SIZE;
        let logical = f64::from(self.config.window_side());

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(logical, logical))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = Arc::new(window);
        let window_clone = window.clone();
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(screen, screen, surface_texture)?;

        let mut touch = TouchState::new();
        let clock = Instant::now();
        let frame_duration = Duration::from_millis(self.config.frame_period_ms);
        let mut last_frame = Instant::now();

        if self.config.show_intro {
            controller.play_startup(0);
        }
        info!(
            "wheel running, {} ms frame period, touch with left click or space",
            self.config.frame_period_ms
        );

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => {
                    if touch.handle(&event) {
                        return;
                    }
                    match event {
                        WindowEvent::CloseRequested => {
                            window_target.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            if let Err(err) =
                                pixels.resize_surface(new_size.width, new_size.height)
                            {
                                warn!("failed to resize surface: {err}");
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            let now = clock.elapsed().as_millis() as u64;
                            controller.step(now, touch.is_pressed());

                            let side = screen as usize;
                            let mut canvas = Canvas::new(pixels.frame_mut(), side, side);
                            controller.draw(renderer, &mut canvas, now);
                            // One blit per frame
                            if let Err(err) = pixels.render() {
                                error!("failed to present frame: {err}");
                                window_target.exit();
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_device_constants() {
        let config = FoodWheelConfig::builder().build();
        assert_eq!(config.frame_period_ms, 16);
        assert_eq!(config.seed, None);
        assert!(config.show_intro);
        assert_eq!(config.font_data.len(), FONT_DATA.len());
    }

    #[test]
    fn window_side_scales_without_overflow() {
        let side = |scale: u32| FoodWheelConfig::builder().window_scale(scale).build().window_side();
        assert_eq!(side(0), 240);
        assert_eq!(side(3), 720);
        assert_eq!(side(u32::MAX), u32::MAX);
    }

    #[test]
    fn embedded_font_parses() {
        assert!(Renderer::new(FONT_DATA).is_ok());
    }

    #[test]
    fn garbage_font_is_rejected() {
        static NOT_A_FONT: [u8; 4] = [0, 1, 2, 3];
        assert!(matches!(Renderer::new(&NOT_A_FONT), Err(Error::Font)));
    }
}
