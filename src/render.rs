//! Wheel renderer.
//!
//! Each frame is first described as a [`Scene`] of draw commands, then
//! rasterised onto a [`Canvas`]. The caller presents the canvas in one blit.

use std::f64::consts::{FRAC_PI_2, TAU};

use rusttype::Font;

use crate::animation::OverlayFrame;
use crate::canvas::Canvas;
use crate::config::{self, AnimationConfig, Color, Palette, WheelGeometry};
use crate::error::{Error, Result};
use crate::spin::SpinState;
use crate::wheel::WheelConfig;

pub const STATUS_IDLE: &str = "Press";
pub const STATUS_SPINNING: &str = "Rotating";
pub const STATUS_STOPPED: &str = "Eat it!";

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Wash {
        color: Color,
        alpha: f32,
    },
    Ring {
        cx: i32,
        cy: i32,
        r: i32,
        color: Color,
    },
    Sector {
        index: usize,
        cx: i32,
        cy: i32,
        inner: i32,
        outer: i32,
        start: f64,
        span: f64,
        color: Color,
    },
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        thickness: f32,
        color: Color,
    },
    Disc {
        cx: i32,
        cy: i32,
        radius: i32,
        color: Color,
    },
    Triangle {
        points: [(i32, i32); 3],
        color: Color,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        font_size: f32,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn render(&self, canvas: &mut Canvas, font: &Font) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Wash { color, alpha } => canvas.wash(*color, *alpha),
                DrawCommand::Ring { cx, cy, r, color } => canvas.ring(*cx, *cy, *r, 1, *color),
                DrawCommand::Sector {
                    cx,
                    cy,
                    inner,
                    outer,
                    start,
                    span,
                    color,
                    ..
                } => canvas.fill_sector(*cx, *cy, *inner, *outer, *start, *span, *color),
                DrawCommand::Line {
                    x0,
                    y0,
                    x1,
                    y1,
                    thickness,
                    color,
                } => canvas.line((*x0, *y0), (*x1, *y1), *thickness, *color),
                DrawCommand::Disc {
                    cx,
                    cy,
                    radius,
                    color,
                } => canvas.fill_circle(*cx, *cy, *radius, *color),
                DrawCommand::Triangle { points, color } => canvas.fill_triangle(*points, *color),
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font_size,
                    color,
                } => canvas.text(font, *x, *y, text, *font_size, *color),
            }
        }
    }
}

/// Status shown in the hub for the given spin state
pub fn status_label(state: &SpinState) -> &'static str {
    if state.is_spinning() {
        STATUS_SPINNING
    } else if state.selected.is_some() {
        STATUS_STOPPED
    } else {
        STATUS_IDLE
    }
}

pub struct Renderer {
    font: Font<'static>,
    geometry: WheelGeometry,
    palette: Palette,
    animation: AnimationConfig,
}

impl Renderer {
    pub fn new(font_data: &'static [u8]) -> Result<Self> {
        let font = Font::try_from_bytes(font_data).ok_or(Error::Font)?;
        Ok(Self {
            font,
            geometry: WheelGeometry::default(),
            palette: Palette::default(),
            animation: AnimationConfig::default(),
        })
    }

    pub fn render(&self, canvas: &mut Canvas, wheel: &WheelConfig, state: &SpinState) {
        self.wheel_scene(wheel, state).render(canvas, &self.font);
    }

    pub fn render_overlay(
        &self,
        canvas: &mut Canvas,
        frame: &OverlayFrame,
        wheel: &WheelConfig,
        state: &SpinState,
    ) {
        self.overlay_scene(frame, wheel, state)
            .render(canvas, &self.font);
    }

    pub fn wheel_scene(&self, wheel: &WheelConfig, state: &SpinState) -> Scene {
        let mut scene = Scene::new();
        self.add_wheel(&mut scene, wheel, state);
        scene
    }

    pub fn overlay_scene(
        &self,
        frame: &OverlayFrame,
        wheel: &WheelConfig,
        state: &SpinState,
    ) -> Scene {
        let (cx, cy) = (config::CENTER_X, config::CENTER_Y);
        let mut scene = Scene::new();
        match frame {
            OverlayFrame::Title { font_size } => {
                scene.add_command(DrawCommand::Clear(config::BLACK));
                scene.add_command(DrawCommand::Text {
                    x: cx,
                    y: cy,
                    text: self.animation.title.to_string(),
                    font_size: *font_size,
                    color: config::WHITE,
                });
            }
            OverlayFrame::Subtitle {
                title_font_size,
                font_size,
            } => {
                scene.add_command(DrawCommand::Clear(config::BLACK));
                scene.add_command(DrawCommand::Text {
                    x: cx,
                    y: cy - 20,
                    text: self.animation.title.to_string(),
                    font_size: *title_font_size,
                    color: config::WHITE,
                });
                scene.add_command(DrawCommand::Text {
                    x: cx,
                    y: cy + 30,
                    text: self.animation.subtitle.to_string(),
                    font_size: *font_size,
                    color: config::WHITE,
                });
            }
            OverlayFrame::Fade { step, steps } => {
                let level = (step * 25).min(255) as u8;
                self.add_wheel(&mut scene, wheel, state);
                scene.add_command(DrawCommand::Wash {
                    color: Color::grey(level),
                    alpha: *step as f32 / (*steps).max(1) as f32,
                });
            }
            OverlayFrame::Reveal { label, font_size } => {
                scene.add_command(DrawCommand::Clear(config::WHITE));
                scene.add_command(DrawCommand::Text {
                    x: cx,
                    y: cy,
                    text: label.clone(),
                    font_size: *font_size,
                    color: config::BLACK,
                });
            }
        }
        scene
    }

    fn add_wheel(&self, scene: &mut Scene, wheel: &WheelConfig, state: &SpinState) {
        let geometry = &self.geometry;
        let palette = &self.palette;
        let (cx, cy) = (config::CENTER_X, config::CENTER_Y);
        let radius = geometry.ring_radius;

        scene.add_command(DrawCommand::Clear(palette.background));
        scene.add_command(DrawCommand::Ring {
            cx,
            cy,
            r: radius,
            color: palette.outline,
        });

        let span = TAU / wheel.len().max(1) as f64;
        let highlighted = if state.is_spinning() {
            None
        } else {
            state.selected
        };
        let label_radius = (radius as f64 * geometry.label_radius_factor).trunc();

        for (i, label) in wheel.labels().iter().enumerate() {
            // Sector 0 starts at the top when the wheel is at rest
            let start = state.angle + i as f64 * span - FRAC_PI_2;
            let color = if highlighted == Some(i) {
                palette.highlight
            } else {
                wheel.color(i)
            };

            scene.add_command(DrawCommand::Sector {
                index: i,
                cx,
                cy,
                inner: geometry.hub_radius,
                outer: geometry.sector_radius,
                start,
                span,
                color,
            });
            scene.add_command(DrawCommand::Line {
                x0: cx,
                y0: cy,
                x1: cx + (start.cos() * radius as f64) as i32,
                y1: cy + (start.sin() * radius as f64) as i32,
                thickness: geometry.divider_thickness,
                color: palette.outline,
            });

            let text_angle = start + span / 2.0;
            scene.add_command(DrawCommand::Text {
                x: cx + (label_radius * text_angle.cos()) as i32,
                y: cy + (label_radius * text_angle.sin()) as i32,
                text: label.clone(),
                font_size: geometry.label_font_size,
                color: palette.label,
            });
        }

        scene.add_command(DrawCommand::Disc {
            cx,
            cy,
            radius: geometry.hub_radius,
            color: palette.hub,
        });
        scene.add_command(DrawCommand::Ring {
            cx,
            cy,
            r: geometry.hub_radius,
            color: palette.outline,
        });
        scene.add_command(DrawCommand::Text {
            x: cx,
            y: cy,
            text: status_label(state).to_string(),
            font_size: geometry.hub_font_size,
            color: palette.hub_text,
        });
        scene.add_command(DrawCommand::Triangle {
            points: geometry.pointer,
            color: palette.pointer,
        });
    }
}
