use std::f64::consts::TAU;

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;

/// RGBA8 frame buffer the wheel is drawn into before it is presented
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        debug_assert_eq!(frame.len(), width * height * 4);
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
        ))
    }

    /// Blends `color` over the pixel with coverage `alpha`; off-screen
    /// coordinates are ignored.
    pub fn blend(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let mix = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
        let out = [
            mix(color.r, self.frame[idx]),
            mix(color.g, self.frame[idx + 1]),
            mix(color.b, self.frame[idx + 2]),
            0xff,
        ];
        self.frame[idx..idx + 4].copy_from_slice(&out);
    }

    /// Washes the whole frame toward `color`
    pub fn wash(&mut self, color: Color, alpha: f32) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                self.blend(x, y, color, alpha);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        for y in -radius - 1..=radius + 1 {
            for x in -radius - 1..=radius + 1 {
                let dist = ((x * x + y * y) as f64).sqrt();
                let aa = (1.0 - (dist - radius as f64).max(0.0)).max(0.0);
                if aa > 0.0 {
                    self.blend(cx + x, cy + y, color, aa as f32);
                }
            }
        }
    }

    /// Circle outline `thickness` pixels wide, inside radius `r`
    pub fn ring(&mut self, cx: i32, cy: i32, r: i32, thickness: i32, color: Color) {
        let inner = (r - thickness) as f64;
        for y in -r - 1..=r + 1 {
            for x in -r - 1..=r + 1 {
                let dist = ((x * x + y * y) as f64).sqrt();
                let aa = if dist > r as f64 {
                    1.0 - (dist - r as f64).min(1.0)
                } else if dist < inner {
                    1.0 - (inner - dist).min(1.0)
                } else {
                    1.0
                };
                if aa > 0.0 {
                    self.blend(cx + x, cy + y, color, aa as f32);
                }
            }
        }
    }

    /// Annular wedge starting at `start` (screen angle, clockwise from +x)
    /// and spanning `span` radians.
    pub fn fill_sector(
        &mut self,
        cx: i32,
        cy: i32,
        inner: i32,
        outer: i32,
        start: f64,
        span: f64,
        color: Color,
    ) {
        for y in -outer..=outer {
            for x in -outer..=outer {
                let dist = ((x * x + y * y) as f64).sqrt();
                if dist < inner as f64 || dist > outer as f64 {
                    continue;
                }
                let angle = (y as f64).atan2(x as f64);
                if (angle - start).rem_euclid(TAU) < span {
                    self.blend(cx + x, cy + y, color, 1.0);
                }
            }
        }
    }

    /// Anti-aliased segment `thickness` pixels wide.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), thickness: f32, color: Color) {
        let (ax, ay) = (from.0 as f32, from.1 as f32);
        let (ux, uy) = (to.0 as f32 - ax, to.1 as f32 - ay);
        let length_sq = ux * ux + uy * uy;
        let half = thickness / 2.0;
        let reach = half.ceil() as i32 + 1;

        for y in from.1.min(to.1) - reach..=from.1.max(to.1) + reach {
            for x in from.0.min(to.0) - reach..=from.0.max(to.0) + reach {
                let (vx, vy) = (x as f32 - ax, y as f32 - ay);
                // Closest point on the segment, as a fraction of its length
                let t = if length_sq > 0.0 {
                    ((vx * ux + vy * uy) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let coverage = (half + 1.0 - (vx - t * ux).hypot(vy - t * uy)).min(1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    pub fn fill_triangle(&mut self, points: [(i32, i32); 3], color: Color) {
        let [(ax, ay), (bx, by), (cx, cy)] = points;
        let edge = |x0: i32, y0: i32, x1: i32, y1: i32, x: i32, y: i32| {
            (x1 - x0) * (y - y0) - (y1 - y0) * (x - x0)
        };
        let area = edge(ax, ay, bx, by, cx, cy);
        if area == 0 {
            return;
        }
        for y in ay.min(by).min(cy)..=ay.max(by).max(cy) {
            for x in ax.min(bx).min(cx)..=ax.max(bx).max(cx) {
                let w0 = edge(bx, by, cx, cy, x, y);
                let w1 = edge(cx, cy, ax, ay, x, y);
                let w2 = edge(ax, ay, bx, by, x, y);
                let inside = if area > 0 {
                    w0 >= 0 && w1 >= 0 && w2 >= 0
                } else {
                    w0 <= 0 && w1 <= 0 && w2 <= 0
                };
                if inside {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }

    /// Draws `text` with its advance width and line box centred on `(x, y)`.
    pub fn text(&mut self, font: &Font, x: i32, y: i32, text: &str, size: f32, color: Color) {
        let scale = Scale::uniform(size);
        let metrics = font.v_metrics(scale);
        let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(0.0, 0.0)).collect();
        let advance = glyphs.last().map_or(0.0, |g| {
            g.position().x + g.unpositioned().h_metrics().advance_width
        });

        let left = (x as f32 - advance / 2.0).round() as i32;
        // Descent is negative, so this puts the line box midpoint on `y`
        let baseline = (y as f32 + (metrics.ascent + metrics.descent) / 2.0).round() as i32;

        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                self.blend(
                    left + bb.min.x + gx as i32,
                    baseline + bb.min.y + gy as i32,
                    color,
                    coverage,
                );
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BLACK, RED, WHITE};
    use std::f64::consts::FRAC_PI_2;

    fn buffer(size: usize) -> Vec<u8> {
        vec![0; size * size * 4]
    }

    #[test]
    fn blend_ignores_out_of_bounds() {
        let mut frame = buffer(4);
        let mut canvas = Canvas::new(&mut frame, 4, 4);
        canvas.clear(BLACK);
        canvas.blend(-1, 0, WHITE, 1.0);
        canvas.blend(4, 4, WHITE, 1.0);
        assert!((0..4).all(|x| canvas.pixel(x, 0) == Some(BLACK)));
    }

    #[test]
    fn blend_mixes_by_alpha() {
        let mut frame = buffer(2);
        let mut canvas = Canvas::new(&mut frame, 2, 2);
        canvas.clear(BLACK);
        canvas.blend(0, 0, WHITE, 0.5);
        assert_eq!(canvas.pixel(0, 0), Some(Color::grey(128)));
    }

    #[test]
    fn sector_covers_only_its_wedge() {
        let mut frame = buffer(100);
        let mut canvas = Canvas::new(&mut frame, 100, 100);
        canvas.clear(BLACK);
        // Quarter wedge pointing straight up
        canvas.fill_sector(50, 50, 10, 40, -FRAC_PI_2 - 0.4, 0.8, RED);
        assert_eq!(canvas.pixel(50, 25), Some(RED));
        assert_eq!(canvas.pixel(50, 75), Some(BLACK));
        assert_eq!(canvas.pixel(50, 45), Some(BLACK));
    }

    #[test]
    fn triangle_fills_interior() {
        let mut frame = buffer(40);
        let mut canvas = Canvas::new(&mut frame, 40, 40);
        canvas.clear(BLACK);
        canvas.fill_triangle([(20, 25), (10, 5), (30, 5)], RED);
        assert_eq!(canvas.pixel(20, 10), Some(RED));
        assert_eq!(canvas.pixel(12, 22), Some(BLACK));
    }

    #[test]
    fn ring_leaves_centre_untouched() {
        let mut frame = buffer(60);
        let mut canvas = Canvas::new(&mut frame, 60, 60);
        canvas.clear(BLACK);
        canvas.ring(30, 30, 20, 1, WHITE);
        assert_eq!(canvas.pixel(30, 30), Some(BLACK));
        assert_eq!(canvas.pixel(50, 30), Some(WHITE));
    }

    #[test]
    fn line_covers_its_path_and_nothing_far_off() {
        let mut frame = buffer(20);
        let mut canvas = Canvas::new(&mut frame, 20, 20);
        canvas.clear(BLACK);
        canvas.line((2, 10), (17, 10), 1.0, WHITE);
        assert_eq!(canvas.pixel(9, 10), Some(WHITE));
        assert_eq!(canvas.pixel(9, 14), Some(BLACK));
        assert_eq!(canvas.pixel(0, 10), Some(BLACK));
    }

    #[test]
    fn degenerate_line_draws_a_dot() {
        let mut frame = buffer(10);
        let mut canvas = Canvas::new(&mut frame, 10, 10);
        canvas.clear(BLACK);
        canvas.line((5, 5), (5, 5), 1.0, WHITE);
        assert_eq!(canvas.pixel(5, 5), Some(WHITE));
        assert_eq!(canvas.pixel(8, 8), Some(BLACK));
    }

    #[test]
    fn text_is_centred_on_its_anchor() {
        let font = Font::try_from_bytes(crate::FONT_DATA).expect("embedded font parses");
        let mut frame = buffer(80);
        let mut canvas = Canvas::new(&mut frame, 80, 80);
        canvas.clear(BLACK);
        canvas.text(&font, 40, 40, "MMMM", 16.0, WHITE);

        let lit: Vec<(usize, usize)> = (0..80)
            .flat_map(|y| (0..80).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) != Some(BLACK))
            .collect();
        assert!(!lit.is_empty());
        let (min_x, max_x) = lit.iter().fold((80, 0), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
        let (min_y, max_y) = lit.iter().fold((80, 0), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        assert!(((min_x + max_x) as i32 / 2 - 40).abs() <= 3);
        assert!(((min_y + max_y) as i32 / 2 - 40).abs() <= 4);
    }

    #[test]
    fn wash_fully_covers_frame() {
        let mut frame = buffer(3);
        let mut canvas = Canvas::new(&mut frame, 3, 3);
        canvas.clear(BLACK);
        canvas.wash(WHITE, 1.0);
        assert!((0..3).all(|y| (0..3).all(|x| canvas.pixel(x, y) == Some(WHITE))));
    }
}
