/// Color representation for wheel elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
pub const ORANGE: Color = Color::new(0xff, 0xa5, 0x00);
pub const DARK_CYAN: Color = Color::new(0x00, 0x80, 0x80);
pub const RED: Color = Color::new(0xff, 0x00, 0x00);
pub const DARK_GREY: Color = Color::new(0x80, 0x80, 0x80);

/// Food options shown on the wheel, in their initial order
pub const FOOD_OPTIONS: [&str; 12] = [
    "Rice", "Noodle", "Jiaozi", "Bun", "Bread", "Porridge", "Null", "MM", "KFC", "Pizza",
    "BugerK", "Kebab",
];

// Screen
pub const SCREEN_SIZE: u32 = 240;
pub const SCREEN_RADIUS: i32 = 120;
pub const CENTER_X: i32 = 120;
pub const CENTER_Y: i32 = 120;

// Loop timing (milliseconds)
pub const FRAME_PERIOD_MS: u64 = 16;
pub const DEBOUNCE_MS: u64 = 500;

// Spin physics, speeds in radians per tick
pub const SEED_SPEED: f64 = 0.1;
pub const STOP_SPEED: f64 = 0.01;
pub const JITTER_PROBABILITY: f64 = 0.2;
pub const JITTER_BAND: (f64, f64) = (0.95, 1.05);

/// Ranges the per-spin parameters are drawn from
#[derive(Debug, Clone)]
pub struct SpinTuning {
    pub max_speed: (f64, f64),
    pub acceleration_rate: (f64, f64),
    pub deceleration_rate: (f64, f64),
    /// Upper bound (exclusive) of each of the two draws summed into the
    /// constant-phase duration
    pub constant_half_ms: u64,
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self {
            max_speed: (0.4, 0.6),
            acceleration_rate: (0.05, 0.10),
            deceleration_rate: (0.01, 0.04),
            constant_half_ms: 2000,
        }
    }
}

/// Configuration for the wheel's on-screen geometry
#[derive(Debug, Clone)]
pub struct WheelGeometry {
    pub ring_radius: i32,
    pub sector_radius: i32,
    pub hub_radius: i32,
    pub label_radius_factor: f64,
    pub label_font_size: f32,
    pub hub_font_size: f32,
    pub divider_thickness: f32,
    pub pointer: [(i32, i32); 3],
}

impl Default for WheelGeometry {
    fn default() -> Self {
        let ring_radius = SCREEN_RADIUS - 5;
        Self {
            ring_radius,
            sector_radius: ring_radius - 10,
            hub_radius: 30,
            label_radius_factor: 0.7,
            label_font_size: 12.0,
            hub_font_size: 11.0,
            divider_thickness: 1.0,
            pointer: [(CENTER_X, 25), (CENTER_X - 10, 5), (CENTER_X + 10, 5)],
        }
    }
}

/// Colors used by the wheel
#[derive(Debug, Clone)]
pub struct Palette {
    pub background: Color,
    pub highlight: Color,
    pub outline: Color,
    pub label: Color,
    pub hub: Color,
    pub hub_text: Color,
    pub pointer: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: BLACK,
            highlight: RED,
            outline: WHITE,
            label: BLACK,
            hub: DARK_GREY,
            hub_text: WHITE,
            pointer: RED,
        }
    }
}

/// Timings and text for the startup and result sequences
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub title_frames: u32,
    pub subtitle_frames: u32,
    pub intro_frame_ms: u64,
    pub title_hold_ms: u64,
    pub intro_hold_ms: u64,
    pub title_font_size: f32,
    pub title_font_step: f32,
    pub subtitle_font_size: f32,
    pub subtitle_font_step: f32,
    pub fade_steps: u32,
    pub fade_step_ms: u64,
    pub reveal_steps: u32,
    pub reveal_step_ms: u64,
    pub reveal_font_size: f32,
    pub result_hold_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            title: "Food Selection Wheel",
            subtitle: "Helps you decide what to eat",
            title_frames: 30,
            subtitle_frames: 20,
            intro_frame_ms: 5,
            title_hold_ms: 500,
            intro_hold_ms: 1000,
            title_font_size: 12.0,
            title_font_step: 4.0,
            subtitle_font_size: 8.0,
            subtitle_font_step: 2.0,
            fade_steps: 10,
            fade_step_ms: 50,
            reveal_steps: 4,
            reveal_step_ms: 180,
            reveal_font_size: 12.0,
            result_hold_ms: 2000,
        }
    }
}
