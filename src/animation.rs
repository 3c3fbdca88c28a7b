//! Timed overlay sequences shown instead of the wheel.
//!
//! The firmware played these with blocking delays. Here each sequence is a
//! list of frames with durations, sampled by the loop at the current time.

use crate::config::AnimationConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayFrame {
    /// Title growing on a black screen
    Title { font_size: f32 },
    /// Title at full size with the subtitle growing beneath it
    Subtitle { title_font_size: f32, font_size: f32 },
    /// Wheel fading toward a grey background; `step` counts up from 0
    Fade { step: u32, steps: u32 },
    /// Selected label on white at increasing size
    Reveal { label: String, font_size: f32 },
}

#[derive(Debug, Clone)]
pub struct Timeline {
    frames: Vec<(u64, OverlayFrame)>,
    started_at: u64,
}

impl Timeline {
    pub fn new(frames: Vec<(u64, OverlayFrame)>, started_at: u64) -> Self {
        Self { frames, started_at }
    }

    pub fn startup(config: &AnimationConfig, now: u64) -> Self {
        // Text grows one step every ten frames
        let grown = |base: f32, step: f32, frame: u32| base + step * (frame / 10) as f32;

        let mut frames = Vec::new();
        for i in 0..config.title_frames {
            frames.push((
                config.intro_frame_ms,
                OverlayFrame::Title {
                    font_size: grown(config.title_font_size, config.title_font_step, i),
                },
            ));
        }
        if let Some((_, last)) = frames.last().cloned() {
            frames.push((config.title_hold_ms, last));
        }

        let title_font_size = grown(
            config.title_font_size,
            config.title_font_step,
            config.title_frames.saturating_sub(1),
        );
        for i in 0..config.subtitle_frames {
            frames.push((
                config.intro_frame_ms,
                OverlayFrame::Subtitle {
                    title_font_size,
                    font_size: grown(config.subtitle_font_size, config.subtitle_font_step, i),
                },
            ));
        }
        if let Some((_, last)) = frames.last().cloned() {
            frames.push((config.intro_hold_ms, last));
        }
        Self::new(frames, now)
    }

    pub fn result(config: &AnimationConfig, label: &str, now: u64) -> Self {
        let mut frames: Vec<(u64, OverlayFrame)> = (0..config.fade_steps)
            .map(|step| {
                (
                    config.fade_step_ms,
                    OverlayFrame::Fade {
                        step,
                        steps: config.fade_steps,
                    },
                )
            })
            .collect();

        for scale in 1..=config.reveal_steps {
            frames.push((
                config.reveal_step_ms * u64::from(scale),
                OverlayFrame::Reveal {
                    label: label.to_string(),
                    font_size: config.reveal_font_size * scale as f32,
                },
            ));
        }
        if let Some((_, last)) = frames.last().cloned() {
            frames.push((config.result_hold_ms, last));
        }
        Self::new(frames, now)
    }

    pub fn duration(&self) -> u64 {
        self.frames.iter().map(|(ms, _)| ms).sum()
    }

    pub fn is_finished(&self, now: u64) -> bool {
        now.saturating_sub(self.started_at) >= self.duration()
    }

    /// Frame showing at `now`, or `None` once the sequence has run out.
    pub fn frame_at(&self, now: u64) -> Option<&OverlayFrame> {
        let mut remaining = now.saturating_sub(self.started_at);
        for (duration, frame) in &self.frames {
            if remaining < *duration {
                return Some(frame);
            }
            remaining -= duration;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_sequence_timing() {
        let config = AnimationConfig::default();
        let timeline = Timeline::result(&config, "Pizza", 1000);
        // 10 x 50 fade, 180 + 360 + 540 + 720 reveal, 2000 hold
        assert_eq!(timeline.duration(), 500 + 1800 + 2000);
        assert!(!timeline.is_finished(1000 + 4299));
        assert!(timeline.is_finished(1000 + 4300));
    }

    #[test]
    fn result_sequence_fades_then_reveals() {
        let config = AnimationConfig::default();
        let timeline = Timeline::result(&config, "Pizza", 0);

        assert_eq!(
            timeline.frame_at(0),
            Some(&OverlayFrame::Fade { step: 0, steps: 10 })
        );
        assert_eq!(
            timeline.frame_at(499),
            Some(&OverlayFrame::Fade { step: 9, steps: 10 })
        );
        assert_eq!(
            timeline.frame_at(500),
            Some(&OverlayFrame::Reveal {
                label: "Pizza".into(),
                font_size: 12.0
            })
        );
        assert_eq!(
            timeline.frame_at(4000),
            Some(&OverlayFrame::Reveal {
                label: "Pizza".into(),
                font_size: 48.0
            })
        );
        assert_eq!(timeline.frame_at(4300), None);
    }

    #[test]
    fn startup_sequence_grows_title_then_subtitle() {
        let config = AnimationConfig::default();
        let timeline = Timeline::startup(&config, 0);

        assert_eq!(timeline.duration(), 30 * 5 + 500 + 20 * 5 + 1000);
        assert_eq!(
            timeline.frame_at(0),
            Some(&OverlayFrame::Title { font_size: 12.0 })
        );
        assert_eq!(
            timeline.frame_at(149),
            Some(&OverlayFrame::Title { font_size: 20.0 })
        );
        assert_eq!(
            timeline.frame_at(600),
            Some(&OverlayFrame::Title { font_size: 20.0 })
        );
        assert_eq!(
            timeline.frame_at(650),
            Some(&OverlayFrame::Subtitle {
                title_font_size: 20.0,
                font_size: 8.0
            })
        );
        assert_eq!(
            timeline.frame_at(1700),
            Some(&OverlayFrame::Subtitle {
                title_font_size: 20.0,
                font_size: 10.0
            })
        );
    }

    #[test]
    fn timeline_before_start_shows_first_frame() {
        let config = AnimationConfig::default();
        let timeline = Timeline::result(&config, "Bun", 500);
        assert_eq!(
            timeline.frame_at(100),
            Some(&OverlayFrame::Fade { step: 0, steps: 10 })
        );
    }
}
