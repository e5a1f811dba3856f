use eframe::egui::{
    self, Align2, CentralPanel, Color32, Context, FontId, Frame, Pos2, RichText, Sense, Vec2,
    vec2,
};

use crate::util::stable_unit;

const BRIGHTNESS_RAMP: &[u8] = b" .:-=+*#%@";
const FONT_SIZE: f32 = 12.0;
const CELL: Vec2 = Vec2::new(FONT_SIZE * 0.6, FONT_SIZE);
const CANVAS_SIDE: f32 = 500.0;
const TIME_STEP: f32 = 0.03;
const PROGRESS_INTERVAL_SECS: f32 = 0.05;
const COMPLETE_DELAY_SECS: f32 = 0.5;
const BACKDROP: Color32 = Color32::from_rgb(5, 5, 5);
const GROOVE_GREY: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);

/// Brightness of one cell of the spinning record. `noise` is a uniform roll in `[0, 1)`.
pub(in crate::app) fn vinyl_brightness(
    cell: Vec2,
    center: Vec2,
    max_radius: f32,
    rotation: f32,
    noise: f32,
) -> f32 {
    let delta = cell - center;
    let distance = delta.length() / max_radius;
    let angle = delta.y.atan2(delta.x);

    if distance < 1.0 && distance > 0.15 {
        if distance < 0.35 {
            return 0.8 + (cell.x * 0.1 + cell.y * 0.1).sin() * 0.1;
        }
        let groove = (distance * 100.0).sin();
        let reflection = ((angle + rotation) * 2.0).cos();
        0.3 + groove * 0.1 + reflection * 0.4
    } else if distance <= 0.15 {
        0.0
    } else if noise > 0.995 {
        0.2
    } else {
        0.0
    }
}

pub(in crate::app) fn brightness_char(brightness: f32) -> char {
    let last = BRIGHTNESS_RAMP.len() - 1;
    let index = (brightness * last as f32).floor().clamp(0.0, last as f32) as usize;
    BRIGHTNESS_RAMP[index] as char
}

/// Intro splash: an ASCII record spinning while a fake progress counter climbs.
pub(in crate::app) struct LoadingScreen {
    progress: u32,
    time: f32,
    tick_secs: f32,
    ticks: u64,
    finished_secs: Option<f32>,
    frame: u64,
}

impl LoadingScreen {
    pub(in crate::app) fn new() -> Self {
        Self {
            progress: 0,
            time: 0.0,
            tick_secs: 0.0,
            ticks: 0,
            finished_secs: None,
            frame: 0,
        }
    }

    pub(in crate::app) fn is_complete(&self) -> bool {
        self.finished_secs
            .is_some_and(|elapsed| elapsed >= COMPLETE_DELAY_SECS)
    }

    fn advance(&mut self, delta_secs: f32) {
        let delta_secs = delta_secs.clamp(0.0, 1.0);
        self.time += TIME_STEP;
        self.frame = self.frame.wrapping_add(1);

        if let Some(elapsed) = self.finished_secs.as_mut() {
            *elapsed += delta_secs;
            return;
        }

        self.tick_secs += delta_secs;
        while self.tick_secs >= PROGRESS_INTERVAL_SECS && self.progress < 100 {
            self.tick_secs -= PROGRESS_INTERVAL_SECS;
            self.ticks += 1;
            let step = 1 + (stable_unit(("loading", self.ticks)) * 5.0) as u32;
            self.progress = (self.progress + step.min(5)).min(100);
        }

        if self.progress >= 100 {
            tracing::debug!("intro finished");
            self.finished_secs = Some(0.0);
        }
    }

    fn fade(&self) -> f32 {
        self.finished_secs
            .map_or(1.0, |elapsed| 1.0 - (elapsed / COMPLETE_DELAY_SECS).clamp(0.0, 1.0))
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.advance(ctx.input(|input| input.stable_dt));
        let fade = self.fade();

        CentralPanel::default()
            .frame(Frame::NONE.fill(BACKDROP))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    let side = CANVAS_SIDE.min(ui.available_width()).min(ui.available_height() - 120.0).max(120.0);
                    ui.add_space(((ui.available_height() - side - 120.0) * 0.5).max(0.0));

                    let (rect, _) = ui.allocate_exact_size(vec2(side, side), Sense::hover());
                    self.paint_record(&ui.painter_at(rect), rect.min, rect.size(), fade * 0.8);

                    ui.add_space(24.0);
                    ui.label(
                        RichText::new("AUDIOGRAPH")
                            .monospace()
                            .strong()
                            .size(32.0)
                            .color(Color32::WHITE.gamma_multiply(fade)),
                    );
                    ui.add_space(6.0);
                    let info = Color32::GRAY.gamma_multiply(fade);
                    ui.label(RichText::new("> INITIALIZING_DATABASE_V2.0...").monospace().size(11.0).color(info));
                    ui.label(
                        RichText::new(format!("> LOADING_ASSETS [{}%]", self.progress))
                            .monospace()
                            .size(11.0)
                            .color(info),
                    );
                });
            });

        ctx.request_repaint();
    }

    fn paint_record(&self, painter: &egui::Painter, origin: Pos2, size: Vec2, opacity: f32) {
        let cols = (size.x / CELL.x).floor() as usize;
        let rows = (size.y / CELL.y).floor() as usize;
        let center = size * 0.5;
        let max_radius = size.x.min(size.y) * 0.45;
        let rotation = self.time * 0.5;
        let font = FontId::monospace(FONT_SIZE);

        for row in 0..rows {
            for col in 0..cols {
                let cell = vec2(
                    col as f32 * CELL.x + CELL.x * 0.5,
                    row as f32 * CELL.y + CELL.y * 0.5,
                );
                let noise = stable_unit((self.frame, row, col));
                let brightness = vinyl_brightness(cell, center, max_radius, rotation, noise);
                if brightness <= 0.1 {
                    continue;
                }

                let color = if brightness > 0.8 {
                    Color32::WHITE
                } else {
                    GROOVE_GREY
                };
                painter.text(
                    origin + cell,
                    Align2::CENTER_CENTER,
                    brightness_char(brightness),
                    font.clone(),
                    color.gamma_multiply(opacity),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Vec2 = Vec2::new(250.0, 250.0);

    #[test]
    fn test_brightness_char_ramp() {
        assert_eq!(brightness_char(0.0), ' ');
        assert_eq!(brightness_char(0.2), '.');
        assert_eq!(brightness_char(0.5), '=');
        assert_eq!(brightness_char(1.0), '@');
        assert_eq!(brightness_char(1.7), '@');
        assert_eq!(brightness_char(-0.3), ' ');
    }

    #[test]
    fn test_record_hole_is_dark() {
        assert_eq!(vinyl_brightness(CENTER, CENTER, 225.0, 0.0, 0.999), 0.0);
        assert_eq!(
            vinyl_brightness(CENTER + vec2(20.0, 0.0), CENTER, 225.0, 0.0, 0.999),
            0.0
        );
    }

    #[test]
    fn test_label_ring_is_bright() {
        let cell = CENTER + vec2(50.0, 0.0);
        let brightness = vinyl_brightness(cell, CENTER, 225.0, 1.3, 0.0);
        assert!((0.7..=0.9).contains(&brightness));
    }

    #[test]
    fn test_grooves_follow_reflection() {
        let cell = CENTER + vec2(150.0, 0.0);
        let distance = 150.0_f32 / 225.0;
        let expected = 0.3 + (distance * 100.0).sin() * 0.1 + (2.0_f32 * 0.0).cos() * 0.4;
        assert!((vinyl_brightness(cell, CENTER, 225.0, 0.0, 0.0) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_noise_outside_record() {
        let outside = CENTER + vec2(240.0, 0.0);
        assert_eq!(vinyl_brightness(outside, CENTER, 225.0, 0.0, 0.999), 0.2);
        assert_eq!(vinyl_brightness(outside, CENTER, 225.0, 0.0, 0.5), 0.0);
    }

    #[test]
    fn test_progress_completes_after_delay() {
        let mut screen = LoadingScreen::new();
        let mut frames = 0;
        while screen.finished_secs.is_none() {
            screen.advance(0.05);
            frames += 1;
            assert!(frames <= 100, "progress never reached 100");
        }
        assert_eq!(screen.progress, 100);
        assert!(frames >= 20);
        assert!(!screen.is_complete());

        for _ in 0..11 {
            screen.advance(0.05);
        }
        assert!(screen.is_complete());
        assert_eq!(screen.fade(), 0.0);
    }
}
