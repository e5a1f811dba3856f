use std::collections::VecDeque;

use eframe::egui::{Align2, Area, Color32, Context, Id, Order, Rect, RichText, Sense, vec2};

use super::super::render_utils::{TERMINAL_GREEN, with_alpha};

const TERMINAL_LINES: usize = 6;
const PROMPT: &str = "root@audiograph:~/viz$";

/// Rolling log shown in the bottom-left corner of the canvas.
pub(in crate::app) struct TerminalLog {
    lines: VecDeque<String>,
}

impl TerminalLog {
    pub(in crate::app) fn new() -> Self {
        let mut log = Self {
            lines: VecDeque::with_capacity(TERMINAL_LINES + 1),
        };
        log.push("> CONNECTING_TO_CORE...");
        log.push("> READY.");
        log
    }

    pub(in crate::app) fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > TERMINAL_LINES {
            self.lines.pop_front();
        }
    }

    pub(in crate::app) fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub(in crate::app) fn show(&self, ctx: &Context, canvas: Rect) {
        let cursor_visible = ctx.input(|input| input.time.fract() < 0.5);

        Area::new(Id::new("terminal_output"))
            .order(Order::Middle)
            .interactable(false)
            .pivot(Align2::LEFT_BOTTOM)
            .fixed_pos(canvas.left_bottom() + vec2(24.0, -24.0))
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing.y = 2.0;
                for line in self.lines() {
                    ui.label(
                        RichText::new(line)
                            .monospace()
                            .size(11.0)
                            .color(with_alpha(TERMINAL_GREEN, 0.55)),
                    );
                }
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(PROMPT)
                            .monospace()
                            .size(11.0)
                            .color(with_alpha(Color32::WHITE, 0.5)),
                    );
                    let (cursor, _) = ui.allocate_exact_size(vec2(8.0, 14.0), Sense::hover());
                    if cursor_visible {
                        ui.painter()
                            .rect_filled(cursor, 0.0, with_alpha(Color32::WHITE, 0.5));
                    }
                });
            });
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_boot_lines() {
        let log = TerminalLog::new();
        assert_eq!(
            log.lines().collect::<Vec<_>>(),
            vec!["> CONNECTING_TO_CORE...", "> READY."]
        );
    }

    #[test]
    fn test_keeps_last_six_lines() {
        let mut log = TerminalLog::new();
        for index in 0..7 {
            log.push(format!("> EVENT_{index}"));
        }

        let lines = log.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "> EVENT_1");
        assert_eq!(lines[5], "> EVENT_6");
    }
}
