mod preview;

use eframe::egui::{
    Align, Button, CentralPanel, Color32, Context, Frame, Key, Layout, Margin, ProgressBar,
    RichText, Sense, Stroke, TopBottomPanel, Ui, vec2,
};

use crate::network::NetworkData;

use super::ViewMode;
use super::render_utils::{DIM_GREY, PANEL_BORDER, TERMINAL_GREEN, with_alpha};
use preview::{EgoPreview, PREVIEW_ARTIST, PREVIEW_EDGE_LIMIT, ego_network};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slide {
    Title,
    Background,
    Solution,
    Architecture,
    Demo,
    FutureWork,
}

const SLIDES: [Slide; 6] = [
    Slide::Title,
    Slide::Background,
    Slide::Solution,
    Slide::Architecture,
    Slide::Demo,
    Slide::FutureWork,
];

const TEAM: [&str; 4] = [
    "Katayama Takumi",
    "Kobayashi Hikaru",
    "Maeda Moriumi",
    "Okawa Wataru",
];

enum PreviewState {
    Waiting,
    Missing,
    Ready(Box<EgoPreview>),
}

pub(super) struct Presentation {
    current: usize,
    preview: PreviewState,
}

impl Presentation {
    pub(super) fn new() -> Self {
        Self {
            current: 0,
            preview: PreviewState::Waiting,
        }
    }

    pub(super) fn next(&mut self) {
        self.current = (self.current + 1) % SLIDES.len();
    }

    pub(super) fn prev(&mut self) {
        self.current = (self.current + SLIDES.len() - 1) % SLIDES.len();
    }

    fn slide(&self) -> Slide {
        SLIDES[self.current]
    }

    pub(super) fn counter_text(&self) -> String {
        format!("{:02}/{:02}", self.current + 1, SLIDES.len())
    }

    pub(super) fn progress_fraction(&self) -> f32 {
        (self.current + 1) as f32 / SLIDES.len() as f32
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let (forward, back) = ctx.input(|input| {
            (
                input.key_pressed(Key::ArrowRight) || input.key_pressed(Key::Space),
                input.key_pressed(Key::ArrowLeft),
            )
        });
        if forward {
            self.next();
        } else if back {
            self.prev();
        }
    }

    fn sync_preview(&mut self, data: Option<&NetworkData>) {
        let PreviewState::Waiting = self.preview else {
            return;
        };
        let Some(data) = data else {
            return;
        };

        self.preview = match ego_network(data, PREVIEW_ARTIST, PREVIEW_EDGE_LIMIT) {
            Some(network) => {
                tracing::debug!(nodes = network.names.len(), "built presentation preview");
                PreviewState::Ready(Box::new(EgoPreview::new(network)))
            }
            None => {
                tracing::warn!(artist = PREVIEW_ARTIST, "preview artist not found in network");
                PreviewState::Missing
            }
        };
    }

    pub(super) fn show(&mut self, ctx: &Context, data: Option<&NetworkData>, mode: &mut ViewMode) {
        self.handle_keys(ctx);
        self.sync_preview(data);

        TopBottomPanel::top("presentation_header")
            .frame(Frame::NONE.fill(Color32::BLACK).inner_margin(Margin::symmetric(32, 16)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("AUDIOGRAPH_NETWORK_V1.0")
                            .monospace()
                            .size(12.0)
                            .color(DIM_GREY),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new("LIVE")
                                .monospace()
                                .size(12.0)
                                .color(TERMINAL_GREEN),
                        );
                        let blink = (ui.input(|input| input.time) * 2.0).sin() > 0.0;
                        let (dot, _) = ui.allocate_exact_size(vec2(8.0, 8.0), Sense::hover());
                        if blink {
                            ui.painter().circle_filled(dot.center(), 3.0, TERMINAL_GREEN);
                        }
                    });
                });
                ui.ctx().request_repaint();
            });

        TopBottomPanel::bottom("presentation_footer")
            .frame(Frame::NONE.fill(Color32::BLACK).inner_margin(Margin::symmetric(32, 16)))
            .show(ctx, |ui| self.draw_footer(ui));

        CentralPanel::default()
            .frame(Frame::NONE.fill(Color32::BLACK).inner_margin(Margin::symmetric(96, 32)))
            .show(ctx, |ui| match self.slide() {
                Slide::Title => title_slide(ui),
                Slide::Background => background_slide(ui),
                Slide::Solution => self.solution_slide(ui, data.is_some()),
                Slide::Architecture => architecture_slide(ui),
                Slide::Demo => demo_slide(ui, mode),
                Slide::FutureWork => future_work_slide(ui),
            });
    }

    fn draw_footer(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(self.counter_text())
                    .monospace()
                    .size(28.0)
                    .color(TERMINAL_GREEN),
            );
            ui.add_space(24.0);

            let buttons_width = 180.0;
            ui.add(
                ProgressBar::new(self.progress_fraction())
                    .desired_width((ui.available_width() - buttons_width).max(0.0))
                    .desired_height(2.0)
                    .fill(TERMINAL_GREEN),
            );

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let at_end = self.current + 1 == SLIDES.len();
                if ui
                    .add_enabled(!at_end, Button::new(RichText::new("[NEXT]").monospace()))
                    .clicked()
                {
                    self.next();
                }
                if ui
                    .add_enabled(self.current > 0, Button::new(RichText::new("[PREV]").monospace()))
                    .clicked()
                {
                    self.prev();
                }
            });
        });
    }

    fn solution_slide(&mut self, ui: &mut Ui, loaded: bool) {
        slide_heading(ui, "02_SOLUTION");
        ui.columns(2, |columns| {
            let left = &mut columns[0];
            left.label(
                RichText::new("Featuring Network")
                    .monospace()
                    .strong()
                    .size(26.0)
                    .color(Color32::WHITE),
            );
            left.add_space(12.0);
            body_text(
                left,
                "Focusing on the featuring credits of songs, artists become nodes and collaborations become edges, drawn as one large network.",
            );
            left.add_space(12.0);
            for item in [
                "Spotify API Data Source",
                "Force Directed Graph",
                "Interactive Native Rendering",
            ] {
                left.label(RichText::new(format!("● {item}")).monospace().color(TERMINAL_GREEN));
            }

            let right = &mut columns[1];
            Frame::NONE
                .stroke(Stroke::new(1.0, PANEL_BORDER))
                .show(right, |ui| {
                    let size = vec2(ui.available_width(), 360.0);
                    match &mut self.preview {
                        PreviewState::Ready(preview) => preview.show(ui, size),
                        PreviewState::Missing => {
                            ui.set_min_size(size);
                            ui.centered_and_justified(|ui| {
                                ui.label(
                                    RichText::new(format!("> ARTIST_NOT_FOUND: {PREVIEW_ARTIST}"))
                                        .monospace()
                                        .color(DIM_GREY),
                                );
                            });
                        }
                        PreviewState::Waiting => {
                            ui.set_min_size(size);
                            ui.centered_and_justified(|ui| {
                                if loaded {
                                    ui.label(RichText::new("> PREPARING_PREVIEW").monospace());
                                } else {
                                    ui.spinner();
                                }
                            });
                        }
                    }
                });
        });
    }
}

fn slide_heading(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .monospace()
            .strong()
            .size(40.0)
            .color(TERMINAL_GREEN),
    );
    ui.add_space(32.0);
}

fn body_text(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .monospace()
            .size(16.0)
            .color(Color32::from_gray(0xbb)),
    );
}

fn card(ui: &mut Ui, marker: &str, title: &str, text: &str) {
    Frame::NONE
        .stroke(Stroke::new(1.0, PANEL_BORDER))
        .inner_margin(Margin::same(20))
        .show(ui, |ui| {
            ui.horizontal_top(|ui| {
                ui.label(
                    RichText::new(marker)
                        .monospace()
                        .strong()
                        .size(24.0)
                        .color(TERMINAL_GREEN),
                );
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(title)
                            .strong()
                            .size(22.0)
                            .color(Color32::WHITE),
                    );
                    ui.add_space(6.0);
                    body_text(ui, text);
                });
            });
        });
}

fn title_slide(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.15);
        ui.label(
            RichText::new("AUDIOGRAPH\nNETWORK")
                .monospace()
                .strong()
                .size(72.0)
                .color(Color32::WHITE),
        );
        ui.add_space(24.0);
        ui.label(
            RichText::new("> LET'S_DISCOVER_THE_MUSIC_WORLD")
                .monospace()
                .size(20.0)
                .color(TERMINAL_GREEN),
        );
        ui.add_space(16.0);
        body_text(
            ui,
            "A data visualization of collaborations between music artists,\noffering a new way to experience music in context.",
        );
        ui.add_space(48.0);
        ui.label(RichText::new("[ Team Tukey ]").monospace().color(TERMINAL_GREEN));
        ui.add_space(8.0);
        for member in TEAM {
            ui.label(RichText::new(member).monospace().color(Color32::from_gray(0x99)));
        }
    });
}

fn background_slide(ui: &mut Ui) {
    slide_heading(ui, "01_BACKGROUND");
    card(
        ui,
        "!",
        "Linear music discovery",
        "Recommendations and rankings are mostly lists ordered by popularity or genre. The organic connections between artists stay hidden.",
    );
    ui.add_space(20.0);
    card(
        ui,
        "?",
        "Lost context",
        "Who works well with whom, or which producers are involved, is only found by digging through Wikipedia or social media.",
    );
}

fn architecture_slide(ui: &mut Ui) {
    slide_heading(ui, "03_SYSTEM_ARCHITECTURE");
    let sections = [
        (
            "DATA PIPELINE",
            "Spotify API (Spotipy)\nPandas for CSV/JSON\nRecursive Artist Fetching",
        ),
        ("FRONTEND", "Native desktop window\nImmediate-mode UI\nBackground data loading"),
        (
            "VISUALIZATION",
            "Force Simulation\nCanvas Rendering\nDrag & Hover Interaction",
        ),
    ];
    ui.columns(sections.len(), |columns| {
        for (column, (title, text)) in columns.iter_mut().zip(sections) {
            Frame::NONE
                .stroke(Stroke::new(1.0, PANEL_BORDER))
                .inner_margin(Margin::same(20))
                .show(column, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(
                        RichText::new(title)
                            .monospace()
                            .size(18.0)
                            .color(Color32::from_gray(0x99)),
                    );
                    ui.add_space(12.0);
                    body_text(ui, text);
                });
        }
    });
}

fn demo_slide(ui: &mut Ui, mode: &mut ViewMode) {
    slide_heading(ui, "04_DEMO");
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        let launch = Button::new(
            RichText::new("Click to Launch Application")
                .monospace()
                .size(22.0)
                .color(Color32::BLACK),
        )
        .fill(TERMINAL_GREEN)
        .min_size(vec2(360.0, 64.0));
        if ui.add(launch).clicked() {
            tracing::info!("launching network view from presentation");
            *mode = ViewMode::Network;
        }
        ui.add_space(32.0);
        body_text(
            ui,
            "Explore the intricate network woven by artists\nin the live application.",
        );
    });
}

fn future_work_slide(ui: &mut Ui) {
    slide_heading(ui, "05_FUTURE_WORK");
    let items = [
        (
            "Better data collection",
            "Use viral charts and top playlists to extract a living artist network that reflects current trends.",
        ),
        (
            "Track preview playback",
            "Clicking an edge could play the featured song right away.",
        ),
        (
            "Personalized networks",
            "Link a Spotify account and build a network centered on the artists the listener plays most.",
        ),
    ];
    for (title, text) in items {
        ui.horizontal_top(|ui| {
            ui.label(RichText::new(">").monospace().color(TERMINAL_GREEN));
            ui.vertical(|ui| {
                ui.label(RichText::new(title).strong().size(18.0).color(Color32::WHITE));
                body_text(ui, text);
            });
        });
        ui.add_space(16.0);
    }

    ui.add_space(32.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("THANK YOU FOR WATCHING")
                .monospace()
                .strong()
                .size(32.0)
                .color(with_alpha(TERMINAL_GREEN, 0.9)),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_navigation_wraps() {
        let mut deck = Presentation::new();
        deck.prev();
        assert_eq!(deck.slide(), Slide::FutureWork);
        deck.next();
        assert_eq!(deck.slide(), Slide::Title);
        deck.next();
        assert_eq!(deck.slide(), Slide::Background);
    }

    #[test]
    fn test_counter_and_progress() {
        let mut deck = Presentation::new();
        assert_eq!(deck.counter_text(), "01/06");
        assert!((deck.progress_fraction() - 1.0 / 6.0).abs() < 1e-6);

        for _ in 0..5 {
            deck.next();
        }
        assert_eq!(deck.counter_text(), "06/06");
        assert_eq!(deck.progress_fraction(), 1.0);
    }
}
