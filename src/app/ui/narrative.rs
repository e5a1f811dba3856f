use eframe::egui::{
    Align2, Area, Button, Color32, Context, Frame, Id, Margin, Order, Rect, RichText, Sense,
    Stroke, vec2,
};

use super::super::render_utils::{PANEL_BORDER, TERMINAL_GREEN, with_alpha};
use super::super::ViewModel;

pub(in crate::app) struct FeaturedArtist {
    pub name: &'static str,
    pub description: &'static str,
}

pub(in crate::app) const FEATURED_ARTISTS: [FeaturedArtist; 5] = [
    FeaturedArtist {
        name: "Wiz Khalifa",
        description: "Hip-hop artist from a scene with a strong featuring culture",
    },
    FeaturedArtist {
        name: "Lil Wayne",
        description: "Hip-hop artist from a scene with a strong featuring culture",
    },
    FeaturedArtist {
        name: "Ty Dolla $ign",
        description: "An especially prolific featured artist.\nEven released an album called \"Featuring Ty Dolla $ign\"!",
    },
    FeaturedArtist {
        name: "DJ Khaled",
        description: "Features heavily through his work as a producer",
    },
    FeaturedArtist {
        name: "Gorillaz",
        description: "A unique case: a virtual band",
    },
];

const PANEL_INTRO: &str = "Hip-hop artists from scenes with a strong featuring culture, and producers in particular, tend to collaborate the most.";

/// Clicking the current selection clears it.
pub(in crate::app) fn toggle_selection(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_owned())
    }
}

impl ViewModel {
    pub(in crate::app) fn show_narrative(&mut self, ctx: &Context, canvas: Rect) {
        let anchor = canvas.left_center() + vec2(24.0, 0.0);
        let label = if self.narrative_open { "◄" } else { "► NARRATIVE" };

        Area::new(Id::new("narrative_toggle"))
            .order(Order::Foreground)
            .pivot(Align2::LEFT_CENTER)
            .fixed_pos(anchor)
            .show(ctx, |ui| {
                let toggle = Button::new(RichText::new(label).monospace().size(11.0))
                    .fill(with_alpha(Color32::BLACK, 0.8))
                    .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.2)));
                if ui.add(toggle).clicked() {
                    self.narrative_open = !self.narrative_open;
                }
            });

        if !self.narrative_open {
            return;
        }

        let mut selection = None;
        Area::new(Id::new("narrative_panel"))
            .pivot(Align2::LEFT_CENTER)
            .fixed_pos(anchor + vec2(48.0, 0.0))
            .show(ctx, |ui| {
                Frame::new()
                    .fill(with_alpha(Color32::BLACK, 0.9))
                    .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.2)))
                    .corner_radius(4)
                    .inner_margin(Margin::same(16))
                    .show(ui, |ui| {
                        ui.set_max_width(300.0);
                        ui.label(RichText::new("ARTIST HIGHLIGHT").monospace().strong().size(13.0));
                        ui.add_space(6.0);
                        ui.label(RichText::new(PANEL_INTRO).monospace().size(10.0).weak());
                        ui.add_space(10.0);

                        for artist in &FEATURED_ARTISTS {
                            let selected = self.highlighted.as_deref() == Some(artist.name);
                            let (fill, border, title) = if selected {
                                (with_alpha(TERMINAL_GREEN, 0.2), TERMINAL_GREEN, TERMINAL_GREEN)
                            } else {
                                (
                                    with_alpha(Color32::WHITE, 0.05),
                                    PANEL_BORDER,
                                    Color32::from_gray(0xd1),
                                )
                            };

                            let entry = Frame::new()
                                .fill(fill)
                                .stroke(Stroke::new(1.0, border))
                                .corner_radius(4)
                                .inner_margin(Margin::symmetric(12, 8))
                                .show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    ui.label(RichText::new(artist.name).monospace().strong().size(11.0).color(title));
                                    ui.label(RichText::new(artist.description).monospace().size(10.0).weak());
                                })
                                .response
                                .interact(Sense::click());
                            if entry.clicked() {
                                selection = Some(toggle_selection(self.highlighted.as_deref(), artist.name));
                            }
                            ui.add_space(6.0);
                        }

                        if self.highlighted.is_some() {
                            ui.add_space(4.0);
                            let clear = Button::new(RichText::new("CLEAR SELECTION").monospace().size(11.0))
                                .min_size(vec2(ui.available_width(), 24.0));
                            if ui.add(clear).clicked() {
                                selection = Some(None);
                            }
                        }
                    });
            });

        if let Some(next) = selection {
            self.set_highlighted(next);
        }
    }
}
