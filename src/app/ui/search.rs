use std::collections::HashSet;

use eframe::egui::{
    Area, Button, Color32, Frame, Id, Key, Margin, Order, Rect, RichText, ScrollArea, Stroke,
    TextEdit, Ui, vec2,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::network::ArtistNode;

use super::super::render_utils::with_alpha;

pub(in crate::app) const SEARCH_RESULT_LIMIT: usize = 10;
const SEARCH_WIDTH: f32 = 256.0;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Substring hits in data order first, then fuzzy hits by descending score.
pub(in crate::app) fn search_artists(nodes: &[ArtistNode], query: &str, limit: usize) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let lowered = query.to_lowercase();
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for node in nodes {
        if results.len() >= limit {
            return results;
        }
        if node.name.to_lowercase().contains(&lowered) && seen.insert(node.name.as_str()) {
            results.push(node.name.clone());
        }
    }

    let matcher = SkimMatcherV2::default();
    let mut fuzzy = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| !seen.contains(node.name.as_str()))
        .filter_map(|(index, node)| {
            fuzzy_match_score(&matcher, &node.name, query).map(|score| (score, index))
        })
        .collect::<Vec<_>>();
    fuzzy.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    for (_, index) in fuzzy {
        if results.len() >= limit {
            break;
        }
        let name = nodes[index].name.as_str();
        if seen.insert(name) {
            results.push(name.to_owned());
        }
    }

    results
}

#[derive(Default)]
pub(in crate::app) struct SearchState {
    query: String,
    open: bool,
    cached_query: String,
    results: Vec<String>,
}

impl SearchState {
    fn refresh(&mut self, nodes: &[ArtistNode]) {
        if self.cached_query == self.query {
            return;
        }
        self.results = search_artists(nodes, &self.query, SEARCH_RESULT_LIMIT);
        self.cached_query.clone_from(&self.query);
    }

    /// Search box with its result dropdown; returns the artist picked this frame.
    pub(in crate::app) fn show(&mut self, ui: &mut Ui, nodes: &[ArtistNode]) -> Option<String> {
        let input = ui.add(
            TextEdit::singleline(&mut self.query)
                .hint_text("SEARCH ARTIST...")
                .font(eframe::egui::TextStyle::Monospace)
                .desired_width(SEARCH_WIDTH),
        );
        if input.gained_focus() || input.changed() {
            self.open = true;
        }

        if !self.query.is_empty()
            && ui
                .add(Button::new(RichText::new("✖").size(10.0)).frame(false))
                .on_hover_text("Clear search")
                .clicked()
        {
            self.query.clear();
            self.open = false;
            input.request_focus();
        }

        if ui.input(|state| state.key_pressed(Key::Escape)) {
            self.open = false;
        }

        if !self.open || self.query.trim().is_empty() {
            return None;
        }

        self.refresh(nodes);
        let mut picked = None;
        let dropdown = Area::new(Id::new("search_results"))
            .order(Order::Foreground)
            .fixed_pos(input.rect.left_bottom() + vec2(0.0, 8.0))
            .show(ui.ctx(), |ui| {
                Frame::new()
                    .fill(with_alpha(Color32::BLACK, 0.95))
                    .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.2)))
                    .corner_radius(4)
                    .inner_margin(Margin::symmetric(0, 8))
                    .show(ui, |ui| {
                        ui.set_width(SEARCH_WIDTH);
                        if self.results.is_empty() {
                            ui.add_space(2.0);
                            ui.horizontal(|ui| {
                                ui.add_space(16.0);
                                ui.label(RichText::new("No results found").monospace().weak());
                            });
                            return;
                        }

                        ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                            for name in &self.results {
                                let button = Button::new(RichText::new(name).monospace().size(11.0))
                                    .frame(false)
                                    .min_size(vec2(SEARCH_WIDTH, 28.0));
                                let response = ui.add(button);
                                if response.hovered() {
                                    ui.painter().rect_filled(
                                        response.rect,
                                        0.0,
                                        with_alpha(Color32::WHITE, 0.1),
                                    );
                                }
                                if response.clicked() {
                                    picked = Some(name.clone());
                                }
                            }
                        });
                    });
            });

        if picked.is_none() && self.clicked_outside(ui, input.rect, dropdown.response.rect) {
            self.open = false;
        }

        if let Some(name) = &picked {
            self.query.clone_from(name);
            self.open = false;
            input.surrender_focus();
        }
        picked
    }

    fn clicked_outside(&self, ui: &Ui, input: Rect, dropdown: Rect) -> bool {
        ui.input(|state| {
            state.pointer.any_pressed()
                && state
                    .pointer
                    .interact_pos()
                    .is_some_and(|pos| !input.contains(pos) && !dropdown.contains(pos))
        })
    }
}
