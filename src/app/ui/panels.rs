use std::sync::Arc;

use eframe::egui::{
    Align2, Area, CentralPanel, Color32, Context, Frame, Id, Margin, Rect, RichText, Sense,
    Stroke, TopBottomPanel, Ui, Vec2, Visuals, vec2,
};

use crate::network::{NetworkData, NetworkMetadata};

use super::super::graph::CenterPulse;
use super::super::render_utils::{TERMINAL_GREEN, with_alpha};
use super::super::{NetworkParams, ViewMode, ViewModel};
use super::search::SearchState;
use super::stats::{draw_marquee, show_stats_box};
use super::terminal::TerminalLog;

const NAV_HEIGHT: f32 = 56.0;
/// Room kept right of the ticker for the search box and the slides button.
const NAV_TRAILING_WIDTH: f32 = 420.0;
const REPOSITORY_URL: &str = "https://github.com/novelsavage/Audiograph-DataVisualization";
const HIGHLIGHT_ALPHA_TARGET: f32 = 0.05;

pub(in crate::app) fn apply_terminal_style(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.panel_fill = Color32::BLACK;
    visuals.window_fill = Color32::BLACK;
    visuals.extreme_bg_color = Color32::from_rgb(10, 10, 10);
    visuals.selection.bg_fill = with_alpha(TERMINAL_GREEN, 0.35);
    visuals.selection.stroke = Stroke::new(1.0, TERMINAL_GREEN);
    visuals.hyperlink_color = Color32::from_gray(0x6b);
    ctx.set_visuals(visuals);
}

fn navigation_bar(
    ctx: &Context,
    metadata: Option<&NetworkMetadata>,
    mode: &mut ViewMode,
    add_search: impl FnOnce(&mut Ui),
) {
    TopBottomPanel::top("navigation")
        .exact_height(NAV_HEIGHT)
        .frame(
            Frame::NONE
                .fill(with_alpha(Color32::BLACK, 0.8))
                .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.1)))
                .inner_margin(Margin::symmetric(24, 0)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let (dot, _) = ui.allocate_exact_size(vec2(16.0, 16.0), Sense::hover());
                let pulse = ((ui.input(|input| input.time) * 2.0).sin() * 0.25 + 0.75) as f32;
                ui.painter()
                    .circle_filled(dot.center(), 8.0, Color32::WHITE.gamma_multiply(pulse));
                ui.label(
                    RichText::new("AUDIOGRAPH")
                        .monospace()
                        .strong()
                        .size(18.0)
                        .color(Color32::WHITE),
                );
                ui.add_space(32.0);

                let ticker_width = ui.available_width() - NAV_TRAILING_WIDTH;
                draw_marquee(ui, metadata, ticker_width);
                ui.add_space(16.0);

                add_search(ui);
                if ui
                    .button(RichText::new("SLIDES ►").monospace().size(11.0))
                    .on_hover_text("Open the presentation deck.")
                    .clicked()
                {
                    *mode = ViewMode::Presentation;
                }
            });
        });
}

/// Navigation bar shown before the network has loaded.
pub(in crate::app) fn show_navigation_shell(ctx: &Context, mode: &mut ViewMode) {
    navigation_bar(ctx, None, mode, |_| {});
}

fn show_title(ctx: &Context, canvas: Rect, metadata: &NetworkMetadata) {
    Area::new(Id::new("network_title"))
        .interactable(false)
        .fixed_pos(canvas.left_top() + vec2(24.0, 24.0))
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            ui.label(
                RichText::new("FEATURING\nNETWORK")
                    .monospace()
                    .strong()
                    .size(34.0)
                    .color(with_alpha(Color32::WHITE, 0.9)),
            );
            ui.add_space(12.0);
            let body = Color32::from_gray(0x6b);
            ui.label(
                RichText::new(
                    "A graph of featuring relationships between artists. Drag nodes to reshape the network.",
                )
                .monospace()
                .size(11.0)
                .color(body),
            );
            ui.label(
                RichText::new("Hover over a node to enter analysis mode.")
                    .monospace()
                    .size(11.0)
                    .color(TERMINAL_GREEN),
            );
            if !metadata.description.is_empty() {
                ui.add_space(6.0);
                ui.label(
                    RichText::new(&metadata.description)
                        .monospace()
                        .size(10.0)
                        .color(body),
                );
            }
        });
}

fn show_repository_link(ctx: &Context, canvas: Rect) {
    Area::new(Id::new("repository_link"))
        .pivot(Align2::CENTER_BOTTOM)
        .fixed_pos(canvas.center_bottom() - vec2(0.0, 16.0))
        .show(ctx, |ui| {
            ui.hyperlink_to(
                RichText::new("github.com/novelsavage/Audiograph-DataVisualization")
                    .monospace()
                    .size(11.0),
                REPOSITORY_URL,
            );
        });
}

impl ViewModel {
    pub(in crate::app) fn new(data: Arc<NetworkData>, params: NetworkParams) -> Self {
        tracing::info!(
            nodes = data.nodes.len(),
            edges = data.edges.len(),
            "network ready"
        );

        let mut terminal = TerminalLog::new();
        terminal.push(format!(
            "> DATA_LOADED: {} NODES / {} EDGES",
            data.nodes.len(),
            data.edges.len()
        ));

        Self {
            data,
            params,
            default_params: params,
            highlighted: None,
            hovered: None,
            dragging: None,
            canvas_size: Vec2::ZERO,
            graph_dirty: true,
            graph_cache: None,
            pulse: CenterPulse::default(),
            search: SearchState::default(),
            controls_open: false,
            narrative_open: false,
            terminal,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, mode: &mut ViewMode) {
        let data = Arc::clone(&self.data);
        let mut picked = None;
        navigation_bar(ctx, Some(&data.metadata), mode, |ui| {
            picked = self.search.show(ui, &data.nodes);
        });
        if let Some(name) = picked {
            self.terminal.push(format!("> SEARCH: {}", name.to_uppercase()));
            self.set_highlighted(Some(name));
        }

        CentralPanel::default()
            .frame(Frame::NONE.fill(Color32::BLACK))
            .show(ctx, |ui| {
                let canvas = ui.max_rect();
                self.draw_graph(ui);

                let ctx = ui.ctx();
                show_title(ctx, canvas, &data.metadata);
                show_stats_box(ctx, canvas, Some(&data.metadata));
                self.show_narrative(ctx, canvas);
                self.terminal.show(ctx, canvas);
                show_repository_link(ctx, canvas);
                self.show_controls(ctx, canvas);
            });
    }

    /// Freezes the layout while another view is on screen.
    pub(in crate::app) fn pause(&mut self) {
        if let Some(graph) = self.graph_cache.as_mut() {
            graph.simulation.stop();
        }
    }

    pub(in crate::app) fn set_highlighted(&mut self, highlighted: Option<String>) {
        if self.highlighted == highlighted {
            return;
        }

        match &highlighted {
            Some(artist) => self
                .terminal
                .push(format!("> HIGHLIGHT: {}", artist.to_uppercase())),
            None => self.terminal.push("> HIGHLIGHT_CLEARED"),
        }
        tracing::debug!(artist = ?highlighted, "highlighted artist changed");
        self.highlighted = highlighted;

        if let Some(graph) = self.graph_cache.as_mut() {
            graph.simulation.set_alpha_target(HIGHLIGHT_ALPHA_TARGET);
            graph.simulation.restart();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::test_support::view_model;
    use super::HIGHLIGHT_ALPHA_TARGET;

    #[test]
    fn test_highlight_change_warms_simulation() {
        let mut model = view_model();
        model.graph_cache.as_mut().unwrap().simulation.stop();

        model.set_highlighted(Some("a".to_owned()));
        let simulation = &model.graph_cache.as_ref().unwrap().simulation;
        assert_eq!(simulation.alpha_target(), HIGHLIGHT_ALPHA_TARGET);
        assert!(simulation.is_running());
        assert_eq!(model.terminal.lines().last(), Some("> HIGHLIGHT: A"));

        model.set_highlighted(None);
        assert_eq!(model.highlighted, None);
        assert_eq!(model.terminal.lines().last(), Some("> HIGHLIGHT_CLEARED"));
    }

    #[test]
    fn test_pause_stops_simulation() {
        let mut model = view_model();
        model.pause();
        assert!(!model.graph_cache.as_ref().unwrap().simulation.is_running());
    }
}
