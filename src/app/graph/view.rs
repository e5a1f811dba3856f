use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Sense, Shape, Ui, Vec2, vec2};

use super::super::highlight::{
    FocusState, NodeStyle, advance_hover_progress, glitch_text, track_labels,
};
use super::super::render_utils::{
    DIM_GREY, TERMINAL_GREEN, boundary_radius, link_paint, node_color, node_radius,
};
use super::super::{RenderNode, ViewModel};
use super::build::force_settings;
use super::interaction::clamp_to_canvas;

const RESIZE_ALPHA: f32 = 0.3;
const PULSE_ALPHA_TARGET: f32 = 0.05;
const DASH_LENGTH: f32 = 2.0;
const TRACK_LABEL_SPACING: f32 = 10.0;

fn node_label(node: &RenderNode, style: NodeStyle, frame: u64) -> Option<(String, f32)> {
    match style {
        NodeStyle::Hovered => Some((
            glitch_text(
                &format!("[ {} ]", node.id.to_uppercase()),
                node.hover_progress,
                node.glitch_seed ^ frame,
            ),
            12.0,
        )),
        NodeStyle::Highlighted => Some((node.id.clone(), 11.0)),
        NodeStyle::Neighbor => Some((node.id.clone(), 10.0)),
        NodeStyle::Hub { .. } | NodeStyle::Minor { .. } => None,
    }
}

fn draw_node(
    painter: &Painter,
    center: Pos2,
    radius: f32,
    node: &RenderNode,
    style: NodeStyle,
    frame: u64,
) {
    let color = node_color(style);

    if let NodeStyle::Minor { .. } = style {
        painter.text(center, Align2::CENTER_CENTER, "+", FontId::monospace(10.0), color);
        return;
    }

    painter.circle_filled(center, radius, color);

    if let NodeStyle::Hub { labeled: true, .. } = style {
        painter.text(
            center,
            Align2::CENTER_CENTER,
            &node.id,
            FontId::monospace(10.0),
            DIM_GREY,
        );
    }

    if let (Some((text, font_size)), Some(gap)) = (node_label(node, style, frame), style.label_gap()) {
        painter.text(
            center - vec2(0.0, radius + gap),
            Align2::CENTER_CENTER,
            text,
            FontId::monospace(font_size),
            color,
        );
    }
}

impl ViewModel {
    fn handle_resize(&mut self, size: Vec2) {
        self.canvas_size = size;
        let params = self.params;
        let center_strength = self.pulse.strength(params.center_strength);
        let Some(graph) = self.graph_cache.as_mut() else {
            return;
        };

        graph
            .simulation
            .set_settings(force_settings(&params, size, center_strength));
        graph.simulation.set_alpha(RESIZE_ALPHA);
        graph.simulation.restart();
        tracing::debug!(width = size.x, height = size.y, "canvas resized, simulation restarted");
    }

    fn apply_center_pulse(&mut self) {
        let center_strength = self.pulse.strength(self.params.center_strength);
        let Some(graph) = self.graph_cache.as_mut() else {
            return;
        };

        let mut settings = graph.simulation.settings();
        settings.center_strength = center_strength;
        graph.simulation.set_settings(settings);
        graph.simulation.set_alpha_target(PULSE_ALPHA_TARGET);
        graph.simulation.restart();
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::BLACK);

        let size = rect.size();
        if size.x < 1.0 || size.y < 1.0 {
            return;
        }

        if self.graph_dirty || self.graph_cache.is_none() {
            self.rebuild_render_graph(size);
        } else if size != self.canvas_size {
            self.handle_resize(size);
        }

        let delta_secs = ui.input(|input| input.stable_dt);
        if self.pulse.advance(delta_secs) {
            self.apply_center_pulse();
        }

        self.handle_graph_pointer(ui, rect, &response);
        ui.ctx().request_repaint();

        let node_size = self.params.node_size;
        let hovered = self.hovered;
        let Some(graph) = self.graph_cache.as_mut() else {
            return;
        };

        if graph.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "> NO_ARTISTS_TO_DISPLAY",
                FontId::monospace(12.0),
                DIM_GREY,
            );
            return;
        }

        graph.frame = graph.frame.wrapping_add(1);
        graph.simulation.step();
        for (node, sim_node) in graph.nodes.iter().zip(graph.simulation.nodes_mut()) {
            sim_node.position = clamp_to_canvas(
                sim_node.position,
                boundary_radius(node.val, node_size),
                size,
            );
        }

        let highlighted = self
            .highlighted
            .as_deref()
            .and_then(|key| graph.lookup(key));
        let focus = FocusState::new(&graph.neighbors, hovered, highlighted);
        let positions = graph
            .simulation
            .nodes()
            .iter()
            .map(|node| rect.min + node.position)
            .collect::<Vec<_>>();

        for link in &graph.links {
            let segment = [positions[link.source], positions[link.target]];
            let paint = link_paint(focus.link_style(link.source, link.target), link.weight);
            if paint.dashed {
                painter.extend(Shape::dashed_line(
                    &segment,
                    paint.stroke,
                    DASH_LENGTH,
                    DASH_LENGTH,
                ));
            } else {
                painter.line_segment(segment, paint.stroke);
            }
        }

        let any_hovered = focus.any_hovered();
        let frame = graph.frame;
        for (index, node) in graph.nodes.iter_mut().enumerate() {
            node.hover_progress = advance_hover_progress(
                node.hover_progress,
                focus.is_hover_active(index),
                any_hovered,
            );
            let style = focus.node_style(index, node.val);
            let radius = node_radius(node.val, node_size);
            draw_node(&painter, positions[index], radius, node, style, frame);
        }

        if let Some(hovered) = hovered {
            for label in track_labels(&graph.links, &self.data.edges, hovered) {
                let midpoint = positions[label.source].lerp(positions[label.target], 0.5);
                painter.text(
                    midpoint + vec2(0.0, label.slot as f32 * TRACK_LABEL_SPACING),
                    Align2::CENTER_CENTER,
                    label.text,
                    FontId::monospace(8.0),
                    TERMINAL_GREEN,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::test_support::view_model;
    use super::*;

    #[test]
    fn test_resize_recenters_and_reheats() {
        let mut model = view_model();
        model.graph_cache.as_mut().unwrap().simulation.stop();

        model.handle_resize(vec2(800.0, 600.0));
        assert_eq!(model.canvas_size, vec2(800.0, 600.0));
        let simulation = &model.graph_cache.as_ref().unwrap().simulation;
        assert_eq!(simulation.settings().center, vec2(400.0, 300.0));
        assert_eq!(simulation.settings().link_distance, model.params.link_distance);
        assert_eq!(simulation.alpha(), RESIZE_ALPHA);
        assert!(simulation.is_running());
    }

    #[test]
    fn test_center_pulse_keeps_simulation_warm() {
        let mut model = view_model();
        model.graph_cache.as_mut().unwrap().simulation.stop();
        assert!(model.pulse.advance(0.15));

        model.apply_center_pulse();
        let expected = model.pulse.strength(model.params.center_strength);
        let simulation = &model.graph_cache.as_ref().unwrap().simulation;
        assert_eq!(simulation.alpha_target(), PULSE_ALPHA_TARGET);
        assert_eq!(simulation.settings().center_strength, expected);
        assert!(simulation.is_running());
    }
}
