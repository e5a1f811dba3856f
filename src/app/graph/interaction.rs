use eframe::egui::{self, PointerButton, Pos2, Rect, Ui, Vec2};

use super::super::ViewModel;

const HOVER_RADIUS: f32 = 40.0;
const DRAG_PICK_RADIUS: f32 = 30.0;
const CANVAS_MARGIN: f32 = 50.0;
const DRAG_ALPHA_TARGET: f32 = 0.3;

/// Closest point strictly within `radius` of `target`.
pub(in crate::app) fn nearest_within(
    positions: impl IntoIterator<Item = Vec2>,
    target: Vec2,
    radius: f32,
) -> Option<usize> {
    positions
        .into_iter()
        .enumerate()
        .map(|(index, position)| (index, (position - target).length()))
        .filter(|(_, distance)| *distance < radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    let low = CANVAS_MARGIN + radius;
    let high = extent - CANVAS_MARGIN - radius;
    low.max(high.min(value))
}

/// Keeps a node inside the canvas margin; on a canvas too small for the node the low edge wins.
pub(in crate::app) fn clamp_to_canvas(position: Vec2, radius: f32, size: Vec2) -> Vec2 {
    Vec2::new(
        clamp_axis(position.x, radius, size.x),
        clamp_axis(position.y, radius, size.y),
    )
}

impl ViewModel {
    pub(in crate::app) fn handle_graph_pointer(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        let pointer = ui.input(|input| input.pointer.hover_pos());
        let over_canvas = response.contains_pointer() || response.dragged();
        let Some(pointer) = pointer.filter(|_| over_canvas) else {
            self.handle_pointer_left();
            return;
        };
        let local = |position: Pos2| position - rect.min;

        if response.drag_started_by(PointerButton::Primary) {
            let origin = ui
                .input(|input| input.pointer.press_origin())
                .unwrap_or(pointer);
            self.begin_drag(local(origin));
        }

        if self.dragging.is_some() {
            if response.drag_stopped() {
                self.end_drag();
            } else {
                self.drag_to(local(pointer));
            }
            return;
        }

        self.update_hover(local(pointer));
    }

    /// Hovering a node drops any highlighted artist.
    fn update_hover(&mut self, pointer: Vec2) {
        let Some(graph) = self.graph_cache.as_ref() else {
            return;
        };
        let nearest = nearest_within(
            graph.simulation.nodes().iter().map(|node| node.position),
            pointer,
            HOVER_RADIUS,
        );

        if nearest != self.hovered {
            self.hovered = nearest;
            if nearest.is_some() && self.highlighted.is_some() {
                self.set_highlighted(None);
            }
        }
    }

    fn begin_drag(&mut self, origin: Vec2) {
        let Some(graph) = self.graph_cache.as_mut() else {
            return;
        };
        let Some(index) = nearest_within(
            graph.simulation.nodes().iter().map(|node| node.position),
            origin,
            DRAG_PICK_RADIUS,
        ) else {
            return;
        };

        let node = &mut graph.simulation.nodes_mut()[index];
        node.fixed = Some(node.position);
        graph.simulation.set_alpha_target(DRAG_ALPHA_TARGET);
        graph.simulation.restart();
        self.dragging = Some(index);
        self.hovered = None;
    }

    fn drag_to(&mut self, position: Vec2) {
        let (Some(index), Some(graph)) = (self.dragging, self.graph_cache.as_mut()) else {
            return;
        };
        if let Some(node) = graph.simulation.nodes_mut().get_mut(index) {
            node.fixed = Some(position);
        }
    }

    fn end_drag(&mut self) {
        let Some(index) = self.dragging.take() else {
            return;
        };
        self.hovered = None;
        let Some(graph) = self.graph_cache.as_mut() else {
            return;
        };
        if let Some(node) = graph.simulation.nodes_mut().get_mut(index) {
            node.fixed = None;
        }
        graph.simulation.set_alpha_target(0.0);
    }

    fn handle_pointer_left(&mut self) {
        self.end_drag();
        self.hovered = None;
        if let Some(graph) = self.graph_cache.as_mut() {
            for node in &mut graph.nodes {
                node.hover_progress = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::super::super::test_support::view_model;
    use super::*;

    fn pinned(model: &ViewModel, index: usize) -> Option<Vec2> {
        model.graph_cache.as_ref().unwrap().simulation.nodes()[index].fixed
    }

    fn alpha_target(model: &ViewModel) -> f32 {
        model.graph_cache.as_ref().unwrap().simulation.alpha_target()
    }

    #[test]
    fn test_drag_pins_moves_and_releases_node() {
        let mut model = view_model();
        model.hovered = Some(1);

        model.begin_drag(vec2(255.0, 150.0));
        assert_eq!(model.dragging, Some(0));
        assert_eq!(model.hovered, None);
        assert_eq!(pinned(&model, 0), Some(vec2(260.0, 150.0)));
        assert_eq!(alpha_target(&model), DRAG_ALPHA_TARGET);

        model.drag_to(vec2(300.0, 200.0));
        assert_eq!(pinned(&model, 0), Some(vec2(300.0, 200.0)));

        model.end_drag();
        assert_eq!(model.dragging, None);
        assert_eq!(model.hovered, None);
        assert_eq!(pinned(&model, 0), None);
        assert_eq!(alpha_target(&model), 0.0);
    }

    #[test]
    fn test_press_on_empty_space_does_not_drag() {
        let mut model = view_model();

        model.begin_drag(vec2(20.0, 20.0));
        assert_eq!(model.dragging, None);
        assert_eq!(pinned(&model, 0), None);
        assert_eq!(pinned(&model, 1), None);
        assert_eq!(alpha_target(&model), 0.0);
    }

    #[test]
    fn test_hovering_a_node_clears_highlight() {
        let mut model = view_model();
        model.set_highlighted(Some("b".to_owned()));

        model.update_hover(vec2(10.0, 10.0));
        assert_eq!(model.hovered, None);
        assert_eq!(model.highlighted.as_deref(), Some("b"));

        model.update_hover(vec2(262.0, 152.0));
        assert_eq!(model.hovered, Some(0));
        assert_eq!(model.highlighted, None);
    }

    #[test]
    fn test_nearest_within_picks_closest() {
        let positions = [vec2(0.0, 0.0), vec2(10.0, 0.0), vec2(100.0, 0.0)];

        assert_eq!(nearest_within(positions, vec2(7.0, 0.0), 40.0), Some(1));
        assert_eq!(nearest_within(positions, vec2(2.0, 1.0), 40.0), Some(0));
        assert_eq!(nearest_within(positions, vec2(55.0, 0.0), 40.0), None);
    }

    #[test]
    fn test_nearest_within_is_strict() {
        let positions = [vec2(30.0, 0.0)];
        assert_eq!(nearest_within(positions, Vec2::ZERO, 30.0), None);
        assert_eq!(nearest_within(positions, Vec2::ZERO, 30.5), Some(0));
        assert_eq!(nearest_within(Vec::new(), Vec2::ZERO, 30.0), None);
    }

    #[test]
    fn test_clamp_to_canvas_margin() {
        let size = vec2(400.0, 300.0);

        assert_eq!(clamp_to_canvas(vec2(0.0, 0.0), 5.0, size), vec2(55.0, 55.0));
        assert_eq!(
            clamp_to_canvas(vec2(1000.0, 1000.0), 5.0, size),
            vec2(345.0, 245.0)
        );
        assert_eq!(
            clamp_to_canvas(vec2(200.0, 150.0), 5.0, size),
            vec2(200.0, 150.0)
        );
    }

    #[test]
    fn test_clamp_on_tiny_canvas_prefers_low_edge() {
        let clamped = clamp_to_canvas(vec2(10.0, 500.0), 20.0, vec2(80.0, 80.0));
        assert_eq!(clamped, vec2(70.0, 70.0));
    }
}
