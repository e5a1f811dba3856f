use eframe::egui::{
    self, Align, Align2, Area, Button, Color32, Context, Frame, Id, Layout, Margin, Order, Rect,
    Response, RichText, Stroke, Ui, vec2,
};

use super::super::params::{NetworkParams, ParamField};
use super::super::render_utils::with_alpha;
use super::super::ViewModel;

const PANEL_WIDTH: f32 = 288.0;
const LABEL_GREY: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);

/// One wheel notch over a slider nudges its value by one step.
fn apply_slider_wheel(
    ui: &Ui,
    response: &Response,
    params: &mut NetworkParams,
    field: ParamField,
) -> bool {
    if !response.hovered() {
        return false;
    }

    let scroll = ui.input(|input| input.raw_scroll_delta.y);
    if scroll.abs() <= f32::EPSILON {
        return false;
    }
    params.nudge(field, scroll > 0.0)
}

fn param_slider(ui: &mut Ui, params: &mut NetworkParams, field: ParamField) -> bool {
    let range = field.range();
    let mut value = params.get(field);

    ui.label(
        RichText::new(field.label(value))
            .monospace()
            .size(11.0)
            .color(LABEL_GREY),
    );
    let slider = ui.add(
        egui::Slider::new(&mut value, range.min..=range.max)
            .step_by(f64::from(range.step))
            .show_value(false)
            .clamping(egui::SliderClamping::Always),
    );
    let mut changed = false;
    if slider.changed() {
        params.set(field, value);
        changed = true;
    }
    changed |= apply_slider_wheel(ui, &slider, params, field);
    ui.add_space(6.0);
    changed
}

impl ViewModel {
    pub(in crate::app) fn show_controls(&mut self, ctx: &Context, canvas: Rect) {
        let anchor = canvas.right_bottom() - vec2(24.0, 24.0);
        let toggle_label = if self.controls_open {
            "▼ HIDE CONTROLS"
        } else {
            "▲ SHOW CONTROLS"
        };

        Area::new(Id::new("controls_toggle"))
            .order(Order::Foreground)
            .pivot(Align2::RIGHT_BOTTOM)
            .fixed_pos(anchor)
            .show(ctx, |ui| {
                let toggle = Button::new(RichText::new(toggle_label).monospace().size(11.0))
                    .fill(with_alpha(Color32::BLACK, 0.8))
                    .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.2)));
                if ui.add(toggle).clicked() {
                    self.controls_open = !self.controls_open;
                }
            });

        if !self.controls_open {
            return;
        }

        Area::new(Id::new("controls_panel"))
            .pivot(Align2::RIGHT_BOTTOM)
            .fixed_pos(anchor - vec2(0.0, 40.0))
            .show(ctx, |ui| {
                Frame::new()
                    .fill(with_alpha(Color32::BLACK, 0.9))
                    .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.2)))
                    .corner_radius(4)
                    .inner_margin(Margin::same(16))
                    .show(ui, |ui| {
                        ui.set_width(PANEL_WIDTH);
                        self.draw_controls(ui);
                    });
            });
    }

    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let previous = self.params;

        ui.horizontal(|ui| {
            ui.label(
                RichText::new("NETWORK PARAMETERS")
                    .monospace()
                    .strong()
                    .size(13.0),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .button(RichText::new("RESET").monospace().size(11.0))
                    .on_hover_text("Restore the startup parameters.")
                    .clicked()
                {
                    self.reset_params();
                }
            });
        });
        ui.add_space(10.0);

        let mut changed = false;
        for field in ParamField::ALL {
            changed |= param_slider(ui, &mut self.params, field);
        }

        if changed || previous != self.params {
            self.commit_param_changes(previous);
        }
    }

    /// Restores the parameters the app was started with.
    fn reset_params(&mut self) {
        self.params = self.default_params;
        self.terminal.push("> PARAMETERS_RESET");
        tracing::debug!("parameters reset");
    }

    fn commit_param_changes(&mut self, previous: NetworkParams) {
        if previous == self.params {
            return;
        }

        let reshaped = ParamField::ALL
            .into_iter()
            .filter(|field| !field.is_force())
            .any(|field| previous.get(field) != self.params.get(field));
        if reshaped {
            self.graph_dirty = true;
        } else {
            self.apply_force_params();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::test_support::view_model as model;
    use super::*;

    #[test]
    fn test_reset_restores_startup_params() {
        let mut model = model();
        model.params.link_distance = 120.0;
        model.params.max_nodes = 100;

        model.reset_params();
        assert_eq!(model.params, NetworkParams::default());
        assert_eq!(model.terminal.lines().last(), Some("> PARAMETERS_RESET"));
    }

    #[test]
    fn test_limit_change_marks_graph_dirty() {
        let mut model = model();
        let previous = model.params;
        model.params.max_edges = 100;

        model.commit_param_changes(previous);
        assert!(model.graph_dirty);
    }

    #[test]
    fn test_force_change_retunes_in_place() {
        let mut model = model();
        let previous = model.params;
        model.params.link_distance = 90.0;

        model.commit_param_changes(previous);
        assert!(!model.graph_dirty);
        let graph = model.graph_cache.as_ref().unwrap();
        assert_eq!(graph.simulation.settings().link_distance, 90.0);
    }

    #[test]
    fn test_hovering_sliders_keeps_text_focus() {
        let ctx = egui::Context::default();
        let search_id = Id::new("search_box");
        let mut query = String::from("lil w");
        let mut params = NetworkParams::default();
        ctx.memory_mut(|memory| memory.request_focus(search_id));

        for step in 0..40 {
            let input = egui::RawInput {
                events: vec![egui::Event::PointerMoved(egui::pos2(40.0, step as f32 * 5.0))],
                ..Default::default()
            };
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.add(egui::TextEdit::singleline(&mut query).id(search_id));
                    param_slider(ui, &mut params, ParamField::LinkDistance);
                });
            });
        }

        assert_eq!(ctx.memory(|memory| memory.focused()), Some(search_id));
        assert_eq!(params, NetworkParams::default());
    }

    #[test]
    fn test_slider_values_clamp() {
        let mut params = NetworkParams::default();
        params.set(ParamField::CollisionRadius, 40.0);
        assert_eq!(params.collision_radius, 11.5);
    }
}
