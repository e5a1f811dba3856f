use eframe::egui::{
    Align, Align2, Area, Color32, Context, FontId, Frame, Grid, Id, Layout, Margin, Rect, RichText, Sense,
    Stroke, Ui, pos2, vec2,
};

use crate::network::NetworkMetadata;

use super::super::render_utils::{TERMINAL_GREEN, with_alpha};

const MARQUEE_SEPARATOR: &str = "   ///   ";
const MARQUEE_SPEED: f32 = 40.0;
const LABEL_GREY: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);

fn count_or_dashes(value: Option<usize>) -> String {
    value.map_or_else(|| "--".to_owned(), |count| count.to_string())
}

pub(in crate::app) fn marquee_items(metadata: Option<&NetworkMetadata>) -> Vec<String> {
    vec![
        "● LIVE_NETWORK".to_owned(),
        "DATASET: SpotifyFeatures.csv".to_owned(),
        format!("NODES: {}", count_or_dashes(metadata.map(|meta| meta.total_nodes))),
        format!("EDGES: {}", count_or_dashes(metadata.map(|meta| meta.total_edges))),
        "ALGORITHM: FORCE_DIRECTED".to_owned(),
        "● INTERACTIVE_MODE".to_owned(),
    ]
}

/// One period of the ticker; repeating it end to end gives a seamless loop.
fn marquee_period(metadata: Option<&NetworkMetadata>) -> String {
    let mut text = marquee_items(metadata).join(MARQUEE_SEPARATOR);
    text.push_str(MARQUEE_SEPARATOR);
    text
}

pub(in crate::app) fn draw_marquee(ui: &mut Ui, metadata: Option<&NetworkMetadata>, width: f32) {
    let (rect, _) = ui.allocate_exact_size(vec2(width.max(0.0), 20.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let galley = painter.layout_no_wrap(
        marquee_period(metadata),
        FontId::monospace(11.0),
        LABEL_GREY,
    );

    let period = galley.size().x.max(1.0);
    let elapsed = ui.input(|input| input.time) as f32;
    let top = rect.center().y - galley.size().y * 0.5;
    let mut x = rect.left() - (elapsed * MARQUEE_SPEED) % period;
    while x < rect.right() {
        painter.galley(pos2(x, top), galley.clone(), LABEL_GREY);
        x += period;
    }
    ui.ctx().request_repaint();
}

pub(in crate::app) fn stats_rows(metadata: Option<&NetworkMetadata>) -> [(&'static str, String); 4] {
    [
        ("TARGET:", "TOP_COLLABORATIONS".to_owned()),
        ("STATUS:", "ACTIVE".to_owned()),
        ("NODES:", metadata.map_or(0, |meta| meta.total_nodes).to_string()),
        ("EDGES:", metadata.map_or(0, |meta| meta.total_edges).to_string()),
    ]
}

pub(in crate::app) fn show_stats_box(ctx: &Context, canvas: Rect, metadata: Option<&NetworkMetadata>) {
    Area::new(Id::new("stats_box"))
        .interactable(false)
        .pivot(Align2::RIGHT_TOP)
        .fixed_pos(canvas.right_top() + vec2(-24.0, 24.0))
        .show(ctx, |ui| {
            Frame::new()
                .fill(with_alpha(Color32::BLACK, 0.5))
                .stroke(Stroke::new(1.0, with_alpha(Color32::WHITE, 0.2)))
                .corner_radius(4)
                .inner_margin(Margin::same(12))
                .show(ui, |ui| {
                    Grid::new("stats_grid")
                        .num_columns(2)
                        .spacing([32.0, 4.0])
                        .show(ui, |ui| {
                            for (label, value) in stats_rows(metadata) {
                                let value_color = if label == "STATUS:" {
                                    TERMINAL_GREEN
                                } else {
                                    Color32::WHITE
                                };
                                ui.label(RichText::new(label).monospace().size(11.0).color(LABEL_GREY));
                                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                    ui.label(RichText::new(value).monospace().size(11.0).color(value_color));
                                });
                                ui.end_row();
                            }
                        });
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> NetworkMetadata {
        NetworkMetadata {
            total_nodes: 1200,
            total_edges: 3400,
            total_collaborations: 5000.0,
            description: String::new(),
        }
    }

    #[test]
    fn test_marquee_shows_dashes_before_load() {
        let items = marquee_items(None);
        assert_eq!(items[2], "NODES: --");
        assert_eq!(items[3], "EDGES: --");
        assert!(marquee_period(None).ends_with(MARQUEE_SEPARATOR));
    }

    #[test]
    fn test_marquee_and_stats_use_metadata_totals() {
        let metadata = metadata();
        let items = marquee_items(Some(&metadata));
        assert_eq!(items[2], "NODES: 1200");
        assert_eq!(items[3], "EDGES: 3400");

        let rows = stats_rows(Some(&metadata));
        assert_eq!(rows[2].1, "1200");
        assert_eq!(rows[3].1, "3400");
        assert_eq!(stats_rows(None)[2].1, "0");
    }
}
