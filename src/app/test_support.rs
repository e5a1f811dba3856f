use std::sync::Arc;

use eframe::egui::vec2;

use crate::network::parse_network;

use super::{NetworkParams, ViewModel};

/// Two linked artists laid out on a 400×300 canvas: "a" at (260, 150), "b" at (140, 150).
pub(super) fn view_model() -> ViewModel {
    let data = parse_network(
        r#"{"nodes": [{"id": "a", "degree": 1}, {"id": "b", "degree": 1}],
            "edges": [{"source": "a", "target": "b"}]}"#,
    )
    .unwrap();
    let mut model = ViewModel::new(Arc::new(data), NetworkParams::default());
    model.rebuild_render_graph(vec2(400.0, 300.0));
    model
}
