use eframe::egui::{Color32, Stroke};

use super::highlight::{LinkStyle, NodeStyle};

pub(super) const TERMINAL_GREEN: Color32 = Color32::from_rgb(0, 255, 65);
pub(super) const DIM_GREY: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
pub(super) const MUTED_GREY: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);
pub(super) const FADED_GREY: Color32 = Color32::from_rgb(0x22, 0x22, 0x22);
pub(super) const PANEL_BORDER: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn scaled(val: f64, node_size: f32) -> f32 {
    (val.max(0.0).sqrt() as f32) * node_size
}

pub(super) fn node_radius(val: f64, node_size: f32) -> f32 {
    scaled(val, node_size) + 2.0
}

/// Radius kept clear of the canvas edge when clamping positions.
pub(super) fn boundary_radius(val: f64, node_size: f32) -> f32 {
    scaled(val, node_size) + 5.0
}

pub(super) fn collide_radius(val: f64, node_size: f32, collision_radius: f32) -> f32 {
    (scaled(val, node_size) * collision_radius + 10.0).max(0.0)
}

pub(super) struct LinkPaint {
    pub stroke: Stroke,
    pub dashed: bool,
}

pub(super) fn link_paint(style: LinkStyle, weight: f64) -> LinkPaint {
    let root = weight.max(0.0).sqrt() as f32;
    match style {
        LinkStyle::Connected => LinkPaint {
            stroke: Stroke::new(root * 0.8, with_alpha(TERMINAL_GREEN, 0.6)),
            dashed: true,
        },
        LinkStyle::Highlighted => LinkPaint {
            stroke: Stroke::new(root * 0.6, with_alpha(TERMINAL_GREEN, 0.4)),
            dashed: false,
        },
        LinkStyle::Faded => LinkPaint {
            stroke: Stroke::new(1.0, with_alpha(Color32::WHITE, 0.02)),
            dashed: false,
        },
        LinkStyle::Normal => LinkPaint {
            stroke: Stroke::new(root * 0.5, with_alpha(Color32::WHITE, 0.15)),
            dashed: false,
        },
    }
}

pub(super) fn node_color(style: NodeStyle) -> Color32 {
    match style {
        NodeStyle::Hovered | NodeStyle::Highlighted => TERMINAL_GREEN,
        NodeStyle::Neighbor => Color32::WHITE,
        NodeStyle::Hub { dimmed, .. } | NodeStyle::Minor { dimmed } => {
            if dimmed {
                FADED_GREY
            } else {
                MUTED_GREY
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radii_follow_degree() {
        assert_eq!(node_radius(16.0, 2.0), 10.0);
        assert_eq!(boundary_radius(16.0, 2.0), 13.0);
        assert_eq!(collide_radius(16.0, 2.0, 1.5), 22.0);
        assert_eq!(node_radius(0.0, 2.0), 2.0);
    }

    #[test]
    fn test_negative_collision_radius_floors_at_zero() {
        assert_eq!(collide_radius(100.0, 3.0, -8.5), 0.0);
    }

    #[test]
    fn test_link_paint_widths() {
        let connected = link_paint(LinkStyle::Connected, 4.0);
        assert!(connected.dashed);
        assert!((connected.stroke.width - 1.6).abs() < 1e-6);

        let faded = link_paint(LinkStyle::Faded, 100.0);
        assert!(!faded.dashed);
        assert_eq!(faded.stroke.width, 1.0);
    }

    #[test]
    fn test_dimmed_nodes_use_faded_grey() {
        assert_eq!(node_color(NodeStyle::Minor { dimmed: true }), FADED_GREY);
        assert_eq!(
            node_color(NodeStyle::Hub {
                dimmed: false,
                labeled: true
            }),
            MUTED_GREY
        );
    }
}
