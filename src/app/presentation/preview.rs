use std::collections::{HashMap, HashSet};
use std::f32::consts::PI;

use eframe::egui::{Align2, Color32, FontId, Rect, Sense, Stroke, Ui, Vec2, vec2};

use crate::network::NetworkData;

use super::super::physics::{ForceSettings, SimLink, SimNode, Simulation};
use super::super::render_utils::{TERMINAL_GREEN, with_alpha};

pub(super) const PREVIEW_ARTIST: &str = "Lil Wayne";
pub(super) const PREVIEW_EDGE_LIMIT: usize = 20;

const LINK_DISTANCE: f32 = 60.0;
const CHARGE_STRENGTH: f32 = -120.0;
const COLLIDE_RADIUS: f32 = 12.0;
const CENTER_RADIUS: f32 = 10.0;
const NEIGHBOR_RADIUS: f32 = 5.0;
const LABEL_OFFSET: Vec2 = vec2(12.0, 4.0);

/// An artist, the first few collaborations touching them, and their partners.
#[derive(Debug, PartialEq)]
pub(super) struct EgoNetwork {
    pub names: Vec<String>,
    pub center: usize,
    pub links: Vec<SimLink>,
}

/// Nodes keep data order; edges whose endpoints are absent from the node list are dropped.
pub(super) fn ego_network(data: &NetworkData, artist: &str, edge_limit: usize) -> Option<EgoNetwork> {
    let center = data.node(artist)?;
    let edges = data
        .edges_touching(&center.id)
        .take(edge_limit)
        .collect::<Vec<_>>();

    let mut wanted = HashSet::from([center.id.as_str()]);
    for edge in &edges {
        wanted.insert(edge.source.as_str());
        wanted.insert(edge.target.as_str());
    }

    let mut index_by_id = HashMap::new();
    let mut names = Vec::new();
    for node in &data.nodes {
        if wanted.contains(node.id.as_str()) && !index_by_id.contains_key(node.id.as_str()) {
            index_by_id.insert(node.id.as_str(), names.len());
            names.push(node.id.clone());
        }
    }

    let links = edges
        .iter()
        .filter_map(|edge| {
            let source = *index_by_id.get(edge.source.as_str())?;
            let target = *index_by_id.get(edge.target.as_str())?;
            (source != target).then_some(SimLink { source, target })
        })
        .collect();

    Some(EgoNetwork {
        center: *index_by_id.get(center.id.as_str())?,
        names,
        links,
    })
}

/// Sunflower spiral around the origin, the usual seed layout for force graphs.
fn phyllotaxis(index: usize) -> Vec2 {
    let radius = 10.0 * (0.5 + index as f32).sqrt();
    let angle = index as f32 * PI * (3.0 - 5.0_f32.sqrt());
    vec2(radius * angle.cos(), radius * angle.sin())
}

pub(super) struct EgoPreview {
    network: EgoNetwork,
    simulation: Simulation,
    size: Vec2,
}

impl EgoPreview {
    pub(super) fn new(network: EgoNetwork) -> Self {
        let nodes = (0..network.names.len())
            .map(|index| SimNode::at(phyllotaxis(index), COLLIDE_RADIUS))
            .collect();
        let simulation = Simulation::new(
            nodes,
            network.links.clone(),
            ForceSettings {
                link_distance: LINK_DISTANCE,
                charge_strength: CHARGE_STRENGTH,
                center: Vec2::ZERO,
                center_strength: 1.0,
            },
        );

        Self {
            network,
            simulation,
            size: Vec2::ZERO,
        }
    }

    #[cfg(test)]
    pub(super) fn node_count(&self) -> usize {
        self.network.names.len()
    }

    pub(super) fn show(&mut self, ui: &mut Ui, size: Vec2) {
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        if rect.size() != self.size {
            self.size = rect.size();
            let mut settings = self.simulation.settings();
            settings.center = self.size * 0.5;
            self.simulation.set_settings(settings);
            self.simulation.restart();
        }

        if self.simulation.step() {
            ui.ctx().request_repaint();
        }
        self.paint(ui, rect);
    }

    fn paint(&self, ui: &Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        let origin = rect.min.to_vec2();
        let nodes = self.simulation.nodes();

        let link_stroke = Stroke::new(1.0, with_alpha(Color32::from_gray(0x33), 0.6));
        for link in &self.network.links {
            let source = nodes[link.source].position + origin;
            let target = nodes[link.target].position + origin;
            painter.line_segment([source.to_pos2(), target.to_pos2()], link_stroke);
        }

        let outline = Stroke::new(1.5, Color32::BLACK);
        for (index, node) in nodes.iter().enumerate() {
            let center = (node.position + origin).to_pos2();
            let is_center = index == self.network.center;
            let (radius, fill) = if is_center {
                (CENTER_RADIUS, TERMINAL_GREEN)
            } else {
                (NEIGHBOR_RADIUS, Color32::from_gray(0x66))
            };
            painter.circle(center, radius, fill, outline);

            let (font, color) = if is_center {
                (FontId::monospace(14.0), Color32::WHITE)
            } else {
                (
                    FontId::monospace(10.0),
                    with_alpha(Color32::from_gray(0xaa), 0.7),
                )
            };
            painter.text(
                center + LABEL_OFFSET,
                Align2::LEFT_CENTER,
                &self.network.names[index],
                font,
                color,
            );
        }
    }
}
