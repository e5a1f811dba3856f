use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use crate::network::NetworkData;
use crate::util::stable_seed;

use super::super::physics::{ForceSettings, SimLink, SimNode, Simulation};
use super::super::render_utils::collide_radius;
use super::super::{NetworkParams, RenderGraph, RenderLink, RenderNode, ViewModel};

const REBUILD_ALPHA: f32 = 0.3;

/// First `max_nodes` distinct artists in file order, then the first
/// `max_edges` edges whose endpoints both made the cut.
fn select_subset(
    data: &NetworkData,
    max_nodes: usize,
    max_edges: usize,
) -> (Vec<usize>, Vec<RenderLink>) {
    let mut slot_by_id = HashMap::new();
    let mut node_indices = Vec::new();
    for (data_index, node) in data.nodes.iter().enumerate() {
        if node_indices.len() >= max_nodes {
            break;
        }
        if slot_by_id.contains_key(node.id.as_str()) {
            continue;
        }
        slot_by_id.insert(node.id.as_str(), node_indices.len());
        node_indices.push(data_index);
    }

    let mut links = Vec::new();
    for (edge_index, edge) in data.edges.iter().enumerate() {
        if links.len() >= max_edges {
            break;
        }
        if edge.source == edge.target {
            continue;
        }
        let (Some(&source), Some(&target)) = (
            slot_by_id.get(edge.source.as_str()),
            slot_by_id.get(edge.target.as_str()),
        ) else {
            continue;
        };

        links.push(RenderLink {
            source,
            target,
            weight: edge.weight,
            edge: edge_index,
        });
    }

    (node_indices, links)
}

fn ring_position(slot: usize, count: usize, size: Vec2) -> Vec2 {
    let angle = (slot as f32 / count.max(1) as f32) * TAU;
    let radius = size.x.min(size.y) * 0.2;
    size * 0.5 + vec2(angle.cos(), angle.sin()) * radius
}

pub(in crate::app) fn force_settings(
    params: &NetworkParams,
    size: Vec2,
    center_strength: f32,
) -> ForceSettings {
    ForceSettings {
        link_distance: params.link_distance,
        charge_strength: params.charge_strength,
        center: size * 0.5,
        center_strength,
    }
}

impl RenderGraph {
    fn build(
        data: &NetworkData,
        params: &NetworkParams,
        size: Vec2,
        center_strength: f32,
        previous: Option<&RenderGraph>,
    ) -> Self {
        let (node_indices, links) = select_subset(data, params.max_nodes, params.max_edges);
        let count = node_indices.len();

        let mut nodes = Vec::with_capacity(count);
        let mut sim_nodes = Vec::with_capacity(count);
        let mut index_by_id = HashMap::with_capacity(count);
        let mut carried = 0usize;

        for (slot, &data_index) in node_indices.iter().enumerate() {
            let artist = &data.nodes[data_index];
            let radius = collide_radius(artist.degree, params.node_size, params.collision_radius);
            let mut sim_node = SimNode::at(ring_position(slot, count, size), radius);
            let mut hover_progress = 0.0;

            if let Some(prior) = previous
                && let Some(&prior_index) = prior.index_by_id.get(&artist.id)
                && let Some(prior_sim) = prior.simulation.nodes().get(prior_index)
            {
                sim_node.position = prior_sim.position;
                sim_node.velocity = prior_sim.velocity;
                hover_progress = prior.nodes[prior_index].hover_progress;
                carried += 1;
            }

            index_by_id.insert(artist.id.clone(), slot);
            sim_nodes.push(sim_node);
            nodes.push(RenderNode {
                id: artist.id.clone(),
                name: artist.name.clone(),
                val: artist.degree,
                hover_progress,
                glitch_seed: stable_seed(&artist.id),
            });
        }

        let mut neighbors = vec![Vec::new(); count];
        for link in &links {
            neighbors[link.source].push(link.target);
            neighbors[link.target].push(link.source);
        }

        let sim_links = links
            .iter()
            .map(|link| SimLink {
                source: link.source,
                target: link.target,
            })
            .collect();
        let mut simulation = Simulation::new(
            sim_nodes,
            sim_links,
            force_settings(params, size, center_strength),
        );
        if carried > 0 {
            simulation.set_alpha(REBUILD_ALPHA);
        }

        Self {
            nodes,
            links,
            index_by_id,
            neighbors,
            simulation,
            frame: 0,
        }
    }

    /// Resolves an artist by id, falling back to the display name.
    pub(in crate::app) fn lookup(&self, key: &str) -> Option<usize> {
        self.index_by_id
            .get(key)
            .copied()
            .or_else(|| self.nodes.iter().position(|node| node.name == key))
    }
}

impl ViewModel {
    pub(in crate::app) fn rebuild_render_graph(&mut self, size: Vec2) {
        let previous = self.graph_cache.take();
        let center_strength = self.pulse.strength(self.params.center_strength);
        let graph = RenderGraph::build(
            &self.data,
            &self.params,
            size,
            center_strength,
            previous.as_ref(),
        );

        tracing::info!(
            nodes = graph.nodes.len(),
            links = graph.links.len(),
            "rebuilt render graph"
        );

        self.hovered = None;
        self.dragging = None;
        self.canvas_size = size;
        self.graph_cache = Some(graph);
        self.graph_dirty = false;
    }

    /// Pushes force parameters into the running simulation without a rebuild.
    pub(in crate::app) fn apply_force_params(&mut self) {
        let params = self.params;
        let center_strength = self.pulse.strength(params.center_strength);
        let Some(graph) = self.graph_cache.as_mut() else {
            return;
        };

        for (node, sim_node) in graph.nodes.iter().zip(graph.simulation.nodes_mut()) {
            sim_node.collide_radius =
                collide_radius(node.val, params.node_size, params.collision_radius);
        }
        graph
            .simulation
            .set_settings(force_settings(&params, self.canvas_size, center_strength));
        graph.simulation.set_alpha(REBUILD_ALPHA);
        graph.simulation.restart();
        tracing::debug!("simulation restarted after parameter change");
    }
}
