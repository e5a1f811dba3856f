use eframe::egui::Vec2;

use crate::util::stable_unit;

use super::quadtree::QuadNode;
use super::{SimLink, SimNode};

const DISTANCE_MIN_SQ: f32 = 1.0;

/// Tiny deterministic offset used to separate coincident points.
fn jiggle(a: usize, b: usize, axis: u8) -> f32 {
    (stable_unit((a, b, axis)) - 0.5) * 1e-6
}

fn separate(mut delta: Vec2, a: usize, b: usize) -> Vec2 {
    if delta.x == 0.0 {
        delta.x = jiggle(a, b, 0);
    }
    if delta.y == 0.0 {
        delta.y = jiggle(a, b, 1);
    }
    delta
}

pub(super) struct LinkWeights {
    pub(super) strength: Vec<f32>,
    pub(super) bias: Vec<f32>,
}

impl LinkWeights {
    /// Strength `1 / min(deg(s), deg(t))`, bias `deg(s) / (deg(s) + deg(t))`.
    pub(super) fn compute(node_count: usize, links: &[SimLink]) -> Self {
        let mut count = vec![0usize; node_count];
        for link in links {
            if link.source < node_count && link.target < node_count {
                count[link.source] += 1;
                count[link.target] += 1;
            }
        }

        let mut strength = Vec::with_capacity(links.len());
        let mut bias = Vec::with_capacity(links.len());
        for link in links {
            let source = count.get(link.source).copied().unwrap_or(0).max(1) as f32;
            let target = count.get(link.target).copied().unwrap_or(0).max(1) as f32;
            strength.push(1.0 / source.min(target));
            bias.push(source / (source + target));
        }

        Self { strength, bias }
    }
}

pub(super) fn apply_links(
    nodes: &mut [SimNode],
    links: &[SimLink],
    weights: &LinkWeights,
    distance: f32,
    alpha: f32,
) {
    for (index, link) in links.iter().enumerate() {
        let (source, target) = (link.source, link.target);
        if source >= nodes.len() || target >= nodes.len() || source == target {
            continue;
        }

        let predicted_source = nodes[source].position + nodes[source].velocity;
        let predicted_target = nodes[target].position + nodes[target].velocity;
        let delta = separate(predicted_target - predicted_source, source, target);
        let length = delta.length();

        let scale = (length - distance) / length * alpha * weights.strength[index];
        let correction = delta * scale;
        let bias = weights.bias[index];

        nodes[target].velocity -= correction * bias;
        nodes[source].velocity += correction * (1.0 - bias);
    }
}

fn charge_between(delta: Vec2, charge: f32, alpha: f32) -> Vec2 {
    let mut distance_sq = delta.length_sq();
    if distance_sq < DISTANCE_MIN_SQ {
        distance_sq = (DISTANCE_MIN_SQ * distance_sq).sqrt();
    }
    delta * (charge * alpha / distance_sq)
}

pub(super) fn accumulate_charge_for_node(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    charges: &[f32],
    alpha: f32,
    theta_sq: f32,
    velocity: &mut Vec2,
) {
    let point = positions[index];

    if node.is_leaf() {
        for &other_index in &node.indices {
            if other_index == index {
                continue;
            }
            let delta = separate(positions[other_index] - point, index, other_index);
            *velocity += charge_between(delta, charges[other_index], alpha);
        }
        return;
    }

    let delta = node.center_of_charge - point;
    let side = node.bounds.side_length();
    if (side * side) / theta_sq < delta.length_sq() {
        *velocity += charge_between(delta, node.charge, alpha);
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_charge_for_node(child, index, positions, charges, alpha, theta_sq, velocity);
    }
}

pub(super) fn apply_center(nodes: &mut [SimNode], center: Vec2, strength: f32) {
    if nodes.is_empty() {
        return;
    }

    let mut sum = Vec2::ZERO;
    for node in nodes.iter() {
        sum += node.position;
    }
    let shift = (sum / nodes.len() as f32 - center) * strength;
    for node in nodes.iter_mut() {
        node.position -= shift;
    }
}

fn collect_collision_pairs(
    node_a: &QuadNode,
    node_b: &QuadNode,
    same_node: bool,
    max_distance_sq: f32,
    pairs: &mut Vec<(usize, usize)>,
) {
    if node_a.bounds.distance_sq_to(node_b.bounds) > max_distance_sq {
        return;
    }

    if node_a.is_leaf() && node_b.is_leaf() {
        if same_node {
            for (offset, &from) in node_a.indices.iter().enumerate() {
                for &to in &node_a.indices[offset + 1..] {
                    pairs.push((from.min(to), from.max(to)));
                }
            }
        } else {
            for &from in &node_a.indices {
                for &to in &node_b.indices {
                    pairs.push((from.min(to), from.max(to)));
                }
            }
        }
        return;
    }

    if same_node {
        for first in 0..4 {
            let Some(child_a) = node_a.children[first].as_ref() else {
                continue;
            };

            collect_collision_pairs(child_a, child_a, true, max_distance_sq, pairs);

            for second in (first + 1)..4 {
                let Some(child_b) = node_a.children[second].as_ref() else {
                    continue;
                };
                collect_collision_pairs(child_a, child_b, false, max_distance_sq, pairs);
            }
        }
        return;
    }

    let split_a = if node_a.is_leaf() {
        false
    } else if node_b.is_leaf() {
        true
    } else {
        node_a.bounds.half_extent >= node_b.bounds.half_extent
    };

    if split_a {
        for child in node_a.children.iter().flatten() {
            collect_collision_pairs(child, node_b, false, max_distance_sq, pairs);
        }
    } else {
        for child in node_b.children.iter().flatten() {
            collect_collision_pairs(node_a, child, false, max_distance_sq, pairs);
        }
    }
}

/// Pushes overlapping circles apart, splitting the correction by squared-radius ratio.
pub(super) fn apply_collisions(
    nodes: &mut [SimNode],
    predicted: &[Vec2],
    pairs: &mut Vec<(usize, usize)>,
) {
    let max_radius = nodes
        .iter()
        .map(|node| node.collide_radius)
        .fold(0.0_f32, f32::max);
    if max_radius <= 0.0 {
        return;
    }

    let Some(tree) = QuadNode::build(predicted, &[]) else {
        return;
    };

    pairs.clear();
    let reach = max_radius * 2.0;
    collect_collision_pairs(&tree, &tree, true, reach * reach, pairs);

    for &(a, b) in pairs.iter() {
        let radius_a = nodes[a].collide_radius;
        let radius_b = nodes[b].collide_radius;
        let reach = radius_a + radius_b;
        if reach <= 0.0 {
            continue;
        }

        let delta = predicted[a] - (nodes[b].position + nodes[b].velocity);
        if delta.length_sq() >= reach * reach {
            continue;
        }

        let delta = separate(delta, a, b);
        let distance = delta.length();
        let push = delta * ((reach - distance) / distance);
        let radius_a_sq = radius_a * radius_a;
        let radius_b_sq = radius_b * radius_b;
        let ratio = radius_b_sq / (radius_a_sq + radius_b_sq);

        nodes[a].velocity += push * ratio;
        nodes[b].velocity -= push * (1.0 - ratio);
    }
}
