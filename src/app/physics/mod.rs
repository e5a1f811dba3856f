mod forces;
mod quadtree;

use eframe::egui::Vec2;

use forces::{
    LinkWeights, accumulate_charge_for_node, apply_center, apply_collisions, apply_links,
};
use quadtree::QuadNode;

const BARNES_HUT_THETA: f32 = 0.9;
const ALPHA_MIN: f32 = 0.001;
const VELOCITY_DECAY: f32 = 0.6;

#[derive(Clone, Debug)]
pub(in crate::app) struct SimNode {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Pinned position, set while the node is being dragged.
    pub fixed: Option<Vec2>,
    pub collide_radius: f32,
}

impl SimNode {
    pub(in crate::app) fn at(position: Vec2, collide_radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            fixed: None,
            collide_radius,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) struct SimLink {
    pub source: usize,
    pub target: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ForceSettings {
    pub link_distance: f32,
    pub charge_strength: f32,
    pub center: Vec2,
    pub center_strength: f32,
}

struct PhysicsScratch {
    positions: Vec<Vec2>,
    charges: Vec<f32>,
    pairs: Vec<(usize, usize)>,
}

/// Velocity-Verlet force simulation with link, many-body, center and
/// collision forces, cooled by an alpha schedule.
pub(in crate::app) struct Simulation {
    nodes: Vec<SimNode>,
    links: Vec<SimLink>,
    link_weights: LinkWeights,
    settings: ForceSettings,
    alpha: f32,
    alpha_target: f32,
    alpha_decay: f32,
    running: bool,
    scratch: PhysicsScratch,
}

impl Simulation {
    pub(in crate::app) fn new(nodes: Vec<SimNode>, links: Vec<SimLink>, settings: ForceSettings) -> Self {
        let link_weights = LinkWeights::compute(nodes.len(), &links);
        Self {
            nodes,
            links,
            link_weights,
            settings,
            alpha: 1.0,
            alpha_target: 0.0,
            alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
            running: true,
            scratch: PhysicsScratch {
                positions: Vec::new(),
                charges: Vec::new(),
                pairs: Vec::new(),
            },
        }
    }

    pub(in crate::app) fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub(in crate::app) fn nodes_mut(&mut self) -> &mut [SimNode] {
        &mut self.nodes
    }

    pub(in crate::app) fn settings(&self) -> ForceSettings {
        self.settings
    }

    pub(in crate::app) fn set_settings(&mut self, settings: ForceSettings) {
        self.settings = settings;
    }

    #[cfg(test)]
    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    pub(in crate::app) fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    #[cfg(test)]
    pub(in crate::app) fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub(in crate::app) fn set_alpha_target(&mut self, alpha_target: f32) {
        self.alpha_target = alpha_target;
    }

    #[cfg(test)]
    pub(in crate::app) fn is_running(&self) -> bool {
        self.running
    }

    pub(in crate::app) fn restart(&mut self) {
        self.running = true;
    }

    pub(in crate::app) fn stop(&mut self) {
        self.running = false;
    }

    /// Advances one frame of the timer; stops once alpha falls below the floor.
    pub(in crate::app) fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.tick();
        if self.alpha < ALPHA_MIN {
            self.running = false;
            tracing::debug!("simulation cooled down");
        }
        true
    }

    pub(in crate::app) fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
        let alpha = self.alpha;
        let settings = self.settings;

        apply_links(
            &mut self.nodes,
            &self.links,
            &self.link_weights,
            settings.link_distance,
            alpha,
        );
        self.apply_charge(alpha);
        apply_center(&mut self.nodes, settings.center, settings.center_strength);
        self.apply_collide();

        for node in &mut self.nodes {
            if let Some(fixed) = node.fixed {
                node.position = fixed;
                node.velocity = Vec2::ZERO;
            } else {
                node.velocity *= VELOCITY_DECAY;
                node.position += node.velocity;
            }
        }
    }

    fn apply_charge(&mut self, alpha: f32) {
        let strength = self.settings.charge_strength;
        if strength == 0.0 || self.nodes.len() < 2 {
            return;
        }

        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch.positions.extend(self.nodes.iter().map(|node| node.position));
        scratch.charges.clear();
        scratch.charges.resize(self.nodes.len(), strength);

        let Some(tree) = QuadNode::build(&scratch.positions, &scratch.charges) else {
            return;
        };

        let theta_sq = BARNES_HUT_THETA * BARNES_HUT_THETA;
        for (index, node) in self.nodes.iter_mut().enumerate() {
            accumulate_charge_for_node(
                &tree,
                index,
                &scratch.positions,
                &scratch.charges,
                alpha,
                theta_sq,
                &mut node.velocity,
            );
        }
    }

    fn apply_collide(&mut self) {
        if self.nodes.len() < 2 {
            return;
        }

        let scratch = &mut self.scratch;
        scratch.positions.clear();
        scratch
            .positions
            .extend(self.nodes.iter().map(|node| node.position + node.velocity));
        apply_collisions(&mut self.nodes, &scratch.positions, &mut scratch.pairs);
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    fn settings(link_distance: f32, charge_strength: f32, center_strength: f32) -> ForceSettings {
        ForceSettings {
            link_distance,
            charge_strength,
            center: Vec2::ZERO,
            center_strength,
        }
    }

    fn distance(simulation: &Simulation, a: usize, b: usize) -> f32 {
        (simulation.nodes()[a].position - simulation.nodes()[b].position).length()
    }

    #[test]
    fn test_alpha_cools_and_timer_stops() {
        let nodes = vec![SimNode::at(vec2(0.0, 0.0), 0.0), SimNode::at(vec2(5.0, 0.0), 0.0)];
        let mut simulation = Simulation::new(nodes, Vec::new(), settings(30.0, 0.0, 0.0));

        simulation.tick();
        let expected = 1.0 - (1.0 - ALPHA_MIN.powf(1.0 / 300.0));
        assert!((simulation.alpha() - expected).abs() < 1e-6);

        let mut steps = 1;
        while simulation.step() {
            steps += 1;
            assert!(steps < 400, "simulation never cooled down");
        }
        assert!(!simulation.is_running());
        assert!(simulation.alpha() < ALPHA_MIN);
    }

    #[test]
    fn test_alpha_target_keeps_simulation_warm() {
        let nodes = vec![SimNode::at(vec2(0.0, 0.0), 0.0), SimNode::at(vec2(5.0, 0.0), 0.0)];
        let mut simulation = Simulation::new(nodes, Vec::new(), settings(30.0, 0.0, 0.0));
        simulation.set_alpha_target(0.05);

        for _ in 0..1000 {
            simulation.step();
        }
        assert!(simulation.is_running());
        assert!((simulation.alpha() - 0.05).abs() < 0.001);
    }

    #[test]
    fn test_stopped_simulation_does_not_move() {
        let nodes = vec![SimNode::at(vec2(0.0, 0.0), 0.0), SimNode::at(vec2(1.0, 0.0), 0.0)];
        let mut simulation = Simulation::new(nodes, Vec::new(), settings(30.0, -30.0, 0.0));
        simulation.stop();

        assert!(!simulation.step());
        assert_eq!(simulation.nodes()[1].position, vec2(1.0, 0.0));

        simulation.restart();
        assert!(simulation.step());
        assert_ne!(simulation.nodes()[1].position, vec2(1.0, 0.0));
    }

    #[test]
    fn test_fixed_node_stays_pinned() {
        let mut pinned = SimNode::at(vec2(10.0, 10.0), 5.0);
        pinned.fixed = Some(vec2(40.0, -20.0));
        let nodes = vec![pinned, SimNode::at(vec2(12.0, 10.0), 5.0)];
        let links = vec![SimLink { source: 0, target: 1 }];
        let mut simulation = Simulation::new(nodes, links, settings(50.0, -30.0, 0.0));

        for _ in 0..50 {
            simulation.tick();
            assert_eq!(simulation.nodes()[0].position, vec2(40.0, -20.0));
            assert_eq!(simulation.nodes()[0].velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_center_force_moves_centroid() {
        let nodes = vec![SimNode::at(vec2(0.0, 0.0), 0.0), SimNode::at(vec2(10.0, 0.0), 0.0)];
        let mut simulation = Simulation::new(
            nodes,
            Vec::new(),
            ForceSettings {
                link_distance: 30.0,
                charge_strength: 0.0,
                center: vec2(100.0, 100.0),
                center_strength: 1.0,
            },
        );

        simulation.tick();
        let centroid = (simulation.nodes()[0].position + simulation.nodes()[1].position) * 0.5;
        assert!((centroid - vec2(100.0, 100.0)).length() < 1e-3);
        assert!((distance(&simulation, 0, 1) - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_negative_charge_repels() {
        let nodes = vec![SimNode::at(vec2(0.0, 0.0), 0.0), SimNode::at(vec2(1.0, 0.0), 0.0)];
        let mut simulation = Simulation::new(nodes, Vec::new(), settings(30.0, -30.0, 0.0));

        for _ in 0..50 {
            simulation.tick();
        }
        assert!(distance(&simulation, 0, 1) > 5.0);
    }

    #[test]
    fn test_positive_charge_attracts() {
        let nodes = vec![SimNode::at(vec2(0.0, 0.0), 0.0), SimNode::at(vec2(40.0, 0.0), 0.0)];
        let mut simulation = Simulation::new(nodes, Vec::new(), settings(30.0, 10.0, 0.0));

        for _ in 0..20 {
            simulation.tick();
        }
        assert!(distance(&simulation, 0, 1) < 40.0);
    }

    #[test]
    fn test_link_pulls_toward_distance() {
        let nodes = vec![SimNode::at(vec2(0.0, 0.0), 0.0), SimNode::at(vec2(200.0, 0.0), 0.0)];
        let links = vec![SimLink { source: 0, target: 1 }];
        let mut simulation = Simulation::new(nodes, links, settings(50.0, 0.0, 0.0));

        for _ in 0..300 {
            simulation.tick();
        }
        assert!((distance(&simulation, 0, 1) - 50.0).abs() < 2.0);
    }

    #[test]
    fn test_collision_separates_overlapping_nodes() {
        let nodes = vec![SimNode::at(vec2(0.0, 0.0), 10.0), SimNode::at(vec2(1.0, 0.0), 10.0)];
        let mut simulation = Simulation::new(nodes, Vec::new(), settings(30.0, 0.0, 0.0));

        for _ in 0..100 {
            simulation.tick();
        }
        assert!(distance(&simulation, 0, 1) > 15.0);
    }

    #[test]
    fn test_barnes_hut_matches_direct_sum_direction() {
        let mut nodes = (0..40)
            .map(|index| {
                SimNode::at(
                    vec2((index % 8) as f32 * 30.0, (index / 8) as f32 * 30.0),
                    0.0,
                )
            })
            .collect::<Vec<_>>();
        nodes.push(SimNode::at(vec2(-400.0, 60.0), 0.0));
        let far = nodes.len() - 1;
        let mut simulation = Simulation::new(nodes, Vec::new(), settings(30.0, -30.0, 0.0));

        simulation.tick();
        assert!(simulation.nodes()[far].position.x < -400.0);
    }
}
