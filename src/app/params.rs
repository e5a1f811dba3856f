#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkParams {
    pub link_distance: f32,
    pub charge_strength: f32,
    pub center_strength: f32,
    pub collision_radius: f32,
    pub node_size: f32,
    pub max_nodes: usize,
    pub max_edges: usize,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            link_distance: 50.0,
            charge_strength: 1.0,
            center_strength: 1.0,
            collision_radius: 1.5,
            node_size: 2.0,
            max_nodes: 700,
            max_edges: 500,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum ParamField {
    LinkDistance,
    ChargeStrength,
    CenterStrength,
    CollisionRadius,
    NodeSize,
    MaxNodes,
    MaxEdges,
}

#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamField {
    pub(in crate::app) const ALL: [Self; 7] = [
        Self::LinkDistance,
        Self::ChargeStrength,
        Self::CenterStrength,
        Self::CollisionRadius,
        Self::NodeSize,
        Self::MaxNodes,
        Self::MaxEdges,
    ];

    pub(in crate::app) fn range(self) -> ParamRange {
        let (min, max, step) = match self {
            Self::LinkDistance => (-50.0, 150.0, 10.0),
            Self::ChargeStrength => (-10.0, 10.0, 1.0),
            Self::CenterStrength => (-50.0, 100.0, 1.0),
            Self::CollisionRadius => (-8.5, 11.5, 0.1),
            Self::NodeSize => (0.5, 3.0, 0.1),
            Self::MaxNodes => (50.0, 1000.0, 50.0),
            Self::MaxEdges => (50.0, 1000.0, 50.0),
        };
        ParamRange { min, max, step }
    }

    pub(in crate::app) fn label(self, value: f32) -> String {
        match self {
            Self::LinkDistance => format!("Link Distance: {value}"),
            Self::ChargeStrength => format!("Charge Strength: {value}"),
            Self::CenterStrength => format!("Center Strength: {value:.1}"),
            Self::CollisionRadius => format!("Collision Radius: {value:.1}"),
            Self::NodeSize => format!("Node Size: {value:.1}x"),
            Self::MaxNodes => format!("Max Nodes: {value}"),
            Self::MaxEdges => format!("Max Edges: {value}"),
        }
    }

    /// Whether a change only retunes forces, as opposed to reshaping the rendered subset.
    pub(in crate::app) fn is_force(self) -> bool {
        !matches!(self, Self::MaxNodes | Self::MaxEdges)
    }
}

impl NetworkParams {
    pub(in crate::app) fn get(&self, field: ParamField) -> f32 {
        match field {
            ParamField::LinkDistance => self.link_distance,
            ParamField::ChargeStrength => self.charge_strength,
            ParamField::CenterStrength => self.center_strength,
            ParamField::CollisionRadius => self.collision_radius,
            ParamField::NodeSize => self.node_size,
            ParamField::MaxNodes => self.max_nodes as f32,
            ParamField::MaxEdges => self.max_edges as f32,
        }
    }

    pub(in crate::app) fn set(&mut self, field: ParamField, value: f32) {
        let range = field.range();
        let value = if value.is_finite() {
            value.clamp(range.min, range.max)
        } else {
            self.get(field)
        };

        match field {
            ParamField::LinkDistance => self.link_distance = value,
            ParamField::ChargeStrength => self.charge_strength = value,
            ParamField::CenterStrength => self.center_strength = value,
            ParamField::CollisionRadius => self.collision_radius = value,
            ParamField::NodeSize => self.node_size = value,
            ParamField::MaxNodes => self.max_nodes = value.round() as usize,
            ParamField::MaxEdges => self.max_edges = value.round() as usize,
        }
    }

    /// One wheel notch: scrolling down lowers the value by one step.
    pub(in crate::app) fn nudge(&mut self, field: ParamField, up: bool) -> bool {
        let range = field.range();
        let current = self.get(field);
        let delta = if up { range.step } else { -range.step };
        let next = ((current + delta) / range.step).round() * range.step;
        let next = next.clamp(range.min, range.max);

        if (next - current).abs() <= f32::EPSILON {
            return false;
        }
        self.set(field, next);
        true
    }

    pub fn clamped(mut self) -> Self {
        for field in ParamField::ALL {
            let value = self.get(field);
            self.set(field, value);
        }
        self
    }
}
