use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub track_name: String,
    pub track_id: String,
    pub popularity: f64,
    pub genre: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArtistNode {
    pub id: String,
    pub name: String,
    pub degree: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeaturingEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub tracks: Vec<Track>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkMetadata {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub total_collaborations: f64,
    pub description: String,
}

/// Featuring network as shipped by the data pipeline, nodes in file order.
#[derive(Clone, Debug)]
pub struct NetworkData {
    pub nodes: Vec<ArtistNode>,
    pub edges: Vec<FeaturingEdge>,
    pub metadata: NetworkMetadata,
    index_by_id: HashMap<String, usize>,
}

impl NetworkData {
    pub(super) fn new(
        nodes: Vec<ArtistNode>,
        edges: Vec<FeaturingEdge>,
        metadata: NetworkMetadata,
    ) -> Self {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            index_by_id.entry(node.id.clone()).or_insert(index);
        }

        Self {
            nodes,
            edges,
            metadata,
            index_by_id,
        }
    }

    pub fn node(&self, id: &str) -> Option<&ArtistNode> {
        self.index_by_id
            .get(id)
            .and_then(|&index| self.nodes.get(index))
    }

    pub fn edges_touching<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a FeaturingEdge> {
        self.edges
            .iter()
            .filter(move |edge| edge.source == id || edge.target == id)
    }
}
