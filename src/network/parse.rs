use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::error::NetworkError;
use super::graph::{ArtistNode, FeaturingEdge, NetworkData, NetworkMetadata, Track};

#[derive(Clone, Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    degree: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawTrack {
    #[serde(default)]
    track_name: Option<String>,
    #[serde(default)]
    track_id: Option<String>,
    #[serde(default)]
    popularity: Option<f64>,
    #[serde(default)]
    genre: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawEdge {
    source: String,
    target: String,
    #[serde(default)]
    weight: Option<f64>,
    #[serde(default)]
    tracks: Option<Vec<RawTrack>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    total_nodes: Option<usize>,
    #[serde(default)]
    total_edges: Option<usize>,
    #[serde(default)]
    total_collaborations: Option<f64>,
    #[serde(default)]
    description: Option<String>,
}

fn required_array<'a>(object: &'a serde_json::Map<String, Value>, field: &'static str) -> Result<&'a Vec<Value>> {
    object
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| NetworkError::MissingArray { field }.into())
}

pub fn parse_network(raw: &str) -> Result<NetworkData> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in network document")?;
    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("network document must be a JSON object"))?;

    let raw_nodes = required_array(object, "nodes")?;
    let raw_edges = required_array(object, "edges")?;

    let mut skipped = 0usize;
    let mut nodes = Vec::with_capacity(raw_nodes.len());
    for value in raw_nodes {
        let Ok(node) = RawNode::deserialize(value) else {
            skipped += 1;
            continue;
        };
        if node.id.is_empty() {
            skipped += 1;
            continue;
        }

        let name = node
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| node.id.clone());
        nodes.push(ArtistNode {
            id: node.id,
            name,
            degree: node
                .degree
                .filter(|degree| degree.is_finite())
                .map_or(0.0, |degree| degree.max(0.0)),
        });
    }

    let mut edges = Vec::with_capacity(raw_edges.len());
    for value in raw_edges {
        let Ok(edge) = RawEdge::deserialize(value) else {
            skipped += 1;
            continue;
        };

        edges.push(FeaturingEdge {
            source: edge.source,
            target: edge.target,
            weight: edge
                .weight
                .filter(|weight| weight.is_finite())
                .map_or(1.0, |weight| weight.max(0.0)),
            tracks: edge
                .tracks
                .unwrap_or_default()
                .into_iter()
                .map(|track| Track {
                    track_name: track.track_name.unwrap_or_default(),
                    track_id: track.track_id.unwrap_or_default(),
                    popularity: track.popularity.unwrap_or_default(),
                    genre: track.genre.unwrap_or_default(),
                })
                .collect(),
        });
    }

    if skipped > 0 {
        tracing::warn!(skipped, "ignored malformed node/edge entries");
    }

    let raw_metadata = object
        .get("metadata")
        .map(|value| RawMetadata::deserialize(value).unwrap_or_default())
        .unwrap_or_default();

    let metadata = NetworkMetadata {
        total_nodes: raw_metadata.total_nodes.unwrap_or(nodes.len()),
        total_edges: raw_metadata.total_edges.unwrap_or(edges.len()),
        total_collaborations: raw_metadata
            .total_collaborations
            .unwrap_or_else(|| edges.iter().map(|edge| edge.weight).sum()),
        description: raw_metadata.description.unwrap_or_default(),
    };

    Ok(NetworkData::new(nodes, edges, metadata))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "nodes": [
            {"id": "Lil Wayne", "name": "Lil Wayne", "degree": 57},
            {"id": "Drake", "degree": 41},
            {"id": "Nobody", "name": "  "}
        ],
        "edges": [
            {"source": "Lil Wayne", "target": "Drake", "weight": 3,
             "tracks": [{"track_name": "Right Above It", "track_id": "x1", "popularity": 70, "genre": "Rap"}]},
            {"source": "Drake", "target": "Nobody"}
        ],
        "metadata": {"total_nodes": 1200, "description": "sample"}
    }"#;

    #[test]
    fn test_parse_applies_defaults() {
        let data = parse_network(SAMPLE).unwrap();

        assert_eq!(data.nodes.len(), 3);
        assert_eq!(data.nodes[1].name, "Drake");
        assert_eq!(data.nodes[2].name, "Nobody");
        assert_eq!(data.nodes[2].degree, 0.0);

        assert_eq!(data.edges[0].tracks[0].track_name, "Right Above It");
        assert_eq!(data.edges[1].weight, 1.0);
        assert!(data.edges[1].tracks.is_empty());
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let data = parse_network(
            r#"{
                "nodes": [{"id": "a", "degree": null}, {"id": "b", "name": null, "degree": 3}],
                "edges": [
                    {"source": "a", "target": "b", "weight": null},
                    {"source": "b", "target": "a", "tracks": null},
                    {"source": "a", "target": "b",
                     "tracks": [{"track_name": "Song", "popularity": null, "genre": null}]}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.nodes[0].degree, 0.0);
        assert_eq!(data.nodes[1].name, "b");
        assert_eq!(data.edges.len(), 3);
        assert_eq!(data.edges[0].weight, 1.0);
        assert!(data.edges[1].tracks.is_empty());
        assert_eq!(data.edges[2].tracks[0].track_name, "Song");
        assert_eq!(data.edges[2].tracks[0].popularity, 0.0);
        assert!(data.edges[2].tracks[0].genre.is_empty());
    }

    #[test]
    fn test_metadata_totals_fall_back_to_counts() {
        let data = parse_network(SAMPLE).unwrap();

        assert_eq!(data.metadata.total_nodes, 1200);
        assert_eq!(data.metadata.total_edges, 2);
        assert_eq!(data.metadata.total_collaborations, 4.0);
        assert_eq!(data.metadata.description, "sample");
    }

    #[test]
    fn test_metadata_is_optional() {
        let data = parse_network(r#"{"nodes": [{"id": "a"}], "edges": []}"#).unwrap();
        assert_eq!(data.metadata.total_nodes, 1);
        assert_eq!(data.metadata.total_edges, 0);
    }

    #[test]
    fn test_node_lookup_keeps_first_duplicate() {
        let data = parse_network(
            r#"{"nodes": [{"id": "a", "degree": 2}, {"id": "a", "degree": 9}], "edges": []}"#,
        )
        .unwrap();
        assert_eq!(data.node("a").map(|node| node.degree), Some(2.0));
        assert!(data.node("b").is_none());
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let data = parse_network(
            r#"{"nodes": [{"id": "a"}, {"name": "no id"}, 42], "edges": [{"source": "a"}]}"#,
        )
        .unwrap();
        assert_eq!(data.nodes.len(), 1);
        assert!(data.edges.is_empty());
    }

    #[test]
    fn test_rejects_invalid_documents() {
        assert!(parse_network("not json").is_err());
        assert!(parse_network("[]").is_err());

        let error = parse_network(r#"{"nodes": []}"#).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<NetworkError>(),
            Some(NetworkError::MissingArray { field: "edges" })
        ));
    }
}
