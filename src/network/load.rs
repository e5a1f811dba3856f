use anyhow::{Context, Result};

use super::fetch::read_source;
use super::graph::NetworkData;
use super::parse::parse_network;

pub fn load_network(source: &str) -> Result<NetworkData> {
    tracing::info!(source, "loading featuring network");

    let raw = read_source(source)?;
    let data =
        parse_network(&raw).with_context(|| format!("failed to parse network data from {source}"))?;

    tracing::info!(
        nodes = data.nodes.len(),
        edges = data.edges.len(),
        collaborations = data.metadata.total_collaborations,
        "network data loaded"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("audiograph-load-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"nodes": [{"id": "a", "degree": 1}, {"id": "b", "degree": 1}],
                "edges": [{"source": "a", "target": "b", "weight": 2}]}"#,
        )
        .unwrap();

        let data = load_network(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.metadata.total_collaborations, 2.0);
    }

    #[test]
    fn test_parse_failure_names_source() {
        let path = std::env::temp_dir().join(format!("audiograph-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ nope").unwrap();

        let error = load_network(path.to_str().unwrap()).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(format!("{error:#}").contains("failed to parse network data"));
    }
}
