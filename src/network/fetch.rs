use std::path::Path;

use anyhow::{Context, Result};

use super::error::NetworkError;

pub(super) fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub(super) fn read_source(source: &str) -> Result<String> {
    if is_remote(source) {
        let response = reqwest::blocking::get(source)
            .with_context(|| format!("failed to request {source}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::HttpStatus {
                url: source.to_owned(),
                status: status.as_u16(),
            }
            .into());
        }

        response
            .text()
            .with_context(|| format!("failed to read response body from {source}"))
    } else {
        std::fs::read_to_string(Path::new(source))
            .with_context(|| format!("failed to read {source}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_detection() {
        assert!(is_remote("https://example.com/network.json"));
        assert!(is_remote("http://localhost:3000/spotify_featuring_network.json"));
        assert!(!is_remote("public/spotify_featuring_network.json"));
        assert!(!is_remote("/data/https.json"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let error = read_source("/nonexistent/audiograph/network.json").unwrap_err();
        assert!(error.to_string().contains("/nonexistent/audiograph/network.json"));
    }
}
