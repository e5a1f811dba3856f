mod error;
mod fetch;
mod graph;
mod load;
mod parse;

pub use graph::{ArtistNode, FeaturingEdge, NetworkData, NetworkMetadata};
pub use load::load_network;
#[cfg(test)]
pub use graph::Track;
#[cfg(test)]
pub use parse::parse_network;
