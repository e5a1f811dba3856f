use crate::network::FeaturingEdge;
use crate::util::truncate_chars;

use super::super::RenderLink;

const TRACK_LABEL_LIMIT: usize = 3;
const TRACK_NAME_MAX_CHARS: usize = 30;

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct TrackLabel {
    /// Rank among the heaviest links, used as the vertical offset slot.
    pub slot: usize,
    pub source: usize,
    pub target: usize,
    pub text: String,
}

pub(in crate::app) fn track_labels(
    links: &[RenderLink],
    edges: &[FeaturingEdge],
    hovered: usize,
) -> Vec<TrackLabel> {
    let mut touching = links
        .iter()
        .filter(|link| link.source == hovered || link.target == hovered)
        .collect::<Vec<_>>();
    touching.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    touching
        .into_iter()
        .take(TRACK_LABEL_LIMIT)
        .enumerate()
        .filter_map(|(slot, link)| {
            let track = edges.get(link.edge)?.tracks.first()?;
            Some(TrackLabel {
                slot,
                source: link.source,
                target: link.target,
                text: format!(
                    "feat. {}",
                    truncate_chars(&track.track_name, TRACK_NAME_MAX_CHARS)
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::network::Track;

    use super::*;

    fn edge(track_name: Option<&str>) -> FeaturingEdge {
        FeaturingEdge {
            source: String::new(),
            target: String::new(),
            weight: 1.0,
            tracks: track_name
                .map(|name| Track {
                    track_name: name.to_owned(),
                    track_id: String::new(),
                    popularity: 0.0,
                    genre: String::new(),
                })
                .into_iter()
                .collect(),
        }
    }

    fn link(source: usize, target: usize, weight: f64, edge: usize) -> RenderLink {
        RenderLink {
            source,
            target,
            weight,
            edge,
        }
    }

    #[test]
    fn test_labels_follow_heaviest_links() {
        let edges = vec![
            edge(Some("Light")),
            edge(Some("Heaviest")),
            edge(None),
            edge(Some("Middle")),
            edge(Some("Elsewhere")),
        ];
        let links = vec![
            link(0, 1, 1.0, 0),
            link(2, 0, 9.0, 1),
            link(0, 3, 5.0, 2),
            link(4, 0, 3.0, 3),
            link(5, 6, 20.0, 4),
        ];

        let labels = track_labels(&links, &edges, 0);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].slot, 0);
        assert_eq!(labels[0].text, "feat. Heaviest");
        assert_eq!((labels[0].source, labels[0].target), (2, 0));
        assert_eq!(labels[1].slot, 2);
        assert_eq!(labels[1].text, "feat. Middle");
    }

    #[test]
    fn test_long_track_names_are_truncated() {
        let edges = vec![edge(Some("A Very Long Collaboration Title That Keeps Going"))];
        let links = vec![link(0, 1, 1.0, 0)];

        let labels = track_labels(&links, &edges, 1);
        assert_eq!(labels[0].text, "feat. A Very Long Collaboration Titl...");
    }
}
