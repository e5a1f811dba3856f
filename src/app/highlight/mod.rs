mod glitch;
mod tracks;

pub(super) use self::glitch::{advance_hover_progress, glitch_text};
pub(super) use self::tracks::track_labels;

/// Degree above which an idle node is drawn as a disc rather than a glyph.
const HUB_DEGREE: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum LinkStyle {
    /// Touches the hovered node.
    Connected,
    /// Touches the highlighted artist.
    Highlighted,
    Faded,
    Normal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum NodeStyle {
    Hovered,
    Highlighted,
    Neighbor,
    Hub { dimmed: bool, labeled: bool },
    Minor { dimmed: bool },
}

impl NodeStyle {
    /// Gap between the top of the disc and the label baseline, for styles that carry one.
    pub(super) fn label_gap(self) -> Option<f32> {
        match self {
            Self::Hovered => Some(10.0),
            Self::Highlighted => Some(8.0),
            Self::Neighbor => Some(5.0),
            Self::Hub { .. } | Self::Minor { .. } => None,
        }
    }
}

/// Hover and highlight membership for one frame.
pub(super) struct FocusState {
    hovered: Option<usize>,
    highlighted: Option<usize>,
    hover_neighbors: Vec<bool>,
    highlight_neighbors: Vec<bool>,
}

fn neighbor_mask(neighbors: &[Vec<usize>], center: Option<usize>) -> Vec<bool> {
    let mut mask = vec![false; neighbors.len()];
    if let Some(adjacent) = center.and_then(|index| neighbors.get(index)) {
        for &index in adjacent {
            if let Some(entry) = mask.get_mut(index) {
                *entry = true;
            }
        }
    }
    mask
}

impl FocusState {
    pub(super) fn new(
        neighbors: &[Vec<usize>],
        hovered: Option<usize>,
        highlighted: Option<usize>,
    ) -> Self {
        Self {
            hovered,
            highlighted,
            hover_neighbors: neighbor_mask(neighbors, hovered),
            highlight_neighbors: neighbor_mask(neighbors, highlighted),
        }
    }

    pub(super) fn any_hovered(&self) -> bool {
        self.hovered.is_some()
    }

    /// The hovered node and its direct neighbors.
    pub(super) fn is_hover_active(&self, index: usize) -> bool {
        self.hovered == Some(index) || self.hover_neighbors.get(index).copied().unwrap_or(false)
    }

    pub(super) fn link_style(&self, source: usize, target: usize) -> LinkStyle {
        let touches = |focus: Option<usize>| focus.is_some_and(|index| index == source || index == target);

        if touches(self.hovered) {
            LinkStyle::Connected
        } else if touches(self.highlighted) {
            LinkStyle::Highlighted
        } else if self.any_hovered() {
            LinkStyle::Faded
        } else {
            LinkStyle::Normal
        }
    }

    pub(super) fn node_style(&self, index: usize, val: f64) -> NodeStyle {
        let flagged = |mask: &[bool]| mask.get(index).copied().unwrap_or(false);

        if self.hovered == Some(index) {
            NodeStyle::Hovered
        } else if self.highlighted == Some(index) {
            NodeStyle::Highlighted
        } else if flagged(&self.hover_neighbors) || flagged(&self.highlight_neighbors) {
            NodeStyle::Neighbor
        } else if val > HUB_DEGREE {
            NodeStyle::Hub {
                dimmed: self.any_hovered(),
                labeled: !self.any_hovered(),
            }
        } else {
            NodeStyle::Minor {
                dimmed: self.any_hovered(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 - 1 - 2, 3 isolated
    fn path_neighbors() -> Vec<Vec<usize>> {
        vec![vec![1], vec![0, 2], vec![1], Vec::new()]
    }

    #[test]
    fn test_link_styles_prefer_hover_over_highlight() {
        let neighbors = path_neighbors();

        let focus = FocusState::new(&neighbors, Some(0), Some(2));
        assert_eq!(focus.link_style(0, 1), LinkStyle::Connected);
        assert_eq!(focus.link_style(1, 2), LinkStyle::Highlighted);
        assert_eq!(focus.link_style(1, 3), LinkStyle::Faded);

        let idle = FocusState::new(&neighbors, None, None);
        assert_eq!(idle.link_style(0, 1), LinkStyle::Normal);
    }

    #[test]
    fn test_node_styles() {
        let neighbors = path_neighbors();

        let focus = FocusState::new(&neighbors, Some(1), None);
        assert_eq!(focus.node_style(1, 10.0), NodeStyle::Hovered);
        assert_eq!(focus.node_style(0, 10.0), NodeStyle::Neighbor);
        assert_eq!(focus.node_style(3, 10.0), NodeStyle::Minor { dimmed: true });
        assert_eq!(
            focus.node_style(3, 80.0),
            NodeStyle::Hub {
                dimmed: true,
                labeled: false
            }
        );

        let highlighted = FocusState::new(&neighbors, None, Some(2));
        assert_eq!(highlighted.node_style(2, 1.0), NodeStyle::Highlighted);
        assert_eq!(highlighted.node_style(1, 1.0), NodeStyle::Neighbor);
        assert_eq!(
            highlighted.node_style(3, 51.0),
            NodeStyle::Hub {
                dimmed: false,
                labeled: true
            }
        );
        assert_eq!(highlighted.node_style(3, 50.0), NodeStyle::Minor { dimmed: false });
    }

    #[test]
    fn test_hover_activity_covers_neighbors_only() {
        let neighbors = path_neighbors();
        let focus = FocusState::new(&neighbors, Some(0), None);

        assert!(focus.is_hover_active(0));
        assert!(focus.is_hover_active(1));
        assert!(!focus.is_hover_active(2));
        assert!(!focus.is_hover_active(3));
        assert_eq!(NodeStyle::Hovered.label_gap(), Some(10.0));
    }
}
