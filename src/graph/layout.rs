//! Layered layout for relationship graphs
//!
//! Nodes are ranked by longest path along edge direction, ordered inside
//! each rank by the barycenter of their upstream neighbours, and placed on a
//! grid of fixed-size boxes. With the default right-to-left direction edge
//! sources sit on the right and the focal resource anchors the left side.

use super::data::{GraphData, Position};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Direction in which ranks advance along edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutDirection {
    #[serde(rename = "TB")]
    TopToBottom,
    #[serde(rename = "BT")]
    BottomToTop,
    #[serde(rename = "LR")]
    LeftToRight,
    #[default]
    #[serde(rename = "RL")]
    RightToLeft,
}

impl LayoutDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutDirection::TopToBottom => "TB",
            LayoutDirection::BottomToTop => "BT",
            LayoutDirection::LeftToRight => "LR",
            LayoutDirection::RightToLeft => "RL",
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(
            self,
            LayoutDirection::LeftToRight | LayoutDirection::RightToLeft
        )
    }
}

impl fmt::Display for LayoutDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LayoutDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TB" => Ok(LayoutDirection::TopToBottom),
            "BT" => Ok(LayoutDirection::BottomToTop),
            "LR" => Ok(LayoutDirection::LeftToRight),
            "RL" => Ok(LayoutDirection::RightToLeft),
            _ => Err(format!(
                "Invalid layout direction '{}'. Valid values: TB, BT, LR, RL",
                s
            )),
        }
    }
}

/// Box size and spacing used by the layout
///
/// Every node gets the same box regardless of its label length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub direction: LayoutDirection,
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between adjacent ranks
    pub rank_sep: f64,
    /// Gap between nodes of the same rank
    pub node_sep: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::RightToLeft,
            node_width: 300.0,
            node_height: 50.0,
            rank_sep: 50.0,
            node_sep: 50.0,
        }
    }
}

impl LayoutConfig {
    /// Box sizes in terminal cells
    pub fn terminal() -> Self {
        Self {
            direction: LayoutDirection::RightToLeft,
            node_width: 30.0,
            node_height: 4.0,
            rank_sep: 6.0,
            node_sep: 1.0,
        }
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }
}

/// Extent of a laid-out graph
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBounds {
    pub width: f64,
    pub height: f64,
}

/// Assign a position to every node of `graph`
///
/// Falls back to insertion order in a single rank when the edges contain a
/// cycle.
pub fn layout(graph: &mut GraphData, config: &LayoutConfig) -> LayoutBounds {
    if graph.nodes.is_empty() {
        return LayoutBounds::default();
    }

    let mut dag: DiGraph<usize, ()> = DiGraph::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();
    for (i, node) in graph.nodes.iter().enumerate() {
        index.insert(node.id.as_str(), dag.add_node(i));
    }
    for edge in &graph.edges {
        let source = index.get(edge.source.as_str());
        let target = index.get(edge.target.as_str());
        if let (Some(&s), Some(&t)) = (source, target) {
            dag.add_edge(s, t, ());
        }
    }

    let ranks = assign_ranks(&dag);
    let layers = order_layers(&dag, &ranks);
    let positions = place(&layers, config);

    let mut bounds = LayoutBounds::default();
    for (ix, pos) in positions {
        let i = dag[ix];
        if let Some(node) = graph.nodes.get_mut(i) {
            node.position = pos;
        }
        bounds.width = bounds.width.max(pos.x + config.node_width);
        bounds.height = bounds.height.max(pos.y + config.node_height);
    }

    tracing::debug!(
        "Laid out {} nodes in {} ranks ({}), bounds {}x{}",
        graph.nodes.len(),
        layers.len(),
        config.direction,
        bounds.width,
        bounds.height
    );
    bounds
}

/// Longest-path rank of every node, sources at rank 0
fn assign_ranks(dag: &DiGraph<usize, ()>) -> HashMap<NodeIndex, usize> {
    let mut ranks: HashMap<NodeIndex, usize> = dag.node_indices().map(|n| (n, 0)).collect();

    let order = match toposort(dag, None) {
        Ok(order) => order,
        Err(cycle) => {
            tracing::warn!(
                "Graph has a cycle through node {}, using a flat layout",
                dag[cycle.node_id()]
            );
            return ranks;
        }
    };

    for node in order {
        let rank = ranks.get(&node).copied().unwrap_or(0);
        for next in dag.neighbors_directed(node, Direction::Outgoing) {
            let entry = ranks.entry(next).or_insert(0);
            *entry = (*entry).max(rank + 1);
        }
    }
    ranks
}

/// Group nodes by rank and order each rank by upstream barycenter
fn order_layers(
    dag: &DiGraph<usize, ()>,
    ranks: &HashMap<NodeIndex, usize>,
) -> Vec<Vec<NodeIndex>> {
    let max_rank = ranks.values().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<NodeIndex>> = vec![Vec::new(); max_rank + 1];
    // node_indices() follows insertion order, which seeds the ordering
    for node in dag.node_indices() {
        let rank = ranks.get(&node).copied().unwrap_or(0);
        layers[rank].push(node);
    }

    let mut slot: HashMap<NodeIndex, f64> = HashMap::new();
    for layer in layers.iter_mut() {
        let keyed: Vec<(NodeIndex, f64)> = layer
            .iter()
            .enumerate()
            .map(|(i, &node)| {
                let upstream: Vec<f64> = dag
                    .neighbors_directed(node, Direction::Incoming)
                    .filter_map(|n| slot.get(&n).copied())
                    .collect();
                let key = if upstream.is_empty() {
                    i as f64
                } else {
                    upstream.iter().sum::<f64>() / upstream.len() as f64
                };
                (node, key)
            })
            .collect();

        let mut sorted = keyed;
        sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
        *layer = sorted.into_iter().map(|(n, _)| n).collect();
        for (i, node) in layer.iter().enumerate() {
            slot.insert(*node, i as f64);
        }
    }
    layers
}

/// Top-left corner of every node, ranks centered on the widest one
fn place(layers: &[Vec<NodeIndex>], config: &LayoutConfig) -> Vec<(NodeIndex, Position)> {
    let max_rank = layers.len().saturating_sub(1);
    let widest = layers.iter().map(Vec::len).max().unwrap_or(0);

    let (rank_step, order_step) = if config.direction.is_horizontal() {
        (
            config.node_width + config.rank_sep,
            config.node_height + config.node_sep,
        )
    } else {
        (
            config.node_height + config.rank_sep,
            config.node_width + config.node_sep,
        )
    };

    let mut out = Vec::new();
    for (rank, layer) in layers.iter().enumerate() {
        let offset = (widest - layer.len()) as f64 * order_step / 2.0;
        for (order, &node) in layer.iter().enumerate() {
            let along = order as f64 * order_step + offset;
            let pos = match config.direction {
                LayoutDirection::RightToLeft => Position {
                    x: (max_rank - rank) as f64 * rank_step,
                    y: along,
                },
                LayoutDirection::LeftToRight => Position {
                    x: rank as f64 * rank_step,
                    y: along,
                },
                LayoutDirection::TopToBottom => Position {
                    x: along,
                    y: rank as f64 * rank_step,
                },
                LayoutDirection::BottomToTop => Position {
                    x: along,
                    y: (max_rank - rank) as f64 * rank_step,
                },
            };
            out.push((node, pos));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{K8sResource, NodeType};
    use serde_json::json;

    fn chain() -> GraphData {
        let mut graph = GraphData::new();
        let mut add = |name: &str, main: bool| {
            let res: K8sResource = serde_json::from_value(json!({
                "kind": "K",
                "apiVersion": "g/v1",
                "metadata": {"name": name}
            }))
            .unwrap();
            graph.add_node(NodeType::ManagedResource, &res, main).unwrap()
        };
        let claim = add("claim", true);
        let xr = add("xr", false);
        let mr = add("mr", false);
        graph.add_edge(&xr, &claim);
        graph.add_edge(&mr, &xr);
        graph
    }

    #[test]
    fn test_right_to_left_puts_focal_leftmost() {
        let mut graph = chain();
        let config = LayoutConfig::default();
        let bounds = layout(&mut graph, &config);

        let x = |name: &str| {
            graph
                .nodes
                .iter()
                .find(|n| n.data.name == name)
                .unwrap()
                .position
                .x
        };
        assert_eq!(x("claim"), 0.0);
        assert_eq!(x("xr"), 350.0);
        assert_eq!(x("mr"), 700.0);
        assert_eq!(bounds.width, 1000.0);
        assert_eq!(bounds.height, 50.0);
    }

    #[test]
    fn test_top_to_bottom() {
        let mut graph = chain();
        let config = LayoutConfig::default().with_direction(LayoutDirection::TopToBottom);
        layout(&mut graph, &config);
        let mr = graph.nodes.iter().find(|n| n.data.name == "mr").unwrap();
        assert_eq!(mr.position, Position { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_cycle_falls_back_to_single_rank() {
        let mut graph = chain();
        let (first, last) = (graph.nodes[0].id.clone(), graph.nodes[2].id.clone());
        graph.add_edge(&first, &last);
        layout(&mut graph, &LayoutConfig::default());
        assert!(graph.nodes.iter().all(|n| n.position.x == 0.0));
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("rl".parse::<LayoutDirection>(), Ok(LayoutDirection::RightToLeft));
        assert!("diagonal".parse::<LayoutDirection>().is_err());
        assert_eq!(LayoutDirection::default().to_string(), "RL");
    }
}
