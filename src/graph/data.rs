//! Graph data structures for resource relationships
//!
//! A `GraphData` is built fresh for every focal resource. Nodes and edges
//! draw their ids from one per-instance counter, so ids are unique within a
//! build and strictly increasing in insertion order.

use super::navigation;
use super::status::{self, HealthState};
use crate::models::{NodeType, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-left position of a node box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Display payload of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Composition-assigned name when present, otherwise `metadata.name`
    pub label: String,
    /// Always the object's `metadata.name`
    pub name: String,
    pub kind: String,
    pub api_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub status: HealthState,
    pub status_msg: String,
    pub main: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_name: Option<String>,
    /// Navigation target, `None` for the main node and for absent resources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// A node in the relationship graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub data: NodeData,
    pub position: Position,
}

impl GraphNode {
    /// Invoke `navigate` with this node's target, if it has one
    ///
    /// Returns whether navigation happened.
    pub fn click(&self, navigate: impl FnOnce(&str)) -> bool {
        match &self.data.target {
            Some(url) => {
                navigate(url);
                true
            }
            None => false,
        }
    }
}

/// Warning colors used for edges leaving unhealthy nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColor {
    Maroon,
    Red,
    Orange,
}

impl EdgeColor {
    /// Color for edges sourced from a node in `state`; `None` when healthy
    pub fn for_state(state: HealthState) -> Option<Self> {
        match state {
            HealthState::NotFound => Some(EdgeColor::Maroon),
            HealthState::NotReady | HealthState::Unhealthy => Some(EdgeColor::Red),
            HealthState::NotSynced => Some(EdgeColor::Orange),
            HealthState::Ok => None,
        }
    }

    /// CSS color name
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeColor::Maroon => "maroon",
            EdgeColor::Red => "red",
            EdgeColor::Orange => "orange",
        }
    }

    /// RGB components of the CSS color
    pub fn rgb(&self) -> (u8, u8, u8) {
        match csscolorparser::parse(self.as_str()) {
            Ok(color) => {
                let [r, g, b, _] = color.to_rgba8();
                (r, g, b)
            }
            Err(e) => {
                tracing::warn!("Failed to parse edge color {}: {}", self.as_str(), e);
                (255, 0, 0)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub stroke: EdgeColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerType {
    #[default]
    #[serde(rename = "arrowclosed")]
    ArrowClosed,
}

/// Arrow marker drawn at the start of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(rename = "type")]
    pub marker_type: MarkerType,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EdgeColor>,
}

impl Marker {
    fn closed(color: Option<EdgeColor>) -> Self {
        Self {
            marker_type: MarkerType::ArrowClosed,
            width: 20,
            height: 20,
            color,
        }
    }
}

/// A directed edge between two nodes of the same graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EdgeStyle>,
    pub marker_start: Marker,
}

impl GraphEdge {
    pub fn color(&self) -> Option<EdgeColor> {
        self.style.map(|s| s.stroke)
    }
}

/// Nodes and edges of one graph build
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphData {
    #[serde(skip)]
    counter: u64,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    #[serde(skip)]
    node_index: HashMap<String, usize>,
}

impl GraphData {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> String {
        self.counter += 1;
        self.counter.to_string()
    }

    /// Add a node for `resource`
    ///
    /// The node's health comes from the status classifier and its navigation
    /// target from [`navigation::derive_url`]. Returns the new node id, or
    /// `None` without consuming an id when the resource has no name.
    pub fn add_node<S>(
        &mut self,
        node_type: NodeType,
        resource: &Resource<S>,
        is_main: bool,
    ) -> Option<String> {
        let Some(name) = resource.name() else {
            tracing::debug!(
                "Skipping {} node for {} without a name",
                node_type,
                resource.kind
            );
            return None;
        };

        let (status, status_msg) = status::classify(Some(resource));
        let composition_name = resource.composition_resource_name().map(str::to_owned);
        let target = if is_main || status == HealthState::NotFound {
            None
        } else {
            navigation::derive_url(node_type, resource)
        };

        let id = self.next_id();
        let node = GraphNode {
            id: id.clone(),
            node_type,
            data: NodeData {
                label: composition_name.clone().unwrap_or_else(|| name.to_string()),
                name: name.to_string(),
                kind: resource.kind.clone(),
                api_version: resource.api_version.clone(),
                namespace: resource.namespace().map(str::to_owned),
                status,
                status_msg,
                main: is_main,
                composition_name,
                target,
            },
            position: Position::default(),
        };

        self.node_index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        Some(id)
    }

    /// Add an edge from `source` to `target`
    ///
    /// The edge is styled after the source node's health. Returns `None`
    /// when either endpoint is not a node of this graph.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Option<String> {
        let Some(source_status) = self.node(source).map(|n| n.data.status) else {
            tracing::warn!("Edge source {} is not in the graph", source);
            return None;
        };
        if self.node(target).is_none() {
            tracing::warn!("Edge target {} is not in the graph", target);
            return None;
        }

        let color = EdgeColor::for_state(source_status);
        let id = self.next_id();
        self.edges.push(GraphEdge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            style: color.map(|stroke| EdgeStyle { stroke }),
            marker_start: Marker::closed(color),
        });
        Some(id)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).and_then(|&i| self.nodes.get(i))
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        match self.node_index.get(id) {
            Some(&i) => self.nodes.get_mut(i),
            None => None,
        }
    }

    /// The focal node, if one was added
    pub fn main_node(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.data.main)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges ending at `id`
    pub fn incoming(&self, id: &str) -> impl Iterator<Item = &GraphEdge> {
        let id = id.to_string();
        self.edges.iter().filter(move |e| e.target == id)
    }

    /// Edges starting at `id`
    pub fn outgoing(&self, id: &str) -> impl Iterator<Item = &GraphEdge> {
        let id = id.to_string();
        self.edges.iter().filter(move |e| e.source == id)
    }
}
