//! Text, JSON and Graphviz renderings of a graph

use super::data::{GraphData, GraphNode};
use super::layout::LayoutDirection;
use super::status::HealthState;
use anyhow::{Context, Result};
use std::fmt::Write;

/// Output format for `komoplane graph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Dot,
}

pub fn render(
    graph: &GraphData,
    format: OutputFormat,
    direction: LayoutDirection,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(to_text(graph)),
        OutputFormat::Json => to_json(graph),
        OutputFormat::Dot => Ok(to_dot(graph, direction)),
    }
}

fn status_cell(node: &GraphNode) -> String {
    if node.data.status_msg.is_empty() {
        node.data.status.to_string()
    } else {
        format!("{}: {}", node.data.status, node.data.status_msg)
    }
}

/// Plain listing of nodes then edges
pub fn to_text(graph: &GraphData) -> String {
    let mut out = String::new();
    if graph.is_empty() {
        out.push_str("No resources to show\n");
        return out;
    }

    let label_width = graph
        .nodes
        .iter()
        .map(|n| n.data.label.len())
        .max()
        .unwrap_or(0)
        .max(5);

    let _ = writeln!(out, "NODES");
    for node in &graph.nodes {
        let marker = if node.data.main { "*" } else { " " };
        let _ = write!(
            out,
            "{} {:>3}  {:<18} {:<width$}  {}",
            marker,
            node.id,
            node.node_type.display_name(),
            node.data.label,
            status_cell(node),
            width = label_width
        );
        if let Some(target) = &node.data.target {
            let _ = write!(out, "  -> {}", target);
        }
        out.push('\n');
    }

    if !graph.edges.is_empty() {
        let _ = writeln!(out, "EDGES");
        for edge in &graph.edges {
            let _ = write!(out, "  {:>3} -> {}", edge.source, edge.target);
            if let Some(color) = edge.color() {
                let _ = write!(out, "  ({})", color.as_str());
            }
            out.push('\n');
        }
    }
    out
}

pub fn to_json(graph: &GraphData) -> Result<String> {
    serde_json::to_string_pretty(graph).context("Failed to serialize graph")
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn node_color(status: HealthState) -> &'static str {
    match status {
        HealthState::Ok => "darkgreen",
        HealthState::NotReady | HealthState::Unhealthy => "red",
        HealthState::NotSynced => "orange",
        HealthState::NotFound => "maroon",
    }
}

/// Graphviz digraph with status colors
pub fn to_dot(graph: &GraphData, direction: LayoutDirection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph komoplane {{");
    let _ = writeln!(out, "  rankdir={};", direction.as_str());
    let _ = writeln!(out, "  node [shape=box, style=rounded];");

    for node in &graph.nodes {
        let label = format!(
            "{}\\n{} ({})",
            dot_escape(&node.data.label),
            node.node_type.display_name(),
            node.data.kind
        );
        let penwidth = if node.data.main { 2 } else { 1 };
        let _ = writeln!(
            out,
            "  \"{}\" [label=\"{}\", color={}, penwidth={}];",
            node.id,
            label,
            node_color(node.data.status),
            penwidth
        );
    }

    for edge in &graph.edges {
        match edge.color() {
            Some(color) => {
                let _ = writeln!(
                    out,
                    "  \"{}\" -> \"{}\" [color={}, dir=back];",
                    edge.source,
                    edge.target,
                    color.as_str()
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "  \"{}\" -> \"{}\" [dir=back];",
                    edge.source, edge.target
                );
            }
        }
    }

    out.push_str("}\n");
    out
}
