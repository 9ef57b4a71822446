//! Relationship graph of Crossplane resources
//!
//! - `status.rs` - health classification from conditions
//! - `data.rs` - nodes, edges and their styling
//! - `navigation.rs` - node click targets and routes
//! - `builder.rs` - graph assembly per focal resource kind
//! - `layout.rs` - layered positions
//! - `export.rs` - text, JSON and DOT output

pub mod builder;
pub mod data;
pub mod export;
pub mod layout;
pub mod navigation;
pub mod status;

pub use builder::{
    FocalResource, build_claim_graph, build_composite_graph, build_graph, build_managed_graph,
};
pub use data::{EdgeColor, EdgeStyle, GraphData, GraphEdge, GraphNode, Marker, NodeData, Position};
pub use export::OutputFormat;
pub use layout::{LayoutBounds, LayoutConfig, LayoutDirection, layout};
pub use navigation::{Route, derive_url};
pub use status::{HealthState, classify};
