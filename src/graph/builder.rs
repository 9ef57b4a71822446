//! Graph assembly from extended resource payloads
//!
//! Each builder takes the backend's "full" payload for one focal resource
//! and lays out its local neighbourhood:
//!
//! - claim view: composition → claim, composite → claim, managed → composite
//! - composite view: composition → XR, XR → claim, XR → parent XR, every
//!   related composite or managed resource → XR, XR → related claim
//! - managed view: managed → composite, provider config → managed
//!
//! Related objects without a name are skipped, and an edge is only added
//! when both of its endpoints made it into the graph.

use super::data::GraphData;
use crate::models::{
    ClaimExtended, CompositeResourceExtended, ManagedResourceExtended, NodeType, ObjectRef,
    Resource, classify_related,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Extended payload of a focal resource, one variant per detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FocalResource {
    Claim(Box<ClaimExtended>),
    Composite(Box<CompositeResourceExtended>),
    Managed(Box<ManagedResourceExtended>),
}

impl FocalResource {
    pub fn node_type(&self) -> NodeType {
        match self {
            FocalResource::Claim(_) => NodeType::Claim,
            FocalResource::Composite(_) => NodeType::CompositeResource,
            FocalResource::Managed(_) => NodeType::ManagedResource,
        }
    }

    /// Display name of the focal resource
    pub fn name(&self) -> &str {
        let name = match self {
            FocalResource::Claim(c) => c.claim.name(),
            FocalResource::Composite(x) => x.composite.name(),
            FocalResource::Managed(m) => m.managed.name(),
        };
        name.unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        match self {
            FocalResource::Claim(c) => &c.claim.kind,
            FocalResource::Composite(x) => &x.composite.kind,
            FocalResource::Managed(m) => &m.managed.kind,
        }
    }
}

/// Build the graph matching the payload's kind
pub fn build_graph(focal: &FocalResource) -> GraphData {
    match focal {
        FocalResource::Claim(claim) => build_claim_graph(claim),
        FocalResource::Composite(xr) => build_composite_graph(xr),
        FocalResource::Managed(mr) => build_managed_graph(mr),
    }
}

/// Graph data plus identity indexes so a resource or relation appearing
/// twice in one payload is drawn once
struct Assembly {
    graph: GraphData,
    seen: HashMap<ObjectRef, String>,
    linked: HashSet<(String, String)>,
}

impl Assembly {
    fn new() -> Self {
        Self {
            graph: GraphData::new(),
            seen: HashMap::new(),
            linked: HashSet::new(),
        }
    }

    fn node<S>(
        &mut self,
        node_type: NodeType,
        resource: &Resource<S>,
        is_main: bool,
    ) -> Option<String> {
        let key = resource.to_ref();
        if let Some(id) = self.seen.get(&key) {
            return Some(id.clone());
        }
        let id = self.graph.add_node(node_type, resource, is_main)?;
        self.seen.insert(key, id.clone());
        Some(id)
    }

    fn edge(&mut self, source: Option<&str>, target: Option<&str>) {
        let (Some(source), Some(target)) = (source, target) else {
            return;
        };
        if source == target
            || !self
                .linked
                .insert((source.to_string(), target.to_string()))
        {
            return;
        }
        self.graph.add_edge(source, target);
    }

    fn finish(self) -> GraphData {
        self.graph
    }
}

/// Claim-rooted view
pub fn build_claim_graph(claim: &ClaimExtended) -> GraphData {
    let mut asm = Assembly::new();

    let Some(claim_id) = asm.node(NodeType::Claim, &claim.claim, true) else {
        tracing::warn!("Claim payload has no name, nothing to draw");
        return asm.finish();
    };

    if let Some(composition) = &claim.composition {
        let comp_id = asm.node(NodeType::Composition, composition, false);
        asm.edge(comp_id.as_deref(), Some(claim_id.as_str()));
    }

    let xr_id = claim
        .composite_resource
        .as_ref()
        .and_then(|xr| asm.node(NodeType::CompositeResource, xr, false));
    asm.edge(xr_id.as_deref(), Some(claim_id.as_str()));

    for mr in &claim.managed_resources {
        let mr_id = asm.node(NodeType::ManagedResource, mr, false);
        asm.edge(mr_id.as_deref(), xr_id.as_deref());
    }

    tracing::debug!(
        "Built claim graph with {} nodes and {} edges",
        asm.graph.nodes.len(),
        asm.graph.edges.len()
    );
    asm.finish()
}

/// Composite-resource-rooted view, with nested composites
pub fn build_composite_graph(xr: &CompositeResourceExtended) -> GraphData {
    let mut asm = Assembly::new();

    let Some(xr_id) = asm.node(NodeType::CompositeResource, &xr.composite, true) else {
        tracing::warn!("Composite payload has no name, nothing to draw");
        return asm.finish();
    };

    if let Some(composition) = &xr.composition {
        let comp_id = asm.node(NodeType::Composition, composition, false);
        asm.edge(comp_id.as_deref(), Some(xr_id.as_str()));
    }

    if let Some(claim) = &xr.claim {
        let claim_id = asm.node(NodeType::Claim, claim, false);
        asm.edge(Some(xr_id.as_str()), claim_id.as_deref());
    }

    if let Some(parent) = &xr.parent_xr {
        let parent_id = asm.node(NodeType::CompositeResource, parent, false);
        asm.edge(Some(xr_id.as_str()), parent_id.as_deref());
    }

    // Every related object hangs off the focal composite; claims point the
    // same way as the claim edge above
    for item in classify_related(xr) {
        let id = asm.node(item.node_type(), item.resource(), false);
        match item.node_type() {
            NodeType::Claim => asm.edge(Some(xr_id.as_str()), id.as_deref()),
            _ => asm.edge(id.as_deref(), Some(xr_id.as_str())),
        }
    }

    tracing::debug!(
        "Built composite graph with {} nodes and {} edges",
        asm.graph.nodes.len(),
        asm.graph.edges.len()
    );
    asm.finish()
}

/// Managed-resource-rooted view
pub fn build_managed_graph(mr: &ManagedResourceExtended) -> GraphData {
    let mut asm = Assembly::new();

    let Some(mr_id) = asm.node(NodeType::ManagedResource, &mr.managed, true) else {
        tracing::warn!("Managed resource payload has no name, nothing to draw");
        return asm.finish();
    };

    if let Some(xr) = &mr.composite {
        let xr_id = asm.node(NodeType::CompositeResource, xr, false);
        asm.edge(Some(mr_id.as_str()), xr_id.as_deref());
    }

    if let Some(pc) = &mr.prov_config {
        let pc_id = asm.node(NodeType::ProviderConfig, pc, false);
        asm.edge(pc_id.as_deref(), Some(mr_id.as_str()));
    }

    asm.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_duplicate_resource_maps_to_one_node() {
        let xr: CompositeResourceExtended = serde_json::from_value(json!({
            "kind": "XDatabase",
            "apiVersion": "example.com/v1",
            "metadata": {"name": "db-x"},
            "spec": {
                "claimRef": {"kind": "Database", "apiVersion": "example.com/v1", "name": "db", "namespace": "default"}
            },
            "claim": {"kind": "Database", "apiVersion": "example.com/v1",
                "metadata": {"name": "db", "namespace": "default"}},
            "managedResources": [
                {"kind": "Database", "apiVersion": "example.com/v1",
                 "metadata": {"name": "db", "namespace": "default"}}
            ]
        }))
        .unwrap();

        let graph = build_composite_graph(&xr);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_unnamed_focal_yields_empty_graph() {
        let mr = ManagedResourceExtended::default();
        assert!(build_managed_graph(&mr).is_empty());
    }

    #[test]
    fn test_focal_dispatch() {
        let focal = FocalResource::Managed(Box::new(
            serde_json::from_value(json!({
                "kind": "Bucket",
                "apiVersion": "s3.aws.upbound.io/v1beta1",
                "metadata": {"name": "b"}
            }))
            .unwrap(),
        ));
        assert_eq!(focal.node_type(), NodeType::ManagedResource);
        let graph = build_graph(&focal);
        assert_eq!(graph.main_node().map(|n| n.data.name.as_str()), Some("b"));
    }
}
