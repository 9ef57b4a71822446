//! Graph builder tests
//!
//! Shapes of the claim, composite and managed views built from extended
//! payloads as the backend serves them.

use komoplane::graph::{
    FocalResource, GraphData, HealthState, build_claim_graph, build_composite_graph, build_graph,
    build_managed_graph,
};
use komoplane::models::{
    ClaimExtended, CompositeResourceExtended, ManagedResourceExtended, NodeType,
};
use serde_json::json;

fn claim_payload() -> ClaimExtended {
    serde_json::from_value(json!({
        "kind": "Database",
        "apiVersion": "example.com/v1",
        "metadata": {"name": "my-db", "namespace": "default"},
        "spec": {
            "compositionRef": {"name": "aws-database"},
            "resourceRef": {"kind": "XDatabase", "apiVersion": "example.com/v1", "name": "my-db-x7k2p"}
        },
        "status": {"conditions": [{"type": "Ready", "status": "True"}]},
        "composition": {
            "kind": "Composition",
            "apiVersion": "apiextensions.crossplane.io/v1",
            "metadata": {"name": "aws-database"}
        },
        "compositeResource": {
            "kind": "XDatabase",
            "apiVersion": "example.com/v1",
            "metadata": {"name": "my-db-x7k2p"},
            "status": {"conditions": [{"type": "Synced", "status": "False", "reason": "ReconcileError"}]}
        },
        "managedResources": [{
            "kind": "Instance",
            "apiVersion": "rds.aws.upbound.io/v1beta1",
            "metadata": {
                "name": "my-db-x7k2p-abcde",
                "annotations": {"crossplane.io/composition-resource-name": "rds-instance"}
            },
            "status": {"conditions": [{"type": "Ready", "status": "False", "reason": "Creating"}]}
        }]
    }))
    .unwrap()
}

/// `(source label, target label)` of every edge
fn edge_labels(graph: &GraphData) -> Vec<(String, String)> {
    graph
        .edges
        .iter()
        .map(|e| {
            let label = |id: &str| graph.node(id).unwrap().data.label.clone();
            (label(&e.source), label(&e.target))
        })
        .collect()
}

#[test]
fn test_claim_view() {
    let graph = build_claim_graph(&claim_payload());

    assert_eq!(graph.nodes.len(), 4);
    let types: Vec<NodeType> = graph.nodes.iter().map(|n| n.node_type).collect();
    assert_eq!(
        types,
        vec![
            NodeType::Claim,
            NodeType::Composition,
            NodeType::CompositeResource,
            NodeType::ManagedResource
        ]
    );

    let main = graph.main_node().unwrap();
    assert_eq!(main.data.label, "my-db");
    assert!(main.data.target.is_none());

    assert_eq!(
        edge_labels(&graph),
        vec![
            ("aws-database".to_string(), "my-db".to_string()),
            ("my-db-x7k2p".to_string(), "my-db".to_string()),
            ("rds-instance".to_string(), "my-db-x7k2p".to_string()),
        ]
    );
}

#[test]
fn test_claim_view_statuses_and_targets() {
    let graph = build_claim_graph(&claim_payload());

    let xr = &graph.nodes[2];
    assert_eq!(xr.data.status, HealthState::NotSynced);
    assert_eq!(xr.data.status_msg, "ReconcileError");
    assert_eq!(
        xr.data.target.as_deref(),
        Some("/composite/example.com/v1/XDatabase/my-db-x7k2p")
    );

    let mr = &graph.nodes[3];
    assert_eq!(mr.data.status, HealthState::NotReady);
    assert_eq!(
        mr.data.target.as_deref(),
        Some("/managed/rds.aws.upbound.io/v1beta1/Instance/my-db-x7k2p-abcde")
    );

    assert_eq!(
        graph.nodes[1].data.target.as_deref(),
        Some("/compositions/aws-database")
    );
}

#[test]
fn test_claim_without_composite_keeps_managed_unlinked() {
    let mut payload = claim_payload();
    payload.composite_resource = None;

    let graph = build_claim_graph(&payload);
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 1);
}

#[test]
fn test_unnamed_items_are_skipped() {
    let mut payload = claim_payload();
    payload.managed_resources.push(
        serde_json::from_value(json!({"kind": "Instance", "apiVersion": "rds.aws.upbound.io/v1beta1"}))
            .unwrap(),
    );

    let graph = build_claim_graph(&payload);
    assert_eq!(graph.nodes.len(), 4);
    assert_eq!(graph.edges.len(), 3);
}

fn network_payload(related: serde_json::Value) -> CompositeResourceExtended {
    serde_json::from_value(json!({
        "kind": "XNetwork",
        "apiVersion": "net.example.com/v1",
        "metadata": {"name": "net-abc"},
        "spec": {
            "claimRef": {"kind": "Network", "apiVersion": "net.example.com/v1", "name": "net", "namespace": "team-a"},
            "resourceRefs": [
                {"kind": "VPC", "apiVersion": "ec2.aws.upbound.io/v1beta1", "name": "vpc-1"},
                {"kind": "XSubnet", "apiVersion": "net.example.com/v1", "name": "subnet-xr"}
            ]
        },
        "composition": {
            "kind": "Composition",
            "apiVersion": "apiextensions.crossplane.io/v1",
            "metadata": {"name": "network"}
        },
        "managedResources": related,
        "managedResourcesXRs": [
            {"kind": "XSubnet", "apiVersion": "net.example.com/v1", "name": "subnet-xr"}
        ],
        "managedResourcesClaims": [
            {"kind": "Network", "apiVersion": "net.example.com/v1", "name": "net", "namespace": "team-a"}
        ]
    }))
    .unwrap()
}

#[test]
fn test_composite_view_with_nested_composite() {
    let xr = network_payload(json!([
        {"kind": "Network", "apiVersion": "net.example.com/v1",
         "metadata": {"name": "net", "namespace": "team-a"}},
        {"kind": "VPC", "apiVersion": "ec2.aws.upbound.io/v1beta1",
         "metadata": {"name": "vpc-1"}},
        {"kind": "XSubnet", "apiVersion": "net.example.com/v1",
         "metadata": {"name": "subnet-xr"},
         "spec": {"resourceRefs": [
            {"kind": "Subnet", "apiVersion": "ec2.aws.upbound.io/v1beta1", "name": "subnet-1"}
         ]}},
        {"kind": "Subnet", "apiVersion": "ec2.aws.upbound.io/v1beta1",
         "metadata": {"name": "subnet-1"}}
    ]));

    let graph = build_composite_graph(&xr);

    let by_label = |label: &str| {
        graph
            .nodes
            .iter()
            .find(|n| n.data.label == label)
            .unwrap()
            .node_type
    };
    assert_eq!(by_label("net-abc"), NodeType::CompositeResource);
    assert_eq!(by_label("net"), NodeType::Claim);
    assert_eq!(by_label("vpc-1"), NodeType::ManagedResource);
    assert_eq!(by_label("subnet-xr"), NodeType::CompositeResource);
    assert_eq!(by_label("subnet-1"), NodeType::ManagedResource);

    let edges = edge_labels(&graph);
    let has = |s: &str, t: &str| edges.contains(&(s.to_string(), t.to_string()));
    assert!(has("network", "net-abc"));
    assert!(has("net-abc", "net"));
    assert!(has("vpc-1", "net-abc"));
    assert!(has("subnet-xr", "net-abc"));
    assert!(has("subnet-1", "net-abc"));
    assert_eq!(edges.len(), 5);
}

#[test]
fn test_nested_composite_without_spec() {
    let xr = network_payload(json!([
        {"kind": "XSubnet", "apiVersion": "net.example.com/v1",
         "metadata": {"name": "subnet-xr"},
         "status": {"conditions": [{"type": "Ready", "status": "False", "reason": "Creating"}]}}
    ]));

    let graph = build_composite_graph(&xr);
    let subnet = graph
        .nodes
        .iter()
        .find(|n| n.data.label == "subnet-xr")
        .unwrap();
    assert_eq!(subnet.node_type, NodeType::CompositeResource);
    assert_eq!(
        subnet.data.target.as_deref(),
        Some("/composite/net.example.com/v1/XSubnet/subnet-xr")
    );
}

#[test]
fn test_claim_edges_point_from_composite() {
    let mut xr = network_payload(json!([
        {"kind": "Network", "apiVersion": "net.example.com/v1",
         "metadata": {"name": "net", "namespace": "team-a"}}
    ]));
    xr.claim = serde_json::from_value(json!({
        "kind": "Network",
        "apiVersion": "net.example.com/v1",
        "metadata": {"name": "net", "namespace": "team-a"}
    }))
    .unwrap();

    let graph = build_composite_graph(&xr);
    let claims: Vec<_> = graph
        .nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Claim)
        .collect();
    assert_eq!(claims.len(), 1);
    assert_eq!(
        edge_labels(&graph)
            .iter()
            .filter(|(_, target)| target == "net")
            .count(),
        1
    );
    assert!(!edge_labels(&graph).contains(&("net".to_string(), "net-abc".to_string())));
}

#[test]
fn test_composite_view_with_parent() {
    let xr: CompositeResourceExtended = serde_json::from_value(json!({
        "kind": "XSubnet",
        "apiVersion": "net.example.com/v1",
        "metadata": {"name": "subnet-xr"},
        "parentXR": {
            "kind": "XNetwork",
            "apiVersion": "net.example.com/v1",
            "metadata": {"name": "net-abc"}
        }
    }))
    .unwrap();

    let graph = build_composite_graph(&xr);
    assert_eq!(
        edge_labels(&graph),
        vec![("subnet-xr".to_string(), "net-abc".to_string())]
    );
}

#[test]
fn test_managed_view() {
    let mr: ManagedResourceExtended = serde_json::from_value(json!({
        "kind": "Bucket",
        "apiVersion": "s3.aws.upbound.io/v1beta1",
        "metadata": {"name": "logs"},
        "spec": {"providerConfigRef": {"name": "default"}},
        "composite": {
            "kind": "XStorage",
            "apiVersion": "example.com/v1",
            "metadata": {"name": "storage-1"}
        },
        "provConfig": {
            "kind": "ProviderConfig",
            "apiVersion": "aws.upbound.io/v1beta1",
            "metadata": {"name": "default"}
        }
    }))
    .unwrap();

    let graph = build_managed_graph(&mr);
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.nodes[2].node_type, NodeType::ProviderConfig);
    assert!(graph.nodes[2].data.target.is_none());
    assert_eq!(
        edge_labels(&graph),
        vec![
            ("logs".to_string(), "storage-1".to_string()),
            ("default".to_string(), "logs".to_string()),
        ]
    );
}

#[test]
fn test_build_graph_dispatches_on_payload() {
    let focal = FocalResource::Claim(Box::new(claim_payload()));
    assert_eq!(focal.node_type(), NodeType::Claim);
    assert_eq!(focal.name(), "my-db");
    assert_eq!(build_graph(&focal), build_claim_graph(&claim_payload()));
}
