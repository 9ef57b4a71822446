//! Graph data tests
//!
//! Id assignment, edge styling and navigation targets of nodes.

use komoplane::graph::export::to_text;
use komoplane::graph::{EdgeColor, GraphData, HealthState};
use komoplane::models::{K8sResource, NodeType};
use serde_json::json;

fn resource(kind: &str, name: &str, conditions: serde_json::Value) -> K8sResource {
    serde_json::from_value(json!({
        "kind": kind,
        "apiVersion": "example.com/v1",
        "metadata": {"name": name, "namespace": "default"},
        "status": {"conditions": conditions}
    }))
    .unwrap()
}

#[test]
fn test_ids_shared_between_nodes_and_edges() {
    let mut graph = GraphData::new();
    let a = graph
        .add_node(NodeType::Claim, &resource("Database", "a", json!([])), true)
        .unwrap();
    let b = graph
        .add_node(NodeType::CompositeResource, &resource("XDatabase", "b", json!([])), false)
        .unwrap();
    let c = graph
        .add_node(NodeType::ManagedResource, &resource("Instance", "c", json!([])), false)
        .unwrap();
    let e1 = graph.add_edge(&b, &a).unwrap();
    let e2 = graph.add_edge(&c, &b).unwrap();

    assert_eq!([a.as_str(), b.as_str(), c.as_str()], ["1", "2", "3"]);
    assert_eq!([e1.as_str(), e2.as_str()], ["4", "5"]);
    for edge in &graph.edges {
        assert!(["1", "2", "3"].contains(&edge.source.as_str()));
        assert!(["1", "2", "3"].contains(&edge.target.as_str()));
    }
}

#[test]
fn test_unnamed_resource_consumes_no_id() {
    let mut graph = GraphData::new();
    let unnamed: K8sResource = serde_json::from_value(json!({"kind": "Instance"})).unwrap();
    assert!(graph.add_node(NodeType::ManagedResource, &unnamed, false).is_none());
    let id = graph
        .add_node(NodeType::ManagedResource, &resource("Instance", "c", json!([])), false)
        .unwrap();
    assert_eq!(id, "1");
}

#[test]
fn test_edge_to_unknown_node_is_rejected() {
    let mut graph = GraphData::new();
    let a = graph
        .add_node(NodeType::Claim, &resource("Database", "a", json!([])), true)
        .unwrap();
    assert!(graph.add_edge(&a, "42").is_none());
    assert!(graph.edges.is_empty());
}

#[test]
fn test_edge_style_follows_source_status() {
    let mut graph = GraphData::new();
    let target = graph
        .add_node(NodeType::Claim, &resource("Database", "t", json!([])), true)
        .unwrap();
    let not_synced = graph
        .add_node(
            NodeType::CompositeResource,
            &resource("XDatabase", "x", json!([{"type": "Synced", "status": "False"}])),
            false,
        )
        .unwrap();
    let not_found = graph
        .add_node(
            NodeType::ManagedResource,
            &resource("Instance", "m", json!([{"type": "Found", "status": "False"}])),
            false,
        )
        .unwrap();
    let healthy = graph
        .add_node(NodeType::Composition, &resource("Composition", "c", json!([])), false)
        .unwrap();

    let orange = graph.add_edge(&not_synced, &target).unwrap();
    let maroon = graph.add_edge(&not_found, &target).unwrap();
    let plain = graph.add_edge(&healthy, &target).unwrap();

    let color = |id: &str| graph.edges.iter().find(|e| e.id == id).unwrap().color();
    assert_eq!(color(&orange), Some(EdgeColor::Orange));
    assert_eq!(color(&maroon), Some(EdgeColor::Maroon));
    assert_eq!(color(&plain), None);

    let plain_edge = graph.edges.iter().find(|e| e.id == plain).unwrap();
    assert!(plain_edge.style.is_none());
    assert!(plain_edge.marker_start.color.is_none());
}

#[test]
fn test_main_and_not_found_nodes_do_not_navigate() {
    let mut graph = GraphData::new();
    let main = graph
        .add_node(NodeType::Claim, &resource("Database", "a", json!([])), true)
        .unwrap();
    let gone = graph
        .add_node(
            NodeType::ManagedResource,
            &resource("Instance", "m", json!([{"type": "Found", "status": "False"}])),
            false,
        )
        .unwrap();

    for id in [main, gone] {
        let node = graph.node(&id).unwrap();
        assert!(node.data.target.is_none());
        let mut called = false;
        assert!(!node.click(|_| called = true));
        assert!(!called);
    }
    assert_eq!(
        graph.nodes[1].data.status,
        HealthState::NotFound
    );
}

#[test]
fn test_label_prefers_composition_resource_name() {
    let mut graph = GraphData::new();
    let res: K8sResource = serde_json::from_value(json!({
        "kind": "Instance",
        "apiVersion": "rds.aws.upbound.io/v1beta1",
        "metadata": {
            "name": "my-db-x7k2p-abcde",
            "annotations": {"crossplane.io/composition-resource-name": "rds-instance"}
        }
    }))
    .unwrap();
    let id = graph.add_node(NodeType::ManagedResource, &res, false).unwrap();
    let node = graph.node(&id).unwrap();
    assert_eq!(node.data.label, "rds-instance");
    assert_eq!(node.data.name, "my-db-x7k2p-abcde");
    assert_eq!(node.data.composition_name.as_deref(), Some("rds-instance"));
}

#[test]
fn test_json_shape() {
    let mut graph = GraphData::new();
    let a = graph
        .add_node(NodeType::Claim, &resource("Database", "a", json!([])), true)
        .unwrap();
    let b = graph
        .add_node(
            NodeType::CompositeResource,
            &resource("XDatabase", "b", json!([{"type": "Ready", "status": "False"}])),
            false,
        )
        .unwrap();
    graph.add_edge(&b, &a);

    let value = serde_json::to_value(&graph).unwrap();
    assert_eq!(value["nodes"][1]["type"], "composed");
    assert_eq!(value["nodes"][1]["data"]["statusMsg"], "");
    assert_eq!(value["nodes"][1]["data"]["status"], "NotReady");
    assert_eq!(value["edges"][0]["style"]["stroke"], "red");
    assert_eq!(value["edges"][0]["markerStart"]["type"], "arrowclosed");
    assert!(value.get("counter").is_none());
}

#[test]
fn test_text_export() {
    let mut graph = GraphData::new();
    let a = graph
        .add_node(NodeType::Claim, &resource("Database", "my-db", json!([])), true)
        .unwrap();
    let b = graph
        .add_node(
            NodeType::CompositeResource,
            &resource(
                "XDatabase",
                "my-db-x",
                json!([{"type": "Synced", "status": "False", "reason": "ReconcileError"}]),
            ),
            false,
        )
        .unwrap();
    graph.add_edge(&b, &a);

    insta::assert_snapshot!(to_text(&graph));
}
