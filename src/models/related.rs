//! Classification of objects related to a composite resource
//!
//! A composite resource's "full" payload carries a flat list of resolved
//! objects. Which graph node each one becomes is decided by matching it
//! against the references the backend resolved, not by inspecting the
//! object itself.

use super::crossplane::CompositeResourceExtended;
use super::node_type::NodeType;
use super::resource::K8sResource;

/// A related object tagged with the role it plays around a composite
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelatedResource<'a> {
    Claim(&'a K8sResource),
    CompositeResource(&'a K8sResource),
    ManagedResource(&'a K8sResource),
}

impl<'a> RelatedResource<'a> {
    pub fn node_type(&self) -> NodeType {
        match self {
            RelatedResource::Claim(_) => NodeType::Claim,
            RelatedResource::CompositeResource(_) => NodeType::CompositeResource,
            RelatedResource::ManagedResource(_) => NodeType::ManagedResource,
        }
    }

    pub fn resource(&self) -> &'a K8sResource {
        match self {
            RelatedResource::Claim(resource)
            | RelatedResource::CompositeResource(resource)
            | RelatedResource::ManagedResource(resource) => resource,
        }
    }
}

/// Tag every related object of `xr`
///
/// Rules, in order:
/// 1. `(kind, apiVersion, name)` match on `managedResourcesXRs` → composite resource
/// 2. `(kind, apiVersion, name, namespace)` match on `managedResourcesClaims`,
///    or on the composite's own `claimRef` → claim
/// 3. anything else → managed resource
///
/// Objects without a name are dropped.
pub fn classify_related(xr: &CompositeResourceExtended) -> Vec<RelatedResource<'_>> {
    let claim_ref = xr.composite.spec.claim_ref.as_ref();

    xr.managed_resources
        .iter()
        .filter_map(|res| {
            if res.name().is_none() {
                tracing::debug!("Skipping related {} without a name", res.kind);
                return None;
            }

            let tagged = if xr.managed_resources_xrs.iter().any(|r| res.matches_ref(r)) {
                RelatedResource::CompositeResource(res)
            } else if xr
                .managed_resources_claims
                .iter()
                .chain(claim_ref)
                .any(|r| res.matches_namespaced_ref(r))
            {
                RelatedResource::Claim(res)
            } else {
                RelatedResource::ManagedResource(res)
            };
            Some(tagged)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn network(related: serde_json::Value) -> CompositeResourceExtended {
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
            "managedResources": related,
            "managedResourcesXRs": [
                {"kind": "XSubnet", "apiVersion": "net.example.com/v1", "name": "subnet-xr"}
            ],
            "managedResourcesClaims": []
        }))
        .unwrap()
    }

    #[test]
    fn test_classification_by_reference() {
        let xr = network(json!([
            {"kind": "Network", "apiVersion": "net.example.com/v1",
             "metadata": {"name": "net", "namespace": "team-a"}},
            {"kind": "VPC", "apiVersion": "ec2.aws.upbound.io/v1beta1",
             "metadata": {"name": "vpc-1"}},
            {"kind": "XSubnet", "apiVersion": "net.example.com/v1",
             "metadata": {"name": "subnet-xr"}}
        ]));
        let tagged = classify_related(&xr);

        let types: Vec<NodeType> = tagged.iter().map(|t| t.node_type()).collect();
        assert_eq!(
            types,
            vec![
                NodeType::Claim,
                NodeType::ManagedResource,
                NodeType::CompositeResource
            ]
        );
    }

    #[test]
    fn test_object_fields_do_not_decide_type() {
        // Carries its own resourceRefs but the backend did not list it as an XR
        let xr = network(json!([
            {"kind": "XFirewall", "apiVersion": "net.example.com/v1",
             "metadata": {"name": "fw"},
             "spec": {"resourceRefs": [{"kind": "Rule", "apiVersion": "v1", "name": "r"}]}}
        ]));
        assert_eq!(
            classify_related(&xr)[0].node_type(),
            NodeType::ManagedResource
        );
    }

    #[test]
    fn test_claim_list_match() {
        let mut xr = network(json!([
            {"kind": "Database", "apiVersion": "example.com/v1",
             "metadata": {"name": "db", "namespace": "team-b"}}
        ]));
        xr.managed_resources_claims = vec![serde_json::from_value(json!(
            {"kind": "Database", "apiVersion": "example.com/v1", "name": "db", "namespace": "team-b"}
        ))
        .unwrap()];
        assert_eq!(classify_related(&xr)[0].node_type(), NodeType::Claim);
    }

    #[test]
    fn test_claim_match_requires_namespace() {
        let xr = network(json!([
            {"kind": "Network", "apiVersion": "net.example.com/v1",
             "metadata": {"name": "net", "namespace": "team-b"}}
        ]));
        assert_eq!(
            classify_related(&xr)[0].node_type(),
            NodeType::ManagedResource
        );
    }

    #[test]
    fn test_null_reference_lists() {
        let xr: CompositeResourceExtended = serde_json::from_value(json!({
            "kind": "XNetwork",
            "metadata": {"name": "net-abc"},
            "managedResources": null,
            "managedResourcesXRs": null,
            "managedResourcesClaims": null
        }))
        .unwrap();
        assert!(classify_related(&xr).is_empty());
    }

    #[test]
    fn test_unnamed_objects_are_dropped() {
        let xr = network(json!([
            {"kind": "VPC", "apiVersion": "ec2.aws.upbound.io/v1beta1", "metadata": {}}
        ]));
        assert!(classify_related(&xr).is_empty());
    }
}
