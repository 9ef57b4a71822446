//! Base resource shape shared by every Crossplane object
//!
//! All payloads returned by the komoplane backend share the Kubernetes
//! envelope: `kind`, `apiVersion`, `metadata`, a kind-specific `spec` and an
//! optional `status.conditions` list. `Resource<S>` captures that envelope
//! once and is specialised per kind through the `S` parameter.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

/// Annotation holding the name a composition assigned to a composed resource
pub const COMPOSITION_RESOURCE_NAME_ANNOTATION: &str = "crossplane.io/composition-resource-name";

/// A Kubernetes-style resource with a typed spec
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
#[serde(bound(
    serialize = "S: Serialize",
    deserialize = "S: Deserialize<'de> + Default"
))]
pub struct Resource<S = serde_json::Value> {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResourceStatus>,
}

/// Resource with an untyped spec
pub type K8sResource = Resource<serde_json::Value>;

/// Status block carrying the condition list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

/// Kubernetes-style status condition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: String,
    /// "True", "False" or "Unknown"
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Condition {
    /// A condition is satisfied only when its status is exactly "True"
    pub fn is_satisfied(&self) -> bool {
        self.status == "True"
    }
}

/// Reference to another object by identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Reference to a cluster-scoped object by name only
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NameRef {
    #[serde(default)]
    pub name: String,
}

/// List envelope returned by every collection endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ItemList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for ItemList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<S> Resource<S> {
    /// Resource name, `None` when missing or empty
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Resource namespace, `None` for cluster-scoped objects
    pub fn namespace(&self) -> Option<&str> {
        self.metadata.namespace.as_deref().filter(|n| !n.is_empty())
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.metadata
            .annotations
            .as_ref()
            .and_then(|a| a.get(key))
            .map(String::as_str)
    }

    /// Name assigned by the owning composition, if any
    pub fn composition_resource_name(&self) -> Option<&str> {
        self.annotation(COMPOSITION_RESOURCE_NAME_ANNOTATION)
            .filter(|n| !n.is_empty())
    }

    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_deref())
            .unwrap_or(&[])
    }

    /// Find a condition by its type
    pub fn condition(&self, type_: &str) -> Option<&Condition> {
        self.conditions().iter().find(|c| c.type_ == type_)
    }

    /// Split `apiVersion` into `(group, version)`
    ///
    /// The split happens on the first `/`. Core-group versions like `v1`
    /// have no separator and yield an empty version.
    pub fn group_version(&self) -> (&str, &str) {
        split_api_version(&self.api_version)
    }

    /// Creation time as an RFC 3339 string
    pub fn creation_timestamp(&self) -> Option<String> {
        self.metadata
            .creation_timestamp
            .as_ref()
            .and_then(|t| serde_json::to_value(t).ok())
            .and_then(|v| v.as_str().map(str::to_owned))
    }

    /// Exact identity match on `(kind, apiVersion, name)`
    pub fn matches_ref(&self, reference: &ObjectRef) -> bool {
        self.kind == reference.kind
            && self.api_version == reference.api_version
            && self.name() == Some(reference.name.as_str())
    }

    /// Identity match that also requires the namespace to agree
    pub fn matches_namespaced_ref(&self, reference: &ObjectRef) -> bool {
        self.matches_ref(reference) && self.namespace() == reference.namespace.as_deref()
    }

    /// Reference pointing back at this resource
    pub fn to_ref(&self) -> ObjectRef {
        ObjectRef {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
            name: self.metadata.name.clone().unwrap_or_default(),
            namespace: self.metadata.namespace.clone(),
        }
    }
}

/// Deserialize a list the backend may send as `null`
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Split an `apiVersion` string into `(group, version)`
pub fn split_api_version(api_version: &str) -> (&str, &str) {
    match api_version.split_once('/') {
        Some((group, version)) => (group, version),
        None => (api_version, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> K8sResource {
        serde_json::from_value(serde_json::json!({
            "kind": "Bucket",
            "apiVersion": "s3.aws.upbound.io/v1beta1",
            "metadata": {
                "name": "bucket-x1",
                "annotations": {"crossplane.io/composition-resource-name": "storage"}
            },
            "status": {"conditions": [
                {"type": "Ready", "status": "True", "reason": "Available",
                 "lastTransitionTime": "2024-01-01T00:00:00Z"}
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn test_group_version_split() {
        assert_eq!(
            split_api_version("example.com/v1"),
            ("example.com", "v1")
        );
        assert_eq!(split_api_version("v1"), ("v1", ""));
    }

    #[test]
    fn test_accessors() {
        let res = sample();
        assert_eq!(res.name(), Some("bucket-x1"));
        assert_eq!(res.namespace(), None);
        assert_eq!(res.composition_resource_name(), Some("storage"));
        assert_eq!(res.conditions().len(), 1);
        assert!(res.condition("Ready").unwrap().is_satisfied());
        assert!(res.condition("Synced").is_none());
    }

    #[test]
    fn test_empty_name_is_missing() {
        let mut res = sample();
        res.metadata.name = Some(String::new());
        assert_eq!(res.name(), None);
    }

    #[test]
    fn test_matches_ref() {
        let res = sample();
        let reference = ObjectRef {
            api_version: "s3.aws.upbound.io/v1beta1".to_string(),
            kind: "Bucket".to_string(),
            name: "bucket-x1".to_string(),
            namespace: None,
        };
        assert!(res.matches_ref(&reference));
        assert!(res.matches_namespaced_ref(&reference));

        let other_ns = ObjectRef {
            namespace: Some("default".to_string()),
            ..reference.clone()
        };
        assert!(res.matches_ref(&other_ns));
        assert!(!res.matches_namespaced_ref(&other_ns));
    }

    #[test]
    fn test_missing_fields_default() {
        let res: K8sResource = serde_json::from_str("{}").unwrap();
        assert_eq!(res.kind, "");
        assert_eq!(res.name(), None);
        assert!(res.conditions().is_empty());
    }
}
