//! Crossplane resource kinds and the backend's extended payloads

use super::resource::{K8sResource, NameRef, ObjectRef, Resource, null_as_empty};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_ref: Option<NameRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_ref: Option<ObjectRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompositeResourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_ref: Option<NameRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_refs: Vec<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_ref: Option<ObjectRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ManagedResourceSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config_ref: Option<NameRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<String>,
}

/// Composite type a composition produces
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSpec {
    #[serde(default)]
    pub composite_type_ref: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pipeline: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSpec {
    #[serde(default)]
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_config_ref: Option<NameRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct XrdNames {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub plural: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct XrdVersion {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub served: bool,
    #[serde(default)]
    pub referenceable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct XrdSpec {
    #[serde(default)]
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_names: Option<XrdNames>,
    #[serde(default)]
    pub names: XrdNames,
    #[serde(default)]
    pub versions: Vec<XrdVersion>,
}

pub type Claim = Resource<ClaimSpec>;
pub type CompositeResource = Resource<CompositeResourceSpec>;
pub type ManagedResource = Resource<ManagedResourceSpec>;
pub type Composition = Resource<CompositionSpec>;
pub type Provider = Resource<ProviderSpec>;
pub type ProviderConfig = K8sResource;
pub type Xrd = Resource<XrdSpec>;

/// Claim with its resolved relations (`/api/claims/...?full=1`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClaimExtended {
    #[serde(flatten)]
    pub claim: Claim,
    #[serde(default)]
    pub managed_resources: Vec<ManagedResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_resource: Option<CompositeResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<Composition>,
}

/// Composite resource with its resolved relations (`/api/composite/...?full=1`)
///
/// `managed_resources` holds every resolved composed object; for nested
/// compositions that includes child composite resources, so the spec is
/// kept untyped. The backend lists which of those objects are composite
/// resources and which are claims in `managedResourcesXRs` and
/// `managedResourcesClaims`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompositeResourceExtended {
    #[serde(flatten)]
    pub composite: CompositeResource,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub managed_resources: Vec<K8sResource>,
    #[serde(
        default,
        rename = "managedResourcesXRs",
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub managed_resources_xrs: Vec<ObjectRef>,
    #[serde(
        default,
        rename = "managedResourcesClaims",
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub managed_resources_claims: Vec<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<Composition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim: Option<Claim>,
    #[serde(default, rename = "parentXR", skip_serializing_if = "Option::is_none")]
    pub parent_xr: Option<CompositeResource>,
}

/// Managed resource with its resolved relations (`/api/managed/...?full=1`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ManagedResourceExtended {
    #[serde(flatten)]
    pub managed: ManagedResource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite: Option<CompositeResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prov_config: Option<ProviderConfig>,
}

/// Kubernetes event as relayed by `/api/events/...`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct K8sEvent {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_timestamp: Option<String>,
}

/// Backend status (`/status`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct AppStatus {
    #[serde(default)]
    pub cur_ver: String,
    #[serde(default)]
    pub latest_ver: String,
    #[serde(default)]
    pub analytics: bool,
    #[serde(default)]
    pub crossplane_installed: bool,
    #[serde(default)]
    pub cluster_mode: bool,
}

impl AppStatus {
    /// Whether the backend reports a release newer than the running one
    pub fn upgrade_available(&self) -> bool {
        match (parse_version(&self.cur_ver), parse_version(&self.latest_ver)) {
            (Some(current), Some(latest)) => current < latest,
            // Unparsable current version counts as the oldest possible
            (None, Some(_)) => true,
            _ => false,
        }
    }
}

/// Parse `v1.2.3`/`1.2.3-rc1` into comparable numeric parts
fn parse_version(raw: &str) -> Option<Vec<u64>> {
    let trimmed = raw.trim().trim_start_matches('v');
    let core = trimmed.split(['-', '+']).next()?;
    if core.is_empty() {
        return None;
    }
    core.split('.').map(|p| p.parse().ok()).collect()
}
