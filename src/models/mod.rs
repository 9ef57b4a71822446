//! Komoplane model layer
//!
//! Rust types for the JSON payloads served by the komoplane backend.
//!
//! Structure:
//! - `resource.rs` - the shared Kubernetes envelope (`Resource<S>`, conditions, references)
//! - `crossplane.rs` - per-kind specs and the extended "full" payloads
//! - `node_type.rs` - graph node type tags
//! - `related.rs` - tagged union of objects related to a composite resource

pub mod crossplane;
pub mod node_type;
pub mod related;
pub mod resource;

pub use crossplane::*;
pub use node_type::NodeType;
pub use related::{RelatedResource, classify_related};
pub use resource::{
    COMPOSITION_RESOURCE_NAME_ANNOTATION, Condition, ItemList, K8sResource, NameRef, ObjectRef,
    Resource, ResourceStatus, split_api_version,
};
