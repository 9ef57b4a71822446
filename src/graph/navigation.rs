//! Navigation targets for graph nodes
//!
//! Nodes carry a detail-page path rather than a callback. `derive_url`
//! produces that path, `Route::parse` turns it back into a typed route the
//! terminal UI can fetch.

use crate::models::{NodeType, Resource, split_api_version};
use percent_encoding::percent_decode_str;
use std::fmt;
use url::Url;

/// Detail page path for a node, `None` when there is nowhere to go
///
/// Only the type-to-path mapping lives here; main and `NotFound` nodes are
/// filtered by the graph before calling it. Provider configs have no detail
/// page and yield `None` with a warning.
pub fn derive_url<S>(node_type: NodeType, resource: &Resource<S>) -> Option<String> {
    let route = Route::for_resource(node_type, resource)?;
    Some(route.to_path())
}

/// A detail page the UI can show
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Claim {
        group: String,
        version: String,
        kind: String,
        namespace: String,
        name: String,
    },
    Composition {
        name: String,
    },
    Composite {
        group: String,
        version: String,
        kind: String,
        name: String,
    },
    Managed {
        group: String,
        version: String,
        kind: String,
        namespace: Option<String>,
        name: String,
    },
}

impl Route {
    /// Route for `resource` shown as a `node_type` node
    pub fn for_resource<S>(node_type: NodeType, resource: &Resource<S>) -> Option<Self> {
        let name = resource.name()?.to_string();
        let (group, version) = split_api_version(&resource.api_version);
        let (group, version, kind) = (
            group.to_string(),
            version.to_string(),
            resource.kind.clone(),
        );

        match node_type {
            NodeType::Claim => Some(Route::Claim {
                group,
                version,
                kind,
                namespace: resource.namespace().unwrap_or_default().to_string(),
                name,
            }),
            NodeType::Composition => Some(Route::Composition { name }),
            NodeType::CompositeResource => Some(Route::Composite {
                group,
                version,
                kind,
                name,
            }),
            NodeType::ManagedResource => Some(Route::Managed {
                group,
                version,
                kind,
                namespace: resource.namespace().map(str::to_owned),
                name,
            }),
            other => {
                tracing::warn!("No detail page for node type {}", other);
                None
            }
        }
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Route::Claim {
                group,
                version,
                kind,
                namespace,
                name,
            } => vec![
                "claims",
                group.as_str(),
                version.as_str(),
                kind.as_str(),
                namespace.as_str(),
                name.as_str(),
            ],
            Route::Composition { name } => vec!["compositions", name.as_str()],
            Route::Composite {
                group,
                version,
                kind,
                name,
            } => vec![
                "composite",
                group.as_str(),
                version.as_str(),
                kind.as_str(),
                name.as_str(),
            ],
            Route::Managed {
                group,
                version,
                kind,
                namespace,
                name,
            } => {
                let mut segments =
                    vec!["managed", group.as_str(), version.as_str(), kind.as_str()];
                if let Some(ns) = namespace {
                    segments.push(ns.as_str());
                }
                segments.push(name.as_str());
                segments
            }
        }
    }

    /// UI path with every segment percent-encoded
    pub fn to_path(&self) -> String {
        encode_path(&self.segments())
    }

    /// Parse a UI path produced by [`Route::to_path`]
    pub fn parse(path: &str) -> Option<Self> {
        let url = Url::parse("http://komoplane.local").ok()?.join(path).ok()?;
        let segments: Vec<String> = url
            .path_segments()?
            .filter(|s| !s.is_empty())
            .map(decode_segment)
            .collect();
        let parts: Vec<&str> = segments.iter().map(String::as_str).collect();

        match parts.as_slice() {
            ["claims", group, version, kind, namespace, name] => Some(Route::Claim {
                group: group.to_string(),
                version: version.to_string(),
                kind: kind.to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            }),
            ["compositions", name] => Some(Route::Composition {
                name: name.to_string(),
            }),
            ["composite", group, version, kind, name] => Some(Route::Composite {
                group: group.to_string(),
                version: version.to_string(),
                kind: kind.to_string(),
                name: name.to_string(),
            }),
            ["managed", group, version, kind, name] => Some(Route::Managed {
                group: group.to_string(),
                version: version.to_string(),
                kind: kind.to_string(),
                namespace: None,
                name: name.to_string(),
            }),
            ["managed", group, version, kind, namespace, name] => Some(Route::Managed {
                group: group.to_string(),
                version: version.to_string(),
                kind: kind.to_string(),
                namespace: Some(namespace.to_string()),
                name: name.to_string(),
            }),
            _ => {
                tracing::debug!("Unrecognized route {}", path);
                None
            }
        }
    }

    /// Backend path serving the extended payload for this route
    ///
    /// Compositions have no single-item endpoint and yield `None`. Note the
    /// managed endpoint takes the namespace after the name.
    pub fn api_path(&self) -> Option<String> {
        let path = match self {
            Route::Claim {
                group,
                version,
                kind,
                namespace,
                name,
            } => encode_path(&[
                "api",
                "claims",
                group.as_str(),
                version.as_str(),
                kind.as_str(),
                namespace.as_str(),
                name.as_str(),
            ]),
            Route::Composite {
                group,
                version,
                kind,
                name,
            } => encode_path(&[
                "api",
                "composite",
                group.as_str(),
                version.as_str(),
                kind.as_str(),
                name.as_str(),
            ]),
            Route::Managed {
                group,
                version,
                kind,
                namespace,
                name,
            } => {
                let mut segments = vec![
                    "api",
                    "managed",
                    group.as_str(),
                    version.as_str(),
                    kind.as_str(),
                    name.as_str(),
                ];
                if let Some(ns) = namespace {
                    segments.push(ns.as_str());
                }
                encode_path(&segments)
            }
            Route::Composition { .. } => return None,
        };
        Some(format!("{}?full=1", path))
    }

    /// Node type of the focal resource on this page
    pub fn node_type(&self) -> NodeType {
        match self {
            Route::Claim { .. } => NodeType::Claim,
            Route::Composition { .. } => NodeType::Composition,
            Route::Composite { .. } => NodeType::CompositeResource,
            Route::Managed { .. } => NodeType::ManagedResource,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Route::Claim { name, .. }
            | Route::Composition { name }
            | Route::Composite { name, .. }
            | Route::Managed { name, .. } => name,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// Join `segments` into an absolute path, percent-encoding each one
pub(crate) fn encode_path(segments: &[&str]) -> String {
    // Base URL parsing cannot fail for this literal
    let Ok(mut url) = Url::parse("http://komoplane.local") else {
        return String::new();
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_string()
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}
