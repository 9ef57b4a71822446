//! Graph node kinds
//!
//! Centralizes the node type tags used by the relationship graph so the
//! builder, navigation rule and renderers match on one enum instead of
//! string literals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of node in a relationship graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "claim")]
    Claim,
    #[serde(rename = "composition")]
    Composition,
    #[serde(rename = "composed")]
    CompositeResource,
    #[serde(rename = "managed")]
    ManagedResource,
    #[serde(rename = "provConfig")]
    ProviderConfig,
}

impl NodeType {
    /// Wire tag of the node type
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Claim => "claim",
            NodeType::Composition => "composition",
            NodeType::CompositeResource => "composed",
            NodeType::ManagedResource => "managed",
            NodeType::ProviderConfig => "provConfig",
        }
    }

    /// Human-readable caption shown above a node's label
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeType::Claim => "Claim",
            NodeType::Composition => "Composition",
            NodeType::CompositeResource => "Composite Resource",
            NodeType::ManagedResource => "Managed Resource",
            NodeType::ProviderConfig => "Provider Config",
        }
    }

    /// Try to parse a string into a NodeType, returning None if invalid
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    pub fn all() -> &'static [Self] {
        &[
            NodeType::Claim,
            NodeType::Composition,
            NodeType::CompositeResource,
            NodeType::ManagedResource,
            NodeType::ProviderConfig,
        ]
    }

    /// Try to parse a user-typed alias (case-insensitive)
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "claim" | "claims" => Some(NodeType::Claim),
            "composition" | "compositions" => Some(NodeType::Composition),
            "composed" | "composite" | "xr" | "compositeresource" => {
                Some(NodeType::CompositeResource)
            }
            "managed" | "mr" | "managedresource" => Some(NodeType::ManagedResource),
            "provconfig" | "providerconfig" | "pc" => Some(NodeType::ProviderConfig),
            _ => None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claim" => Ok(NodeType::Claim),
            "composition" => Ok(NodeType::Composition),
            "composed" => Ok(NodeType::CompositeResource),
            "managed" => Ok(NodeType::ManagedResource),
            "provConfig" => Ok(NodeType::ProviderConfig),
            _ => Err(format!("Unknown node type: {}", s)),
        }
    }
}
