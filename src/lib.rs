//! komoplane library
//!
//! Core functionality for the komoplane terminal dashboard: backend client,
//! resource models, relationship graph construction and layout. It can be
//! used both from the binary and as a library for testing.

pub mod api;
pub mod cli;
pub mod config;
pub mod graph;
pub mod models;
#[cfg(feature = "tui")]
pub mod tui;
pub mod util;

// Re-export commonly used types for convenience
pub use api::{ApiClient, ApiError, HttpApiClient};
pub use graph::{FocalResource, GraphData, HealthState, Route, build_graph, classify};
