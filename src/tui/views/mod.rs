//! View rendering for the graph viewer

mod detail;
mod footer;
mod graph;
mod header;

pub use detail::render_detail;
pub use footer::{KEY_HINTS, render_footer};
pub use graph::{GraphViewState, render_graph};
pub use header::render_header;
