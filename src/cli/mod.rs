//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod config;
mod logging;
pub mod output;
mod resources;
mod version;

pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::*;
pub use resources::{
    GraphTarget, ListKind, SummaryLine, collect_summary, print_events, print_list, print_provider,
    print_status, print_summary, render_graph, render_summary,
};
pub use version::display_version;
