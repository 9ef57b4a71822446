//! Theme and styling definitions
//!
//! Centralizes every color the graph viewer draws with. Status colors for
//! unhealthy nodes come from the same palette as the edge styling so a node
//! and the edges leaving it always agree.

use crate::graph::{EdgeColor, HealthState};
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // Header colors
    pub header_title: Color,
    pub header_route: Color,
    pub header_loading: Color,

    // Node colors
    pub status_ok: Color,
    pub node_caption: Color,
    pub node_label: Color,
    pub node_selected_bg: Color,

    // Edge colors
    pub edge_default: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_label: Color,

    // Footer colors
    pub footer_key: Color,
    pub message_error: Color,
    pub message_info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_title: Color::Cyan,
            header_route: Color::Yellow,
            header_loading: Color::Magenta,

            status_ok: Color::Green,
            node_caption: Color::Gray,
            node_label: Color::White,
            node_selected_bg: Color::DarkGray,

            edge_default: Color::Gray,

            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_label: Color::Cyan,

            footer_key: Color::Yellow,
            message_error: Color::Red,
            message_info: Color::Green,
        }
    }
}

fn rgb(color: EdgeColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

impl Theme {
    /// Border color of a node in `state`
    pub fn status_color(&self, state: HealthState) -> Color {
        match EdgeColor::for_state(state) {
            Some(color) => rgb(color),
            None => self.status_ok,
        }
    }

    /// Stroke of an edge, `None` meaning the default stroke
    pub fn edge_color(&self, color: Option<EdgeColor>) -> Color {
        color.map(rgb).unwrap_or(self.edge_default)
    }

    pub fn header_title_style(&self) -> Style {
        Style::default()
            .fg(self.header_title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn node_label_style(&self, selected: bool) -> Style {
        let style = Style::default()
            .fg(self.node_label)
            .add_modifier(Modifier::BOLD);
        if selected {
            style.bg(self.node_selected_bg)
        } else {
            style
        }
    }

    pub fn footer_key_style(&self) -> Style {
        Style::default().fg(self.footer_key)
    }

    pub fn message_style(&self, is_error: bool) -> Style {
        Style::default()
            .fg(if is_error {
                self.message_error
            } else {
                self.message_info
            })
            .add_modifier(Modifier::BOLD)
    }
}
