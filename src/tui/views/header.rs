//! Header view rendering

use crate::graph::Route;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Title, focused route and a loading marker on one line
pub fn render_header(f: &mut Frame, area: Rect, route: &Route, loading: bool, theme: &Theme) {
    let mut spans = vec![
        Span::styled("komoplane", theme.header_title_style()),
        Span::raw(" | "),
        Span::styled(
            route.node_type().display_name(),
            Style::default().fg(theme.text_label),
        ),
        Span::raw(" "),
        Span::styled(route.to_path(), Style::default().fg(theme.header_route)),
    ];
    if loading {
        spans.push(Span::styled(
            "  loading...",
            Style::default().fg(theme.header_loading),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
