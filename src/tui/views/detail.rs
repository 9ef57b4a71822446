//! Detail panel for the selected node

use crate::graph::GraphNode;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

fn field<'a>(label: &'a str, value: String, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::styled(label, Style::default().fg(theme.text_label)),
        Span::styled(value, Style::default().fg(theme.text_primary)),
    ]
}

pub fn render_detail(f: &mut Frame, area: Rect, node: Option<&GraphNode>, theme: &Theme) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");

    let Some(node) = node else {
        f.render_widget(
            Paragraph::new("Nothing selected")
                .style(Style::default().fg(theme.text_secondary))
                .block(block),
            area,
        );
        return;
    };

    let data = &node.data;
    let mut first = field("Kind: ", data.kind.clone(), theme);
    first.push(Span::raw("   "));
    first.extend(field("API Version: ", data.api_version.clone(), theme));
    if let Some(ns) = &data.namespace {
        first.push(Span::raw("   "));
        first.extend(field("Namespace: ", ns.clone(), theme));
    }

    let status = if data.status_msg.is_empty() {
        data.status.to_string()
    } else {
        format!("{} ({})", data.status, data.status_msg)
    };
    let second = vec![
        Span::styled("Status: ", Style::default().fg(theme.text_label)),
        Span::styled(status, Style::default().fg(theme.status_color(data.status))),
    ];

    let third = field(
        "Open: ",
        data.target.clone().unwrap_or_else(|| "-".to_string()),
        theme,
    );

    let text = vec![Line::from(first), Line::from(second), Line::from(third)];
    f.render_widget(Paragraph::new(text).block(block), area);
}
