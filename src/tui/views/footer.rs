//! Footer view rendering

use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Key bindings shown when there is no message
pub const KEY_HINTS: &[(&str, &str)] = &[
    ("arrows", "select"),
    ("enter", "open"),
    ("esc", "back"),
    ("r", "reload"),
    ("q", "quit"),
];

/// Status message if any, key hints otherwise
pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    status_message: Option<&(String, bool)>,
    theme: &Theme,
) {
    let line = match status_message {
        Some((msg, is_error)) => {
            Line::from(Span::styled(msg.clone(), theme.message_style(*is_error)))
        }
        None => {
            let mut spans = Vec::new();
            for (i, (key, action)) in KEY_HINTS.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                spans.push(Span::styled(format!("<{}>", key), theme.footer_key_style()));
                spans.push(Span::styled(
                    format!(" {}", action),
                    Style::default().fg(theme.text_secondary),
                ));
            }
            Line::from(spans)
        }
    };
    f.render_widget(Paragraph::new(line), area);
}
