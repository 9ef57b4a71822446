//! Graph view rendering
//!
//! Draws the laid-out relationship graph: one bordered box per node at its
//! layout position, edges as orthogonal box-drawing lines underneath with an
//! arrowhead at the source end. The view scrolls so the selected node is
//! always visible.

use crate::graph::{GraphData, GraphNode, LayoutConfig};
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

/// Everything the graph view needs from the app
pub struct GraphViewState<'a> {
    pub graph: Option<&'a GraphData>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub layout: &'a LayoutConfig,
}

/// Node box in layout coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeBox {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl NodeBox {
    fn of(node: &GraphNode, layout: &LayoutConfig) -> Self {
        Self {
            x: node.position.x.round() as i32,
            y: node.position.y.round() as i32,
            w: layout.node_width.round() as i32,
            h: layout.node_height.round() as i32,
        }
    }
}

/// Maps layout coordinates onto the inner area
struct Viewport {
    area: Rect,
    offset_x: i32,
    offset_y: i32,
}

impl Viewport {
    fn point(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let sx = self.area.x as i32 + x - self.offset_x;
        let sy = self.area.y as i32 + y - self.offset_y;
        let inside = sx >= self.area.x as i32
            && sx < self.area.right() as i32
            && sy >= self.area.y as i32
            && sy < self.area.bottom() as i32;
        inside.then_some((sx as u16, sy as u16))
    }

    /// Screen rect of a box, `None` unless fully visible
    fn rect(&self, cell: NodeBox) -> Option<Rect> {
        let (x, y) = self.point(cell.x, cell.y)?;
        self.point(cell.x + cell.w - 1, cell.y + cell.h - 1)?;
        Some(Rect::new(x, y, cell.w as u16, cell.h as u16))
    }
}

/// Render the graph and return the screen area of every drawn node
pub fn render_graph(
    f: &mut Frame,
    area: Rect,
    state: &GraphViewState,
    theme: &Theme,
) -> Vec<(usize, Rect)> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Relationships ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let message = |text: String, style: Style| Paragraph::new(text).style(style);

    if let Some(error) = state.error {
        f.render_widget(
            message(
                format!("Failed to load resource: {}", error),
                theme.message_style(true),
            ),
            inner,
        );
        return Vec::new();
    }

    let graph = match state.graph {
        Some(graph) if !graph.is_empty() => graph,
        Some(_) => {
            f.render_widget(
                message(
                    "No resources to show".to_string(),
                    Style::default().fg(theme.text_secondary),
                ),
                inner,
            );
            return Vec::new();
        }
        None => {
            let text = if state.loading {
                "Loading..."
            } else {
                "No data"
            };
            f.render_widget(
                message(text.to_string(), Style::default().fg(theme.text_secondary)),
                inner,
            );
            return Vec::new();
        }
    };

    let boxes: Vec<NodeBox> = graph
        .nodes
        .iter()
        .map(|n| NodeBox::of(n, state.layout))
        .collect();

    // Scroll just far enough to show the selected node
    let (offset_x, offset_y) = match boxes.get(state.selected) {
        Some(c) => (
            (c.x + c.w - inner.width as i32).max(0),
            (c.y + c.h - inner.height as i32).max(0),
        ),
        None => (0, 0),
    };
    let view = Viewport {
        area: inner,
        offset_x,
        offset_y,
    };

    let horizontal = state.layout.direction.is_horizontal();
    for edge in &graph.edges {
        let source = graph.nodes.iter().position(|n| n.id == edge.source);
        let target = graph.nodes.iter().position(|n| n.id == edge.target);
        if let (Some(s), Some(t)) = (source, target) {
            let style = Style::default().fg(theme.edge_color(edge.color()));
            draw_edge(f.buffer_mut(), &view, boxes[s], boxes[t], horizontal, style);
        }
    }

    let mut drawn = Vec::new();
    for (i, node) in graph.nodes.iter().enumerate() {
        if let Some(rect) = view.rect(boxes[i]) {
            draw_node(f, rect, node, i == state.selected, theme);
            drawn.push((i, rect));
        }
    }
    drawn
}

fn draw_node(f: &mut Frame, rect: Rect, node: &GraphNode, selected: bool, theme: &Theme) {
    let color = theme.status_color(node.data.status);
    let border_type = if selected {
        BorderType::Thick
    } else if node.data.main {
        BorderType::Double
    } else {
        BorderType::Rounded
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            node.node_type.display_name(),
            Style::default().fg(theme.node_caption),
        ));

    let mut lines = vec![Line::from(Span::styled(
        node.data.label.clone(),
        theme.node_label_style(selected),
    ))];
    if !node.data.status.is_ok() {
        let status = if node.data.status_msg.is_empty() {
            node.data.status.to_string()
        } else {
            format!("{}: {}", node.data.status, node.data.status_msg)
        };
        lines.push(Line::from(Span::styled(
            status,
            Style::default().fg(color).add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            node.data.kind.clone(),
            Style::default().fg(theme.text_secondary),
        )));
    }

    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Up,
    Down,
    Left,
    Right,
}

/// Side of a cell a line leaves through when moving from `a` to `b`
fn heading(a: (i32, i32), b: (i32, i32)) -> Option<Side> {
    use std::cmp::Ordering::*;
    match (b.0.cmp(&a.0), b.1.cmp(&a.1)) {
        (Less, Equal) => Some(Side::Left),
        (Greater, Equal) => Some(Side::Right),
        (Equal, Less) => Some(Side::Up),
        (Equal, Greater) => Some(Side::Down),
        _ => None,
    }
}

fn opposite(side: Side) -> Side {
    match side {
        Side::Up => Side::Down,
        Side::Down => Side::Up,
        Side::Left => Side::Right,
        Side::Right => Side::Left,
    }
}

/// Box-drawing glyph joining two sides of a cell
fn joint(a: Side, b: Side) -> &'static str {
    use Side::*;
    match (a, b) {
        (Up, Right) | (Right, Up) => "└",
        (Up, Left) | (Left, Up) => "┘",
        (Down, Right) | (Right, Down) => "┌",
        (Down, Left) | (Left, Down) => "┐",
        (Up, Down) | (Down, Up) => "│",
        _ => "─",
    }
}

fn put(buf: &mut Buffer, view: &Viewport, x: i32, y: i32, symbol: &str, style: Style) {
    if let Some(cell) = view.point(x, y).and_then(|pos| buf.cell_mut(pos)) {
        cell.set_symbol(symbol).set_style(style);
    }
}

/// Orthogonal path from the side of `source` facing `target` to the
/// facing side of `target`, with the arrowhead next to the source
fn edge_path(
    source: NodeBox,
    target: NodeBox,
    horizontal: bool,
) -> Option<(Vec<(i32, i32)>, &'static str)> {
    if horizontal {
        let (sy, ty) = (source.y + source.h / 2, target.y + target.h / 2);
        let (start, end, arrow) = if source.x > target.x + target.w {
            ((source.x - 1, sy), (target.x + target.w, ty), "▶")
        } else if source.x + source.w < target.x {
            ((source.x + source.w, sy), (target.x - 1, ty), "◀")
        } else {
            return None;
        };
        let mid = (start.0 + end.0) / 2;
        Some((vec![start, (mid, start.1), (mid, end.1), end], arrow))
    } else {
        let (sx, tx) = (source.x + source.w / 2, target.x + target.w / 2);
        let (start, end, arrow) = if source.y > target.y + target.h {
            ((sx, source.y - 1), (tx, target.y + target.h), "▼")
        } else if source.y + source.h < target.y {
            ((sx, source.y + source.h), (tx, target.y - 1), "▲")
        } else {
            return None;
        };
        let mid = (start.1 + end.1) / 2;
        Some((vec![start, (start.0, mid), (end.0, mid), end], arrow))
    }
}

fn draw_edge(
    buf: &mut Buffer,
    view: &Viewport,
    source: NodeBox,
    target: NodeBox,
    horizontal: bool,
    style: Style,
) {
    let Some((mut points, arrow)) = edge_path(source, target, horizontal) else {
        return;
    };
    points.dedup();

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let symbol = if a.1 == b.1 { "─" } else { "│" };
        let (x0, x1) = (a.0.min(b.0), a.0.max(b.0));
        let (y0, y1) = (a.1.min(b.1), a.1.max(b.1));
        for x in x0..=x1 {
            for y in y0..=y1 {
                put(buf, view, x, y, symbol, style);
            }
        }
    }

    for triple in points.windows(3) {
        let (Some(into), Some(out)) = (
            heading(triple[0], triple[1]),
            heading(triple[1], triple[2]),
        ) else {
            continue;
        };
        let glyph = joint(opposite(into), out);
        put(buf, view, triple[1].0, triple[1].1, glyph, style);
    }

    if let Some(&(x, y)) = points.first() {
        put(buf, view, x, y, arrow, style);
    }
}
