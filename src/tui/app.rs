//! Graph viewer state and input handling

use super::theme::Theme;
use super::views;
use crate::graph::{self, FocalResource, GraphData, GraphNode, LayoutConfig, Route};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
};

/// Detail fetch outcome, tagged with the route it was requested for
pub type FetchResult = (Route, Result<FocalResource, String>);

/// Arrow-key movement between nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// State of the graph viewer
pub struct App {
    route: Route,
    history: Vec<Route>,
    graph: Option<GraphData>,
    selected: usize,
    /// A fetch for `route` still has to be dispatched
    fetch_pending: bool,
    loading: bool,
    error: Option<String>,
    status_message: Option<(String, bool)>,
    layout: LayoutConfig,
    theme: Theme,
    /// Screen areas of the nodes drawn by the last render
    node_areas: Vec<(usize, Rect)>,
}

impl App {
    pub fn new(route: Route, layout: LayoutConfig, theme: Theme) -> Self {
        Self {
            route,
            history: Vec::new(),
            graph: None,
            selected: 0,
            fetch_pending: true,
            loading: true,
            error: None,
            status_message: None,
            layout,
            theme,
            node_areas: Vec::new(),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn graph(&self) -> Option<&GraphData> {
        self.graph.as_ref()
    }

    pub fn selected_node(&self) -> Option<&GraphNode> {
        self.graph.as_ref().and_then(|g| g.nodes.get(self.selected))
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status_message(&self) -> Option<&(String, bool)> {
        self.status_message.as_ref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Route to fetch next, if a fetch was requested since the last call
    pub fn take_fetch_request(&mut self) -> Option<Route> {
        if self.fetch_pending {
            self.fetch_pending = false;
            Some(self.route.clone())
        } else {
            None
        }
    }

    fn focus(&mut self, route: Route) {
        tracing::debug!("Focusing {}", route);
        self.route = route;
        self.graph = None;
        self.selected = 0;
        self.error = None;
        self.status_message = None;
        self.fetch_pending = true;
        self.loading = true;
    }

    /// Open `route`, remembering the current one for [`App::back`]
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        let previous = std::mem::replace(&mut self.route, route.clone());
        self.history.push(previous);
        self.focus(route);
    }

    /// Return to the previous route; `false` when there is none
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(route) => {
                self.focus(route);
                true
            }
            None => false,
        }
    }

    pub fn reload(&mut self) {
        self.fetch_pending = true;
        self.loading = true;
    }

    /// Apply a fetch result
    ///
    /// Results for any route other than the focused one are dropped and
    /// `false` is returned.
    pub fn apply_fetch_result(
        &mut self,
        route: Route,
        result: Result<FocalResource, String>,
    ) -> bool {
        if route != self.route {
            tracing::debug!(
                "Discarding stale response for {} (focused {})",
                route,
                self.route
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(focal) => {
                let mut graph = graph::build_graph(&focal);
                graph::layout(&mut graph, &self.layout);
                self.selected = graph.nodes.iter().position(|n| n.data.main).unwrap_or(0);
                tracing::debug!(
                    "Built graph for {}: {} nodes, {} edges",
                    route,
                    graph.nodes.len(),
                    graph.edges.len()
                );
                self.graph = Some(graph);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", route, e);
                self.graph = None;
                self.error = Some(e);
            }
        }
        true
    }

    /// Select the nearest node in direction `dir`
    pub fn move_selection(&mut self, dir: Move) {
        let selected = self.selected;
        let Some(graph) = &self.graph else {
            return;
        };
        let Some(current) = graph.nodes.get(selected) else {
            return;
        };
        let (cx, cy) = (current.position.x, current.position.y);

        let best = graph
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != selected)
            .filter_map(|(i, node)| {
                let (dx, dy) = (node.position.x - cx, node.position.y - cy);
                let (along, across) = match dir {
                    Move::Left => (-dx, dy),
                    Move::Right => (dx, dy),
                    Move::Up => (-dy, dx),
                    Move::Down => (dy, dx),
                };
                (along > 0.0).then_some((i, along + across.abs() * 2.0))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);

        if let Some(i) = best {
            self.selected = i;
        }
    }

    /// Cycle through nodes in insertion order
    pub fn select_next(&mut self) {
        let count = self.graph.as_ref().map_or(0, |g| g.nodes.len());
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    /// Click the selected node: navigate to its target if it has one
    pub fn activate(&mut self) -> bool {
        let mut target: Option<String> = None;
        let clicked = match self.selected_node() {
            Some(node) => node.click(|t| target = Some(t.to_string())),
            None => return false,
        };

        if !clicked {
            let label = self
                .selected_node()
                .map(|n| n.data.label.clone())
                .unwrap_or_default();
            self.status_message = Some((format!("Nothing to open for {}", label), false));
            return false;
        }

        match target.as_deref().and_then(Route::parse) {
            Some(route) if route.api_path().is_some() => {
                self.navigate(route);
                true
            }
            Some(route) => {
                self.status_message = Some((
                    format!(
                        "{} {} has no relationship graph",
                        route.node_type().display_name(),
                        route.name()
                    ),
                    false,
                ));
                false
            }
            None => {
                tracing::warn!("Unrecognized navigation target {:?}", target);
                self.status_message = Some(("Unrecognized navigation target".to_string(), true));
                false
            }
        }
    }

    /// Handle a key press
    ///
    /// Returns `Some(true)` to quit, `Some(false)` when the key was consumed
    /// and `None` otherwise.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(true),
            KeyCode::Char('q') => Some(true),
            KeyCode::Esc | KeyCode::Backspace => {
                if !self.back() {
                    self.status_message =
                        Some(("Already at the first resource".to_string(), false));
                }
                Some(false)
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_selection(Move::Left);
                Some(false)
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_selection(Move::Right);
                Some(false)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(Move::Up);
                Some(false)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(Move::Down);
                Some(false)
            }
            KeyCode::Tab => {
                self.select_next();
                Some(false)
            }
            KeyCode::Enter => {
                self.activate();
                Some(false)
            }
            KeyCode::Char('r') => {
                self.reload();
                Some(false)
            }
            _ => None,
        }
    }

    /// Left click selects and opens the node under the cursor
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let at = Position::new(mouse.column, mouse.row);
        let hit = self
            .node_areas
            .iter()
            .find(|(_, area)| area.contains(at))
            .map(|(i, _)| *i);
        if let Some(i) = hit {
            self.selected = i;
            self.activate();
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let [header, body, detail, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .areas(f.area());

        views::render_header(f, header, &self.route, self.loading, &self.theme);
        self.node_areas = views::render_graph(
            f,
            body,
            &views::GraphViewState {
                graph: self.graph.as_ref(),
                selected: self.selected,
                loading: self.loading,
                error: self.error.as_deref(),
                layout: &self.layout,
            },
            &self.theme,
        );
        views::render_detail(f, detail, self.selected_node(), &self.theme);
        views::render_footer(f, footer, self.status_message.as_ref(), &self.theme);
    }
}
