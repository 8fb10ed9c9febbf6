// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The rendering surface: draws the engine's published state (node list,
//! detail cards, console) and feeds pointer gestures and keyboard input to
//! the bridge. Contains no graph logic of its own.

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::bridge::{EventBridge, PointerGesture, SEND_ERROR_MARKER};
use crate::engine::ViewState;
use crate::model::ScreenPosition;
use crate::store;

mod theme;

use theme::TuiTheme;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);
const TICK_INTERVAL: Duration = Duration::from_millis(120);
const CONSOLE_HEIGHT: u16 = 8;

/// Runs the interactive terminal UI until the operator quits.
pub fn run(
    bridge: EventBridge,
    handle: tokio::runtime::Handle,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(bridge, handle);

    while !app.should_quit {
        app.tick();
        terminal.terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(TICK_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

struct App {
    bridge: EventBridge,
    handle: tokio::runtime::Handle,
    theme: TuiTheme,
    state: ViewState,
    should_quit: bool,
    cursor: usize,
    scroll: usize,
    hints_visible: bool,
    console_input: String,
    console_focused: bool,
    node_list_area: Rect,
    last_click: Option<(String, Instant)>,
}

impl App {
    fn new(bridge: EventBridge, handle: tokio::runtime::Handle) -> Self {
        let state = bridge.dispatcher().snapshot_blocking();
        Self {
            bridge,
            handle,
            theme: TuiTheme::from_env(),
            state,
            should_quit: false,
            cursor: 0,
            scroll: 0,
            hints_visible: false,
            console_input: String::new(),
            console_focused: false,
            node_list_area: Rect::default(),
            last_click: None,
        }
    }

    fn tick(&mut self) {
        self.state = self.bridge.dispatcher().snapshot_blocking();
        let node_count = self.state.graph().node_count();
        if node_count == 0 {
            self.cursor = 0;
        } else if self.cursor >= node_count {
            self.cursor = node_count - 1;
        }

        for node_ids in self.bridge.dispatcher().due_center_requests() {
            let Some(first) = node_ids.first() else {
                continue;
            };
            if let Some(index) = self
                .state
                .graph()
                .nodes
                .iter()
                .position(|node| &node.id == first)
            {
                self.cursor = index;
            }
        }

        if self.bridge.dispatcher().take_console_focus_request() {
            self.console_focused = true;
        }
    }

    fn cursor_node_id(&self) -> Option<String> {
        self.state
            .graph()
            .nodes
            .get(self.cursor)
            .map(|node| node.id.clone())
    }

    fn cursor_position(&self) -> ScreenPosition {
        let row = self
            .node_list_area
            .y
            .saturating_add(1)
            .saturating_add((self.cursor.saturating_sub(self.scroll)) as u16);
        ScreenPosition::new(f64::from(self.node_list_area.x), f64::from(row))
    }

    fn move_cursor(&mut self, delta: isize) {
        let node_count = self.state.graph().node_count();
        if node_count == 0 {
            return;
        }
        let last = node_count - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        let node_id = self.cursor_node_id();
        self.state = self.bridge.handle_gesture(PointerGesture::Hover { node_id });
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.console_focused {
            self.handle_console_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.hints_visible = !self.hints_visible,
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Enter => {
                if let Some(node_id) = self.cursor_node_id() {
                    let position = self.cursor_position();
                    self.state = self
                        .bridge
                        .handle_gesture(PointerGesture::Click { node_id, position });
                }
            }
            KeyCode::Char('l') => {
                if let Some(node_id) = self.cursor_node_id() {
                    let position = self.cursor_position();
                    self.state = self
                        .bridge
                        .handle_gesture(PointerGesture::DoubleClick { node_id, position });
                }
            }
            KeyCode::Esc => {
                self.state = self.bridge.handle_gesture(PointerGesture::Background);
            }
            KeyCode::Char('x') => {
                if let Some(node_id) = self.cursor_node_id() {
                    self.state = self
                        .bridge
                        .dispatcher()
                        .dispatch_blocking(crate::engine::ViewEvent::CloseSelection { node_id });
                }
            }
            KeyCode::Char('r') => {
                self.state = self
                    .bridge
                    .dispatcher()
                    .dispatch_blocking(crate::engine::ViewEvent::Reset);
            }
            KeyCode::Char('e') => self.export_graph(),
            KeyCode::Char('y') => self.yank_cursor_node_id(),
            KeyCode::Char(ch) => {
                self.bridge.handle_shortcut(ch, self.console_focused);
            }
            _ => {}
        }
    }

    fn handle_console_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.console_focused = false,
            KeyCode::Enter => self.submit_console_input(),
            KeyCode::Backspace => {
                self.console_input.pop();
            }
            KeyCode::Char(ch) => self.console_input.push(ch),
            _ => {}
        }
    }

    fn submit_console_input(&mut self) {
        let text = self.console_input.trim().to_owned();
        self.console_input.clear();
        if text.is_empty() {
            return;
        }

        self.bridge.dispatcher().notify(format!("you: {text}"));
        let bridge = self.bridge.clone();
        self.handle.spawn(async move {
            let reply = bridge.send_message(&text).await;
            let line = if reply.starts_with(SEND_ERROR_MARKER) {
                reply
            } else {
                format!("agent: {reply}")
            };
            bridge.dispatcher().notify(line);
        });
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved => {
                let node_id = self.node_at(mouse.column, mouse.row);
                self.state = self.bridge.handle_gesture(PointerGesture::Hover { node_id });
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let position =
                    ScreenPosition::new(f64::from(mouse.column), f64::from(mouse.row));
                match self.node_at(mouse.column, mouse.row) {
                    Some(node_id) => {
                        let now = Instant::now();
                        let gesture = if is_double_click(&self.last_click, &node_id, now) {
                            self.last_click = None;
                            PointerGesture::DoubleClick { node_id, position }
                        } else {
                            self.last_click = Some((node_id.clone(), now));
                            self.cursor = self
                                .state
                                .graph()
                                .nodes
                                .iter()
                                .position(|node| node.id == node_id)
                                .unwrap_or(self.cursor);
                            PointerGesture::Click { node_id, position }
                        };
                        self.state = self.bridge.handle_gesture(gesture);
                    }
                    None => {
                        self.last_click = None;
                        self.state = self.bridge.handle_gesture(PointerGesture::Background);
                    }
                }
            }
            _ => {}
        }
    }

    fn node_at(&self, column: u16, row: u16) -> Option<String> {
        let index = node_index_at(self.node_list_area, self.scroll, column, row)?;
        self.state
            .graph()
            .nodes
            .get(index)
            .map(|node| node.id.clone())
    }

    fn export_graph(&mut self) {
        match store::export_to_dir(self.state.graph(), Path::new(".")) {
            Ok(path) => self
                .bridge
                .dispatcher()
                .notify(format!("exported graph to {}", path.display())),
            Err(err) => self
                .bridge
                .dispatcher()
                .notify(format!("{SEND_ERROR_MARKER} export failed: {err}")),
        }
    }

    fn yank_cursor_node_id(&mut self) {
        let Some(node_id) = self.cursor_node_id() else {
            return;
        };
        match copy_to_clipboard(&node_id) {
            Ok(_) => self
                .bridge
                .dispatcher()
                .notify(format!("copied '{node_id}' to clipboard")),
            Err(err) => self
                .bridge
                .dispatcher()
                .notify(format!("{SEND_ERROR_MARKER} clipboard copy failed: {err}")),
        }
    }
}

fn is_double_click(last: &Option<(String, Instant)>, node_id: &str, now: Instant) -> bool {
    last.as_ref().is_some_and(|(previous_id, at)| {
        previous_id == node_id && now.duration_since(*at) <= DOUBLE_CLICK_WINDOW
    })
}

/// Maps a terminal cell to a node-list index, accounting for the panel
/// border and scroll offset.
fn node_index_at(area: Rect, scroll: usize, column: u16, row: u16) -> Option<usize> {
    if area.width < 3 || area.height < 3 {
        return None;
    }
    let inner_left = area.x.saturating_add(1);
    let inner_top = area.y.saturating_add(1);
    let inner_right = area.x.saturating_add(area.width).saturating_sub(1);
    let inner_bottom = area.y.saturating_add(area.height).saturating_sub(1);
    if column < inner_left || column >= inner_right || row < inner_top || row >= inner_bottom {
        return None;
    }
    Some(scroll + usize::from(row - inner_top))
}

fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

fn draw(frame: &mut Frame, app: &mut App) {
    let console_height = if app.state.console_visible() {
        CONSOLE_HEIGHT
    } else {
        0
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(console_height),
            Constraint::Length(1),
        ])
        .split(frame.size());

    if app.state.fullscreen() {
        app.node_list_area = chunks[0];
        draw_node_list(frame, app, chunks[0]);
    } else {
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
            .split(chunks[0]);
        app.node_list_area = main[0];
        draw_node_list(frame, app, main[0]);
        draw_detail_panel(frame, app, main[1]);
    }

    if app.state.console_visible() {
        draw_console(frame, app, chunks[1]);
    }
    draw_footer(frame, app, chunks[2]);
}

fn draw_node_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let visible_rows = usize::from(area.height.saturating_sub(2));
    if visible_rows > 0 {
        if app.cursor < app.scroll {
            app.scroll = app.cursor;
        } else if app.cursor >= app.scroll + visible_rows {
            app.scroll = app.cursor + 1 - visible_rows;
        }
    }

    let graph = app.state.graph();
    let items: Vec<ListItem> = graph
        .nodes
        .iter()
        .enumerate()
        .skip(app.scroll)
        .take(visible_rows.max(1))
        .map(|(index, node)| {
            let locked = app
                .state
                .selection(&node.id)
                .is_some_and(|selection| selection.persistent);
            let highlighted = app.state.highlighted_nodes().contains(&node.id);
            let hovered = app.state.hovered_node_id() == Some(node.id.as_str());

            let marker = if locked {
                "▣ "
            } else if highlighted {
                "◆ "
            } else {
                "  "
            };
            let mut style = if locked {
                app.theme.locked_style()
            } else if highlighted {
                app.theme.highlight_style()
            } else if hovered {
                app.theme.hover_style()
            } else {
                Style::default()
            };
            if index == app.cursor {
                style = style.patch(app.theme.cursor_style());
            }

            ListItem::new(format!("{marker}{} [{}]", node.id, node.node_type)).style(style)
        })
        .collect();

    let title = format!(
        " Graph ({} nodes, {} links) ",
        graph.node_count(),
        graph.link_count()
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(app.theme.panel_border_style(!app.console_focused)),
    );
    frame.render_widget(list, area);
}

fn draw_detail_panel(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if app.hints_visible {
        for hint in [
            "j/k move · Enter select · l lock · x close card · Esc deselect",
            "h hover mode · / console · f fullscreen · e export · y yank id",
            "r reset view · q quit · ? hide hints",
        ] {
            lines.push(Line::styled(hint, app.theme.notification_style()));
        }
        lines.push(Line::default());
    }

    if app.state.selections().is_empty() {
        lines.push(Line::raw("No node selected."));
    }
    let degrees = crate::query::degrees(app.state.graph());
    for selection in app.state.selections() {
        let node = &selection.node;
        let title = if selection.persistent {
            format!("▣ {} (locked)", node.id)
        } else {
            format!("□ {}", node.id)
        };
        lines.push(Line::styled(
            title,
            if selection.persistent {
                app.theme.locked_style()
            } else {
                app.theme.highlight_style()
            },
        ));
        lines.push(Line::raw(format!(
            "  type {} · importance {:.2}",
            node.node_type, node.metadata.importance
        )));
        if let Some(degree) = degrees.get(node.id.as_str()) {
            lines.push(Line::raw(format!(
                "  links in {} · out {}",
                degree.in_degree, degree.out_degree
            )));
        }
        for observation in &node.observations {
            lines.push(Line::raw(format!("  - {observation}")));
        }
        if !node.tags.is_empty() {
            let tags = node
                .tags
                .iter()
                .map(|tag| tag.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(Line::raw(format!("  tags: {tags}")));
        }
        lines.push(Line::default());
    }

    if !app.state.highlighted_links().is_empty() {
        lines.push(Line::styled(
            format!(
                "{} nodes / {} links highlighted",
                app.state.highlighted_nodes().len(),
                app.state.highlighted_links().len()
            ),
            app.theme.highlight_style(),
        ));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Detail ")
            .border_style(app.theme.panel_border_style(false)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_console(frame: &mut Frame, app: &App, area: Rect) {
    let visible = usize::from(area.height.saturating_sub(3));
    let notifications = app.bridge.dispatcher().notifications();
    let start = notifications.len().saturating_sub(visible);

    let mut lines: Vec<Line> = notifications[start..]
        .iter()
        .map(|line| {
            if line.starts_with(SEND_ERROR_MARKER) {
                Line::styled(line.clone(), app.theme.error_style())
            } else {
                Line::styled(line.clone(), app.theme.notification_style())
            }
        })
        .collect();
    lines.push(Line::raw(format!("> {}", app.console_input)));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Console ")
            .border_style(app.theme.panel_border_style(app.console_focused)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("q", app.theme.footer_key_style()),
        Span::raw(" quit · "),
        Span::styled("?", app.theme.footer_key_style()),
        Span::raw(" hints"),
    ];
    if app.state.hover_mode() {
        spans.push(Span::raw(" · hover mode"));
    }
    if app.state.is_loading() {
        spans.push(Span::styled(" · sending…", app.theme.highlight_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
