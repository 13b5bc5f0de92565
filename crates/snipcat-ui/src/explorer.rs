use crate::common::{centered_rect, truncate_preview};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier as StyleModifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Terminal,
};
use snipcat_core::{
    format_keyword, App, Intent, Modifier, Panel, Result, SystemEffects, COPY_TOAST_MS,
    EXPORT_FILENAME,
};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

const EXPORT_MENU: [(&str, Intent); 4] = [
    ("Add to Snipcat", Intent::AddToApp),
    ("Download JSON", Intent::Download),
    ("Copy JSON", Intent::CopyJson),
    ("Copy URL to Share", Intent::CopyShareUrl),
];

struct ExplorerState {
    app: App,
    effects: SystemEffects,
    active_category: usize,
    cursor: usize,
    offset: usize,
    menu_cursor: usize,
    /// 0 = start modifier, 1 = end modifier
    settings_field: usize,
    copied_since: Option<Instant>,
    status: Option<String>,
    exiting: bool,
}

impl ExplorerState {
    fn new(app: App) -> Self {
        Self {
            app,
            effects: SystemEffects::new(),
            active_category: 0,
            cursor: 0,
            offset: 0,
            menu_cursor: 0,
            settings_field: 0,
            copied_since: None,
            status: None,
            exiting: false,
        }
    }

    fn category_count(&self) -> usize {
        self.app.catalog().len()
    }

    fn active_category_len(&self) -> usize {
        self.app
            .catalog()
            .get(self.active_category)
            .map(|c| c.snippets.len())
            .unwrap_or(0)
    }

    fn cursor_snippet_id(&self) -> Option<String> {
        self.app
            .catalog()
            .get(self.active_category)
            .and_then(|c| c.snippets.get(self.cursor))
            .map(|s| s.id.clone())
    }
}

/// Display the snippet explorer UI
pub fn run_explorer(app: App) -> Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut state = ExplorerState::new(app);
    let result = run_loop(&mut terminal, &mut state);

    // Clean up terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut ExplorerState,
) -> Result<()> {
    // Frame limiter to reduce flickering and CPU usage
    let mut last_render = Instant::now();
    const RENDER_INTERVAL: Duration = Duration::from_millis(33);
    let mut force_render = true;

    while !state.exiting {
        let now = Instant::now();
        if force_render || now.duration_since(last_render) >= RENDER_INTERVAL {
            terminal.draw(|f| draw(f, state))?;
            last_render = now;
            force_render = false;
        }

        // The copy confirmation clears itself after a fixed delay; the
        // dispatcher only ever sets it.
        if let Some(since) = state.copied_since {
            if since.elapsed() >= Duration::from_millis(COPY_TOAST_MS) {
                state.app.clear_copied();
                state.copied_since = None;
                force_render = true;
            }
        }

        // Handle input with a timeout to prevent excessive CPU usage
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(KeyEvent {
                code, modifiers, ..
            }) = event::read()?
            {
                if handle_key(state, code, modifiers) {
                    force_render = true;
                }
            }
        }
    }

    Ok(())
}

/// Map a key press onto the state. Returns true when a redraw is needed.
fn handle_key(state: &mut ExplorerState, code: KeyCode, modifiers: KeyModifiers) -> bool {
    state.status = None;

    match state.app.panel() {
        Panel::ExportMenu => handle_menu_key(state, code),
        Panel::Settings => handle_settings_key(state, code),
        Panel::About => handle_about_key(state, code),
        Panel::None => handle_browse_key(state, code, modifiers),
    }
}

fn handle_browse_key(state: &mut ExplorerState, code: KeyCode, modifiers: KeyModifiers) -> bool {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('k') => dispatch(state, Intent::ToggleExportMenu),
            KeyCode::Char('d') => {
                dispatch(state, Intent::Download);
                if !state.app.selection().is_empty() && state.status.is_none() {
                    state.status = Some(format!("Saved {}", EXPORT_FILENAME));
                }
            }
            KeyCode::Char('y') => dispatch(state, Intent::CopyJson),
            KeyCode::Char('u') => dispatch(state, Intent::CopyShareUrl),
            KeyCode::Char('o') => dispatch(state, Intent::AddToApp),
            _ => return false,
        }
        return true;
    }

    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            if state.cursor > 0 {
                state.cursor -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.cursor + 1 < state.active_category_len() {
                state.cursor += 1;
            }
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            if state.active_category > 0 {
                state.active_category -= 1;
            } else {
                state.active_category = state.category_count().saturating_sub(1);
            }
            state.cursor = 0;
            state.offset = 0;
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            if state.active_category + 1 < state.category_count() {
                state.active_category += 1;
            } else {
                state.active_category = 0;
            }
            state.cursor = 0;
            state.offset = 0;
        }
        KeyCode::Char(' ') => toggle_at_cursor(state),
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some(id) = state.cursor_snippet_id() {
                state.app.remove_from_selection(&id);
            }
        }
        KeyCode::Char('c') => dispatch(state, Intent::ClearSelection),
        KeyCode::Char('s') => dispatch(state, Intent::ToggleSettings),
        KeyCode::Char('a') => dispatch(state, Intent::ToggleAbout),
        KeyCode::Char('q') | KeyCode::Esc => {
            state.exiting = true;
        }
        _ => return false,
    }

    true
}

fn handle_menu_key(state: &mut ExplorerState, code: KeyCode) -> bool {
    match code {
        KeyCode::Up => {
            if state.menu_cursor > 0 {
                state.menu_cursor -= 1;
            }
        }
        KeyCode::Down => {
            if state.menu_cursor + 1 < EXPORT_MENU.len() {
                state.menu_cursor += 1;
            }
        }
        KeyCode::Enter => {
            let (_, intent) = EXPORT_MENU[state.menu_cursor];
            dispatch(state, intent);
        }
        KeyCode::Esc | KeyCode::Char('q') => dispatch(state, Intent::ToggleExportMenu),
        _ => return false,
    }

    true
}

fn handle_settings_key(state: &mut ExplorerState, code: KeyCode) -> bool {
    match code {
        KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
            state.settings_field = 1 - state.settings_field;
        }
        KeyCode::Left => cycle_modifier(state, -1),
        KeyCode::Right => cycle_modifier(state, 1),
        KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') => {
            dispatch(state, Intent::ToggleSettings)
        }
        _ => return false,
    }

    true
}

fn handle_about_key(state: &mut ExplorerState, code: KeyCode) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('a') | KeyCode::Char('q') => {
            dispatch(state, Intent::ToggleAbout);
            true
        }
        _ => false,
    }
}

fn toggle_at_cursor(state: &mut ExplorerState) {
    let id = match state.cursor_snippet_id() {
        Some(id) => id,
        None => return,
    };

    // The gesture reaches the engine as an identity delta
    if state.app.is_selected(&id) {
        state.app.apply_gesture(&[], &[id]);
    } else {
        state.app.apply_gesture(&[id], &[]);
    }
}

fn cycle_modifier(state: &mut ExplorerState, step: isize) {
    let current = if state.settings_field == 0 {
        state.app.start_modifier()
    } else {
        state.app.end_modifier()
    };

    let len = Modifier::ALL.len() as isize;
    let next = (current.position() as isize + step).rem_euclid(len) as usize;
    let modifier = Modifier::ALL[next];

    if state.settings_field == 0 {
        state.app.set_start_modifier(modifier);
    } else {
        state.app.set_end_modifier(modifier);
    }
}

fn dispatch(state: &mut ExplorerState, intent: Intent) {
    if let Err(e) = state.app.dispatch(intent, &mut state.effects) {
        state.status = Some(format!("Error: {}", e));
        return;
    }

    if state.app.copied() {
        state.copied_since = Some(Instant::now());
    }
}

fn draw<B: Backend>(f: &mut ratatui::Frame<B>, state: &mut ExplorerState) {
    let size = f.size();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Catalog
            Constraint::Length(2), // Help + status
        ])
        .split(size);

    draw_title(f, state, main_chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(20)])
        .split(main_chunks[1]);

    draw_sidebar(f, state, body[0]);
    draw_snippets(f, state, body[1]);
    draw_footer(f, state, main_chunks[2]);

    match state.app.panel() {
        Panel::ExportMenu => draw_export_menu(f, state, size),
        Panel::Settings => draw_settings(f, state, size),
        Panel::About => draw_about(f, size),
        Panel::None => {}
    }
}

fn draw_title<B: Backend>(f: &mut ratatui::Frame<B>, state: &ExplorerState, area: Rect) {
    let version = env!("CARGO_PKG_VERSION");
    let selected = state.app.selection().len();
    let label = match selected {
        0 => String::new(),
        1 => " — 1 snippet selected".to_string(),
        n => format!(" — {} snippets selected", n),
    };

    let title = Paragraph::new(format!("snipcat v{}{}", version, label))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(StyleModifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_sidebar<B: Backend>(f: &mut ratatui::Frame<B>, state: &ExplorerState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((state.category_count() as u16).saturating_add(2).min(12)),
            Constraint::Min(4),
        ])
        .split(area);

    let items: Vec<ListItem> = state
        .app
        .catalog()
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let is_active = i == state.active_category;
            let marker = if is_active { "> " } else { "  " };
            let line = Line::from(vec![
                Span::styled(
                    marker,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(StyleModifier::BOLD),
                ),
                Span::styled(
                    category.name.clone(),
                    if is_active {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(StyleModifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ),
                Span::styled(
                    format!(" ({})", category.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let categories = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Categories "),
    );
    f.render_widget(categories, chunks[0]);

    draw_summary(f, state, chunks[1]);
}

fn draw_summary<B: Backend>(f: &mut ratatui::Frame<B>, state: &ExplorerState, area: Rect) {
    let selection = state.app.selection();

    if selection.is_empty() {
        let instructions = Paragraph::new(vec![
            Line::from("Space selects the snippet"),
            Line::from("under the cursor."),
            Line::from(""),
            Line::from("Select several, then press"),
            Line::from("Ctrl+K to export them."),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Selected "));
        f.render_widget(instructions, area);
        return;
    }

    let max_visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = selection
        .iter()
        .take(max_visible)
        .map(|snippet| {
            ListItem::new(Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::Green)),
                Span::raw(snippet.name.clone()),
            ]))
        })
        .collect();

    let title = format!(" Selected ({}) ", selection.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_snippets<B: Backend>(f: &mut ratatui::Frame<B>, state: &mut ExplorerState, area: Rect) {
    // Two rows per snippet inside the borders; keep the cursor in view
    let max_visible = (area.height.saturating_sub(2) / 2).max(1) as usize;
    if state.cursor >= state.offset + max_visible {
        state.offset = state.cursor + 1 - max_visible;
    } else if state.cursor < state.offset {
        state.offset = state.cursor;
    }
    let offset = state.offset;

    let category = match state.app.catalog().get(state.active_category) {
        Some(category) => category,
        None => {
            let empty = Paragraph::new("The catalog is empty.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" snipcat "));
            f.render_widget(empty, area);
            return;
        }
    };

    let preview_width = area.width.saturating_sub(8) as usize;
    let end = category.snippets.len().min(offset + max_visible);

    let items: Vec<ListItem> = category.snippets[offset..end]
        .iter()
        .enumerate()
        .map(|(i, snippet)| {
            let actual_index = offset + i;
            let is_cursor = actual_index == state.cursor;
            let is_selected = state.app.is_selected(&snippet.id);

            let marker = if is_selected { "[x] " } else { "[ ] " };
            let keyword = format_keyword(
                &snippet.keyword,
                snippet.kind,
                state.app.start_modifier(),
                state.app.end_modifier(),
            );

            let mut header = vec![
                Span::styled(
                    marker,
                    if is_selected {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    },
                ),
                Span::styled(
                    snippet.name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(StyleModifier::BOLD),
                ),
            ];
            if !keyword.is_empty() {
                header.push(Span::styled(
                    format!("  {}", keyword),
                    Style::default().fg(Color::Red),
                ));
            }

            let preview = Span::styled(
                format!("    {}", truncate_preview(&snippet.text, preview_width)),
                Style::default().fg(Color::DarkGray),
            );

            let item = ListItem::new(vec![Line::from(header), Line::from(preview)]);
            if is_cursor {
                item.style(Style::default().bg(Color::DarkGray))
            } else {
                item
            }
        })
        .collect();

    let title = format!(" {} ", category.name);
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_footer<B: Backend>(f: &mut ratatui::Frame<B>, state: &ExplorerState, area: Rect) {
    let help = Line::from(vec![
        Span::styled("Space", Style::default().fg(Color::Yellow)),
        Span::raw(": Select  "),
        Span::styled("Ctrl+K", Style::default().fg(Color::Yellow)),
        Span::raw(": Export  "),
        Span::styled("s", Style::default().fg(Color::Yellow)),
        Span::raw(": Modifiers  "),
        Span::styled("a", Style::default().fg(Color::Yellow)),
        Span::raw(": About  "),
        Span::styled("c", Style::default().fg(Color::Yellow)),
        Span::raw(": Clear  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(": Quit"),
    ]);

    let second = if state.app.copied() {
        Line::from(Span::styled(
            "✓ Copied to clipboard",
            Style::default()
                .fg(Color::Green)
                .add_modifier(StyleModifier::BOLD),
        ))
    } else if let Some(status) = &state.status {
        Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from("")
    };

    let footer = Paragraph::new(vec![help, second]).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}

fn draw_export_menu<B: Backend>(f: &mut ratatui::Frame<B>, state: &ExplorerState, size: Rect) {
    let area = centered_rect(40, 40, size);
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = EXPORT_MENU
        .iter()
        .enumerate()
        .map(|(i, (label, _))| {
            let is_selected = i == state.menu_cursor;
            let prefix = if is_selected { "> " } else { "  " };
            let style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(StyleModifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", prefix, label),
                style,
            )))
        })
        .collect();

    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Export ")
            .title_alignment(Alignment::Center),
    );
    f.render_widget(menu, area);
}

fn draw_settings<B: Backend>(f: &mut ratatui::Frame<B>, state: &ExplorerState, size: Rect) {
    let area = centered_rect(50, 40, size);
    f.render_widget(Clear, area);

    let field_line = |label: &str, value: Modifier, active: bool| {
        let marker = if active { "> " } else { "  " };
        Line::from(vec![
            Span::styled(
                format!("{}{:<16}", marker, label),
                if active {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(StyleModifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                },
            ),
            Span::styled("< ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                value.to_string(),
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(StyleModifier::BOLD),
            ),
            Span::styled(" >", Style::default().fg(Color::DarkGray)),
        ])
    };

    let lines = vec![
        Line::from("Modifiers are used as prefixes and suffixes"),
        Line::from("for your snippets' keyword."),
        Line::from(""),
        field_line("Start Modifier", state.app.start_modifier(), state.settings_field == 0),
        field_line("End Modifier", state.app.end_modifier(), state.settings_field == 1),
        Line::from(""),
        Line::from(Span::styled(
            "Tab: switch field  ←/→: change  Esc: close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let settings = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Configure Modifiers ")
            .title_alignment(Alignment::Center),
    );
    f.render_widget(settings, area);
}

fn draw_about<B: Backend>(f: &mut ratatui::Frame<B>, size: Rect) {
    let area = centered_rect(60, 70, size);
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from("snipcat is a tool to browse curated snippets and"),
        Line::from("import them into the Snipcat desktop app."),
        Line::from(""),
        Line::from("Select snippets with Space, then export them as a"),
        Line::from("JSON file, a clipboard payload, a shareable URL, or"),
        Line::from("send them straight to the app."),
        Line::from(""),
        Line::from(Span::styled(
            "Shortcuts",
            Style::default().add_modifier(StyleModifier::BOLD),
        )),
        Line::from("  Ctrl+O   Add to Snipcat"),
        Line::from("  Ctrl+K   Toggle export menu"),
        Line::from("  Ctrl+D   Download JSON"),
        Line::from("  Ctrl+Y   Copy JSON"),
        Line::from("  Ctrl+U   Copy URL to share"),
        Line::from("  s        Configure modifiers"),
        Line::from("  a        Toggle this view"),
    ];

    let about = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" About ")
            .title_alignment(Alignment::Center),
    );
    f.render_widget(about, area);
}
