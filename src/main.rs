use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use props_terminal::api::{Player, Prediction};
use props_terminal::chart::ChartGeometry;
use props_terminal::config::{Settings, SourceMode};
use props_terminal::display::{
    confidence_gauge, fmt_number, fmt_percent, fmt_stat, format_commence_time,
    format_game_date, games_scheduled_label, pick_line, trend_label,
};
use props_terminal::filter::Facets;
use props_terminal::state::{
    self, AppState, InputField, PlayersFocus, ProviderCommand, Screen, apply_delta,
    chart_geometry,
};
use props_terminal::teams::{TeamBadge, resolve_matchup, ticker_text};
use props_terminal::{logging, provider, rankings};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
    chart_area: Option<Rect>,
}

impl App {
    fn new(settings: &Settings, cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state: AppState::with_settings(settings),
            should_quit: false,
            cmd_tx,
            chart_area: None,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay && matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            self.state.help_overlay = false;
            return;
        }
        if self.state.players_view.input.is_some() {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.state.finish_input(),
                KeyCode::Backspace => self.state.input_backspace(),
                KeyCode::Char(ch) => self.state.input_char(ch),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.open(Screen::Games),
            KeyCode::Char('2') => self.open(Screen::Players),
            KeyCode::Char('3') => self.open(Screen::TopPicks),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let cmds = self.state.retry();
                self.send(cmds);
            }
            KeyCode::Char('b') | KeyCode::Esc => {
                let cmds = self.state.go_back();
                self.send(cmds);
            }
            _ => match self.state.screen {
                Screen::Games => self.on_games_key(key),
                Screen::Players => self.on_players_key(key),
                Screen::TopPicks | Screen::PlayerPicks { .. } => self.on_picks_key(key),
            },
        }
    }

    fn on_games_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_game_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_game_prev(),
            _ => {}
        }
    }

    fn on_players_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.state.cycle_players_focus(),
            KeyCode::Char('j') | KeyCode::Down => self.state.players_move(true),
            KeyCode::Char('k') | KeyCode::Up => self.state.players_move(false),
            KeyCode::Char(' ') => self.state.toggle_focused_facet(),
            KeyCode::Char('/') => self.state.begin_input(InputField::Search),
            KeyCode::Char('[') => self.state.begin_input(InputField::MinPts),
            KeyCode::Char(']') => self.state.begin_input(InputField::MaxPts),
            KeyCode::Char('c') => {
                if self.state.players_view.filter.has_active_filters() {
                    self.state.clear_filters();
                    self.state.push_log("[INFO] Filters cleared");
                }
            }
            KeyCode::Enter => {
                if self.state.players_view.focus == PlayersFocus::Table {
                    self.open_selected_player();
                } else {
                    self.state.toggle_focused_facet();
                }
            }
            _ => {}
        }
    }

    fn on_picks_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_card(true),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_card(false),
            KeyCode::Char('l') | KeyCode::Right => {
                self.state.step_hover(true);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.state.step_hover(false);
            }
            KeyCode::Enter => self.open_selected_player(),
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        let Some(area) = self.chart_area else {
            self.state.clear_hover();
            return;
        };
        let inside = mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height;
        if !inside || area.width == 0 {
            self.state.clear_hover();
            return;
        }
        let x = (f64::from(mouse.column - area.x) + 0.5) / f64::from(area.width)
            * state::CHART_WIDTH;
        self.state.hover_chart_at(x);
    }

    fn open_selected_player(&mut self) {
        let Some(player) = self.state.selected_player_name() else {
            return;
        };
        self.open(Screen::PlayerPicks { player });
    }

    fn open(&mut self, screen: Screen) {
        let cmds = self.state.mount(screen);
        self.send(cmds);
    }

    fn send(&mut self, cmds: Vec<ProviderCommand>) {
        for cmd in cmds {
            if self.cmd_tx.send(cmd).is_err() {
                self.state.push_log("[WARN] Fetch request failed");
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let settings = Settings::from_env();
    let _log_guard = logging::init(settings.log_dir.as_deref())?;
    let demo = settings.source == SourceMode::Demo;
    tracing::info!(api = %settings.api_url, demo, "starting");

    let source = provider::build_source(&settings)?;
    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let _provider = provider::spawn_provider(source, tx, cmd_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(&settings, cmd_tx);
    app.open(Screen::Games);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(%err, "terminal loop failed");
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(area);

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    app.chart_area = None;
    let body = chunks[1];
    if !render_fetch_status(frame, body, &app.state) {
        app.chart_area = match app.state.screen {
            Screen::Games => {
                render_games(frame, body, &app.state);
                None
            }
            Screen::Players => {
                render_players(frame, body, &app.state);
                None
            }
            Screen::TopPicks => render_top_picks(frame, body, &app.state),
            Screen::PlayerPicks { .. } => render_player_picks(frame, body, &app.state),
        };
    }

    let footer = Paragraph::new(format!(
        "{}\n{}",
        footer_text(&app.state),
        console_text(&app.state)
    ))
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, area);
    }
}

fn header_text(state: &AppState) -> String {
    let title = match &state.screen {
        Screen::Games => "GAMES".to_string(),
        Screen::Players => "PLAYERS".to_string(),
        Screen::TopPicks => "TOP PICKS FOR TODAY".to_string(),
        Screen::PlayerPicks { player } => format!("PICKS | {player}"),
    };
    let line1 = format!("  PROPS TERMINAL | {title}");
    let line2 = "  1 Games  2 Players  3 Top Picks".to_string();
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    if state.players_view.input.is_some() {
        return "Type to edit | Backspace Delete | Enter/Esc Done".to_string();
    }
    match &state.screen {
        Screen::Games => "j/k Move | r Retry | ? Help | q Quit".to_string(),
        Screen::Players => {
            let mut text =
                "Tab Focus | j/k Move | Space Toggle | / Search | [ ] Min/Max PTS | Enter Picks"
                    .to_string();
            if state.players_view.filter.has_active_filters() {
                text.push_str(" | c Clear all filters");
            }
            text.push_str(" | q Quit");
            text
        }
        Screen::TopPicks => {
            "j/k Pick | h/l Game | Enter Player | r Retry | ? Help | q Quit".to_string()
        }
        Screen::PlayerPicks { .. } => {
            "j/k Stat | h/l Game | b/Esc Back | r Retry | ? Help | q Quit".to_string()
        }
    }
}

/// Draws loading/error placeholders; returns `true` when the screen body is covered.
fn render_fetch_status(frame: &mut Frame, area: Rect, state: &AppState) -> bool {
    if state.current_loading() {
        let text = match &state.screen {
            Screen::Games => "Loading games…".to_string(),
            Screen::Players => "Loading players…".to_string(),
            Screen::TopPicks => "Loading top picks…".to_string(),
            Screen::PlayerPicks { player } => format!("Loading picks for {player}…"),
        };
        let loading = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, area);
        return true;
    }
    if let Some(error) = state.current_error() {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        let message = Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red));
        frame.render_widget(message, rows[0]);
        let hint = Paragraph::new("r Retry").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, rows[1]);
        return true;
    }
    false
}

fn render_games(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(today) = state.games.state.data() else {
        return;
    };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(area);

    let ticker = Paragraph::new(ticker_text(&today.games))
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(ticker, sections[0]);

    let summary = format!(
        "{}\n{}",
        format_game_date(&today.date),
        games_scheduled_label(today.games.len())
    );
    frame.render_widget(Paragraph::new(summary), sections[1]);

    let list_area = sections[2];
    if today.games.is_empty() {
        let empty =
            Paragraph::new("No games scheduled").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    const ROW_HEIGHT: u16 = 2;
    let visible = (list_area.height / ROW_HEIGHT).max(1) as usize;
    let (start, end) = visible_range(state.games_selected, today.games.len(), visible);
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + (i as u16) * ROW_HEIGHT,
            width: list_area.width,
            height: ROW_HEIGHT.min(list_area.height.saturating_sub((i as u16) * ROW_HEIGHT)),
        };
        if row_area.height == 0 {
            break;
        }
        let game = &today.games[idx];
        let matchup = resolve_matchup(&game.game_code);
        let selected = idx == state.games_selected;
        let style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let away = badge_span(TeamBadge::for_code(&matchup.away_code));
        let home = badge_span(TeamBadge::for_code(&matchup.home_code));
        let line1 = Line::from(vec![
            away,
            Span::raw(format!(" {}  @  ", matchup.away_full_name)),
            home,
            Span::raw(format!(" {}", matchup.home_full_name)),
        ]);
        let status = if game.status_text.trim().is_empty() {
            "TBD"
        } else {
            game.status_text.trim()
        };
        let line2 = Line::from(format!("    {status} · {}", game.arena_name));
        frame.render_widget(Paragraph::new(vec![line1, line2]).style(style), row_area);
    }
}

fn badge_span(badge: TeamBadge) -> Span<'static> {
    let (r, g, b) = badge.rgb();
    let label = match badge {
        TeamBadge::Known(_) => format!(" {} ", badge.label()),
        TeamBadge::Unknown => " ? ".to_string(),
    };
    Span::styled(label, Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b)))
}

fn render_players(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(40)])
        .split(area);

    let facets = state.facets();
    render_players_sidebar(frame, columns[0], state, &facets);
    render_players_table(frame, columns[1], state);
}

fn render_players_sidebar(frame: &mut Frame, area: Rect, state: &AppState, facets: &Facets) {
    let view = &state.players_view;
    let filter = &view.filter;
    let mut lines: Vec<Line> = Vec::new();

    let editing = |field: InputField| view.input == Some(field);
    let cursor = |field: InputField| if editing(field) { "▏" } else { "" };

    lines.push(Line::from(Span::styled(
        "Search",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    let search = if filter.search_text.is_empty() && !editing(InputField::Search) {
        "Search players… (/)".to_string()
    } else {
        format!("{}{}", filter.search_text, cursor(InputField::Search))
    };
    lines.push(Line::from(search));
    lines.push(Line::from(""));

    lines.push(facet_heading("Position", view.focus == PlayersFocus::Positions));
    for (idx, pos) in facets.positions.iter().enumerate() {
        let checked = filter.selected_positions.contains(pos);
        let under_cursor = view.focus == PlayersFocus::Positions && idx == view.position_cursor;
        lines.push(facet_line(pos, checked, under_cursor));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(format!(
        "Min PTS: {}{}",
        view.min_text,
        cursor(InputField::MinPts)
    )));
    lines.push(Line::from(format!(
        "Max PTS: {}{}",
        view.max_text,
        cursor(InputField::MaxPts)
    )));
    if filter.has_active_filters() {
        lines.push(Line::from(Span::styled(
            "c Clear all filters",
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(""));

    lines.push(facet_heading("Team", view.focus == PlayersFocus::Teams));
    let team_lines: Vec<Line> = facets
        .teams
        .iter()
        .enumerate()
        .map(|(idx, team)| {
            let checked = filter.selected_teams.contains(team);
            let under_cursor = view.focus == PlayersFocus::Teams && idx == view.team_cursor;
            facet_line(team, checked, under_cursor)
        })
        .collect();
    let used = lines.len();
    let room = (area.height.saturating_sub(2) as usize).saturating_sub(used).max(1);
    let (start, end) = visible_range(view.team_cursor, team_lines.len(), room);
    lines.extend(team_lines.into_iter().skip(start).take(end - start));

    let sidebar =
        Paragraph::new(lines).block(Block::default().title("Filters").borders(Borders::ALL));
    frame.render_widget(sidebar, area);
}

fn facet_heading(title: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    Line::from(Span::styled(title.to_string(), style))
}

fn facet_line(value: &str, checked: bool, under_cursor: bool) -> Line<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    let style = if under_cursor {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    };
    Line::from(Span::styled(format!("{mark} {value}"), style))
}

fn player_columns() -> [Constraint; 8] {
    [
        Constraint::Min(22),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(8),
    ]
}

fn render_players_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Players").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let widths = player_columns();
    let header_area = Rect { height: 1, ..inner };
    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(header_area);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    for (col, title) in header_cols
        .iter()
        .zip(["Player", "Team", "Pos", "#", "PTS", "REB", "AST", "Props"])
    {
        render_cell_text(frame, *col, title, bold);
    }

    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };
    let filtered = state.filtered_players();
    if filtered.is_empty() {
        let empty = Paragraph::new("No players match the current filters.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let table_focused = state.players_view.focus == PlayersFocus::Table;
    let (start, end) = visible_range(
        state.players_view.selected,
        filtered.len(),
        list_area.height as usize,
    );
    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            y: list_area.y + i as u16,
            height: 1,
            ..list_area
        };
        let selected = table_focused && idx == state.players_view.selected;
        let style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(style), row_area);
        }
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);
        let player: &Player = filtered[idx];
        let props = if player.has_picks { "" } else { "OUT" };
        let cells = [
            player.name.clone(),
            player.team.clone(),
            player.position.clone(),
            player.jersey.clone(),
            fmt_stat(Some(player.pts)),
            fmt_stat(Some(player.reb)),
            fmt_stat(Some(player.ast)),
            props.to_string(),
        ];
        for (col, text) in cols.iter().zip(cells.iter()) {
            render_cell_text(frame, *col, text, style);
        }
    }
}

fn render_top_picks(frame: &mut Frame, area: Rect, state: &AppState) -> Option<Rect> {
    let top = state.top_picks.state.data()?;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    frame.render_widget(
        Paragraph::new(rankings::top_picks_summary(top))
            .style(Style::default().fg(Color::DarkGray)),
        sections[0],
    );

    let rows = rankings::rank_top_picks(top);
    if rows.is_empty() {
        let empty =
            Paragraph::new("No picks available.").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, sections[1]);
        return None;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(40)])
        .split(sections[1]);

    const CARD_HEIGHT: u16 = 2;
    let visible = (columns[0].height.saturating_sub(2) / CARD_HEIGHT).max(1) as usize;
    let (start, end) = visible_range(state.picks_view.selected, rows.len(), visible);
    let list: Vec<Line> = rows[start..end]
        .iter()
        .enumerate()
        .flat_map(|(offset, row)| {
            let idx = start + offset;
            let p = &row.pick.prediction;
            let style = if idx == state.picks_view.selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            vec![
                Line::from(Span::styled(
                    format!("#{} {}", row.rank, row.pick.player_name),
                    style.add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!(
                        "   {} · {} · {}%",
                        p.stat_type.label(),
                        pick_line(p.line, p.stat_type.code(), p.pick),
                        fmt_number(p.confidence)
                    ),
                    style,
                )),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(list).block(Block::default().title("Ranked").borders(Borders::ALL)),
        columns[0],
    );

    let row = rows.get(state.picks_view.selected)?;
    let p = &row.pick.prediction;
    let mut heading = vec![format!(
        "{}  ·  {} @ {} · {}",
        row.pick.player_name,
        p.away_team,
        p.home_team,
        format_commence_time(&p.commence_time)
    )];
    if let Some(url) = state.headshot_for(&row.pick.player_name) {
        heading.push(url);
    }
    render_prediction_card(frame, columns[1], state, p, &heading.join("\n"))
}

fn render_player_picks(frame: &mut Frame, area: Rect, state: &AppState) -> Option<Rect> {
    let picks = state.player_picks.state.data()?;
    let Screen::PlayerPicks { player } = &state.screen else {
        return None;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let mut header = vec![Line::from(Span::styled(
        player.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    let info = &picks.event_info;
    if info.has_schedule() {
        header.push(Line::from(vec![
            badge_span(TeamBadge::for_display_name(&info.away_team)),
            Span::raw(format!(" {} @ {} ", info.away_team, info.home_team)),
            badge_span(TeamBadge::for_display_name(&info.home_team)),
            Span::raw(format!("  {}", format_commence_time(&info.commence_time))),
        ]));
    }
    if let Some(url) = state.headshot_for(player) {
        header.push(Line::from(Span::styled(url, Style::default().fg(Color::DarkGray))));
    }
    frame.render_widget(Paragraph::new(header), sections[0]);

    let ordered = rankings::order_player_predictions(&picks.predictions);
    if ordered.is_empty() {
        let empty =
            Paragraph::new("No data available.").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, sections[1]);
        return None;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(40)])
        .split(sections[1]);

    let list: Vec<Line> = ordered
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let style = if idx == state.picks_view.selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!(
                    "{:<11} {} {}%",
                    p.stat_type.label(),
                    pick_line(p.line, p.stat_type.code(), p.pick),
                    fmt_number(p.confidence)
                ),
                style,
            ))
        })
        .collect();
    frame.render_widget(
        Paragraph::new(list).block(Block::default().title("Stats").borders(Borders::ALL)),
        columns[0],
    );

    let p = ordered.get(state.picks_view.selected)?;
    render_prediction_card(frame, columns[1], state, p, p.stat_type.label())
}

/// Card body shared by both picks screens. Returns the chart's inner area for mouse hover.
fn render_prediction_card(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    p: &Prediction,
    heading: &str,
) -> Option<Rect> {
    let block = Block::default().title("Card").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let heading_lines = heading.lines().count().max(1) as u16;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(heading_lines),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(heading.to_string()).wrap(Wrap { trim: true }),
        rows[0],
    );

    let pick_color = match p.pick {
        props_terminal::api::Pick::Over => Color::Green,
        props_terminal::api::Pick::Under => Color::Red,
    };
    let confidence = Line::from(vec![
        Span::styled(
            pick_line(p.line, p.stat_type.code(), p.pick),
            Style::default().fg(pick_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   Confidence {}% {}",
            fmt_number(p.confidence),
            confidence_gauge(p.confidence, 20)
        )),
    ]);
    frame.render_widget(Paragraph::new(confidence), rows[1]);

    let geometry = chart_geometry(p, state::CHART_WIDTH, state::CHART_HEIGHT);
    let chart_block = Block::default().borders(Borders::ALL).title(format!(
        "Last {} · {}/{} hits",
        geometry.bars.len(),
        geometry.hit_count(),
        geometry.bars.len()
    ));
    let chart_inner = chart_block.inner(rows[2]);
    frame.render_widget(chart_block, rows[2]);
    render_chart(frame, chart_inner, &geometry);

    let tooltip = match state.current_hover() {
        Some(hover) => {
            let color = if hover.is_hit { Color::Green } else { Color::Red };
            Line::from(vec![
                Span::styled(hover.label(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(
                    "  Value: {}  Line: {}  Result: ",
                    fmt_number(hover.value),
                    fmt_number(hover.line)
                )),
                Span::styled(hover.result_label(), Style::default().fg(color)),
            ])
        }
        None => Line::from(Span::styled(
            "h/l or mouse to inspect a game",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(tooltip), rows[3]);

    let secondary = vec![
        Line::from(format!(
            "Season Avg {}   L5 Avg {}   Hit Rate {}   Std Dev {}",
            fmt_stat(p.average),
            fmt_stat(p.last_5_avg),
            fmt_percent(p.hit_rate),
            fmt_stat(p.std_dev)
        )),
        Line::from(trend_label(p.trend)),
    ];
    frame.render_widget(Paragraph::new(secondary), rows[4]);

    Some(chart_inner)
}

fn render_chart(frame: &mut Frame, area: Rect, geometry: &ChartGeometry) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    // Braille gives two dot columns per cell; fill each bar with vertical strokes.
    let step = geometry.width / (f64::from(area.width) * 2.0);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, geometry.width])
        .y_bounds([0.0, geometry.height])
        .paint(|ctx| {
            for tick in &geometry.ticks {
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: tick.y,
                    x2: geometry.width,
                    y2: tick.y,
                    color: Color::DarkGray,
                });
            }
            ctx.layer();
            for bar in &geometry.bars {
                let color = if bar.hit { Color::Green } else { Color::Red };
                let mut x = bar.x;
                while x <= bar.x + bar.width {
                    ctx.draw(&CanvasLine {
                        x1: x,
                        y1: 0.0,
                        x2: x,
                        y2: bar.height,
                        color,
                    });
                    x += step.max(f64::EPSILON);
                }
            }
            ctx.layer();
            let mut x = 0.0;
            let dash = step * 6.0;
            while x < geometry.width {
                ctx.draw(&CanvasLine {
                    x1: x,
                    y1: geometry.line_y,
                    x2: (x + dash * 0.6).min(geometry.width),
                    y2: geometry.line_y,
                    color: Color::LightGreen,
                });
                x += dash.max(f64::EPSILON);
            }
            for tick in &geometry.ticks {
                ctx.print(
                    0.0,
                    tick.y,
                    Span::styled(tick.label(), Style::default().fg(Color::DarkGray)),
                );
            }
            for bar in &geometry.bars {
                ctx.print(bar.x, 0.0, Span::raw(bar.label()));
            }
        });
    frame.render_widget(canvas, area);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let start = state.logs.len().saturating_sub(2);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Props Terminal - Help",
        "",
        "Global:",
        "  1 / 2 / 3    Games / Players / Top picks",
        "  b / Esc      Back",
        "  r            Retry after an error",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Players:",
        "  Tab          Focus table / positions / teams",
        "  j/k or ↑/↓   Move",
        "  Space        Toggle facet",
        "  /            Search name, team, position",
        "  [ / ]        Min / max season PTS",
        "  c            Clear all filters",
        "  Enter        Open picks",
        "",
        "Picks:",
        "  j/k          Select card",
        "  h/l or mouse Inspect a game",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
