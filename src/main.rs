use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use ipl_terminal::data::DataStore;
use ipl_terminal::state::{screen_label, AppState, InningsView, Screen};
use ipl_terminal::team_performance::display_team_name;

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new() -> Self {
        let mut state = AppState::new(DataStore::from_env());
        state.init();
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.set_screen(Screen::Series),
            KeyCode::Char('2') => self.state.set_screen(Screen::Team),
            KeyCode::Char('3') => self.state.set_screen(Screen::Match),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.state.push_log("[INFO] Reloading view from disk");
                self.state.recompute_active_view();
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend).context("failed to build terminal")?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
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

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Series => render_series(frame, chunks[1], &app.state),
        Screen::Team => render_team(frame, chunks[1], &app.state),
        Screen::Match => render_match(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let context = match state.screen {
        Screen::Series => "league-wide trends".to_string(),
        Screen::Team => state
            .selected_team()
            .map(|t| format!("team: {}", display_team_name(t)))
            .unwrap_or_else(|| "no team".to_string()),
        Screen::Match => state
            .selected_match()
            .map(|m| m.label.clone())
            .unwrap_or_else(|| "no match".to_string()),
    };
    let line1 = format!(
        "  _|_  IPL ANALYTICS | {} | {}",
        screen_label(state.screen),
        context
    );
    let line2 = " (___)".to_string();
    let line3 = "  |_|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Series => "1 Series | 2 Team | 3 Match | r Reload | ? Help | q Quit".to_string(),
        Screen::Team | Screen::Match => {
            "1 Series | 2 Team | 3 Match | j/k/↑/↓ Selector | r Reload | ? Help | q Quit"
                .to_string()
        }
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_view_error(frame: &mut Frame, area: Rect, error: Option<&str>) {
    let text = error.unwrap_or("View not loaded yet");
    let banner = Paragraph::new(format!("View aborted: {text}"))
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, area);
}

fn render_series(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(view) = &state.series_view else {
        render_view_error(frame, area, state.series_error.as_deref());
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(columns[0]);

    let mut venue_lines = vec![format!("{:<24} {:>7} {:>9}", "City", "Matches", "Peak Runs")];
    for row in &view.venues {
        venue_lines.push(format!(
            "{:<24} {:>7} {:>9}",
            clip(&row.city, 24),
            row.matches,
            row.peak_runs
        ));
    }
    let venues = Paragraph::new(venue_lines.join("\n")).block(
        Block::default()
            .title("Match Count and Peak Runs by Venue")
            .borders(Borders::ALL),
    );
    frame.render_widget(venues, left[0]);

    let mut pair_lines = vec![format!(
        "{:<28} {:>6} {:>4}  {}",
        "Team", "Played", "Won", "Dominating"
    )];
    for row in &view.pairs {
        pair_lines.push(format!(
            "{:<28} {:>6} {:>4}  {}",
            clip(&row.team, 28),
            row.played,
            row.won,
            if row.dominating.is_empty() {
                "-".to_string()
            } else {
                row.dominating.join(", ")
            }
        ));
    }
    let pairs = Paragraph::new(pair_lines.join("\n")).block(
        Block::default()
            .title("Pair Dominance")
            .borders(Borders::ALL),
    );
    frame.render_widget(pairs, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    render_wins_chart(frame, right[0], state);

    let mut toss_lines = vec![format!("{:<22} {:>5} {:>6}", "City", "Bat", "Field")];
    for row in &view.toss_by_venue {
        toss_lines.push(format!(
            "{:<22} {:>5} {:>6}",
            clip(&row.city, 22),
            row.bat,
            row.field
        ));
    }
    let toss = Paragraph::new(toss_lines.join("\n")).block(
        Block::default()
            .title("Toss Choices by Venue")
            .borders(Borders::ALL),
    );
    frame.render_widget(toss, right[1]);
}

fn render_wins_chart(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title("Wins by Team")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(view) = &state.series_view else {
        return;
    };
    if view.wins.is_empty() || inner.height == 0 {
        let empty =
            Paragraph::new("No decided matches").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let max = view.wins.iter().map(|w| w.wins).max().unwrap_or(1).max(1);
    let bars: Vec<Bar> = view
        .wins
        .iter()
        .map(|row| {
            Bar::default()
                .value(u64::from(row.wins))
                .label(Line::from(clip(&row.team, 22)))
                .text_value(format!("{}", row.wins))
                .style(Style::default().fg(Color::Green))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(u64::from(max));
    frame.render_widget(chart, inner);
}

fn render_team(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(view) = &state.team_view else {
        render_view_error(frame, area, state.team_error.as_deref());
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[0]);

    let mut record_lines = vec![format!("{:<22} {:>6} {:>4}", "City", "Played", "Won")];
    for row in &view.record_by_city {
        record_lines.push(format!(
            "{:<22} {:>6} {:>4}",
            clip(&row.city, 22),
            row.played,
            row.won
        ));
    }
    let record = Paragraph::new(record_lines.join("\n")).block(
        Block::default()
            .title("Played vs Won by City")
            .borders(Borders::ALL),
    );
    frame.render_widget(record, left[0]);

    let toss_text = format!(
        "Tosses won:  {}\nTosses lost: {}\nWin rate:    {:.1}%\n\nChose bat:   {}\nChose field: {}",
        view.toss_record.won,
        view.toss_record.lost,
        view.toss_record.win_pct(),
        view.toss_choices.bat,
        view.toss_choices.field
    );
    let toss = Paragraph::new(toss_text).block(
        Block::default()
            .title("Toss Performance")
            .borders(Borders::ALL),
    );
    frame.render_widget(toss, left[1]);

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[1]);

    let mut dist_lines = Vec::new();
    for role in &view.distribution {
        dist_lines.push(format!("{} ({})", role.role, role.players));
        for style in &role.styles {
            dist_lines.push(format!("  {} ({})", style.style, style.players.len()));
            for player in &style.players {
                dist_lines.push(format!("    {player}"));
            }
        }
    }
    if dist_lines.is_empty() {
        dist_lines.push("No squad data".to_string());
    }
    let distribution = Paragraph::new(dist_lines.join("\n")).block(
        Block::default()
            .title("Players Distribution")
            .borders(Borders::ALL),
    );
    frame.render_widget(distribution, middle[0]);

    let mut overseas_lines = vec![format!("{:<20} {:<14} {}", "Name", "Country", "Role")];
    for player in &view.overseas {
        overseas_lines.push(format!(
            "{:<20} {:<14} {}",
            clip(&player.name, 20),
            clip(&player.country, 14),
            player.role
        ));
    }
    let overseas = Paragraph::new(overseas_lines.join("\n")).block(
        Block::default()
            .title("Overseas Players")
            .borders(Borders::ALL),
    );
    frame.render_widget(overseas, middle[1]);

    let mut city_lines = vec![format!("{:<22} {:>7} {:>9}", "City", "Matches", "Avg Runs")];
    for row in &view.cities {
        city_lines.push(format!(
            "{:<22} {:>7} {:>9.1}",
            clip(&row.city, 22),
            row.matches,
            row.avg_peak_runs
        ));
    }
    let cities = Paragraph::new(city_lines.join("\n")).block(
        Block::default()
            .title("Match Count and Avg Runs by City")
            .borders(Borders::ALL),
    );
    frame.render_widget(cities, columns[2]);
}

fn render_match(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(view) = &state.match_view else {
        render_view_error(frame, area, state.match_error.as_deref());
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_innings(frame, columns[0], &view.first);
    render_innings(frame, columns[1], &view.second);
}

fn render_innings(frame: &mut Frame, area: Rect, view: &InningsView) {
    let block = Block::default()
        .title(view.team.to_string())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(6),
            Constraint::Min(6),
            Constraint::Min(4),
            Constraint::Min(3),
        ])
        .split(inner);

    let kpi_line = format!(
        "Runs {}  Balls {}  SR {:.2}  Dismissals {}",
        view.kpis.total_runs,
        view.kpis.total_balls,
        view.kpis.team_strike_rate,
        view.kpis.total_dismissals
    );
    let kpi = Paragraph::new(kpi_line).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(kpi, rows[0]);

    let mut summary_lines = vec![format!(
        "Boundaries: {} fours, {} sixes",
        view.boundaries.fours, view.boundaries.sixes
    )];
    if view.dismissals.is_empty() {
        summary_lines.push("Dismissals: none".to_string());
    } else {
        let split = view
            .dismissals
            .iter()
            .map(|(kind, count)| format!("{kind} {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        summary_lines.push(format!("Dismissals: {split}"));
    }
    let summary = Paragraph::new(summary_lines.join("\n"))
        .block(Block::default().title("Breakdown").borders(Borders::TOP));
    frame.render_widget(summary, rows[1]);

    let mut bat_lines = vec![format!("{:<20} {:>4} {:>7} {:>3} {:>3}", "Batsman", "R", "SR", "4s", "6s")];
    for perf in &view.batting {
        // Boundary rows are keyed by name; batting keeps innings order.
        let bounds = view
            .boundaries
            .per_batsman
            .iter()
            .find(|b| b.batsman == perf.batsman);
        bat_lines.push(format!(
            "{:<20} {:>4} {:>7.2} {:>3} {:>3}",
            clip(&perf.batsman, 20),
            perf.runs,
            perf.strike_rate,
            bounds.map(|b| b.fours).unwrap_or(0),
            bounds.map(|b| b.sixes).unwrap_or(0)
        ));
    }
    let batting = Paragraph::new(bat_lines.join("\n"))
        .block(Block::default().title("Batting").borders(Borders::TOP));
    frame.render_widget(batting, rows[2]);

    let mut bowl_lines = vec![format!(
        "{:<20} {:>4} {:>6} {:>6}",
        "Bowler", "R", "Extras", "Eco"
    )];
    for perf in &view.bowling {
        bowl_lines.push(format!(
            "{:<20} {:>4} {:>6} {:>6.2}",
            clip(&perf.bowler, 20),
            perf.runs_conceded,
            perf.extras,
            perf.economy
        ));
    }
    let bowling = Paragraph::new(bowl_lines.join("\n"))
        .block(Block::default().title("Bowling").borders(Borders::TOP));
    frame.render_widget(bowling, rows[3]);

    let mut catch_lines = Vec::new();
    for (idx, catcher) in view.catches.catchers.iter().enumerate() {
        let detail = view
            .catches
            .batsmen
            .iter()
            .enumerate()
            .filter(|(col, _)| view.catches.counts[idx][*col] > 0)
            .map(|(col, batsman)| format!("{batsman} x{}", view.catches.counts[idx][col]))
            .collect::<Vec<_>>()
            .join(", ");
        catch_lines.push(format!(
            "{:<20} {:>2}  {}",
            clip(catcher, 20),
            view.catches.row_total(idx),
            detail
        ));
    }
    if catch_lines.is_empty() {
        catch_lines.push("No catches".to_string());
    }
    let catches = Paragraph::new(catch_lines.join("\n"))
        .block(Block::default().title("Catches").borders(Borders::TOP));
    frame.render_widget(catches, rows[4]);
}

fn clip(raw: &str, width: usize) -> String {
    if raw.chars().count() <= width {
        raw.to_string()
    } else {
        raw.chars().take(width.saturating_sub(1)).collect::<String>() + "…"
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "IPL Analytics - Help",
        "",
        "Global:",
        "  1            Series analysis",
        "  2            Team performance",
        "  3            Match analysis",
        "  r            Reload active view",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Team / Match:",
        "  j/k or ↑/↓   Change selection",
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
