use std::{io, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fleet_core::{Fleet, MemoryLogger, Vehicle};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use rust_decimal::Decimal;
use tracing::info;

const TICK_RATE: Duration = Duration::from_millis(250);
const LOG_PANE_HEIGHT: u16 = 8;

#[derive(Debug, Clone)]
struct Theme {
    accent: Color,
    muted: Color,
    selection_bg: Color,
    selection_fg: Color,
    success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            success: Color::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailMode {
    Selected,
    Overview,
}

/// Interactive fleet browser.
pub struct FleetApp<'a> {
    fleet: Fleet<'a>,
    logger: &'a MemoryLogger,
    cursor: usize,
    list_state: ListState,
    detail: DetailMode,
    overview: String,
    total: Decimal,
    status: String,
    should_quit: bool,
    theme: Theme,
}

impl<'a> FleetApp<'a> {
    pub fn new(fleet: Fleet<'a>, logger: &'a MemoryLogger) -> Self {
        let total = fleet.total_value();
        let mut list_state = ListState::default();
        if !fleet.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            fleet,
            logger,
            cursor: 0,
            list_state,
            detail: DetailMode::Selected,
            overview: String::new(),
            total,
            status: String::new(),
            should_quit: false,
            theme: Theme::default(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.set_status(format!("Loaded {} vehicles", self.fleet.len()));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let outcome = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        info!(vehicles = self.fleet.len(), "fleet browser closed");
        outcome
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(TICK_RATE).context("failed to poll terminal events")? {
                if let Event::Key(key) = event::read().context("failed to read terminal event")? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Home => self.move_cursor(isize::MIN),
            KeyCode::End => self.move_cursor(isize::MAX),
            KeyCode::Char('d') => self.toggle_overview(),
            KeyCode::Char('t') => {
                self.total = self.fleet.total_value();
                self.set_status(format!("Total recalculated: ${}", self.total.normalize()));
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.fleet.len();
        if len == 0 {
            return;
        }
        let max = (len - 1) as isize;
        let next = (self.cursor as isize).saturating_add(delta).clamp(0, max);
        self.cursor = next as usize;
        self.list_state.select(Some(self.cursor));
        self.detail = DetailMode::Selected;
    }

    fn toggle_overview(&mut self) {
        self.detail = match self.detail {
            DetailMode::Selected => {
                self.overview = self.fleet.display_all();
                DetailMode::Overview
            }
            DetailMode::Overview => DetailMode::Selected,
        };
    }

    fn set_status(&mut self, status: String) {
        self.status = format!("{} {status}", Local::now().format("%H:%M:%S"));
    }

    fn selected(&self) -> Option<&Vehicle> {
        self.fleet.vehicles().get(self.cursor)
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(LOG_PANE_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);

        self.draw_list(frame, columns[0]);
        self.draw_detail(frame, columns[1]);
        self.draw_log(frame, rows[1]);
        self.draw_footer(frame, rows[2]);
    }

    fn draw_list(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .fleet
            .vehicles()
            .iter()
            .map(|vehicle| ListItem::new(vehicle_label(vehicle)))
            .collect();
        let title = format!(" Fleet · {} vehicles ", self.fleet.len());
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title, Style::default().fg(self.theme.accent))),
            )
            .highlight_style(
                Style::default()
                    .bg(self.theme.selection_bg)
                    .fg(self.theme.selection_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect) {
        let (title, body) = match self.detail {
            DetailMode::Overview => (" Overview ".to_string(), self.overview.clone()),
            DetailMode::Selected => match self.selected() {
                Some(vehicle) => (format!(" {} ", vehicle.classify()), vehicle.describe()),
                None => (" Details ".to_string(), "No vehicles in fleet.".to_string()),
            },
        };
        let lines: Vec<Line> = body.lines().map(Line::from).collect();
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn draw_log(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let entries = self.logger.entries();
        let skip = entries.len().saturating_sub(visible);
        let lines: Vec<Line> = entries
            .into_iter()
            .skip(skip)
            .map(|entry| Line::from(Span::styled(entry, Style::default().fg(self.theme.muted))))
            .collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                format!(" Total: ${} ", self.total.normalize()),
                Style::default()
                    .fg(self.theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ↑/↓ move · d overview · t total · q quit  "),
            Span::styled(self.status.clone(), Style::default().fg(self.theme.muted)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn vehicle_label(vehicle: &Vehicle) -> String {
    let identity = vehicle.identity();
    format!(
        "{:<12} {} {} ({})",
        vehicle.classify(),
        identity.manufacturer,
        identity.model,
        identity.year
    )
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::demo;

    fn app(logger: &MemoryLogger) -> FleetApp<'_> {
        let mut fleet = Fleet::new(logger);
        for vehicle in demo::company_fleet_vehicles() {
            fleet.add(vehicle);
        }
        FleetApp::new(fleet, logger)
    }

    fn press(app: &mut FleetApp<'_>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let logger = MemoryLogger::new();
        let mut app = app(&logger);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.cursor, 3);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 3);
        assert_eq!(app.selected().map(Vehicle::classify), Some("Electric Car"));
        press(&mut app, KeyCode::Home);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn overview_uses_fleet_display() {
        let logger = MemoryLogger::new();
        let mut app = app(&logger);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.detail, DetailMode::Overview);
        assert!(app.overview.starts_with(fleet_core::FLEET_BANNER));
        assert_eq!(logger.entries().last().map(String::as_str), Some("Displaying fleet"));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.detail, DetailMode::Selected);
    }

    #[test]
    fn total_computed_on_start() {
        let logger = MemoryLogger::new();
        let app = app(&logger);
        assert_eq!(app.total, Decimal::from(225_000));
        assert_eq!(
            logger.entries().last().map(String::as_str),
            Some("Calculating total fleet value")
        );
    }

    #[test]
    fn quit_keys() {
        let logger = MemoryLogger::new();
        let mut app = app(&logger);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn label_pads_kind() {
        let vehicles = demo::company_fleet_vehicles();
        assert_eq!(vehicle_label(&vehicles[1]), "SUV          Ford Explorer (2021)");
    }
}
