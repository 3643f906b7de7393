//! Terminal User Interface module using Ratatui.
//!
//! Plots the allocation of a simulation window: the unrounded proportional
//! share of each minute next to the rounded record count actually used, so
//! rounding loss is visible minute by minute.

use std::io::{self, Stdout};
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::error::Result;
use crate::simulator::SimulationPlan;

/// Terminal type alias for convenience.
type Term = Terminal<CrosstermBackend<Stdout>>;

/// Narrowest zoom level, in minutes.
const MIN_VIEW_MINUTES: usize = 30;

/// Viewer state.
pub struct App {
    plan: SimulationPlan,
    /// First minute shown.
    view_start: usize,
    /// Number of minutes shown.
    view_len: usize,
    show_help: bool,
    running: bool,
}

impl App {
    pub fn new(plan: SimulationPlan) -> Self {
        let view_len = plan.allocation.len().max(1);
        Self {
            plan,
            view_start: 0,
            view_len,
            show_help: false,
            running: true,
        }
    }

    /// Handles keyboard input.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('?') | KeyCode::Char('h') => self.show_help = !self.show_help,
            KeyCode::Left => self.pan_left(),
            KeyCode::Right => self.pan_right(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_in(),
            KeyCode::Char('-') => self.zoom_out(),
            KeyCode::Home => self.view_start = 0,
            KeyCode::End => self.view_start = self.max_start(),
            _ => {}
        }
    }

    fn total_minutes(&self) -> usize {
        self.plan.allocation.len()
    }

    fn max_start(&self) -> usize {
        self.total_minutes().saturating_sub(self.view_len)
    }

    fn pan_step(&self) -> usize {
        (self.view_len / 4).max(1)
    }

    fn pan_left(&mut self) {
        self.view_start = self.view_start.saturating_sub(self.pan_step());
    }

    fn pan_right(&mut self) {
        self.view_start = (self.view_start + self.pan_step()).min(self.max_start());
    }

    fn zoom_in(&mut self) {
        let floor = MIN_VIEW_MINUTES.min(self.total_minutes()).max(1);
        self.view_len = (self.view_len / 2).max(floor);
    }

    fn zoom_out(&mut self) {
        self.view_len = (self.view_len * 2).min(self.total_minutes()).max(1);
        self.view_start = self.view_start.min(self.max_start());
    }

    /// Visible minute range, half-open.
    pub fn view(&self) -> (usize, usize) {
        let end = (self.view_start + self.view_len).min(self.total_minutes());
        (self.view_start, end)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Chart series for minutes `[from, to)`: (expected share, allocated count).
pub fn chart_points(plan: &SimulationPlan, from: usize, to: usize) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let expected = plan.allocation.expected();
    let counts = plan.allocation.counts();
    let to = to.min(counts.len());

    let expected_points = (from..to).map(|i| (i as f64, expected[i])).collect();
    let count_points = (from..to).map(|i| (i as f64, counts[i] as f64)).collect();
    (expected_points, count_points)
}

/// Time-of-day labels for the start, middle and end of a minute range.
fn axis_labels(plan: &SimulationPlan, from: usize, to: usize) -> Vec<String> {
    let start = plan.window.start();
    let mid = from + (to - from) / 2;
    [from, mid, to]
        .iter()
        .map(|m| {
            (start + ChronoDuration::minutes(*m as i64))
                .format("%H:%M")
                .to_string()
        })
        .collect()
}

/// Initializes the terminal for TUI rendering.
pub fn init_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
pub fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main UI rendering function.
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Stats
            Constraint::Min(10),   // Chart
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_stats(frame, chunks[1], app);
    render_chart(frame, chunks[2], app);
    render_footer(frame, chunks[3]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = vec![
        Span::styled(
            "  FLOW-SYNTH",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Data distribution: {}", app.plan.window),
            Style::default().fg(Color::Gray),
        ),
    ];

    let header = Paragraph::new(Line::from(title)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

fn render_stats(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let summary = app.plan.allocation.summary();
    let discrepancy_color = if summary.discrepancy == 0 {
        Color::Green
    } else {
        Color::Yellow
    };

    let cells = [
        (" Requested ", summary.requested_total.to_string(), Color::Blue),
        (" Generated ", summary.achieved_total.to_string(), Color::Green),
        (
            " Rounding ",
            format!("{:+} ({:+.2}%)", summary.discrepancy, summary.relative_discrepancy * 100.0),
            discrepancy_color,
        ),
        (
            " Per Minute ",
            format!("{:.1} avg / {} peak", summary.mean_per_minute, summary.max_per_minute),
            Color::Cyan,
        ),
    ];

    for (chunk, (title, value, color)) in chunks.iter().zip(cells) {
        let block = Paragraph::new(value)
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(block, *chunk);
    }
}

fn render_chart(frame: &mut Frame, area: Rect, app: &App) {
    let (from, to) = app.view();
    let (expected, counts) = chart_points(&app.plan, from, to);

    let y_max = counts
        .iter()
        .chain(expected.iter())
        .map(|(_, y)| *y)
        .fold(1.0_f64, f64::max)
        .ceil();

    let datasets = vec![
        Dataset::default()
            .name("Proportional share per minute")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Cyan))
            .data(&expected),
        Dataset::default()
            .name("Records per minute")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&counts),
    ];

    let x_labels = axis_labels(&app.plan, from, to);
    let y_labels = vec![
        "0".to_string(),
        format!("{:.0}", y_max / 2.0),
        format!("{:.0}", y_max),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Distribution ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .x_axis(
            Axis::default()
                .title("timeline")
                .style(Style::default().fg(Color::Gray))
                .bounds([from as f64, to.max(from + 1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("records")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" q", Style::default().fg(Color::Yellow)),
        Span::raw(": Quit  "),
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(": Pan  "),
        Span::styled("+/-", Style::default().fg(Color::Yellow)),
        Span::raw(": Zoom  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(": Help"),
    ]))
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::TOP));

    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(60, 50, frame.area());

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().bold().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("q / Esc    ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit viewer"),
        ]),
        Line::from(vec![
            Span::styled("← / →      ", Style::default().fg(Color::Yellow)),
            Span::raw("Pan a quarter of the view"),
        ]),
        Line::from(vec![
            Span::styled("+ / -      ", Style::default().fg(Color::Yellow)),
            Span::raw("Zoom in / out"),
        ]),
        Line::from(vec![
            Span::styled("Home / End ", Style::default().fg(Color::Yellow)),
            Span::raw("Jump to window start / end"),
        ]),
        Line::from(vec![
            Span::styled("? / h      ", Style::default().fg(Color::Yellow)),
            Span::raw("Toggle this help"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Legend", Style::default().bold().fg(Color::Cyan))),
        Line::from(""),
        Line::from(vec![
            Span::styled("•          ", Style::default().fg(Color::Cyan)),
            Span::raw("Share of the requested total before rounding"),
        ]),
        Line::from(vec![
            Span::styled("⣿          ", Style::default().fg(Color::Yellow)),
            Span::raw("Records generated in that minute"),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

/// Helper to create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Runs the viewer until the user quits.
pub fn run_viewer(plan: SimulationPlan) -> Result<()> {
    let mut terminal = init_terminal()?;
    let mut app = App::new(plan);

    let tick_rate = Duration::from_millis(100);

    let outcome: Result<()> = (|| {
        while app.is_running() {
            terminal.draw(|f| render(f, &mut app))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    })();

    restore_terminal(&mut terminal)?;
    outcome
}
