//! Ratatui-based investor dashboard.
//!
//! A sidebar of scenario sliders (global, or pinned per year via the tabs),
//! metric cards and charts for the selected view, and the raw data table.
//! Every keypress re-runs the projection; nothing is kept between sessions.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Tabs},
};
use tracing::{info, warn};

use crate::app::pipeline::{RunOutput, prepare_plan, run_projection};
use crate::cli::ScenarioArgs;
use crate::cli::gate::AccessGate;
use crate::domain::{DashboardView, Knob, ScenarioPlan, VarianceBounds, YEAR_LABELS, YEARS, YearBaseline, baseline};
use crate::error::AppError;
use crate::plot::{BarChart, cash_chart, liquidity_walk_chart, revenue_chart};
use crate::report::{LiquidityWalk, fmt_currency, fmt_millions, fmt_variance, metric_cards};

mod plotters_chart;

use plotters_chart::{BarChartWidget, GOLD, series_rgb};

const SMALL_STEP: f64 = 0.01;
const LARGE_STEP: f64 = 0.05;

/// Start the TUI.
pub fn run(args: ScenarioArgs) -> Result<(), AppError> {
    let mut app = App::new(&args, AccessGate::from_env())?;

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Which inputs the sliders edit: the global input or one year's override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Global,
    Year(usize),
}

impl Scope {
    fn tab_index(self) -> usize {
        match self {
            Scope::Global => 0,
            Scope::Year(y) => y + 1,
        }
    }

    fn from_tab_index(i: usize) -> Self {
        match i % (YEARS + 1) {
            0 => Scope::Global,
            n => Scope::Year(n - 1),
        }
    }
}

struct App {
    baselines: [YearBaseline; YEARS],
    bounds: VarianceBounds,
    plan: ScenarioPlan,
    scope: Scope,
    selected_knob: usize,
    view: DashboardView,
    gate: AccessGate,
    unlocked: bool,
    code_input: String,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: &ScenarioArgs, gate: AccessGate) -> Result<Self, AppError> {
        let baselines = baseline::calibrated();
        let bounds = VarianceBounds::default();
        let (plan, clamped) = prepare_plan(&baselines, &args.plan(), &bounds, args.strict)?;

        let unlocked = gate.is_open() || args.access_code.as_deref().is_some_and(|c| gate.check(c));
        let status = if unlocked {
            "Adjust to see variance from the Base Case Financial Model.".to_string()
        } else {
            "Access Required.".to_string()
        };

        let mut app = Self {
            baselines,
            bounds,
            plan,
            scope: Scope::Global,
            selected_knob: 0,
            view: DashboardView::Revenue,
            gate,
            unlocked,
            code_input: String::new(),
            status,
            run: None,
        };
        app.recompute();
        if unlocked && !clamped.is_empty() {
            app.status = format!("{} input(s) clamped to slider range.", clamped.len());
        }
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if !self.unlocked {
            return self.handle_gate_key(code);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_knob = self.selected_knob.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_knob + 1 < Knob::COUNT {
                    self.selected_knob += 1;
                }
            }
            KeyCode::Left => self.adjust(-SMALL_STEP),
            KeyCode::Right => self.adjust(SMALL_STEP),
            KeyCode::PageDown => self.adjust(-LARGE_STEP),
            KeyCode::PageUp => self.adjust(LARGE_STEP),
            KeyCode::Tab => {
                self.scope = Scope::from_tab_index(self.scope.tab_index() + 1);
                self.status = format!("Editing: {}", scope_name(self.scope));
            }
            KeyCode::BackTab => {
                self.scope = Scope::from_tab_index(self.scope.tab_index() + YEARS);
                self.status = format!("Editing: {}", scope_name(self.scope));
            }
            KeyCode::Char('v') => {
                self.view = self.view.toggle();
                self.status = format!("View: {}", self.view.display_name());
            }
            KeyCode::Char('x') => {
                if let Scope::Year(y) = self.scope {
                    let knob = self.knob();
                    self.plan.clear_override(y, knob);
                    self.recompute();
                    self.status = format!("Year {} {} follows global again.", y + 1, knob.key());
                }
            }
            KeyCode::Char('0') => {
                self.plan.reset();
                self.recompute();
                self.status = "Reset to Base Case.".to_string();
                info!("scenario reset to base case");
            }
            _ => {}
        }

        false
    }

    fn handle_gate_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => return true,
            KeyCode::Enter => {
                if self.gate.check(&self.code_input) {
                    self.unlocked = true;
                    self.status = "Adjust to see variance from the Base Case Financial Model.".to_string();
                } else {
                    warn!("access denied");
                    self.status = "Access Denied.".to_string();
                }
                self.code_input.clear();
            }
            KeyCode::Backspace => {
                self.code_input.pop();
            }
            KeyCode::Char(c) => self.code_input.push(c),
            _ => {}
        }
        false
    }

    fn knob(&self) -> Knob {
        Knob::ALL[self.selected_knob]
    }

    /// Move the selected slider by `delta` (fraction), snapping to whole percent.
    fn adjust(&mut self, delta: f64) {
        let knob = self.knob();
        let range = self.bounds.range(knob);
        let current = match self.scope {
            Scope::Global => self.plan.global.get(knob),
            Scope::Year(y) => self.plan.value(y, knob),
        };
        let next = range.clamp(((current + delta) * 100.0).round() / 100.0);

        match self.scope {
            Scope::Global => self.plan.global.set(knob, next),
            Scope::Year(y) => self.plan.set_override(y, knob, next),
        }
        self.recompute();
        self.status = format!("{} ({}): {}", knob.display_name(), scope_name(self.scope), fmt_variance(next));
    }

    fn recompute(&mut self) {
        match run_projection(&self.baselines, &self.plan, &self.bounds, false) {
            Ok(run) => {
                self.plan = run.plan;
                self.run = Some(run);
            }
            Err(err) => {
                self.status = err.to_string();
                self.run = None;
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        if !self.unlocked {
            self.draw_gate(frame);
            return;
        }

        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_gate(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let width = 44.min(size.width);
        let height = 7.min(size.height);
        let rect = Rect {
            x: size.x + (size.width - width) / 2,
            y: size.y + (size.height - height) / 2,
            width,
            height,
        };

        let masked = "*".repeat(self.code_input.chars().count());
        let lines = vec![
            Line::from(Span::styled("Access Required", Style::default().fg(gold()).add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(format!("Enter Access Code: {masked}")),
            Line::from(Span::styled(&self.status, Style::default().fg(Color::Yellow))),
        ];
        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Backroads Reclamation"));
        frame.render_widget(Clear, rect);
        frame.render_widget(p, rect);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let scenario = if self.plan.global.is_zero() && !self.plan.has_overrides() {
            "Base Case".to_string()
        } else if self.plan.has_overrides() {
            "Custom (per-year overrides)".to_string()
        } else {
            "Custom".to_string()
        };
        let line = Line::from(vec![
            Span::styled("Backroads Reclamation", Style::default().fg(gold()).add_modifier(Modifier::BOLD)),
            Span::raw(" | Investor Portal | "),
            Span::styled(self.view.display_name(), Style::default().fg(Color::White)),
            Span::styled(format!(" | scenario: {scenario}"), Style::default().fg(Color::Gray)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(0)])
            .split(area);

        self.draw_controls(frame, chunks[0]);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No projection available.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, chunks[1]);
            return;
        };

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(10), Constraint::Length(7)])
            .split(chunks[1]);

        self.draw_cards(frame, main[0], run);
        self.draw_charts(frame, main[1], run);
        draw_table(frame, main[2], run);
    }

    fn draw_controls(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let mut titles = vec!["All Years"];
        titles.extend(YEAR_LABELS);
        let tabs = Tabs::new(titles)
            .select(self.scope.tab_index())
            .block(Block::default().borders(Borders::ALL).title("Scope"))
            .highlight_style(Style::default().fg(gold()).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, chunks[0]);

        let items: Vec<ListItem> = Knob::ALL
            .iter()
            .map(|&knob| {
                let range = self.bounds.range(knob);
                let (value, pinned) = match self.scope {
                    Scope::Global => (self.plan.global.get(knob), false),
                    Scope::Year(y) => (self.plan.value(y, knob), self.plan.is_overridden(y, knob)),
                };
                let marker = if pinned { "*" } else { " " };
                ListItem::new(format!(
                    "{:<24}{marker}{:>6}  [{}..{}]",
                    knob.display_name(),
                    fmt_variance(value),
                    fmt_variance(range.min),
                    fmt_variance(range.max),
                ))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Scenario Controls").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(gold()))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_knob));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_cards(&self, frame: &mut ratatui::Frame<'_>, area: Rect, run: &RunOutput) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        for (rect, (label, value, note)) in cells.iter().zip(metric_cards(&run.summary, self.view)) {
            let mut spans = vec![Span::styled(value, Style::default().fg(gold()).add_modifier(Modifier::BOLD))];
            if let Some(note) = note {
                spans.push(Span::styled(format!("  {note}"), Style::default().fg(Color::Green)));
            }
            let p = Paragraph::new(Line::from(spans))
                .block(Block::default().borders(Borders::LEFT | Borders::TOP).title(label));
            frame.render_widget(p, *rect);
        }
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect, run: &RunOutput) {
        match self.view {
            DashboardView::Revenue => draw_chart(frame, area, &revenue_chart(&run.results)),
            DashboardView::Cash => {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(area);
                draw_chart(frame, halves[0], &cash_chart(&run.results));
                let walk = LiquidityWalk::for_year(&run.results[1]);
                draw_chart(frame, halves[1], &liquidity_walk_chart(&walk));
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ ±1%  PgUp/PgDn ±5%  Tab scope  x unpin  v view  0 reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_chart(frame: &mut ratatui::Frame<'_>, area: Rect, chart: &BarChart) {
    let block = Block::default().title(chart.title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Clear, inner);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let mut legend = Vec::new();
    for kind in chart.legend() {
        let (r, g, b) = series_rgb(kind);
        legend.push(Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))));
        legend.push(Span::raw(format!("{}  ", kind.display_name())));
    }
    frame.render_widget(Paragraph::new(Line::from(legend)), parts[0]);

    let widget = BarChartWidget {
        chart,
        fmt_y: fmt_axis_millions,
    };
    frame.render_widget(widget, parts[1]);
}

fn draw_table(frame: &mut ratatui::Frame<'_>, area: Rect, run: &RunOutput) {
    let header = Row::new(
        ["Year", "Lumber", "Other", "Total Revenue", "Margin", "ERA", "Total Cash", "Base Case"]
            .into_iter()
            .map(|h| Cell::from(h).style(Style::default().fg(gold()))),
    );
    let rows = run.results.iter().map(|r| {
        Row::new(vec![
            Cell::from(r.label()),
            Cell::from(fmt_currency(r.lumber_revenue)),
            Cell::from(fmt_currency(r.other_revenue())),
            Cell::from(fmt_currency(r.total_revenue)),
            Cell::from(fmt_currency(r.margin)),
            Cell::from(fmt_currency(r.era_grant)),
            Cell::from(fmt_currency(r.cash_available)),
            Cell::from(fmt_currency(r.revenue_target)),
        ])
    });
    let widths = [Constraint::Length(7)]
        .into_iter()
        .chain(std::iter::repeat_n(Constraint::Length(13), 7));
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Raw Financial Data").borders(Borders::ALL));
    frame.render_widget(table, area);
}

fn scope_name(scope: Scope) -> String {
    match scope {
        Scope::Global => "all years".to_string(),
        Scope::Year(y) => format!("Year {}", y + 1),
    }
}

fn gold() -> Color {
    let (r, g, b) = GOLD;
    Color::Rgb(r, g, b)
}

fn fmt_axis_millions(v: f64) -> String {
    fmt_millions(v, 1)
}
