//! Ratatui-based terminal form.
//!
//! The TUI lists the six house fields, lets the user adjust them within their
//! ranges, and on submit shows the estimated price, price per square foot, and
//! per-category scores next to the market-average benchmark.

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
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::ValuationService;
use crate::domain::{Field, HouseInput};
use crate::error::{AppError, EXIT_IO};
use crate::report::Valuation;

/// Index of the "Calculate" row below the fields.
const SUBMIT_ROW: usize = Field::ALL.len();

/// Start the TUI.
pub fn run(service: ValuationService) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(service);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_IO, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_IO, format!("Failed to enter alternate screen: {e}")));
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

struct App {
    service: ValuationService,
    input: HouseInput,
    selected: usize,
    status: String,
    result: Option<Valuation>,
}

impl App {
    fn new(service: ValuationService) -> Self {
        let status = match service.load_error() {
            Some(_) => "Model bundle missing; valuation disabled.".to_string(),
            None => "Adjust the fields and press Enter.".to_string(),
        };
        Self {
            service,
            input: HouseInput::default(),
            selected: 0,
            status,
            result: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_IO, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_IO, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_IO, format!("Event read error: {e}")))? {
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

    /// Apply a key press. Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(SUBMIT_ROW),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::PageDown => self.adjust(-10),
            KeyCode::PageUp => self.adjust(10),
            KeyCode::Enter | KeyCode::Char('c') => self.submit(),
            KeyCode::Char('r') => {
                self.input = HouseInput::default();
                self.result = None;
                self.status = "Reset to defaults.".to_string();
            }
            _ => {}
        }
        false
    }

    fn adjust(&mut self, steps: i64) {
        let Some(&field) = Field::ALL.get(self.selected) else {
            return;
        };
        self.input.nudge(field, steps);
        self.status = format!("{}: {}", field.label(), self.input.get(field));
    }

    fn submit(&mut self) {
        match self.service.value(&self.input) {
            Ok(valuation) => {
                self.status = if valuation.estimate.clamped {
                    "Valued (model output below display floor).".to_string()
                } else {
                    "Valued.".to_string()
                };
                self.result = Some(valuation);
            }
            Err(err) => {
                self.result = None;
                self.status = err.to_string();
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let model = match self.service.bundle() {
            Some(bundle) => format!(
                "model: {} | features: {}",
                bundle.label().unwrap_or("unlabeled"),
                bundle.features().len()
            ),
            None => "model: unavailable".to_string(),
        };
        let line = Line::from(vec![
            Span::styled("propai", Style::default().fg(Color::Cyan)),
            Span::raw(" - house valuation | "),
            Span::styled(model, Style::default().fg(Color::Gray)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(0)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items: Vec<ListItem> = Field::ALL
            .iter()
            .map(|&f| {
                let (min, max) = f.range();
                ListItem::new(format!("{:<15} {:>6}  [{min}-{max}]", f.label(), self.input.get(f)))
            })
            .collect();
        items.push(ListItem::new("[ Calculate value ]"));

        let list = List::new(items)
            .block(Block::default().title("House").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Valuation").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(err) = self.service.load_error() {
            let msg = Paragraph::new(format!("{err}\n\nProvide a bundle with --bundle or PROPAI_BUNDLE."))
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true });
            frame.render_widget(msg, inner);
            return;
        }

        let Some(valuation) = &self.result else {
            let msg = Paragraph::new("Press Enter to value this house.").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let n_scores = valuation.scores.len() as u16;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Length(n_scores * 2), Constraint::Min(0)])
            .split(inner);

        let mut lines = vec![Line::from(vec![
            Span::raw("Estimated value: "),
            Span::styled(
                format!("{:.0}", valuation.estimate.price),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ])];
        if let Some(ppsf) = valuation.price_per_sqft {
            lines.push(Line::from(format!("Per sq ft: {ppsf:.2}")));
        }
        if valuation.estimate.clamped {
            lines.push(Line::from(Span::styled(
                format!("model output {:.0} raised to display floor", valuation.estimate.raw),
                Style::default().fg(Color::Yellow),
            )));
        }
        frame.render_widget(Paragraph::new(Text::from(lines)), rows[0]);

        let gauge_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(2); valuation.scores.len()])
            .split(rows[1]);
        for (score, rect) in valuation.scores.iter().zip(gauge_rows.iter()) {
            let gauge = Gauge::default()
                .ratio(score.score.clamp(0.0, 1.0))
                .label(format!(
                    "{} {:.2} (market {:.2})",
                    score.category.display_name(),
                    score.score,
                    score.market_average
                ))
                .gauge_style(Style::default().fg(gauge_color(score.score, score.market_average)));
            frame.render_widget(gauge, *rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn x10  Enter calculate  r reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn gauge_color(score: f64, market: f64) -> Color {
    if score >= market { Color::Green } else { Color::Blue }
}
