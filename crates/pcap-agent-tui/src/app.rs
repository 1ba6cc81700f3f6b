//! Top-level dashboard state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use crate::{
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        alerts::AlertsList,
        flows_table::FlowsTable,
        help::HelpPopup,
        overview::Overview,
        tab_bar::TabBar,
        text_view::TextView,
    },
    Dashboard,
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::{io, time::Duration};

const PAGE_STEP: usize = 10;
const NO_REPORT: &str = "No report. The LLM step was disabled or did not complete.";

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Overview,
    Flows,
    Alerts,
    Report,
    Prompt,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Overview,
        Panel::Flows,
        Panel::Alerts,
        Panel::Report,
        Panel::Prompt,
    ];

    pub fn index(self) -> usize {
        Panel::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "Overview",
            Panel::Flows => "Flows",
            Panel::Alerts => "Alerts",
            Panel::Report => "Report",
            Panel::Prompt => "Prompt",
        }
    }

    fn offset(self, step: isize) -> Panel {
        let len = Panel::ALL.len() as isize;
        let next = (self.index() as isize + step).rem_euclid(len);
        Panel::ALL[next as usize]
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub dashboard: Dashboard,
    pub panel: Panel,
    /// Scroll offset per panel, indexed by [`Panel::index`].
    pub scroll: [usize; 5],
    pub theme: Theme,
    pub show_help: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(dashboard: Dashboard, theme: Theme) -> Self {
        Self {
            dashboard,
            panel: Panel::Overview,
            scroll: [0; 5],
            theme,
            show_help: false,
            quit: false,
        }
    }

    pub fn report_text(&self) -> &str {
        self.dashboard.report.as_deref().unwrap_or(NO_REPORT)
    }

    /// Number of scrollable rows in `panel`.
    fn row_count(&self, panel: Panel) -> usize {
        match panel {
            Panel::Overview => 0,
            Panel::Flows => self.dashboard.charts.flows.len(),
            Panel::Alerts => self.dashboard.charts.alerts.len(),
            Panel::Report => self.report_text().lines().count(),
            Panel::Prompt => self.dashboard.prompt.lines().count(),
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.row_count(self.panel).saturating_sub(1);
        let slot = &mut self.scroll[self.panel.index()];
        *slot = (*slot as isize + delta).clamp(0, max as isize) as usize;
    }

    /// Apply one event. Pure state transition, no I/O.
    pub fn handle(&mut self, event: AppEvent) {
        if self.show_help {
            if matches!(event, AppEvent::Help | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::Help => self.show_help = true,
            AppEvent::NextPanel => self.panel = self.panel.offset(1),
            AppEvent::PrevPanel => self.panel = self.panel.offset(-1),
            AppEvent::SelectPanel(i) => {
                if let Some(panel) = Panel::ALL.get(i) {
                    self.panel = *panel;
                }
            }
            AppEvent::ScrollUp => self.scroll_by(-1),
            AppEvent::ScrollDown => self.scroll_by(1),
            AppEvent::PageUp => self.scroll_by(-(PAGE_STEP as isize)),
            AppEvent::PageDown => self.scroll_by(PAGE_STEP as isize),
            AppEvent::Top => self.scroll[self.panel.index()] = 0,
            AppEvent::Bottom => {
                self.scroll[self.panel.index()] = self.row_count(self.panel).saturating_sub(1)
            }
            AppEvent::Escape | AppEvent::Resize(_, _) => {}
        }
        tracing::trace!(panel = ?self.panel, scroll = ?self.scroll, "state updated");
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(dashboard: Dashboard, theme: Theme) -> Self {
        App { state: AppState::new(dashboard, theme) }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(50))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                if let Some(ev) = event::to_app_event(raw) {
                    tracing::debug!(panel = ?self.state.panel, event = ?ev, "key event");
                    self.state.handle(ev);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1)])
        .split(area);

    frame.render_widget(
        TabBar::new(&state.dashboard.title, state.panel, &state.theme),
        vert[0],
    );

    let body = vert[1];
    let scroll = state.scroll[state.panel.index()];
    let charts = &state.dashboard.charts;
    let theme = &state.theme;

    match state.panel {
        Panel::Overview => frame.render_widget(Overview::new(charts, theme), body),
        Panel::Flows => frame.render_widget(FlowsTable::new(&charts.flows, scroll, theme), body),
        Panel::Alerts => frame.render_widget(AlertsList::new(&charts.alerts, scroll, theme), body),
        Panel::Report => frame.render_widget(
            TextView::new("Report", state.report_text(), scroll, theme)
                .muted(state.dashboard.report.is_none()),
            body,
        ),
        Panel::Prompt => frame.render_widget(
            TextView::new("Prompt sent to the model", &state.dashboard.prompt, scroll, theme),
            body,
        ),
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
