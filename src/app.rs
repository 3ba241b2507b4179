//! Root application component
//!
//! App routes key events to the focused component, applies Actions to the
//! report controller, and hands each child the slice of state it draws.
//! Query logic lives in `CommissionsReport`, not here.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, FiltersComponent, HelpDialog, QuitDialog, ResultsComponent,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::report::CommissionsReport;
use crate::services::CommissionSource;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::Arc;

pub struct App {
    pub config: Config,

    /// Date range, query state and background fetches
    pub report: CommissionsReport,

    pub modals: ModalStack,

    pub should_quit: bool,

    /// One-line hint shown above the help bar
    pub status_message: Option<String>,

    // Child Components
    pub filters: FiltersComponent,
    pub results: ResultsComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    pub fn new(config: Config, source: Arc<dyn CommissionSource>) -> App {
        App {
            config,
            report: CommissionsReport::new(source),
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            filters: FiltersComponent::new(),
            results: ResultsComponent::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog,
        }
    }

    /// Push the report's current state into the child components
    fn sync_components(&mut self) {
        let view = self.report.view();
        self.filters
            .set_state(&self.report.range, view.trigger_enabled);
        self.results.set_view(view);
    }

    fn run_query(&mut self) {
        // The trigger is disabled while a query is in flight
        if self.report.is_loading() {
            self.status_message = Some("A query is already running".to_string());
            return;
        }
        self.status_message = None;
        self.report.start_query();
        self.sync_components();
    }

    /// Keys that work anywhere on the main screen
    fn handle_global_key_event(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('r') => Some(Action::RunQuery),
            KeyCode::Char('d') => Some(Action::ResetRange),
            _ => None,
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                " Commissions Calculator ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", self.config.api_url),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &str| {
            Span::styled(
                format!(" {} ", k),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let mut spans = vec![
            key("Tab"),
            Span::raw("Focus  "),
            key("Enter/r"),
            Span::raw("Calculate  "),
            key("d"),
            Span::raw("Defaults  "),
            key("j/k"),
            Span::raw("Scroll  "),
            key("?"),
            Span::raw("Help  "),
            key("q"),
            Span::raw("Quit"),
        ];
        if let Some(ref msg) = self.status_message {
            spans.push(Span::styled(
                format!("   {}", msg),
                Style::default().fg(Color::Magenta),
            ));
        }

        let help = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

impl Component for App {
    fn init(&mut self) -> Result<()> {
        // Same path as the manual trigger
        self.report.initialize(self.config.default_range());
        self.sync_components();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        match self.modals.top() {
            Some(Modal::QuitConfirm) => return self.quit_dialog.handle_key_event(key),
            Some(Modal::Help) => return self.help_dialog.handle_key_event(key),
            None => {}
        }

        if let Some(action) = self.filters.handle_key_event(key)? {
            return Ok(Some(action));
        }
        if let Some(action) = self.results.handle_key_event(key)? {
            return Ok(Some(action));
        }
        Ok(self.handle_global_key_event(key))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!("action: {}", action);
        }

        match action {
            // App Lifecycle
            Action::Tick => {
                if self.report.poll() {
                    if self.report.state().is_terminal() {
                        self.status_message = None;
                    }
                    self.sync_components();
                }
                self.results.update(Action::Tick)?;
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // Date Inputs
            Action::FocusNext | Action::FocusPrev => {
                self.filters.update(action)?;
            }
            Action::DateInput(_) | Action::DateBackspace | Action::ClearField => {
                if self.filters.edit(&mut self.report.range, &action) {
                    self.sync_components();
                }
            }
            Action::ResetRange => {
                self.report.range = self.config.default_range();
                self.status_message = Some("Default range restored".to_string());
                self.sync_components();
            }

            // Query
            Action::RunQuery => self.run_query(),

            // Results (delegate to ResultsComponent)
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.results.update(action)?;
            }

            // Modals
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                if self.modals.top() == Some(&Modal::Help) {
                    self.modals.pop();
                } else {
                    self.modals.push(Modal::Help);
                }
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if self.modals.top() == Some(&Modal::QuitConfirm) {
                    self.should_quit = true;
                }
                self.modals.pop();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.sync_components();
        let layout = calculate_main_layout(area);

        self.draw_title(frame, layout.title);
        self.filters.draw(frame, layout.filters)?;
        self.results.draw(frame, layout.results)?;
        self.draw_help_bar(frame, layout.help);

        match self.modals.top() {
            Some(Modal::QuitConfirm) => self.quit_dialog.draw(frame, area)?,
            Some(Modal::Help) => self.help_dialog.draw(frame, area)?,
            None => {}
        }

        Ok(())
    }
}
