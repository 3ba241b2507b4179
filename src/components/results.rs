//! Results panel
//!
//! Shows exactly one of: loading indicator, error banner, results table,
//! or the "no results" notice, as decided by the render model.

use crate::action::Action;
use crate::component::Component;
use crate::components::table::{Align, Column, TableComponent};
use crate::model::commission::{format_money, ReportTotals, TABLE_HEADERS};
use crate::model::query::RenderModel;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Which region the panel currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsRegion {
    Blank,
    Loading,
    Error,
    Table,
    Notice,
}

pub struct ResultsComponent {
    view: RenderModel,
    table: TableComponent,
    spinner_frame: usize,
}

impl Default for ResultsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultsComponent {
    pub fn new() -> Self {
        Self {
            view: RenderModel::default(),
            table: TableComponent::new(),
            spinner_frame: 0,
        }
    }

    pub fn set_view(&mut self, view: RenderModel) {
        let footer = view.totals.as_ref().map(totals_line);
        self.table
            .set_data(table_columns(), view.rows.clone(), footer);
        self.view = view;
    }

    pub fn region(&self) -> ResultsRegion {
        if self.view.loading {
            ResultsRegion::Loading
        } else if self.view.error.is_some() {
            ResultsRegion::Error
        } else if !self.view.rows.is_empty() {
            ResultsRegion::Table
        } else if self.view.notice.is_some() {
            ResultsRegion::Notice
        } else {
            ResultsRegion::Blank
        }
    }

    fn render_message(frame: &mut Frame, area: Rect, title: &str, text: &str, color: Color) {
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {} ", title)),
        );
        frame.render_widget(paragraph, area);
    }
}

fn table_columns() -> Vec<Column> {
    TABLE_HEADERS
        .iter()
        .enumerate()
        .map(|(i, title)| {
            // Amount, rate and commission are numeric
            let align = if i >= 3 { Align::Right } else { Align::Left };
            Column::new(*title, align)
        })
        .collect()
}

fn totals_line(totals: &ReportTotals) -> String {
    format!(
        "{} sales  •  Total amount {}  •  Total commission {}",
        totals.records,
        format_money(totals.amount),
        format_money(totals.commission)
    )
}

impl Component for ResultsComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.region() != ResultsRegion::Table {
            return Ok(None);
        }
        self.table.handle_key_event(key)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if self.view.loading => {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
            }
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.table.update(action)?;
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.region() {
            ResultsRegion::Loading => {
                let text = format!("{} Loading commissions...", SPINNER[self.spinner_frame]);
                Self::render_message(frame, area, "Results", &text, Color::Cyan);
            }
            ResultsRegion::Error => {
                let text = self.view.error.clone().unwrap_or_default();
                Self::render_message(frame, area, "Error", &text, Color::Red);
            }
            ResultsRegion::Table => {
                self.table.draw(frame, area)?;
            }
            ResultsRegion::Notice => {
                let text = self.view.notice.clone().unwrap_or_default();
                Self::render_message(frame, area, "Results", &text, Color::Yellow);
            }
            ResultsRegion::Blank => {
                Self::render_message(
                    frame,
                    area,
                    "Results",
                    "Pick a date range and press Enter to calculate commissions.",
                    Color::DarkGray,
                );
            }
        }
        Ok(())
    }
}
