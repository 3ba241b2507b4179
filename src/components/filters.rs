//! Filter bar - start/end date inputs and the query trigger
//!
//! Owns focus. The typed values live in the report's `DateRange`; this
//! component only turns keys into edit actions and draws what it is given.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::filter_bar_layout;
use crate::model::range::{DateRange, RangeField};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Longest value a date input accepts (`YYYY-MM-DD`)
const MAX_DATE_LEN: usize = 10;

/// Which control receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Start,
    End,
    Trigger,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Start => Focus::End,
            Focus::End => Focus::Trigger,
            Focus::Trigger => Focus::Start,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Start => Focus::Trigger,
            Focus::End => Focus::Start,
            Focus::Trigger => Focus::End,
        }
    }

    pub fn field(self) -> Option<RangeField> {
        match self {
            Focus::Start => Some(RangeField::Start),
            Focus::End => Some(RangeField::End),
            Focus::Trigger => None,
        }
    }
}

pub struct FiltersComponent {
    pub focus: Focus,
    range: DateRange,
    trigger_enabled: bool,
}

impl Default for FiltersComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl FiltersComponent {
    pub fn new() -> Self {
        Self {
            focus: Focus::Start,
            range: DateRange::default(),
            trigger_enabled: true,
        }
    }

    /// Snapshot of the values to draw
    pub fn set_state(&mut self, range: &DateRange, trigger_enabled: bool) {
        self.range = range.clone();
        self.trigger_enabled = trigger_enabled;
    }

    /// Apply an edit action to `range` for the focused input.
    ///
    /// Returns true when the range changed.
    pub fn edit(&self, range: &mut DateRange, action: &Action) -> bool {
        let Some(field) = self.focus.field() else {
            return false;
        };
        let value = range.field_mut(field);

        match action {
            Action::DateInput(c) if (c.is_ascii_digit() || *c == '-') && value.len() < MAX_DATE_LEN => {
                value.push(*c);
                true
            }
            Action::DateBackspace => value.pop().is_some(),
            Action::ClearField if !value.is_empty() => {
                value.clear();
                true
            }
            _ => false,
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, label: &str, field: RangeField) {
        let focused = self.focus.field() == Some(field);
        let value = self.range.field(field);

        let (border, text) = if focused {
            (Color::Cyan, format!("{}_", value))
        } else if value.is_empty() {
            (Color::DarkGray, "YYYY-MM-DD".to_string())
        } else {
            (Color::DarkGray, value.to_string())
        };
        let text_style = if value.is_empty() && !focused {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        let paragraph = Paragraph::new(Line::from(Span::styled(text, text_style))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ", label)),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_trigger(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Trigger;
        let (label, style) = if self.trigger_enabled {
            let mut style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
            if focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            (" Calculate Commissions ", style)
        } else {
            (" Loading... ", Style::default().fg(Color::DarkGray))
        };

        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let paragraph = Paragraph::new(Line::from(Span::styled(label, style)))
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        frame.render_widget(paragraph, area);
    }
}

impl Component for FiltersComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let editing = self.focus.field().is_some();
        let action = match key.code {
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrev),
            KeyCode::Enter => Some(Action::RunQuery),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) && editing => {
                Some(Action::ClearField)
            }
            KeyCode::Char(c) if editing && (c.is_ascii_digit() || c == '-') => {
                Some(Action::DateInput(c))
            }
            KeyCode::Backspace if editing => Some(Action::DateBackspace),
            KeyCode::Char(' ') if !editing => Some(Action::RunQuery),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let [start_area, end_area, trigger_area] = filter_bar_layout(area);

        self.render_input(frame, start_area, "Start Date", RangeField::Start);
        self.render_input(frame, end_area, "End Date", RangeField::End);
        self.render_trigger(frame, trigger_area);
        Ok(())
    }
}
