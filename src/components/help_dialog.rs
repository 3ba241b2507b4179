//! Help dialog component
//!
//! Lists the keyboard shortcuts.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Date Range",
        &[
            ("Tab / Shift-Tab", "Move between start, end and the trigger"),
            ("0-9  -", "Type into the focused date (YYYY-MM-DD)"),
            ("Backspace", "Delete last character"),
            ("Ctrl-u", "Clear the focused date"),
            ("d", "Restore the default range"),
        ],
    ),
    (
        "Query",
        &[
            ("Enter / r", "Calculate commissions (disabled while loading)"),
            ("Space", "Press the focused trigger"),
        ],
    ),
    (
        "Results",
        &[
            ("j / k", "Scroll one row"),
            ("PgDn / PgUp", "Scroll one page"),
        ],
    ),
    (
        "General",
        &[
            ("?", "Toggle this help"),
            ("q / Esc", "Quit (asks first)"),
            ("Ctrl-c", "Quit immediately"),
        ],
    ),
];

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog;

fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (section, keys) in SHORTCUTS {
        lines.push(Line::from(Span::styled(
            section.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<16}", key),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(description.to_string()),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
                Some(Action::CloseModal)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content = build_help_content();
        let height = (content.len() as u16).saturating_add(2);
        let popup_area = centered_popup(area, 64, height);

        frame.render_widget(Clear, popup_area);

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keyboard Shortcuts ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
