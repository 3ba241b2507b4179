//! Results table
//!
//! Renders headers, rows and an optional footer as styled lines inside a
//! scrollable panel. Column widths are measured in terminal cells.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow before its cells are truncated
const MAX_COLUMN_WIDTH: usize = 40;
const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub align: Align,
}

impl Column {
    pub fn new(title: impl Into<String>, align: Align) -> Self {
        Self {
            title: title.into(),
            align,
        }
    }
}

pub struct TableComponent {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    footer: Option<String>,
    scroll: usize,
}

impl Default for TableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TableComponent {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            footer: None,
            scroll: 0,
        }
    }

    /// Replace the table contents. Scroll resets only when the rows change.
    pub fn set_data(&mut self, columns: Vec<Column>, rows: Vec<Vec<String>>, footer: Option<String>) {
        if rows != self.rows {
            self.scroll = 0;
        }
        self.columns = columns;
        self.rows = rows;
        self.footer = footer;
    }

    #[cfg(test)]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn render_lines(&self) -> Vec<Line<'static>> {
        Self::build_table_lines(&self.columns, &self.rows, self.footer.as_deref())
    }

    /// Build table lines from columns and rows
    pub fn build_table_lines(
        columns: &[Column],
        rows: &[Vec<String>],
        footer: Option<&str>,
    ) -> Vec<Line<'static>> {
        if columns.is_empty() {
            return Vec::new();
        }

        let mut col_widths: Vec<usize> = columns.iter().map(|c| c.title.width()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(col_widths.len()) {
                col_widths[i] = col_widths[i].max(cell.width());
            }
        }
        for width in &mut col_widths {
            *width = (*width).min(MAX_COLUMN_WIDTH);
        }

        let mut lines = Vec::with_capacity(rows.len() + 4);

        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let header_cells: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
        lines.push(build_row(&header_cells, columns, &col_widths, header_style));

        let separator: String = col_widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        for row in rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            lines.push(build_row(
                &cells,
                columns,
                &col_widths,
                Style::default().fg(Color::White),
            ));
        }

        if let Some(footer) = footer {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                footer.to_string(),
                Style::default().fg(Color::Yellow),
            )));
        }

        lines
    }
}

fn build_row(cells: &[&str], columns: &[Column], widths: &[usize], style: Style) -> Line<'static> {
    let spans: Vec<Span> = widths
        .iter()
        .enumerate()
        .flat_map(|(i, &width)| {
            let cell = cells.get(i).copied().unwrap_or("");
            let align = columns.get(i).map(|c| c.align).unwrap_or(Align::Left);
            let text = pad(&truncate(cell, width), width, align);
            let mut spans = vec![Span::styled(text, style)];
            if i + 1 < widths.len() {
                spans.push(Span::raw(" │ "));
            }
            spans
        })
        .collect();
    Line::from(spans)
}

/// Cut `text` to `width` cells, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }

    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if width > 0 {
        out.push('…');
    }
    out
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

impl Component for TableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let max_scroll = self.rows.len().saturating_sub(1);
        match action {
            Action::ScrollDown => {
                if self.scroll < max_scroll {
                    self.scroll += 1;
                }
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            Action::PageDown => {
                self.scroll = (self.scroll + PAGE_SIZE).min(max_scroll);
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE_SIZE);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content = self.render_lines();
        let visible_height = area.height.saturating_sub(2) as usize;
        let total = content.len();

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Commission Results ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .scroll((self.scroll as u16, 0));

        frame.render_widget(paragraph, area);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Name", Align::Left),
            Column::new("Amount", Align::Right),
        ]
    }

    #[test]
    fn test_build_lines_header_rows_footer() {
        let rows = vec![
            vec!["Ana".to_string(), "$1000.00".to_string()],
            vec!["José".to_string(), "$5.00".to_string()],
        ];
        let lines = TableComponent::build_table_lines(&columns(), &rows, Some("Total: 2"));

        assert_eq!(lines.len(), 6);
        assert_eq!(line_text(&lines[0]), "Name │   Amount");
        assert_eq!(line_text(&lines[2]), "Ana  │ $1000.00");
        assert_eq!(line_text(&lines[3]), "José │    $5.00");
        assert_eq!(line_text(&lines[5]), "Total: 2");
    }

    #[test]
    fn test_no_columns_renders_nothing() {
        assert!(TableComponent::build_table_lines(&[], &[], None).is_empty());
    }

    #[test]
    fn test_truncate_by_display_width() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
        assert_eq!(truncate("ñandú", 3), "ña…");
    }

    #[test]
    fn test_scroll_clamped() {
        let mut table = TableComponent::new();
        let rows: Vec<Vec<String>> = (0..3).map(|i| vec![i.to_string()]).collect();
        table.set_data(vec![Column::new("n", Align::Left)], rows, None);

        table.update(Action::PageDown).unwrap();
        assert_eq!(table.scroll(), 2);
        table.update(Action::ScrollDown).unwrap();
        assert_eq!(table.scroll(), 2);
        table.update(Action::PageUp).unwrap();
        assert_eq!(table.scroll(), 0);
    }

    #[test]
    fn test_set_same_rows_keeps_scroll() {
        let mut table = TableComponent::new();
        let rows: Vec<Vec<String>> = (0..5).map(|i| vec![i.to_string()]).collect();
        table.set_data(columns(), rows.clone(), None);
        table.update(Action::ScrollDown).unwrap();

        table.set_data(columns(), rows, None);
        assert_eq!(table.scroll(), 1);

        table.set_data(columns(), vec![], None);
        assert_eq!(table.scroll(), 0);
    }
}
