//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub title: Rect,
    pub filters: Rect,
    pub results: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Title, filter bar, results panel, help bar (top to bottom)
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    MainLayout {
        title: chunks[0],
        filters: chunks[1],
        results: chunks[2],
        help: chunks[3],
    }
}

/// Split the filter bar into start input, end input, and trigger button
pub fn filter_bar_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(26),
            Constraint::Length(26),
            Constraint::Min(0),
        ])
        .split(area);

    [chunks[0], chunks[1], chunks[2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_popup(area, 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        let small = Rect::new(0, 0, 20, 5);
        let popup = centered_popup(small, 40, 10);
        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 5);
    }

    #[test]
    fn test_main_layout_stacks_sections() {
        let layout = calculate_main_layout(Rect::new(0, 0, 120, 30));
        assert_eq!(layout.title.height, 1);
        assert_eq!(layout.filters.height, 3);
        assert_eq!(layout.help.height, 3);
        assert_eq!(layout.results.height, 23);
        assert_eq!(layout.results.y, 4);
    }
}
