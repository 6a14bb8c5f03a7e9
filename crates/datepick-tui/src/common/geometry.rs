use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Helper function to create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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

/// A `width` x `height` popup placed under `anchor`, shifted to stay on screen
pub fn anchored_below(screen: Rect, anchor: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(screen.width);
    let height = height.min(screen.height);
    let x = anchor.x.min(screen.x + screen.width.saturating_sub(width));
    let y = (anchor.y + anchor.height).min(screen.y + screen.height.saturating_sub(height));
    Rect {
        x,
        y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored_below_fits() {
        let screen = Rect::new(0, 0, 100, 40);
        let anchor = Rect::new(10, 2, 30, 3);
        assert_eq!(anchored_below(screen, anchor, 50, 20), Rect::new(10, 5, 50, 20));
    }

    #[test]
    fn test_anchored_below_shifts_on_screen() {
        let screen = Rect::new(0, 0, 60, 20);
        let anchor = Rect::new(40, 15, 10, 3);
        assert_eq!(anchored_below(screen, anchor, 30, 10), Rect::new(30, 10, 30, 10));
    }
}
