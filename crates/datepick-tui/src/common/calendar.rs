/// Calendar widget that draws one side of a picker from its precomputed grid
use datepick_core::calendar::WEEKDAY_LABELS;
use datepick_core::{CalendarGrid, DayKind, NavDirection};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Width of a bordered calendar: 7 cells of 3 columns plus borders
pub const CALENDAR_WIDTH: u16 = 7 * 3 + 3;

/// Header + weekday row + 6 weeks + borders
pub const CALENDAR_HEIGHT: u16 = 1 + 1 + 6 + 2;

pub struct CalendarWidget<'a> {
    grid: &'a CalendarGrid,
    title: &'a str,
    /// Day of the rendered month under the keyboard cursor
    focused_day: Option<u32>,
    direction: NavDirection,
    active: bool,
}

impl<'a> CalendarWidget<'a> {
    pub fn new(grid: &'a CalendarGrid, title: &'a str) -> Self {
        Self {
            grid,
            title,
            focused_day: None,
            direction: NavDirection::Unchanged,
            active: false,
        }
    }

    pub fn focused_day(mut self, day: Option<u32>) -> Self {
        self.focused_day = day;
        self
    }

    /// Marks the header with the direction of the last month change
    pub fn direction(mut self, direction: NavDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn header(&self) -> Line<'static> {
        let arrow = match self.direction {
            NavDirection::Forward => " ▶",
            NavDirection::Backward => "◀ ",
            NavDirection::Unchanged => "",
        };
        let label = format!("{}년 {:02}월", self.grid.cursor.year, self.grid.cursor.month);
        let text = match self.direction {
            NavDirection::Backward => format!("{arrow}{label}"),
            _ => format!("{label}{arrow}"),
        };
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    }
}

pub fn day_style(kind: DayKind) -> Style {
    match kind {
        DayKind::BeforeMonth | DayKind::AfterMonth => Style::default().fg(Color::DarkGray),
        DayKind::Current => Style::default().fg(Color::White),
        DayKind::Today => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        DayKind::Selected => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        DayKind::DateRange => Style::default().fg(Color::Yellow).bg(Color::DarkGray),
        DayKind::Disabled => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
    }
}

impl Widget for CalendarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![self.header()];

        lines.push(Line::from(
            WEEKDAY_LABELS
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let color = match i {
                        0 => Color::Red,
                        6 => Color::Blue,
                        _ => Color::Yellow,
                    };
                    // weekday labels are double width, pad to the 3-column cell
                    Span::styled(format!("{label} "), Style::default().fg(color))
                })
                .collect::<Vec<_>>(),
        ));

        for row in self.grid.rows() {
            let spans = row
                .iter()
                .map(|cell| {
                    let mut style = day_style(cell.kind);
                    if self.active && cell.kind.in_month() && self.focused_day == Some(cell.day) {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED);
                    }
                    Span::styled(format!("{:>2} ", cell.day), style)
                })
                .collect::<Vec<_>>();
            lines.push(Line::from(spans));
        }

        let border_color = if self.active { Color::Cyan } else { Color::Gray };
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use datepick_core::{DateCursor, GridRequest, SelectionState, Side, build_grid};

    fn grid() -> CalendarGrid {
        build_grid(&GridRequest {
            cursor: DateCursor { year: 2024, month: 5 },
            side: Side::Start,
            selected: None,
            bounds: SelectionState::default(),
            range_mode: true,
            today: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        })
        .unwrap()
    }

    fn rendered(widget: CalendarWidget<'_>) -> String {
        let area = Rect::new(0, 0, CALENDAR_WIDTH, CALENDAR_HEIGHT);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_header_and_days() {
        let grid = grid();
        let text = rendered(CalendarWidget::new(&grid, " 시작 "));
        assert!(text.contains("05"));
        assert!(text.contains("31"));
        assert!(text.contains("17"));
    }

    #[test]
    fn test_direction_arrow() {
        let grid = grid();
        let text = rendered(CalendarWidget::new(&grid, "").direction(NavDirection::Forward));
        assert!(text.contains('▶'));
    }

    #[test]
    fn test_today_style() {
        assert_eq!(day_style(DayKind::Today).fg, Some(Color::Green));
        assert_eq!(day_style(DayKind::Selected).bg, Some(Color::Yellow));
    }
}
