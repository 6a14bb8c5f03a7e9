use crate::common::{CALENDAR_HEIGHT, CALENDAR_WIDTH, CalendarWidget, anchored_below};
use crate::stores::PickerView;
use crate::stores::picker_store::{DropdownView, SELECTOR_VISIBLE_ROWS};
use datepick_core::{CursorField, Preset, Side};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Inner width of the preset column
const PRESET_WIDTH: u16 = 12;

/// Message line + action legend
const FOOTER_LINES: u16 = 2;

/// Pads `text` with spaces to `width` terminal columns. Hangul occupies two columns.
fn pad_display(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - used))
}

fn popup_size(view: &PickerView) -> (u16, u16) {
    let calendars = if view.range_mode {
        CALENDAR_WIDTH * 2 + PRESET_WIDTH + 2
    } else {
        CALENDAR_WIDTH
    };
    (calendars + 2, CALENDAR_HEIGHT + FOOTER_LINES + 2)
}

pub fn render_picker_popup(frame: &mut Frame, anchor: Rect, view: &PickerView) {
    let (width, height) = popup_size(view);
    let area = anchored_below(frame.area(), anchor, width, height);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CALENDAR_HEIGHT),
            Constraint::Length(FOOTER_LINES),
        ])
        .split(inner);

    let columns = if view.range_mode {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(PRESET_WIDTH + 2),
                Constraint::Length(CALENDAR_WIDTH),
                Constraint::Length(CALENDAR_WIDTH),
            ])
            .split(rows[0])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CALENDAR_WIDTH)])
            .split(rows[0])
    };

    let (start_area, end_area) = if view.range_mode {
        render_presets(frame, columns[0], view);
        (columns[1], Some(columns[2]))
    } else {
        (columns[0], None)
    };

    if let Some(grid) = &view.start_grid {
        let title = if view.range_mode { " 시작일 " } else { " 날짜 " };
        frame.render_widget(calendar(view, Side::Start, grid, title), start_area);
    }
    if let (Some(grid), Some(end_area)) = (&view.end_grid, end_area) {
        frame.render_widget(calendar(view, Side::End, grid, " 종료일 "), end_area);
    }

    render_footer(frame, rows[1], view);

    if let Some(dropdown) = &view.dropdown {
        let side_area = match dropdown.id.side {
            Side::End => end_area.unwrap_or(start_area),
            Side::Start => start_area,
        };
        render_dropdown(frame, side_area, dropdown);
    }
}

fn calendar<'a>(
    view: &PickerView,
    side: Side,
    grid: &'a datepick_core::CalendarGrid,
    title: &'a str,
) -> CalendarWidget<'a> {
    let active = view.focused_side == side;
    let direction = match side {
        Side::Start => view.start_direction,
        Side::End => view.end_direction,
    };
    CalendarWidget::new(grid, title)
        .focused_day(active.then_some(view.focused_day))
        .direction(direction)
        .active(active)
}

fn render_presets(frame: &mut Frame, area: Rect, view: &PickerView) {
    let items: Vec<ListItem> = Preset::ALL
        .iter()
        .enumerate()
        .map(|(i, preset)| {
            let label = pad_display(preset.label(), PRESET_WIDTH as usize - 2);
            let style = if view.active_preset == Some(*preset) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(label, style),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().title(" 빠른 선택 ").borders(Borders::ALL)),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, view: &PickerView) {
    let message = match &view.message {
        Some(text) => Span::styled(
            text.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(view.value.to_string(), Style::default().fg(Color::Gray)),
    };
    let legend = Line::from(vec![
        Span::styled("[a] 적용", Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled("[Esc] 취소", Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled("[x] 초기화", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(vec![Line::from(message), legend]), area);
}

fn option_label(dropdown: &DropdownView, value: i32) -> String {
    match dropdown.id.field {
        CursorField::Year => format!("{value}년"),
        CursorField::Month => format!("{value:02}월"),
    }
}

/// Draws the open year or month list over its calendar, below the header row.
fn render_dropdown(frame: &mut Frame, calendar_area: Rect, dropdown: &DropdownView) {
    let width = 10.min(calendar_area.width);
    let height = (SELECTOR_VISIBLE_ROWS as u16 + 2).min(calendar_area.height.saturating_sub(2));
    let x = match dropdown.id.field {
        CursorField::Year => calendar_area.x + 1,
        CursorField::Month => calendar_area.x + calendar_area.width.saturating_sub(width + 1),
    };
    let area = Rect::new(x, calendar_area.y + 2, width, height);

    let items: Vec<ListItem> = dropdown
        .options
        .iter()
        .enumerate()
        .skip(dropdown.scroll)
        .take(SELECTOR_VISIBLE_ROWS)
        .map(|(i, value)| {
            let style = if i == dropdown.focused {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(option_label(dropdown, *value), style))
        })
        .collect();
    frame.render_widget(Clear, area);
    frame.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        area,
    );
}
