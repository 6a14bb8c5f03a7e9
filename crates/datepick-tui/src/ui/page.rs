use crate::common::centered_rect;
use crate::logger::LogBuffer;
use crate::stores::PickerView;
use datepick_core::PickerValue;
use itertools::Itertools;
use log::Level;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const CLOSED_KEYS: [(&str, &str); 5] = [
    ("Enter", "열기"),
    ("Tab", "다음 항목"),
    ("x", "초기화"),
    ("?", "도움말"),
    ("q", "종료"),
];

const OPEN_KEYS: [(&str, &str); 7] = [
    ("←↑↓→", "날짜 이동"),
    ("Enter", "선택"),
    ("Tab", "시작/종료"),
    ("[ ]", "월 이동"),
    ("y/m", "연/월 목록"),
    ("a", "적용"),
    ("Esc", "취소"),
];

pub fn render_title(frame: &mut Frame, area: Rect, views: &[PickerView]) {
    let mode = match views.first() {
        Some(view) if view.range_mode => "기간 선택",
        Some(_) => "단일 날짜",
        None => "",
    };
    let line = Line::from(vec![
        Span::styled(
            " datepick ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {mode} · 인스턴스 {}개", views.len())),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn value_text(view: &PickerView) -> String {
    if view.value.is_empty() {
        return match view.value {
            PickerValue::Range(..) => "YYYY-MM-DD ~ YYYY-MM-DD".to_string(),
            PickerValue::Single(_) => "YYYY-MM-DD".to_string(),
        };
    }
    view.value.to_string()
}

pub fn render_field(
    frame: &mut Frame,
    area: Rect,
    view: &PickerView,
    active: bool,
    validation: Option<&str>,
) {
    let border = if active { Color::Cyan } else { Color::Gray };
    let mut block = Block::default()
        .title(view.id.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    if let Some(message) = validation {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }
    let text_style = if view.value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(value_text(view), text_style)).block(block),
        area,
    );
}

pub fn render_activity(frame: &mut Frame, area: Rect, log_buffer: &LogBuffer, count: usize) {
    let lines: Vec<Line> = log_buffer
        .get_recent_logs(count)
        .into_iter()
        .map(|entry| {
            let color = match entry.level {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Green,
                _ => Color::DarkGray,
            };
            Line::from(Span::styled(entry.format(), Style::default().fg(color)))
        })
        .collect();
    let block = Block::default()
        .title(format!(" 활동 ({}) ", log_buffer.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_footer(frame: &mut Frame, area: Rect, picker_open: bool) {
    let keys: &[(&str, &str)] = if picker_open { &OPEN_KEYS } else { &CLOSED_KEYS };
    let legend = keys
        .iter()
        .map(|(key, label)| format!("{key} {label}"))
        .join("  ·  ");
    frame.render_widget(
        Paragraph::new(Span::styled(legend, Style::default().fg(Color::DarkGray))),
        area,
    );
}

pub fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    let mut lines = vec![
        Line::from(Span::styled(
            "키 안내",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        CLOSED_KEYS
            .iter()
            .chain(OPEN_KEYS.iter())
            .chain([("1-6", "빠른 기간"), ("{ }", "연 이동"), ("x", "초기화")].iter())
            .unique_by(|(key, _)| *key)
            .map(|(key, label)| {
                Line::from(vec![
                    Span::styled(format!("{key:>8}  "), Style::default().fg(Color::Yellow)),
                    Span::raw(*label),
                ])
            }),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().title(" 도움말 ").borders(Borders::ALL)),
        area,
    );
}
