/// UI rendering modules
mod page;
mod popup;

use crate::logger::LogBuffer;
use crate::stores::{PickerStore, UIStore};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

/// Lines of the activity pane
const ACTIVITY_LINES: u16 = 8;

/// Draw the whole page: one input per picker, the activity log, the key legend and,
/// for the active picker, its popup.
pub fn render_layout(
    frame: &mut Frame,
    ui_store: &UIStore,
    pickers: &[PickerStore],
    log_buffer: &LogBuffer,
) {
    let ui_state = ui_store.get_state();
    let views: Vec<_> = pickers.iter().map(PickerStore::get_state).collect();

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(views.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(ACTIVITY_LINES + 2));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    page::render_title(frame, chunks[0], &views);
    for (i, view) in views.iter().enumerate() {
        let area = chunks[i + 1];
        let active = view.id == ui_state.active_picker;
        let validation = ui_state.validation.get(&view.id).map(String::as_str);
        page::render_field(frame, area, view, active, validation);
    }
    let tail = chunks.len();
    page::render_activity(frame, chunks[tail - 2], log_buffer, ACTIVITY_LINES as usize);
    page::render_footer(frame, chunks[tail - 1], views.iter().any(|view| view.is_open()));

    if let Some((i, view)) = views
        .iter()
        .enumerate()
        .find(|(_, view)| view.id == ui_state.active_picker && view.is_open())
    {
        popup::render_picker_popup(frame, chunks[i + 1], view);
    }

    if ui_state.show_help {
        page::render_help(frame);
    }
}
