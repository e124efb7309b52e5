use crossterm::event::KeyCode;
use crate::app::AppState;

/// Text editing inside the event form. Enter and Esc are handled by the caller.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    let Some(form) = state.event_form.as_mut() else {
        return;
    };

    match key {
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.prev_field(),
        KeyCode::Backspace => {
            form.active_value_mut().pop();
        }
        KeyCode::Char(c) => form.active_value_mut().push(c),
        _ => {}
    }
}
