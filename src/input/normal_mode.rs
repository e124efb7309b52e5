use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::app::{AppState, EventForm, Mode};

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    if state.show_help {
        if matches!(key, KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc) {
            state.show_help = false;
        }
        return;
    }

    match key {
        KeyCode::Char('h') | KeyCode::Left => state.move_day_left(),
        KeyCode::Char('l') | KeyCode::Right => state.move_day_right(),
        KeyCode::Char('j') | KeyCode::Down => state.move_event_selection_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_event_selection_up(),
        KeyCode::Char('t') => jump_to_date(state, chrono::Local::now().date_naive()),
        KeyCode::Char('a') => enter_insert_mode(state),
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => enter_edit_mode(state),
        KeyCode::Char('x') => delete_selected_event(state),
        KeyCode::Char('?') => state.show_help = true,
        _ => {}
    }
}

/// Selects the day showing `date`, if it is part of the loaded week.
pub fn jump_to_date(state: &mut AppState, date: NaiveDate) {
    let index = state
        .schedule
        .days
        .iter()
        .position(|day| day.calendar_date() == Some(date));

    match index {
        Some(index) => state.select_day(index),
        None => state.message = Some("Today is not in the loaded week".to_string()),
    }
}

fn enter_insert_mode(state: &mut AppState) {
    if state.selected_day().is_none() {
        state.message = Some("No schedule loaded".to_string());
        return;
    }
    state.event_form = Some(EventForm::new(state.selected_day));
    state.message = None;
    state.mode = Mode::Insert;
}

fn enter_edit_mode(state: &mut AppState) {
    if let Some(event) = state.get_selected_event() {
        state.event_form = Some(EventForm::for_event(state.selected_day, event));
        state.message = None;
        state.mode = Mode::Insert;
    }
}

fn delete_selected_event(state: &mut AppState) {
    if let Some(event) = state.get_selected_event() {
        state.delete_confirmation_event_id = Some(event.id.clone());
        state.mode = Mode::ConfirmDelete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FormField;
    use crate::schedule::{DayLabels, Event, EventFields, WeekSnapshot};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn loaded_state() -> AppState {
        let mut week = WeekSnapshot::blank(date(2025, 1, 13), &DayLabels::default());
        week.days[2].events.push(Event::create(
            EventFields {
                content: "Transformer inspection".to_string(),
                ..EventFields::default()
            },
            0,
        ));
        let mut state = AppState::new();
        state.set_schedule(week);
        state
    }

    #[test]
    fn h_and_l_move_between_days() {
        let mut state = loaded_state();

        handle_key(KeyCode::Char('l'), &mut state);
        handle_key(KeyCode::Right, &mut state);
        assert_eq!(state.selected_day, 2);

        handle_key(KeyCode::Char('h'), &mut state);
        assert_eq!(state.selected_day, 1);
    }

    #[test]
    fn jump_to_date_selects_matching_day() {
        let mut state = loaded_state();

        jump_to_date(&mut state, date(2025, 1, 17));

        assert_eq!(state.selected_day, 4);
    }

    #[test]
    fn jump_to_date_outside_week_leaves_selection() {
        let mut state = loaded_state();
        state.select_day(3);

        jump_to_date(&mut state, date(2025, 2, 1));

        assert_eq!(state.selected_day, 3);
        assert!(state.message.is_some());
    }

    #[test]
    fn a_key_opens_blank_form_for_selected_day() {
        let mut state = loaded_state();
        state.select_day(5);

        handle_key(KeyCode::Char('a'), &mut state);

        assert_eq!(state.mode, Mode::Insert);
        let form = state.event_form.as_ref().unwrap();
        assert_eq!(form.day_index, 5);
        assert_eq!(form.active_field, FormField::Time);
        assert!(!form.is_editing());
    }

    #[test]
    fn a_key_without_schedule_stays_in_normal_mode() {
        let mut state = AppState::new();

        handle_key(KeyCode::Char('a'), &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.event_form.is_none());
    }

    #[test]
    fn enter_edits_selected_event() {
        let mut state = loaded_state();
        state.select_day(2);

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Insert);
        let form = state.event_form.as_ref().unwrap();
        assert!(form.is_editing());
        assert_eq!(form.content, "Transformer inspection");
    }

    #[test]
    fn edit_on_empty_day_does_nothing() {
        let mut state = loaded_state();

        handle_key(KeyCode::Char('e'), &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.event_form.is_none());
    }

    #[test]
    fn x_key_asks_for_delete_confirmation() {
        let mut state = loaded_state();
        state.select_day(2);
        let event_id = state.get_selected_event().unwrap().id.clone();

        handle_key(KeyCode::Char('x'), &mut state);

        assert_eq!(state.mode, Mode::ConfirmDelete);
        assert_eq!(state.delete_confirmation_event_id, Some(event_id));
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let mut state = loaded_state();

        handle_key(KeyCode::Char('?'), &mut state);
        handle_key(KeyCode::Char('l'), &mut state);
        assert!(state.show_help);
        assert_eq!(state.selected_day, 0);

        handle_key(KeyCode::Esc, &mut state);
        assert!(!state.show_help);
    }
}
