use chrono::NaiveDate;

use crate::app::AppState;
use crate::schedule::{Day, Event};

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub week_id: Option<String>,
    pub date_range: Option<(String, String)>,
    pub days: Vec<DayTable>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayTable {
    pub index: usize,
    pub date: String,
    pub label: String,
    pub is_today: bool,
    pub is_selected: bool,
    pub rows: Vec<EventRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub event_id: String,
    pub time: String,
    pub location: String,
    pub content: String,
    pub preparation: String,
    pub host: String,
    pub participants: String,
    pub participants_link: Option<String>,
    pub is_online: bool,
    pub is_selected: bool,
    pub is_new: bool,
}

impl WeekLayout {
    pub fn selected_table(&self) -> Option<&DayTable> {
        self.days.iter().find(|table| table.is_selected)
    }
}

/// Projects the loaded week into per-day tables as of `today` / `now_ms`.
///
/// The recency flag is derived here on every call and never stored.
pub fn calculate_layout(state: &AppState, today: NaiveDate, now_ms: i64) -> WeekLayout {
    let days = state
        .schedule
        .days
        .iter()
        .enumerate()
        .map(|(index, day)| build_day_table(state, index, day, today, now_ms))
        .collect();

    WeekLayout {
        week_id: state.week_id.as_ref().map(|id| id.to_string()),
        date_range: state
            .schedule
            .date_range()
            .map(|(first, last)| (first.to_string(), last.to_string())),
        days,
    }
}

fn build_day_table(
    state: &AppState,
    index: usize,
    day: &Day,
    today: NaiveDate,
    now_ms: i64,
) -> DayTable {
    let is_selected = index == state.selected_day;
    let rows = day
        .events
        .iter()
        .enumerate()
        .map(|(row, event)| {
            let highlighted = is_selected && row == state.selected_event_index;
            build_event_row(event, highlighted, now_ms, state.recency_window_ms)
        })
        .collect();

    DayTable {
        index,
        date: day.date.clone(),
        label: day.day_of_week.clone(),
        is_today: day.calendar_date() == Some(today),
        is_selected,
        rows,
    }
}

fn build_event_row(event: &Event, is_selected: bool, now_ms: i64, window_ms: i64) -> EventRow {
    let (participants, participants_link) = match &event.detailed_participants {
        Some(detail) => (detail.text.clone(), detail.link.clone()),
        None => (event.participants.clone(), None),
    };

    EventRow {
        event_id: event.id.clone(),
        time: event.time.clone(),
        location: event.location.clone(),
        content: event.content.clone(),
        preparation: event.preparation.clone(),
        host: event.host.clone(),
        participants,
        participants_link,
        is_online: event.is_online(),
        is_selected,
        is_new: event.is_recently_changed(now_ms, window_ms),
    }
}
