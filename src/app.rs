use crate::schedule::{Day, Event, EventFields, WeekId, WeekSnapshot, DEFAULT_RECENCY_WINDOW_MS, DAYS_PER_WEEK};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
    ConfirmDelete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    Loading,
    Saved,
    Unsaved(String),
    Error(String),
}

pub struct AppState {
    pub mode: Mode,
    pub schedule: WeekSnapshot,
    pub week_id: Option<WeekId>,
    pub selected_day: usize,
    pub selected_event_index: usize,
    pub event_form: Option<EventForm>,
    pub delete_confirmation_event_id: Option<String>,
    pub save_status: SaveStatus,
    pub show_help: bool,
    pub theme: Theme,
    pub title: String,
    pub subtitle: String,
    pub recency_window_ms: i64,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EventForm {
    pub day_index: usize,
    pub time: String,
    pub location: String,
    pub content: String,
    pub preparation: String,
    pub host: String,
    pub participants: String,
    pub active_field: FormField,
    pub editing: Option<Event>,
}

impl EventForm {
    pub fn new(day_index: usize) -> Self {
        Self {
            day_index,
            time: String::new(),
            location: String::new(),
            content: String::new(),
            preparation: String::new(),
            host: String::new(),
            participants: String::new(),
            active_field: FormField::Time,
            editing: None,
        }
    }

    pub fn for_event(day_index: usize, event: &Event) -> Self {
        let fields = event.fields();
        Self {
            day_index,
            time: fields.time,
            location: fields.location,
            content: fields.content,
            preparation: fields.preparation,
            host: fields.host,
            participants: fields.participants,
            active_field: FormField::Time,
            editing: Some(event.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Time => FormField::Location,
            FormField::Location => FormField::Content,
            FormField::Content => FormField::Preparation,
            FormField::Preparation => FormField::Host,
            FormField::Host => FormField::Participants,
            FormField::Participants => FormField::Time,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Time => FormField::Participants,
            FormField::Location => FormField::Time,
            FormField::Content => FormField::Location,
            FormField::Preparation => FormField::Content,
            FormField::Host => FormField::Preparation,
            FormField::Participants => FormField::Host,
        };
    }

    pub fn value(&self, field: &FormField) -> &str {
        match field {
            FormField::Time => &self.time,
            FormField::Location => &self.location,
            FormField::Content => &self.content,
            FormField::Preparation => &self.preparation,
            FormField::Host => &self.host,
            FormField::Participants => &self.participants,
        }
    }

    pub fn active_value_mut(&mut self) -> &mut String {
        match self.active_field {
            FormField::Time => &mut self.time,
            FormField::Location => &mut self.location,
            FormField::Content => &mut self.content,
            FormField::Preparation => &mut self.preparation,
            FormField::Host => &mut self.host,
            FormField::Participants => &mut self.participants,
        }
    }

    /// First field left blank, in form order.
    pub fn missing_field(&self) -> Option<FormField> {
        FormField::ALL
            .into_iter()
            .find(|field| self.value(field).trim().is_empty())
    }

    pub fn to_fields(&self) -> EventFields {
        EventFields {
            time: self.time.trim().to_string(),
            location: self.location.trim().to_string(),
            content: self.content.trim().to_string(),
            preparation: self.preparation.trim().to_string(),
            host: self.host.trim().to_string(),
            participants: self.participants.trim().to_string(),
        }
    }

    /// The edited event with the form's text applied; `None` for a new event.
    pub fn updated_event(&self) -> Option<Event> {
        let mut event = self.editing.clone()?;
        event.apply_fields(self.to_fields());
        Some(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Time,
    Location,
    Content,
    Preparation,
    Host,
    Participants,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Time,
        FormField::Location,
        FormField::Content,
        FormField::Preparation,
        FormField::Host,
        FormField::Participants,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Time => "Thời gian",
            FormField::Location => "Địa điểm",
            FormField::Content => "Nội dung",
            FormField::Preparation => "Chuẩn bị",
            FormField::Host => "Chủ trì",
            FormField::Participants => "Thành phần",
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            schedule: WeekSnapshot::default(),
            week_id: None,
            selected_day: 0,
            selected_event_index: 0,
            event_form: None,
            delete_confirmation_event_id: None,
            save_status: SaveStatus::Loading,
            show_help: false,
            theme: Theme::default(),
            title: String::new(),
            subtitle: String::new(),
            recency_window_ms: DEFAULT_RECENCY_WINDOW_MS,
            message: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_header(mut self, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        self.title = title.into();
        self.subtitle = subtitle.into();
        self
    }

    pub fn with_recency_window(mut self, window_ms: i64) -> Self {
        self.recency_window_ms = window_ms;
        self
    }

    /// Installs a freshly loaded or mutated week, keeping the selection in range.
    pub fn set_schedule(&mut self, schedule: WeekSnapshot) {
        self.schedule = schedule;
        self.clamp_selection();
    }

    pub fn selected_day(&self) -> Option<&Day> {
        self.schedule.day(self.selected_day)
    }

    pub fn get_selected_event(&self) -> Option<&Event> {
        self.selected_day()?.events.get(self.selected_event_index)
    }

    pub fn select_day(&mut self, index: usize) {
        if index < self.schedule.days.len() {
            self.selected_day = index;
            self.reset_event_selection();
        }
    }

    pub fn move_day_left(&mut self) {
        if self.selected_day > 0 {
            self.select_day(self.selected_day - 1);
        }
    }

    pub fn move_day_right(&mut self) {
        if self.selected_day + 1 < DAYS_PER_WEEK {
            self.select_day(self.selected_day + 1);
        }
    }

    pub fn move_event_selection_down(&mut self) {
        let event_count = self.selected_day().map_or(0, |day| day.events.len());
        if event_count > 0 && self.selected_event_index < event_count - 1 {
            self.selected_event_index += 1;
        }
    }

    pub fn move_event_selection_up(&mut self) {
        if self.selected_event_index > 0 {
            self.selected_event_index -= 1;
        }
    }

    pub fn reset_event_selection(&mut self) {
        self.selected_event_index = 0;
    }

    fn clamp_selection(&mut self) {
        let last_day = self.schedule.days.len().saturating_sub(1);
        self.selected_day = self.selected_day.min(last_day);
        let event_count = self.selected_day().map_or(0, |day| day.events.len());
        self.selected_event_index = self.selected_event_index.min(event_count.saturating_sub(1));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::DayLabels;
    use chrono::NaiveDate;

    fn fields(content: &str) -> EventFields {
        EventFields {
            time: "08:00".to_string(),
            location: "Substation 3".to_string(),
            content: content.to_string(),
            preparation: "Meters".to_string(),
            host: "Lan".to_string(),
            participants: "Crew B".to_string(),
        }
    }

    fn week_with_events() -> WeekSnapshot {
        let monday = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        let mut week = WeekSnapshot::blank(monday, &DayLabels::default());
        week.days[1].events.push(Event::create(fields("Relay test"), 0));
        week.days[1].events.push(Event::create(fields("Cable check"), 0));
        week
    }

    #[test]
    fn new_app_starts_in_normal_mode_while_loading() {
        let app = AppState::new();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.save_status, SaveStatus::Loading);
        assert!(app.schedule.is_empty());
    }

    #[test]
    fn day_navigation_stays_within_week() {
        let mut app = AppState::new();
        app.set_schedule(week_with_events());

        app.move_day_left();
        assert_eq!(app.selected_day, 0);

        for _ in 0..10 {
            app.move_day_right();
        }
        assert_eq!(app.selected_day, 6);
    }

    #[test]
    fn event_selection_follows_selected_day() {
        let mut app = AppState::new();
        app.set_schedule(week_with_events());
        app.select_day(1);

        app.move_event_selection_down();
        app.move_event_selection_down();

        assert_eq!(app.selected_event_index, 1);
        assert_eq!(app.get_selected_event().map(|e| e.content.as_str()), Some("Cable check"));

        app.move_day_right();
        assert_eq!(app.selected_event_index, 0);
        assert!(app.get_selected_event().is_none());
    }

    #[test]
    fn set_schedule_clamps_stale_selection() {
        let mut app = AppState::new();
        app.set_schedule(week_with_events());
        app.select_day(1);
        app.selected_event_index = 1;

        let mut shorter = week_with_events();
        shorter.days[1].events.pop();
        app.set_schedule(shorter);

        assert_eq!(app.selected_event_index, 0);
    }

    #[test]
    fn empty_schedule_ignores_navigation() {
        let mut app = AppState::new();

        app.select_day(3);
        app.move_event_selection_down();

        assert_eq!(app.selected_day, 0);
        assert!(app.get_selected_event().is_none());
    }

    #[test]
    fn form_fields_cycle_in_both_directions() {
        let mut form = EventForm::new(0);
        assert_eq!(form.active_field, FormField::Time);

        for _ in 0..FormField::ALL.len() {
            form.next_field();
        }
        assert_eq!(form.active_field, FormField::Time);

        form.prev_field();
        assert_eq!(form.active_field, FormField::Participants);
    }

    #[test]
    fn missing_field_reports_first_blank_entry() {
        let mut form = EventForm::new(2);
        form.time = "08:00".to_string();
        form.location = "   ".to_string();

        assert_eq!(form.missing_field(), Some(FormField::Location));
    }

    #[test]
    fn complete_form_has_no_missing_field() {
        let event = Event::create(fields("Relay test"), 0);
        let form = EventForm::for_event(1, &event);

        assert_eq!(form.missing_field(), None);
        assert_eq!(form.to_fields(), fields("Relay test"));
    }

    #[test]
    fn updated_event_keeps_identity() {
        let event = Event::create(fields("Relay test"), 7);
        let mut form = EventForm::for_event(1, &event);
        form.content = " Relay retest ".to_string();

        let updated = form.updated_event().unwrap();

        assert_eq!(updated.id, event.id);
        assert_eq!(updated.content, "Relay retest");
        assert_eq!(updated.last_modified, Some(7));
        assert!(EventForm::new(1).updated_event().is_none());
    }
}
