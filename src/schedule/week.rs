use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::event::Event;

pub const DAYS_PER_WEEK: usize = 7;
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
const WEEK_ID_FORMAT: &str = "%Y-%m-%d";

pub const DEFAULT_DAY_LABELS: [&str; DAYS_PER_WEEK] = [
    "Thứ Hai",
    "Thứ Ba",
    "Thứ Tư",
    "Thứ Năm",
    "Thứ Sáu",
    "Thứ Bảy",
    "Chủ Nhật",
];

/// Key of one stored week: the `YYYY-MM-DD` date of its Monday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekId(String);

impl WeekId {
    pub fn for_date(date: NaiveDate) -> Self {
        Self(monday_of(date).format(WEEK_ID_FORMAT).to_string())
    }

    /// Parses an identifier, accepting only dates that fall on a Monday.
    pub fn parse(value: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(value, WEEK_ID_FORMAT).ok()?;
        (monday_of(date) == date).then(|| Self(value.to_string()))
    }

    pub fn monday(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, WEEK_ID_FORMAT).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(days_from_monday))
        .unwrap_or(date)
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Seven Monday-first day-of-week labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLabels([String; DAYS_PER_WEEK]);

impl DayLabels {
    pub fn from_labels(labels: Vec<String>) -> Option<Self> {
        let labels: [String; DAYS_PER_WEEK] = labels.try_into().ok()?;
        Some(Self(labels))
    }

    pub fn label(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or_default()
    }
}

impl Default for DayLabels {
    fn default() -> Self {
        Self(DEFAULT_DAY_LABELS.map(String::from))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub date: String,
    pub day_of_week: String,
    pub events: Vec<Event>,
}

impl Day {
    pub fn new(date: NaiveDate, label: &str) -> Self {
        Self {
            date: format_display_date(date),
            day_of_week: label.to_string(),
            events: Vec::new(),
        }
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DISPLAY_DATE_FORMAT).ok()
    }

    pub fn find_event(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.id == event_id)
    }
}

/// A week's days in display order. Complete snapshots hold exactly seven.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSnapshot {
    pub days: Vec<Day>,
}

impl WeekSnapshot {
    pub fn blank(monday: NaiveDate, labels: &DayLabels) -> Self {
        let days = (0..DAYS_PER_WEEK)
            .filter_map(|offset| {
                let date = monday.checked_add_days(Days::new(offset as u64))?;
                Some(Day::new(date, labels.label(offset)))
            })
            .collect();
        Self { days }
    }

    pub fn is_complete(&self) -> bool {
        self.days.len() == DAYS_PER_WEEK
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    pub fn day_mut(&mut self, index: usize) -> Option<&mut Day> {
        self.days.get_mut(index)
    }

    pub fn event_count(&self) -> usize {
        self.days.iter().map(|day| day.events.len()).sum()
    }

    /// Display dates of the first and last day.
    pub fn date_range(&self) -> Option<(&str, &str)> {
        let first = self.days.first()?;
        let last = self.days.last()?;
        Some((first.date.as_str(), last.date.as_str()))
    }
}

/// Shape of one persisted week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRecord {
    pub week_id: WeekId,
    pub schedule: WeekSnapshot,
}
