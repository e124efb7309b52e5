pub mod event;
pub mod week;

pub use event::{DetailedParticipants, Event, EventFields, DEFAULT_RECENCY_WINDOW_MS};
pub use week::{Day, DayLabels, WeekId, WeekRecord, WeekSnapshot, DAYS_PER_WEEK};
