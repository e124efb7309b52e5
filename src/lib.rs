pub mod schedule;
pub mod storage;
pub mod session;
pub mod app;
pub mod input;
pub mod ui;

pub use app::{AppState, Mode, SaveStatus};
pub use schedule::{Event, EventFields, WeekId, WeekSnapshot};
pub use session::{resolve_current_week_id, ScheduleSession};
pub use storage::{SqliteWeekStore, StoreError, WeekStore};
