//! The in-memory week currently on screen, kept in step with a [`WeekStore`].
//!
//! Every mutation is applied in memory first and then the whole week is
//! written back. A failed write is reported in the returned [`Mutation`]
//! but never undoes the in-memory change.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use thiserror::Error;

use crate::schedule::event::generate_event_id;
use crate::schedule::{DayLabels, Event, EventFields, WeekId, WeekSnapshot};
use crate::storage::{StoreError, WeekStore};

pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Day index {index} is outside 0..7 or not loaded")]
    InvalidIndex { index: usize },
}

#[derive(Debug)]
pub enum Persistence {
    Saved,
    /// Nothing changed, so nothing was written.
    Unchanged,
    Failed(StoreError),
}

impl Persistence {
    pub fn is_saved(&self) -> bool {
        matches!(self, Persistence::Saved)
    }

    pub fn failure(&self) -> Option<&StoreError> {
        match self {
            Persistence::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Outcome of one add/edit/delete call.
#[derive(Debug)]
pub struct Mutation {
    pub snapshot: WeekSnapshot,
    pub event_id: String,
    pub persistence: Persistence,
}

/// Identifier of the week containing `now`, in `now`'s own time zone.
pub fn resolve_current_week_id<Tz: TimeZone>(now: &DateTime<Tz>) -> WeekId {
    WeekId::for_date(now.date_naive())
}

pub struct ScheduleSession<S: WeekStore> {
    store: S,
    labels: DayLabels,
    clock: Clock,
    week_id: Option<WeekId>,
    snapshot: WeekSnapshot,
}

impl<S: WeekStore> ScheduleSession<S> {
    pub fn new(store: S, labels: DayLabels) -> Self {
        Self::with_clock(store, labels, Arc::new(Local::now))
    }

    pub fn with_clock(store: S, labels: DayLabels, clock: Clock) -> Self {
        Self {
            store,
            labels,
            clock,
            week_id: None,
            snapshot: WeekSnapshot::default(),
        }
    }

    pub fn week_id(&self) -> Option<&WeekId> {
        self.week_id.as_ref()
    }

    pub fn snapshot(&self) -> &WeekSnapshot {
        &self.snapshot
    }

    /// Loads the week containing `now`, creating and storing a blank one if needed.
    ///
    /// Store failures are logged and leave an empty schedule in place.
    pub async fn load_or_init(&mut self, now: DateTime<Local>) -> WeekSnapshot {
        let week_id = resolve_current_week_id(&now);

        self.snapshot = match self.fetch_or_create(&week_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(week_id = %week_id, error = %e, "failed to load or initialize week");
                WeekSnapshot::default()
            }
        };
        self.week_id = Some(week_id);
        self.snapshot.clone()
    }

    async fn fetch_or_create(&self, week_id: &WeekId) -> Result<WeekSnapshot, StoreError> {
        if let Some(stored) = self.store.get(week_id).await? {
            tracing::info!(week_id = %week_id, events = stored.event_count(), "loaded stored week");
            return Ok(stored);
        }

        let monday = week_id.monday().ok_or_else(|| {
            StoreError::StorageUnavailable(format!("unusable week id {}", week_id))
        })?;
        let blank = WeekSnapshot::blank(monday, &self.labels);
        self.store.put(week_id, &blank).await?;
        tracing::info!(week_id = %week_id, "initialized blank week");
        Ok(blank)
    }

    pub async fn add_event(
        &mut self,
        day_index: usize,
        fields: EventFields,
    ) -> Result<Mutation, SessionError> {
        let now_ms = self.now_ms();
        let day = self
            .snapshot
            .day_mut(day_index)
            .ok_or(SessionError::InvalidIndex { index: day_index })?;

        let mut event = Event::create(fields, now_ms);
        while day.find_event(&event.id).is_some() {
            event.id = generate_event_id();
        }
        let event_id = event.id.clone();
        day.events.push(event);

        tracing::info!(day_index, event_id = %event_id, "event added");
        Ok(self.persisted(event_id).await)
    }

    /// Replaces the event with `updated.id`, stamping a fresh modification time.
    ///
    /// An unknown id leaves the week untouched.
    pub async fn edit_event(
        &mut self,
        day_index: usize,
        updated: Event,
    ) -> Result<Mutation, SessionError> {
        let now_ms = self.now_ms();
        let day = self
            .snapshot
            .day_mut(day_index)
            .ok_or(SessionError::InvalidIndex { index: day_index })?;

        let Some(slot) = day.events.iter_mut().find(|event| event.id == updated.id) else {
            tracing::debug!(day_index, event_id = %updated.id, "edit ignored, event not found");
            return Ok(self.unchanged(updated.id));
        };

        *slot = Event {
            last_modified: Some(now_ms),
            ..updated
        };
        let event_id = slot.id.clone();

        tracing::info!(day_index, event_id = %event_id, "event edited");
        Ok(self.persisted(event_id).await)
    }

    /// Removes the event; deleting an id that is not there is a no-op.
    pub async fn delete_event(
        &mut self,
        day_index: usize,
        event_id: &str,
    ) -> Result<Mutation, SessionError> {
        let day = self
            .snapshot
            .day_mut(day_index)
            .ok_or(SessionError::InvalidIndex { index: day_index })?;

        let before = day.events.len();
        day.events.retain(|event| event.id != event_id);
        if day.events.len() == before {
            tracing::debug!(day_index, event_id, "delete ignored, event not found");
            return Ok(self.unchanged(event_id.to_string()));
        }

        tracing::info!(day_index, event_id, "event deleted");
        Ok(self.persisted(event_id.to_string()).await)
    }

    fn now_ms(&self) -> i64 {
        (self.clock)().timestamp_millis()
    }

    fn unchanged(&self, event_id: String) -> Mutation {
        Mutation {
            snapshot: self.snapshot.clone(),
            event_id,
            persistence: Persistence::Unchanged,
        }
    }

    async fn persisted(&self, event_id: String) -> Mutation {
        let persistence = match &self.week_id {
            Some(week_id) => match self.store.put(week_id, &self.snapshot).await {
                Ok(()) => Persistence::Saved,
                Err(e) => {
                    tracing::warn!(week_id = %week_id, error = %e, "week not saved, keeping local changes");
                    Persistence::Failed(e)
                }
            },
            None => Persistence::Failed(StoreError::StorageUnavailable(
                "no week has been loaded".to_string(),
            )),
        };

        Mutation {
            snapshot: self.snapshot.clone(),
            event_id,
            persistence,
        }
    }
}
