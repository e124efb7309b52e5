use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

use crate::schedule::{WeekId, WeekRecord, WeekSnapshot};
use crate::storage::connection::{LazyConnection, SharedConnection, StoreLocation};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Malformed week record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Week {week_id} holds {found} days instead of 7")]
    IncompleteWeek { week_id: WeekId, found: usize },
}

/// Durable mapping from week identifier to the whole week's schedule.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeekStore: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored for `week_id`.
    async fn get(&self, week_id: &WeekId) -> Result<Option<WeekSnapshot>, StoreError>;

    /// Replaces whatever is stored for `week_id` with `snapshot`.
    async fn put(&self, week_id: &WeekId, snapshot: &WeekSnapshot) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: WeekStore + ?Sized> WeekStore for Arc<S> {
    async fn get(&self, week_id: &WeekId) -> Result<Option<WeekSnapshot>, StoreError> {
        (**self).get(week_id).await
    }

    async fn put(&self, week_id: &WeekId, snapshot: &WeekSnapshot) -> Result<(), StoreError> {
        (**self).put(week_id, snapshot).await
    }
}

pub(crate) fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schedules (
            week_id TEXT PRIMARY KEY,
            data TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// SQLite-backed week store whose connection is opened on first use.
pub struct SqliteWeekStore {
    connection: LazyConnection,
}

static SHARED_STORE: OnceLock<Arc<SqliteWeekStore>> = OnceLock::new();

impl SqliteWeekStore {
    pub fn new(location: StoreLocation) -> Self {
        Self {
            connection: LazyConnection::new(location),
        }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreLocation::File(path.into()))
    }

    pub fn in_memory() -> Self {
        Self::new(StoreLocation::Memory)
    }

    /// Process-wide store. The first caller decides the database path.
    pub fn shared(path: &Path) -> Arc<Self> {
        let store = SHARED_STORE.get_or_init(|| Arc::new(Self::at_path(path)));
        if store.location() != &StoreLocation::File(path.to_path_buf()) {
            tracing::warn!(
                requested = %path.display(),
                "shared week store already bound to another location"
            );
        }
        Arc::clone(store)
    }

    pub fn location(&self) -> &StoreLocation {
        self.connection.location()
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_open()
    }
}

#[async_trait]
impl WeekStore for SqliteWeekStore {
    async fn get(&self, week_id: &WeekId) -> Result<Option<WeekSnapshot>, StoreError> {
        let conn = self.connection.get().await?;
        let key = week_id.clone();
        let snapshot = run_blocking(move || load_week(&conn, &key)).await?;
        tracing::debug!(week_id = %week_id, found = snapshot.is_some(), "loaded week");
        Ok(snapshot)
    }

    async fn put(&self, week_id: &WeekId, snapshot: &WeekSnapshot) -> Result<(), StoreError> {
        if !snapshot.is_complete() {
            return Err(StoreError::IncompleteWeek {
                week_id: week_id.clone(),
                found: snapshot.days.len(),
            });
        }

        let record = WeekRecord {
            week_id: week_id.clone(),
            schedule: snapshot.clone(),
        };
        let data = serde_json::to_string(&record)?;
        let conn = self.connection.get().await?;
        let key = week_id.clone();
        run_blocking(move || store_week(&conn, &key, &data)).await?;
        tracing::debug!(week_id = %week_id, events = snapshot.event_count(), "stored week");
        Ok(())
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| StoreError::StorageUnavailable(format!("storage worker failed: {}", e)))?
}

fn load_week(conn: &SharedConnection, week_id: &WeekId) -> Result<Option<WeekSnapshot>, StoreError> {
    let conn = conn
        .lock()
        .map_err(|_| StoreError::StorageUnavailable("connection lock poisoned".to_string()))?;

    let data: Option<String> = conn
        .query_row(
            "SELECT data FROM schedules WHERE week_id = ?1",
            [week_id.as_str()],
            |row| row.get(0),
        )
        .optional()?;

    let Some(data) = data else {
        return Ok(None);
    };

    let record: WeekRecord = serde_json::from_str(&data)?;
    if !record.schedule.is_complete() {
        return Err(StoreError::IncompleteWeek {
            week_id: week_id.clone(),
            found: record.schedule.days.len(),
        });
    }
    Ok(Some(record.schedule))
}

fn store_week(conn: &SharedConnection, week_id: &WeekId, data: &str) -> Result<(), StoreError> {
    let conn = conn
        .lock()
        .map_err(|_| StoreError::StorageUnavailable("connection lock poisoned".to_string()))?;

    conn.execute(
        "INSERT OR REPLACE INTO schedules (week_id, data, updated_at)
         VALUES (?1, ?2, ?3)",
        rusqlite::params![
            week_id.as_str(),
            data,
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{DayLabels, Event, EventFields};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
    }

    fn week_id() -> WeekId {
        WeekId::for_date(monday())
    }

    fn blank_week() -> WeekSnapshot {
        WeekSnapshot::blank(monday(), &DayLabels::default())
    }

    fn week_with_event(content: &str) -> WeekSnapshot {
        let mut week = blank_week();
        week.days[2].events.push(Event::create(
            EventFields {
                content: content.to_string(),
                ..EventFields::default()
            },
            1_700_000_000_000,
        ));
        week
    }

    fn table_exists(store: &SqliteWeekStore, name: &str) -> bool {
        let conn = store.connection.opened().unwrap();
        let conn = conn.lock().unwrap();
        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap_or(0);
        count > 0
    }

    #[tokio::test]
    async fn connection_opens_lazily_with_schema() {
        let store = SqliteWeekStore::in_memory();
        assert!(!store.is_open());

        store.get(&week_id()).await.unwrap();

        assert!(store.is_open());
        assert!(table_exists(&store, "schedules"));
    }

    #[tokio::test]
    async fn missing_week_returns_none() {
        let store = SqliteWeekStore::in_memory();

        let loaded = store.get(&week_id()).await.unwrap();

        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = SqliteWeekStore::in_memory();
        let week = week_with_event("Sync");

        store.put(&week_id(), &week).await.unwrap();
        let loaded = store.get(&week_id()).await.unwrap();

        assert_eq!(loaded, Some(week));
    }

    #[tokio::test]
    async fn put_overwrites_whole_week() {
        let store = SqliteWeekStore::in_memory();
        store.put(&week_id(), &week_with_event("First")).await.unwrap();

        store.put(&week_id(), &blank_week()).await.unwrap();

        let loaded = store.get(&week_id()).await.unwrap().unwrap();
        assert_eq!(loaded.event_count(), 0);
    }

    #[tokio::test]
    async fn weeks_are_stored_independently() {
        let store = SqliteWeekStore::in_memory();
        let next_week = WeekId::parse("2025-01-20").unwrap();
        store.put(&week_id(), &week_with_event("This week")).await.unwrap();

        assert!(store.get(&next_week).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_rejects_incomplete_week() {
        let store = SqliteWeekStore::in_memory();

        let err = store.put(&week_id(), &WeekSnapshot::default()).await.unwrap_err();

        assert!(matches!(err, StoreError::IncompleteWeek { found: 0, .. }));
    }

    #[tokio::test]
    async fn data_survives_reopening_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedules.db");
        let week = week_with_event("Persisted");

        SqliteWeekStore::at_path(&path).put(&week_id(), &week).await.unwrap();
        let reopened = SqliteWeekStore::at_path(&path);

        assert_eq!(reopened.get(&week_id()).await.unwrap(), Some(week));
    }

    #[tokio::test]
    async fn failed_open_makes_every_call_fail_fast() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let store = SqliteWeekStore::at_path(blocker.path().join("schedules.db"));

        let first = store.get(&week_id()).await.unwrap_err();
        let second = store.put(&week_id(), &blank_week()).await.unwrap_err();

        assert!(matches!(first, StoreError::StorageUnavailable(_)));
        assert!(matches!(second, StoreError::StorageUnavailable(_)));
        assert!(!store.is_open());
    }

    #[tokio::test]
    async fn malformed_record_is_reported() {
        let store = SqliteWeekStore::in_memory();
        store.put(&week_id(), &blank_week()).await.unwrap();
        {
            let conn = store.connection.opened().unwrap();
            let conn = conn.lock().unwrap();
            conn.execute("UPDATE schedules SET data = 'not json'", []).unwrap();
        }

        let err = store.get(&week_id()).await.unwrap_err();

        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
