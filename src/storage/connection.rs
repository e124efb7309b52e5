use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rusqlite::Connection;
use tokio::sync::OnceCell;

use crate::storage::week_store::{initialize_schema, StoreError};

pub type SharedConnection = Arc<Mutex<Connection>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

/// A connection that is opened at most once, on first use.
///
/// A failed open is remembered: later callers get `StorageUnavailable`
/// immediately instead of retrying. Concurrent first callers wait on the
/// same open attempt.
pub struct LazyConnection {
    location: StoreLocation,
    cell: OnceCell<Result<SharedConnection, String>>,
}

impl LazyConnection {
    pub fn new(location: StoreLocation) -> Self {
        Self {
            location,
            cell: OnceCell::new(),
        }
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    pub async fn get(&self) -> Result<SharedConnection, StoreError> {
        let opened = self.cell.get_or_init(|| self.open()).await;
        opened.clone().map_err(StoreError::StorageUnavailable)
    }

    pub fn opened(&self) -> Option<SharedConnection> {
        match self.cell.get() {
            Some(Ok(conn)) => Some(Arc::clone(conn)),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.opened().is_some()
    }

    async fn open(&self) -> Result<SharedConnection, String> {
        let started_at = Instant::now();
        let location = self.location.clone();
        tracing::info!(location = ?self.location, "opening week store");

        let result = tokio::task::spawn_blocking(move || open_connection(&location))
            .await
            .map_err(|e| format!("storage open task failed: {}", e))
            .and_then(|opened| opened.map_err(|e| e.to_string()));

        match result {
            Ok(conn) => {
                tracing::info!(
                    duration_ms = started_at.elapsed().as_millis() as u64,
                    "week store opened"
                );
                Ok(Arc::new(Mutex::new(conn)))
            }
            Err(e) => {
                tracing::error!(
                    duration_ms = started_at.elapsed().as_millis() as u64,
                    error = %e,
                    "failed to open week store"
                );
                Err(e)
            }
        }
    }
}

fn open_connection(location: &StoreLocation) -> Result<Connection, StoreError> {
    let conn = match location {
        StoreLocation::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::StorageUnavailable(format!(
                        "cannot create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
            Connection::open(path)?
        }
        StoreLocation::Memory => Connection::open_in_memory()?,
    };

    conn.busy_timeout(Duration::from_secs(5))?;
    initialize_schema(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_once_and_reuses_handle() {
        let lazy = LazyConnection::new(StoreLocation::Memory);

        let first = lazy.get().await.unwrap();
        let second = lazy.get().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn concurrent_first_use_shares_one_open() {
        let lazy = Arc::new(LazyConnection::new(StoreLocation::Memory));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                tokio::spawn(async move { lazy.get().await.unwrap() })
            })
            .collect();

        let mut conns = Vec::new();
        for handle in handles {
            conns.push(handle.await.unwrap());
        }

        assert!(conns.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("schedules.db");
        let lazy = LazyConnection::new(StoreLocation::File(path.clone()));

        lazy.get().await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn remembers_failed_open() {
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let lazy = LazyConnection::new(StoreLocation::File(blocker.path().join("schedules.db")));

        assert!(lazy.get().await.is_err());
        assert!(!lazy.is_open());
        assert!(matches!(lazy.get().await, Err(StoreError::StorageUnavailable(_))));
    }
}
