pub mod config;
pub mod connection;
pub mod week_store;

pub use connection::StoreLocation;
pub use week_store::{SqliteWeekStore, StoreError, WeekStore};
