pub mod json;
pub mod repository;

pub use json::JsonStatsStore;
pub use repository::{InMemoryStats, StatsRepository, Storage, StorageError};
