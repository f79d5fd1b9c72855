// src/models/mod.rs

//! Domain models for the dictionary application.

mod config;
mod entry;
mod wordnik;

// Re-export all public types
pub use config::{API_KEY_ENV, Config, StorageConfig, SyncConfig, WordnikConfig};
pub use entry::{DailyEntry, Definitions, StoredWord, WordKind};
pub use wordnik::{WordnikDefinition, WordnikWod};
