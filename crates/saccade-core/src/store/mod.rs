//! Persistence seams for configuration, position, and statistics.
//!
//! Backends are whole-snapshot: `load` reads everything the store has,
//! `save` replaces it. Failures are non-fatal to the engine; a dropped write
//! only means the next snapshot carries the data instead.

pub mod mock;

use alloc::string::String;

use crate::stats::ReadingStats;
use crate::timing::TimingConfig;

/// Position and configuration snapshot that should survive restarts.
#[derive(Clone, Debug, PartialEq)]
pub struct PersistedState {
    pub timing: TimingConfig,
    pub book_name: Option<String>,
    pub current_index: usize,
}

/// Abstract backend for the position/configuration snapshot.
pub trait StateStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedState>, Self::Error>;
    fn save(&mut self, state: &PersistedState) -> Result<(), Self::Error>;
}

/// Abstract backend for the statistics snapshot.
pub trait StatsStore {
    type Error;

    fn load(&mut self) -> Result<Option<ReadingStats>, Self::Error>;
    fn save(&mut self, stats: &ReadingStats) -> Result<(), Self::Error>;
}
