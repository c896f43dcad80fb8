use super::{PersistedState, StateStore, StatsStore};
use crate::stats::ReadingStats;

/// In-memory state store used during bring-up and in tests.
#[derive(Default, Debug, Clone)]
pub struct MemoryStateStore {
    pub saved: Option<PersistedState>,
    pub reject_reads: bool,
    pub reject_writes: bool,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PersistedState) -> Self {
        Self {
            saved: Some(state),
            ..Self::default()
        }
    }
}

impl StateStore for MemoryStateStore {
    type Error = ();

    fn load(&mut self) -> Result<Option<PersistedState>, Self::Error> {
        if self.reject_reads {
            return Err(());
        }
        Ok(self.saved.clone())
    }

    fn save(&mut self, state: &PersistedState) -> Result<(), Self::Error> {
        if self.reject_writes {
            return Err(());
        }
        self.saved = Some(state.clone());
        Ok(())
    }
}

/// In-memory statistics store used during bring-up and in tests.
#[derive(Default, Debug, Clone)]
pub struct MemoryStatsStore {
    pub saved: Option<ReadingStats>,
    pub reject_reads: bool,
    pub reject_writes: bool,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatsStore for MemoryStatsStore {
    type Error = ();

    fn load(&mut self) -> Result<Option<ReadingStats>, Self::Error> {
        if self.reject_reads {
            return Err(());
        }
        Ok(self.saved.clone())
    }

    fn save(&mut self, stats: &ReadingStats) -> Result<(), Self::Error> {
        if self.reject_writes {
            return Err(());
        }
        self.saved = Some(stats.clone());
        Ok(())
    }
}
