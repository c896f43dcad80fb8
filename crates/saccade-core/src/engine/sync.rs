//! Debounced autosave of the position/configuration snapshot.

use alloc::string::String;

use log::warn;

use crate::store::{PersistedState, StateStore};
use crate::timing::TimingConfig;

use super::STATE_SAVE_DEBOUNCE_MS;

pub(super) struct StateSync {
    last_saved: Option<PersistedState>,
    pending: Option<(PersistedState, u64)>,
}

impl StateSync {
    pub(super) fn new(initial: Option<PersistedState>) -> Self {
        Self {
            last_saved: initial,
            pending: None,
        }
    }

    /// Records the current snapshot as pending once it diverges from the
    /// last written one. Repeated changes keep pushing the debounce window.
    pub(super) fn track_current(
        &mut self,
        timing: &TimingConfig,
        book_name: Option<&str>,
        current_index: usize,
        now_ms: u64,
    ) {
        if self
            .last_saved
            .as_ref()
            .is_some_and(|saved| snapshot_matches(saved, timing, book_name, current_index))
        {
            return;
        }

        let matches_pending = self
            .pending
            .as_ref()
            .is_some_and(|(pending, _)| snapshot_matches(pending, timing, book_name, current_index));
        if !matches_pending {
            let snapshot = PersistedState {
                timing: *timing,
                book_name: book_name.map(String::from),
                current_index,
            };
            self.pending = Some((snapshot, now_ms));
        }
    }

    /// Writes the pending snapshot once it has sat unchanged for the
    /// debounce window.
    pub(super) fn flush_if_due<S: StateStore>(&mut self, store: &mut S, now_ms: u64) {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, changed_at)| {
                now_ms.saturating_sub(*changed_at) >= STATE_SAVE_DEBOUNCE_MS
            });
        if due {
            self.write_pending(store, now_ms);
        }
    }

    /// Immediate best-effort write, skipping the debounce window.
    pub(super) fn flush_now<S: StateStore>(&mut self, store: &mut S, now_ms: u64) {
        if self.pending.is_some() {
            self.write_pending(store, now_ms);
        }
    }

    fn write_pending<S: StateStore>(&mut self, store: &mut S, now_ms: u64) {
        let Some((candidate, _)) = self.pending.take() else {
            return;
        };

        match store.save(&candidate) {
            Ok(()) => {
                self.last_saved = Some(candidate);
            }
            Err(_) => {
                // Keep the snapshot pending and retry after another window.
                warn!("position save failed; retrying later");
                self.pending = Some((candidate, now_ms));
            }
        }
    }
}

fn snapshot_matches(
    state: &PersistedState,
    timing: &TimingConfig,
    book_name: Option<&str>,
    current_index: usize,
) -> bool {
    state.current_index == current_index
        && state.book_name.as_deref() == book_name
        && state.timing == *timing
}
