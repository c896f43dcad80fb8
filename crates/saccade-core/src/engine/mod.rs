//! Engine facade wiring playback, session accounting, and persistence.

use log::{debug, warn};

use crate::player::{PlaybackState, Player, TickResult};
use crate::session::SessionTracker;
use crate::stats::ReadingStats;
use crate::store::{PersistedState, StateStore, StatsStore};
use crate::timing::{TimingConfig, TimingConfigPatch};
use crate::tokenize::TimedUnit;

use sync::StateSync;

mod sync;

/// Quiet time after a position or configuration change before the snapshot
/// is written out.
pub const STATE_SAVE_DEBOUNCE_MS: u64 = 1_500;

/// Composes the playback scheduler with session accounting and the
/// persistence seams. Hosts construct one per reading surface, feed it
/// control calls, and drive [`ReaderEngine::tick`] from their frame loop
/// with a monotonically non-decreasing `now_ms`.
///
/// Drive ticks with epoch milliseconds if committed sessions should carry
/// absolute timestamps; the engine itself only ever compares differences.
pub struct ReaderEngine<SS, TS>
where
    SS: StateStore,
    TS: StatsStore,
{
    player: Player,
    session: SessionTracker,
    stats: ReadingStats,
    state_store: SS,
    stats_store: TS,
    sync: StateSync,
    saved_index: Option<usize>,
    last_live_secs: Option<u64>,
    pending_redraw: bool,
}

impl<SS, TS> ReaderEngine<SS, TS>
where
    SS: StateStore,
    TS: StatsStore,
{
    /// Loads persisted configuration and statistics, falling back to
    /// defaults when the stores are empty or unavailable.
    pub fn new(mut state_store: SS, mut stats_store: TS) -> Self {
        let saved = match state_store.load() {
            Ok(saved) => saved,
            Err(_) => {
                warn!("state load failed; starting with defaults");
                None
            }
        };
        let stats = match stats_store.load() {
            Ok(stats) => stats.unwrap_or_default(),
            Err(_) => {
                warn!("statistics load failed; starting empty");
                ReadingStats::default()
            }
        };

        let timing = saved
            .as_ref()
            .map(|state| state.timing)
            .unwrap_or_default();
        let mut session = SessionTracker::new();
        session.set_book_name(saved.as_ref().and_then(|state| state.book_name.as_deref()));
        let saved_index = saved.as_ref().map(|state| state.current_index);

        Self {
            player: Player::new(timing),
            session,
            stats,
            state_store,
            stats_store,
            sync: StateSync::new(saved),
            saved_index,
            last_live_secs: None,
            pending_redraw: true,
        }
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.player.state()
    }

    pub fn current_unit(&self) -> Option<&TimedUnit> {
        self.player.current_unit()
    }

    pub fn current_index(&self) -> usize {
        self.player.current_index()
    }

    pub fn unit_count(&self) -> usize {
        self.player.unit_count()
    }

    pub fn progress_percent(&self) -> f32 {
        self.player.progress_percent()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.player.elapsed_ms()
    }

    pub fn total_ms(&self) -> u64 {
        self.player.total_ms()
    }

    pub fn raw_text(&self) -> &str {
        self.player.raw_text()
    }

    pub fn timing(&self) -> &TimingConfig {
        self.player.timing()
    }

    pub fn stats(&self) -> &ReadingStats {
        &self.stats
    }

    pub fn book_name(&self) -> Option<&str> {
        self.session.book_name()
    }

    /// Uncommitted reading time shown by the live session counter.
    pub fn live_elapsed_secs(&self, now_ms: u64) -> u64 {
        self.session.live_elapsed_secs(now_ms)
    }

    /// Reading position found in the state store at startup, for hosts that
    /// resume via [`ReaderEngine::restore_position`] once text is available.
    pub fn saved_resume_index(&self) -> Option<usize> {
        self.saved_index
    }

    /// Hands the store backends back, e.g. at host shutdown.
    pub fn into_stores(self) -> (SS, TS) {
        (self.state_store, self.stats_store)
    }
}

include!("controls.rs");
include!("runtime.rs");
