//! Session accounting: turns play/pause activity into committable records.

use alloc::string::String;

use log::debug;

use crate::stats::{SessionRecord, UNTITLED_BOOK};

/// Idle time after the last stop before an accumulated session commits.
pub const IDLE_COMMIT_MS: u64 = 60_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PlaySegment {
    start_ms: u64,
    start_index: usize,
}

/// Accumulates words read and time spent across play segments until a commit.
///
/// One segment spans a contiguous run of playback; several segments separated
/// by short pauses merge into a single session record, committed once the
/// reader has been idle for [`IDLE_COMMIT_MS`] or on an explicit flush.
pub struct SessionTracker {
    book_name: Option<String>,
    accumulated_words: u32,
    accumulated_ms: u64,
    segment: Option<PlaySegment>,
    idle_deadline_ms: Option<u64>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            book_name: None,
            accumulated_words: 0,
            accumulated_ms: 0,
            segment: None,
            idle_deadline_ms: None,
        }
    }

    /// Names the book the next committed session is attributed to. Does not
    /// commit anything pending; empty names count as unset.
    pub fn set_book_name(&mut self, name: Option<&str>) {
        self.book_name = name.filter(|name| !name.is_empty()).map(String::from);
    }

    pub fn book_name(&self) -> Option<&str> {
        self.book_name.as_deref()
    }

    /// Opens a play segment at `index`. Cancels a pending idle commit so a
    /// quick resume keeps extending the same session.
    pub fn segment_opened(&mut self, now_ms: u64, index: usize) {
        self.idle_deadline_ms = None;
        if self.segment.is_none() {
            self.segment = Some(PlaySegment {
                start_ms: now_ms,
                start_index: index,
            });
        }
    }

    /// Closes the open segment at `index`, folding its words and duration
    /// into the accumulators, and arms the idle deadline once at least one
    /// full second has accumulated.
    pub fn segment_closed(&mut self, now_ms: u64, index: usize) {
        let Some(segment) = self.segment.take() else {
            return;
        };

        let words = index.saturating_sub(segment.start_index) as u32;
        self.accumulated_words = self.accumulated_words.saturating_add(words);
        self.accumulated_ms = self
            .accumulated_ms
            .saturating_add(now_ms.saturating_sub(segment.start_ms));
        debug!(
            "segment closed: +{} words, {} ms pending",
            words, self.accumulated_ms
        );

        if self.live_elapsed_secs(now_ms) > 0 {
            self.idle_deadline_ms = Some(now_ms + IDLE_COMMIT_MS);
        }
    }

    pub fn is_segment_open(&self) -> bool {
        self.segment.is_some()
    }

    /// Uncommitted reading time including the open segment, if any.
    pub fn live_elapsed_ms(&self, now_ms: u64) -> u64 {
        let running = self
            .segment
            .map(|segment| now_ms.saturating_sub(segment.start_ms))
            .unwrap_or(0);
        self.accumulated_ms.saturating_add(running)
    }

    /// The per-second display counter value backing the live elapsed readout.
    pub fn live_elapsed_secs(&self, now_ms: u64) -> u64 {
        self.live_elapsed_ms(now_ms) / 1_000
    }

    pub fn idle_commit_due(&self, now_ms: u64) -> bool {
        self.idle_deadline_ms
            .is_some_and(|deadline| now_ms >= deadline)
    }

    /// Commits the pending session: closes any open segment at
    /// `current_index`, zeroes the accumulators, and returns the record to
    /// persist. Returns `None` when nothing accumulated.
    pub fn take_session(&mut self, now_ms: u64, current_index: usize) -> Option<SessionRecord> {
        if self.segment.is_some() {
            self.segment_closed(now_ms, current_index);
        }
        self.idle_deadline_ms = None;

        if self.accumulated_words == 0 && self.accumulated_ms == 0 {
            return None;
        }

        let words_read = core::mem::take(&mut self.accumulated_words);
        let reading_time_ms = core::mem::take(&mut self.accumulated_ms);
        Some(SessionRecord {
            book_name: self
                .book_name
                .clone()
                .unwrap_or_else(|| String::from(UNTITLED_BOOK)),
            words_read,
            reading_time_ms,
            timestamp_ms: now_ms,
        })
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
