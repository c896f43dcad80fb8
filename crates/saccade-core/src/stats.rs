//! Durable reading statistics: per-book and global totals plus a bounded
//! session history.

use alloc::collections::BTreeMap;
use alloc::string::String;

use heapless::Vec;

/// Most recent sessions kept in the history, newest first.
pub const SESSION_HISTORY_CAP: usize = 50;

/// Book name used when a session commits with no book set.
pub const UNTITLED_BOOK: &str = "Untitled";

/// One committed reading session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionRecord {
    pub book_name: String,
    pub words_read: u32,
    pub reading_time_ms: u64,
    /// Commit time on the host-supplied timeline.
    pub timestamp_ms: u64,
}

/// Running totals for a single book.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BookTotals {
    pub total_words_read: u64,
    pub total_reading_time_ms: u64,
    pub sessions_count: u32,
}

/// The whole persisted statistics snapshot. Read-modify-written as one value;
/// the store never sees partial updates.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReadingStats {
    pub total_words_read: u64,
    pub total_reading_time_ms: u64,
    pub sessions_count: u32,
    pub books: BTreeMap<String, BookTotals>,
    /// Newest first, capped at [`SESSION_HISTORY_CAP`].
    pub sessions: Vec<SessionRecord, SESSION_HISTORY_CAP>,
}

impl ReadingStats {
    /// Folds one committed session into the snapshot: prepends it to the
    /// history (dropping the oldest entry past the cap) and merges its deltas
    /// into the named book's totals and the global totals.
    pub fn record_session(&mut self, record: SessionRecord) {
        let book = self.books.entry(record.book_name.clone()).or_default();
        book.total_words_read += record.words_read as u64;
        book.total_reading_time_ms += record.reading_time_ms;
        book.sessions_count += 1;

        self.total_words_read += record.words_read as u64;
        self.total_reading_time_ms += record.reading_time_ms;
        self.sessions_count += 1;

        if self.sessions.is_full() {
            self.sessions.pop();
        }
        let _ = self.sessions.insert(0, record);
    }
}
