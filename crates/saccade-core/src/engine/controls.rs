impl<SS, TS> ReaderEngine<SS, TS>
where
    SS: StateStore,
    TS: StatsStore,
{
    /// Starts or resumes playback and opens a play segment for accounting.
    pub fn play(&mut self, now_ms: u64) {
        if self.player.state() == PlaybackState::Playing {
            return;
        }

        self.player.play();
        if self.player.state() == PlaybackState::Playing {
            self.session
                .segment_opened(now_ms, self.player.current_index());
            self.pending_redraw = true;
            debug!("playback started at unit {}", self.player.current_index());
        }
    }

    /// Pauses playback and folds the open segment into the session.
    pub fn pause(&mut self, now_ms: u64) {
        if self.player.state() != PlaybackState::Playing {
            return;
        }

        self.player.pause();
        self.session
            .segment_closed(now_ms, self.player.current_index());
        self.pending_redraw = true;
    }

    /// Back to the first unit. Reading done so far stays accumulated.
    pub fn reset(&mut self, now_ms: u64) {
        if self.player.state() == PlaybackState::Playing {
            self.session
                .segment_closed(now_ms, self.player.current_index());
        }
        self.player.reset();
        self.pending_redraw = true;
    }

    pub fn seek_to(&mut self, index: usize) {
        self.player.seek_to(index);
        self.pending_redraw = true;
    }

    pub fn jump_forward(&mut self, words: usize) {
        self.player.jump_forward(words);
        self.pending_redraw = true;
    }

    pub fn jump_backward(&mut self, words: usize) {
        self.player.jump_backward(words);
        self.pending_redraw = true;
    }

    /// Loads new text, discarding playback progress. A running play segment
    /// closes first so its reading is not lost.
    pub fn set_text(&mut self, now_ms: u64, text: &str) {
        if self.player.state() == PlaybackState::Playing {
            self.session
                .segment_closed(now_ms, self.player.current_index());
        }
        self.player.set_text(text);
        self.pending_redraw = true;
    }

    /// Loads text and lands paused at `index`, for resuming a saved position.
    pub fn restore_position(&mut self, now_ms: u64, text: &str, index: usize) {
        if self.player.state() == PlaybackState::Playing {
            self.session
                .segment_closed(now_ms, self.player.current_index());
        }
        self.player.restore_position(text, index);
        self.pending_redraw = true;
    }

    /// Names the book future sessions are attributed to. Never commits a
    /// pending session by itself.
    pub fn set_book_name(&mut self, name: Option<&str>) {
        self.session.set_book_name(name);
        self.pending_redraw = true;
    }

    pub fn update_timing(&mut self, patch: &TimingConfigPatch) {
        self.player.update_config(patch);
        self.pending_redraw = true;
    }

    pub fn set_wpm(&mut self, wpm: f32) {
        self.player.set_wpm(wpm);
        self.pending_redraw = true;
    }

    /// Lifecycle "flush now" hook: commits any pending session and writes the
    /// position snapshot immediately, best-effort. Call when the hosting
    /// surface is about to go inactive.
    pub fn flush(&mut self, now_ms: u64) {
        self.commit_session(now_ms);
        self.sync.track_current(
            self.player.timing(),
            self.session.book_name(),
            self.player.current_index(),
            now_ms,
        );
        self.sync.flush_now(&mut self.state_store, now_ms);
    }
}
