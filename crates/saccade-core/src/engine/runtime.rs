impl<SS, TS> ReaderEngine<SS, TS>
where
    SS: StateStore,
    TS: StatsStore,
{
    /// Advances the whole engine against `now_ms`: playback first, then the
    /// live session counter, the idle-commit check, and the debounced
    /// position autosave.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let mut render = core::mem::take(&mut self.pending_redraw);

        let was_playing = self.player.state() == PlaybackState::Playing;
        if self.player.tick(now_ms) == TickResult::RenderRequested {
            render = true;
        }
        if was_playing && self.player.state() == PlaybackState::Finished {
            self.session
                .segment_closed(now_ms, self.player.current_index());
        }

        if self.player.state() == PlaybackState::Playing {
            let secs = self.session.live_elapsed_secs(now_ms);
            if self.last_live_secs != Some(secs) {
                self.last_live_secs = Some(secs);
                render = true;
            }
        }

        if self.session.idle_commit_due(now_ms) {
            self.commit_session(now_ms);
            render = true;
        }

        self.sync.track_current(
            self.player.timing(),
            self.session.book_name(),
            self.player.current_index(),
            now_ms,
        );
        self.sync.flush_if_due(&mut self.state_store, now_ms);

        if render {
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// Closes any open segment, folds the pending session into the
    /// statistics, and persists them. Nothing is written when nothing
    /// accumulated. When playback is still running a fresh segment opens at
    /// the current position so reading after the commit keeps counting.
    fn commit_session(&mut self, now_ms: u64) {
        let still_playing = self.player.state() == PlaybackState::Playing;

        if let Some(record) = self
            .session
            .take_session(now_ms, self.player.current_index())
        {
            debug!(
                "session committed: {} words / {} ms ({})",
                record.words_read, record.reading_time_ms, record.book_name
            );
            self.stats.record_session(record);
            if self.stats_store.save(&self.stats).is_err() {
                warn!("statistics save failed; totals kept in memory");
            }
        }

        if still_playing {
            self.session
                .segment_opened(now_ms, self.player.current_index());
        }
        self.last_live_secs = None;
    }
}
