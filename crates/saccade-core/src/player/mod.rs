//! Playback scheduler: advances through the timed unit sequence in real time.

use alloc::string::String;
use alloc::vec::Vec;

use log::debug;

use crate::timing::{TimingConfig, TimingConfigPatch};
use crate::tokenize::{self, TimedUnit};

/// Words skipped by a jump when the caller does not say otherwise.
pub const DEFAULT_JUMP_WORDS: usize = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Finished,
}

/// Whether a tick changed anything a frontend would want to redraw.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// State machine that owns the unit sequence and the reading position.
///
/// Time never flows inside the player; the host calls [`Player::tick`] once
/// per display refresh with a monotonically non-decreasing `now_ms`. Each
/// unit's timer is re-anchored to the tick timestamp that advanced past it,
/// so scheduling drift never accumulates across units.
pub struct Player {
    units: Vec<TimedUnit>,
    raw_text: String,
    current: usize,
    state: PlaybackState,
    config: TimingConfig,
    segment_start_ms: Option<u64>,
}

impl Player {
    pub fn new(config: TimingConfig) -> Self {
        Self {
            units: Vec::new(),
            raw_text: String::new(),
            current: 0,
            state: PlaybackState::Idle,
            config,
            segment_start_ms: None,
        }
    }

    /// Starts or resumes playback. A finished run restarts from the first
    /// unit. Does nothing while already playing or when there is no text.
    pub fn play(&mut self) {
        if self.units.is_empty() {
            return;
        }

        match self.state {
            PlaybackState::Finished => {
                self.current = 0;
                self.segment_start_ms = None;
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Idle | PlaybackState::Paused => {
                self.segment_start_ms = None;
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Playing => {}
        }
    }

    /// Freezes at the current unit. Progress into the unit's duration is
    /// discarded; resuming grants it a fresh full duration.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
            self.segment_start_ms = None;
        }
    }

    /// Back to the first unit, all timers cleared.
    pub fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.current = 0;
        self.segment_start_ms = None;
    }

    /// Moves to `index`, clamped to the sequence. Legal in every state; the
    /// selected unit always gets a fresh full duration. Seeking a finished
    /// run anywhere but its last unit reopens it as paused.
    pub fn seek_to(&mut self, index: usize) {
        if self.units.is_empty() {
            return;
        }

        let last = self.units.len() - 1;
        self.current = index.min(last);
        self.segment_start_ms = None;

        if self.state == PlaybackState::Finished && self.current < last {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn jump_forward(&mut self, words: usize) {
        self.seek_to(self.current.saturating_add(words));
    }

    pub fn jump_backward(&mut self, words: usize) {
        self.seek_to(self.current.saturating_sub(words));
    }

    /// Replaces the sequence, discarding all playback progress.
    pub fn set_text(&mut self, text: &str) {
        self.units = tokenize::tokenize(text, &self.config);
        self.raw_text = String::from(text);
        self.current = 0;
        self.state = PlaybackState::Idle;
        self.segment_start_ms = None;
        debug!("text replaced: {} units", self.units.len());
    }

    /// Restores text and position in one call, landing paused at the clamped
    /// index so the reader can resume where they left off.
    pub fn restore_position(&mut self, text: &str, index: usize) {
        self.units = tokenize::tokenize(text, &self.config);
        self.raw_text = String::from(text);
        self.current = index.min(self.units.len().saturating_sub(1));
        self.state = if self.units.is_empty() {
            PlaybackState::Idle
        } else {
            PlaybackState::Paused
        };
        self.segment_start_ms = None;
    }

    /// Merges `patch` and rebuilds the sequence from the current unit texts.
    ///
    /// The numeric index is kept across the rebuild rather than re-locating
    /// the same word, so the position can drift when the rebuild changes the
    /// unit count. Known quirk, not a contract.
    pub fn update_config(&mut self, patch: &TimingConfigPatch) {
        self.config.apply(patch);

        if self.units.is_empty() {
            return;
        }

        let mut text = String::new();
        for unit in &self.units {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&unit.text);
        }

        self.units = tokenize::tokenize(&text, &self.config);
        self.current = self.current.min(self.units.len().saturating_sub(1));
        self.segment_start_ms = None;
    }

    /// Single-field convenience for the most common configuration change.
    pub fn set_wpm(&mut self, wpm: f32) {
        self.update_config(&TimingConfigPatch {
            wpm: Some(wpm),
            ..TimingConfigPatch::default()
        });
    }

    /// Advances playback against `now_ms`. Only does work while playing.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        if self.state != PlaybackState::Playing {
            return TickResult::NoRender;
        }

        let Some(unit) = self.units.get(self.current) else {
            self.state = PlaybackState::Finished;
            self.current = self.units.len().saturating_sub(1);
            self.segment_start_ms = None;
            return TickResult::RenderRequested;
        };

        let start = *self.segment_start_ms.get_or_insert(now_ms);
        if now_ms.saturating_sub(start) < unit.duration_ms as u64 {
            return TickResult::NoRender;
        }

        let next = self.current + 1;
        if next >= self.units.len() {
            self.state = PlaybackState::Finished;
            self.current = self.units.len() - 1;
            self.segment_start_ms = None;
            debug!("playback finished at unit {}", self.current);
        } else {
            self.current = next;
            self.segment_start_ms = Some(now_ms);
        }
        TickResult::RenderRequested
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_unit(&self) -> Option<&TimedUnit> {
        self.units.get(self.current)
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.config
    }

    /// Position through the sequence as `0.0..=100.0`, 0 when empty.
    pub fn progress_percent(&self) -> f32 {
        if self.units.is_empty() {
            return 0.0;
        }
        self.current as f32 / self.units.len() as f32 * 100.0
    }

    /// Sum of the durations of all units strictly before the current one.
    pub fn elapsed_ms(&self) -> u64 {
        self.units[..self.current.min(self.units.len())]
            .iter()
            .map(|unit| unit.duration_ms as u64)
            .sum()
    }

    pub fn total_ms(&self) -> u64 {
        self.units.iter().map(|unit| unit.duration_ms as u64).sum()
    }
}

#[cfg(test)]
mod tests;
