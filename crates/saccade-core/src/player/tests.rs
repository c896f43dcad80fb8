use super::*;

/// 600 wpm with adaptive timing off makes every unit exactly 100 ms.
fn flat_100ms_config() -> TimingConfig {
    TimingConfig {
        wpm: 600.0,
        adaptive_timing: false,
        ..TimingConfig::default()
    }
}

fn loaded_player(text: &str) -> Player {
    let mut player = Player::new(flat_100ms_config());
    player.set_text(text);
    player
}

#[test]
fn starts_idle_and_ignores_play_without_text() {
    let mut player = Player::new(flat_100ms_config());
    assert_eq!(player.state(), PlaybackState::Idle);

    player.play();
    assert_eq!(player.state(), PlaybackState::Idle);
    assert!(player.current_unit().is_none());
    assert_eq!(player.progress_percent(), 0.0);
}

#[test]
fn ticks_drive_index_to_finished() {
    let mut player = loaded_player("alpha beta gamma");
    player.play();
    assert_eq!(player.state(), PlaybackState::Playing);

    // First tick anchors the unit timer, nothing advances yet.
    assert_eq!(player.tick(1_000), TickResult::NoRender);
    assert_eq!(player.current_index(), 0);

    assert_eq!(player.tick(1_100), TickResult::RenderRequested);
    assert_eq!(player.current_index(), 1);

    assert_eq!(player.tick(1_150), TickResult::NoRender);
    assert_eq!(player.tick(1_200), TickResult::RenderRequested);
    assert_eq!(player.current_index(), 2);

    assert_eq!(player.tick(1_300), TickResult::RenderRequested);
    assert_eq!(player.state(), PlaybackState::Finished);
    assert_eq!(player.current_index(), 2);

    // Finished playback ignores further ticks.
    assert_eq!(player.tick(2_000), TickResult::NoRender);
}

#[test]
fn late_ticks_do_not_accumulate_drift() {
    let mut player = loaded_player("alpha beta gamma delta");
    player.play();
    player.tick(0);

    // 30 ms late; the next unit's timer re-anchors to the late timestamp.
    assert_eq!(player.tick(130), TickResult::RenderRequested);
    assert_eq!(player.current_index(), 1);
    assert_eq!(player.tick(229), TickResult::NoRender);
    assert_eq!(player.tick(230), TickResult::RenderRequested);
    assert_eq!(player.current_index(), 2);
}

#[test]
fn resume_restarts_current_unit_timer() {
    let mut player = loaded_player("alpha beta");
    player.play();
    player.tick(0);
    player.tick(60);

    player.pause();
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.current_index(), 0);

    player.play();
    player.tick(500);
    // 60 ms of pre-pause progress was discarded; a full 100 ms runs again.
    assert_eq!(player.tick(560), TickResult::NoRender);
    assert_eq!(player.tick(600), TickResult::RenderRequested);
    assert_eq!(player.current_index(), 1);
}

#[test]
fn seek_clamps_to_sequence_bounds() {
    let mut player = loaded_player("one two three four five");

    player.seek_to(999);
    assert_eq!(player.current_index(), 4);

    player.jump_backward(DEFAULT_JUMP_WORDS);
    assert_eq!(player.current_index(), 0);

    player.jump_forward(2);
    assert_eq!(player.current_index(), 2);
    player.jump_forward(DEFAULT_JUMP_WORDS);
    assert_eq!(player.current_index(), 4);
}

#[test]
fn seeking_a_finished_run_reopens_it_paused() {
    let mut player = loaded_player("one two three");
    player.play();
    player.tick(0);
    player.tick(100);
    player.tick(200);
    player.tick(300);
    assert_eq!(player.state(), PlaybackState::Finished);

    player.seek_to(2);
    assert_eq!(player.state(), PlaybackState::Finished);

    player.seek_to(0);
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.current_index(), 0);
}

#[test]
fn play_after_finished_restarts_from_the_top() {
    let mut player = loaded_player("one two");
    player.play();
    player.tick(0);
    player.tick(100);
    player.tick(200);
    assert_eq!(player.state(), PlaybackState::Finished);

    player.play();
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.current_index(), 0);
}

#[test]
fn set_text_discards_playback_progress() {
    let mut player = loaded_player("one two three");
    player.play();
    player.tick(0);
    player.tick(100);
    assert_eq!(player.current_index(), 1);

    player.set_text("fresh words here");
    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(player.current_index(), 0);
    assert_eq!(player.raw_text(), "fresh words here");
    assert_eq!(player.unit_count(), 3);
}

#[test]
fn config_update_keeps_numeric_index_and_retimes() {
    let mut player = loaded_player("one two three four five");
    player.seek_to(3);

    player.set_wpm(300.0);
    assert_eq!(player.current_index(), 3);
    assert_eq!(player.timing().wpm, 300.0);
    assert_eq!(player.current_unit().map(|unit| unit.duration_ms), Some(200));
}

#[test]
fn restore_position_lands_paused_at_clamped_index() {
    let mut player = Player::new(flat_100ms_config());
    player.restore_position("alpha beta gamma", 7);
    assert_eq!(player.state(), PlaybackState::Paused);
    assert_eq!(player.current_index(), 2);

    player.restore_position("", 3);
    assert_eq!(player.state(), PlaybackState::Idle);
    assert_eq!(player.current_index(), 0);
}

#[test]
fn derived_times_sum_unit_durations() {
    let mut player = loaded_player("one two three");
    assert_eq!(player.total_ms(), 300);
    assert_eq!(player.elapsed_ms(), 0);

    player.seek_to(2);
    assert_eq!(player.elapsed_ms(), 200);
    assert!((player.progress_percent() - 66.666_67).abs() < 0.01);
}
