use super::state::{AppState, TimerStatus};
use crate::countdown::TICK_INTERVAL;
use crate::display::{format_remaining, minutes_to_millis, selector_minutes};

/// Start a countdown from the selector position, replacing any running one.
pub fn start_countdown(state: &mut AppState) {
    let minutes = state.selector.progress();
    let initial_millis = minutes_to_millis(minutes);

    silence_streams(state);
    let generation = state.countdown.start(initial_millis);
    state.ticker.start(generation, TICK_INTERVAL);
    state.ticker_suspended = false;
    state.status = TimerStatus::Running;
    log::info!("Countdown started: {minutes} min (generation {generation})");

    update_remain_time(state, initial_millis);

    if let Some(ticking) = state.sounds.ticking {
        state.ticking_stream = state.cues.play(ticking, true);
    }
}

/// Cancel the countdown and silence every cue. Safe to call in any status.
pub fn stop_countdown(state: &mut AppState) {
    let remaining = state.countdown.remaining_millis();
    if state.countdown.cancel() {
        log::info!("Countdown cancelled at {}", format_remaining(remaining));
    }
    state.ticker.stop();
    state.ticker_suspended = false;
    state.cues.pause_all();
    silence_streams(state);
    state.status = TimerStatus::Idle;
}

pub fn complete_countdown(state: &mut AppState) {
    log::info!("Countdown finished");
    state.ticker.stop();
    state.ticker_suspended = false;
    state.status = TimerStatus::Finished;

    update_remain_time(state, 0);
    update_selector(state, 0);

    state.cues.pause_all();
    silence_streams(state);
    if let Some(bell) = state.sounds.bell {
        state.bell_stream = state.cues.play(bell, false);
    }
}

pub fn update_remain_time(state: &mut AppState, remain_millis: u64) {
    let text = format_remaining(remain_millis);
    log::trace!("Remaining {text}");
    state.view.show_remaining(&text);
}

/// Move the slider to the whole minutes left.
pub fn update_selector(state: &mut AppState, remain_millis: u64) {
    let minutes = state.selector.set_progress(selector_minutes(remain_millis));
    state.view.set_selector(minutes);
}

/// Stop the voices this controller started so a later resume can't revive them.
fn silence_streams(state: &mut AppState) {
    for stream in [state.ticking_stream.take(), state.bell_stream.take()]
        .into_iter()
        .flatten()
    {
        state.cues.stop(stream);
    }
}
