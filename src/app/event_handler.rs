use super::state::{AppState, TimerEvent};
use super::timer::{
    complete_countdown, start_countdown, stop_countdown, update_remain_time, update_selector,
};
use crate::countdown::{CountdownStep, TICK_INTERVAL};
use crate::display::minutes_to_millis;

/// Handle a timer event. This is the core state machine.
pub fn handle_timer_event(state: &mut AppState, event: TimerEvent) {
    if state.released {
        log::debug!("Ignoring {event:?} after shutdown");
        return;
    }

    match event {
        TimerEvent::DragStarted => {
            log::debug!("Drag started while {:?}", state.status);
            state.selector.press();
            stop_countdown(state);
        }
        TimerEvent::ProgressChanged(raw) => {
            let Some(progress) = state.selector.user_change(raw) else {
                return;
            };
            if state.selector.is_dragging() {
                update_remain_time(state, minutes_to_millis(progress));
            } else {
                // Scroll or keyboard: a whole drag session in one step
                log::debug!("Slider moved to {progress} outside a drag");
                stop_countdown(state);
                update_remain_time(state, minutes_to_millis(progress));
                start_or_stop(state);
            }
        }
        TimerEvent::DragStopped => {
            if !state.selector.release() {
                log::debug!("Drag stop without a drag in progress");
                return;
            }
            start_or_stop(state);
        }
        TimerEvent::StartRequested(minutes) => {
            if minutes > state.selector.max() {
                log::debug!("Clamping requested {minutes} min to {}", state.selector.max());
            }
            let minutes = state.selector.set_progress(minutes);
            state.view.set_selector(minutes);
            start_or_stop(state);
        }
        TimerEvent::Tick(generation) => match state.countdown.advance(generation) {
            Some(CountdownStep::Tick(remaining)) => {
                update_remain_time(state, remaining);
                update_selector(state, remaining);
            }
            Some(CountdownStep::Finished) => complete_countdown(state),
            None => log::trace!("Dropping stale tick for generation {generation}"),
        },
        TimerEvent::WindowSuspended => {
            log::debug!("Window suspended");
            state.cues.pause_all();
            if state.config.pause_countdown_in_background && state.countdown.is_active() {
                state.ticker.stop();
                state.ticker_suspended = true;
            }
        }
        TimerEvent::WindowRestored => {
            log::debug!("Window restored");
            state.cues.resume_all();
            if state.ticker_suspended {
                state.ticker.start(state.countdown.generation(), TICK_INTERVAL);
                state.ticker_suspended = false;
            }
        }
        TimerEvent::Shutdown => {
            state.countdown.cancel();
            state.ticker.stop();
            state.cues.release();
            state.released = true;
            log::info!("Timer shut down");
        }
    }
}

fn start_or_stop(state: &mut AppState) {
    if state.selector.progress() == 0 {
        stop_countdown(state);
    } else {
        start_countdown(state);
    }
}
