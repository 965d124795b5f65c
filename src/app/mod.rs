mod event_handler;
mod state;
mod ticker;
mod timer;

pub use event_handler::handle_timer_event;
pub use state::{AppState, TimerEvent};
pub use ticker::GlibTicker;
