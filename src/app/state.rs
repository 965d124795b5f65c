use crate::audio::{CuePlayer, CueSounds, StreamId};
use crate::config::Config;
use crate::countdown::{Countdown, TickSource};
use crate::display::TimerView;
use crate::selector::DurationSelector;

/// Events delivered to the GTK main thread, in order, through one channel.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// Pointer or touch went down on the slider
    DragStarted,
    /// The user moved the slider to this raw value
    ProgressChanged(f64),
    /// Pointer or touch released the slider
    DragStopped,
    /// Start a countdown of this many minutes without touching the slider
    StartRequested(u32),
    /// One tick interval elapsed for the countdown of this generation
    Tick(u64),
    WindowSuspended,
    WindowRestored,
    Shutdown,
}

/// Timer status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running,
    Finished,
}

/// Controller state. Lives on the GTK main thread inside Rc<RefCell<>>.
pub struct AppState {
    pub status: TimerStatus,
    pub config: Config,
    pub selector: DurationSelector,
    pub countdown: Countdown,

    // Collaborators
    pub ticker: Box<dyn TickSource>,
    pub cues: Box<dyn CuePlayer>,
    pub view: Box<dyn TimerView>,

    // Audio handles
    pub sounds: CueSounds,
    pub ticking_stream: Option<StreamId>,
    pub bell_stream: Option<StreamId>,

    /// Tick source stopped while the window is suspended
    pub ticker_suspended: bool,
    pub released: bool,
}

impl AppState {
    pub fn new(
        config: Config,
        ticker: Box<dyn TickSource>,
        cues: Box<dyn CuePlayer>,
        view: Box<dyn TimerView>,
        sounds: CueSounds,
    ) -> Self {
        Self {
            status: TimerStatus::Idle,
            selector: DurationSelector::new(config.max_minutes),
            config,
            countdown: Countdown::new(),
            ticker,
            cues,
            view,
            sounds,
            ticking_stream: None,
            bell_stream: None,
            ticker_suspended: false,
            released: false,
        }
    }
}
