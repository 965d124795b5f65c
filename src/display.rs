//! Remaining-time formatting and the view port the controller draws through.

pub const MILLIS_PER_SECOND: u64 = 1000;
pub const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;

/// Text for the two clock labels, e.g. `05'` and `00`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemainingText {
    pub minutes: String,
    pub seconds: String,
}

impl std::fmt::Display for RemainingText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.minutes, self.seconds)
    }
}

/// Anything that can show the countdown. Implemented by the GTK window.
pub trait TimerView {
    fn show_remaining(&mut self, text: &RemainingText);
    /// Move the slider without producing a user change.
    fn set_selector(&mut self, minutes: u32);
}

pub fn format_remaining(remain_millis: u64) -> RemainingText {
    let remain_seconds = remain_millis / MILLIS_PER_SECOND;
    RemainingText {
        minutes: format!("{:02}'", remain_seconds / 60),
        seconds: format!("{:02}", remain_seconds % 60),
    }
}

/// Whole minutes left, as the slider shows them.
pub fn selector_minutes(remain_millis: u64) -> u32 {
    u32::try_from(remain_millis / MILLIS_PER_MINUTE).unwrap_or(u32::MAX)
}

pub fn minutes_to_millis(minutes: u32) -> u64 {
    u64::from(minutes) * MILLIS_PER_MINUTE
}
