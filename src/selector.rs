/// Model of the minutes slider: its value and whether a drag is in progress.
#[derive(Debug, Clone)]
pub struct DurationSelector {
    progress: u32,
    max: u32,
    dragging: bool,
}

impl DurationSelector {
    pub fn new(max: u32) -> Self {
        Self {
            progress: 0,
            max,
            dragging: false,
        }
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Open a drag session.
    pub fn press(&mut self) {
        self.dragging = true;
    }

    /// Close the drag session. Returns false when none was open.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }

    /// Apply a raw slider value from the user. Returns the new progress if it changed.
    pub fn user_change(&mut self, raw: f64) -> Option<u32> {
        let progress = self.clamp_raw(raw);
        if progress == self.progress {
            return None;
        }
        self.progress = progress;
        Some(progress)
    }

    /// Programmatic update; returns the clamped value.
    pub fn set_progress(&mut self, minutes: u32) -> u32 {
        self.progress = minutes.min(self.max);
        self.progress
    }

    fn clamp_raw(&self, raw: f64) -> u32 {
        if !raw.is_finite() {
            return self.progress;
        }
        // Float-to-int `as` saturates; the clamp keeps it inside the range.
        (raw.round().max(0.0) as u32).min(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_idle() {
        let selector = DurationSelector::new(60);
        assert_eq!(selector.progress(), 0);
        assert_eq!(selector.max(), 60);
        assert!(!selector.is_dragging());
    }

    #[test]
    fn user_values_round_and_clamp() {
        let mut selector = DurationSelector::new(60);
        assert_eq!(selector.user_change(4.6), Some(5));
        assert_eq!(selector.user_change(5.2), None);
        assert_eq!(selector.user_change(75.0), Some(60));
        assert_eq!(selector.user_change(-3.0), Some(0));
        assert_eq!(selector.user_change(f64::NAN), None);
        assert_eq!(selector.progress(), 0);
    }

    #[test]
    fn drag_session_opens_and_closes_once() {
        let mut selector = DurationSelector::new(60);
        assert!(!selector.release());

        selector.press();
        assert!(selector.is_dragging());
        assert!(selector.release());
        assert!(!selector.release());
    }

    #[test]
    fn programmatic_updates_clamp_without_touching_drag_state() {
        let mut selector = DurationSelector::new(30);
        selector.press();
        assert_eq!(selector.set_progress(45), 30);
        assert_eq!(selector.set_progress(0), 0);
        assert!(selector.is_dragging());
    }
}
