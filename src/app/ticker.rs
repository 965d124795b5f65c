use std::time::Duration;

use gtk4::glib;

use super::state::TimerEvent;
use crate::countdown::TickSource;

/// Tick source backed by a GLib timeout on the main context.
pub struct GlibTicker {
    sender: async_channel::Sender<TimerEvent>,
    source: Option<glib::SourceId>,
}

impl GlibTicker {
    pub fn new(sender: async_channel::Sender<TimerEvent>) -> Self {
        Self {
            sender,
            source: None,
        }
    }
}

impl TickSource for GlibTicker {
    fn start(&mut self, generation: u64, interval: Duration) {
        self.stop();
        let sender = self.sender.clone();
        // Keep returning Continue: the source is only ever removed through `stop`.
        let source = glib::timeout_add_local(interval, move || {
            let _ = sender.try_send(TimerEvent::Tick(generation));
            glib::ControlFlow::Continue
        });
        self.source = Some(source);
    }

    fn stop(&mut self) {
        if let Some(source) = self.source.take() {
            source.remove();
        }
    }
}
