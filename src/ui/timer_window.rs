use gtk4::prelude::*;
use gtk4::{gdk, glib, Align};
use libadwaita::prelude::*;

use crate::app::TimerEvent;
use crate::display::{format_remaining, RemainingText, TimerView};

/// Handles returned from building the timer window.
#[derive(Clone)]
pub struct TimerWidgets {
    pub window: libadwaita::ApplicationWindow,
    pub minutes_label: gtk4::Label,
    pub seconds_label: gtk4::Label,
    pub scale: gtk4::Scale,
}

impl TimerView for TimerWidgets {
    fn show_remaining(&mut self, text: &RemainingText) {
        self.minutes_label.set_text(&text.minutes);
        self.seconds_label.set_text(&text.seconds);
    }

    fn set_selector(&mut self, minutes: u32) {
        // set_value emits value-changed only, never change-value
        self.scale.set_value(f64::from(minutes));
    }
}

/// Build the main timer window.
pub fn build_timer_window(app: &libadwaita::Application, max_minutes: u32) -> TimerWidgets {
    let window = libadwaita::ApplicationWindow::builder()
        .application(app)
        .title("Pomodoro")
        .default_width(420)
        .default_height(300)
        .build();

    let toolbar_view = libadwaita::ToolbarView::new();
    let header = libadwaita::HeaderBar::new();

    let menu_button = gtk4::MenuButton::new();
    menu_button.set_icon_name("open-menu-symbolic");

    let menu = gtk4::gio::Menu::new();
    menu.append(Some("Start Pomodoro"), Some("app.start-pomodoro"));
    menu.append(Some("About Pomodoro"), Some("app.about"));
    menu.append(Some("Quit"), Some("app.quit"));

    menu_button.set_menu_model(Some(&menu));
    header.pack_end(&menu_button);

    toolbar_view.add_top_bar(&header);

    load_css();

    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 24);
    content.set_margin_start(24);
    content.set_margin_end(24);
    content.set_margin_top(24);
    content.set_margin_bottom(24);
    content.set_valign(Align::Center);

    // --- Clock ---
    let initial = format_remaining(0);
    let clock = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
    clock.set_halign(Align::Center);

    let minutes_label = gtk4::Label::new(Some(&initial.minutes));
    minutes_label.add_css_class("clock-minutes");
    minutes_label.add_css_class("numeric");
    let seconds_label = gtk4::Label::new(Some(&initial.seconds));
    seconds_label.add_css_class("clock-seconds");
    seconds_label.add_css_class("numeric");
    seconds_label.set_valign(Align::End);

    clock.append(&minutes_label);
    clock.append(&seconds_label);
    content.append(&clock);

    // --- Minutes slider ---
    let scale = gtk4::Scale::with_range(
        gtk4::Orientation::Horizontal,
        0.0,
        f64::from(max_minutes),
        1.0,
    );
    scale.set_digits(0);
    scale.set_round_digits(0);
    scale.set_draw_value(false);
    scale.set_hexpand(true);
    for mark in (0..=max_minutes).step_by(10) {
        scale.add_mark(
            f64::from(mark),
            gtk4::PositionType::Bottom,
            Some(&mark.to_string()),
        );
    }
    content.append(&scale);

    toolbar_view.set_content(Some(&content));
    window.set_content(Some(&toolbar_view));

    TimerWidgets {
        window,
        minutes_label,
        seconds_label,
        scale,
    }
}

fn load_css() {
    let Some(display) = gdk::Display::default() else {
        log::warn!("No display available for styling");
        return;
    };

    let css_provider = gtk4::CssProvider::new();
    css_provider.load_from_string(
        r#"
        .clock-minutes {
            font-size: 72px;
            font-weight: bold;
        }
        .clock-seconds {
            font-size: 36px;
            margin-bottom: 12px;
            margin-left: 4px;
        }
        "#,
    );
    gtk4::style_context_add_provider_for_display(
        &display,
        &css_provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

/// Forward slider interaction as drag-start, value change and drag-stop events.
pub fn connect_selector(scale: &gtk4::Scale, sender: async_channel::Sender<TimerEvent>) {
    {
        let sender = sender.clone();
        scale.connect_change_value(move |_, _, value| {
            let _ = sender.try_send(TimerEvent::ProgressChanged(value));
            glib::Propagation::Proceed
        });
    }

    // Capture phase sees the press and release before the range's own gestures claim them.
    let pointer = gtk4::EventControllerLegacy::new();
    pointer.set_propagation_phase(gtk4::PropagationPhase::Capture);
    pointer.connect_event(move |_, event| {
        let drag_event = match event.event_type() {
            gdk::EventType::ButtonPress | gdk::EventType::TouchBegin => {
                Some(TimerEvent::DragStarted)
            }
            gdk::EventType::ButtonRelease
            | gdk::EventType::TouchEnd
            | gdk::EventType::TouchCancel => Some(TimerEvent::DragStopped),
            _ => None,
        };
        if let Some(drag_event) = drag_event {
            let _ = sender.try_send(drag_event);
        }
        glib::Propagation::Proceed
    });
    scale.add_controller(pointer);
}

/// Report the window being hidden or minimised, and coming back.
pub fn connect_lifecycle(
    window: &libadwaita::ApplicationWindow,
    sender: async_channel::Sender<TimerEvent>,
) {
    window.connect_suspended_notify(move |window| {
        let event = if window.is_suspended() {
            TimerEvent::WindowSuspended
        } else {
            TimerEvent::WindowRestored
        };
        let _ = sender.try_send(event);
    });
}
