mod app;
mod audio;
mod config;
mod countdown;
mod display;
mod selector;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use libadwaita::prelude::*;

use app::{AppState, GlibTicker, TimerEvent};
use audio::SoundPool;
use config::Config;

fn main() {
    env_logger::init();
    log::info!("Pomodoro starting");

    let application = libadwaita::Application::builder()
        .application_id("com.github.pomodoro.Pomodoro")
        .build();

    application.connect_activate(on_activate);
    application.run();
}

fn on_activate(app: &libadwaita::Application) {
    // Single window; a second launch just raises it
    if let Some(window) = app.active_window() {
        window.present();
        return;
    }

    let config = Config::load();
    if !Config::path().exists() {
        if let Err(e) = config.save() {
            log::warn!("Failed to write default config: {e}");
        }
    }

    // All timer input flows through one ordered channel
    let (event_tx, event_rx) = async_channel::unbounded::<TimerEvent>();

    // Build UI
    let widgets = ui::timer_window::build_timer_window(app, config.max_minutes);

    // Load sounds
    let mut pool = SoundPool::open(config.sounds.volume);
    let sounds = audio::load_cue_sounds(&mut pool, &config.sounds);

    let preset_minutes = config.preset_minutes;
    let state = Rc::new(RefCell::new(AppState::new(
        config,
        Box::new(GlibTicker::new(event_tx.clone())),
        Box::new(pool),
        Box::new(widgets.clone()),
        sounds,
    )));

    // Wire up the slider and window lifecycle
    ui::timer_window::connect_selector(&widgets.scale, event_tx.clone());
    ui::timer_window::connect_lifecycle(&widgets.window, event_tx.clone());

    install_actions(app, &widgets.window, event_tx, preset_minutes);

    // Release audio on exit. Handled directly: the event loop may already be gone.
    {
        let state_clone = state.clone();
        app.connect_shutdown(move |_| {
            app::handle_timer_event(&mut state_clone.borrow_mut(), TimerEvent::Shutdown);
        });
    }

    // Attach timer event handler
    {
        let state_clone = state.clone();
        gtk4::glib::spawn_future_local(async move {
            while let Ok(event) = event_rx.recv().await {
                app::handle_timer_event(&mut state_clone.borrow_mut(), event);
            }
        });
    }

    widgets.window.present();
}

fn install_actions(
    app: &libadwaita::Application,
    window: &libadwaita::ApplicationWindow,
    sender: async_channel::Sender<TimerEvent>,
    preset_minutes: u32,
) {
    let start = gtk4::gio::SimpleAction::new("start-pomodoro", None);
    start.connect_activate(move |_, _| {
        let _ = sender.try_send(TimerEvent::StartRequested(preset_minutes));
    });
    app.add_action(&start);

    let about = gtk4::gio::SimpleAction::new("about", None);
    {
        let window = window.clone();
        about.connect_activate(move |_, _| ui::about_dialog::show_about_dialog(&window));
    }
    app.add_action(&about);

    let quit = gtk4::gio::SimpleAction::new("quit", None);
    {
        let app_weak = app.downgrade();
        quit.connect_activate(move |_, _| {
            if let Some(app) = app_weak.upgrade() {
                app.quit();
            }
        });
    }
    app.add_action(&quit);
    app.set_accels_for_action("app.quit", &["<primary>q"]);
}
