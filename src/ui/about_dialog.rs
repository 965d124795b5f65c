use gtk4::prelude::*;
use libadwaita::prelude::*;

/// Show the about dialog over the timer window.
pub fn show_about_dialog(parent: &libadwaita::ApplicationWindow) {
    let dialog = libadwaita::AboutDialog::builder()
        .application_name("Pomodoro")
        .application_icon("alarm-symbolic")
        .version(env!("CARGO_PKG_VERSION"))
        .comments(env!("CARGO_PKG_DESCRIPTION"))
        .license_type(gtk4::License::MitX11)
        .build();

    let parent_widget: Option<&gtk4::Widget> = Some(parent.upcast_ref());
    dialog.present(parent_widget);
}
