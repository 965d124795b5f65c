pub mod about_dialog;
pub mod timer_window;
