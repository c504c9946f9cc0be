use adw::Application;
use adw::prelude::*;
use std::process::ExitCode;
use std::rc::Rc;
use warbler_likes::app::{AppState, build_ui};
use warbler_likes::config::Config;

fn main() -> ExitCode {
    warbler_likes::logger::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "warbler-likes".into());
    let state = Rc::new(AppState::from_args(config, args));

    let app = Application::builder()
        .application_id("com.example.WarblerLikes")
        .build();
    app.connect_activate(move |app| build_ui(app, &state));

    // Message ids are ours, not GApplication's.
    let status = app.run_with_args(&[program]);
    if status == glib::ExitCode::SUCCESS { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
