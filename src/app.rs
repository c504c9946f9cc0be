use crate::api::client::ApiClient;
use crate::api::models::MessageId;
use crate::config::Config;
use adw::Application;
use adw::prelude::*;

pub struct AppState {
    pub config: Config,
    pub ids: Vec<MessageId>,
}

impl AppState {
    /// Message ids come from the command line; blank arguments are skipped.
    pub fn from_args(config: Config, args: impl IntoIterator<Item = String>) -> Self {
        let ids = args.into_iter().filter_map(|a| MessageId::parse(&a)).collect();
        Self { config, ids }
    }
}

pub fn build_ui(app: &Application, state: &AppState) {
    match ApiClient::new(&state.config) {
        Ok(client) => crate::ui::main_window::show_main_window(app, client, &state.ids),
        Err(e) => {
            log::error!("could not build http client: {}", e);
            app.quit();
        }
    }
}
