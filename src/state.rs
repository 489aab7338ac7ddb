use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, panel::AdminPanel};

#[derive(Clone)]
pub struct AppState {
    pub panel: Arc<AdminPanel>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<AdminPanel> {
    fn from_ref(state: &AppState) -> Self {
        state.panel.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
