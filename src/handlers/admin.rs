// src/handlers/admin.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    error::AppError,
    panel::{AdminPanel, PanelSnapshot},
    views::AdminPanelView,
};

const REFRESH_PATH: &str = "/api/admin/panel/refresh";

/// Returns the aggregated admin data.
///
/// The first request activates the panel. While data is loading the body is
/// `{"status": "loading"}`; a failed load answers 503 with the error and the
/// retry endpoint.
pub async fn get_panel(State(panel): State<Arc<AdminPanel>>) -> Result<Response, AppError> {
    panel.activate();

    match panel.snapshot() {
        PanelSnapshot::Failed { error } => Err(failed(error)),
        snapshot => Ok(Json(snapshot).into_response()),
    }
}

/// Returns display rows for the users, results and files sections.
pub async fn get_sections(State(panel): State<Arc<AdminPanel>>) -> Result<Response, AppError> {
    panel.activate();

    match panel.snapshot() {
        PanelSnapshot::Ready(model) => {
            let view = AdminPanelView::from(&model);
            Ok(Json(json!({ "status": "ready", "sections": view })).into_response())
        }
        PanelSnapshot::Failed { error } => Err(failed(error)),
        PanelSnapshot::Idle | PanelSnapshot::Loading => {
            Ok(Json(json!({ "status": "loading" })).into_response())
        }
    }
}

/// Starts a new load (retry). A load already in flight is left alone.
pub async fn refresh_panel(State(panel): State<Arc<AdminPanel>>) -> impl IntoResponse {
    let started = panel.refresh();

    (
        StatusCode::ACCEPTED,
        Json(json!({
            "started": started,
            "snapshot": panel.snapshot(),
        })),
    )
}

fn failed(error: String) -> AppError {
    AppError::ServiceUnavailable(format!(
        "Admin data could not be loaded: {}. Retry with POST {}",
        error, REFRESH_PATH
    ))
}
