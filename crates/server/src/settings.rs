use api_types::settings::{SettingsResponse, SettingsUpdate, SettingsView};
use axum::{Json, extract::State};
use engine::SettingsPatch;

use crate::{ServerError, convert, server::ServerState};

pub async fn get(State(state): State<ServerState>) -> Result<Json<SettingsView>, ServerError> {
    let settings = state.engine.settings().await?;
    Ok(Json(convert::settings_view(&settings)))
}

pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SettingsUpdate>,
) -> Result<Json<SettingsResponse>, ServerError> {
    let settings = state
        .engine
        .update_settings(SettingsPatch {
            event: payload.event,
            currency: payload.currency,
        })
        .await?;
    tracing::debug!("settings updated: {settings:?}");

    Ok(Json(SettingsResponse {
        ok: true,
        settings: convert::settings_view(&settings),
    }))
}
