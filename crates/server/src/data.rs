use api_types::data::DataFile;
use axum::{Json, extract::State};

use crate::{ServerError, convert, server::ServerState};

pub async fn get(State(state): State<ServerState>) -> Result<Json<DataFile>, ServerError> {
    let snapshot = state.engine.snapshot().await?;
    Ok(Json(convert::data_file(&snapshot)))
}
