use api_types::report::ReportResponse;
use axum::{Json, extract::State};

use crate::{ServerError, convert, server::ServerState};

pub async fn get(State(state): State<ServerState>) -> Result<Json<ReportResponse>, ServerError> {
    let report = state.engine.report().await?;
    Ok(Json(convert::report_response(&report)))
}
