//! Undo of expense and participant deletions.

use api_types::{
    Ack, expense::ExpenseRecord, participant::RemovedParticipant, restore::RestoreRequest,
};
use axum::{Json, extract::State};
use serde::de::DeserializeOwned;

use crate::{ServerError, convert, server::ServerState};

fn decode_item<T: DeserializeOwned>(item: Option<serde_json::Value>) -> Result<T, ServerError> {
    let item = item.ok_or_else(|| ServerError::Generic("missing item".to_string()))?;
    serde_json::from_value(item).map_err(|err| ServerError::Generic(format!("invalid item: {err}")))
}

pub async fn restore(
    State(state): State<ServerState>,
    Json(payload): Json<RestoreRequest>,
) -> Result<Json<Ack>, ServerError> {
    match payload.kind.as_str() {
        "expense" => {
            let record: ExpenseRecord = decode_item(payload.item)?;
            if record.id.trim().is_empty() {
                return Err(ServerError::Generic("missing expense id".to_string()));
            }
            let expense = state
                .engine
                .restore_expense(convert::expense_from_record(record)?)
                .await?;
            tracing::info!("expense {} restored", expense.id);
        }
        "participant" => {
            let view: RemovedParticipant = decode_item(payload.item)?;
            let removed = convert::removed_participant_from_view(view)?;
            let name = removed.name.clone();
            state.engine.restore_participant(removed).await?;
            tracing::info!("participant '{name}' restored");
        }
        other => {
            return Err(ServerError::Generic(format!("unknown restore type: {other}")));
        }
    }

    Ok(Json(Ack { ok: true }))
}
