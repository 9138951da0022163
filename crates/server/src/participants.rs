//! Participant endpoints.

use api_types::participant::{
    ParticipantDeleted, ParticipantRename, ParticipantsResponse, ParticipantsSet,
};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, convert, server::ServerState};

pub async fn set(
    State(state): State<ServerState>,
    Json(payload): Json<ParticipantsSet>,
) -> Result<Json<ParticipantsResponse>, ServerError> {
    let participants = state.engine.set_participants(payload.names).await?;
    tracing::info!("participants set to {participants:?}");

    Ok(Json(ParticipantsResponse {
        ok: true,
        participants,
    }))
}

pub async fn rename(
    State(state): State<ServerState>,
    Json(payload): Json<ParticipantRename>,
) -> Result<Json<ParticipantsResponse>, ServerError> {
    let participants = state
        .engine
        .rename_participant(&payload.old, &payload.new)
        .await?;
    tracing::info!("participant '{}' renamed to '{}'", payload.old, payload.new);

    Ok(Json(ParticipantsResponse {
        ok: true,
        participants,
    }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<ParticipantDeleted>, ServerError> {
    let (removed, participants) = state.engine.delete_participant(&name).await?;
    tracing::info!(
        "participant '{}' removed with {} expenses",
        removed.name,
        removed.expenses.len()
    );

    Ok(Json(ParticipantDeleted {
        ok: true,
        participants,
        removed: convert::removed_participant_view(&removed),
    }))
}
