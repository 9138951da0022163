use api_types::ErrorBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

pub mod convert;

mod data;
mod expenses;
mod participants;
mod report;
mod restore;
mod server;
mod settings;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::NoParticipants => StatusCode::BAD_REQUEST,
        EngineError::Unbalanced(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        EngineError::InvalidAmount(_)
        | EngineError::InvalidSplit(_)
        | EngineError::InvalidInput(_)
        | EngineError::UnknownParticipant(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Unbalanced(detail) => {
            tracing::error!("settlement did not balance: {detail}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorBody { ok: false, error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
