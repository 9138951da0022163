//! Expense endpoints.

use api_types::expense::{ExpenseNew, ExpenseResponse, ExpenseUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{EngineError, ExpenseDraft, ExpensePatch};
use uuid::Uuid;

use crate::{ServerError, convert, server::ServerState};

/// An id that is not a UUID cannot name a stored expense.
fn expense_id(raw: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw).map_err(|_| EngineError::KeyNotFound(raw.to_string()).into())
}

fn respond(expense: &engine::Expense) -> Json<ExpenseResponse> {
    Json(ExpenseResponse {
        ok: true,
        expense: convert::expense_record(expense),
    })
}

pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ServerError> {
    let draft = ExpenseDraft {
        payer: payload.payer,
        amount: convert::parse_amount(&payload.amount)?,
        description: payload.description,
        date: payload.date,
        split: payload.split,
    };
    let expense = state.engine.add_expense(draft).await?;
    tracing::info!(
        "expense {} added: {} paid {}",
        expense.id,
        expense.payer,
        expense.amount
    );

    Ok((StatusCode::CREATED, respond(&expense)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let id = expense_id(&id)?;
    let patch = ExpensePatch {
        payer: payload.payer,
        amount: payload
            .amount
            .as_ref()
            .map(convert::parse_amount)
            .transpose()?,
        description: payload.description,
        date: payload.date,
        split: payload.split,
    };
    let expense = state.engine.update_expense(id, patch).await?;
    tracing::info!("expense {id} updated");

    Ok(respond(&expense))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let id = expense_id(&id)?;
    let expense = state.engine.delete_expense(id).await?;
    tracing::info!("expense {id} deleted");

    Ok(respond(&expense))
}
