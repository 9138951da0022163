use axum::{
    Router,
    routing::{delete, get, post, put},
};

use std::sync::Arc;

use crate::{data, expenses, participants, report, restore, settings};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/data", get(data::get))
        .route("/api/participants", post(participants::set))
        .route("/api/participants/rename", post(participants::rename))
        .route("/api/participant/{name}", delete(participants::remove))
        .route("/api/expense", post(expenses::add))
        .route(
            "/api/expense/{id}",
            put(expenses::update).delete(expenses::remove),
        )
        .route("/api/restore", post(restore::restore))
        .route("/api/settings", get(settings::get).post(settings::update))
        .route("/api/report", get(report::get))
        .with_state(state)
}

pub async fn run(engine: Engine, addr: &str) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
