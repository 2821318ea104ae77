//! HTTP surface.
//!
//! Every route sits behind [`auth::require_session`] except the login page,
//! `/api/auth/*` and `/health`.

pub mod auth;
pub mod employees;
pub mod error;
pub mod reports;
pub mod state;
pub mod trainings;

use crate::db::db::Db;
use crate::libs::config::{CertificateConfig, ServerConfig};
use crate::libs::messages::Message;
use anyhow::Result;
use auth::SessionKeys;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use state::AppState;
use tower_http::trace::TraceLayer;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(auth::LOGIN_PAGE, get(auth::login_page))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/admins", get(auth::admins))
        .route("/api/employees", get(employees::list).post(employees::create))
        .route(
            "/api/employees/{id}",
            get(employees::get).put(employees::update).delete(employees::delete),
        )
        .route("/api/import", post(employees::import))
        .route(
            "/api/training-records",
            get(trainings::list_by_start_date).post(trainings::create),
        )
        .route(
            "/api/training-records/{id}",
            get(trainings::get).put(trainings::update_fields).delete(trainings::delete),
        )
        .route("/api/training", get(trainings::list_by_index).post(trainings::create))
        .route(
            "/api/training/{id}",
            get(trainings::get).put(trainings::update_with_employees).delete(trainings::delete),
        )
        .route("/api/reports", get(reports::report))
        .route("/api/reports/export", get(reports::export))
        .route("/api/certificates/{employee_id}", get(reports::certificate))
        .route("/api/backup", get(reports::backup))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the database, serves until Ctrl-C or SIGTERM, then closes it.
pub async fn serve(server: ServerConfig, certificate: CertificateConfig) -> Result<()> {
    let path = server.database_path()?;
    let db = Db::open(&path)?;
    tracing::info!("{}", Message::DatabaseOpened(path.display().to_string()));

    let state = AppState::new(db, SessionKeys::from_secret(server.jwt_secret.as_deref()), certificate);
    let address = server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("{}", Message::ServerStarting(address));

    axum::serve(listener, app(state)).with_graceful_shutdown(shutdown_signal()).await?;

    // The router owned the last state clone, so the connection is gone here.
    tracing::info!("{}", Message::DatabaseClosed);
    tracing::info!("{}", Message::ServerStopped);
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
