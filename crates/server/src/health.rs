use std::collections::BTreeMap;

use api_types::health::{ComponentHealth, Health, HealthStatus};
use axum::{Json, extract::State, http::StatusCode};

use crate::server::ServerState;

/// Reports `UP` when the database answers a ping, `DOWN` with 503 otherwise.
pub async fn check(State(state): State<ServerState>) -> (StatusCode, Json<Health>) {
    let (status, database) = match state.engine.ping().await {
        Ok(()) => {
            tracing::debug!("database ping successful");
            (
                StatusCode::OK,
                ComponentHealth {
                    status: HealthStatus::Up,
                    details: "database is responsive".to_string(),
                },
            )
        }
        Err(err) => {
            tracing::error!("database health check failed: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ComponentHealth {
                    status: HealthStatus::Down,
                    details: format!("database connection failed: {err}"),
                },
            )
        }
    };

    let overall = database.status;
    let components = BTreeMap::from([("database".to_string(), database)]);

    tracing::info!("health check: status={overall:?}, http_code={}", status.as_u16());
    (
        status,
        Json(Health {
            status: overall,
            components,
        }),
    )
}
