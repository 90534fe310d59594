//! Root-level health check.
//!
//! Answers inside the standard envelope. An unreachable database is reported
//! as `"degraded"` data rather than as an error, so load balancers keep
//! receiving 200 with a body they can inspect.

use axum::extract::State;
use axum::{routing::get, Router};
use serde::Serialize;

use crate::error::AppError;
use crate::response::Envelope;
use crate::state::AppState;
use crate::translator::ClassifiedError;

/// Connection pool occupancy at the time of the check.
#[derive(Debug, Serialize)]
pub struct PoolStats {
    /// Open connections, idle or in use.
    pub size: u32,
    /// Open connections not currently checked out.
    pub idle: usize,
    /// Configured upper bound.
    pub max: u32,
}

/// Health report carried in the envelope's `data`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub pool: PoolStats,
}

/// GET /health
async fn health_check(
    State(state): State<AppState>,
) -> Result<Envelope<HealthReport>, ClassifiedError> {
    let responses = state.responses.in_context("health_check");
    responses
        .wrap_value(|| async move {
            let db_healthy = match keel_db::health_check(&state.pool).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(error = %e, "Database health check failed");
                    false
                }
            };

            Ok::<_, AppError>(HealthReport {
                status: if db_healthy { "ok" } else { "degraded" },
                version: env!("CARGO_PKG_VERSION"),
                db_healthy,
                pool: PoolStats {
                    size: state.pool.size(),
                    idle: state.pool.num_idle(),
                    max: state.pool.options().get_max_connections(),
                },
            })
        })
        .await
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
