use std::sync::Arc;

use crate::config::ServerConfig;
use crate::controller::ResponseBuilder;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: keel_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Runs handler bodies and shapes their responses.
    pub responses: ResponseBuilder,
}
