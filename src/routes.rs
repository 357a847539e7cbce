//! HTTP router construction.

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

/// Build the application router.
///
/// # Routes
///
/// - `POST /add` - add a transaction
/// - `GET /list` - list all transactions
/// - `GET /health` - store connectivity check
///
/// Every route is wrapped in request tracing and a permissive CORS policy.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/add", post(handlers::transactions::add_transaction))
        .route("/list", get(handlers::transactions::list_transactions))
        .route("/health", get(handlers::health::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
