//! REST surface for the task marketplace, built on axum.
//!
//! Routes map one-to-one onto repository and marketplace-service calls;
//! success bodies are the raw entity JSON and error bodies carry a
//! `message` field. Base path is `/api`.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;

use middleware::{cors_layer, request_logging, trace_layer};
use routes::{create_routes, AppState};
use taskmarket_domain::repositories::{BidRepository, TaskRepository};
use taskmarket_domain::services::MarketplaceService;

/// Assembles the full application: routes plus trace, CORS and
/// request-logging layers.
pub fn create_app(
    task_repo: Arc<dyn TaskRepository>,
    bid_repo: Arc<dyn BidRepository>,
    marketplace: Arc<dyn MarketplaceService>,
    cors_origins: &[String],
) -> Router {
    let state = AppState {
        task_repo,
        bid_repo,
        marketplace,
    };

    create_routes(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer())
            .layer(cors_layer(cors_origins))
            .layer(axum::middleware::from_fn(request_logging)),
    )
}
