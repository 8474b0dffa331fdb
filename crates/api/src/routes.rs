use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handlers::{
    bids::{create_bid, list_bids},
    health::health_check,
    tasks::{create_task, delete_task, get_bids_count, get_task, list_tasks, update_task},
};
use taskmarket_domain::repositories::{BidRepository, TaskRepository};
use taskmarket_domain::services::MarketplaceService;

#[derive(Clone)]
pub struct AppState {
    pub task_repo: Arc<dyn TaskRepository>,
    pub bid_repo: Arc<dyn BidRepository>,
    pub marketplace: Arc<dyn MarketplaceService>,
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/bids-count", get(get_bids_count))
        .route("/api/bids", get(list_bids).post(create_bid))
        .with_state(state)
}
