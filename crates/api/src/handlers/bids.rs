use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::{ApiError, ApiResult},
    routes::AppState,
    validation,
};
use taskmarket_domain::entities::NewBid;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidRequest {
    pub task_id: String,
    #[validate(custom(function = validation::email_shape))]
    pub user_email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidQueryParams {
    pub task_id: Option<String>,
}

pub async fn list_bids(
    State(state): State<AppState>,
    Query(params): Query<BidQueryParams>,
) -> ApiResult<impl IntoResponse> {
    let task_id = params
        .task_id
        .ok_or_else(|| ApiError::BadRequest("A valid taskId is required".to_string()))?;

    let bids = state.bid_repo.find_by_task(&task_id).await?;
    Ok(Json(bids))
}

pub async fn create_bid(
    State(state): State<AppState>,
    payload: Result<Json<CreateBidRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    request.validate()?;

    let bid = state
        .marketplace
        .place_bid(&NewBid {
            task_id: request.task_id,
            user_email: request.user_email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(bid)))
}
