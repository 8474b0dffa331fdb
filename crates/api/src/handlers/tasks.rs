use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{error::ApiResult, routes::AppState, validation};
use taskmarket_core::MarketError;
use taskmarket_domain::entities::{NewTask, TaskCategory, TaskFilter, TaskUpdate};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 3, message = "title must be at least 3 characters"))]
    pub title: String,
    pub category: TaskCategory,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,
    pub deadline: NaiveDate,
    #[validate(range(min = 1.0, message = "budget must be at least 1"))]
    pub budget: f64,
    #[validate(custom(function = validation::email_shape))]
    pub user_email: String,
    #[validate(length(min = 2, message = "userName must be at least 2 characters"))]
    pub user_name: String,
}

/// Partial update; present fields are re-validated with the same rules as
/// creation.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 3, message = "title must be at least 3 characters"))]
    pub title: Option<String>,
    pub category: Option<TaskCategory>,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    #[validate(range(min = 1.0, message = "budget must be at least 1"))]
    pub budget: Option<f64>,
    #[validate(custom(function = validation::email_shape))]
    pub user_email: Option<String>,
    #[validate(length(min = 2, message = "userName must be at least 2 characters"))]
    pub user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQueryParams {
    pub user_email: Option<String>,
    pub limit: Option<i64>,
    pub sort: Option<String>,
}

pub async fn list_tasks(
    State(state): State<AppState>,
    params: Result<Query<TaskQueryParams>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(params) = params?;
    let limit = validation::effective_limit(params.limit);

    let filter = TaskFilter {
        user_email: params.user_email,
        sort_by_deadline: params.sort.as_deref() == Some("deadline"),
        limit,
    };

    let tasks = state.task_repo.list(&filter).await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let task = state
        .task_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| MarketError::task_not_found(&id))?;
    Ok(Json(task))
}

pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    request.validate()?;

    let task = state
        .task_repo
        .create(&NewTask {
            title: request.title,
            category: request.category,
            description: request.description,
            deadline: request.deadline,
            budget: request.budget,
            user_email: request.user_email,
            user_name: request.user_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    request.validate()?;

    let changes = TaskUpdate {
        title: request.title,
        category: request.category,
        description: request.description,
        deadline: request.deadline,
        budget: request.budget,
        user_email: request.user_email,
        user_name: request.user_name,
    };

    let task = state
        .task_repo
        .update(&id, &changes)
        .await?
        .ok_or_else(|| MarketError::task_not_found(&id))?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.marketplace.remove_task(&id).await?;
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}

pub async fn get_bids_count(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let count = state.marketplace.bid_count_for(&id).await?;
    Ok(Json(json!({
        "message": format!("You bid for {count} opportunities")
    })))
}
