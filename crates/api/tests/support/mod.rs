#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};

use taskmarket_api::create_app;
use taskmarket_core::{MarketError, MarketResult};
use taskmarket_domain::entities::{
    is_valid_object_id, Bid, NewBid, NewTask, Task, TaskFilter, TaskUpdate,
};
use taskmarket_domain::repositories::{BidRepository, TaskRepository};
use taskmarket_domain::services::DefaultMarketplaceService;

pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

fn require_valid_id(id: &str) -> MarketResult<()> {
    if is_valid_object_id(id) {
        Ok(())
    } else {
        Err(MarketError::invalid_id(id))
    }
}

/// Store fake with the same filter/sort/limit semantics as the Mongo
/// implementation, keyed by insertion order.
#[derive(Default)]
pub struct InMemoryTasks {
    docs: Mutex<Vec<Task>>,
}

#[derive(Default)]
pub struct InMemoryBids {
    docs: Mutex<Vec<Bid>>,
}

#[async_trait]
impl TaskRepository for InMemoryTasks {
    async fn create(&self, task: &NewTask) -> MarketResult<Task> {
        let task = Task {
            id: ObjectId::new().to_hex(),
            title: task.title.clone(),
            category: task.category,
            description: task.description.clone(),
            deadline: task.deadline,
            budget: task.budget,
            user_email: task.user_email.clone(),
            user_name: task.user_name.clone(),
            bids_count: 0,
        };
        self.docs.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: &str) -> MarketResult<Option<Task>> {
        require_valid_id(id)?;
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn list(&self, filter: &TaskFilter) -> MarketResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|t| {
                filter
                    .user_email
                    .as_ref()
                    .map_or(true, |email| &t.user_email == email)
            })
            .cloned()
            .collect();
        if filter.sort_by_deadline {
            tasks.sort_by_key(|t| t.deadline);
        }
        if let Some(limit) = filter.limit {
            tasks.truncate(limit as usize);
        }
        Ok(tasks)
    }

    async fn update(&self, id: &str, changes: &TaskUpdate) -> MarketResult<Option<Task>> {
        require_valid_id(id)?;
        let mut docs = self.docs.lock().unwrap();
        Ok(docs.iter_mut().find(|t| t.id == id).map(|task| {
            if let Some(title) = &changes.title {
                task.title = title.clone();
            }
            if let Some(category) = changes.category {
                task.category = category;
            }
            if let Some(description) = &changes.description {
                task.description = description.clone();
            }
            if let Some(deadline) = changes.deadline {
                task.deadline = deadline;
            }
            if let Some(budget) = changes.budget {
                task.budget = budget;
            }
            if let Some(email) = &changes.user_email {
                task.user_email = email.clone();
            }
            if let Some(name) = &changes.user_name {
                task.user_name = name.clone();
            }
            task.clone()
        }))
    }

    async fn delete(&self, id: &str) -> MarketResult<bool> {
        require_valid_id(id)?;
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|t| t.id != id);
        Ok(docs.len() < before)
    }

    async fn increment_bids_count(&self, id: &str) -> MarketResult<Option<Task>> {
        require_valid_id(id)?;
        let mut docs = self.docs.lock().unwrap();
        Ok(docs.iter_mut().find(|t| t.id == id).map(|task| {
            task.bids_count += 1;
            task.clone()
        }))
    }
}

#[async_trait]
impl BidRepository for InMemoryBids {
    async fn create(&self, bid: &NewBid) -> MarketResult<Bid> {
        require_valid_id(&bid.task_id)?;
        let bid = Bid {
            id: ObjectId::new().to_hex(),
            task_id: bid.task_id.clone(),
            user_email: bid.user_email.clone(),
            created_at: chrono::Utc::now(),
        };
        self.docs.lock().unwrap().push(bid.clone());
        Ok(bid)
    }

    async fn find_by_task(&self, task_id: &str) -> MarketResult<Vec<Bid>> {
        require_valid_id(task_id)?;
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn delete_all_for_task(&self, task_id: &str) -> MarketResult<u64> {
        require_valid_id(task_id)?;
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|b| b.task_id != task_id);
        Ok((before - docs.len()) as u64)
    }
}

pub fn test_app() -> Router {
    let tasks = Arc::new(InMemoryTasks::default());
    let bids = Arc::new(InMemoryBids::default());
    let marketplace = Arc::new(DefaultMarketplaceService::new(tasks.clone(), bids.clone()));
    create_app(tasks, bids, marketplace, &[ALLOWED_ORIGIN.to_string()])
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn sample_task_payload() -> Value {
    json!({
        "title": "Logo redesign",
        "category": "Design",
        "description": "Need a new logo for startup",
        "deadline": "2025-06-01",
        "budget": 100,
        "userEmail": "a@b.com",
        "userName": "Jo"
    })
}

/// A well-formed identifier no document will ever carry.
pub fn unknown_id() -> String {
    ObjectId::new().to_hex()
}
