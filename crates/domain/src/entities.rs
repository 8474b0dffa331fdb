use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A work item posted by a client. Stored in the `tasks` collection with its
/// identifier as the 24-hex string form of an ObjectId.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub category: TaskCategory,
    pub description: String,
    pub deadline: NaiveDate,
    pub budget: f64,
    pub user_email: String,
    pub user_name: String,
    /// Denormalized count of bids referencing this task. Mutated only via
    /// atomic increments, never recomputed from the `bids` collection.
    pub bids_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskCategory {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    Design,
    Writing,
    Marketing,
}

/// A proposal submitted by a user against a specific task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    #[serde(rename = "_id")]
    pub id: String,
    /// References a `Task` id. Plain string, shape-validated only; not a
    /// strong foreign key at the store layer.
    pub task_id: String,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

/// Task payload accepted on creation; the store assigns the identifier and
/// the bids count starts at zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub category: TaskCategory,
    pub description: String,
    pub deadline: NaiveDate,
    pub budget: f64,
    pub user_email: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBid {
    pub task_id: String,
    pub user_email: String,
}

/// Partial task update; only the provided fields are merged into the stored
/// document. The bids count is not updatable through this path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.budget.is_none()
            && self.user_email.is_none()
            && self.user_name.is_none()
    }
}

/// Read filter for task listings. Limit caps the result length; there is no
/// offset or cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub user_email: Option<String>,
    pub sort_by_deadline: bool,
    pub limit: Option<i64>,
}

/// Checks the store's 24-character hexadecimal object-id shape.
pub fn is_valid_object_id(id: &str) -> bool {
    ObjectId::parse_str(id).is_ok()
}
