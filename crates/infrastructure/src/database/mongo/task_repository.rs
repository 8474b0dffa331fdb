use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_document, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use super::require_valid_id;
use taskmarket_core::MarketResult;
use taskmarket_domain::entities::{NewTask, Task, TaskFilter, TaskUpdate};
use taskmarket_domain::repositories::TaskRepository;

const COLLECTION: &str = "tasks";

pub struct MongoTaskRepository {
    collection: Collection<Task>,
}

impl MongoTaskRepository {
    pub fn new(database: Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }
}

/// Builds the equality filter for a task listing.
fn list_filter(filter: &TaskFilter) -> Document {
    let mut query = doc! {};
    if let Some(email) = &filter.user_email {
        query.insert("userEmail", email);
    }
    query
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
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
        self.collection.insert_one(&task).await?;
        Ok(task)
    }

    async fn find_by_id(&self, id: &str) -> MarketResult<Option<Task>> {
        require_valid_id(id)?;
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn list(&self, filter: &TaskFilter) -> MarketResult<Vec<Task>> {
        let mut find = self.collection.find(list_filter(filter));
        if filter.sort_by_deadline {
            // Deadlines are stored as ISO dates, so the ascending index
            // order matches chronological order.
            find = find.sort(doc! { "deadline": 1 });
        }
        if let Some(limit) = filter.limit {
            find = find.limit(limit);
        }
        let cursor = find.await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update(&self, id: &str, changes: &TaskUpdate) -> MarketResult<Option<Task>> {
        require_valid_id(id)?;
        if changes.is_empty() {
            // Nothing to merge; an empty $set is rejected by the store.
            return self.find_by_id(id).await;
        }
        let set = to_document(changes).map_err(mongodb::error::Error::from)?;
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> MarketResult<bool> {
        require_valid_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn increment_bids_count(&self, id: &str) -> MarketResult<Option<Task>> {
        require_valid_id(id)?;
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$inc": { "bidsCount": 1 } })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }
}
