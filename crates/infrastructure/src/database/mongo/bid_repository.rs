use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Collection, Database};

use super::require_valid_id;
use taskmarket_core::MarketResult;
use taskmarket_domain::entities::{Bid, NewBid};
use taskmarket_domain::repositories::BidRepository;

const COLLECTION: &str = "bids";

pub struct MongoBidRepository {
    collection: Collection<Bid>,
}

impl MongoBidRepository {
    pub fn new(database: Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl BidRepository for MongoBidRepository {
    async fn create(&self, bid: &NewBid) -> MarketResult<Bid> {
        require_valid_id(&bid.task_id)?;
        let bid = Bid {
            id: ObjectId::new().to_hex(),
            task_id: bid.task_id.clone(),
            user_email: bid.user_email.clone(),
            created_at: chrono::Utc::now(),
        };
        self.collection.insert_one(&bid).await?;
        Ok(bid)
    }

    async fn find_by_task(&self, task_id: &str) -> MarketResult<Vec<Bid>> {
        require_valid_id(task_id)?;
        let cursor = self.collection.find(doc! { "taskId": task_id }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_all_for_task(&self, task_id: &str) -> MarketResult<u64> {
        require_valid_id(task_id)?;
        let result = self
            .collection
            .delete_many(doc! { "taskId": task_id })
            .await?;
        Ok(result.deleted_count)
    }
}
