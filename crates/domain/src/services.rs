//! Cross-entity business rules: the bid placement protocol, the task
//! deletion cascade, and the denormalized bid-count read.
//!
//! None of these sequences are transactional. Each individual write relies
//! on the store's per-document atomicity; the windows between steps are
//! accepted limitations and are surfaced in the logs rather than hidden.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::entities::{Bid, NewBid};
use crate::repositories::{BidRepository, TaskRepository};
use taskmarket_core::{MarketError, MarketResult};

/// Operations that span both collections.
#[async_trait]
pub trait MarketplaceService: Send + Sync {
    /// Places a bid: verifies the parent task exists, records the bid, then
    /// increments the task's bids count.
    async fn place_bid(&self, bid: &NewBid) -> MarketResult<Bid>;
    /// Removes a task and every bid referencing it; returns the number of
    /// bids removed.
    async fn remove_task(&self, id: &str) -> MarketResult<u64>;
    /// Reads the task's stored bids count. This reflects only successfully
    /// completed increments, not a live recount of bid documents.
    async fn bid_count_for(&self, id: &str) -> MarketResult<i64>;
}

pub struct DefaultMarketplaceService {
    tasks: Arc<dyn TaskRepository>,
    bids: Arc<dyn BidRepository>,
}

impl DefaultMarketplaceService {
    pub fn new(tasks: Arc<dyn TaskRepository>, bids: Arc<dyn BidRepository>) -> Self {
        Self { tasks, bids }
    }
}

#[async_trait]
impl MarketplaceService for DefaultMarketplaceService {
    async fn place_bid(&self, bid: &NewBid) -> MarketResult<Bid> {
        // Existence check first; a malformed id fails here before any write.
        let task = self
            .tasks
            .find_by_id(&bid.task_id)
            .await?
            .ok_or_else(|| MarketError::task_not_found(&bid.task_id))?;

        let created = self.bids.create(bid).await?;

        match self.tasks.increment_bids_count(&task.id).await {
            Ok(Some(_)) => Ok(created),
            Ok(None) => {
                // The task was deleted between the existence check and the
                // increment. The bid stays recorded; accepted race.
                warn!(
                    task_id = %task.id,
                    bid_id = %created.id,
                    "task disappeared after bid was recorded; bids count not incremented"
                );
                Ok(created)
            }
            Err(e) => {
                error!(
                    task_id = %task.id,
                    bid_id = %created.id,
                    error = %e,
                    "bid recorded but bids count increment failed; counter is now behind"
                );
                Err(e)
            }
        }
    }

    async fn remove_task(&self, id: &str) -> MarketResult<u64> {
        if !self.tasks.delete(id).await? {
            return Err(MarketError::task_not_found(id));
        }

        // Second step of the cascade. A crash between the two steps leaves
        // orphaned bids behind; no transactional guarantee is claimed.
        let removed = self.bids.delete_all_for_task(id).await?;
        info!(task_id = %id, bids_removed = removed, "task deleted with cascading bids");
        Ok(removed)
    }

    async fn bid_count_for(&self, id: &str) -> MarketResult<i64> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| MarketError::task_not_found(id))?;
        Ok(task.bids_count)
    }
}
